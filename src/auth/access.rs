use std::collections::BTreeSet;

use crate::auth::error::AuthError;
use crate::auth::jwt::Claims;

/// Role names the service itself refers to.
pub mod roles {
    pub const MODERATOR: &str = "Moderator";
    pub const USER: &str = "User";
}

/// Per-route authorization rule applied after token validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccessPolicy {
    /// Any valid token.
    Authenticated,
    /// A valid token holding at least one of these roles (exact, case-sensitive).
    AnyRole(BTreeSet<String>),
}

impl AccessPolicy {
    pub fn any_role<I, S>(roles: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        AccessPolicy::AnyRole(roles.into_iter().map(Into::into).collect())
    }

    pub fn authorize(&self, claims: &Claims) -> Result<(), AuthError> {
        match self {
            AccessPolicy::Authenticated => Ok(()),
            AccessPolicy::AnyRole(required) if required.iter().any(|role| claims.has_role(role)) => Ok(()),
            AccessPolicy::AnyRole(required) => Err(AuthError::Forbidden {
                required: required.iter().cloned().collect(),
            }),
        }
    }
}
