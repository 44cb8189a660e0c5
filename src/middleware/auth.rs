use std::sync::Arc;

use axum::{
    async_trait,
    extract::{FromRequestParts, Request, State},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::auth::{AccessPolicy, AuthError, Claims, TokenRejection, TokenValidator};
use crate::error::ApiError;

/// Authenticated user context extracted from the bearer token
#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct AuthUser {
    pub username: String,
    pub token_id: String,
    pub roles: Vec<String>,
}

impl From<Claims> for AuthUser {
    fn from(claims: Claims) -> Self {
        Self {
            username: claims.sub,
            token_id: claims.jti,
            roles: claims.roles,
        }
    }
}

/// Available to handlers behind [`access_gate`].
#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts.extensions.get::<AuthUser>().cloned().ok_or_else(|| {
            tracing::error!(path = %parts.uri.path(), "AuthUser requested on a route without an access gate");
            ApiError::internal_server_error("An error occurred while processing your request")
        })
    }
}

/// Token validator plus the policy one group of routes is held to.
#[derive(Clone)]
pub struct AccessGate {
    tokens: Arc<TokenValidator>,
    policy: Arc<AccessPolicy>,
}

impl AccessGate {
    pub fn new(tokens: Arc<TokenValidator>, policy: AccessPolicy) -> Self {
        Self {
            tokens,
            policy: Arc::new(policy),
        }
    }

    /// Authenticate, then authorize. Runs before any handler extractor.
    pub fn check(&self, headers: &HeaderMap) -> Result<Claims, AuthError> {
        let token = bearer_token(headers)?;
        let claims = self.tokens.validate(token)?;
        self.policy.authorize(&claims)?;
        Ok(claims)
    }
}

/// Route-layer middleware: 401 without a valid token, 403 without a required role.
pub async fn access_gate(
    State(gate): State<AccessGate>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let claims = gate.check(request.headers()).map_err(|err| {
        match &err {
            AuthError::Forbidden { required } => tracing::warn!(
                path = %request.uri().path(),
                required = ?required,
                "Access denied: missing required role"
            ),
            other => tracing::debug!(path = %request.uri().path(), reason = %other, "Rejected bearer token"),
        }
        ApiError::from(err)
    })?;

    request.extensions_mut().insert(AuthUser::from(claims));

    Ok(next.run(request).await)
}

/// Extract the token from `Authorization: Bearer <token>`. The scheme name is case-insensitive.
fn bearer_token(headers: &HeaderMap) -> Result<&str, TokenRejection> {
    let auth_str = headers
        .get(AUTHORIZATION)
        .ok_or(TokenRejection::MissingHeader)?
        .to_str()
        .map_err(|_| TokenRejection::InvalidScheme)?
        .trim();

    let (scheme, token) = auth_str.split_once(' ').unwrap_or((auth_str, ""));
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(TokenRejection::InvalidScheme);
    }

    let token = token.trim();

    if token.is_empty() {
        return Err(TokenRejection::EmptyToken);
    }
    Ok(token)
}
