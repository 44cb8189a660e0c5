use thiserror::Error;

use crate::database::DatabaseError;

/// Failure kinds of the authentication core.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown user or wrong password; the two are never distinguished.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("{0}")]
    Unauthorized(TokenRejection),

    #[error("Requires one of roles: {}", required.join(", "))]
    Forbidden { required: Vec<String> },

    #[error("Failed to sign token: {0}")]
    Signing(#[source] jsonwebtoken::errors::Error),

    #[error("Password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Store(#[from] DatabaseError),
}

/// Why a presented bearer token was not accepted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum TokenRejection {
    #[error("Missing Authorization header")]
    MissingHeader,

    #[error("Authorization header must use Bearer token format")]
    InvalidScheme,

    #[error("Empty bearer token")]
    EmptyToken,

    #[error("Token has expired")]
    Expired,

    #[error("Token signature is invalid")]
    BadSignature,

    #[error("Token issuer is not accepted")]
    InvalidIssuer,

    #[error("Token audience is not accepted")]
    InvalidAudience,

    #[error("Malformed token")]
    Malformed,
}

impl From<TokenRejection> for AuthError {
    fn from(rejection: TokenRejection) -> Self {
        AuthError::Unauthorized(rejection)
    }
}
