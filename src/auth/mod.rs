//! Authentication and authorization core.
//!
//! - [`PasswordVerifier`] checks credentials against a [`CredentialStore`](crate::database::CredentialStore)
//! - [`TokenIssuer`] mints HS256 access tokens for a verified [`Identity`]
//! - [`TokenValidator`] verifies presented tokens and yields their [`Claims`]
//! - [`AccessPolicy`] decides whether validated claims may reach an endpoint
//!
//! The request-pipeline stage that ties validator and policy together lives in
//! [`crate::middleware::auth`].

pub mod access;
pub mod credentials;
pub mod error;
pub mod jwt;
pub mod password;

pub use access::{roles, AccessPolicy};
pub use credentials::{Identity, PasswordVerifier};
pub use error::{AuthError, TokenRejection};
pub use jwt::{Claims, IssuedToken, TokenIssuer, TokenValidator, TOKEN_LIFETIME_MINUTES};
