use std::sync::Arc;

use crate::auth::{password, AuthError, Identity, IssuedToken, PasswordVerifier, TokenIssuer};
use crate::config::RolePolicy;
use crate::database::{CredentialStore, DatabaseError};

#[derive(Debug, thiserror::Error)]
pub enum RegistrationError {
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),
    #[error("Role '{0}' cannot be chosen at registration")]
    RoleNotAllowed(String),
    #[error(transparent)]
    Auth(#[from] AuthError),
}

impl From<DatabaseError> for RegistrationError {
    fn from(err: DatabaseError) -> Self {
        RegistrationError::Auth(AuthError::Store(err))
    }
}

/// Login and self-service registration.
pub struct AuthService {
    verifier: PasswordVerifier,
    issuer: TokenIssuer,
    credentials: Arc<dyn CredentialStore>,
    registration_roles: RolePolicy,
}

impl AuthService {
    pub fn new(credentials: Arc<dyn CredentialStore>, issuer: TokenIssuer, registration_roles: RolePolicy) -> Self {
        Self {
            verifier: PasswordVerifier::new(Arc::clone(&credentials)),
            issuer,
            credentials,
            registration_roles,
        }
    }

    /// Verify credentials and mint a token. No token exists for a failed verification.
    pub async fn login(&self, username: &str, password: &str) -> Result<(Identity, IssuedToken), AuthError> {
        let identity = self.verifier.verify(username, password).await?;
        let issued = self.issuer.issue(&identity)?;
        Ok((identity, issued))
    }

    /// Create an identity holding exactly `role`, creating the role on first use.
    /// The store applies all of it or none of it.
    pub async fn register(&self, username: &str, plaintext: &str, role: &str) -> Result<(), RegistrationError> {
        if !self.registration_roles.permits(role) {
            return Err(RegistrationError::RoleNotAllowed(role.to_string()));
        }

        let plaintext = plaintext.to_owned();
        let hash = tokio::task::spawn_blocking(move || password::hash_password(&plaintext))
            .await
            .map_err(|e| AuthError::Hashing(e.to_string()))?
            .map_err(|e| AuthError::Hashing(e.to_string()))?;

        match self.credentials.register_identity(username, &hash, role).await {
            Ok(_) => Ok(()),
            Err(DatabaseError::Conflict(_)) => Err(RegistrationError::UsernameTaken(username.to_string())),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::TokenValidator;
    use crate::config::JwtConfig;
    use crate::database::memory::MemoryCredentialStore;

    fn jwt() -> JwtConfig {
        JwtConfig {
            key: "auth-service-test-key-0123456789abcdefgh".to_string(),
            issuer: Some("flights-api".to_string()),
            audience: None,
        }
    }

    fn service(policy: RolePolicy) -> AuthService {
        AuthService::new(Arc::new(MemoryCredentialStore::new()), TokenIssuer::new(&jwt()), policy)
    }

    fn default_policy() -> RolePolicy {
        RolePolicy::AllowList(vec!["User".to_string(), "Moderator".to_string()])
    }

    #[tokio::test]
    async fn register_then_login_yields_token_with_role() {
        let service = service(default_policy());
        service.register("alice", "p@ss1!", "Moderator").await.unwrap();

        let (identity, issued) = service.login("alice", "p@ss1!").await.unwrap();
        assert_eq!(identity.username, "alice");

        let claims = TokenValidator::new(&jwt()).validate(&issued.token).unwrap();
        assert_eq!(claims.sub, "alice");
        assert_eq!(claims.roles, vec!["Moderator".to_string()]);
    }

    #[tokio::test]
    async fn duplicate_username_is_reported() {
        let service = service(default_policy());
        service.register("bob", "secret1", "User").await.unwrap();

        let err = service.register("bob", "secret2", "User").await.unwrap_err();
        assert!(matches!(err, RegistrationError::UsernameTaken(ref name) if name == "bob"));
    }

    #[tokio::test]
    async fn taken_username_keeps_its_original_role() {
        let store = Arc::new(MemoryCredentialStore::new());
        let service = AuthService::new(store.clone(), TokenIssuer::new(&jwt()), default_policy());
        service.register("frank", "secret1", "User").await.unwrap();

        let err = service.register("frank", "secret2", "Moderator").await.unwrap_err();
        assert!(matches!(err, RegistrationError::UsernameTaken(_)));

        assert!(!store.role_exists("Moderator").await.unwrap());
        let (identity, _) = service.login("frank", "secret1").await.unwrap();
        assert_eq!(identity.roles.into_iter().collect::<Vec<_>>(), vec!["User".to_string()]);
    }

    #[tokio::test]
    async fn disallowed_role_is_refused_before_anything_is_stored() {
        let service = service(default_policy());

        let err = service.register("carol", "secret1", "Admin").await.unwrap_err();
        assert!(matches!(err, RegistrationError::RoleNotAllowed(_)));
        assert!(service.login("carol", "secret1").await.is_err());
    }

    #[tokio::test]
    async fn wildcard_policy_accepts_any_role() {
        let service = service(RolePolicy::Any);
        service.register("dave", "secret1", "Admin").await.unwrap();

        let (identity, _) = service.login("dave", "secret1").await.unwrap();
        assert!(identity.roles.contains("Admin"));
    }

    #[tokio::test]
    async fn failed_login_issues_nothing() {
        let service = service(default_policy());
        service.register("erin", "secret1", "User").await.unwrap();

        assert!(matches!(
            service.login("erin", "nope").await,
            Err(AuthError::InvalidCredentials)
        ));
    }
}
