use std::collections::BTreeSet;
use std::sync::Arc;

use crate::auth::error::AuthError;
use crate::auth::password;
use crate::database::CredentialStore;

/// A user whose password has been verified.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub username: String,
    pub roles: BTreeSet<String>,
}

/// Checks username/password pairs against the credential store.
#[derive(Clone)]
pub struct PasswordVerifier {
    store: Arc<dyn CredentialStore>,
}

impl PasswordVerifier {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Unknown users and wrong passwords both yield `InvalidCredentials`.
    pub async fn verify(&self, username: &str, plaintext: &str) -> Result<Identity, AuthError> {
        let user = self.store.find_by_username(username).await?;
        let plaintext = plaintext.to_owned();

        // Argon2 is CPU bound; keep it off the async workers.
        let (user, matches) = match user {
            Some(user) => {
                let store = Arc::clone(&self.store);
                tokio::task::spawn_blocking(move || {
                    let ok = store.check_password(&user, &plaintext);
                    (Some(user), ok)
                })
                .await
                .map_err(|e| AuthError::Hashing(e.to_string()))?
            }
            None => {
                tokio::task::spawn_blocking(move || password::burn_verification(&plaintext))
                    .await
                    .map_err(|e| AuthError::Hashing(e.to_string()))?;
                (None, false)
            }
        };

        let user = match (user, matches) {
            (Some(user), true) => user,
            _ => return Err(AuthError::InvalidCredentials),
        };

        let roles = self.store.get_roles(&user).await?.into_iter().collect();
        Ok(Identity {
            username: user.username,
            roles,
        })
    }
}
