use async_trait::async_trait;

use crate::auth::password;
use crate::database::models::{Flight, FlightFilter, FlightStatus, NewFlight, UserRecord};
use crate::database::DatabaseError;

/// Identity and role persistence used by authentication and registration.
///
/// Implementations provide their own concurrency control; callers never
/// hold locks across calls.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Exact, case-sensitive username lookup
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DatabaseError>;

    async fn get_roles(&self, user: &UserRecord) -> Result<Vec<String>, DatabaseError>;

    /// Fails with `DatabaseError::Conflict` when the username is taken
    async fn create_identity(&self, username: &str, password_hash: &str) -> Result<UserRecord, DatabaseError>;

    async fn role_exists(&self, role: &str) -> Result<bool, DatabaseError>;

    async fn create_role(&self, role: &str) -> Result<(), DatabaseError>;

    /// Idempotent
    async fn add_role_to_identity(&self, user: &UserRecord, role: &str) -> Result<(), DatabaseError>;

    /// Create the identity, create `role` if missing and assign it, all or nothing.
    /// Fails with `DatabaseError::Conflict` when the username is taken.
    async fn register_identity(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<UserRecord, DatabaseError>;

    fn check_password(&self, user: &UserRecord, plaintext: &str) -> bool {
        password::verify_password(plaintext, &user.password_hash).is_ok()
    }
}

#[async_trait]
pub trait FlightRepository: Send + Sync {
    /// Flights matching `filter`, ordered by id
    async fn list(&self, filter: &FlightFilter) -> Result<Vec<Flight>, DatabaseError>;

    /// Returns the assigned id
    async fn insert(&self, flight: NewFlight) -> Result<i64, DatabaseError>;

    /// Returns `false` when no flight has this id
    async fn update_status(&self, id: i64, status: FlightStatus) -> Result<bool, DatabaseError>;
}
