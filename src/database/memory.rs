//! In-process stores for development runs and tests.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use crate::database::models::{Flight, FlightFilter, FlightStatus, NewFlight, UserRecord};
use crate::database::store::{CredentialStore, FlightRepository};
use crate::database::DatabaseError;

#[derive(Default)]
struct Identities {
    next_id: i64,
    users: HashMap<String, UserRecord>,
    roles: BTreeSet<String>,
    user_roles: HashMap<i64, BTreeSet<String>>,
}

impl Identities {
    fn insert_user(&mut self, username: &str, password_hash: &str) -> Result<UserRecord, DatabaseError> {
        if self.users.contains_key(username) {
            return Err(DatabaseError::Conflict(format!("username '{}' is taken", username)));
        }
        self.next_id += 1;
        let user = UserRecord {
            id: self.next_id,
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: Utc::now(),
        };
        self.users.insert(user.username.clone(), user.clone());
        Ok(user)
    }

    fn assign(&mut self, user_id: i64, role: &str) -> Result<(), DatabaseError> {
        if !self.roles.contains(role) {
            return Err(DatabaseError::Conflict(format!("role '{}' does not exist", role)));
        }
        self.user_roles.entry(user_id).or_default().insert(role.to_string());
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryCredentialStore {
    inner: RwLock<Identities>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DatabaseError> {
        Ok(self.inner.read().await.users.get(username).cloned())
    }

    async fn get_roles(&self, user: &UserRecord) -> Result<Vec<String>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner
            .user_roles
            .get(&user.id)
            .map(|roles| roles.iter().cloned().collect())
            .unwrap_or_default())
    }

    async fn create_identity(&self, username: &str, password_hash: &str) -> Result<UserRecord, DatabaseError> {
        self.inner.write().await.insert_user(username, password_hash)
    }

    async fn role_exists(&self, role: &str) -> Result<bool, DatabaseError> {
        Ok(self.inner.read().await.roles.contains(role))
    }

    async fn create_role(&self, role: &str) -> Result<(), DatabaseError> {
        self.inner.write().await.roles.insert(role.to_string());
        Ok(())
    }

    async fn add_role_to_identity(&self, user: &UserRecord, role: &str) -> Result<(), DatabaseError> {
        self.inner.write().await.assign(user.id, role)
    }

    async fn register_identity(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<UserRecord, DatabaseError> {
        // One write guard for all steps; nothing is touched if the username is taken
        let mut inner = self.inner.write().await;
        let user = inner.insert_user(username, password_hash)?;
        inner.roles.insert(role.to_string());
        inner.assign(user.id, role)?;
        Ok(user)
    }
}

#[derive(Default)]
struct Flights {
    next_id: i64,
    rows: BTreeMap<i64, Flight>,
}

#[derive(Default)]
pub struct MemoryFlightStore {
    inner: RwLock<Flights>,
}

impl MemoryFlightStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FlightRepository for MemoryFlightStore {
    async fn list(&self, filter: &FlightFilter) -> Result<Vec<Flight>, DatabaseError> {
        let inner = self.inner.read().await;
        Ok(inner.rows.values().filter(|f| filter.matches(f)).cloned().collect())
    }

    async fn insert(&self, flight: NewFlight) -> Result<i64, DatabaseError> {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let id = inner.next_id;
        inner.rows.insert(id, flight.with_id(id));
        Ok(id)
    }

    async fn update_status(&self, id: i64, status: FlightStatus) -> Result<bool, DatabaseError> {
        let mut inner = self.inner.write().await;
        match inner.rows.get_mut(&id) {
            Some(flight) => {
                flight.status = status;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}
