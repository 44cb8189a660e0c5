use std::sync::Arc;

use tracing::{info, warn};

use crate::config::DatabaseConfig;
use crate::database::memory::{MemoryCredentialStore, MemoryFlightStore};
use crate::database::postgres::{PgCredentialStore, PgFlightStore};
use crate::database::store::{CredentialStore, FlightRepository};
use crate::database::{DatabaseError, DatabaseManager};

/// The credential and flight stores the service runs against.
#[derive(Clone)]
pub struct Storage {
    pub credentials: Arc<dyn CredentialStore>,
    pub flights: Arc<dyn FlightRepository>,
    database: Option<DatabaseManager>,
}

impl Storage {
    /// Volatile stores; everything is lost on shutdown.
    pub fn memory() -> Self {
        Self {
            credentials: Arc::new(MemoryCredentialStore::new()),
            flights: Arc::new(MemoryFlightStore::new()),
            database: None,
        }
    }

    pub fn postgres(database: DatabaseManager) -> Self {
        let pool = database.pool().clone();
        Self {
            credentials: Arc::new(PgCredentialStore::new(pool.clone())),
            flights: Arc::new(PgFlightStore::new(pool)),
            database: Some(database),
        }
    }

    /// Postgres when a URL is configured, in-memory otherwise.
    pub async fn from_config(config: &DatabaseConfig, run_migrations: bool) -> Result<Self, DatabaseError> {
        if config.url.is_none() {
            warn!("DATABASE_URL not set, using in-memory storage");
            return Ok(Self::memory());
        }

        let database = DatabaseManager::connect(config).await?;
        if run_migrations {
            database.migrate().await?;
        } else {
            info!("Skipping database migrations");
        }
        Ok(Self::postgres(database))
    }

    pub fn backend(&self) -> &'static str {
        if self.database.is_some() {
            "postgres"
        } else {
            "memory"
        }
    }

    pub async fn health_check(&self) -> Result<(), DatabaseError> {
        match &self.database {
            Some(database) => database.health_check().await,
            None => Ok(()),
        }
    }

    pub async fn close(&self) {
        if let Some(database) = &self.database {
            database.close().await;
        }
    }
}
