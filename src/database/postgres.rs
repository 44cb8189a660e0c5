use async_trait::async_trait;
use sqlx::PgPool;

use crate::database::models::{Flight, FlightFilter, FlightRow, FlightStatus, NewFlight, UserRecord};
use crate::database::store::{CredentialStore, FlightRepository};
use crate::database::DatabaseError;

pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DatabaseError> {
        let user = sqlx::query_as::<_, UserRecord>(
            "SELECT id, username, password_hash, created_at FROM users WHERE username = $1",
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user)
    }

    async fn get_roles(&self, user: &UserRecord) -> Result<Vec<String>, DatabaseError> {
        let roles = sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.name
            FROM roles r
            JOIN user_roles ur ON ur.role_id = r.id
            WHERE ur.user_id = $1
            ORDER BY r.name
            "#,
        )
        .bind(user.id)
        .fetch_all(&self.pool)
        .await?;
        Ok(roles)
    }

    async fn create_identity(&self, username: &str, password_hash: &str) -> Result<UserRecord, DatabaseError> {
        sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DatabaseError::from_insert(e, format!("username '{}' is taken", username)))
    }

    async fn role_exists(&self, role: &str) -> Result<bool, DatabaseError> {
        let exists = sqlx::query_scalar::<_, bool>("SELECT EXISTS (SELECT 1 FROM roles WHERE name = $1)")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;
        Ok(exists)
    }

    async fn create_role(&self, role: &str) -> Result<(), DatabaseError> {
        // Concurrent registrations may race to create the same role
        sqlx::query("INSERT INTO roles (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(role)
            .execute(&self.pool)
            .await?;
        Ok(())
    }

    async fn add_role_to_identity(&self, user: &UserRecord, role: &str) -> Result<(), DatabaseError> {
        let role_id = sqlx::query_scalar::<_, i64>("SELECT id FROM roles WHERE name = $1")
            .bind(role)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| DatabaseError::Conflict(format!("role '{}' does not exist", role)))?;

        sqlx::query(
            "INSERT INTO user_roles (user_id, role_id) VALUES ($1, $2) ON CONFLICT DO NOTHING",
        )
        .bind(user.id)
        .bind(role_id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn register_identity(
        &self,
        username: &str,
        password_hash: &str,
        role: &str,
    ) -> Result<UserRecord, DatabaseError> {
        // Dropping the transaction before commit rolls every step back
        let mut tx = self.pool.begin().await?;

        let user = sqlx::query_as::<_, UserRecord>(
            r#"
            INSERT INTO users (username, password_hash)
            VALUES ($1, $2)
            RETURNING id, username, password_hash, created_at
            "#,
        )
        .bind(username)
        .bind(password_hash)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| DatabaseError::from_insert(e, format!("username '{}' is taken", username)))?;

        sqlx::query("INSERT INTO roles (name) VALUES ($1) ON CONFLICT (name) DO NOTHING")
            .bind(role)
            .execute(&mut *tx)
            .await?;

        sqlx::query(
            r#"
            INSERT INTO user_roles (user_id, role_id)
            SELECT $1, id FROM roles WHERE name = $2
            ON CONFLICT DO NOTHING
            "#,
        )
        .bind(user.id)
        .bind(role)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(user)
    }
}

pub struct PgFlightStore {
    pool: PgPool,
}

impl PgFlightStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl FlightRepository for PgFlightStore {
    async fn list(&self, filter: &FlightFilter) -> Result<Vec<Flight>, DatabaseError> {
        let rows = sqlx::query_as::<_, FlightRow>(
            r#"
            SELECT id, origin, destination, departure, arrival, status
            FROM flights
            WHERE ($1::text IS NULL OR origin = $1)
              AND ($2::text IS NULL OR destination = $2)
            ORDER BY id
            "#,
        )
        .bind(filter.origin.as_deref())
        .bind(filter.destination.as_deref())
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter().map(Flight::try_from).collect()
    }

    async fn insert(&self, flight: NewFlight) -> Result<i64, DatabaseError> {
        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO flights (origin, destination, departure, arrival, status)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id
            "#,
        )
        .bind(&flight.origin)
        .bind(&flight.destination)
        .bind(flight.departure)
        .bind(flight.arrival)
        .bind(flight.status.as_str())
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    async fn update_status(&self, id: i64, status: FlightStatus) -> Result<bool, DatabaseError> {
        let result = sqlx::query("UPDATE flights SET status = $2 WHERE id = $1")
            .bind(id)
            .bind(status.as_str())
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
