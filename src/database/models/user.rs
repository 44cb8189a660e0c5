use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// A row of the `users` table. Roles live in `user_roles`.
#[derive(Debug, Clone, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}
