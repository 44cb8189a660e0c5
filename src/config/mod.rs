use std::env;
use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::auth::roles;

/// Minimum HMAC-SHA-256 key length in bytes.
pub const MIN_JWT_KEY_BYTES: usize = 32;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: Environment,
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    pub security: SecurityConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub request_timeout_secs: u64,
    pub max_request_size_bytes: usize,
}

#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// `None` selects the in-memory store.
    pub url: Option<String>,
    pub max_connections: u32,
    pub connection_timeout: u64,
    pub run_migrations: bool,
}

/// Signing material for access tokens. `Debug` never prints the key.
#[derive(Clone)]
pub struct JwtConfig {
    pub key: String,
    pub issuer: Option<String>,
    pub audience: Option<String>,
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("key", &"<redacted>")
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SecurityConfig {
    pub enable_cors: bool,
    pub cors_origins: Vec<String>,
    pub registration_roles: RolePolicy,
}

/// Which role names `POST /users/register` may assign.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RolePolicy {
    Any,
    AllowList(Vec<String>),
}

impl RolePolicy {
    pub fn permits(&self, role: &str) -> bool {
        match self {
            RolePolicy::Any => true,
            RolePolicy::AllowList(roles) => roles.iter().any(|r| r == role),
        }
    }

    fn parse(value: &str) -> Self {
        if value.trim() == "*" {
            return RolePolicy::Any;
        }
        RolePolicy::AllowList(
            value
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
        )
    }
}

#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub log_dir: Option<PathBuf>,
    pub filter: String,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("JWT_KEY is required to sign and validate access tokens")]
    MissingJwtKey,

    #[error("JWT_KEY must be at least {min} bytes for HS256, got {actual}")]
    WeakJwtKey { min: usize, actual: usize },

    #[error("DATABASE_URL is required in production")]
    MissingDatabaseUrl,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let environment = match lookup("APP_ENV").as_deref() {
            Some("production") | Some("prod") => Environment::Production,
            Some("staging") | Some("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        let jwt = JwtConfig {
            key: lookup("JWT_KEY")
                .filter(|k| !k.is_empty())
                .ok_or(ConfigError::MissingJwtKey)?,
            issuer: lookup("JWT_ISSUER").filter(|v| !v.is_empty()),
            audience: lookup("JWT_AUDIENCE").filter(|v| !v.is_empty()),
        };
        if jwt.key.len() < MIN_JWT_KEY_BYTES {
            return Err(ConfigError::WeakJwtKey {
                min: MIN_JWT_KEY_BYTES,
                actual: jwt.key.len(),
            });
        }

        // Set defaults based on environment, then override with specific env vars
        let config = match environment {
            Environment::Production => Self::production(jwt),
            Environment::Staging => Self::staging(jwt),
            Environment::Development => Self::development(jwt),
        }
        .with_overrides(&lookup);

        if config.is_production() && config.database.url.is_none() {
            return Err(ConfigError::MissingDatabaseUrl);
        }

        Ok(config)
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    fn with_overrides<F>(mut self, lookup: &F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        // Server overrides
        if let Some(v) = lookup("HOST") {
            self.server.host = v;
        }
        if let Some(v) = lookup("PORT") {
            self.server.port = v.parse().unwrap_or(self.server.port);
        }
        if let Some(v) = lookup("REQUEST_TIMEOUT_SECS") {
            self.server.request_timeout_secs = v.parse().unwrap_or(self.server.request_timeout_secs);
        }
        if let Some(v) = lookup("MAX_REQUEST_SIZE_BYTES") {
            self.server.max_request_size_bytes = v.parse().unwrap_or(self.server.max_request_size_bytes);
        }

        // Database overrides
        if let Some(v) = lookup("DATABASE_URL").filter(|v| !v.is_empty()) {
            self.database.url = Some(v);
        }
        if let Some(v) = lookup("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Some(v) = lookup("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }
        if let Some(v) = lookup("DATABASE_RUN_MIGRATIONS") {
            self.database.run_migrations = v.parse().unwrap_or(self.database.run_migrations);
        }

        // Security overrides
        if let Some(v) = lookup("SECURITY_ENABLE_CORS") {
            self.security.enable_cors = v.parse().unwrap_or(self.security.enable_cors);
        }
        if let Some(v) = lookup("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v.split(',').map(|s| s.trim().to_string()).collect();
        }
        if let Some(v) = lookup("REGISTRATION_ROLES") {
            self.security.registration_roles = RolePolicy::parse(&v);
        }

        // Logging overrides
        if let Some(v) = lookup("LOG_DIR").filter(|v| !v.is_empty()) {
            self.logging.log_dir = Some(PathBuf::from(v));
        }
        if let Some(v) = lookup("RUST_LOG").filter(|v| !v.is_empty()) {
            self.logging.filter = v;
        }

        self
    }

    fn default_roles() -> RolePolicy {
        RolePolicy::AllowList(vec![roles::USER.to_string(), roles::MODERATOR.to_string()])
    }

    fn development(jwt: JwtConfig) -> Self {
        Self {
            environment: Environment::Development,
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 3000,
                request_timeout_secs: 30,
                max_request_size_bytes: 1024 * 1024, // 1MB
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 5,
                connection_timeout: 30,
                run_migrations: true,
            },
            jwt,
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec![],
                registration_roles: Self::default_roles(),
            },
            logging: LoggingConfig {
                log_dir: None,
                filter: "flights_api=debug,tower_http=debug,info".to_string(),
            },
        }
    }

    fn staging(jwt: JwtConfig) -> Self {
        Self {
            environment: Environment::Staging,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                request_timeout_secs: 15,
                max_request_size_bytes: 512 * 1024,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 10,
                connection_timeout: 10,
                run_migrations: true,
            },
            jwt,
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://staging.example.com".to_string()],
                registration_roles: Self::default_roles(),
            },
            logging: LoggingConfig {
                log_dir: Some(PathBuf::from("logs")),
                filter: "info".to_string(),
            },
        }
    }

    fn production(jwt: JwtConfig) -> Self {
        Self {
            environment: Environment::Production,
            server: ServerConfig {
                host: "0.0.0.0".to_string(),
                port: 8080,
                request_timeout_secs: 10,
                max_request_size_bytes: 256 * 1024,
            },
            database: DatabaseConfig {
                url: None,
                max_connections: 20,
                connection_timeout: 5,
                run_migrations: false,
            },
            jwt,
            security: SecurityConfig {
                enable_cors: true,
                cors_origins: vec!["https://app.example.com".to_string()],
                registration_roles: Self::default_roles(),
            },
            logging: LoggingConfig {
                log_dir: Some(PathBuf::from("logs")),
                filter: "info".to_string(),
            },
        }
    }
}
