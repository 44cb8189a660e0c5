use std::sync::Arc;

use crate::auth::{TokenIssuer, TokenValidator};
use crate::config::AppConfig;
use crate::database::Storage;
use crate::services::{AuthService, FlightService};

/// Shared, read-only application state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<AppConfig>,
    pub auth: Arc<AuthService>,
    pub flights: Arc<FlightService>,
    pub tokens: Arc<TokenValidator>,
    pub storage: Storage,
}

impl AppState {
    pub fn new(config: AppConfig, storage: Storage) -> Self {
        let auth = AuthService::new(
            Arc::clone(&storage.credentials),
            TokenIssuer::new(&config.jwt),
            config.security.registration_roles.clone(),
        );

        Self {
            tokens: Arc::new(TokenValidator::new(&config.jwt)),
            auth: Arc::new(auth),
            flights: Arc::new(FlightService::new(Arc::clone(&storage.flights))),
            config: Arc::new(config),
            storage,
        }
    }
}
