pub mod app;
pub mod auth;
pub mod cli;
pub mod config;
pub mod database;
pub mod docs;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod logging;
pub mod middleware;
pub mod services;
pub mod state;

pub use app::app;
pub use error::ApiError;
pub use state::AppState;
