pub mod auth_service;
pub mod flight_service;

pub use auth_service::{AuthService, RegistrationError};
pub use flight_service::FlightService;
