pub mod manager;
pub mod memory;
pub mod models;
pub mod postgres;
pub mod storage;
pub mod store;

pub use manager::{DatabaseError, DatabaseManager};
pub use models::{Flight, FlightFilter, FlightStatus, NewFlight, UserRecord};
pub use storage::Storage;
pub use store::{CredentialStore, FlightRepository};
