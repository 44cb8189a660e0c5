pub mod flight;
pub mod user;

pub use flight::{Flight, FlightFilter, FlightRow, FlightStatus, NewFlight};
pub use user::UserRecord;
