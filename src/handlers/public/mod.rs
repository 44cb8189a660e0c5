// Public handlers: token acquisition and registration. No Authorization header is read.
pub mod auth;
pub mod users;
