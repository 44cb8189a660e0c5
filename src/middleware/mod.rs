pub mod auth;
pub mod panic;

pub use auth::{access_gate, AccessGate, AuthUser};
pub use panic::handle_panic;
