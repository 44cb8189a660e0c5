// Protected handlers. Every route here sits behind `middleware::access_gate`,
// so an `AuthUser` is always present in request extensions.
pub mod auth;
pub mod flights;
