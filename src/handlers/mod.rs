// Handlers are grouped by how they are guarded:
// public (no token) and protected (bearer token, plus a role where required).
pub mod public;
pub mod protected;
