// GET /auth/whoami

use axum::Json;

use crate::middleware::AuthUser;

/// The identity carried by the presented token.
#[utoipa::path(
    get,
    path = "/auth/whoami",
    responses(
        (status = 200, description = "Caller identity", body = AuthUser),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearerAuth" = [])),
    tag = "auth"
)]
pub async fn whoami_get(user: AuthUser) -> Json<AuthUser> {
    Json(user)
}
