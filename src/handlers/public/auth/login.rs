// POST /auth/login

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::auth::AuthError;
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    /// Seconds until the token expires
    pub expires_in: i64,
}

/// Exchange username and password for a bearer token.
///
/// Unknown usernames and wrong passwords get the same 401.
#[utoipa::path(
    post,
    path = "/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Token issued", body = LoginResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login_post(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    match state.auth.login(&body.username, &body.password).await {
        Ok((identity, issued)) => {
            tracing::info!(
                username = %identity.username,
                token_id = %issued.claims.jti,
                roles = ?identity.roles,
                "Login succeeded"
            );
            Ok(Json(LoginResponse {
                expires_in: issued.expires_in(),
                token: issued.token,
            }))
        }
        Err(AuthError::InvalidCredentials) => {
            tracing::warn!(username = %body.username, "Login failed");
            Err(AuthError::InvalidCredentials.into())
        }
        Err(err) => Err(err.into()),
    }
}
