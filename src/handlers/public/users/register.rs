// POST /users/register

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::services::auth_service::RegistrationError;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct RegisterRequest {
    #[validate(
        length(min = 1, max = 64, message = "Username must be between 1 and 64 characters"),
        custom(function = "username_charset")
    )]
    pub username: String,
    #[validate(length(min = 6, message = "Password must be at least 6 characters"))]
    pub password: String,
    #[validate(length(min = 1, max = 64, message = "Role must be between 1 and 64 characters"))]
    pub role: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub message: String,
}

fn username_charset(username: &str) -> Result<(), ValidationError> {
    let allowed = |c: char| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '@');
    if username.chars().all(allowed) {
        Ok(())
    } else {
        Err(ValidationError::new("username_charset")
            .with_message("Username may only contain letters, digits and . _ - @".into()))
    }
}

impl From<RegistrationError> for ApiError {
    fn from(err: RegistrationError) -> Self {
        match err {
            RegistrationError::UsernameTaken(_) => ApiError::field_error("username", err.to_string()),
            RegistrationError::RoleNotAllowed(_) => ApiError::field_error("role", err.to_string()),
            RegistrationError::Auth(auth) => auth.into(),
        }
    }
}

/// Create an identity with one role. The role is created on first use.
#[utoipa::path(
    post,
    path = "/users/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "User registered", body = RegisterResponse),
        (status = 400, description = "Validation failed, username taken or role not allowed")
    ),
    tag = "users"
)]
pub async fn register_post(
    State(state): State<AppState>,
    ValidJson(body): ValidJson<RegisterRequest>,
) -> Result<Json<RegisterResponse>, ApiError> {
    state
        .auth
        .register(&body.username, &body.password, &body.role)
        .await
        .map_err(|err| {
            if !matches!(err, RegistrationError::Auth(_)) {
                tracing::warn!(username = %body.username, role = %body.role, reason = %err, "Registration refused");
            }
            ApiError::from(err)
        })?;

    tracing::info!(username = %body.username, role = %body.role, "User registered");

    Ok(Json(RegisterResponse {
        message: format!("User '{}' registered with role '{}'", body.username, body.role),
    }))
}
