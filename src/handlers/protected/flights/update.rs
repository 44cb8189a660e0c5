// PUT /flights (Moderator)

use axum::{extract::State, http::StatusCode};
use serde::Deserialize;
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::database::FlightStatus;
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::middleware::AuthUser;
use crate::state::AppState;

// The id check runs at struct level so its error is keyed by the wire name.
#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "positive_flight_id"))]
pub struct UpdateFlightRequest {
    #[serde(rename = "flightId")]
    #[schema(minimum = 1, example = 42)]
    pub flight_id: i64,
    pub status: FlightStatus,
}

fn positive_flight_id(req: &UpdateFlightRequest) -> Result<(), ValidationError> {
    if req.flight_id > 0 {
        return Ok(());
    }
    let mut err =
        ValidationError::new("positive_flight_id").with_message("flightId must be a positive integer".into());
    err.add_param("field".into(), &"flightId");
    Err(err)
}

/// 204 on success, 404 when no flight has this id.
#[utoipa::path(
    put,
    path = "/flights",
    request_body = UpdateFlightRequest,
    responses(
        (status = 204, description = "Status updated"),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Moderator role required"),
        (status = 404, description = "Flight not found")
    ),
    security(("bearerAuth" = [])),
    tag = "flights"
)]
pub async fn flights_put(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(body): ValidJson<UpdateFlightRequest>,
) -> Result<StatusCode, ApiError> {
    let updated = state
        .flights
        .update_status(body.flight_id, body.status, &user.username)
        .await?;

    if updated {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found(format!("Flight {} not found", body.flight_id)))
    }
}
