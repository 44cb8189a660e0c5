// POST /flights (Moderator)

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

use crate::database::{FlightStatus, NewFlight};
use crate::error::ApiError;
use crate::extract::ValidJson;
use crate::middleware::AuthUser;
use crate::state::AppState;

#[derive(Debug, Deserialize, Validate, ToSchema)]
#[validate(schema(function = "arrival_after_departure"))]
pub struct CreateFlightRequest {
    #[validate(length(min = 1, max = 100, message = "Origin must be between 1 and 100 characters"))]
    pub origin: String,
    #[validate(length(min = 1, max = 100, message = "Destination must be between 1 and 100 characters"))]
    pub destination: String,
    #[validate(custom(function = "in_the_future"))]
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub status: FlightStatus,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CreateFlightResponse {
    pub id: i64,
}

impl From<CreateFlightRequest> for NewFlight {
    fn from(req: CreateFlightRequest) -> Self {
        NewFlight {
            origin: req.origin,
            destination: req.destination,
            departure: req.departure,
            arrival: req.arrival,
            status: req.status,
        }
    }
}

fn in_the_future(departure: &DateTime<Utc>) -> Result<(), ValidationError> {
    if *departure > Utc::now() {
        Ok(())
    } else {
        Err(ValidationError::new("in_the_future").with_message("Departure must be in the future".into()))
    }
}

fn arrival_after_departure(req: &CreateFlightRequest) -> Result<(), ValidationError> {
    if req.arrival > req.departure {
        return Ok(());
    }
    let mut err =
        ValidationError::new("arrival_after_departure").with_message("Arrival must be after departure".into());
    err.add_param("field".into(), &"arrival");
    Err(err)
}

#[utoipa::path(
    post,
    path = "/flights",
    request_body = CreateFlightRequest,
    responses(
        (status = 200, description = "Flight created", body = CreateFlightResponse),
        (status = 400, description = "Validation failed"),
        (status = 401, description = "Missing or invalid token"),
        (status = 403, description = "Moderator role required")
    ),
    security(("bearerAuth" = [])),
    tag = "flights"
)]
pub async fn flights_post(
    State(state): State<AppState>,
    user: AuthUser,
    ValidJson(body): ValidJson<CreateFlightRequest>,
) -> Result<Json<CreateFlightResponse>, ApiError> {
    let id = state.flights.create(body.into(), &user.username).await?;
    Ok(Json(CreateFlightResponse { id }))
}
