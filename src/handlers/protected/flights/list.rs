// GET /flights?origin=&destination=

use axum::{extract::State, Json};
use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::database::{Flight, FlightFilter};
use crate::error::ApiError;
use crate::extract::ValidQuery;
use crate::state::AppState;

#[derive(Debug, Default, Deserialize, Validate, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FlightQuery {
    #[validate(length(max = 100))]
    pub origin: Option<String>,
    #[validate(length(max = 100))]
    pub destination: Option<String>,
}

impl FlightQuery {
    /// Blank parameters count as absent. `None` when nothing is left to filter on.
    pub fn into_filter(self) -> Option<FlightFilter> {
        let non_blank = |value: Option<String>| value.filter(|v| !v.trim().is_empty());
        let filter = FlightFilter {
            origin: non_blank(self.origin),
            destination: non_blank(self.destination),
        };
        (filter.origin.is_some() || filter.destination.is_some()).then_some(filter)
    }
}

/// Flights matching origin and/or destination exactly, ordered by id.
#[utoipa::path(
    get,
    path = "/flights",
    params(FlightQuery),
    responses(
        (status = 200, description = "Matching flights", body = [Flight]),
        (status = 400, description = "No filter given"),
        (status = 401, description = "Missing or invalid token")
    ),
    security(("bearerAuth" = [])),
    tag = "flights"
)]
pub async fn flights_get(
    State(state): State<AppState>,
    ValidQuery(query): ValidQuery<FlightQuery>,
) -> Result<Json<Vec<Flight>>, ApiError> {
    let filter = query
        .into_filter()
        .ok_or_else(|| ApiError::bad_request("At least one of 'origin' or 'destination' is required"))?;

    let flights = state.flights.search(&filter).await?;
    Ok(Json(flights))
}
