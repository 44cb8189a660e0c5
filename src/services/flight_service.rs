use std::sync::Arc;

use crate::database::{DatabaseError, Flight, FlightFilter, FlightRepository, FlightStatus, NewFlight};

/// Flight catalogue operations; a thin layer over the repository that owns the audit logging.
pub struct FlightService {
    flights: Arc<dyn FlightRepository>,
}

impl FlightService {
    pub fn new(flights: Arc<dyn FlightRepository>) -> Self {
        Self { flights }
    }

    pub async fn search(&self, filter: &FlightFilter) -> Result<Vec<Flight>, DatabaseError> {
        self.flights.list(filter).await
    }

    pub async fn create(&self, flight: NewFlight, created_by: &str) -> Result<i64, DatabaseError> {
        let origin = flight.origin.clone();
        let destination = flight.destination.clone();

        let id = self.flights.insert(flight).await?;
        tracing::info!(
            flight_id = id,
            origin = %origin,
            destination = %destination,
            user = %created_by,
            "Flight created"
        );
        Ok(id)
    }

    /// `false` when the flight does not exist.
    pub async fn update_status(&self, id: i64, status: FlightStatus, updated_by: &str) -> Result<bool, DatabaseError> {
        let updated = self.flights.update_status(id, status).await?;
        if updated {
            tracing::info!(flight_id = id, status = %status, user = %updated_by, "Flight status updated");
        } else {
            tracing::warn!(flight_id = id, user = %updated_by, "Status update for unknown flight");
        }
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::database::memory::MemoryFlightStore;
    use chrono::{Duration, Utc};

    fn new_flight(origin: &str, destination: &str) -> NewFlight {
        let departure = Utc::now() + Duration::days(1);
        NewFlight {
            origin: origin.to_string(),
            destination: destination.to_string(),
            departure,
            arrival: departure + Duration::hours(3),
            status: FlightStatus::InTime,
        }
    }

    #[tokio::test]
    async fn create_search_and_update() {
        let service = FlightService::new(Arc::new(MemoryFlightStore::new()));
        let id = service.create(new_flight("Kyiv", "Lviv"), "alice").await.unwrap();
        service.create(new_flight("Lviv", "Odesa"), "alice").await.unwrap();

        let filter = FlightFilter {
            origin: Some("Kyiv".to_string()),
            destination: None,
        };
        let found = service.search(&filter).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, id);

        assert!(service.update_status(id, FlightStatus::Delayed, "alice").await.unwrap());
        assert!(!service.update_status(999, FlightStatus::Delayed, "alice").await.unwrap());

        let found = service.search(&filter).await.unwrap();
        assert_eq!(found[0].status, FlightStatus::Delayed);
    }
}
