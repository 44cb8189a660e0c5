use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

use crate::database::DatabaseError;

/// Operational status of a flight, stored as TEXT.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
pub enum FlightStatus {
    InTime,
    Delayed,
    Cancelled,
}

impl FlightStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlightStatus::InTime => "InTime",
            FlightStatus::Delayed => "Delayed",
            FlightStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for FlightStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for FlightStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "InTime" => Ok(FlightStatus::InTime),
            "Delayed" => Ok(FlightStatus::Delayed),
            "Cancelled" => Ok(FlightStatus::Cancelled),
            other => Err(format!("unknown flight status '{}'", other)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Flight {
    pub id: i64,
    pub origin: String,
    pub destination: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub status: FlightStatus,
}

/// A flight that has not been assigned an id yet.
#[derive(Debug, Clone, PartialEq)]
pub struct NewFlight {
    pub origin: String,
    pub destination: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub status: FlightStatus,
}

impl NewFlight {
    pub fn with_id(self, id: i64) -> Flight {
        Flight {
            id,
            origin: self.origin,
            destination: self.destination,
            departure: self.departure,
            arrival: self.arrival,
            status: self.status,
        }
    }
}

/// Exact-match filter; `None` fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FlightFilter {
    pub origin: Option<String>,
    pub destination: Option<String>,
}

impl FlightFilter {
    pub fn matches(&self, flight: &Flight) -> bool {
        self.origin.as_deref().map_or(true, |o| flight.origin == o)
            && self.destination.as_deref().map_or(true, |d| flight.destination == d)
    }
}

#[derive(Debug, Clone, FromRow)]
pub struct FlightRow {
    pub id: i64,
    pub origin: String,
    pub destination: String,
    pub departure: DateTime<Utc>,
    pub arrival: DateTime<Utc>,
    pub status: String,
}

impl TryFrom<FlightRow> for Flight {
    type Error = DatabaseError;

    fn try_from(row: FlightRow) -> Result<Self, Self::Error> {
        let status = row.status.parse().map_err(DatabaseError::CorruptRow)?;
        Ok(Flight {
            id: row.id,
            origin: row.origin,
            destination: row.destination,
            departure: row.departure,
            arrival: row.arrival,
            status,
        })
    }
}
