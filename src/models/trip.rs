use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::error::FleetError;
use crate::time::{minutes_from_hhmm, parse_trip_date};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct TripId(String);

impl TripId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TripId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TripId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for TripId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct DriverId(String);

impl DriverId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DriverId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for DriverId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for DriverId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[serde(transparent)]
pub struct VehicleId(String);

impl VehicleId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VehicleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for VehicleId {
    fn from(raw: &str) -> Self {
        Self(raw.to_string())
    }
}

impl From<String> for VehicleId {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum TripStatus {
    #[serde(rename = "scheduled")]
    Scheduled,
    #[serde(rename = "in_progress")]
    InProgress,
    #[serde(rename = "completed")]
    Completed,
    #[serde(rename = "cancelled")]
    Cancelled,
}

impl TripStatus {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "scheduled" => Some(TripStatus::Scheduled),
            "in_progress" => Some(TripStatus::InProgress),
            "completed" => Some(TripStatus::Completed),
            "cancelled" => Some(TripStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TripStatus::Scheduled => "scheduled",
            TripStatus::InProgress => "in_progress",
            TripStatus::Completed => "completed",
            TripStatus::Cancelled => "cancelled",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, TripStatus::Completed | TripStatus::Cancelled)
    }

    /// Legal lifecycle moves. The mutation layer asks before writing a new
    /// status; everything in this crate only ever reads the current one.
    pub fn can_transition_to(&self, next: TripStatus) -> bool {
        matches!(
            (self, next),
            (TripStatus::Scheduled, TripStatus::InProgress)
                | (TripStatus::Scheduled, TripStatus::Cancelled)
                | (TripStatus::InProgress, TripStatus::Completed)
                | (TripStatus::InProgress, TripStatus::Cancelled)
        )
    }
}

impl fmt::Display for TripStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A trip row exactly as the storage layer hands it over. Every field is
/// optional and stringly typed because historical rows carry numeric ids,
/// empty strings, and free-form dates; [`normalize_trips`] is the only
/// consumer.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawTrip {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub time: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub driver_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub vehicle_id: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub pickup_location: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub dropoff_location: Option<String>,
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.and_then(|value| match value {
        Value::Null => None,
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        Value::Array(_) | Value::Object(_) => None,
    }))
}

/// A cleaned trip record. Dates and times are parsed exactly once here so
/// the board, conflict and alert services never touch raw strings.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct Trip {
    pub id: TripId,
    /// `None` when the row had no date or an unreadable one; such trips
    /// stay off the board buckets and out of the conflict scan.
    pub date: Option<NaiveDate>,
    /// Minutes since midnight. `None` only when the row carried no time at
    /// all; an unreadable time is kept as `Some(0)`, so midnight and
    /// garbage are indistinguishable downstream.
    pub time_minutes: Option<i64>,
    pub status: TripStatus,
    pub driver_id: Option<DriverId>,
    pub vehicle_id: Option<VehicleId>,
    pub pickup_location: Option<String>,
    pub dropoff_location: Option<String>,
}

impl Trip {
    pub fn new(id: impl Into<TripId>, status: TripStatus) -> Self {
        Self {
            id: id.into(),
            date: None,
            time_minutes: None,
            status,
            driver_id: None,
            vehicle_id: None,
            pickup_location: None,
            dropoff_location: None,
        }
    }

    /// The conflict scan compares every trip on a common minute scale, so
    /// a missing time reads as midnight there.
    pub fn time_minutes_or_midnight(&self) -> i64 {
        self.time_minutes.unwrap_or(0)
    }

    pub fn is_assigned(&self) -> bool {
        self.driver_id.is_some() && self.vehicle_id.is_some()
    }
}

/// Runs the single validation pass over a raw batch. Rows without a usable
/// id or status are dropped; unreadable dates and times degrade per field.
/// This function never fails, whatever the rows look like.
pub fn normalize_trips(raw: Vec<RawTrip>) -> Vec<Trip> {
    let total = raw.len();
    let mut trips = Vec::with_capacity(total);
    let mut dropped = 0usize;
    for record in raw {
        match normalize_trip(record) {
            Some(trip) => trips.push(trip),
            None => dropped += 1,
        }
    }
    if dropped > 0 {
        info!(total, kept = trips.len(), dropped, "normalized trip batch");
    }
    trips
}

fn normalize_trip(raw: RawTrip) -> Option<Trip> {
    let Some(id) = non_blank(raw.id.as_deref()) else {
        warn!("dropping trip record without an id");
        return None;
    };
    let id = TripId::from(id);

    let status = match non_blank(raw.status.as_deref()).and_then(TripStatus::parse) {
        Some(status) => status,
        None => {
            warn!(trip = %id, status = ?raw.status, "dropping trip with unrecognized status");
            return None;
        }
    };

    let date = match non_blank(raw.date.as_deref()) {
        None => None,
        Some(raw_date) => {
            let parsed = parse_trip_date(raw_date);
            if parsed.is_none() {
                debug!(trip = %id, date = raw_date, "unreadable trip date dropped");
            }
            parsed
        }
    };

    let time_minutes = match non_blank(raw.time.as_deref()) {
        None => None,
        Some(raw_time) => match minutes_from_hhmm(raw_time) {
            Some(minutes) => Some(minutes),
            None => {
                debug!(trip = %id, time = raw_time, "unreadable trip time read as midnight");
                Some(0)
            }
        },
    };

    Some(Trip {
        id,
        date,
        time_minutes,
        status,
        driver_id: non_blank(raw.driver_id.as_deref()).map(DriverId::from),
        vehicle_id: non_blank(raw.vehicle_id.as_deref()).map(VehicleId::from),
        pickup_location: non_blank(raw.pickup_location.as_deref()).map(str::to_string),
        dropoff_location: non_blank(raw.dropoff_location.as_deref()).map(str::to_string),
    })
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

/// Reads a JSON array of trip rows and normalizes it. Only a payload that
/// is not a JSON array at all is an error; individual bad rows are logged
/// and skipped.
pub fn trips_from_json(payload: &[u8]) -> Result<Vec<Trip>, FleetError> {
    let rows: Vec<Value> = serde_json::from_slice(payload)?;
    Ok(trips_from_values(rows))
}

/// Same as [`trips_from_json`] for callers that already hold parsed JSON,
/// e.g. a realtime change feed delivering row payloads.
pub fn trips_from_values(rows: Vec<Value>) -> Vec<Trip> {
    let mut raw = Vec::with_capacity(rows.len());
    let mut rejected = 0usize;
    for row in rows {
        match serde_json::from_value::<RawTrip>(row) {
            Ok(record) => raw.push(record),
            Err(err) => {
                rejected += 1;
                warn!(error = %err, "rejecting trip row that is not an object");
            }
        }
    }
    if rejected > 0 {
        info!(rejected, "discarded malformed trip rows");
    }
    normalize_trips(raw)
}
