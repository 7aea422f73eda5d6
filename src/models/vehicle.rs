use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};

use super::trip::VehicleId;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum VehicleStatus {
    #[default]
    #[serde(rename = "active")]
    Active,
    #[serde(rename = "in_maintenance")]
    InMaintenance,
    #[serde(rename = "retired")]
    Retired,
}

impl VehicleStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            VehicleStatus::Active => "active",
            VehicleStatus::InMaintenance => "in_maintenance",
            VehicleStatus::Retired => "retired",
        }
    }
}

/// Vehicle master data, reduced to the fields the maintenance and fuel
/// services read. Numeric columns arrive as whatever the storage layer
/// kept, so every one of them degrades to absent instead of failing.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vehicle {
    pub id: VehicleId,
    #[serde(default)]
    pub plate: Option<String>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub status: VehicleStatus,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub odometer_km: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub next_service_date: Option<NaiveDate>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub next_service_km: Option<f64>,
}

impl Vehicle {
    pub fn new(id: impl Into<VehicleId>) -> Self {
        Self {
            id: id.into(),
            plate: None,
            status: VehicleStatus::Active,
            odometer_km: None,
            next_service_date: None,
            next_service_km: None,
        }
    }
}

/// One fuel log line. Entries missing liters or an odometer reading are
/// useless for consumption math and get skipped there.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct FuelEntry {
    #[serde(default)]
    pub vehicle_id: Option<VehicleId>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub liters: Option<f64>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub odometer_km: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_numeric_columns_degrade_to_absent() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "id": "V1",
            "plate": "B-FL 1234",
            "status": "active",
            "odometer_km": "not-a-number",
            "next_service_date": "someday",
        }))
        .unwrap();

        assert_eq!(vehicle.odometer_km, None);
        assert_eq!(vehicle.next_service_date, None);
        assert_eq!(vehicle.plate.as_deref(), Some("B-FL 1234"));
    }

    #[test]
    fn unknown_status_reads_as_active() {
        let vehicle: Vehicle = serde_json::from_value(json!({
            "id": "V1",
            "status": "on-fire",
        }))
        .unwrap();

        assert_eq!(vehicle.status, VehicleStatus::Active);
    }

    #[test]
    fn fuel_entry_tolerates_partial_rows() {
        let entry: FuelEntry = serde_json::from_value(json!({
            "vehicle_id": "V1",
            "liters": 43.5,
        }))
        .unwrap();

        assert_eq!(entry.liters, Some(43.5));
        assert_eq!(entry.odometer_km, None);
    }
}
