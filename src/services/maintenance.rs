use std::cmp::Ordering;

use chrono::{Duration, NaiveDate};
use serde::Serialize;
use tracing::debug;

use crate::config::FleetConfig;
use crate::models::trip::VehicleId;
use crate::models::vehicle::{FuelEntry, Vehicle};

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum ServiceStatus {
    #[serde(rename = "ok")]
    Ok,
    #[serde(rename = "due_soon")]
    DueSoon,
    #[serde(rename = "overdue")]
    Overdue,
}

/// Where a vehicle stands against its next service, by date or by
/// odometer, whichever is stricter. A vehicle with neither a service date
/// nor a service odometer on file is simply ok.
pub fn service_status(
    vehicle: &Vehicle,
    today: NaiveDate,
    soon_days: i64,
    soon_km: f64,
) -> ServiceStatus {
    let date_overdue = vehicle.next_service_date.is_some_and(|due| due < today);
    let km_overdue = match (vehicle.odometer_km, vehicle.next_service_km) {
        (Some(odometer), Some(due)) => odometer >= due,
        _ => false,
    };
    if date_overdue || km_overdue {
        return ServiceStatus::Overdue;
    }

    let date_soon = vehicle
        .next_service_date
        .is_some_and(|due| due <= today + Duration::days(soon_days));
    let km_soon = match (vehicle.odometer_km, vehicle.next_service_km) {
        (Some(odometer), Some(due)) => odometer >= due - soon_km,
        _ => false,
    };
    if date_soon || km_soon {
        return ServiceStatus::DueSoon;
    }
    ServiceStatus::Ok
}

/// A vehicle flagged for the maintenance panel, with the plate carried
/// along for display.
#[derive(Debug, Clone, Serialize)]
pub struct ServiceAlert {
    pub vehicle_id: VehicleId,
    pub plate: Option<String>,
    pub status: ServiceStatus,
}

/// Lists every vehicle that is due soon or overdue, using the margins from
/// the config. Overdue vehicles come first, then due-soon, each group in
/// input order.
pub fn vehicles_needing_service(
    vehicles: &[Vehicle],
    today: NaiveDate,
    config: &FleetConfig,
) -> Vec<ServiceAlert> {
    let mut alerts: Vec<ServiceAlert> = vehicles
        .iter()
        .filter_map(|vehicle| {
            let status = service_status(
                vehicle,
                today,
                config.service_soon_days,
                config.service_soon_km,
            );
            match status {
                ServiceStatus::Ok => None,
                ServiceStatus::DueSoon | ServiceStatus::Overdue => Some(ServiceAlert {
                    vehicle_id: vehicle.id.clone(),
                    plate: vehicle.plate.clone(),
                    status,
                }),
            }
        })
        .collect();
    alerts.sort_by_key(|alert| match alert.status {
        ServiceStatus::Overdue => 0,
        ServiceStatus::DueSoon => 1,
        ServiceStatus::Ok => 2,
    });
    alerts
}

/// Average consumption in liters per 100 km over a vehicle's fuel log,
/// full-tank method: entries are ordered by odometer, the first fill marks
/// the baseline and only the later fills count as consumed fuel.
///
/// Returns `None` when fewer than two usable entries exist or the odometer
/// never moved forward.
pub fn fuel_consumption(vehicle_id: &VehicleId, entries: &[FuelEntry]) -> Option<f64> {
    let mut usable: Vec<&FuelEntry> = entries
        .iter()
        .filter(|entry| entry.vehicle_id.as_ref() == Some(vehicle_id))
        .filter(|entry| {
            let complete = entry.liters.is_some() && entry.odometer_km.is_some();
            if !complete {
                debug!(
                    vehicle = %vehicle_id,
                    date = ?entry.date,
                    "fuel entry without liters or odometer skipped"
                );
            }
            complete
        })
        .collect();

    if usable.len() < 2 {
        return None;
    }
    usable.sort_by(|a, b| {
        a.odometer_km
            .partial_cmp(&b.odometer_km)
            .unwrap_or(Ordering::Equal)
    });

    let first = usable.first()?.odometer_km?;
    let last = usable.last()?.odometer_km?;
    let distance = last - first;
    if distance <= 0.0 {
        return None;
    }

    let liters: f64 = usable.iter().skip(1).filter_map(|entry| entry.liters).sum();
    Some(liters / distance * 100.0)
}
