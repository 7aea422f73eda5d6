//! Derived dispatch logic for a fleet-management back office.
//!
//! The storage and presentation layers live elsewhere; this crate takes
//! the trip, vehicle and billing records they exchange and computes the
//! state the screens show: board columns, double-booked drivers, overdue
//! tags, document totals, service alerts and dashboard counters. Every
//! computation is a pure pass over the input slice, safe to rerun on each
//! change notification.
//!
//! ```
//! use chrono::NaiveDate;
//! use fleet::{classify_trips, ConflictDetector, Trip, TripStatus};
//!
//! let mut first = Trip::new("T1", TripStatus::Scheduled);
//! first.date = NaiveDate::from_ymd_opt(2024, 1, 10);
//! first.time_minutes = Some(9 * 60);
//! first.driver_id = Some("D1".into());
//!
//! let mut second = first.clone();
//! second.id = "T2".into();
//! second.time_minutes = Some(9 * 60 + 30);
//!
//! let trips = vec![first, second];
//! let board = classify_trips(&trips, NaiveDate::from_ymd_opt(2024, 1, 10).unwrap());
//! assert_eq!(board.upcoming.len(), 2);
//!
//! let report = ConflictDetector::default().detect(&trips);
//! assert_eq!(report.conflicted_count(), 2);
//! ```

pub mod config;
pub mod error;
pub mod models;
pub mod services;
pub mod time;

pub use config::FleetConfig;
pub use error::FleetError;
pub use models::invoice::{Invoice, InvoiceStatus, LineItem, Quotation, QuotationStatus};
pub use models::part::SparePart;
pub use models::trip::{
    normalize_trips, trips_from_json, trips_from_values, DriverId, RawTrip, Trip, TripId,
    TripStatus, VehicleId,
};
pub use models::vehicle::{FuelEntry, Vehicle, VehicleStatus};
pub use services::alerts::{AlertEvaluator, TripAlert};
pub use services::billing::{
    compute_totals, expired_quotations, invoice_totals, quotation_totals, DocumentTotals,
};
pub use services::board::{classify_trips, DispatchBoard};
pub use services::conflict::{ConflictDetector, ConflictReport};
pub use services::maintenance::{
    fuel_consumption, service_status, vehicles_needing_service, ServiceAlert, ServiceStatus,
};
pub use services::stats::{
    fleet_snapshot, low_stock_parts, revenue_summary, FleetSnapshot, RevenueSummary,
};
