use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use tracing::debug;

use crate::config::{FleetConfig, DEFAULT_CONFLICT_WINDOW_MIN};
use crate::models::trip::{DriverId, Trip, TripId};

/// Scans a day's trips for double-booked drivers.
///
/// The window is a dispatch heuristic, not a travel-time model: two trips
/// for one driver on the same date whose start times are less than the
/// window apart are flagged, whatever their statuses say.
#[derive(Debug, Clone)]
pub struct ConflictDetector {
    window_minutes: i64,
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new(DEFAULT_CONFLICT_WINDOW_MIN)
    }
}

impl ConflictDetector {
    pub fn new(window_minutes: i64) -> Self {
        Self { window_minutes }
    }

    pub fn from_config(config: &FleetConfig) -> Self {
        Self::new(config.conflict_window_minutes)
    }

    pub fn window_minutes(&self) -> i64 {
        self.window_minutes
    }

    /// Builds a fresh report over the given trips. Trips without a date
    /// cannot conflict and are skipped; trips without a driver are skipped
    /// pair-wise. Start times are compared on the minute scale, with
    /// missing times reading as midnight.
    pub fn detect(&self, trips: &[Trip]) -> ConflictReport {
        let mut by_date: BTreeMap<NaiveDate, Vec<&Trip>> = BTreeMap::new();
        let mut undated = 0usize;
        for trip in trips {
            match trip.date {
                Some(date) => by_date.entry(date).or_default().push(trip),
                None => undated += 1,
            }
        }
        if undated > 0 {
            debug!(undated, "trips without a date excluded from the conflict scan");
        }

        let mut report = ConflictReport::default();
        for group in by_date.values() {
            for (index, first) in group.iter().enumerate() {
                let Some(driver) = &first.driver_id else {
                    continue;
                };
                for second in &group[index + 1..] {
                    if second.driver_id.as_ref() != Some(driver) {
                        continue;
                    }
                    let gap =
                        (first.time_minutes_or_midnight() - second.time_minutes_or_midnight()).abs();
                    if gap < self.window_minutes {
                        report.record(driver, first, second);
                    }
                }
            }
        }
        report
    }
}

/// Result of one conflict scan: the flat id set drives per-row badges, the
/// per-driver grouping drives the warning banner.
#[derive(Debug, Clone, Default)]
pub struct ConflictReport {
    pub conflicted_trip_ids: HashSet<TripId>,
    pub by_driver: HashMap<DriverId, Vec<Trip>>,
}

impl ConflictReport {
    fn record(&mut self, driver: &DriverId, first: &Trip, second: &Trip) {
        self.conflicted_trip_ids.insert(first.id.clone());
        self.conflicted_trip_ids.insert(second.id.clone());
        let group = self.by_driver.entry(driver.clone()).or_default();
        for trip in [first, second] {
            if !group.iter().any(|known| known.id == trip.id) {
                group.push(trip.clone());
            }
        }
    }

    pub fn is_conflicted(&self, id: &TripId) -> bool {
        self.conflicted_trip_ids.contains(id)
    }

    pub fn is_empty(&self) -> bool {
        self.conflicted_trip_ids.is_empty()
    }

    pub fn conflicted_count(&self) -> usize {
        self.conflicted_trip_ids.len()
    }
}
