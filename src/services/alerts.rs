use std::collections::HashMap;

use chrono::NaiveDateTime;
use serde::Serialize;

use crate::config::{FleetConfig, DEFAULT_APPROACHING_WINDOW_MIN};
use crate::models::trip::{Trip, TripId, TripStatus};
use crate::time::minute_of_day;

/// Per-trip urgency tag for the dispatch list. Rendered as a badge; `None`
/// means no badge.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub enum TripAlert {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "overdue")]
    Overdue,
    #[serde(rename = "approaching")]
    Approaching,
}

impl TripAlert {
    pub fn as_str(&self) -> &'static str {
        match self {
            TripAlert::None => "none",
            TripAlert::Overdue => "overdue",
            TripAlert::Approaching => "approaching",
        }
    }
}

/// Tags scheduled trips as overdue or approaching relative to one captured
/// instant. Callers take `now` once per pass and reuse it for every trip,
/// so a whole refresh sees a single consistent clock.
#[derive(Debug, Clone)]
pub struct AlertEvaluator {
    approaching_window_minutes: i64,
}

impl Default for AlertEvaluator {
    fn default() -> Self {
        Self::new(DEFAULT_APPROACHING_WINDOW_MIN)
    }
}

impl AlertEvaluator {
    pub fn new(approaching_window_minutes: i64) -> Self {
        Self {
            approaching_window_minutes,
        }
    }

    pub fn from_config(config: &FleetConfig) -> Self {
        Self::new(config.approaching_window_minutes)
    }

    /// Evaluates one trip against `now`.
    ///
    /// Only scheduled trips carrying both a date and a time get a tag.
    /// A trip dated before today is overdue, as is one dated today whose
    /// minute has passed. The approaching tag additionally requires the
    /// scheduled minute to be at or before the current minute, so it fires
    /// exactly when a trip's minute arrives and hands over to overdue one
    /// minute later. A trip whose start still lies ahead is never tagged.
    pub fn evaluate(&self, trip: &Trip, now: NaiveDateTime) -> TripAlert {
        if trip.status != TripStatus::Scheduled {
            return TripAlert::None;
        }
        let (Some(date), Some(minutes)) = (trip.date, trip.time_minutes) else {
            return TripAlert::None;
        };

        let today = now.date();
        let now_minutes = minute_of_day(now);

        if date < today || (date == today && minutes < now_minutes) {
            return TripAlert::Overdue;
        }
        if date == today
            && minutes <= now_minutes
            && now_minutes - minutes <= self.approaching_window_minutes
        {
            return TripAlert::Approaching;
        }
        TripAlert::None
    }

    /// Tags a whole list against one instant, keyed by trip id.
    pub fn evaluate_all(&self, trips: &[Trip], now: NaiveDateTime) -> HashMap<TripId, TripAlert> {
        trips
            .iter()
            .map(|trip| (trip.id.clone(), self.evaluate(trip, now)))
            .collect()
    }
}
