use chrono::NaiveDate;
use serde::Serialize;
use tracing::debug;

use crate::models::trip::{Trip, TripStatus};

/// The four dispatch-board columns. Bucket order mirrors input order;
/// consumers sort for display however they like.
#[derive(Debug, Clone, Default, Serialize)]
pub struct DispatchBoard {
    pub upcoming: Vec<Trip>,
    pub in_progress: Vec<Trip>,
    pub later_scheduled: Vec<Trip>,
    pub completed: Vec<Trip>,
}

impl DispatchBoard {
    pub fn total(&self) -> usize {
        self.upcoming.len()
            + self.in_progress.len()
            + self.later_scheduled.len()
            + self.completed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Partitions trips into board columns relative to `today`.
///
/// Scheduled trips land in `upcoming` when dated today or tomorrow and in
/// `later_scheduled` when dated after tomorrow. A scheduled trip dated in
/// the past sits in neither column; the overdue tagging in
/// [`crate::services::alerts`] is what surfaces those. Cancelled trips and
/// scheduled trips without a usable date are left off the board entirely.
pub fn classify_trips(trips: &[Trip], today: NaiveDate) -> DispatchBoard {
    let tomorrow = today.succ_opt();
    let mut board = DispatchBoard::default();

    for trip in trips {
        match trip.status {
            TripStatus::InProgress => board.in_progress.push(trip.clone()),
            TripStatus::Completed => board.completed.push(trip.clone()),
            TripStatus::Cancelled => {}
            TripStatus::Scheduled => {
                let Some(date) = trip.date else {
                    debug!(trip = %trip.id, "scheduled trip without a date left off the board");
                    continue;
                };
                if date == today || Some(date) == tomorrow {
                    board.upcoming.push(trip.clone());
                } else if tomorrow.is_some_and(|tomorrow| date > tomorrow) {
                    board.later_scheduled.push(trip.clone());
                }
            }
        }
    }

    board
}
