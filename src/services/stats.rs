use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::info;

use crate::models::invoice::{Invoice, InvoiceStatus};
use crate::models::part::SparePart;
use crate::models::trip::{Trip, TripStatus};
use crate::services::alerts::{AlertEvaluator, TripAlert};
use crate::services::billing::{invoice_totals, round_cents};
use crate::services::conflict::ConflictDetector;

/// Headline counters for the dashboard cards, all derived from one trip
/// list and one captured instant.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq, Eq)]
pub struct FleetSnapshot {
    pub trips_today: usize,
    pub in_progress: usize,
    pub completed_today: usize,
    pub unassigned: usize,
    pub conflicted: usize,
    pub overdue: usize,
    pub approaching: usize,
}

pub fn fleet_snapshot(
    trips: &[Trip],
    now: NaiveDateTime,
    detector: &ConflictDetector,
    evaluator: &AlertEvaluator,
) -> FleetSnapshot {
    let today = now.date();
    let mut snapshot = FleetSnapshot::default();

    for trip in trips {
        if trip.date == Some(today) {
            snapshot.trips_today += 1;
        }
        match trip.status {
            TripStatus::InProgress => snapshot.in_progress += 1,
            TripStatus::Completed => {
                if trip.date == Some(today) {
                    snapshot.completed_today += 1;
                }
            }
            TripStatus::Scheduled => {
                if !trip.is_assigned() {
                    snapshot.unassigned += 1;
                }
            }
            TripStatus::Cancelled => {}
        }
        match evaluator.evaluate(trip, now) {
            TripAlert::Overdue => snapshot.overdue += 1,
            TripAlert::Approaching => snapshot.approaching += 1,
            TripAlert::None => {}
        }
    }
    snapshot.conflicted = detector.detect(trips).conflicted_count();

    info!(
        trips = trips.len(),
        conflicted = snapshot.conflicted,
        overdue = snapshot.overdue,
        "assembled fleet snapshot"
    );
    snapshot
}

/// Revenue figures for the billing dashboard. Draft and cancelled invoices
/// never count toward the money totals.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct RevenueSummary {
    pub invoiced_total: f64,
    pub paid_total: f64,
    pub outstanding_total: f64,
    pub draft_count: usize,
    pub sent_count: usize,
    pub paid_count: usize,
    pub cancelled_count: usize,
}

pub fn revenue_summary(invoices: &[Invoice]) -> RevenueSummary {
    let mut summary = RevenueSummary::default();
    for invoice in invoices {
        let total = invoice_totals(invoice).total;
        match invoice.status {
            InvoiceStatus::Draft => summary.draft_count += 1,
            InvoiceStatus::Sent => {
                summary.sent_count += 1;
                summary.invoiced_total += total;
                summary.outstanding_total += total;
            }
            InvoiceStatus::Paid => {
                summary.paid_count += 1;
                summary.invoiced_total += total;
                summary.paid_total += total;
            }
            InvoiceStatus::Cancelled => summary.cancelled_count += 1,
        }
    }
    summary.invoiced_total = round_cents(summary.invoiced_total);
    summary.paid_total = round_cents(summary.paid_total);
    summary.outstanding_total = round_cents(summary.outstanding_total);
    summary
}

/// Parts at or under their minimum stock, for the reorder list.
pub fn low_stock_parts(parts: &[SparePart]) -> Vec<&SparePart> {
    parts.iter().filter(|part| part.is_low_stock()).collect()
}
