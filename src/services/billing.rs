use chrono::NaiveDate;
use serde::Serialize;

use crate::models::invoice::{Invoice, LineItem, Quotation, QuotationStatus};

/// Money amounts for one billing document, every field already rounded to
/// cents. `total` is subtotal minus discount plus VAT.
#[derive(Debug, Clone, Copy, Default, Serialize, PartialEq)]
pub struct DocumentTotals {
    pub subtotal: f64,
    pub discount: f64,
    pub vat: f64,
    pub total: f64,
}

/// Computes document totals from line items. The discount applies to the
/// subtotal and VAT applies to the discounted amount, matching how the
/// printed documents break the numbers down.
pub fn compute_totals(
    items: &[LineItem],
    discount_percent: f64,
    vat_percent: f64,
) -> DocumentTotals {
    let subtotal: f64 = items.iter().map(LineItem::line_total).sum();
    let discount = subtotal * percent_or_zero(discount_percent) / 100.0;
    let after_discount = subtotal - discount;
    let vat = after_discount * percent_or_zero(vat_percent) / 100.0;

    DocumentTotals {
        subtotal: round_cents(subtotal),
        discount: round_cents(discount),
        vat: round_cents(vat),
        total: round_cents(after_discount + vat),
    }
}

pub fn invoice_totals(invoice: &Invoice) -> DocumentTotals {
    compute_totals(&invoice.items, invoice.discount_percent, invoice.vat_percent)
}

pub fn quotation_totals(quotation: &Quotation) -> DocumentTotals {
    compute_totals(
        &quotation.items,
        quotation.discount_percent,
        quotation.vat_percent,
    )
}

/// Sent quotations whose validity date has passed. Drafts and decided
/// quotations are not listed; a quotation without a validity date never
/// expires.
pub fn expired_quotations<'a>(
    quotations: &'a [Quotation],
    today: NaiveDate,
) -> Vec<&'a Quotation> {
    quotations
        .iter()
        .filter(|quotation| quotation.status == QuotationStatus::Sent)
        .filter(|quotation| quotation.valid_until.is_some_and(|date| date < today))
        .collect()
}

fn percent_or_zero(percent: f64) -> f64 {
    if percent.is_finite() {
        percent.clamp(0.0, 100.0)
    } else {
        0.0
    }
}

pub(crate) fn round_cents(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn items() -> Vec<LineItem> {
        vec![
            LineItem::new("Airport transfer", 2.0, 45.0),
            LineItem::new("Waiting time", 1.5, 20.0),
        ]
    }

    #[test]
    fn totals_compose_discount_then_vat() {
        // subtotal 120, 10% discount -> 108, 19% VAT -> 20.52
        let totals = compute_totals(&items(), 10.0, 19.0);
        assert_eq!(totals.subtotal, 120.0);
        assert_eq!(totals.discount, 12.0);
        assert_eq!(totals.vat, 20.52);
        assert_eq!(totals.total, 128.52);
    }

    #[test]
    fn no_items_means_all_zero() {
        let totals = compute_totals(&[], 10.0, 19.0);
        assert_eq!(totals, DocumentTotals::default());
    }

    #[test]
    fn amounts_are_rounded_to_cents() {
        let items = vec![LineItem::new("Odd pricing", 3.0, 0.333)];
        let totals = compute_totals(&items, 0.0, 0.0);
        assert_eq!(totals.subtotal, 1.0);
        assert_eq!(totals.total, 1.0);
    }

    #[test]
    fn out_of_range_percentages_are_clamped() {
        let totals = compute_totals(&items(), 150.0, -5.0);
        assert_eq!(totals.discount, 120.0);
        assert_eq!(totals.vat, 0.0);
        assert_eq!(totals.total, 0.0);

        let totals = compute_totals(&items(), f64::NAN, f64::INFINITY);
        assert_eq!(totals.discount, 0.0);
        assert_eq!(totals.vat, 0.0);
        assert_eq!(totals.total, 120.0);
    }

    #[test]
    fn expired_means_sent_and_past_validity() {
        let day = |d| NaiveDate::from_ymd_opt(2024, 1, d);
        let quotation = |id: &str, status, valid_until| Quotation {
            id: id.to_string(),
            status,
            valid_until,
            items: Vec::new(),
            discount_percent: 0.0,
            vat_percent: 0.0,
        };

        let quotations = vec![
            quotation("Q1", QuotationStatus::Sent, day(5)),
            quotation("Q2", QuotationStatus::Sent, day(20)),
            quotation("Q3", QuotationStatus::Accepted, day(5)),
            quotation("Q4", QuotationStatus::Sent, None),
        ];

        let expired = expired_quotations(&quotations, day(10).unwrap());
        let ids: Vec<&str> = expired.iter().map(|quotation| quotation.id.as_str()).collect();
        assert_eq!(ids, vec!["Q1"]);
    }
}
