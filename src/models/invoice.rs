use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum InvoiceStatus {
    #[default]
    #[serde(rename = "draft")]
    Draft,
    #[serde(rename = "sent")]
    Sent,
    #[serde(rename = "paid")]
    Paid,
    #[serde(rename = "cancelled")]
    Cancelled,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum QuotationStatus {
    #[default]
    #[serde(rename = "draft")]
    Draft,
    #[serde(rename = "sent")]
    Sent,
    #[serde(rename = "accepted")]
    Accepted,
    #[serde(rename = "declined")]
    Declined,
}

/// One billable line. Quantities and prices that arrive broken count as
/// zero rather than poisoning a document total.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LineItem {
    #[serde(default)]
    pub description: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub quantity: f64,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity,
            unit_price,
        }
    }

    pub fn line_total(&self) -> f64 {
        let total = self.quantity * self.unit_price;
        if total.is_finite() {
            total
        } else {
            0.0
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    pub id: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub status: InvoiceStatus,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub discount_percent: f64,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub vat_percent: f64,
}

#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quotation {
    pub id: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub status: QuotationStatus,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub valid_until: Option<NaiveDate>,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub discount_percent: f64,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub vat_percent: f64,
}
