use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DefaultOnError};

/// Spare-part stock line for the workshop inventory screen.
#[serde_as]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SparePart {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub quantity: i64,
    #[serde_as(as = "DefaultOnError")]
    #[serde(default)]
    pub min_quantity: i64,
}

impl SparePart {
    pub fn is_low_stock(&self) -> bool {
        self.quantity <= self.min_quantity
    }
}
