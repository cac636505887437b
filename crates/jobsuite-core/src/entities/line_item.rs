use serde::{Deserialize, Serialize};

/// A priced scope-of-work block on an estimate.
///
/// Price is always derived as `hours * rate`; it is never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EstimateLineItem {
    pub id: String,
    #[serde(default)]
    pub estimate_id: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub hours: f64,
    #[serde(default)]
    pub rate: f64,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub updated_at: Option<String>,
}

impl EstimateLineItem {
    /// The dollar amount this line contributes to the estimate total.
    #[must_use]
    pub fn price(&self) -> f64 {
        self.hours * self.rate
    }
}
