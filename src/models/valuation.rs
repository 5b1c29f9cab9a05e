use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// One point on the portfolio value chart. Serialized as `{"x": ..., "y": ...}`,
// the shape the profile store keeps under `investmentData`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValuationPoint {
    #[serde(rename = "x")]
    pub at: DateTime<Utc>,
    #[serde(rename = "y")]
    pub total: f64,
}

impl ValuationPoint {
    pub fn new(at: DateTime<Utc>, total: f64) -> Self {
        Self { at, total }
    }
}
