use std::fmt;

use serde::{Deserialize, Serialize};

/// Direction of the moving-average crossover signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Signal {
    /// Crossing confirmed against a rising long-run trend.
    #[serde(rename = "bullish")]
    Bullish,

    /// Crossing confirmed against a falling long-run trend.
    #[serde(rename = "bearish")]
    Bearish,

    /// No crossing, an unconfirmed crossing, or unusable input.
    #[serde(rename = "neutral")]
    Neutral,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Bullish => write!(f, "bullish"),
            Signal::Bearish => write!(f, "bearish"),
            Signal::Neutral => write!(f, "neutral"),
        }
    }
}
