use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ValuationPoint;

/// Ticker -> share quantity. A `BTreeMap` keeps iteration order stable,
/// which fixes which ticker's trading days define the gap-fill day axis.
pub type Holdings = BTreeMap<String, f64>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Buy,
    Sell,
}

/// One consistent snapshot of a user's paper portfolio.
///
/// Reducers in the service layer take a snapshot and return a new one;
/// cash and holdings can never be observed mid-update.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PortfolioState {
    pub cash: f64,
    pub holdings: Holdings,
    pub history: Vec<ValuationPoint>,
}

impl PortfolioState {
    pub fn new(cash: f64) -> Self {
        Self {
            cash,
            holdings: Holdings::new(),
            history: Vec::new(),
        }
    }

    pub fn last_valued_at(&self) -> Option<DateTime<Utc>> {
        self.history.last().map(|p| p.at)
    }

    /// Append a valuation point; an exact-duplicate timestamp is skipped so
    /// the history never carries two points for the same instant.
    pub fn with_valuation(mut self, at: DateTime<Utc>, total: f64) -> Self {
        if self.last_valued_at() != Some(at) {
            self.history.push(ValuationPoint::new(at, total));
        }
        self
    }
}

/// Round to cents, half away from zero.
pub fn round_money(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Round to thousandths of a share, half away from zero.
pub fn round_shares(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn rounding_bounds_float_drift() {
        assert_eq!(round_money(10.005), 10.01);
        assert_eq!(round_money(0.1 + 0.2), 0.3);
        assert_eq!(round_shares(1.0005), 1.001);
        assert_eq!(round_shares(2.5 - 2.5), 0.0);
    }

    #[test]
    fn duplicate_valuation_timestamp_is_skipped() {
        let at = Utc.with_ymd_and_hms(2024, 10, 1, 12, 0, 0).unwrap();
        let state = PortfolioState::new(5000.0)
            .with_valuation(at, 5000.0)
            .with_valuation(at, 5100.0);

        assert_eq!(state.history.len(), 1);
        assert_eq!(state.history[0].total, 5000.0);
    }
}
