use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::{Holdings, LearningProgress, PortfolioState, ScreenerQuery, ValuationPoint, POINTS_PER_ARTICLE};

/// Cash granted to a brand-new user (or a profile whose cash field was
/// never written). Zero is a real balance, not an absent one.
pub const DEFAULT_STARTING_CASH: f64 = 5000.0;

/// Envelope returned by the profile store's `get-user-metadata` endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct ProfileDocument {
    #[serde(rename = "userMetadata")]
    pub user_metadata: RawProfile,
}

/// The profile exactly as stored remotely. Every field a new user has
/// never touched may be absent; [`UserProfile::from`] applies defaults.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawProfile {
    pub user_cash: Option<f64>,
    pub owned_stocks: Option<Holdings>,
    pub investment_data: Option<Vec<ValuationPoint>>,
    pub progress: Option<BTreeMap<String, f64>>,
    pub points: Option<f64>,
    #[serde(default = "default_investment_amount")]
    pub investment_amount: f64,
    #[serde(default = "default_final_investment_amount")]
    pub final_investment_amount: f64,
    #[serde(default = "default_investment_duration")]
    pub investment_duration: u32,
    #[serde(default = "default_risk_level")]
    pub risk_level: String,
}

fn default_investment_amount() -> f64 {
    1000.0
}

fn default_final_investment_amount() -> f64 {
    2000.0
}

fn default_investment_duration() -> u32 {
    12
}

fn default_risk_level() -> String {
    "low".to_string()
}

/// A loaded profile with all defaults applied, split into the snapshots
/// the rest of the crate works with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub portfolio: PortfolioState,
    pub learning: LearningProgress,
    pub query: ScreenerQuery,
}

impl From<RawProfile> for UserProfile {
    fn from(raw: RawProfile) -> Self {
        let progress = raw.progress.unwrap_or_default();
        // A profile from before points existed earns credit for every
        // module it already has an entry for.
        let points = raw
            .points
            .unwrap_or_else(|| progress.len() as f64 * POINTS_PER_ARTICLE);

        Self {
            portfolio: PortfolioState {
                cash: raw.user_cash.unwrap_or(DEFAULT_STARTING_CASH),
                holdings: raw.owned_stocks.unwrap_or_default(),
                history: raw.investment_data.unwrap_or_default(),
            },
            learning: LearningProgress { progress, points },
            query: ScreenerQuery {
                initial_investment: raw.investment_amount,
                final_investment: raw.final_investment_amount,
                duration_months: raw.investment_duration,
                risk_level: raw.risk_level,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_profile_gets_full_defaults() {
        let doc: ProfileDocument = serde_json::from_str(r#"{"userMetadata": {}}"#).unwrap();
        let profile = UserProfile::from(doc.user_metadata);

        assert_eq!(profile.portfolio.cash, 5000.0);
        assert!(profile.portfolio.holdings.is_empty());
        assert!(profile.portfolio.history.is_empty());
        assert!(profile.learning.progress.is_empty());
        assert_eq!(profile.learning.points, 0.0);
        assert_eq!(profile.query.initial_investment, 1000.0);
        assert_eq!(profile.query.risk_level, "low");
    }

    #[test]
    fn zero_cash_is_preserved_not_defaulted() {
        let doc: ProfileDocument =
            serde_json::from_str(r#"{"userMetadata": {"userCash": 0}}"#).unwrap();
        let profile = UserProfile::from(doc.user_metadata);

        assert_eq!(profile.portfolio.cash, 0.0);
    }

    #[test]
    fn missing_points_derive_from_progress_entries() {
        let doc: ProfileDocument = serde_json::from_str(
            r#"{"userMetadata": {"progress": {"What is investing?": 100, "Budgeting": 60}}}"#,
        )
        .unwrap();
        let profile = UserProfile::from(doc.user_metadata);

        assert_eq!(profile.learning.points, 50.0);
        assert_eq!(profile.learning.progress.len(), 2);
    }

    #[test]
    fn stored_fields_pass_through() {
        let doc: ProfileDocument = serde_json::from_str(
            r#"{"userMetadata": {
                "userCash": 321.55,
                "ownedStocks": {"AAPL": 1.5},
                "investmentData": [{"x": "2024-10-01T10:20:00Z", "y": 3050}],
                "points": 175,
                "riskLevel": "high"
            }}"#,
        )
        .unwrap();
        let profile = UserProfile::from(doc.user_metadata);

        assert_eq!(profile.portfolio.cash, 321.55);
        assert_eq!(profile.portfolio.holdings.get("AAPL"), Some(&1.5));
        assert_eq!(profile.portfolio.history.len(), 1);
        assert_eq!(profile.learning.points, 175.0);
        assert_eq!(profile.query.risk_level, "high");
    }
}
