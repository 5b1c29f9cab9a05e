use std::fmt;

use serde::{Deserialize, Serialize};

/// One record of the personalized stock universe, schema as served by the
/// `personalized-data` endpoint (capitalized, space-separated field names).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockEntry {
    #[serde(rename = "Company")]
    pub company: String,
    #[serde(rename = "Ticker")]
    pub ticker: String,
    #[serde(rename = "Final Grade")]
    pub final_grade: Option<String>,
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Change", default)]
    pub change: f64,
    #[serde(rename = "Sector", default)]
    pub sector: String,
    #[serde(rename = "Beta", default)]
    pub beta: f64,
    #[serde(rename = "Description", default)]
    pub description: String,
    #[serde(rename = "PE")]
    pub pe: Option<f64>,
    #[serde(rename = "PE Grade")]
    pub pe_grade: Option<String>,
    #[serde(rename = "PS")]
    pub ps: Option<f64>,
    #[serde(rename = "PS Grade")]
    pub ps_grade: Option<String>,
    #[serde(rename = "PB")]
    pub pb: Option<f64>,
    #[serde(rename = "PB Grade")]
    pub pb_grade: Option<String>,
    #[serde(rename = "PEG")]
    pub peg: Option<f64>,
    #[serde(rename = "PEG Grade")]
    pub peg_grade: Option<String>,
    #[serde(rename = "Valuation Grade")]
    pub valuation_grade: Option<String>,
}

/// Risk bucket derived from a stock's beta.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskBand {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl RiskBand {
    pub fn from_beta(beta: f64) -> Self {
        if beta < 0.25 {
            RiskBand::VeryLow
        } else if beta < 0.75 {
            RiskBand::Low
        } else if beta < 1.25 {
            RiskBand::Medium
        } else if beta < 2.0 {
            RiskBand::High
        } else {
            RiskBand::VeryHigh
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            RiskBand::VeryLow => "Very Low Risk",
            RiskBand::Low => "Low Risk",
            RiskBand::Medium => "Medium Risk",
            RiskBand::High => "High Risk",
            RiskBand::VeryHigh => "Very High Risk",
        }
    }
}

impl fmt::Display for RiskBand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Parameters the personalized universe is built from; comes off the
/// user's onboarding answers stored in their profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScreenerQuery {
    pub initial_investment: f64,
    pub final_investment: f64,
    pub duration_months: u32,
    pub risk_level: String,
}
