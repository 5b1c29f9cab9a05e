use async_trait::async_trait;
use chrono::NaiveDate;
use thiserror::Error;

/// Sessions of daily history fetched for charting and signal analysis.
pub const HISTORY_DEPTH: usize = 450;

/// One daily close for a ticker.
#[derive(Debug, Clone, PartialEq)]
pub struct PricePoint {
    pub date: NaiveDate,
    pub close: f64,
}

#[derive(Debug, Error)]
pub enum MarketDataError {
    #[error("network error: {0}")]
    Network(String),

    #[error("bad response: {0}")]
    BadResponse(String),

    #[error("parse error: {0}")]
    Parse(String),

    #[error("rate limited")]
    RateLimited,
}

#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Full daily close history for a ticker, oldest first, capped at the
    /// most recent [`HISTORY_DEPTH`] sessions. Adjusted closes where the
    /// source provides them.
    async fn daily_history(&self, ticker: &str) -> Result<Vec<PricePoint>, MarketDataError>;

    /// Daily closes between two dates inclusive, oldest first.
    async fn daily_history_between(
        &self,
        ticker: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, MarketDataError>;

    /// Latest traded price.
    async fn live_quote(&self, ticker: &str) -> Result<f64, MarketDataError>;
}
