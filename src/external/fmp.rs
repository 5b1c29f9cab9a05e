use async_trait::async_trait;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::external::price_provider::{
    MarketDataError, MarketDataProvider, PricePoint, HISTORY_DEPTH,
};

const DEFAULT_BASE_URL: &str = "https://financialmodelingprep.com/api/v3";

/// FinancialModelingPrep market-data client.
///
/// Endpoints used: `historical-price-full` for the deep charting history
/// (adjusted closes), `historical-chart/1day` for date-ranged gap filling,
/// `quote-short` for live quotes.
pub struct FmpProvider {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl FmpProvider {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    pub fn from_env() -> Result<Self, MarketDataError> {
        let api_key = std::env::var("FMP_API_KEY")
            .map_err(|_| MarketDataError::BadResponse("FMP_API_KEY not set".into()))?;
        Ok(Self::new(api_key))
    }

    /// Point the client at a different host (stubbed server in tests,
    /// proxy in production).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: String,
        query: &[(&str, String)],
    ) -> Result<T, MarketDataError> {
        let resp = self
            .client
            .get(url)
            .query(query)
            .send()
            .await
            .map_err(|e| MarketDataError::Network(e.to_string()))?;

        if resp.status() == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(MarketDataError::RateLimited);
        }
        if !resp.status().is_success() {
            return Err(MarketDataError::BadResponse(format!(
                "status {}",
                resp.status()
            )));
        }

        resp.json::<T>()
            .await
            .map_err(|e| MarketDataError::Parse(e.to_string()))
    }
}

// Minimal response structs, only the fields we read.

#[derive(Debug, Deserialize)]
struct FmpHistoricalResponse {
    historical: Option<Vec<FmpHistoricalBar>>,
}

#[derive(Debug, Deserialize)]
struct FmpHistoricalBar {
    date: String,
    close: f64,
    #[serde(rename = "adjClose")]
    adj_close: Option<f64>,
}

// `historical-chart` rows carry a "YYYY-MM-DD HH:MM:SS" date string.
#[derive(Debug, Deserialize)]
struct FmpChartBar {
    date: String,
    close: f64,
}

#[derive(Debug, Deserialize)]
struct FmpQuoteShort {
    price: f64,
}

fn parse_day(raw: &str) -> Result<NaiveDate, MarketDataError> {
    let day = raw.split_whitespace().next().unwrap_or(raw);
    NaiveDate::parse_from_str(day, "%Y-%m-%d")
        .map_err(|e| MarketDataError::Parse(format!("bad date {raw:?}: {e}")))
}

#[async_trait]
impl MarketDataProvider for FmpProvider {
    async fn daily_history(&self, ticker: &str) -> Result<Vec<PricePoint>, MarketDataError> {
        let url = format!("{}/historical-price-full/{}", self.base_url, ticker);
        let body: FmpHistoricalResponse = self
            .get_json(url, &[("apikey", self.api_key.clone())])
            .await?;

        let bars = body
            .historical
            .ok_or_else(|| MarketDataError::BadResponse("missing historical series".into()))?;

        // Newest first on the wire; keep the most recent sessions, then
        // flip to chronological order.
        let mut out = Vec::with_capacity(bars.len().min(HISTORY_DEPTH));
        for bar in bars.into_iter().take(HISTORY_DEPTH) {
            out.push(PricePoint {
                date: parse_day(&bar.date)?,
                close: bar.adj_close.unwrap_or(bar.close),
            });
        }
        out.reverse();

        Ok(out)
    }

    async fn daily_history_between(
        &self,
        ticker: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<PricePoint>, MarketDataError> {
        let url = format!("{}/historical-chart/1day/{}", self.base_url, ticker);
        let bars: Vec<FmpChartBar> = self
            .get_json(
                url,
                &[
                    ("from", from.format("%Y-%m-%d").to_string()),
                    ("to", to.format("%Y-%m-%d").to_string()),
                    ("apikey", self.api_key.clone()),
                ],
            )
            .await?;

        let mut out = Vec::with_capacity(bars.len());
        for bar in bars {
            out.push(PricePoint {
                date: parse_day(&bar.date)?,
                close: bar.close,
            });
        }
        out.reverse();

        Ok(out)
    }

    async fn live_quote(&self, ticker: &str) -> Result<f64, MarketDataError> {
        let url = format!("{}/quote-short/{}", self.base_url, ticker);
        let quotes: Vec<FmpQuoteShort> = self
            .get_json(url, &[("apikey", self.api_key.clone())])
            .await?;

        quotes
            .first()
            .map(|q| q.price)
            .ok_or_else(|| MarketDataError::BadResponse(format!("no quote for {ticker}")))
    }
}
