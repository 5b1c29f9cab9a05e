use crate::external::price_provider::MarketDataError;
use crate::models::{Holdings, RiskBand, ScreenerQuery, StockEntry};

/// Most entries the screener will consider from the universe.
pub const UNIVERSE_CAP: usize = 400;

/// Client for the personalized stock-universe service.
pub struct ScreenerClient {
    client: reqwest::Client,
    base_url: String,
}

impl ScreenerClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    /// Reads `SCREENER_URL`.
    pub fn from_env() -> Result<Self, MarketDataError> {
        let base_url = std::env::var("SCREENER_URL")
            .map_err(|_| MarketDataError::BadResponse("SCREENER_URL not set".into()))?;
        Ok(Self::new(base_url))
    }

    /// Fetch the stock universe tailored to the user's onboarding answers.
    pub async fn fetch_personalized(
        &self,
        query: &ScreenerQuery,
    ) -> Result<Vec<StockEntry>, MarketDataError> {
        let resp = self
            .client
            .get(format!("{}/personalized-data", self.base_url))
            .query(&[
                ("initialInvestment", query.initial_investment.to_string()),
                ("finalInvestment", query.final_investment.to_string()),
                ("time", query.duration_months.to_string()),
                ("risk", query.risk_level.clone()),
            ])
            .send()
            .await
            .map_err(|e| MarketDataError::Network(e.to_string()))?;

        if !resp.status().is_success() {
            return Err(MarketDataError::BadResponse(format!(
                "personalized-data returned status {}",
                resp.status()
            )));
        }

        resp.json::<Vec<StockEntry>>()
            .await
            .map_err(|e| MarketDataError::Parse(e.to_string()))
    }
}

/// Search and filter terms for the screener table. Empty strings and
/// `None` mean "match everything" for that column.
#[derive(Debug, Clone, Default)]
pub struct EntryFilter {
    pub company: String,
    pub ticker: String,
    pub grade: Option<String>,
    pub risk: Option<RiskBand>,
    pub sector: Option<String>,
}

/// Filter the universe and float the user's own holdings to the top.
///
/// Company and ticker match case-insensitively as substrings; grade, risk
/// band (derived from beta) and sector match exactly. Only the first
/// [`UNIVERSE_CAP`] entries are considered. Order is otherwise preserved
/// within the owned and unowned groups.
pub fn filter_entries(
    entries: &[StockEntry],
    filter: &EntryFilter,
    owned: &Holdings,
) -> Vec<StockEntry> {
    let company_needle = filter.company.to_lowercase();
    let ticker_needle = filter.ticker.to_lowercase();

    let matched = entries.iter().take(UNIVERSE_CAP).filter(|entry| {
        entry.company.to_lowercase().contains(&company_needle)
            && entry.ticker.to_lowercase().contains(&ticker_needle)
            && filter
                .grade
                .as_ref()
                .map_or(true, |g| entry.final_grade.as_deref() == Some(g.as_str()))
            && filter
                .risk
                .map_or(true, |band| RiskBand::from_beta(entry.beta) == band)
            && filter.sector.as_ref().map_or(true, |s| &entry.sector == s)
    });

    let (owned_entries, rest): (Vec<&StockEntry>, Vec<&StockEntry>) =
        matched.partition(|entry| owned.contains_key(&entry.ticker));

    owned_entries.into_iter().chain(rest).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(ticker: &str, company: &str, grade: &str, beta: f64, sector: &str) -> StockEntry {
        StockEntry {
            company: company.to_string(),
            ticker: ticker.to_string(),
            final_grade: Some(grade.to_string()),
            price: 100.0,
            change: 0.0,
            sector: sector.to_string(),
            beta,
            description: String::new(),
            pe: None,
            pe_grade: None,
            ps: None,
            ps_grade: None,
            pb: None,
            pb_grade: None,
            peg: None,
            peg_grade: None,
            valuation_grade: None,
        }
    }

    fn universe() -> Vec<StockEntry> {
        vec![
            entry("AAPL", "Apple Inc.", "A", 1.1, "Information Technology"),
            entry("JNJ", "Johnson & Johnson", "B", 0.6, "Health Care"),
            entry("TSLA", "Tesla Inc.", "C", 2.3, "Consumer Discretionary"),
            entry("MSFT", "Microsoft Corp.", "A", 0.9, "Information Technology"),
        ]
    }

    #[test]
    fn substring_search_is_case_insensitive() {
        let found = filter_entries(
            &universe(),
            &EntryFilter {
                company: "apple".to_string(),
                ..EntryFilter::default()
            },
            &Holdings::new(),
        );

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].ticker, "AAPL");
    }

    #[test]
    fn grade_and_sector_filters_compose() {
        let found = filter_entries(
            &universe(),
            &EntryFilter {
                grade: Some("A".to_string()),
                sector: Some("Information Technology".to_string()),
                ..EntryFilter::default()
            },
            &Holdings::new(),
        );

        let tickers: Vec<&str> = found.iter().map(|e| e.ticker.as_str()).collect();
        assert_eq!(tickers, vec!["AAPL", "MSFT"]);
    }

    #[test]
    fn risk_band_filter_derives_from_beta() {
        let found = filter_entries(
            &universe(),
            &EntryFilter {
                risk: Some(RiskBand::VeryHigh),
                ..EntryFilter::default()
            },
            &Holdings::new(),
        );

        assert_eq!(found.len(), 1);
        assert_eq!(found[0].ticker, "TSLA");
    }

    #[test]
    fn owned_tickers_float_to_the_top() {
        let mut owned = Holdings::new();
        owned.insert("MSFT".to_string(), 2.0);

        let found = filter_entries(&universe(), &EntryFilter::default(), &owned);
        let tickers: Vec<&str> = found.iter().map(|e| e.ticker.as_str()).collect();

        assert_eq!(tickers, vec!["MSFT", "AAPL", "JNJ", "TSLA"]);
    }

    #[test]
    fn no_filters_returns_everything_in_order() {
        let found = filter_entries(&universe(), &EntryFilter::default(), &Holdings::new());
        assert_eq!(found.len(), 4);
        assert_eq!(found[0].ticker, "AAPL");
    }
}
