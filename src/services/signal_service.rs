use tracing::warn;

use crate::errors::AppError;
use crate::external::price_provider::MarketDataProvider;
use crate::models::Signal;
use crate::services::indicators::moving_average;

/// Short and long moving-average windows used for crossover analysis.
pub const SHORT_WINDOW: usize = 50;
pub const LONG_WINDOW: usize = 200;

/// Trailing sessions the analysis looks at.
pub const ANALYSIS_SESSIONS: usize = 250;

/// Moving-average crossover heuristic.
///
/// All three sequences are oldest-first and must be the same length; a
/// mismatch is logged and degrades to [`Signal::Neutral`] rather than
/// erroring. The scan walks consecutive day pairs oldest-to-newest and the
/// first crossing found decides the outcome: a crossing from above either
/// average to at-or-below it the next day reads bullish only when the
/// short average starts above the long one (and the mirror for bearish);
/// an unconfirmed crossing is immediately neutral. Ties never count as a
/// cross.
pub fn classify_signal(prices: &[f64], short_ma: &[f64], long_ma: &[f64]) -> Signal {
    if prices.len() != short_ma.len() || prices.len() != long_ma.len() {
        warn!(
            prices = prices.len(),
            short_ma = short_ma.len(),
            long_ma = long_ma.len(),
            "signal inputs differ in length, treating as neutral"
        );
        return Signal::Neutral;
    }
    if prices.is_empty() {
        return Signal::Neutral;
    }

    for i in 0..prices.len() - 1 {
        let price = prices[i];

        if (price > short_ma[i] && prices[i + 1] <= short_ma[i + 1])
            || (price > long_ma[i] && prices[i + 1] <= long_ma[i + 1])
        {
            return if short_ma[0] > long_ma[0] {
                Signal::Bullish
            } else {
                Signal::Neutral
            };
        }

        if (price < short_ma[i] && prices[i + 1] >= short_ma[i + 1])
            || (price < long_ma[i] && prices[i + 1] >= long_ma[i + 1])
        {
            return if short_ma[0] < long_ma[0] {
                Signal::Bearish
            } else {
                Signal::Neutral
            };
        }
    }

    Signal::Neutral
}

/// Fetch a ticker's close history and classify its trailing
/// [`ANALYSIS_SESSIONS`] sessions against the 50- and 200-day averages
/// (computed over the full history, so the early windows are warm).
pub async fn analyze_ticker(
    provider: &dyn MarketDataProvider,
    ticker: &str,
) -> Result<Signal, AppError> {
    let history = provider.daily_history(ticker).await?;
    let closes: Vec<f64> = history.iter().map(|p| p.close).collect();

    let short = moving_average(&closes, SHORT_WINDOW);
    let long = moving_average(&closes, LONG_WINDOW);

    let tail = closes.len().saturating_sub(ANALYSIS_SESSIONS);
    Ok(classify_signal(&closes[tail..], &short[tail..], &long[tail..]))
}
