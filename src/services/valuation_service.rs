use std::collections::BTreeMap;

use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use tracing::{debug, info};

use crate::errors::AppError;
use crate::external::price_provider::MarketDataProvider;
use crate::models::{round_money, Holdings, PortfolioState, ValuationPoint};

/// Series older than this is considered stale and has its gap filled from
/// daily history before a fresh point is recorded.
fn freshness_window() -> Duration {
    Duration::hours(24)
}

/// Bring a stored valuation series up to date and value the portfolio at
/// current prices.
///
/// Returns the series with any synthesized gap points appended, plus the
/// live total (cash + quoted value of every holding, rounded to cents).
/// Gap filling only runs when the last stored point is more than 24 hours
/// old; a brand-new user (empty series) skips it entirely. One history
/// fetch per held ticker and one quote fetch per held ticker, awaited
/// sequentially; any fetch failure aborts with `MarketDataUnavailable`
/// and no partial series escapes.
pub async fn reconcile(
    provider: &dyn MarketDataProvider,
    cash: f64,
    holdings: &Holdings,
    prior_series: &[ValuationPoint],
    now: DateTime<Utc>,
) -> Result<(Vec<ValuationPoint>, f64), AppError> {
    let mut series = prior_series.to_vec();

    if let Some(last) = prior_series.last() {
        if now - last.at > freshness_window() {
            info!(
                last_valued = %last.at,
                holdings = holdings.len(),
                "valuation series is stale, filling gap from daily history"
            );
            let synthesized = fill_gaps(provider, cash, holdings, last.at, now).await?;
            debug!(points = synthesized.len(), "gap points synthesized");
            series.extend(synthesized);
        }
    }

    let value = current_value(provider, cash, holdings).await?;
    Ok((series, value))
}

/// Cash plus the live market value of every holding, one quote per ticker.
pub async fn current_value(
    provider: &dyn MarketDataProvider,
    cash: f64,
    holdings: &Holdings,
) -> Result<f64, AppError> {
    let mut market_value = 0.0;
    for (ticker, qty) in holdings {
        market_value += provider.live_quote(ticker).await? * qty;
    }
    Ok(round_money(cash + market_value))
}

/// Reconcile a snapshot's history and record the fresh valuation on it,
/// returning the next snapshot.
pub async fn revalue(
    provider: &dyn MarketDataProvider,
    state: &PortfolioState,
    now: DateTime<Utc>,
) -> Result<PortfolioState, AppError> {
    let (history, value) =
        reconcile(provider, state.cash, &state.holdings, &state.history, now).await?;

    let mut next = state.clone();
    next.history = history;
    Ok(next.with_valuation(now, value))
}

/// Synthesize one valuation point per trading day between the last stored
/// point and now.
///
/// The first held ticker's trading days (strictly after the last point's
/// date) define the day axis, each seeded with cash plus that ticker's
/// value. Every other ticker adds its value into matching days by date,
/// so a ticker whose series covers different days cannot shift values
/// onto the wrong day: days missing from the axis are ignored, and axis
/// days missing from a ticker's series get no contribution from it.
async fn fill_gaps(
    provider: &dyn MarketDataProvider,
    cash: f64,
    holdings: &Holdings,
    last_at: DateTime<Utc>,
    now: DateTime<Utc>,
) -> Result<Vec<ValuationPoint>, AppError> {
    let from = last_at.date_naive();
    let to = now.date_naive();

    let mut totals: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    let mut first_ticker = true;

    for (ticker, qty) in holdings {
        let history = provider.daily_history_between(ticker, from, to).await?;
        for point in history {
            // The day the series was last valued is already covered.
            if point.date <= from {
                continue;
            }
            if first_ticker {
                totals.insert(point.date, cash + point.close * qty);
            } else if let Some(total) = totals.get_mut(&point.date) {
                *total += point.close * qty;
            }
        }
        first_ticker = false;
    }

    Ok(totals
        .into_iter()
        .map(|(date, total)| ValuationPoint::new(day_instant(date), total))
        .collect())
}

fn day_instant(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Restrict a valuation series to the trailing `days` before `now`, for
/// the chart's period buttons. Zero days means the full series.
pub fn restrict_to_days(
    series: &[ValuationPoint],
    days: i64,
    now: DateTime<Utc>,
) -> Vec<ValuationPoint> {
    if days == 0 {
        return series.to_vec();
    }
    let start = now - Duration::days(days);
    series.iter().filter(|p| p.at >= start).cloned().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn zero_days_keeps_the_whole_series() {
        let now = Utc.with_ymd_and_hms(2024, 10, 30, 12, 0, 0).unwrap();
        let series = vec![
            ValuationPoint::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(), 5000.0),
            ValuationPoint::new(Utc.with_ymd_and_hms(2024, 10, 29, 0, 0, 0).unwrap(), 5200.0),
        ];

        assert_eq!(restrict_to_days(&series, 0, now), series);
    }

    #[test]
    fn window_drops_older_points() {
        let now = Utc.with_ymd_and_hms(2024, 10, 30, 12, 0, 0).unwrap();
        let series = vec![
            ValuationPoint::new(Utc.with_ymd_and_hms(2024, 9, 1, 0, 0, 0).unwrap(), 5000.0),
            ValuationPoint::new(Utc.with_ymd_and_hms(2024, 10, 28, 0, 0, 0).unwrap(), 5150.0),
            ValuationPoint::new(Utc.with_ymd_and_hms(2024, 10, 29, 0, 0, 0).unwrap(), 5200.0),
        ];

        let month = restrict_to_days(&series, 30, now);
        assert_eq!(month.len(), 2);
        assert_eq!(month[0].total, 5150.0);
    }
}
