use crate::errors::AppError;
use crate::models::{round_money, round_shares, PortfolioState, Side};

/// A draft order derived from either of the trade form's two entry paths:
/// a share count or a dollar amount, each deriving the other at the
/// current price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OrderTicket {
    pub shares: f64,
    pub amount: f64,
}

impl OrderTicket {
    pub fn from_shares(shares: f64, price: f64) -> Option<Self> {
        if !shares.is_finite() || !price.is_finite() || shares < 0.0 || price <= 0.0 {
            return None;
        }
        Some(Self {
            shares: round_shares(shares),
            amount: round_money(shares * price),
        })
    }

    pub fn from_amount(amount: f64, price: f64) -> Option<Self> {
        if !amount.is_finite() || !price.is_finite() || amount < 0.0 || price <= 0.0 {
            return None;
        }
        Some(Self {
            shares: round_shares(amount / price),
            amount: round_money(amount),
        })
    }
}

/// Apply a buy or sell to a snapshot, returning the next snapshot.
///
/// Errors abort the order whole: no partial application, input state
/// untouched. Cash is rounded to cents and share quantities to
/// thousandths after every arithmetic step, and a sell that brings a
/// holding to exactly zero removes the entry.
pub fn apply_order(
    state: &PortfolioState,
    side: Side,
    ticker: &str,
    share_qty: f64,
    cash_delta: f64,
) -> Result<PortfolioState, AppError> {
    match side {
        Side::Buy => {
            if cash_delta > state.cash || share_qty == 0.0 {
                return Err(AppError::InsufficientFunds {
                    needed: cash_delta,
                    available: state.cash,
                });
            }

            let mut next = state.clone();
            next.cash = round_money(next.cash - cash_delta);
            next.holdings
                .entry(ticker.to_string())
                .and_modify(|held| *held = round_shares(*held + share_qty))
                .or_insert_with(|| round_shares(share_qty));
            Ok(next)
        }
        Side::Sell => {
            let held = state.holdings.get(ticker).copied();
            match held {
                Some(held) if held >= share_qty && share_qty != 0.0 => {
                    let mut next = state.clone();
                    next.cash = round_money(next.cash + cash_delta);

                    let remaining = round_shares(held - share_qty);
                    if remaining == 0.0 {
                        next.holdings.remove(ticker);
                    } else {
                        next.holdings.insert(ticker.to_string(), remaining);
                    }
                    Ok(next)
                }
                _ => Err(AppError::InsufficientShares {
                    ticker: ticker.to_string(),
                    requested: share_qty,
                    held: held.unwrap_or(0.0),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state_with(cash: f64, holdings: &[(&str, f64)]) -> PortfolioState {
        let mut state = PortfolioState::new(cash);
        for (ticker, qty) in holdings {
            state.holdings.insert(ticker.to_string(), *qty);
        }
        state
    }

    #[test]
    fn buy_debits_cash_and_credits_holding() {
        let state = state_with(1000.0, &[]);
        let next = apply_order(&state, Side::Buy, "AAPL", 2.5, 450.75).unwrap();

        assert_eq!(next.cash, 549.25);
        assert_eq!(next.holdings.get("AAPL"), Some(&2.5));
        // input snapshot untouched
        assert_eq!(state.cash, 1000.0);
        assert!(state.holdings.is_empty());
    }

    #[test]
    fn buy_accumulates_into_existing_holding() {
        let state = state_with(1000.0, &[("AAPL", 1.25)]);
        let next = apply_order(&state, Side::Buy, "AAPL", 0.375, 50.0).unwrap();

        assert_eq!(next.holdings.get("AAPL"), Some(&1.625));
    }

    #[test]
    fn buy_beyond_cash_is_insufficient_funds() {
        let state = state_with(100.0, &[]);
        let err = apply_order(&state, Side::Buy, "AAPL", 10.0, 500.0).unwrap_err();

        assert!(matches!(err, AppError::InsufficientFunds { .. }));
    }

    #[test]
    fn buy_of_exactly_all_cash_succeeds() {
        let state = state_with(500.0, &[]);
        let next = apply_order(&state, Side::Buy, "AAPL", 10.0, 500.0).unwrap();

        assert_eq!(next.cash, 0.0);
    }

    #[test]
    fn zero_share_buy_is_rejected() {
        let state = state_with(100.0, &[]);
        assert!(apply_order(&state, Side::Buy, "AAPL", 0.0, 0.0).is_err());
    }

    #[test]
    fn sell_of_unheld_ticker_is_insufficient_shares() {
        let state = state_with(100.0, &[]);
        let err = apply_order(&state, Side::Sell, "AAPL", 1.0, 150.0).unwrap_err();

        assert!(matches!(err, AppError::InsufficientShares { .. }));
    }

    #[test]
    fn sell_of_more_than_held_is_insufficient_shares() {
        let state = state_with(100.0, &[("AAPL", 0.5)]);
        assert!(apply_order(&state, Side::Sell, "AAPL", 1.0, 150.0).is_err());
    }

    #[test]
    fn full_sell_removes_the_holding() {
        let state = state_with(100.0, &[("AAPL", 2.0)]);
        let next = apply_order(&state, Side::Sell, "AAPL", 2.0, 360.5).unwrap();

        assert_eq!(next.cash, 460.5);
        assert!(!next.holdings.contains_key("AAPL"));
    }

    #[test]
    fn partial_sell_keeps_the_remainder() {
        let state = state_with(0.0, &[("AAPL", 2.0)]);
        let next = apply_order(&state, Side::Sell, "AAPL", 0.75, 135.0).unwrap();

        assert_eq!(next.holdings.get("AAPL"), Some(&1.25));
    }

    #[test]
    fn fractional_round_trip_still_zeroes_out() {
        // Three thirds of a share bought and sold back; 3-decimal rounding
        // at each step keeps the final quantity at exactly zero.
        let mut state = state_with(1000.0, &[]);
        for _ in 0..3 {
            state = apply_order(&state, Side::Buy, "AAPL", 0.333, 33.3).unwrap();
        }
        assert_eq!(state.holdings.get("AAPL"), Some(&0.999));

        let next = apply_order(&state, Side::Sell, "AAPL", 0.999, 99.9).unwrap();
        assert!(!next.holdings.contains_key("AAPL"));
        assert_eq!(next.cash, 1000.0);
    }

    #[test]
    fn ticket_from_shares_derives_cost() {
        let ticket = OrderTicket::from_shares(1.5, 123.456).unwrap();
        assert_eq!(ticket.shares, 1.5);
        assert_eq!(ticket.amount, 185.18);
    }

    #[test]
    fn ticket_from_amount_derives_shares() {
        let ticket = OrderTicket::from_amount(100.0, 30.0).unwrap();
        assert_eq!(ticket.amount, 100.0);
        assert_eq!(ticket.shares, 3.333);
    }

    #[test]
    fn ticket_rejects_bad_input() {
        assert!(OrderTicket::from_shares(f64::NAN, 10.0).is_none());
        assert!(OrderTicket::from_shares(1.0, 0.0).is_none());
        assert!(OrderTicket::from_amount(-5.0, 10.0).is_none());
    }
}
