use thiserror::Error;

use crate::external::price_provider::MarketDataError;
use crate::store::profile_store::ProfileStoreError;

/// Top-level error taxonomy.
///
/// Order errors (`InsufficientFunds`, `InsufficientShares`) abort the order
/// with no state change and are meant to be shown to the user directly.
/// Network errors are logged at the call site and the caller continues on
/// stale or default data; nothing in this crate retries.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("insufficient funds: order costs ${needed:.2}, only ${available:.2} available")]
    InsufficientFunds { needed: f64, available: f64 },

    #[error("insufficient shares of {ticker}: selling {requested:.3}, holding {held:.3}")]
    InsufficientShares {
        ticker: String,
        requested: f64,
        held: f64,
    },

    #[error("market data unavailable: {0}")]
    MarketDataUnavailable(#[from] MarketDataError),

    #[error("profile load failed: {0}")]
    ProfileLoadFailed(ProfileStoreError),

    #[error("profile save failed: {0}")]
    ProfileSaveFailed(ProfileStoreError),
}
