//! Headless core of the Minvest financial-literacy app.
//!
//! Covers the two screens' worth of behavior that is not UI: the Simvest
//! paper-trading simulator (portfolio snapshots, order entry, valuation
//! reconciliation, moving-average signals, the stock screener) and the
//! MinvestEd progress tracker (module progress and points). State is held
//! in immutable [`models::PortfolioState`] / [`models::LearningProgress`]
//! snapshots and mutated only through pure reducers in [`services`];
//! everything remote (profile store, market data, screener universe) sits
//! behind clients in [`store`] and [`external`].

pub mod errors;
pub mod external;
pub mod logging;
pub mod models;
pub mod services;
pub mod store;

pub use errors::AppError;
