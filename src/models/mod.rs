mod learning;
mod portfolio;
mod profile;
mod screener;
mod signal;
mod valuation;

pub use learning::{LearningProgress, POINTS_PER_ARTICLE};
pub use portfolio::{round_money, round_shares, Holdings, PortfolioState, Side};
pub use profile::{ProfileDocument, RawProfile, UserProfile, DEFAULT_STARTING_CASH};
pub use screener::{RiskBand, ScreenerQuery, StockEntry};
pub use signal::Signal;
pub use valuation::ValuationPoint;
