pub mod indicators;
pub mod learning_service;
pub mod portfolio_service;
pub mod screener_service;
pub mod signal_service;
pub mod valuation_service;
