pub mod fmp;
pub mod price_provider;
