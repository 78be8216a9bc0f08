pub mod market_service;

pub use market_service::{MarketService, Providers};
