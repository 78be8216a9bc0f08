use std::collections::HashMap;

use async_trait::async_trait;
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;

use crate::{
    error::FetchError,
    models::{PricePoint, Universe},
};

/// Source of daily closing prices.
#[async_trait]
pub trait PriceHistoryProvider: Send + Sync {
    /// Returns up to `window` trailing observations ordered oldest first.
    async fn fetch_history(&self, symbol: &str, window: usize)
    -> Result<Vec<PricePoint>, FetchError>;
}

/// Source of the symbols making up a universe.
#[async_trait]
pub trait SymbolListProvider: Send + Sync {
    async fn list_symbols(&self, universe: Universe) -> Result<Vec<String>, FetchError>;
}

/// USD spot price and 24h change for one coin.
#[derive(Clone, Debug, Default, Eq, Getters, PartialEq, new)]
pub struct CoinPrice {
    usd: Option<Decimal>,
    usd_24h_change: Option<Decimal>,
}

/// Source of crypto spot prices keyed by provider id.
#[async_trait]
pub trait CryptoPriceProvider: Send + Sync {
    async fn fetch_prices(&self, ids: &[String]) -> Result<HashMap<String, CoinPrice>, FetchError>;
}
