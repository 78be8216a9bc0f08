use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::provider::{CoinPrice, CryptoPriceProvider, PriceHistoryProvider, SymbolListProvider};
use crate::{
    error::FetchError,
    models::{PricePoint, Universe},
};

const HANG_FOR: Duration = Duration::from_secs(3600);

/// Scripted answer of the mock history provider for one symbol.
#[derive(Clone, Debug)]
pub enum MockHistory {
    Closes(Vec<Decimal>),
    Fail(FetchError),
    /// Never answers within any sane request timeout.
    Hang,
}

#[derive(Clone, Debug, Default)]
pub struct MockHistoryProvider {
    histories: HashMap<String, MockHistory>,
    synthesize_unknown: bool,
}

impl MockHistoryProvider {
    pub fn new(histories: HashMap<String, MockHistory>) -> Self {
        Self {
            histories,
            synthesize_unknown: false,
        }
    }

    /// Offline data set: every symbol gets deterministic synthetic closes.
    pub fn sample() -> Self {
        Self {
            histories: HashMap::new(),
            synthesize_unknown: true,
        }
    }

    pub fn with_closes(mut self, symbol: &str, closes: Vec<Decimal>) -> Self {
        self.histories
            .insert(symbol.to_string(), MockHistory::Closes(closes));
        self
    }

    pub fn with_failure(mut self, symbol: &str, err: FetchError) -> Self {
        self.histories
            .insert(symbol.to_string(), MockHistory::Fail(err));
        self
    }

    pub fn with_hang(mut self, symbol: &str) -> Self {
        self.histories.insert(symbol.to_string(), MockHistory::Hang);
        self
    }
}

fn session_start() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 2, 21, 0, 0)
        .single()
        .unwrap_or_default()
}

fn to_points(closes: &[Decimal], window: usize) -> Vec<PricePoint> {
    let skip = closes.len().saturating_sub(window);
    closes
        .iter()
        .enumerate()
        .skip(skip)
        .map(|(day, close)| {
            PricePoint::new(session_start() + TimeDelta::days(day as i64), *close)
        })
        .collect()
}

/// Closes within 5% of a per-symbol base price, stable across runs.
pub fn synthetic_closes(symbol: &str, window: usize) -> Vec<Decimal> {
    let seed = symbol
        .bytes()
        .fold(17u64, |acc, b| acc.wrapping_mul(31).wrapping_add(u64::from(b)));
    let base = Decimal::from(20 + seed % 480);

    (0..window)
        .map(|day| {
            let drift = (seed.rotate_left(day as u32 * 7) % 101) as i64 - 50;
            (base + base * Decimal::new(drift, 3)).round_dp(2)
        })
        .collect()
}

#[async_trait]
impl PriceHistoryProvider for MockHistoryProvider {
    async fn fetch_history(
        &self,
        symbol: &str,
        window: usize,
    ) -> Result<Vec<PricePoint>, FetchError> {
        match self.histories.get(symbol) {
            Some(MockHistory::Closes(closes)) => Ok(to_points(closes, window)),
            Some(MockHistory::Fail(err)) => Err(err.clone()),
            Some(MockHistory::Hang) => {
                tokio::time::sleep(HANG_FOR).await;
                Err(FetchError::Timeout(symbol.to_string()))
            }
            None if self.synthesize_unknown => {
                Ok(to_points(&synthetic_closes(symbol, window), window))
            }
            None => Err(FetchError::NotFound(symbol.to_string())),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockSymbolList {
    symbols: Vec<String>,
    failure: Option<FetchError>,
}

impl MockSymbolList {
    pub fn new(symbols: Vec<String>) -> Self {
        Self {
            symbols,
            failure: None,
        }
    }

    pub fn failing(err: FetchError) -> Self {
        Self {
            symbols: Vec::new(),
            failure: Some(err),
        }
    }

    pub fn sample() -> Self {
        Self::new(
            [
                "AAPL", "MSFT", "NVDA", "AMZN", "GOOGL", "META", "BRK.B", "JPM", "XOM", "UNH",
                "JNJ", "V", "PG", "HD", "KO",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
        )
    }
}

#[async_trait]
impl SymbolListProvider for MockSymbolList {
    async fn list_symbols(&self, _universe: Universe) -> Result<Vec<String>, FetchError> {
        match &self.failure {
            Some(err) => Err(err.clone()),
            None => Ok(self.symbols.clone()),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct MockCryptoProvider {
    prices: HashMap<String, CoinPrice>,
    failure: Option<FetchError>,
}

impl MockCryptoProvider {
    pub fn new(prices: HashMap<String, CoinPrice>) -> Self {
        Self {
            prices,
            failure: None,
        }
    }

    pub fn failing(err: FetchError) -> Self {
        Self {
            prices: HashMap::new(),
            failure: Some(err),
        }
    }

    pub fn sample() -> Self {
        let price = |usd: Decimal, change: Decimal| CoinPrice::new(Some(usd), Some(change));
        Self::new(HashMap::from([
            ("bitcoin".to_string(), price(dec!(67012.45), dec!(1.82))),
            ("ethereum".to_string(), price(dec!(3421.07), dec!(-0.64))),
            ("solana".to_string(), price(dec!(162.33), dec!(4.11))),
            ("ripple".to_string(), price(dec!(0.5231), dec!(-2.07))),
        ]))
    }
}

#[async_trait]
impl CryptoPriceProvider for MockCryptoProvider {
    async fn fetch_prices(&self, ids: &[String]) -> Result<HashMap<String, CoinPrice>, FetchError> {
        if let Some(err) = &self.failure {
            return Err(err.clone());
        }

        Ok(ids
            .iter()
            .filter_map(|id| self.prices.get(id).map(|p| (id.clone(), p.clone())))
            .collect())
    }
}
