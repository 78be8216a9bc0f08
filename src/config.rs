use std::{str::FromStr, time::Duration};

use anyhow::{Context, Error, Result};
use clap::Args;
use csv::Reader;
use derive_getters::Getters;
use derive_new::new;
use strum_macros::{Display, EnumString};
use tracing::warn;

use crate::models::{CryptoAsset, IndexInstrument};

pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_YAHOO_BASE_URL: &str = "https://query1.finance.yahoo.com";
pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com";
pub const DEFAULT_WIKIPEDIA_BASE_URL: &str = "https://en.wikipedia.org/wiki";
pub const USER_AGENT: &str = concat!("market-digest/", env!("CARGO_PKG_VERSION"));

/// Which provider implementations the service is wired with.
#[derive(Clone, Copy, Debug, Default, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ProviderMode {
    #[default]
    Live,
    Mock,
}

#[derive(Args, Clone, Debug, Getters)]
pub struct Config {
    /// Data source: `live` providers or built-in `mock` data
    #[arg(long, env = "MARKET_DIGEST_MODE", default_value_t = ProviderMode::Live, global = true)]
    mode: ProviderMode,

    /// Per-request timeout in seconds
    #[arg(
        long = "timeout",
        env = "MARKET_DIGEST_TIMEOUT_SECS",
        default_value_t = DEFAULT_TIMEOUT_SECS,
        global = true
    )]
    timeout_secs: u64,

    /// CSV file with `group,id,name,symbol` rows replacing the built-in catalog
    #[arg(long, env = "MARKET_DIGEST_CATALOG", global = true)]
    catalog: Option<String>,

    #[arg(long, env = "YAHOO_BASE_URL", default_value = DEFAULT_YAHOO_BASE_URL, global = true)]
    yahoo_base_url: String,

    #[arg(long, env = "COINGECKO_BASE_URL", default_value = DEFAULT_COINGECKO_BASE_URL, global = true)]
    coingecko_base_url: String,

    #[arg(long, env = "WIKIPEDIA_BASE_URL", default_value = DEFAULT_WIKIPEDIA_BASE_URL, global = true)]
    wikipedia_base_url: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: ProviderMode::default(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            catalog: None,
            yahoo_base_url: DEFAULT_YAHOO_BASE_URL.to_string(),
            coingecko_base_url: DEFAULT_COINGECKO_BASE_URL.to_string(),
            wikipedia_base_url: DEFAULT_WIKIPEDIA_BASE_URL.to_string(),
        }
    }
}

impl Config {
    pub fn mock() -> Self {
        Self {
            mode: ProviderMode::Mock,
            ..Self::default()
        }
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => {
                let path = shellexpand::tilde(path);
                Catalog::from_csv(&path)
            }
            None => Ok(Catalog::default()),
        }
    }
}

#[derive(Clone, Copy, Debug, Display, EnumString, Eq, PartialEq)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum CatalogGroup {
    Index,
    Digest,
    Crypto,
}

/// Instrument lookup tables injected into the market service.
#[derive(Clone, Debug, Eq, Getters, PartialEq, new)]
pub struct Catalog {
    indexes: Vec<IndexInstrument>,
    digest: Vec<IndexInstrument>,
    cryptos: Vec<CryptoAsset>,
}

impl Default for Catalog {
    fn default() -> Self {
        let index = |symbol: &str, name: &str| IndexInstrument::new(symbol.into(), name.into());
        let crypto = |id: &str, name: &str, symbol: &str| {
            CryptoAsset::new(id.into(), name.into(), symbol.into())
        };

        Self {
            indexes: vec![
                index("^GSPC", "S&P 500"),
                index("^DJI", "Dow Jones Industrial Average"),
                index("^RUT", "Russell 2000"),
                index("^IXIC", "Nasdaq Composite"),
            ],
            digest: vec![
                index("SPY", "S&P 500 (via SPY)"),
                index("QQQ", "Nasdaq Composite (via QQQ)"),
                index("DIA", "Dow Jones Industrial Average (via DIA)"),
                index("IWM", "Russell 2000 (via IWM)"),
            ],
            cryptos: vec![
                crypto("bitcoin", "Bitcoin", "BTC"),
                crypto("ethereum", "Ethereum", "ETH"),
                crypto("solana", "Solana", "SOL"),
                crypto("ripple", "XRP", "XRP"),
            ],
        }
    }
}

impl Catalog {
    pub fn from_csv(path: &str) -> Result<Self> {
        let mut reader = Reader::from_path(path)
            .with_context(|| format!("Failed to open catalog CSV at path: {}", path))?;

        let mut indexes = Vec::new();
        let mut digest = Vec::new();
        let mut cryptos = Vec::new();

        for (row_idx, record) in reader.records().enumerate() {
            let rec = record
                .with_context(|| format!("Failed to read catalog record at row {}", row_idx + 1))?;

            if rec.len() < 2 {
                return Err(Error::msg(format!(
                    "Invalid catalog format at row {}: expected at least 2 columns, found {}",
                    row_idx + 1,
                    rec.len()
                )));
            }

            let group = match CatalogGroup::from_str(rec[0].trim()) {
                Ok(group) => group,
                Err(_) => {
                    warn!(
                        "Skipping unknown catalog group '{}' at row {}",
                        &rec[0],
                        row_idx + 1
                    );
                    continue;
                }
            };

            let id = rec[1].trim();
            if id.is_empty() {
                return Err(Error::msg(format!("Empty id at row {}", row_idx + 1)));
            }
            let name = rec.get(2).map(str::trim).filter(|n| !n.is_empty());
            let symbol = rec.get(3);

            match group {
                CatalogGroup::Index => {
                    indexes.push(IndexInstrument::new(id.into(), name.unwrap_or(id).into()))
                }
                CatalogGroup::Digest => {
                    digest.push(IndexInstrument::new(id.into(), name.unwrap_or(id).into()))
                }
                CatalogGroup::Crypto => {
                    cryptos.push(CryptoAsset::with_fallbacks(id, name, symbol))
                }
            }
        }

        Ok(Self::new(indexes, digest, cryptos))
    }

    pub fn crypto_ids(&self) -> Vec<String> {
        self.cryptos.iter().map(|c| c.id().clone()).collect()
    }
}
