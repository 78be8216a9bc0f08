use std::{sync::Arc, time::Instant};

use anyhow::{Context, Result};
use futures_util::future::join_all;
use tracing::{info, warn};

use crate::{
    api::{
        CoinGeckoApi, CryptoPriceProvider, MockCryptoProvider, MockHistoryProvider,
        MockSymbolList, PriceHistoryProvider, SymbolListProvider, WikipediaApi, YahooApi,
    },
    app::{
        BatchFetcher,
        fetcher::DEFAULT_CONCURRENCY,
        rank,
        report::{digest_line, index_snapshot},
    },
    config::{Catalog, Config, ProviderMode},
    error::FetchError,
    models::{CryptoPrice, IndexSnapshot, MoversReport, PricePoint, Universe},
};

/// Trading days requested for index and digest lookups (about a calendar week).
pub const INDEX_LOOKBACK: usize = 5;

pub const CRYPTO_TIMEOUT_MESSAGE: &str = "The request to CoinGecko timed out.";

/// The provider implementations a service is wired with.
#[derive(Clone)]
pub struct Providers {
    history: Arc<dyn PriceHistoryProvider>,
    symbols: Arc<dyn SymbolListProvider>,
    crypto: Arc<dyn CryptoPriceProvider>,
}

impl Providers {
    pub fn new(
        history: Arc<dyn PriceHistoryProvider>,
        symbols: Arc<dyn SymbolListProvider>,
        crypto: Arc<dyn CryptoPriceProvider>,
    ) -> Self {
        Self {
            history,
            symbols,
            crypto,
        }
    }

    pub fn live(config: &Config) -> Result<Self> {
        let timeout = config.request_timeout();
        let yahoo = YahooApi::new(config.yahoo_base_url(), timeout)
            .context("Failed to build Yahoo client")?;
        let wikipedia = WikipediaApi::new(config.wikipedia_base_url(), timeout)
            .context("Failed to build Wikipedia client")?;
        let coingecko = CoinGeckoApi::new(config.coingecko_base_url(), timeout)
            .context("Failed to build CoinGecko client")?;

        Ok(Self::new(
            Arc::new(yahoo),
            Arc::new(wikipedia),
            Arc::new(coingecko),
        ))
    }

    pub fn mock() -> Self {
        Self::new(
            Arc::new(MockHistoryProvider::sample()),
            Arc::new(MockSymbolList::sample()),
            Arc::new(MockCryptoProvider::sample()),
        )
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        match config.mode() {
            ProviderMode::Live => Self::live(config),
            ProviderMode::Mock => Ok(Self::mock()),
        }
    }
}

pub struct MarketService {
    config: Config,
    catalog: Catalog,
    providers: Providers,
}

impl MarketService {
    pub fn new(config: Config, catalog: Catalog, providers: Providers) -> Self {
        Self {
            config,
            catalog,
            providers,
        }
    }

    pub fn from_config(config: Config) -> Result<Self> {
        let catalog = config.load_catalog()?;
        let providers = Providers::from_config(&config)?;
        info!("Using {} providers", config.mode());
        Ok(Self::new(config, catalog, providers))
    }

    pub fn fetcher(&self, concurrency: usize, lookback: usize) -> Result<BatchFetcher> {
        BatchFetcher::new(
            self.providers.history.clone(),
            concurrency,
            lookback,
            self.config.request_timeout(),
        )
    }

    /// Scans `universe` and ranks its biggest movers.
    ///
    /// Fails only when the universe itself cannot be listed; individual
    /// symbols that cannot be fetched are left out of the ranking.
    pub async fn top_movers(
        &self,
        universe: Universe,
        top_n: usize,
        concurrency: usize,
        lookback: usize,
    ) -> Result<MoversReport> {
        let started = Instant::now();
        let fetcher = self.fetcher(concurrency, lookback)?;

        let symbols = self
            .providers
            .symbols
            .list_symbols(universe)
            .await
            .with_context(|| format!("Failed to list symbols for {}", universe))?;

        info!(
            "Fetching top movers for {} {} symbols with {} workers ({} sessions each)...",
            symbols.len(),
            universe,
            fetcher.concurrency(),
            fetcher.lookback()
        );

        let quotes = fetcher.fetch_all(&symbols).await;
        if quotes.is_empty() {
            warn!("No data collected for any {} symbol", universe);
        }

        let ranking = rank(&quotes, top_n);

        Ok(MoversReport::new(
            universe.to_string(),
            symbols.len(),
            quotes.len(),
            ranking,
            started.elapsed(),
        ))
    }

    /// Latest and previous close of every catalog index, in catalog order.
    pub async fn index_data(&self) -> Result<Vec<IndexSnapshot>> {
        let fetcher = self.fetcher(DEFAULT_CONCURRENCY, INDEX_LOOKBACK)?;

        Ok(join_all(self.catalog.indexes().iter().map(|instrument| {
            let fetcher = &fetcher;
            async move { index_snapshot(instrument, fetcher.fetch_history(instrument.symbol()).await) }
        }))
        .await)
    }

    pub async fn market_digest(&self) -> Result<String> {
        let fetcher = self.fetcher(DEFAULT_CONCURRENCY, INDEX_LOOKBACK)?;

        let lines = join_all(self.catalog.digest().iter().map(|instrument| {
            let fetcher = &fetcher;
            async move {
                info!("Fetching data for {} ({})...", instrument.name(), instrument.symbol());
                digest_line(instrument, fetcher.fetch_history(instrument.symbol()).await)
            }
        }))
        .await;

        Ok(lines.join("\n"))
    }

    /// Spot prices for the catalog coins, in catalog order.
    ///
    /// A coin missing from the upstream answer is reported with a status
    /// marker; only a failed upstream call fails the whole result. Timeouts,
    /// whether raised by the client or by the deadline here, all carry
    /// [`CRYPTO_TIMEOUT_MESSAGE`].
    pub async fn crypto_prices(&self) -> Result<Vec<CryptoPrice>, FetchError> {
        let ids = self.catalog.crypto_ids();
        let prices = tokio::time::timeout(
            self.config.request_timeout(),
            self.providers.crypto.fetch_prices(&ids),
        )
        .await
        .unwrap_or_else(|_| Err(FetchError::Timeout(String::new())))
        .map_err(|err| match err {
            FetchError::Timeout(_) => FetchError::Timeout(CRYPTO_TIMEOUT_MESSAGE.to_string()),
            other => other,
        })?;

        Ok(self
            .catalog
            .cryptos()
            .iter()
            .map(|asset| match prices.get(asset.id()) {
                Some(price) if price.usd().is_some() => CryptoPrice::new(
                    asset.name().clone(),
                    asset.symbol().clone(),
                    *price.usd(),
                    *price.usd_24h_change(),
                    None,
                ),
                _ => CryptoPrice::unavailable(asset.name(), asset.symbol()),
            })
            .collect())
    }

    /// Raw trailing history per symbol, failures reported inline.
    pub async fn history(
        &self,
        symbols: &[String],
        window: usize,
    ) -> Result<Vec<(String, Result<Vec<PricePoint>, FetchError>)>> {
        let fetcher = self.fetcher(DEFAULT_CONCURRENCY, window)?;

        Ok(join_all(symbols.iter().map(|symbol| {
            let fetcher = &fetcher;
            async move { (symbol.clone(), fetcher.fetch_history(symbol).await) }
        }))
        .await)
    }
}
