use std::{sync::Arc, time::Duration};

use anyhow::{Error, Result};
use futures_util::{StreamExt, stream};
use tracing::{debug, info, warn};

use super::calc::quote_from_history;
use crate::{
    api::PriceHistoryProvider,
    error::FetchError,
    models::{PricePoint, Quote},
};

pub const DEFAULT_CONCURRENCY: usize = 10;
pub const DEFAULT_LOOKBACK: usize = 5;
pub const PROGRESS_INTERVAL: usize = 50;

/// Best-effort batch fetch of quotes with a cap on requests in flight.
///
/// Every symbol is fetched independently; failures, timeouts and short
/// histories drop the symbol from the result without failing the batch.
#[derive(Clone)]
pub struct BatchFetcher {
    provider: Arc<dyn PriceHistoryProvider>,
    concurrency: usize,
    lookback: usize,
    request_timeout: Duration,
}

impl BatchFetcher {
    pub fn new(
        provider: Arc<dyn PriceHistoryProvider>,
        concurrency: usize,
        lookback: usize,
        request_timeout: Duration,
    ) -> Result<Self> {
        if concurrency == 0 {
            return Err(Error::msg("Concurrency limit must be at least 1"));
        }
        if lookback < 2 {
            return Err(Error::msg(format!(
                "Lookback must cover at least 2 observations, got {}",
                lookback
            )));
        }

        Ok(Self {
            provider,
            concurrency,
            lookback,
            request_timeout,
        })
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    pub fn lookback(&self) -> usize {
        self.lookback
    }

    pub async fn fetch_history(&self, symbol: &str) -> Result<Vec<PricePoint>, FetchError> {
        tokio::time::timeout(
            self.request_timeout,
            self.provider.fetch_history(symbol, self.lookback),
        )
        .await
        .map_err(|_| {
            FetchError::Timeout(format!("{} after {:?}", symbol, self.request_timeout))
        })?
    }

    pub async fn fetch_quote(&self, symbol: &str) -> Result<Quote, FetchError> {
        let history = self.fetch_history(symbol).await?;
        quote_from_history(symbol, &history)
    }

    /// Fetches every symbol and returns the quotes that succeeded, in
    /// completion order. Duplicated symbols are fetched once per occurrence.
    pub async fn fetch_all(&self, symbols: &[String]) -> Vec<Quote> {
        let total = symbols.len();
        let mut completions = stream::iter(symbols.iter().cloned())
            .map(|symbol| {
                let fetcher = self.clone();
                tokio::spawn(async move {
                    let result = fetcher.fetch_quote(&symbol).await;
                    (symbol, result)
                })
            })
            .buffer_unordered(self.concurrency);

        let mut quotes = Vec::with_capacity(total);
        let mut processed = 0;

        while let Some(joined) = completions.next().await {
            processed += 1;
            match joined {
                Ok((_, Ok(quote))) => quotes.push(quote),
                Ok((symbol, Err(err))) => debug!("Skipping {}: {}", symbol, err),
                Err(err) => warn!("Fetch task aborted: {}", err),
            }

            if processed % PROGRESS_INTERVAL == 0 || processed == total {
                info!("Processed {}/{} symbols...", processed, total);
            }
        }

        quotes
    }
}
