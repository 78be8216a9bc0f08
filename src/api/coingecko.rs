use std::{collections::HashMap, time::Duration};

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, warn};

use super::{
    coingecko_dto::CoinGeckoSimplePriceDto,
    provider::{CoinPrice, CryptoPriceProvider},
    utils::{build_client, make_request},
};
use crate::error::FetchError;

const SIMPLE_PRICE_ENDPOINT: &str = "api/v3/simple/price";

#[derive(Clone, Debug)]
pub struct CoinGeckoApi {
    client: Client,
    base_url: String,
}

impl CoinGeckoApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.to_string(),
        })
    }
}

/// Maps a `simple/price` payload to coin prices.
///
/// Ids missing from the payload are simply absent from the map; entries that
/// fail to parse are dropped with a warning.
pub fn parse_simple_price(data: Value) -> Result<HashMap<String, CoinPrice>, FetchError> {
    let Value::Object(entries) = data else {
        return Err(FetchError::Malformed(
            "Unexpected CoinGecko response format: not an object".to_string(),
        ));
    };

    let mut prices = HashMap::with_capacity(entries.len());
    for (id, entry) in entries {
        match serde_json::from_value::<CoinGeckoSimplePriceDto>(entry) {
            Ok(dto) => {
                prices.insert(id, dto.to_coin_price());
            }
            Err(err) => warn!("Failed to parse CoinGecko price for {}: {}", id, err),
        }
    }

    Ok(prices)
}

#[async_trait]
impl CryptoPriceProvider for CoinGeckoApi {
    async fn fetch_prices(&self, ids: &[String]) -> Result<HashMap<String, CoinPrice>, FetchError> {
        let joined = ids.join(",");
        let params = [
            ("ids", joined.as_str()),
            ("vs_currencies", "usd"),
            ("include_24hr_change", "true"),
        ];
        let res = make_request(
            &self.client,
            &self.base_url,
            SIMPLE_PRICE_ENDPOINT,
            &joined,
            &params,
        )
        .await?;

        let prices = parse_simple_price(res)?;
        debug!(requested = ids.len(), received = prices.len(), "Fetched crypto prices");
        Ok(prices)
    }
}
