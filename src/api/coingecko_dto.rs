use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Deserialize;

use super::provider::CoinPrice;

#[derive(Debug, Deserialize, Getters, new)]
pub struct CoinGeckoSimplePriceDto {
    usd: Option<Decimal>,
    usd_24h_change: Option<Decimal>,
}

impl CoinGeckoSimplePriceDto {
    pub fn to_coin_price(&self) -> CoinPrice {
        CoinPrice::new(self.usd, self.usd_24h_change)
    }
}
