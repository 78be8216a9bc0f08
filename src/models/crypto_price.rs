use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const STATUS_DATA_NOT_AVAILABLE: &str = "Data not available";

#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct CryptoPrice {
    name: String,
    symbol: String,
    price_usd: Option<Decimal>,
    #[serde(rename = "24hr_change_percent")]
    change_24h_percent: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    status: Option<String>,
}

impl CryptoPrice {
    pub fn unavailable(name: &str, symbol: &str) -> Self {
        Self::new(
            name.to_string(),
            symbol.to_string(),
            None,
            None,
            Some(STATUS_DATA_NOT_AVAILABLE.to_string()),
        )
    }
}
