use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct IndexInstrument {
    symbol: String,
    name: String,
}

/// A coin as known to CoinGecko, with the name and ticker shown to users.
#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct CryptoAsset {
    id: String,
    name: String,
    symbol: String,
}

impl CryptoAsset {
    /// Builds an asset from a bare CoinGecko id, deriving the display fields
    /// the same way the lookup falls back when a name or symbol is missing.
    pub fn from_id(id: &str) -> Self {
        Self::with_fallbacks(id, None, None)
    }

    pub fn with_fallbacks(id: &str, name: Option<&str>, symbol: Option<&str>) -> Self {
        let name = match name.map(str::trim).filter(|n| !n.is_empty()) {
            Some(name) => name.to_string(),
            None => capitalize(id),
        };
        let symbol = match symbol.map(str::trim).filter(|s| !s.is_empty()) {
            Some(symbol) => symbol.to_string(),
            None => id.chars().take(3).collect::<String>().to_uppercase(),
        };

        Self {
            id: id.to_string(),
            name,
            symbol,
        }
    }
}

fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
