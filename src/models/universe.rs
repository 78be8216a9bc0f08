use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// A named list of symbols that can be scanned for movers.
#[derive(Clone, Copy, Debug, Deserialize, Display, EnumString, Eq, Hash, PartialEq, Serialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(rename_all = "lowercase")]
pub enum Universe {
    Sp500,
    Nasdaq100,
    Dow30,
}

impl Universe {
    /// Wikipedia article holding the constituents table.
    pub fn wiki_page(&self) -> &'static str {
        match self {
            Universe::Sp500 => "List_of_S%26P_500_companies",
            Universe::Nasdaq100 => "Nasdaq-100",
            Universe::Dow30 => "Dow_Jones_Industrial_Average",
        }
    }

    /// Header text of the column holding the ticker symbol.
    pub fn symbol_column(&self) -> &'static str {
        match self {
            Universe::Sp500 | Universe::Dow30 => "Symbol",
            Universe::Nasdaq100 => "Ticker",
        }
    }
}
