pub mod coingecko;
pub mod coingecko_dto;
pub mod mock;
pub mod provider;
pub mod utils;
pub mod wikipedia;
pub mod yahoo;
pub mod yahoo_dto;

pub use coingecko::CoinGeckoApi;
pub use mock::{MockCryptoProvider, MockHistory, MockHistoryProvider, MockSymbolList};
pub use provider::{CoinPrice, CryptoPriceProvider, PriceHistoryProvider, SymbolListProvider};
pub use wikipedia::WikipediaApi;
pub use yahoo::YahooApi;
