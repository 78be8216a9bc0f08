pub mod crypto_price;
pub mod index_snapshot;
pub mod instrument;
pub mod movers_report;
pub mod price_point;
pub mod quote;
pub mod ranking;
pub mod universe;

pub use crypto_price::CryptoPrice;
pub use index_snapshot::IndexSnapshot;
pub use instrument::{CryptoAsset, IndexInstrument};
pub use movers_report::MoversReport;
pub use price_point::PricePoint;
pub use quote::Quote;
pub use ranking::Ranking;
pub use universe::Universe;
