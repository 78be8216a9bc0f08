use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Snapshot of one symbol after a history fetch.
///
/// Built once from the two most recent observations and never mutated.
/// `percent_change` is already rounded to two decimals.
#[derive(Clone, Debug, Deserialize, Eq, Getters, Hash, PartialEq, Serialize, new)]
pub struct Quote {
    symbol: String,
    price: Option<Decimal>,
    previous_close: Option<Decimal>,
    percent_change: Option<Decimal>,
}
