use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const STATUS_SUCCESS: &str = "success";
pub const STATUS_NOT_ENOUGH_DATA: &str = "Not enough data to calculate change.";
pub const STATUS_NO_DATA: &str = "No data available for the last 7 days.";

/// Per-index record served by the index-data endpoint.
///
/// Failures are carried in `status` with the numeric fields set to `None`
/// so one broken index never fails the whole response.
#[derive(Clone, Debug, Deserialize, Eq, Getters, PartialEq, Serialize, new)]
pub struct IndexSnapshot {
    index: String,
    symbol: String,
    today_close: Option<Decimal>,
    previous_close: Option<Decimal>,
    percent_change: Option<Decimal>,
    status: String,
}

impl IndexSnapshot {
    pub fn unavailable(index: &str, symbol: &str, status: String) -> Self {
        Self::new(
            index.to_string(),
            symbol.to_string(),
            None,
            None,
            None,
            status,
        )
    }

    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}
