use rust_decimal::Decimal;

use crate::{
    error::FetchError,
    models::{PricePoint, Quote},
};

/// Percentage move from `previous` to `latest`, rounded to two decimals.
///
/// A zero `previous` yields zero instead of failing. `None` means the
/// computation overflowed.
pub fn percent_change(latest: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return Some(Decimal::ZERO);
    }

    latest
        .checked_sub(previous)?
        .checked_div(previous)?
        .checked_mul(Decimal::ONE_HUNDRED)
        .map(|change| change.round_dp(2))
}

/// Builds a quote from the two most recent observations of `history`.
pub fn quote_from_history(symbol: &str, history: &[PricePoint]) -> Result<Quote, FetchError> {
    let [.., previous, latest] = history else {
        return Err(FetchError::InsufficientHistory {
            symbol: symbol.to_string(),
            observations: history.len(),
        });
    };

    let change = percent_change(*latest.close(), *previous.close())
        .ok_or_else(|| FetchError::Arithmetic(symbol.to_string()))?;

    Ok(Quote::new(
        symbol.to_string(),
        Some(*latest.close()),
        Some(*previous.close()),
        Some(change),
    ))
}
