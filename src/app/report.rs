use crate::{
    error::FetchError,
    models::{
        IndexInstrument, IndexSnapshot, PricePoint, Quote,
        index_snapshot::{STATUS_NO_DATA, STATUS_NOT_ENOUGH_DATA, STATUS_SUCCESS},
    },
};

use super::{
    calc::quote_from_history,
    utils::{format_optional, format_signed, format_thousands},
};

const ARROW_UP: &str = "▲";
const ARROW_DOWN: &str = "▼";

/// One line of the market digest, e.g. `S&P 500 (via SPY): 5,321.41 ▲ +0.42%`.
pub fn digest_line(
    instrument: &IndexInstrument,
    history: Result<Vec<PricePoint>, FetchError>,
) -> String {
    let name = instrument.name();
    let history = match history {
        Ok(history) if !history.is_empty() => history,
        _ => return format!("{}: No data downloaded for {}.", name, instrument.symbol()),
    };

    let latest = *history[history.len() - 1].close();

    match quote_from_history(instrument.symbol(), &history) {
        Ok(quote) => {
            let change = quote.percent_change().unwrap_or_default();
            let up = quote
                .previous_close()
                .map(|previous| latest >= previous)
                .unwrap_or(true);
            format!(
                "{}: {} {} {}%",
                name,
                format_thousands(latest, 2),
                if up { ARROW_UP } else { ARROW_DOWN },
                format_signed(change, 2)
            )
        }
        Err(FetchError::InsufficientHistory { .. }) => format!(
            "{}: {} (No previous day data for change calculation)",
            name,
            format_thousands(latest, 2)
        ),
        Err(err) => format!("{}: {} ({})", name, format_thousands(latest, 2), err),
    }
}

/// Per-index record for the index-data endpoint; never fails.
pub fn index_snapshot(
    instrument: &IndexInstrument,
    history: Result<Vec<PricePoint>, FetchError>,
) -> IndexSnapshot {
    let (name, symbol) = (instrument.name(), instrument.symbol());

    let history = match history {
        Ok(history) => history,
        Err(err) => return IndexSnapshot::unavailable(name, symbol, format!("Error: {}", err)),
    };

    match history.len() {
        0 => IndexSnapshot::unavailable(name, symbol, STATUS_NO_DATA.to_string()),
        1 => IndexSnapshot::unavailable(name, symbol, STATUS_NOT_ENOUGH_DATA.to_string()),
        _ => match quote_from_history(symbol, &history) {
            Ok(quote) => IndexSnapshot::new(
                name.to_string(),
                symbol.to_string(),
                quote.price().map(|p| p.round_dp(2)),
                quote.previous_close().map(|p| p.round_dp(2)),
                *quote.percent_change(),
                STATUS_SUCCESS.to_string(),
            ),
            Err(err) => IndexSnapshot::unavailable(name, symbol, format!("Error: {}", err)),
        },
    }
}

/// Plain-text table of ranked quotes.
pub fn movers_table(quotes: &[Quote]) -> String {
    let rows: Vec<[String; 3]> = quotes
        .iter()
        .map(|quote| {
            [
                quote.symbol().clone(),
                format_optional(*quote.price(), 2),
                format_optional(*quote.percent_change(), 2),
            ]
        })
        .collect();

    let header = [
        String::from("symbol"),
        String::from("price"),
        String::from("percent_change"),
    ];
    let widths: Vec<usize> = (0..3)
        .map(|col| {
            rows.iter()
                .map(|row| row[col].chars().count())
                .chain(std::iter::once(header[col].len()))
                .max()
                .unwrap_or_default()
        })
        .collect();

    std::iter::once(&header)
        .chain(rows.iter())
        .map(|row| {
            format!(
                "{:>w0$} {:>w1$} {:>w2$}",
                row[0],
                row[1],
                row[2],
                w0 = widths[0],
                w1 = widths[1],
                w2 = widths[2]
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
