use chrono::{TimeZone, Utc};
use derive_getters::Getters;
use derive_new::new;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{error::FetchError, models::PricePoint};

#[derive(Debug, Deserialize, Getters, new)]
pub struct YahooChartResponseDto {
    chart: YahooChartDto,
}

#[derive(Debug, Deserialize, Getters, new)]
pub struct YahooChartDto {
    result: Option<Vec<YahooChartResultDto>>,
    error: Option<YahooChartErrorDto>,
}

#[derive(Debug, Deserialize, Getters, new)]
pub struct YahooChartResultDto {
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: YahooIndicatorsDto,
}

#[derive(Debug, Deserialize, Getters, new)]
pub struct YahooIndicatorsDto {
    #[serde(default)]
    quote: Vec<YahooQuoteSeriesDto>,
}

#[derive(Debug, Deserialize, Getters, new)]
pub struct YahooQuoteSeriesDto {
    #[serde(default)]
    close: Vec<Option<Decimal>>,
}

#[derive(Debug, Deserialize, Getters, new)]
pub struct YahooChartErrorDto {
    code: String,
    description: Option<String>,
}

impl YahooChartResponseDto {
    /// Pairs timestamps with closes, skipping sessions without a close.
    pub fn to_price_points(&self, symbol: &str) -> Result<Vec<PricePoint>, FetchError> {
        if let Some(error) = &self.chart.error {
            return Err(FetchError::NotFound(format!(
                "{} ({}: {})",
                symbol,
                error.code,
                error.description.as_deref().unwrap_or("no description")
            )));
        }

        let result = self
            .chart
            .result
            .as_ref()
            .and_then(|results| results.first())
            .ok_or_else(|| FetchError::NotFound(symbol.to_string()))?;

        let closes = result
            .indicators
            .quote
            .first()
            .map(|series| series.close.as_slice())
            .unwrap_or_default();

        if closes.len() != result.timestamp.len() {
            return Err(FetchError::Malformed(format!(
                "{}: {} timestamps but {} closes",
                symbol,
                result.timestamp.len(),
                closes.len()
            )));
        }

        Ok(result
            .timestamp
            .iter()
            .zip(closes)
            .filter_map(|(ts, close)| {
                let timestamp = Utc.timestamp_opt(*ts, 0).single()?;
                Some(PricePoint::new(timestamp, (*close)?))
            })
            .collect())
    }
}
