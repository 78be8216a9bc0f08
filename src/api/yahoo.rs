use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use super::{
    provider::PriceHistoryProvider,
    utils::{build_client, make_request, parse_response_object},
    yahoo_dto::YahooChartResponseDto,
};
use crate::{error::FetchError, models::PricePoint};

const CHART_ENDPOINT: &str = "v8/finance/chart";

/// Daily closes from the Yahoo Finance chart API.
#[derive(Clone, Debug)]
pub struct YahooApi {
    client: Client,
    base_url: String,
}

impl YahooApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(timeout)?,
            base_url: base_url.to_string(),
        })
    }
}

/// Smallest chart range holding `window` trading days.
pub fn chart_range(window: usize) -> &'static str {
    match window {
        0..=5 => "5d",
        6..=21 => "1mo",
        22..=63 => "3mo",
        64..=252 => "1y",
        _ => "5y",
    }
}

/// Yahoo spells share classes with a dash (`BRK-B`), listings use a dot.
pub fn request_symbol(symbol: &str) -> String {
    symbol.trim().replace('.', "-")
}

#[async_trait]
impl PriceHistoryProvider for YahooApi {
    async fn fetch_history(
        &self,
        symbol: &str,
        window: usize,
    ) -> Result<Vec<PricePoint>, FetchError> {
        let endpoint = format!("{}/{}", CHART_ENDPOINT, request_symbol(symbol));
        let params = [("range", chart_range(window)), ("interval", "1d")];
        let res = make_request(&self.client, &self.base_url, &endpoint, symbol, &params).await?;

        let chart = parse_response_object::<YahooChartResponseDto>(
            res,
            &format!("Failed to parse Yahoo chart for {}", symbol),
        )?;

        let mut points = chart.to_price_points(symbol)?;
        if points.len() > window {
            points.drain(..points.len() - window);
        }

        debug!(symbol, observations = points.len(), "Fetched history");
        Ok(points)
    }
}
