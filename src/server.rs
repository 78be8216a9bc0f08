use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use serde::Deserialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tracing::{error, info};

use crate::{
    app::{
        fetcher::{DEFAULT_CONCURRENCY, DEFAULT_LOOKBACK},
        ranker::DEFAULT_TOP_N,
    },
    error::FetchError,
    models::{CryptoPrice, IndexSnapshot, Universe},
    services::MarketService,
};

/// Error body returned with a 500 status: `{"error": "<message>"}`.
#[derive(Debug)]
pub struct ApiError(String);

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", self.0);
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": self.0 })),
        )
            .into_response()
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(err: anyhow::Error) -> Self {
        ApiError(format!("{:#}", err))
    }
}


#[derive(Debug, Default, Deserialize)]
pub struct MoversQuery {
    universe: Option<Universe>,
    top_n: Option<usize>,
}

pub fn router(service: Arc<MarketService>) -> Router {
    Router::new()
        .route("/api/crypto-prices", get(crypto_prices))
        .route("/api/index-data", get(index_data))
        .route("/api/top-movers", get(top_movers))
        .with_state(service)
}

pub async fn serve(service: Arc<MarketService>, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr).await?;
    info!("Starting HTTP server on http://{}", listener.local_addr()?);
    axum::serve(listener, router(service)).await?;
    Ok(())
}

async fn crypto_prices(
    State(service): State<Arc<MarketService>>,
) -> Result<Json<Vec<CryptoPrice>>, ApiError> {
    let prices = service.crypto_prices().await.map_err(|err| match err {
        FetchError::Timeout(message) => ApiError(message),
        other => ApiError(format!("Failed to fetch data from CoinGecko: {}", other)),
    })?;
    Ok(Json(prices))
}

async fn index_data(
    State(service): State<Arc<MarketService>>,
) -> Result<Json<Vec<IndexSnapshot>>, ApiError> {
    Ok(Json(service.index_data().await?))
}

async fn top_movers(
    State(service): State<Arc<MarketService>>,
    Query(query): Query<MoversQuery>,
) -> Result<Json<Value>, ApiError> {
    let universe = query.universe.unwrap_or(Universe::Sp500);
    let top_n = query.top_n.unwrap_or(DEFAULT_TOP_N);

    let report = service
        .top_movers(universe, top_n, DEFAULT_CONCURRENCY, DEFAULT_LOOKBACK)
        .await?;

    Ok(Json(json!({
        "universe": report.universe(),
        "requested": report.requested(),
        "fetched": report.fetched(),
        "gainers": report.ranking().gainers(),
        "losers": report.ranking().losers(),
    })))
}
