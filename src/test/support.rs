use std::sync::Arc;

use axum::Router;
use rust_decimal::Decimal;
use tokio::net::TcpListener;

use crate::{
    api::{MockCryptoProvider, MockHistoryProvider, MockSymbolList},
    config::{Catalog, Config},
    models::Quote,
    services::{MarketService, Providers},
};

pub fn quote(symbol: &str, percent_change: Decimal) -> Quote {
    Quote::new(symbol.to_string(), None, None, Some(percent_change))
}

pub fn symbols(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

pub fn service(
    history: MockHistoryProvider,
    listing: MockSymbolList,
    crypto: MockCryptoProvider,
) -> MarketService {
    MarketService::new(
        Config::mock(),
        Catalog::default(),
        Providers::new(Arc::new(history), Arc::new(listing), Arc::new(crypto)),
    )
}

/// Serves `app` on an ephemeral local port and returns its base URL.
pub async fn spawn_router(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}
