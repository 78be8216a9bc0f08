#[cfg(test)]
mod tests {
    use std::{sync::Arc, time::Duration};

    use axum::{Router, routing::get};
    use reqwest::StatusCode;
    use serde_json::Value;

    use crate::{
        api::{CoinGeckoApi, MockCryptoProvider, MockHistoryProvider, MockSymbolList},
        config::{Catalog, Config},
        error::FetchError,
        server::router,
        services::{MarketService, Providers, market_service::CRYPTO_TIMEOUT_MESSAGE},
        test::support::{service, spawn_router},
    };

    async fn spawn(service: MarketService) -> String {
        spawn_router(router(Arc::new(service))).await
    }

    fn sample_service() -> MarketService {
        service(
            MockHistoryProvider::sample(),
            MockSymbolList::sample(),
            MockCryptoProvider::sample(),
        )
    }

    #[tokio::test]
    async fn crypto_prices_endpoint_works() {
        let base = spawn(sample_service()).await;

        let res = reqwest::get(format!("{}/api/crypto-prices", base)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = res.json().await.unwrap();
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0]["name"], "Bitcoin");
        assert_eq!(entries[0]["symbol"], "BTC");
        assert!(entries[0]["price_usd"].is_number());
        assert!(entries[0]["24hr_change_percent"].is_number());
    }

    #[tokio::test]
    async fn crypto_prices_endpoint_fails_with_upstream() {
        let service = service(
            MockHistoryProvider::sample(),
            MockSymbolList::sample(),
            MockCryptoProvider::failing(FetchError::Network("connection refused".to_string())),
        );
        let base = spawn(service).await;

        let res = reqwest::get(format!("{}/api/crypto-prices", base)).await.unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = res.json().await.unwrap();
        let message = body["error"].as_str().unwrap();
        assert!(message.starts_with("Failed to fetch data from CoinGecko"));
    }

    #[tokio::test]
    async fn crypto_prices_endpoint_reports_client_timeout() {
        let upstream = spawn_router(Router::new().route(
            "/api/v3/simple/price",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "{}"
            }),
        ))
        .await;
        let coingecko = CoinGeckoApi::new(&upstream, Duration::from_millis(200)).unwrap();
        let service = MarketService::new(
            Config::mock(),
            Catalog::default(),
            Providers::new(
                Arc::new(MockHistoryProvider::sample()),
                Arc::new(MockSymbolList::sample()),
                Arc::new(coingecko),
            ),
        );
        let base = spawn(service).await;

        let res = reqwest::get(format!("{}/api/crypto-prices", base)).await.unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = res.json().await.unwrap();
        assert_eq!(body["error"], CRYPTO_TIMEOUT_MESSAGE);
    }

    #[tokio::test]
    async fn index_data_endpoint_works() {
        let base = spawn(sample_service()).await;

        let res = reqwest::get(format!("{}/api/index-data", base)).await.unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = res.json().await.unwrap();
        let entries = body.as_array().unwrap();
        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0]["index"], "S&P 500");
        assert_eq!(entries[0]["status"], "success");
    }

    #[tokio::test]
    async fn top_movers_endpoint_works() {
        let base = spawn(sample_service()).await;

        let res = reqwest::get(format!("{}/api/top-movers?universe=dow30&top_n=2", base))
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);

        let body: Value = res.json().await.unwrap();
        assert_eq!(body["universe"], "dow30");
        assert_eq!(body["gainers"].as_array().unwrap().len(), 2);
        assert_eq!(body["losers"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn top_movers_endpoint_fails_without_universe() {
        let service = service(
            MockHistoryProvider::sample(),
            MockSymbolList::failing(FetchError::Network("timeout".to_string())),
            MockCryptoProvider::sample(),
        );
        let base = spawn(service).await;

        let res = reqwest::get(format!("{}/api/top-movers", base)).await.unwrap();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = res.json().await.unwrap();
        assert!(body["error"].as_str().unwrap().contains("sp500"));
    }
}
