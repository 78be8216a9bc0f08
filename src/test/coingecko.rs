#[cfg(test)]
mod tests {
    use std::{collections::HashMap, time::Duration};

    use axum::{
        Json, Router,
        extract::Query,
        http::StatusCode,
        response::{IntoResponse, Response},
        routing::get,
    };
    use rust_decimal_macros::dec;
    use serde_json::json;

    use crate::{
        api::{CoinGeckoApi, CryptoPriceProvider, coingecko::parse_simple_price},
        error::FetchError,
        test::support::{spawn_router, symbols},
    };

    #[test]
    fn parse_simple_price_works() {
        let data = json!({
            "bitcoin": { "usd": 67000.5, "usd_24h_change": 1.25 },
            "solana": { "usd": 150 }
        });

        let prices = parse_simple_price(data).unwrap();

        assert_eq!(prices.len(), 2);
        assert_eq!(*prices["bitcoin"].usd(), Some(dec!(67000.5)));
        assert_eq!(*prices["bitcoin"].usd_24h_change(), Some(dec!(1.25)));
        assert_eq!(*prices["solana"].usd(), Some(dec!(150)));
        assert_eq!(*prices["solana"].usd_24h_change(), None);
    }

    #[test]
    fn non_object_payload_is_malformed() {
        let err = parse_simple_price(json!(["bitcoin"])).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    async fn simple_price(Query(params): Query<HashMap<String, String>>) -> Response {
        let expected = [
            ("ids", "bitcoin,ethereum"),
            ("vs_currencies", "usd"),
            ("include_24hr_change", "true"),
        ];
        if !expected
            .iter()
            .all(|(key, value)| params.get(*key).map(String::as_str) == Some(*value))
        {
            return StatusCode::BAD_REQUEST.into_response();
        }

        Json(json!({
            "bitcoin": { "usd": 67000.5, "usd_24h_change": 1.25 },
            "ethereum": { "usd": 3400 }
        }))
        .into_response()
    }

    #[tokio::test]
    async fn fetch_prices_works() {
        let base =
            spawn_router(Router::new().route("/api/v3/simple/price", get(simple_price))).await;
        let api = CoinGeckoApi::new(&base, Duration::from_secs(5)).unwrap();

        let prices = api
            .fetch_prices(&symbols(&["bitcoin", "ethereum"]))
            .await
            .unwrap();

        assert_eq!(*prices["bitcoin"].usd(), Some(dec!(67000.5)));
        assert_eq!(*prices["ethereum"].usd(), Some(dec!(3400)));
        assert_eq!(*prices["ethereum"].usd_24h_change(), None);

        let err = api.fetch_prices(&symbols(&["solana"])).await.unwrap_err();
        assert!(matches!(err, FetchError::Network(_)));
    }

    #[tokio::test]
    async fn fetch_prices_reports_missing_endpoint() {
        let base = spawn_router(Router::new()).await;
        let api = CoinGeckoApi::new(&base, Duration::from_secs(5)).unwrap();

        let err = api.fetch_prices(&symbols(&["bitcoin"])).await.unwrap_err();
        assert_eq!(err, FetchError::NotFound("bitcoin".to_string()));
    }

    #[tokio::test]
    async fn slow_upstream_times_out() {
        let base = spawn_router(Router::new().route(
            "/api/v3/simple/price",
            get(|| async {
                tokio::time::sleep(Duration::from_secs(5)).await;
                "{}"
            }),
        ))
        .await;
        let api = CoinGeckoApi::new(&base, Duration::from_millis(200)).unwrap();

        let err = api.fetch_prices(&symbols(&["bitcoin"])).await.unwrap_err();
        assert!(matches!(err, FetchError::Timeout(_)));
    }
}
