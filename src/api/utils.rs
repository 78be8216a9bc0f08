use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{config::USER_AGENT, error::FetchError};

pub fn build_client(timeout: Duration) -> Result<Client, FetchError> {
    Client::builder()
        .timeout(timeout)
        .user_agent(USER_AGENT)
        .build()
        .map_err(FetchError::from)
}

/// `subject` names what was asked for (a symbol, coin ids, a universe) and is
/// what a 404 reports as not found.
async fn send(
    client: &Client,
    base_url: &str,
    endpoint: &str,
    subject: &str,
    params: &[(&str, &str)],
) -> Result<reqwest::Response, FetchError> {
    let url = format!("{}/{}", base_url.trim_end_matches('/'), endpoint);
    let res = client.get(&url).query(params).send().await?;

    match res.status() {
        status if status.is_success() => Ok(res),
        StatusCode::NOT_FOUND => Err(FetchError::NotFound(subject.to_string())),
        status => Err(FetchError::Network(format!(
            "Request for {} failed: {}",
            subject, status
        ))),
    }
}

pub async fn make_request(
    client: &Client,
    base_url: &str,
    endpoint: &str,
    subject: &str,
    params: &[(&str, &str)],
) -> Result<Value, FetchError> {
    let text = send(client, base_url, endpoint, subject, params)
        .await?
        .text()
        .await?;
    Ok(serde_json::from_str::<Value>(&text)?)
}

pub async fn make_text_request(
    client: &Client,
    base_url: &str,
    endpoint: &str,
    subject: &str,
) -> Result<String, FetchError> {
    Ok(send(client, base_url, endpoint, subject, &[])
        .await?
        .text()
        .await?)
}

pub fn parse_response_object<T>(data: Value, error_msg: &str) -> Result<T, FetchError>
where
    T: DeserializeOwned,
{
    match data {
        Value::Object(obj) => serde_json::from_value(Value::Object(obj))
            .map_err(|e| FetchError::Malformed(format!("{}: {}", error_msg, e))),
        _ => Err(FetchError::Malformed(
            "Unexpected API response format: not an object".to_string(),
        )),
    }
}
