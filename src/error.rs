use thiserror::Error;

/// Failure of a single provider call.
///
/// Per-symbol history failures are swallowed by the batch fetcher; listing and
/// whole-upstream failures are returned to the caller.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum FetchError {
    #[error("no data found for {0}")]
    NotFound(String),

    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out: {0}")]
    Timeout(String),

    #[error("malformed response: {0}")]
    Malformed(String),

    #[error("not enough history for {symbol}: {observations} observation(s)")]
    InsufficientHistory { symbol: String, observations: usize },

    #[error("upstream format changed: {0}")]
    UpstreamFormatChange(String),

    #[error("arithmetic overflow computing change for {0}")]
    Arithmetic(String),
}

impl FetchError {
    pub fn is_transient(&self) -> bool {
        matches!(self, FetchError::Network(_) | FetchError::Timeout(_))
    }
}

impl From<reqwest::Error> for FetchError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            FetchError::Timeout(err.to_string())
        } else if err.is_decode() {
            FetchError::Malformed(err.to_string())
        } else {
            FetchError::Network(err.to_string())
        }
    }
}

impl From<serde_json::Error> for FetchError {
    fn from(err: serde_json::Error) -> Self {
        FetchError::Malformed(err.to_string())
    }
}
