use thiserror::Error;

/// Failure taxonomy shared by every operation of the crate.
#[derive(Debug, Error)]
pub enum WeatherError {
    /// The upstream credential is missing. Raised before any network call.
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("unknown city '{key}'")]
    UnknownLocality {
        key: String,
        available: Vec<&'static str>,
    },

    #[error("upstream request failed: {0}")]
    Upstream(#[from] UpstreamFailure),

    /// Upstream answered, but had nothing for a known locality.
    #[error("no data available for '{locality}'")]
    EmptyLocation { locality: String },
}

#[derive(Debug, Error)]
pub enum UpstreamFailure {
    /// Non-success HTTP status, or a `success: "false"` envelope.
    #[error("status {status}: {message}")]
    Status { status: u16, message: String },

    #[error("transport failure: {0}")]
    Transport(String),

    #[error("unexpected payload: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for UpstreamFailure {
    fn from(err: reqwest::Error) -> Self {
        UpstreamFailure::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for UpstreamFailure {
    fn from(err: serde_json::Error) -> Self {
        UpstreamFailure::Decode(err.to_string())
    }
}
