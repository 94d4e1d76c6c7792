use crate::{
    Config, WeatherError,
    provider::{
        cwa::CwaClient,
        raw::{RawForecastPayload, RawTempDiffPayload},
    },
};
use anyhow::Context;
use async_trait::async_trait;
use chrono::NaiveDate;
use std::{fmt::Debug, sync::Arc};

pub mod cwa;
pub mod raw;

/// Read access to the open-data datasets, keyed by canonical locality name.
///
/// Every call is a single attempt; failures surface immediately.
#[async_trait]
pub trait WeatherProvider: Send + Sync + Debug {
    async fn fetch_forecast(&self, locality: &str) -> Result<RawForecastPayload, WeatherError>;

    async fn fetch_temp_diff(&self, locality: &str) -> Result<RawTempDiffPayload, WeatherError>;

    /// Sunrise/sunset `records`, relayed as-is.
    async fn fetch_sunrise(
        &self,
        locality: &str,
        date: NaiveDate,
    ) -> Result<serde_json::Value, WeatherError>;

    /// Moonrise/moonset `records`, relayed as-is.
    async fn fetch_moonrise(
        &self,
        locality: &str,
        date: NaiveDate,
    ) -> Result<serde_json::Value, WeatherError>;
}

/// Construct the upstream client from config.
///
/// A missing credential is not an error here; it is reported per call.
pub fn provider_from_config(config: &Config) -> anyhow::Result<Arc<dyn WeatherProvider>> {
    let mut builder = reqwest::Client::builder();
    if let Some(timeout) = config.timeout() {
        builder = builder.timeout(timeout);
    }
    let http = builder.build().context("Failed to build HTTP client")?;

    Ok(Arc::new(CwaClient::with_http(
        config.api_key().map(str::to_owned),
        config.base_url.clone(),
        http,
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_key_is_reported_before_any_network_call() {
        let cfg = Config {
            // Nothing listens here; a network attempt would fail as transport.
            base_url: "http://127.0.0.1:9".into(),
            ..Config::default()
        };
        let provider = provider_from_config(&cfg).expect("client builds without a key");

        let err = provider.fetch_forecast("臺北市").await.unwrap_err();
        assert!(matches!(err, WeatherError::Configuration(_)), "{err:?}");

        let err = provider.fetch_temp_diff("臺北市").await.unwrap_err();
        assert!(matches!(err, WeatherError::Configuration(_)), "{err:?}");
    }

    #[tokio::test]
    async fn unreachable_upstream_is_a_transport_failure() {
        let mut cfg = Config {
            base_url: "http://127.0.0.1:9".into(),
            timeout_secs: Some(2),
            ..Config::default()
        };
        cfg.set_api_key("KEY".into());
        let provider = provider_from_config(&cfg).unwrap();

        let err = provider.fetch_forecast("臺北市").await.unwrap_err();
        assert!(
            matches!(
                err,
                WeatherError::Upstream(crate::UpstreamFailure::Transport(_))
            ),
            "{err:?}"
        );
    }
}
