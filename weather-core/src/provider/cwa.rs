use async_trait::async_trait;
use chrono::NaiveDate;
use reqwest::Client;
use serde::de::DeserializeOwned;

use crate::{
    UpstreamFailure, WeatherError,
    config::DEFAULT_BASE_URL,
    provider::raw::{Envelope, RawForecastPayload, RawTempDiffPayload, truncate_body},
};

use super::WeatherProvider;

const FORECAST_DATASET: &str = "F-C0032-001";
const TEMP_DIFF_DATASET: &str = "M-A0085-001";
const SUNRISE_DATASET: &str = "A-B0062-001";
const MOONRISE_DATASET: &str = "A-B0063-001";

/// Client for the Central Weather Administration open-data REST API.
#[derive(Debug, Clone)]
pub struct CwaClient {
    api_key: Option<String>,
    base_url: String,
    http: Client,
}

impl CwaClient {
    pub fn new(api_key: Option<String>) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: Option<String>, base_url: impl Into<String>) -> Self {
        Self::with_http(api_key, base_url, Client::new())
    }

    pub fn with_http(api_key: Option<String>, base_url: impl Into<String>, http: Client) -> Self {
        Self {
            api_key,
            base_url: base_url.into(),
            http,
        }
    }

    fn api_key(&self) -> Result<&str, WeatherError> {
        self.api_key
            .as_deref()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| {
                WeatherError::Configuration(
                    "CWA_API_KEY is not set.\n\
                     Hint: export CWA_API_KEY or run `tw-weather configure`."
                        .to_string(),
                )
            })
    }

    async fn get_records<T: DeserializeOwned>(
        &self,
        dataset: &str,
        query: &[(&str, &str)],
    ) -> Result<T, WeatherError> {
        let api_key = self.api_key()?;
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), dataset);

        tracing::debug!(dataset, ?query, "requesting upstream dataset");

        let res = self
            .http
            .get(&url)
            .query(&[("Authorization", api_key), ("format", "JSON")])
            .query(query)
            .send()
            .await
            .map_err(UpstreamFailure::from)?;

        let status = res.status();
        let body = res.text().await.map_err(UpstreamFailure::from)?;

        if !status.is_success() {
            tracing::warn!(dataset, %status, "upstream returned an error status");
            return Err(UpstreamFailure::Status {
                status: status.as_u16(),
                message: upstream_message(&body),
            }
            .into());
        }

        let envelope: Envelope<T> = serde_json::from_str(&body).map_err(UpstreamFailure::from)?;
        Ok(envelope.into_records(status.as_u16())?)
    }
}

#[async_trait]
impl WeatherProvider for CwaClient {
    async fn fetch_forecast(&self, locality: &str) -> Result<RawForecastPayload, WeatherError> {
        self.get_records(FORECAST_DATASET, &[("locationName", locality)])
            .await
    }

    async fn fetch_temp_diff(&self, locality: &str) -> Result<RawTempDiffPayload, WeatherError> {
        self.get_records(TEMP_DIFF_DATASET, &[("CountyName", locality)])
            .await
    }

    async fn fetch_sunrise(
        &self,
        locality: &str,
        date: NaiveDate,
    ) -> Result<serde_json::Value, WeatherError> {
        let date = date.format("%Y-%m-%d").to_string();
        self.get_records(SUNRISE_DATASET, &[("CountyName", locality), ("Date", date.as_str())])
            .await
    }

    async fn fetch_moonrise(
        &self,
        locality: &str,
        date: NaiveDate,
    ) -> Result<serde_json::Value, WeatherError> {
        let date = date.format("%Y-%m-%d").to_string();
        self.get_records(MOONRISE_DATASET, &[("CountyName", locality), ("Date", date.as_str())])
            .await
    }
}

/// Prefer the `message` field of a JSON error body, else the raw body.
/// Either way the result is truncated.
fn upstream_message(body: &str) -> String {
    let json = serde_json::from_str::<serde_json::Value>(body).ok();
    let message = json
        .as_ref()
        .and_then(|v| v.get("message"))
        .and_then(|m| m.as_str())
        .unwrap_or(body);
    truncate_body(message)
}
