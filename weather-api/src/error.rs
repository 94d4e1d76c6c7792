use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tw_weather_core::{UpstreamFailure, WeatherError};

/// JSON error body shared by every endpoint.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorBody {
    pub success: bool,
    pub error: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub available_cities: Option<Vec<&'static str>>,
}

impl ErrorBody {
    pub fn new(error: &'static str, message: impl Into<String>) -> Self {
        Self {
            success: false,
            error,
            message: message.into(),
            details: None,
            available_cities: None,
        }
    }
}

#[derive(Debug)]
pub struct ApiError(pub WeatherError);

impl From<WeatherError> for ApiError {
    fn from(err: WeatherError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            WeatherError::Configuration(_) => StatusCode::INTERNAL_SERVER_ERROR,
            WeatherError::UnknownLocality { .. } => StatusCode::BAD_REQUEST,
            WeatherError::EmptyLocation { .. } => StatusCode::NOT_FOUND,
            WeatherError::Upstream(UpstreamFailure::Status { status, .. }) => {
                StatusCode::from_u16(*status)
                    .ok()
                    .filter(|s| s.is_client_error() || s.is_server_error())
                    .unwrap_or(StatusCode::BAD_GATEWAY)
            }
            WeatherError::Upstream(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn body(&self) -> ErrorBody {
        let message = self.0.to_string();
        match &self.0 {
            WeatherError::Configuration(_) => ErrorBody::new("ConfigurationError", message),
            WeatherError::UnknownLocality { available, .. } => ErrorBody {
                available_cities: Some(available.clone()),
                ..ErrorBody::new("UnknownLocality", message)
            },
            WeatherError::EmptyLocation { .. } => ErrorBody::new("EmptyLocation", message),
            WeatherError::Upstream(failure) => {
                let details = match failure {
                    UpstreamFailure::Status { message, .. } => message.clone(),
                    UpstreamFailure::Transport(detail) | UpstreamFailure::Decode(detail) => {
                        detail.clone()
                    }
                };
                ErrorBody {
                    details: Some(details),
                    ..ErrorBody::new("UpstreamFailure", "upstream weather service request failed")
                }
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            tracing::error!(%status, error = %self.0, "request failed");
        } else {
            tracing::debug!(%status, error = %self.0, "request rejected");
        }
        (status, Json(self.body())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tw_weather_core::locality;

    fn upstream(status: u16) -> ApiError {
        ApiError(
            UpstreamFailure::Status {
                status,
                message: "nope".into(),
            }
            .into(),
        )
    }

    #[test]
    fn status_mapping() {
        let config = ApiError(WeatherError::Configuration("missing".into()));
        assert_eq!(config.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let unknown = ApiError(locality::resolve("nowhere").unwrap_err());
        assert_eq!(unknown.status(), StatusCode::BAD_REQUEST);

        let empty = ApiError(WeatherError::EmptyLocation {
            locality: "臺北市".into(),
        });
        assert_eq!(empty.status(), StatusCode::NOT_FOUND);

        let transport = ApiError(UpstreamFailure::Transport("timeout".into()).into());
        assert_eq!(transport.status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn upstream_status_is_mirrored_when_it_is_an_error() {
        assert_eq!(upstream(401).status(), StatusCode::UNAUTHORIZED);
        assert_eq!(upstream(503).status(), StatusCode::SERVICE_UNAVAILABLE);
        // `success: "false"` inside a 200 response
        assert_eq!(upstream(200).status(), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn unknown_locality_body_lists_cities() {
        let body = ApiError(locality::resolve("nowhere").unwrap_err()).body();
        assert!(!body.success);
        assert_eq!(body.error, "UnknownLocality");
        assert_eq!(body.available_cities.map(|c| c.len()), Some(22));
    }

    #[test]
    fn upstream_body_carries_details() {
        let body = upstream(401).body();
        assert_eq!(body.error, "UpstreamFailure");
        assert_eq!(body.details.as_deref(), Some("nope"));
    }
}
