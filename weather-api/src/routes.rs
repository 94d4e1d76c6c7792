//! HTTP REST API.
//!
//! Read-only JSON endpoints over the core use cases, plus liveness and
//! discovery documents.

use std::{any::Any, sync::Arc};

use anyhow::Context;
use axum::{
    Json, Router,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::Utc;
use serde::Serialize;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tw_weather_core::{
    AggregatedAdvisory, ForecastReport, WeatherProvider, build_advisory, build_forecast,
    locality::{self, LOCALITIES},
    tempdiff::taiwan_today,
};

use crate::error::{ApiError, ErrorBody};

/// Shared state for HTTP handlers
#[derive(Clone)]
pub struct AppState {
    pub provider: Arc<dyn WeatherProvider>,
}

/// Success envelope: `{ "success": true, "data": ... }`
#[derive(Serialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: T,
}

fn ok<T>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data,
    })
}

pub fn router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    Router::new()
        .route("/", get(discovery))
        .route("/api/health", get(health))
        .route("/api/weather/{city}", get(weather))
        .route("/api/health/temp-difference/{city}", get(temp_difference))
        .route("/api/astronomy/sun/{city}", get(sunrise))
        .route("/api/astronomy/moon/{city}", get(moonrise))
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl+C.
pub async fn serve(addr: &str, provider: Arc<dyn WeatherProvider>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;

    tracing::info!("HTTP API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(AppState { provider }))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("HTTP server error")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, shutting down gracefully...");
}

/// GET / - Endpoint and city code listing
async fn discovery() -> Json<Value> {
    let cities: serde_json::Map<String, Value> = LOCALITIES
        .iter()
        .map(|l| (l.key.to_string(), Value::from(l.canonical_name)))
        .collect();

    Json(json!({
        "message": "Taiwan weather API",
        "version": env!("CARGO_PKG_VERSION"),
        "endpoints": {
            "weather": "/api/weather/:city",
            "tempDifference": "/api/health/temp-difference/:city",
            "sunrise": "/api/astronomy/sun/:city",
            "moonrise": "/api/astronomy/moon/:city",
            "health": "/api/health",
        },
        "availableCities": locality::all_keys(),
        "cities": cities,
    }))
}

/// GET /api/health - Liveness probe
async fn health() -> Json<Value> {
    Json(json!({
        "status": "OK",
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// GET /api/weather/{city} - 36-hour forecast
async fn weather(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<ApiResponse<ForecastReport>>, ApiError> {
    let report = build_forecast(state.provider.as_ref(), &city).await?;
    Ok(ok(report))
}

/// GET /api/health/temp-difference/{city} - Temperature swing and clothing advice
async fn temp_difference(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<ApiResponse<AggregatedAdvisory>>, ApiError> {
    let advisory = build_advisory(state.provider.as_ref(), &city).await?;
    Ok(ok(advisory))
}

/// GET /api/astronomy/sun/{city} - Upstream sunrise/sunset records
async fn sunrise(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let locality = locality::resolve(&city)?;
    let records = state
        .provider
        .fetch_sunrise(locality.canonical_name, taiwan_today())
        .await?;
    Ok(ok(records))
}

/// GET /api/astronomy/moon/{city} - Upstream moonrise/moonset records
async fn moonrise(
    State(state): State<AppState>,
    Path(city): Path<String>,
) -> Result<Json<ApiResponse<Value>>, ApiError> {
    let locality = locality::resolve(&city)?;
    let records = state
        .provider
        .fetch_moonrise(locality.canonical_name, taiwan_today())
        .await?;
    Ok(ok(records))
}

async fn not_found() -> (StatusCode, Json<ErrorBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorBody::new("NotFound", "no such endpoint; see GET / for the list")),
    )
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = err
        .downcast_ref::<String>()
        .cloned()
        .or_else(|| err.downcast_ref::<&str>().map(|s| s.to_string()))
        .unwrap_or_else(|| "unknown panic".to_string());

    tracing::error!(%detail, "handler panicked");

    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorBody::new("InternalError", "internal server error")),
    )
        .into_response()
}
