use axum::{extract::State, http::StatusCode, routing::get, routing::post, Json, Router};
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use paddy_core::domain::forecast::{
    normalize_region, ForecastRequest, ForecastResponse, MAX_HORIZON_DAYS,
};
use paddy_core::fixtures::{
    self, FertilizerRecommendations, OptimizationData, ReportsData, SettingsData,
};
use paddy_core::sensor::npk::{MockNpkSensor, NpkReading};

#[derive(Debug, Clone, Default)]
pub struct AppState {
    sensor: Arc<MockNpkSensor>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/health", get(health))
        .route("/api/forecasting", post(forecasting))
        .route("/api/optimization", get(optimization))
        .route("/api/reports", get(reports))
        .route("/api/settings", get(settings))
        .route("/api/fertilizer/recommendations", get(fertilizer_recommendations))
        .route("/api/npk", get(npk))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

async fn healthz() -> &'static str {
    "ok"
}

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

async fn forecasting(
    State(state): State<AppState>,
    Json(mut req): Json<ForecastRequest>,
) -> Result<Json<ForecastResponse>, StatusCode> {
    if !(1..=MAX_HORIZON_DAYS).contains(&req.horizon_days) {
        tracing::warn!(horizon_days = req.horizon_days, "rejecting forecast request");
        return Err(StatusCode::BAD_REQUEST);
    }

    if let Some(region) = normalize_region(&req.region) {
        req.region = region.to_string();
    }

    // Partial readings are replaced wholesale so N, P and K always come from one sample.
    if !req.has_npk() {
        let reading = state.sensor.read();
        tracing::info!(?reading, "forecast request without NPK; using sensor sample");
        req.nitrogen_n = Some(reading.nitrogen_n);
        req.phosphorus_p = Some(reading.phosphorus_p);
        req.potassium_k = Some(reading.potassium_k);
    }

    let resp = paddy_core::forecast::generate_forecast(&req);
    tracing::info!(
        region = %resp.filters.region,
        horizon_days = resp.filters.horizon_days,
        "served mock forecast"
    );
    Ok(Json(resp))
}

async fn optimization() -> Json<OptimizationData> {
    Json(fixtures::optimization())
}

async fn reports() -> Json<ReportsData> {
    Json(fixtures::reports())
}

async fn settings() -> Json<SettingsData> {
    Json(fixtures::settings())
}

async fn fertilizer_recommendations() -> Json<FertilizerRecommendations> {
    Json(fixtures::fertilizer_recommendations())
}

#[derive(Debug, Serialize)]
struct NpkResponse {
    source: &'static str,
    reading: NpkReading,
}

async fn npk(State(state): State<AppState>) -> Json<NpkResponse> {
    Json(NpkResponse {
        source: "mock",
        reading: state.sensor.read(),
    })
}
