pub mod error;
pub mod http;

use crate::config::{Settings, DEFAULT_FALLBACK_DELAY_MS, DEFAULT_MOCK_DELAY_MS};
use crate::domain::contract::BackendForecastResponse;
use crate::domain::forecast::{ForecastRequest, ForecastResponse};
use crate::fixtures::{self, OptimizationData, ReportsData, SettingsData};
use crate::forecast::build_forecasting_mock;
use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use error::BackendDiagnosticsError;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

pub const DEFAULT_MOCK_DELAY: Duration = Duration::from_millis(DEFAULT_MOCK_DELAY_MS);
pub const DEFAULT_FALLBACK_DELAY: Duration = Duration::from_millis(DEFAULT_FALLBACK_DELAY_MS);

#[async_trait::async_trait]
pub trait DashboardBackend: Send + Sync {
    fn backend_name(&self) -> &'static str;

    async fn get_json(&self, path: &str) -> Result<Value>;

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Backend,
    Mock,
}

#[derive(Debug, Clone)]
pub struct Fetched<T> {
    pub data: T,
    pub source: DataSource,
}

/// Dashboard data access that never fails: every call answers from the backend when one is
/// configured and healthy, and from local mock data otherwise.
#[derive(Clone)]
pub struct DashboardClient {
    backend: Option<Arc<dyn DashboardBackend>>,
    force_mock_forecasting: bool,
    mock_delay: Duration,
    fallback_delay: Duration,
}

impl DashboardClient {
    pub fn new(backend: Option<Arc<dyn DashboardBackend>>) -> Self {
        Self {
            backend,
            force_mock_forecasting: false,
            mock_delay: DEFAULT_MOCK_DELAY,
            fallback_delay: DEFAULT_FALLBACK_DELAY,
        }
    }

    pub fn mock_only() -> Self {
        Self::new(None).with_force_mock_forecasting(true)
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let backend: Option<Arc<dyn DashboardBackend>> = match settings.dashboard_api_base_url {
            Some(_) => Some(Arc::new(
                http::HttpDashboardBackend::from_settings(settings)
                    .context("failed to configure dashboard backend")?,
            )),
            None => None,
        };

        Ok(Self::new(backend)
            .with_force_mock_forecasting(settings.force_mock_forecasting)
            .with_delays(
                Duration::from_millis(settings.mock_delay_ms),
                Duration::from_millis(settings.fallback_delay_ms),
            ))
    }

    pub fn with_force_mock_forecasting(mut self, force: bool) -> Self {
        self.force_mock_forecasting = force;
        self
    }

    pub fn with_delays(mut self, mock_delay: Duration, fallback_delay: Duration) -> Self {
        self.mock_delay = mock_delay;
        self.fallback_delay = fallback_delay;
        self
    }

    /// Name of the configured backend, `None` when every call is served from mock data.
    pub fn backend_name(&self) -> Option<&'static str> {
        self.backend.as_ref().map(|b| b.backend_name())
    }

    pub async fn get_forecasting(
        &self,
        request: &ForecastRequest,
        today: NaiveDate,
    ) -> Fetched<ForecastResponse> {
        if self.force_mock_forecasting {
            tokio::time::sleep(self.mock_delay).await;
            return mock(build_forecasting_mock(request, today));
        }

        match self.post_forecasting(request).await {
            Ok(data) => Fetched {
                data,
                source: DataSource::Backend,
            },
            Err(err) => {
                self.fall_back("/forecasting", &err).await;
                mock(build_forecasting_mock(request, today))
            }
        }
    }

    pub async fn get_optimization(&self) -> Fetched<OptimizationData> {
        self.safe_get("/optimization", fixtures::optimization).await
    }

    pub async fn get_reports(&self) -> Fetched<ReportsData> {
        self.safe_get("/reports", fixtures::reports).await
    }

    pub async fn get_settings(&self) -> Fetched<SettingsData> {
        self.safe_get("/settings", fixtures::settings).await
    }

    async fn post_forecasting(&self, request: &ForecastRequest) -> Result<ForecastResponse> {
        let backend = self.require_backend("/forecasting")?;
        let body = serde_json::to_value(request).context("failed to encode forecast request")?;
        let raw = backend.post_json("/forecasting", &body).await?;
        let parsed = serde_json::from_value::<BackendForecastResponse>(raw)
            .context("failed to parse backend forecast response")?;
        parsed.validate_and_into_response(request)
    }

    async fn safe_get<T, F>(&self, path: &str, fallback: F) -> Fetched<T>
    where
        T: DeserializeOwned,
        F: FnOnce() -> T,
    {
        let res = self.try_get::<T>(path).await;

        match res {
            Ok(data) => Fetched {
                data,
                source: DataSource::Backend,
            },
            Err(err) => {
                self.fall_back(path, &err).await;
                mock(fallback())
            }
        }
    }

    async fn try_get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let backend = self.require_backend(path)?;
        let raw = backend.get_json(path).await?;
        serde_json::from_value::<T>(raw)
            .with_context(|| format!("failed to parse backend response for {path}"))
    }

    fn require_backend(&self, path: &str) -> Result<&Arc<dyn DashboardBackend>> {
        self.backend
            .as_ref()
            .ok_or_else(|| anyhow!("no dashboard backend configured for {path}"))
    }

    async fn fall_back(&self, path: &str, err: &anyhow::Error) {
        let Some(backend) = self.backend_name() else {
            tracing::debug!(path, "no backend configured; serving mock data");
            tokio::time::sleep(self.fallback_delay).await;
            return;
        };

        let detail = format!("{err:#}");
        match err.downcast_ref::<BackendDiagnosticsError>() {
            Some(diag) => {
                tracing::warn!(
                    path,
                    backend,
                    status = ?diag.status,
                    error = %detail,
                    "backend unavailable; serving mock data"
                );
            }
            None => {
                tracing::warn!(
                    path,
                    backend,
                    error = %detail,
                    "backend response rejected; serving mock data"
                );
            }
        }
        tokio::time::sleep(self.fallback_delay).await;
    }
}

fn mock<T>(data: T) -> Fetched<T> {
    Fetched {
        data,
        source: DataSource::Mock,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct StaticBackend {
        response: Value,
        calls: AtomicUsize,
    }

    impl StaticBackend {
        fn new(response: Value) -> Arc<Self> {
            Arc::new(Self {
                response,
                calls: AtomicUsize::new(0),
            })
        }
    }

    #[async_trait::async_trait]
    impl DashboardBackend for StaticBackend {
        fn backend_name(&self) -> &'static str {
            "static"
        }

        async fn get_json(&self, _path: &str) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }

        async fn post_json(&self, _path: &str, _body: &Value) -> Result<Value> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.response.clone())
        }
    }

    struct DownBackend;

    #[async_trait::async_trait]
    impl DashboardBackend for DownBackend {
        fn backend_name(&self) -> &'static str {
            "down"
        }

        async fn get_json(&self, path: &str) -> Result<Value> {
            Err(BackendDiagnosticsError {
                backend: "down",
                path: path.to_string(),
                status: Some(503),
                detail: "unavailable".to_string(),
            }
            .into())
        }

        async fn post_json(&self, path: &str, _body: &Value) -> Result<Value> {
            self.get_json(path).await
        }
    }

    fn client(backend: Option<Arc<dyn DashboardBackend>>) -> DashboardClient {
        DashboardClient::new(backend).with_delays(Duration::ZERO, Duration::ZERO)
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 1, 10).unwrap()
    }

    fn request() -> ForecastRequest {
        ForecastRequest {
            horizon_days: 2,
            start_date: Some("2026-01-01".to_string()),
            ..ForecastRequest::default()
        }
    }

    #[tokio::test]
    async fn force_mock_skips_backend() {
        let backend = StaticBackend::new(json!({}));
        let c = client(Some(backend.clone() as Arc<dyn DashboardBackend>)).with_force_mock_forecasting(true);
        let out = c.get_forecasting(&request(), today()).await;
        assert_eq!(out.source, DataSource::Mock);
        assert_eq!(out.data, build_forecasting_mock(&request(), today()));
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn down_backend_falls_back_to_mock() {
        let c = client(Some(Arc::new(DownBackend) as Arc<dyn DashboardBackend>));
        let out = c.get_forecasting(&request(), today()).await;
        assert_eq!(out.source, DataSource::Mock);
        assert_eq!(out.data.price_forecast.len(), 2);

        let reports = c.get_reports().await;
        assert_eq!(reports.source, DataSource::Mock);
        assert_eq!(reports.data, fixtures::reports());
    }

    #[test]
    fn backend_name_reports_configured_backend() {
        assert_eq!(client(None).backend_name(), None);
        let down = client(Some(Arc::new(DownBackend) as Arc<dyn DashboardBackend>));
        assert_eq!(down.backend_name(), Some("down"));
    }

    #[test]
    fn default_delays_follow_settings_defaults() {
        let settings = Settings::default();
        assert_eq!(DEFAULT_MOCK_DELAY, Duration::from_millis(settings.mock_delay_ms));
        assert_eq!(DEFAULT_FALLBACK_DELAY, Duration::from_millis(settings.fallback_delay_ms));
    }

    #[tokio::test]
    async fn missing_backend_serves_fixtures() {
        let c = client(None);
        let out = c.get_settings().await;
        assert_eq!(out.source, DataSource::Mock);
        assert_eq!(out.data.defaults.language, "en");
    }

    #[tokio::test]
    async fn valid_backend_forecast_is_used() {
        let backend = StaticBackend::new(json!({
            "priceForecast": [
                {"date": "2026-01-01", "price": 101.0},
                {"date": "2026-01-02", "price": 102.0}
            ],
            "demandForecast": [
                {"date": "2026-01-01", "demand": 70.0},
                {"date": "2026-01-02", "demand": 71.0}
            ],
            "sentiment": null
        }));
        let c = client(Some(backend.clone() as Arc<dyn DashboardBackend>));
        let out = c.get_forecasting(&request(), today()).await;
        assert_eq!(out.source, DataSource::Backend);
        assert_eq!(out.data.price_forecast[0].value, 101.0);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn malformed_backend_forecast_falls_back() {
        let backend = StaticBackend::new(json!({"priceForecast": "nope"}));
        let c = client(Some(backend as Arc<dyn DashboardBackend>));
        let out = c.get_forecasting(&request(), today()).await;
        assert_eq!(out.source, DataSource::Mock);
    }

    #[tokio::test]
    async fn backend_fixture_payload_is_parsed() {
        let backend = StaticBackend::new(serde_json::to_value(fixtures::optimization()).unwrap());
        let c = client(Some(backend as Arc<dyn DashboardBackend>));
        let out = c.get_optimization().await;
        assert_eq!(out.source, DataSource::Backend);
        assert_eq!(out.data.crop_plan.len(), 7);
    }
}
