use crate::client::error::BackendDiagnosticsError;
use crate::client::DashboardBackend;
use crate::config::Settings;
use anyhow::{Context, Result};
use reqwest::Method;
use serde_json::Value;
use std::time::Duration;

const BACKEND_NAME: &str = "http_json";

#[derive(Debug, Clone)]
pub struct HttpDashboardBackend {
    http: reqwest::Client,
    base_url: String,
    retries: u32,
}

impl HttpDashboardBackend {
    pub fn from_settings(settings: &Settings) -> Result<Self> {
        let base_url = settings.require_dashboard_api_base_url()?.to_string();

        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .context("failed to build dashboard http client")?;

        Ok(Self {
            http,
            base_url,
            retries: settings.request_retries.max(1),
        })
    }

    fn url(&self, path: &str) -> String {
        let path = if path.starts_with('/') {
            path.to_string()
        } else {
            format!("/{path}")
        };

        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn send_once(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let mut req = self.http.request(method, self.url(path));
        if let Some(body) = body {
            req = req.json(body);
        }

        let res = req.send().await.map_err(|e| BackendDiagnosticsError {
            backend: BACKEND_NAME,
            path: path.to_string(),
            status: None,
            detail: format!("request failed: {e}"),
        })?;

        let status = res.status();
        let text = res
            .text()
            .await
            .context("failed to read backend response")?;

        if !status.is_success() {
            return Err(BackendDiagnosticsError {
                backend: BACKEND_NAME,
                path: path.to_string(),
                status: Some(status.as_u16()),
                detail: text,
            }
            .into());
        }

        serde_json::from_str::<Value>(&text)
            .with_context(|| format!("backend response is not valid JSON: {text}"))
    }

    async fn send(&self, method: Method, path: &str, body: Option<&Value>) -> Result<Value> {
        let mut attempt: u32 = 0;
        loop {
            attempt += 1;
            match self.send_once(method.clone(), path, body).await {
                Ok(v) => return Ok(v),
                Err(err) => {
                    if attempt >= self.retries {
                        return Err(err);
                    }
                    let backoff = Duration::from_secs(1 << (attempt - 1));
                    tracing::warn!(attempt, ?backoff, path, error = %err, "backend request failed; retrying");
                    tokio::time::sleep(backoff).await;
                }
            }
        }
    }
}

#[async_trait::async_trait]
impl DashboardBackend for HttpDashboardBackend {
    fn backend_name(&self) -> &'static str {
        BACKEND_NAME
    }

    async fn get_json(&self, path: &str) -> Result<Value> {
        self.send(Method::GET, path, None).await
    }

    async fn post_json(&self, path: &str, body: &Value) -> Result<Value> {
        self.send(Method::POST, path, Some(body)).await
    }
}
