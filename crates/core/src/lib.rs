pub mod client;
pub mod domain;
pub mod fixtures;
pub mod forecast;
pub mod sensor;
pub mod time;

pub mod config {
    use anyhow::Context;

    const DEFAULT_TIMEOUT_SECS: u64 = 30;
    const DEFAULT_RETRIES: u32 = 1;
    pub const DEFAULT_MOCK_DELAY_MS: u64 = 150;
    pub const DEFAULT_FALLBACK_DELAY_MS: u64 = 250;

    #[derive(Debug, Clone)]
    pub struct Settings {
        pub dashboard_api_base_url: Option<String>,
        pub force_mock_forecasting: bool,
        pub request_timeout_secs: u64,
        pub request_retries: u32,
        pub mock_delay_ms: u64,
        pub fallback_delay_ms: u64,
        pub sentry_dsn: Option<String>,
    }

    impl Default for Settings {
        fn default() -> Self {
            Self {
                dashboard_api_base_url: None,
                force_mock_forecasting: true,
                request_timeout_secs: DEFAULT_TIMEOUT_SECS,
                request_retries: DEFAULT_RETRIES,
                mock_delay_ms: DEFAULT_MOCK_DELAY_MS,
                fallback_delay_ms: DEFAULT_FALLBACK_DELAY_MS,
                sentry_dsn: None,
            }
        }
    }

    impl Settings {
        pub fn from_env() -> anyhow::Result<Self> {
            Self::from_vars(|key| std::env::var(key).ok())
        }

        /// Builds settings from any key lookup; unparseable values keep their defaults.
        pub fn from_vars<F>(var: F) -> anyhow::Result<Self>
        where
            F: Fn(&str) -> Option<String>,
        {
            let defaults = Self::default();
            let non_empty = |key: &str| var(key).map(|s| s.trim().to_string()).filter(|s| !s.is_empty());

            Ok(Self {
                dashboard_api_base_url: non_empty("DASHBOARD_API_BASE_URL"),
                force_mock_forecasting: non_empty("FORCE_MOCK_FORECASTING")
                    .and_then(|s| parse_flag(&s))
                    .unwrap_or(defaults.force_mock_forecasting),
                request_timeout_secs: non_empty("DASHBOARD_API_TIMEOUT_SECS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.request_timeout_secs),
                request_retries: non_empty("DASHBOARD_API_RETRIES")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.request_retries),
                mock_delay_ms: non_empty("MOCK_DELAY_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.mock_delay_ms),
                fallback_delay_ms: non_empty("FALLBACK_DELAY_MS")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or(defaults.fallback_delay_ms),
                sentry_dsn: non_empty("SENTRY_DSN"),
            })
        }

        pub fn require_dashboard_api_base_url(&self) -> anyhow::Result<&str> {
            self.dashboard_api_base_url
                .as_deref()
                .context("DASHBOARD_API_BASE_URL is required")
        }
    }

    fn parse_flag(s: &str) -> Option<bool> {
        match s.to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Some(true),
            "0" | "false" | "no" | "off" => Some(false),
            _ => None,
        }
    }

}
