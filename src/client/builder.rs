use crate::auth::ApiKey;
use crate::client::core::SerpShotClient;
use crate::client::policy::{RetryPolicy, DEFAULT_BASE_DELAY, DEFAULT_MAX_RETRIES};
use crate::{Error, ErrorContext, Result};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.serpshot.com";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_API_KEY: &str = "SERPSHOT_API_KEY";
pub const ENV_BASE_URL: &str = "SERPSHOT_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "SERPSHOT_TIMEOUT_SECS";
pub const ENV_MAX_RETRIES: &str = "SERPSHOT_MAX_RETRIES";
pub const ENV_PROXY_URL: &str = "SERPSHOT_PROXY_URL";
pub const ENV_STRICT_KEY: &str = "SERPSHOT_STRICT_KEY";

/// Resolved client configuration shared by the async and blocking clients.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub api_key: ApiKey,
    /// Base URL without a trailing slash
    pub base_url: String,
    /// Per-attempt timeout
    pub timeout: Duration,
    /// Total attempts per call
    pub max_retries: u32,
    pub retry_base_delay: Duration,
    pub proxy: Option<String>,
}

impl ClientConfig {
    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(self.max_retries, self.retry_base_delay)
    }
}

fn env_nonempty(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Builder for SerpShot clients.
///
/// Explicit values win over environment variables, which win over defaults.
pub struct SerpShotClientBuilder {
    api_key: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
    max_retries: Option<u32>,
    retry_base_delay: Duration,
    proxy: Option<String>,
    strict_key: bool,
}

impl SerpShotClientBuilder {
    pub fn new() -> Self {
        Self {
            api_key: None,
            base_url: None,
            timeout: None,
            max_retries: None,
            retry_base_delay: DEFAULT_BASE_DELAY,
            proxy: None,
            strict_key: false,
        }
    }

    /// API key; falls back to `SERPSHOT_API_KEY` when unset or empty.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Per-attempt request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Total attempts per call (clamped to at least 1).
    pub fn max_retries(mut self, n: u32) -> Self {
        self.max_retries = Some(n);
        self
    }

    /// First backoff delay; later delays double.
    pub fn retry_base_delay(mut self, delay: Duration) -> Self {
        self.retry_base_delay = delay;
        self
    }

    pub fn proxy(mut self, url: impl Into<String>) -> Self {
        self.proxy = Some(url.into());
        self
    }

    /// Reject keys that fail [`ApiKey::validate`] at build time.
    ///
    /// Opt-in; can also be enabled with `SERPSHOT_STRICT_KEY=1`.
    pub fn strict_key(mut self, enable: bool) -> Self {
        self.strict_key = enable;
        self
    }

    /// Resolve the configuration without creating a client.
    pub fn config(self) -> Result<ClientConfig> {
        let raw_key = self
            .api_key
            .filter(|k| !k.is_empty())
            .or_else(|| env_nonempty(ENV_API_KEY))
            .ok_or_else(|| {
                Error::configuration_with_context(
                    format!(
                        "API key is required. Either provide it via `api_key` or set the {} environment variable",
                        ENV_API_KEY
                    ),
                    ErrorContext::new()
                        .with_field_path("api_key")
                        .with_source("client_builder"),
                )
            })?;
        let api_key = ApiKey::new(raw_key)?;

        let strict_key =
            self.strict_key || std::env::var(ENV_STRICT_KEY).ok().as_deref() == Some("1");
        if strict_key {
            api_key.validate()?;
        }

        let base_url = self
            .base_url
            .or_else(|| env_nonempty(ENV_BASE_URL))
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim().trim_end_matches('/').to_string();
        url::Url::parse(&base_url).map_err(|e| {
            Error::configuration_with_context(
                format!("Invalid base URL: {}", e),
                ErrorContext::new()
                    .with_field_path("base_url")
                    .with_details(base_url.clone())
                    .with_source("client_builder"),
            )
        })?;

        let timeout = self
            .timeout
            .or_else(|| {
                std::env::var(ENV_TIMEOUT_SECS)
                    .ok()
                    .and_then(|s| s.trim().parse::<f64>().ok())
                    .filter(|secs| secs.is_finite() && *secs > 0.0)
                    .map(Duration::from_secs_f64)
            })
            .unwrap_or(DEFAULT_TIMEOUT);

        let max_retries = self
            .max_retries
            .or_else(|| {
                std::env::var(ENV_MAX_RETRIES)
                    .ok()
                    .and_then(|s| s.trim().parse::<u32>().ok())
            })
            .unwrap_or(DEFAULT_MAX_RETRIES)
            .max(1);

        let proxy = self.proxy.or_else(|| env_nonempty(ENV_PROXY_URL));

        Ok(ClientConfig {
            api_key,
            base_url,
            timeout,
            max_retries,
            retry_base_delay: self.retry_base_delay,
            proxy,
        })
    }

    /// Build the async client.
    pub fn build(self) -> Result<SerpShotClient> {
        SerpShotClient::with_config(self.config()?)
    }

    /// Build the blocking client.
    #[cfg(feature = "blocking")]
    pub fn build_blocking(self) -> Result<crate::client::blocking::BlockingSerpShotClient> {
        crate::client::blocking::BlockingSerpShotClient::with_config(self.config()?)
    }
}

impl Default for SerpShotClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
