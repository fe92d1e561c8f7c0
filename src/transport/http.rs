use crate::client::policy::{run_async, AttemptError, RetryPolicy};
use crate::client::ClientConfig;
use crate::protocol::envelope;
use crate::{Error, Result};
use reqwest::header::{HeaderMap, RETRY_AFTER};
use reqwest::{Method, Proxy};
use std::sync::Mutex;
use std::time::Duration;

use super::{classify, REQUEST_ID_HEADER};

/// Async transport over a lazily opened `reqwest::Client` pool.
///
/// The pool is created on first use, shared by all concurrent calls, and
/// dropped by [`HttpTransport::close`]. A call after `close` opens a fresh pool.
pub struct HttpTransport {
    base_url: String,
    headers: HeaderMap,
    timeout: Duration,
    proxy: Option<String>,
    policy: RetryPolicy,
    client: Mutex<Option<reqwest::Client>>,
}

impl HttpTransport {
    pub fn new(config: &ClientConfig) -> Result<Self> {
        Ok(Self {
            base_url: config.base_url.clone(),
            headers: config.api_key.header_map()?,
            timeout: config.timeout,
            proxy: config.proxy.clone(),
            policy: config.retry_policy(),
            client: Mutex::new(None),
        })
    }

    fn build_client(&self) -> Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .default_headers(self.headers.clone())
            .timeout(self.timeout)
            .pool_idle_timeout(Some(Duration::from_secs(90)));

        if let Some(proxy_url) = &self.proxy {
            let proxy = Proxy::all(proxy_url)
                .map_err(|e| Error::configuration(format!("Invalid proxy URL: {}", e)))?;
            builder = builder.proxy(proxy);
        }

        builder
            .build()
            .map_err(|e| Error::configuration(format!("Failed to create HTTP client: {}", e)))
    }

    /// Return the shared pool handle, creating it if needed.
    pub fn open(&self) -> Result<reqwest::Client> {
        let mut slot = self.client.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(client) = slot.as_ref() {
            return Ok(client.clone());
        }
        let client = self.build_client()?;
        *slot = Some(client.clone());
        Ok(client)
    }

    /// Release the pool. Closing twice is a no-op.
    pub fn close(&self) {
        let mut slot = self.client.lock().unwrap_or_else(|e| e.into_inner());
        if slot.take().is_some() {
            tracing::debug!("serpshot http client closed");
        }
    }

    pub fn is_open(&self) -> bool {
        self.client
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .is_some()
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Send a JSON request with retry and return the unwrapped payload.
    pub async fn send(
        &self,
        method: Method,
        path: &str,
        payload: &serde_json::Value,
        request_id: &str,
    ) -> Result<serde_json::Value> {
        let client = self.open()?;
        let url = format!("{}{}", self.base_url, path);
        let timeout = self.timeout;

        let client = &client;
        let url = url.as_str();
        let method = &method;

        run_async(self.policy, move || async move {
            let resp = client
                .request(method.clone(), url)
                .header(REQUEST_ID_HEADER, request_id)
                .json(payload)
                .send()
                .await
                .map_err(|e| classify(e, timeout))?;
            let status = resp.status().as_u16();
            let retry_after = resp
                .headers()
                .get(RETRY_AFTER)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string);
            let body = resp.bytes().await.map_err(|e| classify(e, timeout))?;

            envelope::parse_response(status, retry_after.as_deref(), &body)
                .map_err(AttemptError::Terminal)
        })
        .await
    }
}
