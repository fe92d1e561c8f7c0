//! API key handling.

use crate::{Error, Result};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, ACCEPT, CONTENT_TYPE};
use std::collections::HashMap;
use std::fmt;

/// Header carrying the API key.
pub const API_KEY_HEADER: &str = "X-API-Key";

/// Keys shorter than this are rejected by [`ApiKey::validate`].
pub const MIN_KEY_LEN: usize = 10;

/// A trimmed, non-empty SerpShot API key.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKey(String);

impl ApiKey {
    pub fn new(raw: impl AsRef<str>) -> Result<Self> {
        let key = raw.as_ref().trim();
        if key.is_empty() {
            return Err(Error::authentication("API key is required"));
        }
        Ok(Self(key.to_string()))
    }

    /// Check that the key looks like a real key.
    pub fn validate(&self) -> Result<()> {
        if self.0.chars().count() < MIN_KEY_LEN {
            return Err(Error::authentication("API key appears to be invalid"));
        }
        Ok(())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Default headers sent with every request.
    pub fn headers(&self) -> HashMap<String, String> {
        HashMap::from([
            (API_KEY_HEADER.to_string(), self.0.clone()),
            ("Content-Type".to_string(), "application/json".to_string()),
            ("Accept".to_string(), "application/json".to_string()),
        ])
    }

    pub fn header_map(&self) -> Result<HeaderMap> {
        let mut headers = HeaderMap::new();
        let mut key = HeaderValue::from_str(&self.0)
            .map_err(|_| Error::authentication("API key contains invalid header characters"))?;
        key.set_sensitive(true);
        headers.insert(HeaderName::from_static("x-api-key"), key);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

impl fmt::Debug for ApiKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ApiKey").field(&"<redacted>").finish()
    }
}
