//! HTTP transports.
//!
//! [`HttpTransport`] (async) and [`BlockingHttpTransport`] share the retry
//! state machine in [`crate::client::policy`] and the response classification
//! in [`crate::protocol::envelope`]; they differ only in how they wait.

pub mod http;

#[cfg(feature = "blocking")]
pub mod blocking;

#[cfg(feature = "blocking")]
pub use blocking::BlockingHttpTransport;
pub use http::HttpTransport;

use crate::client::policy::AttemptError;
use std::time::Duration;

/// Header carrying the per-call correlation id.
pub const REQUEST_ID_HEADER: &str = "x-client-request-id";

#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    #[error("Request timeout after {}s", .timeout.as_secs_f64())]
    Timeout {
        timeout: Duration,
        #[source]
        source: reqwest::Error,
    },

    #[error("Network error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Transport error: {0}")]
    Other(String),
}

impl TransportError {
    /// Timeouts, connect failures and interrupted request/response bodies.
    pub fn is_transient(&self) -> bool {
        match self {
            TransportError::Timeout { .. } => true,
            TransportError::Http(e) => e.is_timeout() || e.is_connect() || e.is_request() || e.is_body(),
            TransportError::Other(_) => false,
        }
    }
}

/// Classify a failed send or body read for the retry loop.
pub(crate) fn classify(err: reqwest::Error, timeout: Duration) -> AttemptError {
    let err = if err.is_timeout() {
        TransportError::Timeout {
            timeout,
            source: err,
        }
    } else {
        TransportError::Http(err)
    };
    if err.is_transient() {
        AttemptError::Transient(err)
    } else {
        AttemptError::Unexpected(err)
    }
}
