//! Retry policy as an explicit state machine.
//!
//! The transports feed every failed attempt into [`RetryState::on_failure`]
//! and act on the returned [`Decision`]; the policy itself never performs I/O,
//! so it can be exercised without a server.

use crate::transport::TransportError;
use crate::{Error, Result};
use std::future::Future;
use std::time::Duration;
use tracing::{error, info, warn};

pub const DEFAULT_MAX_RETRIES: u32 = 3;
pub const DEFAULT_BASE_DELAY: Duration = Duration::from_secs(1);

/// How a single attempt failed.
#[derive(Debug)]
pub enum AttemptError {
    /// Timeout or connection failure; eligible for retry.
    Transient(TransportError),
    /// Transport failure that retrying will not fix; surfaced at once.
    Unexpected(TransportError),
    /// API, rate-limit, auth or decoding error; surfaced at once.
    Terminal(Error),
}

/// What to do after a failed attempt.
#[derive(Debug)]
pub enum Decision {
    Retry { delay: Duration },
    Fail(Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts, at least 1.
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: DEFAULT_MAX_RETRIES,
            base_delay: DEFAULT_BASE_DELAY,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_retries: u32, base_delay: Duration) -> Self {
        Self {
            max_retries: max_retries.max(1),
            base_delay,
        }
    }

    /// Exponential backoff: base_delay * 2^attempt (0-based attempt).
    pub fn backoff(&self, attempt: u32) -> Duration {
        let factor = 1u32.checked_shl(attempt).unwrap_or(u32::MAX);
        self.base_delay.saturating_mul(factor)
    }
}

/// Per-call retry bookkeeping.
#[derive(Debug)]
pub struct RetryState {
    policy: RetryPolicy,
    attempt: u32,
    last_error: Option<TransportError>,
}

impl RetryState {
    pub fn new(policy: RetryPolicy) -> Self {
        Self {
            policy: RetryPolicy::new(policy.max_retries, policy.base_delay),
            attempt: 0,
            last_error: None,
        }
    }

    /// Number of attempts that have failed so far.
    pub fn attempts(&self) -> u32 {
        self.attempt
    }

    /// Record a failed attempt and decide how to proceed.
    pub fn on_failure(&mut self, err: AttemptError) -> Decision {
        let attempt = self.attempt;
        self.attempt += 1;
        let max = self.policy.max_retries;

        match err {
            AttemptError::Terminal(e) => Decision::Fail(e),
            AttemptError::Unexpected(e) => {
                error!(attempt = attempt + 1, error = %e, "unexpected transport error");
                Decision::Fail(Error::Network {
                    message: e.to_string(),
                    attempts: self.attempt,
                    source: Some(e),
                })
            }
            AttemptError::Transient(e) => {
                warn!(attempt = attempt + 1, max_retries = max, error = %e, "attempt failed");
                self.last_error = Some(e);
                if self.attempt < max {
                    let delay = self.policy.backoff(attempt);
                    info!(delay_secs = delay.as_secs_f64(), "retrying");
                    return Decision::Retry { delay };
                }
                let last = self.last_error.take();
                let message = last
                    .as_ref()
                    .map(|e| e.to_string())
                    .unwrap_or_else(|| format!("Request failed after {} attempts", max));
                error!(attempts = self.attempt, error = %message, "request failed after retries");
                Decision::Fail(Error::Network {
                    message,
                    attempts: self.attempt,
                    source: last,
                })
            }
        }
    }
}

/// Drive `op` until it succeeds or the policy gives up, sleeping the thread
/// between attempts.
pub fn run_blocking<T>(
    policy: RetryPolicy,
    mut op: impl FnMut() -> std::result::Result<T, AttemptError>,
) -> Result<T> {
    let mut state = RetryState::new(policy);
    loop {
        match op() {
            Ok(v) => return Ok(v),
            Err(e) => match state.on_failure(e) {
                Decision::Retry { delay } => std::thread::sleep(delay),
                Decision::Fail(err) => return Err(err),
            },
        }
    }
}

/// Async counterpart of [`run_blocking`]; backoff yields to the runtime.
pub async fn run_async<T, F, Fut>(policy: RetryPolicy, mut op: F) -> Result<T>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = std::result::Result<T, AttemptError>>,
{
    let mut state = RetryState::new(policy);
    loop {
        match op().await {
            Ok(v) => return Ok(v),
            Err(e) => match state.on_failure(e) {
                Decision::Retry { delay } => tokio::time::sleep(delay).await,
                Decision::Fail(err) => return Err(err),
            },
        }
    }
}
