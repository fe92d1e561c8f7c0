//! 客户端模块：异步与阻塞两种 SerpShot 客户端。
//!
//! # Client Module
//!
//! | Item | Description |
//! |------|-------------|
//! | [`SerpShotClient`] | Async client (tokio) |
//! | [`BlockingSerpShotClient`] | Thread-blocking client (feature `blocking`) |
//! | [`SerpShotClientBuilder`] | Configuration from code and environment |
//! | [`policy`] | Retry state machine shared by both transports |

mod builder;
mod core;
mod search;

#[cfg(feature = "blocking")]
mod blocking;

pub mod policy;

#[cfg(feature = "blocking")]
pub use blocking::BlockingSerpShotClient;
pub use builder::{
    ClientConfig, SerpShotClientBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, ENV_API_KEY,
    ENV_BASE_URL, ENV_MAX_RETRIES, ENV_PROXY_URL, ENV_STRICT_KEY, ENV_TIMEOUT_SECS,
};
pub use self::core::SerpShotClient;
pub use policy::RetryPolicy;
