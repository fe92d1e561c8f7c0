//! # serpshot
//!
//! SerpShot API 的 Rust 客户端：Google 搜索结果（网页与图片），支持异步与阻塞调用。
//!
//! Rust client for the SerpShot Google search results API.
//!
//! ## Overview
//!
//! - **Two clients**: [`SerpShotClient`] (async, tokio) and
//!   [`BlockingSerpShotClient`] (feature `blocking`, on by default)
//! - **Batching**: up to 100 queries in a single backend call; the output always
//!   has one response per query, in input order
//! - **Normalization**: image results are remapped onto client-facing names and
//!   organic/image results never mix
//! - **Retry**: transport failures are retried with exponential backoff; API,
//!   auth, rate-limit and validation errors are surfaced immediately
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use serpshot::{SearchOptions, SearchOutput, SerpShotClient};
//!
//! #[tokio::main]
//! async fn main() -> serpshot::Result<()> {
//!     // Reads SERPSHOT_API_KEY
//!     let client = SerpShotClient::from_env()?;
//!
//!     match client.search(["Python", "Rust"], &SearchOptions::new().num(5)).await? {
//!         SearchOutput::Batch(responses) => {
//!             for r in responses {
//!                 println!("{}: {} results", r.query, r.results.len());
//!             }
//!         }
//!         SearchOutput::Single(r) => println!("{}", r.total_results),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Module Organization
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`client`] | Clients, builder and retry policy |
//! | [`protocol`] | Request building, envelope handling, normalization |
//! | [`transport`] | Async and blocking HTTP transports |
//! | [`types`] | Query, options and response types |
//! | [`auth`] | API key handling |
//! | [`credits`] | Advisory credit estimation |

pub mod auth;
pub mod client;
pub mod credits;
pub mod protocol;
pub mod transport;
pub mod types;

pub use auth::ApiKey;
#[cfg(feature = "blocking")]
pub use client::BlockingSerpShotClient;
pub use client::{ClientConfig, RetryPolicy, SerpShotClient, SerpShotClientBuilder};
pub use credits::{estimate_credits, CreditEstimate};
pub use protocol::SearchRequest;
pub use types::{
    ImageResult, Location, LocationCode, OrganicResult, SearchOptions, SearchOutput, SearchQuery,
    SearchResponse, SearchResults, SearchType,
};

/// Result type alias for the library
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for the library
pub mod error;
pub use error::{Error, ErrorContext};
