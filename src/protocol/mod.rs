//! 协议层：请求构建、响应信封解析与结果归一化。
//!
//! # Wire Protocol Layer
//!
//! Everything that knows the shape of SerpShot's JSON lives here. All of it is
//! synchronous and side-effect free; the transports only move bytes.
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`request`] | Pre-flight validation and payload building |
//! | [`envelope`] | HTTP status classification and `{code, msg, data}` unwrapping |
//! | [`response`] | Normalization of backend items into [`crate::types::SearchResponse`] |

pub mod envelope;
pub mod request;
pub mod response;

pub use request::SearchRequest;

/// Search endpoint path, relative to the base URL.
pub const SEARCH_PATH: &str = "/api/search/google";
