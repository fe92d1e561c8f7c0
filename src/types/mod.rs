//! 类型模块：搜索请求与响应的核心数据类型。
//!
//! # Types Module
//!
//! Strongly-typed inputs and outputs of the SerpShot API.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`SearchQuery`] | One query or a batch of queries |
//! | [`SearchOptions`] | Result count, page, region and language options |
//! | [`Location`] | Known location code or a pass-through custom code |
//! | [`SearchResponse`] | Normalized response for a single query |
//! | [`SearchOutput`] | `Single` or `Batch`, echoing the query arity |

pub mod response;
pub mod search;

pub use response::{ImageResult, OrganicResult, SearchOutput, SearchResponse, SearchResults};
pub use search::{Location, LocationCode, SearchOptions, SearchQuery, SearchType};
