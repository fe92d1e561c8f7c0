//! Request payload building and pre-flight validation.

use crate::types::{Location, SearchOptions, SearchQuery, SearchType};
use crate::{Error, ErrorContext, Result};
use serde::Serialize;

pub const MAX_QUERIES: usize = 100;
pub const MAX_QUERY_CHARS: usize = 2048;
pub const MIN_NUM: u32 = 1;
pub const MAX_NUM: u32 = 100;

/// Backend-shaped search payload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchRequest {
    pub queries: Vec<String>,
    #[serde(rename = "type")]
    pub search_type: SearchType,
    pub num: u32,
    pub page: u32,
    pub gl: String,
    pub hl: String,
    pub lr: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<Location>,
}

impl SearchRequest {
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

fn invalid(msg: impl Into<String>, field: impl Into<String>, details: String) -> Error {
    Error::validation_with_context(
        msg,
        ErrorContext::new()
            .with_field_path(field)
            .with_details(details)
            .with_source("request_builder"),
    )
}

/// Validate inputs and build the request payload.
///
/// This never touches the network; a failure here means the call is not sent.
pub fn build(query: &SearchQuery, kind: SearchType, options: &SearchOptions) -> Result<SearchRequest> {
    let queries = query.queries();

    if queries.is_empty() || queries.len() > MAX_QUERIES {
        return Err(invalid(
            format!("Between 1 and {} queries are required", MAX_QUERIES),
            "queries",
            format!("got {}", queries.len()),
        ));
    }

    for (i, q) in queries.iter().enumerate() {
        let chars = q.chars().count();
        if chars == 0 || chars > MAX_QUERY_CHARS {
            return Err(invalid(
                format!("Query must be between 1 and {} characters", MAX_QUERY_CHARS),
                format!("queries[{}]", i),
                format!("got {} characters", chars),
            ));
        }
    }

    if !(MIN_NUM..=MAX_NUM).contains(&options.num) {
        return Err(invalid(
            format!("num must be between {} and {}", MIN_NUM, MAX_NUM),
            "num",
            format!("got {}", options.num),
        ));
    }

    if options.page < 1 {
        return Err(invalid(
            "page must be at least 1",
            "page",
            format!("got {}", options.page),
        ));
    }

    Ok(SearchRequest {
        queries: queries.to_vec(),
        search_type: kind,
        num: options.num,
        page: options.page,
        gl: options.gl.clone(),
        hl: options.hl.clone(),
        lr: options.lr.clone(),
        location: options.location.clone(),
    })
}
