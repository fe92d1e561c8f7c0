//! Shared request preparation and completion for both clients.
//!
//! Everything here is synchronous; the clients only differ in how they send.

use crate::protocol::{request, response};
use crate::types::{SearchOptions, SearchOutput, SearchQuery, SearchResponse, SearchType};
use crate::Result;
use std::time::Instant;
use tracing::{debug, info};
use uuid::Uuid;

/// A validated search ready to be sent.
pub(crate) struct PreparedSearch {
    pub query: SearchQuery,
    pub kind: SearchType,
    pub body: serde_json::Value,
    pub request_id: String,
    started: Instant,
}

impl PreparedSearch {
    pub fn new(query: SearchQuery, kind: SearchType, options: &SearchOptions) -> Result<Self> {
        let req = request::build(&query, kind, options)?;
        let body = req.to_json()?;
        let request_id = Uuid::new_v4().to_string();
        debug!(
            request_id = request_id.as_str(),
            search_type = kind.as_str(),
            queries = query.len(),
            num = options.num,
            page = options.page,
            "dispatching serpshot search"
        );
        Ok(Self {
            query,
            kind,
            body,
            request_id,
            started: Instant::now(),
        })
    }

    /// Normalize the unwrapped payload, echoing the query arity.
    pub fn finish(self, raw: &serde_json::Value) -> SearchOutput {
        let out = response::process(raw, &self.query, self.kind);
        self.log_done(out.credits_used());
        out
    }

    pub fn finish_single(self, raw: &serde_json::Value) -> SearchResponse {
        let query = self.query.queries().first().map(String::as_str).unwrap_or_default();
        let out = response::process_single(raw, query, self.kind);
        self.log_done(out.credits_used);
        out
    }

    pub fn finish_batch(self, raw: &serde_json::Value) -> Vec<SearchResponse> {
        let out = response::process_batch(raw, self.query.queries(), self.kind);
        self.log_done(out.iter().map(|r| r.credits_used).sum());
        out
    }

    fn log_done(&self, credits: u64) {
        info!(
            request_id = self.request_id.as_str(),
            search_type = self.kind.as_str(),
            queries = self.query.len(),
            credits_used = credits,
            duration_ms = self.started.elapsed().as_millis() as u64,
            "serpshot search completed"
        );
    }
}

pub(crate) fn batch_query<S: AsRef<str>>(queries: &[S]) -> SearchQuery {
    SearchQuery::Batch(queries.iter().map(|q| q.as_ref().to_string()).collect())
}
