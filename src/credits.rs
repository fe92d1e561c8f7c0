//! Advisory credit estimation.
//!
//! The backend reports the authoritative cost in each response
//! (`credits_used`). These figures are a local heuristic for budgeting before
//! a call and are never reconciled against, or substituted for, that value.

use crate::protocol::SearchRequest;
use crate::types::SearchType;
use serde::{Deserialize, Serialize};

const PREMIUM_REGIONS: [&str; 4] = ["us", "uk", "ca", "au"];

/// Estimated credits for one query.
pub fn estimate_credits(kind: SearchType, num: u32, gl: Option<&str>) -> u32 {
    let mut cost: u32 = match kind {
        SearchType::Search => 1,
        SearchType::Image => 2,
    };

    if num > 10 {
        cost += (num - 10) / 10;
    }

    if let Some(gl) = gl {
        if PREMIUM_REGIONS.iter().any(|r| r.eq_ignore_ascii_case(gl.trim())) {
            cost = (f64::from(cost) * 1.2) as u32;
        }
    }

    cost.max(1)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreditEstimate {
    pub per_query: u32,
    pub queries: u32,
    pub total: u32,
}

impl CreditEstimate {
    /// Estimate for a whole request: per-query cost times the number of queries.
    pub fn for_request(req: &SearchRequest) -> Self {
        let per_query = estimate_credits(req.search_type, req.num, Some(req.gl.as_str()));
        let queries = u32::try_from(req.queries.len()).unwrap_or(u32::MAX);
        Self {
            per_query,
            queries,
            total: per_query.saturating_mul(queries),
        }
    }
}
