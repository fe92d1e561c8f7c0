//! Normalized, client-facing response types.

use super::search::SearchType;
use serde::{Deserialize, Serialize};

/// Standard (non-image) search result entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrganicResult {
    pub title: String,
    pub link: String,
    pub snippet: String,
    pub position: u32,
}

/// Image search result entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageResult {
    pub title: String,
    /// Actual image URL
    pub link: String,
    pub thumbnail: String,
    /// Source website
    pub source: String,
    /// Page the image was found on
    pub source_link: String,
    pub width: u32,
    pub height: u32,
    pub position: u32,
}

/// Results of one query; organic and image entries never mix.
///
/// Serialized with an explicit tag, `{"type": "image", "items": [...]}`, so an
/// empty image list keeps its shape through a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "items", rename_all = "lowercase")]
pub enum SearchResults {
    Organic(Vec<OrganicResult>),
    Image(Vec<ImageResult>),
}

impl Default for SearchResults {
    fn default() -> Self {
        SearchResults::Organic(Vec::new())
    }
}

impl SearchResults {
    /// No results, shaped for `kind`.
    pub fn empty(kind: SearchType) -> Self {
        match kind {
            SearchType::Search => SearchResults::Organic(Vec::new()),
            SearchType::Image => SearchResults::Image(Vec::new()),
        }
    }

    pub fn kind(&self) -> SearchType {
        match self {
            SearchResults::Organic(_) => SearchType::Search,
            SearchResults::Image(_) => SearchType::Image,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            SearchResults::Organic(r) => r.len(),
            SearchResults::Image(r) => r.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn organic(&self) -> Option<&[OrganicResult]> {
        match self {
            SearchResults::Organic(r) => Some(r),
            SearchResults::Image(_) => None,
        }
    }

    pub fn images(&self) -> Option<&[ImageResult]> {
        match self {
            SearchResults::Image(r) => Some(r),
            SearchResults::Organic(_) => None,
        }
    }
}

/// Normalized response for one query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub query: String,
    /// Backend estimate; may be a non-numeric placeholder, so it stays a string.
    pub total_results: String,
    pub search_time: String,
    pub results: SearchResults,
    pub credits_used: u64,
}

impl SearchResponse {
    /// Successful response with no results of the given kind.
    pub fn empty(query: impl Into<String>, kind: SearchType) -> Self {
        Self {
            success: true,
            query: query.into(),
            total_results: "0".to_string(),
            search_time: "0".to_string(),
            results: SearchResults::empty(kind),
            credits_used: 0,
        }
    }
}

/// Output of a search call, echoing the arity of the input query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SearchOutput {
    Single(SearchResponse),
    Batch(Vec<SearchResponse>),
}

impl SearchOutput {
    pub fn as_single(&self) -> Option<&SearchResponse> {
        match self {
            SearchOutput::Single(r) => Some(r),
            SearchOutput::Batch(_) => None,
        }
    }

    pub fn into_single(self) -> Option<SearchResponse> {
        match self {
            SearchOutput::Single(r) => Some(r),
            SearchOutput::Batch(_) => None,
        }
    }

    pub fn into_batch(self) -> Option<Vec<SearchResponse>> {
        match self {
            SearchOutput::Batch(r) => Some(r),
            SearchOutput::Single(_) => None,
        }
    }

    /// Flatten into a vector regardless of arity.
    pub fn into_vec(self) -> Vec<SearchResponse> {
        match self {
            SearchOutput::Single(r) => vec![r],
            SearchOutput::Batch(r) => r,
        }
    }

    pub fn credits_used(&self) -> u64 {
        match self {
            SearchOutput::Single(r) => r.credits_used,
            SearchOutput::Batch(rs) => rs.iter().map(|r| r.credits_used).sum(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_empty_results_keep_their_kind_through_json() {
        for kind in [SearchType::Search, SearchType::Image] {
            let resp = SearchResponse::empty("q", kind);
            let text = serde_json::to_string(&resp).unwrap();
            let back: SearchResponse = serde_json::from_str(&text).unwrap();
            assert_eq!(back, resp);
            assert_eq!(back.results.kind(), kind);
        }
    }

    #[test]
    fn test_results_wire_shape() {
        let results = SearchResults::Image(vec![ImageResult {
            title: "t".into(),
            link: "https://img/1.png".into(),
            thumbnail: String::new(),
            source: "img".into(),
            source_link: "https://img".into(),
            width: 1,
            height: 2,
            position: 1,
        }]);
        let v = serde_json::to_value(&results).unwrap();
        assert_eq!(v["type"], json!("image"));
        assert_eq!(v["items"][0]["source_link"], json!("https://img"));

        let organic: SearchResults =
            serde_json::from_value(json!({"type": "organic", "items": []})).unwrap();
        assert_eq!(organic.kind(), SearchType::Search);
        assert!(organic.images().is_none());
    }
}
