//! Search inputs: query arity, search kind, location and options.

use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Kind of search performed by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum SearchType {
    #[default]
    Search,
    Image,
}

impl SearchType {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchType::Search => "search",
            SearchType::Image => "image",
        }
    }
}

impl fmt::Display for SearchType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Location codes the backend is known to accept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LocationCode {
    US,
    IN,
    JP,
    BR,
    GB,
    DE,
    CA,
    FR,
    ID,
    MX,
    SG,
    IR,
}

impl LocationCode {
    pub const ALL: [LocationCode; 12] = [
        LocationCode::US,
        LocationCode::IN,
        LocationCode::JP,
        LocationCode::BR,
        LocationCode::GB,
        LocationCode::DE,
        LocationCode::CA,
        LocationCode::FR,
        LocationCode::ID,
        LocationCode::MX,
        LocationCode::SG,
        LocationCode::IR,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LocationCode::US => "US",
            LocationCode::IN => "IN",
            LocationCode::JP => "JP",
            LocationCode::BR => "BR",
            LocationCode::GB => "GB",
            LocationCode::DE => "DE",
            LocationCode::CA => "CA",
            LocationCode::FR => "FR",
            LocationCode::ID => "ID",
            LocationCode::MX => "MX",
            LocationCode::SG => "SG",
            LocationCode::IR => "IR",
        }
    }

    /// Case-insensitive lookup.
    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.as_str().eq_ignore_ascii_case(code.trim()))
    }
}

/// Location for local search.
///
/// Unrecognized codes are kept (uppercased) so locations added on the backend
/// keep working with older clients. Both variants serialize as a bare string.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Location {
    Known(LocationCode),
    Custom(String),
}

impl Location {
    /// Never fails: unknown input becomes `Custom` with the uppercased text.
    pub fn parse(raw: &str) -> Self {
        match LocationCode::from_code(raw) {
            Some(code) => Location::Known(code),
            None => Location::Custom(raw.trim().to_uppercase()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Location::Known(code) => code.as_str(),
            Location::Custom(s) => s.as_str(),
        }
    }
}

impl From<LocationCode> for Location {
    fn from(code: LocationCode) -> Self {
        Location::Known(code)
    }
}

impl From<&str> for Location {
    fn from(raw: &str) -> Self {
        Location::parse(raw)
    }
}

impl From<String> for Location {
    fn from(raw: String) -> Self {
        Location::parse(&raw)
    }
}

impl Serialize for Location {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One query or a batch of queries.
///
/// The arity decides the shape of the output: `Single` yields one response,
/// `Batch` yields one response per query in input order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchQuery {
    Single(String),
    Batch(Vec<String>),
}

impl SearchQuery {
    /// Query strings in order; a single query is a one-element slice.
    pub fn queries(&self) -> &[String] {
        match self {
            SearchQuery::Single(q) => std::slice::from_ref(q),
            SearchQuery::Batch(qs) => qs,
        }
    }

    pub fn is_batch(&self) -> bool {
        matches!(self, SearchQuery::Batch(_))
    }

    pub fn len(&self) -> usize {
        self.queries().len()
    }

    pub fn is_empty(&self) -> bool {
        self.queries().is_empty()
    }
}

impl From<&str> for SearchQuery {
    fn from(q: &str) -> Self {
        SearchQuery::Single(q.to_string())
    }
}

impl From<String> for SearchQuery {
    fn from(q: String) -> Self {
        SearchQuery::Single(q)
    }
}

impl From<Vec<String>> for SearchQuery {
    fn from(qs: Vec<String>) -> Self {
        SearchQuery::Batch(qs)
    }
}

impl From<Vec<&str>> for SearchQuery {
    fn from(qs: Vec<&str>) -> Self {
        SearchQuery::Batch(qs.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for SearchQuery {
    fn from(qs: &[&str]) -> Self {
        SearchQuery::Batch(qs.iter().map(|q| q.to_string()).collect())
    }
}

impl<const N: usize> From<[&str; N]> for SearchQuery {
    fn from(qs: [&str; N]) -> Self {
        SearchQuery::Batch(qs.iter().map(|q| q.to_string()).collect())
    }
}

/// Per-call search options.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchOptions {
    /// Results per page (1-100)
    pub num: u32,
    /// Page number, starting at 1
    pub page: u32,
    /// Country code (e.g. "us", "cn")
    pub gl: String,
    /// Interface language (e.g. "en", "zh-CN")
    pub hl: String,
    /// Content language restriction
    pub lr: String,
    pub location: Option<Location>,
}

impl Default for SearchOptions {
    fn default() -> Self {
        Self {
            num: 10,
            page: 1,
            gl: "us".to_string(),
            hl: "en".to_string(),
            lr: "en".to_string(),
            location: None,
        }
    }
}

impl SearchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn num(mut self, num: u32) -> Self {
        self.num = num;
        self
    }

    pub fn page(mut self, page: u32) -> Self {
        self.page = page;
        self
    }

    pub fn gl(mut self, gl: impl Into<String>) -> Self {
        self.gl = gl.into();
        self
    }

    pub fn hl(mut self, hl: impl Into<String>) -> Self {
        self.hl = hl.into();
        self
    }

    pub fn lr(mut self, lr: impl Into<String>) -> Self {
        self.lr = lr.into();
        self
    }

    pub fn location(mut self, location: impl Into<Location>) -> Self {
        self.location = Some(location.into());
        self
    }
}
