//! Blocking client.

use crate::client::builder::{ClientConfig, SerpShotClientBuilder};
use crate::client::search::{batch_query, PreparedSearch};
use crate::protocol::SEARCH_PATH;
use crate::transport::BlockingHttpTransport;
use crate::types::{SearchOptions, SearchOutput, SearchQuery, SearchResponse, SearchType};
use crate::Result;
use reqwest::Method;

/// Blocking SerpShot client: each call holds the calling thread until the
/// response (or the last retry) arrives.
///
/// Do not use inside an async runtime; use [`crate::SerpShotClient`] there.
///
/// ```rust,no_run
/// use serpshot::{BlockingSerpShotClient, SearchOptions};
///
/// let client = BlockingSerpShotClient::new("your-api-key")?;
/// let responses = client.search_batch(&["Python", "Rust"], &SearchOptions::new().num(5))?;
/// for r in &responses {
///     println!("{}: {} results", r.query, r.results.len());
/// }
/// # Ok::<(), serpshot::Error>(())
/// ```
pub struct BlockingSerpShotClient {
    config: ClientConfig,
    transport: BlockingHttpTransport,
}

impl BlockingSerpShotClient {
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        SerpShotClientBuilder::new().api_key(api_key).build_blocking()
    }

    pub fn from_env() -> Result<Self> {
        SerpShotClientBuilder::new().build_blocking()
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = BlockingHttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn open(&self) -> Result<()> {
        self.transport.open().map(|_| ())
    }

    pub fn close(&self) {
        self.transport.close();
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    pub fn search(&self, query: impl Into<SearchQuery>, options: &SearchOptions) -> Result<SearchOutput> {
        let prepared = PreparedSearch::new(query.into(), SearchType::Search, options)?;
        let raw = self.send(&prepared)?;
        Ok(prepared.finish(&raw))
    }

    pub fn image_search(
        &self,
        query: impl Into<SearchQuery>,
        options: &SearchOptions,
    ) -> Result<SearchOutput> {
        let prepared = PreparedSearch::new(query.into(), SearchType::Image, options)?;
        let raw = self.send(&prepared)?;
        Ok(prepared.finish(&raw))
    }

    pub fn search_one(&self, query: &str, options: &SearchOptions) -> Result<SearchResponse> {
        self.one(query, SearchType::Search, options)
    }

    pub fn search_batch<S: AsRef<str>>(
        &self,
        queries: &[S],
        options: &SearchOptions,
    ) -> Result<Vec<SearchResponse>> {
        self.batch(batch_query(queries), SearchType::Search, options)
    }

    pub fn image_search_one(&self, query: &str, options: &SearchOptions) -> Result<SearchResponse> {
        self.one(query, SearchType::Image, options)
    }

    pub fn image_search_batch<S: AsRef<str>>(
        &self,
        queries: &[S],
        options: &SearchOptions,
    ) -> Result<Vec<SearchResponse>> {
        self.batch(batch_query(queries), SearchType::Image, options)
    }

    fn one(&self, query: &str, kind: SearchType, options: &SearchOptions) -> Result<SearchResponse> {
        let prepared = PreparedSearch::new(SearchQuery::from(query), kind, options)?;
        let raw = self.send(&prepared)?;
        Ok(prepared.finish_single(&raw))
    }

    fn batch(
        &self,
        query: SearchQuery,
        kind: SearchType,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResponse>> {
        let prepared = PreparedSearch::new(query, kind, options)?;
        let raw = self.send(&prepared)?;
        Ok(prepared.finish_batch(&raw))
    }

    fn send(&self, prepared: &PreparedSearch) -> Result<serde_json::Value> {
        self.transport
            .send(Method::POST, SEARCH_PATH, &prepared.body, &prepared.request_id)
    }
}

impl std::fmt::Debug for BlockingSerpShotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockingSerpShotClient")
            .field("base_url", &self.config.base_url)
            .field("open", &self.is_open())
            .finish()
    }
}
