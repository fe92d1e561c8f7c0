use crate::client::builder::{ClientConfig, SerpShotClientBuilder};
use crate::client::search::{batch_query, PreparedSearch};
use crate::protocol::SEARCH_PATH;
use crate::transport::HttpTransport;
use crate::types::{SearchOptions, SearchOutput, SearchQuery, SearchResponse, SearchType};
use crate::Result;
use reqwest::Method;

/// Async SerpShot client.
///
/// Cheap to share behind an `Arc`: concurrent calls reuse one connection pool.
/// Every call is exactly one backend round-trip, batches included.
///
/// ```rust,no_run
/// use serpshot::{SearchOptions, SerpShotClient};
///
/// #[tokio::main]
/// async fn main() -> serpshot::Result<()> {
///     let client = SerpShotClient::new("your-api-key")?;
///     let response = client.search_one("Python programming", &SearchOptions::default()).await?;
///     println!("{} results", response.total_results);
///     client.close();
///     Ok(())
/// }
/// ```
pub struct SerpShotClient {
    config: ClientConfig,
    transport: HttpTransport,
}

impl SerpShotClient {
    /// Client with an explicit key and default settings.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        SerpShotClientBuilder::new().api_key(api_key).build()
    }

    /// Client configured entirely from the environment (`SERPSHOT_API_KEY`, ...).
    pub fn from_env() -> Result<Self> {
        SerpShotClientBuilder::new().build()
    }

    pub fn builder() -> SerpShotClientBuilder {
        SerpShotClientBuilder::new()
    }

    pub fn with_config(config: ClientConfig) -> Result<Self> {
        let transport = HttpTransport::new(&config)?;
        Ok(Self { config, transport })
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Open the connection pool eagerly. Calls open it lazily otherwise.
    pub fn open(&self) -> Result<()> {
        self.transport.open().map(|_| ())
    }

    /// Release the connection pool. Safe to call more than once; a later call
    /// opens a fresh pool.
    pub fn close(&self) {
        self.transport.close();
    }

    pub fn is_open(&self) -> bool {
        self.transport.is_open()
    }

    /// Web search. A single query yields [`SearchOutput::Single`], a batch
    /// yields [`SearchOutput::Batch`] with one response per query.
    pub async fn search(
        &self,
        query: impl Into<SearchQuery>,
        options: &SearchOptions,
    ) -> Result<SearchOutput> {
        let prepared = PreparedSearch::new(query.into(), SearchType::Search, options)?;
        let raw = self.send(&prepared).await?;
        Ok(prepared.finish(&raw))
    }

    /// Image search; same shapes as [`SerpShotClient::search`].
    pub async fn image_search(
        &self,
        query: impl Into<SearchQuery>,
        options: &SearchOptions,
    ) -> Result<SearchOutput> {
        let prepared = PreparedSearch::new(query.into(), SearchType::Image, options)?;
        let raw = self.send(&prepared).await?;
        Ok(prepared.finish(&raw))
    }

    pub async fn search_one(&self, query: &str, options: &SearchOptions) -> Result<SearchResponse> {
        self.one(query, SearchType::Search, options).await
    }

    pub async fn search_batch<S: AsRef<str>>(
        &self,
        queries: &[S],
        options: &SearchOptions,
    ) -> Result<Vec<SearchResponse>> {
        self.batch(batch_query(queries), SearchType::Search, options).await
    }

    pub async fn image_search_one(
        &self,
        query: &str,
        options: &SearchOptions,
    ) -> Result<SearchResponse> {
        self.one(query, SearchType::Image, options).await
    }

    pub async fn image_search_batch<S: AsRef<str>>(
        &self,
        queries: &[S],
        options: &SearchOptions,
    ) -> Result<Vec<SearchResponse>> {
        self.batch(batch_query(queries), SearchType::Image, options).await
    }

    async fn one(&self, query: &str, kind: SearchType, options: &SearchOptions) -> Result<SearchResponse> {
        let prepared = PreparedSearch::new(SearchQuery::from(query), kind, options)?;
        let raw = self.send(&prepared).await?;
        Ok(prepared.finish_single(&raw))
    }

    async fn batch(
        &self,
        query: SearchQuery,
        kind: SearchType,
        options: &SearchOptions,
    ) -> Result<Vec<SearchResponse>> {
        let prepared = PreparedSearch::new(query, kind, options)?;
        let raw = self.send(&prepared).await?;
        Ok(prepared.finish_batch(&raw))
    }

    async fn send(&self, prepared: &PreparedSearch) -> Result<serde_json::Value> {
        self.transport
            .send(Method::POST, SEARCH_PATH, &prepared.body, &prepared.request_id)
            .await
    }
}

impl std::fmt::Debug for SerpShotClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SerpShotClient")
            .field("base_url", &self.config.base_url)
            .field("open", &self.is_open())
            .finish()
    }
}
