use crate::error::Result;
use crate::filters::{FacetParams, SearchFilters};
use async_trait::async_trait;
pub use newsdesk_protocol::Subscription;
use newsdesk_protocol::{Document, FacetEntry, ResultSet};

/// Upstream field names always requested from the search endpoint.
///
/// Projection happens locally, so the backend fetches every field any output format can show.
pub const UPSTREAM_FIELDS: &[&str] = &[
    "uno",
    "headline",
    "published",
    "lang",
    "genre",
    "news",
    "status",
    "signal",
    "advisory",
    "country",
    "city",
    "slug",
    "product",
    "revision",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchResponse {
    pub documents: Vec<Document>,
    /// Total hits upstream, not just this page.
    pub count: u64,
}

impl SearchResponse {
    pub fn into_result_set(self, offset: usize) -> ResultSet {
        ResultSet::new(self.documents, self.count, offset as u64)
    }
}

#[async_trait]
pub trait NewsBackend: Send + Sync {
    async fn search(&self, filters: &SearchFilters, fields: &[&str]) -> Result<SearchResponse>;

    async fn get(&self, id: &str) -> Result<Document>;

    async fn find_similar(
        &self,
        id: &str,
        language: Option<&str>,
        size: usize,
    ) -> Result<SearchResponse>;

    async fn list_facet(
        &self,
        facet: &str,
        params: &FacetParams,
        size: usize,
    ) -> Result<Vec<FacetEntry>>;

    async fn list_subscriptions(&self) -> Result<Vec<Subscription>>;

    async fn add_subscription(&self, name: &str, filters: &SearchFilters) -> Result<Subscription>;

    async fn delete_subscription(&self, name: &str) -> Result<()>;
}
