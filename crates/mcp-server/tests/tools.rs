mod support;

use async_trait::async_trait;
use newsdesk_client::{
    BackendError, FacetParams, FixtureBackend, NewsBackend, SearchFilters, SearchResponse,
    Subscription,
};
use newsdesk_mcp::tools::schemas::article::GetArticleRequest;
use newsdesk_mcp::tools::schemas::facets::ListFacetsRequest;
use newsdesk_mcp::tools::schemas::search::SearchArticlesRequest;
use newsdesk_mcp::tools::schemas::similar::FindSimilarRequest;
use newsdesk_mcp::tools::schemas::subscriptions::{
    AddSubscriptionRequest, DeleteSubscriptionRequest, ListSubscriptionsRequest,
};
use newsdesk_mcp::NewsdeskService;
use newsdesk_protocol::{Document, FacetEntry};
use pretty_assertions::assert_eq;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::CallToolResult;
use rmcp::ServerHandler;
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

fn texts(result: &CallToolResult) -> Vec<String> {
    result
        .content
        .iter()
        .filter_map(|c| c.as_text())
        .map(|t| t.text.clone())
        .collect()
}

fn request<T: serde::de::DeserializeOwned>(args: Value) -> T {
    serde_json::from_value(args).expect("request should deserialize")
}

fn fixture_service() -> NewsdeskService {
    NewsdeskService::new(Arc::new(FixtureBackend::new(support::sample_articles())))
}

/// Fails every call and counts how often it was reached.
#[derive(Default)]
struct FailingBackend {
    calls: AtomicUsize,
}

impl FailingBackend {
    fn fail<T>(&self) -> newsdesk_client::Result<T> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(BackendError::Status {
            status: 503,
            body: "maintenance".to_string(),
        })
    }
}

#[async_trait]
impl NewsBackend for FailingBackend {
    async fn search(
        &self,
        _: &SearchFilters,
        _: &[&str],
    ) -> newsdesk_client::Result<SearchResponse> {
        self.fail()
    }

    async fn get(&self, _: &str) -> newsdesk_client::Result<Document> {
        self.fail()
    }

    async fn find_similar(
        &self,
        _: &str,
        _: Option<&str>,
        _: usize,
    ) -> newsdesk_client::Result<SearchResponse> {
        self.fail()
    }

    async fn list_facet(
        &self,
        _: &str,
        _: &FacetParams,
        _: usize,
    ) -> newsdesk_client::Result<Vec<FacetEntry>> {
        self.fail()
    }

    async fn list_subscriptions(&self) -> newsdesk_client::Result<Vec<Subscription>> {
        self.fail()
    }

    async fn add_subscription(
        &self,
        _: &str,
        _: &SearchFilters,
    ) -> newsdesk_client::Result<Subscription> {
        self.fail()
    }

    async fn delete_subscription(&self, _: &str) -> newsdesk_client::Result<()> {
        self.fail()
    }
}

#[test]
fn server_info_advertises_tools_prompts_and_resources() {
    let info = fixture_service().get_info();
    assert!(info.capabilities.tools.is_some());
    assert!(info.capabilities.prompts.is_some());
    assert!(info.capabilities.resources.is_some());
    assert!(info.instructions.unwrap_or_default().contains("search_articles"));
}

#[tokio::test]
async fn zero_results_yield_a_single_block_in_every_format() {
    let service = NewsdeskService::new(Arc::new(FixtureBackend::new(Vec::new())));
    for format in ["markdown", "json", "csv"] {
        let result = service
            .search_articles(Parameters(request(json!({ "format": format }))))
            .await
            .unwrap();
        assert_ne!(result.is_error, Some(true));
        assert_eq!(texts(&result), vec!["No results found.".to_string()], "{format}");
    }

    let facets = service
        .list_facets(Parameters(request(json!({ "facet": "genre" }))))
        .await
        .unwrap();
    assert_eq!(texts(&facets), vec!["No results found.".to_string()]);
}

#[tokio::test]
async fn a_la_une_forces_full_text_and_french() {
    let service = fixture_service();
    let result = service
        .search_articles(Parameters(request(json!({
            "preset": "a-la-une",
            "languages": ["en"],
            "full_text": false,
        }))))
        .await
        .unwrap();
    let blocks = texts(&result);
    assert_eq!(blocks[0], "Showing 3 of 3 results (offset: 0).");
    assert!(blocks[1].starts_with("## Headline fr-3"));
    let all = blocks.join("\n");
    assert!(all.contains("Paragraph 6 of fr-1."));
    assert!(!all.contains("en-1"));
}

#[tokio::test]
async fn markdown_list_shows_four_paragraphs_without_full_text() {
    let service = fixture_service();
    let result = service
        .search_articles(Parameters(request(json!({ "languages": ["fr"] }))))
        .await
        .unwrap();
    let all = texts(&result).join("\n");
    assert!(all.contains("Paragraph 4 of fr-1."));
    assert!(!all.contains("Paragraph 5 of fr-1."));
}

#[tokio::test]
async fn pagination_line_points_at_next_offset() {
    let service = fixture_service();
    let result = service
        .search_articles(Parameters(request(json!({ "size": 2, "offset": 2 }))))
        .await
        .unwrap();
    let blocks = texts(&result);
    assert_eq!(
        blocks[0],
        "Showing 2 of 5 results (offset: 2). Use offset=4 to see more."
    );
    assert_eq!(blocks.len(), 3);
    assert!(blocks[1].starts_with("## Headline fr-3"));
}

#[tokio::test]
async fn json_output_projects_requested_fields() {
    let service = fixture_service();
    let result = service
        .search_articles(Parameters(request(json!({
            "languages": ["en"],
            "format": "json",
            "fields": ["id", "headline", "nonsense"],
        }))))
        .await
        .unwrap();
    let blocks = texts(&result);
    assert_eq!(blocks.len(), 1);
    let value: Value = serde_json::from_str(&blocks[0]).unwrap();
    assert_eq!(
        value,
        json!({
            "total": 2,
            "offset": 0,
            "shown": 2,
            "truncated": false,
            "documents": [
                { "id": "en-2", "headline": "Headline en-2", "nonsense": null },
                { "id": "en-1", "headline": "Headline en-1", "nonsense": null },
            ],
        })
    );
}

#[tokio::test]
async fn csv_output_has_header_plus_one_line_per_document() {
    let service = fixture_service();
    let result = service
        .search_articles(Parameters(request(json!({
            "languages": ["fr"],
            "format": "csv",
            "fields": ["id", "language"],
        }))))
        .await
        .unwrap();
    let blocks = texts(&result);
    assert_eq!(blocks, vec!["id,language\nfr-3,fr\nfr-2,fr\nfr-1,fr".to_string()]);
}

#[tokio::test]
async fn oversized_markdown_is_truncated_with_notice() {
    let service = fixture_service().with_max_chars(300);
    let result = service
        .search_articles(Parameters(request(json!({ "full_text": true }))))
        .await
        .unwrap();
    let blocks = texts(&result);
    assert!(blocks[0].contains("Use offset="));
    let notice = blocks.last().unwrap();
    assert!(notice.starts_with("⚠️ Response truncated at 300 characters"));
    assert!(notice.contains("of 5 items"));
}

#[tokio::test]
async fn repeated_calls_render_identically() {
    let service = fixture_service();
    let args = json!({ "format": "json", "fields": ["id", "topics", "body"] });
    let first = service
        .search_articles(Parameters(request(args.clone())))
        .await
        .unwrap();
    let second = service
        .search_articles(Parameters(request(args)))
        .await
        .unwrap();
    assert_eq!(texts(&first), texts(&second));
}

#[tokio::test]
async fn get_article_uses_detail_layout() {
    let service = fixture_service();
    let result = service
        .get_article(Parameters(GetArticleRequest {
            id: "fr-1".to_string(),
            ..GetArticleRequest::default()
        }))
        .await
        .unwrap();
    let blocks = texts(&result);
    assert_eq!(blocks.len(), 1);
    assert!(blocks[0].starts_with("# Headline fr-1\n\n**ID:** fr-1"));
    assert!(blocks[0].contains("\n---\n\n"));
    assert!(blocks[0].contains("Paragraph 6 of fr-1."));
}

#[tokio::test]
async fn get_article_failure_names_id_and_cause() {
    let service = fixture_service();
    let result = service
        .get_article(Parameters(GetArticleRequest {
            id: "BAD".to_string(),
            ..GetArticleRequest::default()
        }))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    let text = texts(&result).join("\n");
    assert!(text.starts_with("Error: fetching article BAD: 'BAD' not found"));
    assert!(text.contains("\nHint: Check the identifier"));
}

#[tokio::test]
async fn upstream_outage_is_reported_with_hint() {
    let backend = Arc::new(FailingBackend::default());
    let service = NewsdeskService::new(backend.clone());
    let result = service
        .search_articles(Parameters(SearchArticlesRequest::default()))
        .await
        .unwrap();
    assert_eq!(result.is_error, Some(true));
    let text = texts(&result).join("\n");
    assert!(text.contains("searching articles: upstream returned HTTP 503: maintenance"));
    assert!(text.contains("Hint: The news API may be unavailable"));
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn validation_errors_never_reach_the_backend() {
    let backend = Arc::new(FailingBackend::default());
    let service = NewsdeskService::new(backend.clone());

    let facets = service
        .list_facets(Parameters(ListFacetsRequest::default()))
        .await
        .unwrap();
    assert_eq!(facets.is_error, Some(true));
    assert!(texts(&facets)[0].contains("`facet` is required"));

    let oversized = service
        .search_articles(Parameters(request(json!({ "size": 5000 }))))
        .await
        .unwrap();
    assert_eq!(oversized.is_error, Some(true));
    assert!(texts(&oversized)[0].contains("size must be between 1 and 1000 (got 5000)"));

    let empty_id = service
        .find_similar(Parameters(FindSimilarRequest {
            id: "  ".to_string(),
            ..FindSimilarRequest::default()
        }))
        .await
        .unwrap();
    assert_eq!(empty_id.is_error, Some(true));

    let empty_name = service
        .add_subscription(Parameters(AddSubscriptionRequest::default()))
        .await
        .unwrap();
    assert_eq!(empty_name.is_error, Some(true));

    assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn find_similar_lists_related_articles() {
    let service = fixture_service();
    let result = service
        .find_similar(Parameters(FindSimilarRequest {
            id: "fr-1".to_string(),
            language: Some("en".to_string()),
            ..FindSimilarRequest::default()
        }))
        .await
        .unwrap();
    let blocks = texts(&result);
    assert_eq!(blocks[0], "Showing 2 of 2 results (offset: 0).");
    assert!(blocks[1].starts_with("## Headline en-1"));
}

#[tokio::test]
async fn trending_topics_counts_slugs() {
    let service = fixture_service();
    let result = service
        .list_facets(Parameters(request(json!({ "preset": "trending-topics" }))))
        .await
        .unwrap();
    assert_eq!(
        texts(&result),
        vec!["**Facet `slug`** (2 values)\n\n- economy (5)\n- une (5)".to_string()]
    );
}

#[tokio::test]
async fn subscriptions_round_trip_through_the_backend() {
    let service = fixture_service();
    let added = service
        .add_subscription(Parameters(AddSubscriptionRequest {
            name: "alerts".to_string(),
            query: Some("climat".to_string()),
            ..AddSubscriptionRequest::default()
        }))
        .await
        .unwrap();
    assert_eq!(texts(&added), vec!["Subscription `alerts` registered.".to_string()]);

    let listed = service
        .list_subscriptions(Parameters(ListSubscriptionsRequest::default()))
        .await
        .unwrap();
    assert_eq!(
        texts(&listed),
        vec!["**Subscriptions** (1)\n\n- `alerts` (fixture): climat".to_string()]
    );

    let delete = || {
        service.delete_subscription(Parameters(DeleteSubscriptionRequest {
            name: "alerts".to_string(),
        }))
    };
    let deleted = delete().await.unwrap();
    assert_eq!(texts(&deleted), vec!["Subscription `alerts` deleted.".to_string()]);

    let again = delete().await.unwrap();
    assert_eq!(again.is_error, Some(true));
    assert!(texts(&again)[0].contains("'alerts' not found"));
}
