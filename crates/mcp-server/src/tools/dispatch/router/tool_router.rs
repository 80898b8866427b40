use super::super::{CallToolResult, McpError, NewsdeskService};
use crate::tools::schemas::article::GetArticleRequest;
use crate::tools::schemas::facets::ListFacetsRequest;
use crate::tools::schemas::search::SearchArticlesRequest;
use crate::tools::schemas::similar::FindSimilarRequest;
use crate::tools::schemas::subscriptions::{
    AddSubscriptionRequest, DeleteSubscriptionRequest, ListSubscriptionsRequest,
};

use rmcp::handler::server::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::{tool, tool_router};

pub(super) fn build_tool_router() -> ToolRouter<NewsdeskService> {
    NewsdeskService::tool_router()
}

#[tool_router]
impl NewsdeskService {
    /// Search the news wire.
    #[tool(
        description = "Search news articles by free text, language, date range, country, topic or product. Returns markdown (default), json or csv; presets 'a-la-une', 'agenda', 'previsions' and 'major-stories' apply curated filters and render full text."
    )]
    pub async fn search_articles(
        &self,
        Parameters(request): Parameters<SearchArticlesRequest>,
    ) -> Result<CallToolResult, McpError> {
        super::search::search_articles(self, request).await
    }

    /// Fetch one article in full.
    #[tool(description = "Fetch a single article by its identifier (UNO), with full body and metadata.")]
    pub async fn get_article(
        &self,
        Parameters(request): Parameters<GetArticleRequest>,
    ) -> Result<CallToolResult, McpError> {
        super::article::get_article(self, request).await
    }

    /// Related coverage.
    #[tool(description = "Find articles similar to a given article (same story, follow-ups, related coverage).")]
    pub async fn find_similar(
        &self,
        Parameters(request): Parameters<FindSimilarRequest>,
    ) -> Result<CallToolResult, McpError> {
        super::similar::find_similar(self, request).await
    }

    /// Facet value counts.
    #[tool(
        description = "List the values of a facet (e.g. 'slug' topics, 'genre', 'country') with document counts. Use preset 'trending-topics' for the most used topics of the last day."
    )]
    pub async fn list_facets(
        &self,
        Parameters(request): Parameters<ListFacetsRequest>,
    ) -> Result<CallToolResult, McpError> {
        super::facets::list_facets(self, request).await
    }

    #[tool(description = "List the notification subscriptions registered for this account.")]
    pub async fn list_subscriptions(
        &self,
        Parameters(request): Parameters<ListSubscriptionsRequest>,
    ) -> Result<CallToolResult, McpError> {
        super::subscriptions::list_subscriptions(self, request).await
    }

    #[tool(
        description = "Register a notification subscription that fires when new articles match the given query and filters."
    )]
    pub async fn add_subscription(
        &self,
        Parameters(request): Parameters<AddSubscriptionRequest>,
    ) -> Result<CallToolResult, McpError> {
        super::subscriptions::add_subscription(self, request).await
    }

    #[tool(description = "Delete a notification subscription by name.")]
    pub async fn delete_subscription(
        &self,
        Parameters(request): Parameters<DeleteSubscriptionRequest>,
    ) -> Result<CallToolResult, McpError> {
        super::subscriptions::delete_subscription(self, request).await
    }
}
