//! MCP dispatch for the newsdesk server.
//!
//! The service owns the upstream backend and the preset table; both are shared read-only
//! across concurrent tool calls.

mod budgets;
mod prompts;
mod resources;
mod router;

use newsdesk_client::{NewsBackend, PresetTable};
use newsdesk_protocol::OUTPUT_MAX_CHARS;
use rmcp::handler::server::router::prompt::PromptRouter;
use rmcp::handler::server::tool::ToolRouter;
use rmcp::model::{
    CallToolResult, Content, GetPromptRequestParam, GetPromptResult, Implementation,
    ListPromptsResult, ListResourcesResult, PaginatedRequestParam, ReadResourceRequestParam,
    ReadResourceResult, ServerCapabilities, ServerInfo,
};
use rmcp::service::RequestContext;
use rmcp::{prompt_handler, tool_handler, ErrorData as McpError, RoleServer, ServerHandler};
use std::sync::Arc;

/// Newsdesk MCP service
#[derive(Clone)]
pub struct NewsdeskService {
    backend: Arc<dyn NewsBackend>,
    presets: Arc<PresetTable>,
    /// Character ceiling applied to every tool response
    max_chars: usize,
    tool_router: ToolRouter<Self>,
    prompt_router: PromptRouter<Self>,
}

impl NewsdeskService {
    pub fn new(backend: Arc<dyn NewsBackend>) -> Self {
        Self::with_presets(backend, Arc::new(PresetTable::builtin()))
    }

    pub fn with_presets(backend: Arc<dyn NewsBackend>, presets: Arc<PresetTable>) -> Self {
        Self {
            backend,
            presets,
            max_chars: OUTPUT_MAX_CHARS,
            tool_router: router::build_tool_router(),
            prompt_router: prompts::build_prompt_router(),
        }
    }

    /// Overrides the response ceiling.
    #[must_use]
    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    pub(in crate::tools::dispatch) fn backend(&self) -> &dyn NewsBackend {
        self.backend.as_ref()
    }

    pub(in crate::tools::dispatch) fn presets(&self) -> &PresetTable {
        &self.presets
    }

    pub(in crate::tools::dispatch) fn max_chars(&self) -> usize {
        self.max_chars
    }
}

const INSTRUCTIONS: &str = "Newsdesk gives access to a news agency wire. Use 'search_articles' to find dispatches (presets: a-la-une, agenda, previsions, major-stories), 'get_article' to read one in full, 'find_similar' for related coverage and 'list_facets' to explore topics, genres or countries (preset: trending-topics). Responses are capped at 25000 characters; narrow with 'size', 'offset' or filters when a truncation notice appears. Read the newsdesk://fields resource for the fields accepted by json/csv output.";

#[tool_handler]
#[prompt_handler]
impl ServerHandler for NewsdeskService {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(INSTRUCTIONS.into()),
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_prompts()
                .enable_resources()
                .build(),
            server_info: Implementation::from_build_env(),
            ..Default::default()
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        Ok(resources::list())
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        resources::read(&request.uri, self.presets())
    }
}
