// Per-tool dispatch functions used by the MCP tool router.

pub(super) mod article;
pub(super) mod error;
pub(super) mod facets;
pub(super) mod search;
pub(super) mod similar;
pub(super) mod subscriptions;
mod tool_router;

use super::{CallToolResult, Content, NewsdeskService};
use newsdesk_protocol::RequestedField;
use newsdesk_render::{OutputFormat, RenderOptions, RenderedOutput};
use rmcp::handler::server::tool::ToolRouter;

pub(super) fn build_tool_router() -> ToolRouter<NewsdeskService> {
    tool_router::build_tool_router()
}

pub(in crate::tools::dispatch) fn render_options(
    service: &NewsdeskService,
    format: Option<OutputFormat>,
    fields: Option<&[String]>,
    full_text: bool,
) -> RenderOptions {
    RenderOptions {
        format: format.unwrap_or_default(),
        fields: RequestedField::parse_list(fields),
        full_text,
        max_chars: service.max_chars(),
    }
}

pub(in crate::tools::dispatch) fn rendered(output: RenderedOutput) -> CallToolResult {
    CallToolResult::success(
        output
            .items
            .into_iter()
            .map(|block| Content::text(block.text))
            .collect(),
    )
}
