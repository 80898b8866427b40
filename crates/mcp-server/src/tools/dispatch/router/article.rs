use super::super::{CallToolResult, McpError, NewsdeskService};
use super::error::{invalid_request, render_error, upstream_error};
use super::{render_options, rendered};
use crate::tools::schemas::article::GetArticleRequest;
use newsdesk_render::render_article;

pub(super) async fn get_article(
    service: &NewsdeskService,
    request: GetArticleRequest,
) -> Result<CallToolResult, McpError> {
    let id = request.id.trim();
    if id.is_empty() {
        return Ok(invalid_request("`id` must not be empty"));
    }

    let doc = match service.backend().get(id).await {
        Ok(doc) => doc,
        Err(err) => return Ok(upstream_error(&format!("fetching article {id}"), &err)),
    };

    let options = render_options(service, request.format, request.fields.as_deref(), true);
    match render_article(&doc, &options) {
        Ok(output) => Ok(rendered(output)),
        Err(err) => Ok(render_error(err)),
    }
}
