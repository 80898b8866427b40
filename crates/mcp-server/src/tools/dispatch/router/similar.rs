use super::super::budgets::DEFAULT_SIMILAR_SIZE;
use super::super::{CallToolResult, McpError, NewsdeskService};
use super::error::{invalid_filter, invalid_request, render_error, upstream_error};
use super::{render_options, rendered};
use crate::tools::schemas::similar::FindSimilarRequest;
use newsdesk_client::{normalize_optional, validate_size};
use newsdesk_render::render_result_set;

pub(super) async fn find_similar(
    service: &NewsdeskService,
    request: FindSimilarRequest,
) -> Result<CallToolResult, McpError> {
    let id = request.id.trim();
    if id.is_empty() {
        return Ok(invalid_request("`id` must not be empty"));
    }
    let size = request.size.unwrap_or(DEFAULT_SIMILAR_SIZE);
    if let Err(err) = validate_size(size) {
        return Ok(invalid_filter(err));
    }
    let language = normalize_optional(request.language);

    let response = match service
        .backend()
        .find_similar(id, language.as_deref(), size)
        .await
    {
        Ok(response) => response,
        Err(err) => {
            return Ok(upstream_error(
                &format!("finding articles similar to {id}"),
                &err,
            ))
        }
    };

    let options = render_options(
        service,
        request.format,
        request.fields.as_deref(),
        request.full_text.unwrap_or(false),
    );
    match render_result_set(&response.into_result_set(0), &options) {
        Ok(output) => Ok(rendered(output)),
        Err(err) => Ok(render_error(err)),
    }
}
