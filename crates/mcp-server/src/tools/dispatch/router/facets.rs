use super::super::budgets::DEFAULT_FACET_SIZE;
use super::super::{CallToolResult, McpError, NewsdeskService};
use super::error::{invalid_filter, invalid_request, render_error, upstream_error};
use super::{render_options, rendered};
use crate::tools::schemas::facets::ListFacetsRequest;
use newsdesk_client::{normalize_list, normalize_optional, validate_size, FacetParams};
use newsdesk_render::render_facets;

pub(super) async fn list_facets(
    service: &NewsdeskService,
    request: ListFacetsRequest,
) -> Result<CallToolResult, McpError> {
    if let Some(size) = request.size {
        if let Err(err) = validate_size(size) {
            return Ok(invalid_filter(err));
        }
    }

    let params = FacetParams {
        languages: normalize_list(request.languages),
        date_from: normalize_optional(request.date_from),
    };
    let Some(facet_request) = service.presets().facet_request(
        request.facet,
        request.preset,
        params,
        request.size,
        DEFAULT_FACET_SIZE,
    ) else {
        return Ok(invalid_request(
            "`facet` is required unless `preset` is given (e.g. facet='slug' or preset='trending-topics')",
        ));
    };
    log::debug!(
        "list_facets facet={} size={}",
        facet_request.facet,
        facet_request.size
    );

    let entries = match service
        .backend()
        .list_facet(
            &facet_request.facet,
            &facet_request.params,
            facet_request.size,
        )
        .await
    {
        Ok(entries) => entries,
        Err(err) => {
            return Ok(upstream_error(
                &format!("listing facet {}", facet_request.facet),
                &err,
            ))
        }
    };

    let options = render_options(service, request.format, None, false);
    match render_facets(&facet_request.facet, &entries, &options) {
        Ok(output) => Ok(rendered(output)),
        Err(err) => Ok(render_error(err)),
    }
}
