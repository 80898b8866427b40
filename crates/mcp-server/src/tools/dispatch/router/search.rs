use super::super::{CallToolResult, McpError, NewsdeskService};
use super::error::{invalid_filter, render_error, upstream_error};
use super::{render_options, rendered};
use crate::tools::schemas::search::SearchArticlesRequest;
use newsdesk_client::{
    normalize_list, normalize_optional, validate_size, SearchFilters, UPSTREAM_FIELDS,
};
use newsdesk_render::render_result_set;

fn filters_from_request(request: &mut SearchArticlesRequest) -> SearchFilters {
    let defaults = SearchFilters::default();
    SearchFilters {
        query: normalize_optional(request.query.take()),
        languages: normalize_list(request.languages.take()),
        date_from: normalize_optional(request.date_from.take()),
        date_to: normalize_optional(request.date_to.take()),
        size: request.size.unwrap_or(defaults.size),
        offset: request.offset.unwrap_or(defaults.offset),
        sort_order: request.sort_order.unwrap_or(defaults.sort_order),
        countries: normalize_list(request.countries.take()),
        topics: normalize_list(request.topics.take()),
        products: normalize_list(request.products.take()),
        genre_exclusion: defaults.genre_exclusion,
    }
}

pub(super) async fn search_articles(
    service: &NewsdeskService,
    mut request: SearchArticlesRequest,
) -> Result<CallToolResult, McpError> {
    if let Some(size) = request.size {
        if let Err(err) = validate_size(size) {
            return Ok(invalid_filter(err));
        }
    }

    let mut filters = filters_from_request(&mut request);
    let full_text = service.presets().apply_search(
        &mut filters,
        request.preset,
        request.full_text.unwrap_or(false),
    );
    if let Err(err) = filters.validate() {
        return Ok(invalid_filter(err));
    }
    log::debug!(
        "search_articles preset={:?} size={} offset={}",
        request.preset.map(|p| p.as_str()),
        filters.size,
        filters.offset
    );

    let response = match service.backend().search(&filters, UPSTREAM_FIELDS).await {
        Ok(response) => response,
        Err(err) => return Ok(upstream_error("searching articles", &err)),
    };

    let options = render_options(service, request.format, request.fields.as_deref(), full_text);
    match render_result_set(&response.into_result_set(filters.offset), &options) {
        Ok(output) => Ok(rendered(output)),
        Err(err) => Ok(render_error(err)),
    }
}
