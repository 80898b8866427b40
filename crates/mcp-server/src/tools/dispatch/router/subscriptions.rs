use super::super::{CallToolResult, Content, McpError, NewsdeskService};
use super::error::{invalid_request, render_error, upstream_error};
use super::rendered;
use crate::tools::schemas::subscriptions::{
    AddSubscriptionRequest, DeleteSubscriptionRequest, ListSubscriptionsRequest,
};
use newsdesk_client::{normalize_list, normalize_optional, SearchFilters};
use newsdesk_render::{render_subscriptions, RenderOptions};

pub(super) async fn list_subscriptions(
    service: &NewsdeskService,
    request: ListSubscriptionsRequest,
) -> Result<CallToolResult, McpError> {
    let subscriptions = match service.backend().list_subscriptions().await {
        Ok(subscriptions) => subscriptions,
        Err(err) => return Ok(upstream_error("listing subscriptions", &err)),
    };
    let options = RenderOptions {
        format: request.format.unwrap_or_default(),
        max_chars: service.max_chars(),
        ..RenderOptions::default()
    };
    match render_subscriptions(&subscriptions, &options) {
        Ok(output) => Ok(rendered(output)),
        Err(err) => Ok(render_error(err)),
    }
}

pub(super) async fn add_subscription(
    service: &NewsdeskService,
    request: AddSubscriptionRequest,
) -> Result<CallToolResult, McpError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Ok(invalid_request("`name` must not be empty"));
    }
    let filters = SearchFilters {
        query: normalize_optional(request.query),
        languages: normalize_list(request.languages),
        topics: normalize_list(request.topics),
        products: normalize_list(request.products),
        ..SearchFilters::default()
    };

    match service.backend().add_subscription(name, &filters).await {
        Ok(created) => Ok(CallToolResult::success(vec![Content::text(format!(
            "Subscription `{}` registered.",
            created.name
        ))])),
        Err(err) => Ok(upstream_error(&format!("adding subscription {name}"), &err)),
    }
}

pub(super) async fn delete_subscription(
    service: &NewsdeskService,
    request: DeleteSubscriptionRequest,
) -> Result<CallToolResult, McpError> {
    let name = request.name.trim();
    if name.is_empty() {
        return Ok(invalid_request("`name` must not be empty"));
    }
    match service.backend().delete_subscription(name).await {
        Ok(()) => Ok(CallToolResult::success(vec![Content::text(format!(
            "Subscription `{name}` deleted."
        ))])),
        Err(err) => Ok(upstream_error(&format!("deleting subscription {name}"), &err)),
    }
}
