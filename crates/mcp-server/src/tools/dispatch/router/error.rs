use super::super::{CallToolResult, Content};
use newsdesk_client::{BackendError, InvalidFilter};
use newsdesk_protocol::ErrorEnvelope;
use newsdesk_render::RenderError;

pub(in crate::tools::dispatch) fn tool_error_envelope(error: ErrorEnvelope) -> CallToolResult {
    log::debug!("tool error [{}]: {}", error.code, error.message);
    CallToolResult::error(vec![Content::text(error.render())])
}

pub(in crate::tools::dispatch) fn invalid_request(message: impl Into<String>) -> CallToolResult {
    tool_error_envelope(ErrorEnvelope::new("invalid_request", message))
}

pub(in crate::tools::dispatch) fn invalid_filter(err: InvalidFilter) -> CallToolResult {
    tool_error_envelope(
        ErrorEnvelope::new("invalid_request", err.to_string())
            .with_hint("Lower `size` and page through results with `offset`."),
    )
}

pub(in crate::tools::dispatch) fn render_error(err: RenderError) -> CallToolResult {
    tool_error_envelope(ErrorEnvelope::new(
        "internal",
        format!("rendering response: {err}"),
    ))
}

fn upstream_hint(err: &BackendError) -> Option<&'static str> {
    if err.is_not_found() {
        return Some(
            "Check the identifier or name; search_articles and list_subscriptions return valid values.",
        );
    }
    match err {
        BackendError::Auth(_) | BackendError::Status { status: 401 | 403, .. } => Some(
            "Check NEWSDESK_API_TOKEN, or the NEWSDESK_CLIENT_ID/NEWSDESK_CLIENT_SECRET/NEWSDESK_USERNAME/NEWSDESK_PASSWORD credentials.",
        ),
        BackendError::Status { status: 429, .. } => {
            Some("The news API is rate limiting requests; retry in a moment.")
        }
        BackendError::Status { status: 400, .. } => {
            Some("The news API rejected the query; check dates, language codes and facet names.")
        }
        BackendError::Status { .. } | BackendError::Http(_) => {
            Some("The news API may be unavailable; retry shortly or check NEWSDESK_API_BASE_URL.")
        }
        BackendError::Decode(_) => Some("The news API returned an unexpected payload."),
        BackendError::Fixture { .. } => Some("Check the NEWSDESK_FIXTURES file."),
        BackendError::InvalidUrl(_) => Some(
            "Identifiers and facet names cannot be `.` or `..`; otherwise check NEWSDESK_API_BASE_URL.",
        ),
        BackendError::NotFound(_) | BackendError::Other(_) => None,
    }
}

/// Error payload for a failed upstream call: `context` names the operation, the cause follows.
pub(in crate::tools::dispatch) fn upstream_error(
    context: &str,
    err: &BackendError,
) -> CallToolResult {
    log::warn!("{context} failed: {err}");
    let mut envelope = ErrorEnvelope::new("upstream", format!("{context}: {err}"));
    if let Some(hint) = upstream_hint(err) {
        envelope = envelope.with_hint(hint);
    }
    tool_error_envelope(envelope)
}
