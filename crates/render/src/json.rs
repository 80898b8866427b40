use newsdesk_protocol::Subscription;
use serde_json::{Map, Value};

/// Pretty-printed (2-space) envelope for a page of projected documents.
///
/// Key order is fixed: `total`, `offset`, `shown`, `truncated`, `documents`.
pub fn documents_payload(
    total: u64,
    offset: u64,
    documents: &[Value],
    truncated: bool,
) -> Result<String, serde_json::Error> {
    let mut map = Map::new();
    map.insert("total".to_string(), Value::from(total));
    map.insert("offset".to_string(), Value::from(offset));
    map.insert("shown".to_string(), Value::from(documents.len()));
    map.insert("truncated".to_string(), Value::Bool(truncated));
    map.insert("documents".to_string(), Value::Array(documents.to_vec()));
    serde_json::to_string_pretty(&Value::Object(map))
}

pub fn facet_payload(
    facet: &str,
    values: &[Value],
    truncated: bool,
) -> Result<String, serde_json::Error> {
    let mut map = Map::new();
    map.insert("facet".to_string(), Value::from(facet));
    map.insert("shown".to_string(), Value::from(values.len()));
    map.insert("truncated".to_string(), Value::Bool(truncated));
    map.insert("values".to_string(), Value::Array(values.to_vec()));
    serde_json::to_string_pretty(&Value::Object(map))
}

pub fn subscriptions_payload(
    subscriptions: &[Subscription],
    truncated: bool,
) -> Result<String, serde_json::Error> {
    let mut map = Map::new();
    map.insert("shown".to_string(), Value::from(subscriptions.len()));
    map.insert("truncated".to_string(), Value::Bool(truncated));
    map.insert("subscriptions".to_string(), serde_json::to_value(subscriptions)?);
    serde_json::to_string_pretty(&Value::Object(map))
}
