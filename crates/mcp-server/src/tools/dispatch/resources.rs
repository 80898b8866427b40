use super::McpError;
use newsdesk_client::PresetTable;
use newsdesk_protocol::{FieldName, DEFAULT_FIELDS};
use rmcp::model::{
    AnnotateAble, ListResourcesResult, RawResource, ReadResourceResult, Resource, ResourceContents,
};
use serde_json::{Map, Value};

pub(super) const FIELDS_URI: &str = "newsdesk://fields";
pub(super) const PRESETS_URI: &str = "newsdesk://presets";

fn resource(uri: &str, name: &str, description: &str, mime_type: &str) -> Resource {
    let mut raw = RawResource::new(uri, name.to_string());
    raw.description = Some(description.to_string());
    raw.mime_type = Some(mime_type.to_string());
    raw.no_annotation()
}

pub(super) fn list() -> ListResourcesResult {
    ListResourcesResult {
        resources: vec![
            resource(
                FIELDS_URI,
                "fields",
                "Field names accepted by the `fields` argument of json/csv output",
                "text/markdown",
            ),
            resource(
                PRESETS_URI,
                "presets",
                "Search and facet presets with the filters they apply",
                "application/json",
            ),
        ],
        next_cursor: None,
    }
}

pub(super) fn read(uri: &str, presets: &PresetTable) -> Result<ReadResourceResult, McpError> {
    let text = match uri {
        FIELDS_URI => fields_text(),
        PRESETS_URI => presets_text(presets)?,
        _ => {
            return Err(McpError::resource_not_found(
                format!("unknown resource: {uri}"),
                None,
            ))
        }
    };
    Ok(ReadResourceResult {
        contents: vec![ResourceContents::text(text, uri)],
    })
}

fn fields_text() -> String {
    let mut out = String::from("# Output fields\n\n");
    for field in FieldName::ALL {
        out.push_str(&format!("- `{}`: {}", field.as_str(), field.description()));
        if DEFAULT_FIELDS.contains(field) {
            out.push_str(" (default)");
        }
        out.push('\n');
    }
    out.push_str("\nUnknown names are accepted and render as empty values.");
    out
}

fn presets_text(presets: &PresetTable) -> Result<String, McpError> {
    let to_value = |value: Result<Value, serde_json::Error>| {
        value.map_err(|err| McpError::internal_error(format!("serializing presets: {err}"), None))
    };

    let mut search = Map::new();
    for (preset, overrides) in presets.search_presets() {
        search.insert(
            preset.as_str().to_string(),
            to_value(serde_json::to_value(overrides))?,
        );
    }
    let mut facets = Map::new();
    for (preset, overrides) in presets.facet_presets() {
        facets.insert(
            preset.as_str().to_string(),
            to_value(serde_json::to_value(overrides))?,
        );
    }

    let mut root = Map::new();
    root.insert("search".to_string(), Value::Object(search));
    root.insert("facets".to_string(), Value::Object(facets));
    serde_json::to_string_pretty(&Value::Object(root))
        .map_err(|err| McpError::internal_error(format!("serializing presets: {err}"), None))
}
