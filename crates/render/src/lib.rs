//! Response shaping for the newsdesk tools.
//!
//! Every renderer returns a [`RenderedOutput`] whose content stays within
//! [`RenderOptions::max_chars`]; when the budget forces a cut, `truncated` is set and a final
//! notice block tells the caller how to narrow the request.

use newsdesk_protocol::{
    project, Document, FacetEntry, RequestedField, ResultSet, Subscription,
};
use newsdesk_protocol::{DEFAULT_FIELDS, OUTPUT_MAX_CHARS};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;

pub mod csv;
pub mod json;
pub mod markdown;
pub mod pagination;
pub mod truncate;

pub use pagination::paginate;
pub use truncate::{truncate_blocks, truncate_prefix, truncation_notice};

pub const NO_RESULTS: &str = "No results found.";

/// How the tool should render its payload.
///
/// - `markdown`: human/LLM-oriented blocks with a pagination line.
/// - `json`: one pretty-printed document envelope restricted to the requested fields.
/// - `csv`: header row plus one row per document.
#[derive(
    Debug, Deserialize, Serialize, schemars::JsonSchema, Clone, Copy, PartialEq, Eq, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Markdown,
    Json,
    Csv,
}

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to serialize json output: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextBlock {
    pub text: String,
}

impl TextBlock {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedOutput {
    pub items: Vec<TextBlock>,
    pub truncated: bool,
}

impl RenderedOutput {
    pub fn no_results() -> Self {
        Self {
            items: vec![TextBlock::new(NO_RESULTS)],
            truncated: false,
        }
    }

    fn single(
        text: String,
        shown: usize,
        total: usize,
        max_chars: usize,
        truncated: bool,
    ) -> Self {
        let mut items = vec![TextBlock::new(text)];
        if truncated {
            items.push(TextBlock::new(truncation_notice(shown, total, max_chars)));
        }
        Self { items, truncated }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|block| block.text.as_str())
    }
}

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub format: OutputFormat,
    /// Projection for json/csv; markdown ignores it.
    pub fields: Vec<RequestedField>,
    pub full_text: bool,
    pub max_chars: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            format: OutputFormat::Markdown,
            fields: DEFAULT_FIELDS
                .iter()
                .copied()
                .map(RequestedField::Known)
                .collect(),
            full_text: false,
            max_chars: OUTPUT_MAX_CHARS,
        }
    }
}

pub fn render_result_set(
    set: &ResultSet,
    options: &RenderOptions,
) -> Result<RenderedOutput, RenderError> {
    if set.is_empty() {
        return Ok(RenderedOutput::no_results());
    }
    match options.format {
        OutputFormat::Markdown => Ok(render_markdown_list(set, options)),
        OutputFormat::Json => render_json(set, options),
        OutputFormat::Csv => Ok(render_csv(set, options)),
    }
}

/// Single-article rendering: markdown uses the detail layout, other formats a one-row set.
pub fn render_article(
    doc: &Document,
    options: &RenderOptions,
) -> Result<RenderedOutput, RenderError> {
    match options.format {
        OutputFormat::Markdown => {
            let packed = truncate_blocks(vec![markdown::render_detail(doc)], options.max_chars);
            Ok(RenderedOutput {
                items: packed.blocks.into_iter().map(TextBlock::new).collect(),
                truncated: packed.truncated,
            })
        }
        OutputFormat::Json | OutputFormat::Csv => {
            render_result_set(&ResultSet::new(vec![doc.clone()], 1, 0), options)
        }
    }
}

fn render_markdown_list(set: &ResultSet, options: &RenderOptions) -> RenderedOutput {
    let blocks: Vec<String> = set
        .documents
        .iter()
        .map(|doc| markdown::render_list_block(doc, options.full_text))
        .collect();
    let packed = truncate_blocks(blocks, options.max_chars);

    let mut items = Vec::with_capacity(packed.blocks.len() + 1);
    items.push(TextBlock::new(paginate(
        packed.kept,
        set.total_count,
        set.offset,
    )));
    items.extend(packed.blocks.into_iter().map(TextBlock::new));
    RenderedOutput {
        items,
        truncated: packed.truncated,
    }
}

fn render_json(set: &ResultSet, options: &RenderOptions) -> Result<RenderedOutput, RenderError> {
    let projected: Vec<Value> = set
        .documents
        .iter()
        .map(|doc| project(doc, &options.fields).to_json())
        .collect();
    let total = projected.len();
    let out = truncate_prefix(&projected, options.max_chars, |prefix| {
        json::documents_payload(set.total_count, set.offset, prefix, prefix.len() < total)
    })?;
    Ok(RenderedOutput::single(
        out.text,
        out.count,
        total,
        options.max_chars,
        out.truncated,
    ))
}

fn render_csv(set: &ResultSet, options: &RenderOptions) -> RenderedOutput {
    let header = csv::header(&options.fields);
    let rows: Vec<String> = set
        .documents
        .iter()
        .map(|doc| csv::row(&project(doc, &options.fields)))
        .collect();
    let out = match truncate_prefix(&rows, options.max_chars, |prefix| {
        Ok::<_, std::convert::Infallible>(csv::join_rows(&header, prefix))
    }) {
        Ok(out) => out,
        Err(never) => match never {},
    };
    RenderedOutput::single(
        out.text,
        out.count,
        rows.len(),
        options.max_chars,
        out.truncated,
    )
}

pub fn render_facets(
    facet: &str,
    entries: &[FacetEntry],
    options: &RenderOptions,
) -> Result<RenderedOutput, RenderError> {
    if entries.is_empty() {
        return Ok(RenderedOutput::no_results());
    }
    let total = entries.len();
    let out = match options.format {
        OutputFormat::Markdown => {
            let header = format!("**Facet `{facet}`** ({total} values)");
            let lines: Vec<String> = entries
                .iter()
                .map(|entry| format!("- {} ({})", entry.name, entry.count))
                .collect();
            truncate_prefix(&lines, options.max_chars, |prefix| {
                let mut text = header.clone();
                if !prefix.is_empty() {
                    text.push_str("\n\n");
                    text.push_str(&prefix.join("\n"));
                }
                Ok::<_, RenderError>(text)
            })?
        }
        OutputFormat::Json => {
            let values: Vec<Value> = entries
                .iter()
                .map(|entry| json!({ "name": entry.name, "count": entry.count }))
                .collect();
            truncate_prefix(&values, options.max_chars, |prefix| {
                Ok::<_, RenderError>(json::facet_payload(facet, prefix, prefix.len() < total)?)
            })?
        }
        OutputFormat::Csv => {
            let rows: Vec<String> = entries
                .iter()
                .map(|entry| format!("{},{}", csv::escape_cell(&entry.name), entry.count))
                .collect();
            truncate_prefix(&rows, options.max_chars, |prefix| {
                Ok::<_, RenderError>(csv::join_rows("name,count", prefix))
            })?
        }
    };
    Ok(RenderedOutput::single(
        out.text,
        out.count,
        total,
        options.max_chars,
        out.truncated,
    ))
}

/// Lists notification subscriptions; `options.fields` and `full_text` do not apply.
pub fn render_subscriptions(
    subscriptions: &[Subscription],
    options: &RenderOptions,
) -> Result<RenderedOutput, RenderError> {
    if subscriptions.is_empty() {
        return Ok(RenderedOutput::no_results());
    }
    let total = subscriptions.len();
    let out = match options.format {
        OutputFormat::Markdown => {
            let header = format!("**Subscriptions** ({total})");
            let lines: Vec<String> = subscriptions
                .iter()
                .map(markdown::subscription_line)
                .collect();
            truncate_prefix(&lines, options.max_chars, |prefix| {
                let mut text = header.clone();
                if !prefix.is_empty() {
                    text.push_str("\n\n");
                    text.push_str(&prefix.join("\n"));
                }
                Ok::<_, RenderError>(text)
            })?
        }
        OutputFormat::Json => truncate_prefix(subscriptions, options.max_chars, |prefix| {
            Ok::<_, RenderError>(json::subscriptions_payload(prefix, prefix.len() < total)?)
        })?,
        OutputFormat::Csv => {
            let rows: Vec<String> = subscriptions
                .iter()
                .map(|sub| {
                    [
                        csv::escape_cell(&sub.name),
                        csv::escape_cell(sub.service.as_deref().unwrap_or_default()),
                        csv::escape_cell(&sub.query_summary()),
                    ]
                    .join(",")
                })
                .collect();
            truncate_prefix(&rows, options.max_chars, |prefix| {
                Ok::<_, RenderError>(csv::join_rows("name,service,query", prefix))
            })?
        }
    };
    Ok(RenderedOutput::single(
        out.text,
        out.count,
        total,
        options.max_chars,
        out.truncated,
    ))
}
