use newsdesk_protocol::document::non_empty;
use newsdesk_protocol::{Document, Subscription};

/// Paragraphs shown per article in list mode unless full text is requested.
pub const PREVIEW_PARAGRAPHS: usize = 4;

const META_SEPARATOR: &str = " | ";
const DETAIL_SEPARATOR: &str = " · ";

fn body(doc: &Document, full_text: bool) -> String {
    let take = if full_text {
        doc.body_paragraphs.len()
    } else {
        PREVIEW_PARAGRAPHS
    };
    doc.body_paragraphs
        .iter()
        .take(take)
        .map(String::as_str)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn meta_line(doc: &Document) -> String {
    let mut parts: Vec<&str> = vec![doc.id.as_str()];
    for value in [
        doc.published_at.as_deref(),
        doc.language.as_deref(),
        doc.genre.as_deref(),
        doc.status.as_deref(),
        doc.signal.as_deref(),
        doc.advisory.as_deref(),
    ] {
        if let Some(value) = non_empty(value) {
            parts.push(value);
        }
    }
    parts.join(META_SEPARATOR)
}

/// List-mode block: heading, italic metadata line, then the (possibly shortened) body.
pub fn render_list_block(doc: &Document, full_text: bool) -> String {
    format!(
        "## {}\n*{}*\n\n{}",
        doc.headline_or_untitled(),
        meta_line(doc),
        body(doc, full_text)
    )
}

fn pairs_line(pairs: &[(&str, Option<String>)]) -> Option<String> {
    let rendered: Vec<String> = pairs
        .iter()
        .filter_map(|(key, value)| {
            non_empty(value.as_deref()).map(|value| format!("**{key}:** {value}"))
        })
        .collect();
    if rendered.is_empty() {
        None
    } else {
        Some(rendered.join(DETAIL_SEPARATOR))
    }
}

/// Single-article view with the full metadata block and the complete body.
pub fn render_detail(doc: &Document) -> String {
    let topics = if doc.topic_tags.is_empty() {
        None
    } else {
        Some(doc.topic_tags.join(", "))
    };
    let lines = [
        pairs_line(&[
            ("ID", Some(doc.id.clone())),
            ("Published", doc.published_at.clone()),
        ]),
        pairs_line(&[
            ("Language", doc.language.clone()),
            ("Genre", doc.genre.clone()),
            ("Product", doc.product_type.clone()),
            ("Revision", doc.revision.map(|r| r.to_string())),
        ]),
        pairs_line(&[
            ("Country", doc.country.clone()),
            ("City", doc.city.clone()),
            ("Topics", topics),
        ]),
        pairs_line(&[
            ("Status", doc.status.clone()),
            ("Signal", doc.signal.clone()),
            ("Advisory", doc.advisory.clone()),
        ]),
    ];

    let mut out = format!("# {}\n\n", doc.headline_or_untitled());
    for line in lines.into_iter().flatten() {
        out.push_str(&line);
        out.push('\n');
    }
    out.push_str("\n---\n\n");
    out.push_str(&body(doc, true));
    out
}

/// `- `name` (service): query`, omitting the parts that are absent.
pub fn subscription_line(sub: &Subscription) -> String {
    let mut line = format!("- `{}`", sub.name);
    if let Some(service) = non_empty(sub.service.as_deref()) {
        line.push_str(&format!(" ({service})"));
    }
    let query = sub.query_summary();
    if !query.is_empty() {
        line.push_str(&format!(": {query}"));
    }
    line
}
