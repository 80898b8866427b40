use newsdesk_protocol::{Projection, RequestedField};

/// Quotes a cell when it contains a comma, quote or line break; inner quotes are doubled.
pub fn escape_cell(value: &str) -> String {
    if value.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

pub fn header(fields: &[RequestedField]) -> String {
    fields
        .iter()
        .map(|field| escape_cell(field.name()))
        .collect::<Vec<_>>()
        .join(",")
}

pub fn row(projection: &Projection) -> String {
    projection
        .entries()
        .iter()
        .map(|(_, value)| escape_cell(&value.to_csv_cell()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Header plus rows, newline separated, without a trailing newline.
pub fn join_rows(header: &str, rows: &[String]) -> String {
    let capacity = header.len() + rows.iter().map(|r| r.len() + 1).sum::<usize>();
    let mut out = String::with_capacity(capacity);
    out.push_str(header);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out
}
