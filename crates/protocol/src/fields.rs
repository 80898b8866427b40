//! Field allow-list and projection.
//!
//! Field names form a closed set; each name dispatches to a typed accessor on [`Document`].
//! Caller-supplied strings are only tolerated at the request boundary through
//! [`RequestedField::Unknown`], which projects to an empty value instead of failing.

use crate::document::{non_empty, Document};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    Id,
    Headline,
    PublishedAt,
    Language,
    Genre,
    Status,
    Signal,
    Advisory,
    Country,
    City,
    Topics,
    Product,
    Revision,
    Body,
}

/// Projection used when the caller does not ask for specific fields.
pub const DEFAULT_FIELDS: &[FieldName] = &[
    FieldName::Id,
    FieldName::Headline,
    FieldName::Language,
    FieldName::Genre,
];

impl FieldName {
    pub const ALL: &'static [FieldName] = &[
        FieldName::Id,
        FieldName::Headline,
        FieldName::PublishedAt,
        FieldName::Language,
        FieldName::Genre,
        FieldName::Status,
        FieldName::Signal,
        FieldName::Advisory,
        FieldName::Country,
        FieldName::City,
        FieldName::Topics,
        FieldName::Product,
        FieldName::Revision,
        FieldName::Body,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FieldName::Id => "id",
            FieldName::Headline => "headline",
            FieldName::PublishedAt => "published_at",
            FieldName::Language => "language",
            FieldName::Genre => "genre",
            FieldName::Status => "status",
            FieldName::Signal => "signal",
            FieldName::Advisory => "advisory",
            FieldName::Country => "country",
            FieldName::City => "city",
            FieldName::Topics => "topics",
            FieldName::Product => "product",
            FieldName::Revision => "revision",
            FieldName::Body => "body",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            FieldName::Id => "Stable article identifier (upstream `uno`).",
            FieldName::Headline => "Article headline.",
            FieldName::PublishedAt => "Publication timestamp (ISO-8601).",
            FieldName::Language => "Two-letter language code.",
            FieldName::Genre => "Editorial genre tag.",
            FieldName::Status => "Editorial status flag (e.g. embargo, withheld).",
            FieldName::Signal => "Editorial signal (e.g. update, correction).",
            FieldName::Advisory => "Advisory note attached by the desk.",
            FieldName::Country => "Country of the dateline.",
            FieldName::City => "City of the dateline.",
            FieldName::Topics => "Topic tags (upstream `slug`).",
            FieldName::Product => "Product type (news, photo, video, ...).",
            FieldName::Revision => "Revision number of the article.",
            FieldName::Body => "Body paragraphs.",
        }
    }

    /// Typed accessor for this field.
    pub fn extract(self, doc: &Document) -> ProjectedValue {
        fn text(value: Option<&str>) -> ProjectedValue {
            match non_empty(value) {
                Some(v) => ProjectedValue::Text(v.to_string()),
                None => ProjectedValue::Null,
            }
        }
        fn list(values: &[String]) -> ProjectedValue {
            if values.is_empty() {
                ProjectedValue::Null
            } else {
                ProjectedValue::List(values.to_vec())
            }
        }

        match self {
            FieldName::Id => ProjectedValue::Text(doc.id.clone()),
            FieldName::Headline => text(doc.headline.as_deref()),
            FieldName::PublishedAt => text(doc.published_at.as_deref()),
            FieldName::Language => text(doc.language.as_deref()),
            FieldName::Genre => text(doc.genre.as_deref()),
            FieldName::Status => text(doc.status.as_deref()),
            FieldName::Signal => text(doc.signal.as_deref()),
            FieldName::Advisory => text(doc.advisory.as_deref()),
            FieldName::Country => text(doc.country.as_deref()),
            FieldName::City => text(doc.city.as_deref()),
            FieldName::Topics => list(&doc.topic_tags),
            FieldName::Product => text(doc.product_type.as_deref()),
            FieldName::Revision => doc
                .revision
                .map_or(ProjectedValue::Null, ProjectedValue::Integer),
            FieldName::Body => list(&doc.body_paragraphs),
        }
    }
}

impl fmt::Display for FieldName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown field '{0}'")]
pub struct UnknownField(pub String);

impl FromStr for FieldName {
    type Err = UnknownField;

    /// Exact, case-sensitive match so output keys always equal the requested names.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        FieldName::ALL
            .iter()
            .copied()
            .find(|field| field.as_str() == raw)
            .ok_or_else(|| UnknownField(raw.to_string()))
    }
}

/// A field name as it arrived from the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RequestedField {
    Known(FieldName),
    Unknown(String),
}

impl RequestedField {
    pub fn parse(raw: &str) -> Self {
        match raw.parse::<FieldName>() {
            Ok(field) => RequestedField::Known(field),
            Err(UnknownField(name)) => RequestedField::Unknown(name),
        }
    }

    /// Parses caller-supplied names, falling back to [`DEFAULT_FIELDS`] when none are usable.
    pub fn parse_list(raw: Option<&[String]>) -> Vec<RequestedField> {
        let parsed: Vec<RequestedField> = raw
            .unwrap_or_default()
            .iter()
            .filter(|name| !name.trim().is_empty())
            .map(|name| RequestedField::parse(name))
            .collect();
        if parsed.is_empty() {
            DEFAULT_FIELDS
                .iter()
                .copied()
                .map(RequestedField::Known)
                .collect()
        } else {
            parsed
        }
    }

    pub fn name(&self) -> &str {
        match self {
            RequestedField::Known(field) => field.as_str(),
            RequestedField::Unknown(name) => name,
        }
    }

    pub fn extract(&self, doc: &Document) -> ProjectedValue {
        match self {
            RequestedField::Known(field) => field.extract(doc),
            RequestedField::Unknown(_) => ProjectedValue::Null,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProjectedValue {
    Null,
    Text(String),
    Integer(i64),
    List(Vec<String>),
}

impl ProjectedValue {
    pub fn to_json(&self) -> Value {
        match self {
            ProjectedValue::Null => Value::Null,
            ProjectedValue::Text(text) => Value::String(text.clone()),
            ProjectedValue::Integer(n) => Value::from(*n),
            ProjectedValue::List(values) => {
                Value::Array(values.iter().cloned().map(Value::String).collect())
            }
        }
    }

    /// Unescaped csv cell text: null is empty, lists are joined with `|`.
    pub fn to_csv_cell(&self) -> String {
        match self {
            ProjectedValue::Null => String::new(),
            ProjectedValue::Text(text) => text.clone(),
            ProjectedValue::Integer(n) => n.to_string(),
            ProjectedValue::List(values) => values.join("|"),
        }
    }
}

/// Ordered `name -> value` pairs for one document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Projection {
    entries: Vec<(String, ProjectedValue)>,
}

impl Projection {
    pub fn entries(&self) -> &[(String, ProjectedValue)] {
        &self.entries
    }

    pub fn get(&self, name: &str) -> Option<&ProjectedValue> {
        self.entries
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value)
    }

    /// Re-projects onto `fields`; names missing from this projection become null.
    pub fn select(&self, fields: &[RequestedField]) -> Projection {
        Projection {
            entries: fields
                .iter()
                .map(|field| {
                    let value = self.get(field.name()).cloned().unwrap_or(ProjectedValue::Null);
                    (field.name().to_string(), value)
                })
                .collect(),
        }
    }

    pub fn to_json(&self) -> Value {
        let mut map = serde_json::Map::with_capacity(self.entries.len());
        for (key, value) in &self.entries {
            map.insert(key.clone(), value.to_json());
        }
        Value::Object(map)
    }
}

pub fn project(doc: &Document, fields: &[RequestedField]) -> Projection {
    Projection {
        entries: fields
            .iter()
            .map(|field| (field.name().to_string(), field.extract(doc)))
            .collect(),
    }
}
