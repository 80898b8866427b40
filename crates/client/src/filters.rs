use newsdesk_protocol::MAX_RESULT_SIZE;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const DEFAULT_SIZE: usize = 10;

/// Genres suppressed by default: desk administration rather than news.
pub const DEFAULT_EXCLUDED_GENRES: &[&str] = &[
    "afpattribute:Agenda",
    "afpattribute:Program",
    "afpattribute:TextProgram",
    "afpattribute:AdvisoryUpdate",
    "afpattribute:Advice",
    "afpattribute:SpecialAnnouncement",
    "afpattribute:PictureProgram",
];

#[derive(
    Debug, Deserialize, Serialize, schemars::JsonSchema, Clone, Copy, PartialEq, Eq, Default,
)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    #[default]
    Desc,
}

impl SortOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            SortOrder::Asc => "asc",
            SortOrder::Desc => "desc",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GenreExclusion {
    pub exclude: Vec<String>,
}

impl Default for GenreExclusion {
    fn default() -> Self {
        Self {
            exclude: DEFAULT_EXCLUDED_GENRES
                .iter()
                .map(|g| g.to_string())
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilters {
    pub query: Option<String>,
    pub languages: Vec<String>,
    /// ISO-8601 or relative (`now-1d`).
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub size: usize,
    pub offset: usize,
    pub sort_order: SortOrder,
    pub countries: Vec<String>,
    pub topics: Vec<String>,
    pub products: Vec<String>,
    pub genre_exclusion: GenreExclusion,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            query: None,
            languages: Vec::new(),
            date_from: None,
            date_to: None,
            size: DEFAULT_SIZE,
            offset: 0,
            sort_order: SortOrder::default(),
            countries: Vec::new(),
            topics: Vec::new(),
            products: Vec::new(),
            genre_exclusion: GenreExclusion::default(),
        }
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidFilter {
    #[error("size must be between 1 and {max} (got {0})", max = MAX_RESULT_SIZE)]
    SizeOutOfRange(usize),
}

impl SearchFilters {
    pub fn validate(&self) -> Result<(), InvalidFilter> {
        validate_size(self.size)
    }
}

pub fn validate_size(size: usize) -> Result<(), InvalidFilter> {
    if size == 0 || size > MAX_RESULT_SIZE {
        return Err(InvalidFilter::SizeOutOfRange(size));
    }
    Ok(())
}

/// Filters applied when counting facet values.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetParams {
    pub languages: Vec<String>,
    pub date_from: Option<String>,
}

/// Trims entries and drops empty ones.
pub fn normalize_list(raw: Option<Vec<String>>) -> Vec<String> {
    raw.unwrap_or_default()
        .into_iter()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .collect()
}

pub fn normalize_optional(raw: Option<String>) -> Option<String> {
    raw.map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
