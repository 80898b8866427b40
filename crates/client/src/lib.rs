//! Upstream access for the newsdesk server: the backend trait, search filters and presets.

pub mod backend;
pub mod error;
pub mod filters;
pub mod fixture;
pub mod http;
pub mod presets;

pub use backend::{NewsBackend, SearchResponse, Subscription, UPSTREAM_FIELDS};
pub use error::{BackendError, Result};
pub use filters::{
    normalize_list, normalize_optional, validate_size, FacetParams, GenreExclusion,
    InvalidFilter, SearchFilters, SortOrder, DEFAULT_EXCLUDED_GENRES, DEFAULT_SIZE,
};
pub use fixture::FixtureBackend;
pub use http::{ApiAuth, HttpBackend, DEFAULT_BASE_URL};
pub use presets::{
    FacetOverrides, FacetPreset, FacetRequest, PresetOverrides, PresetTable, SearchPreset,
};
