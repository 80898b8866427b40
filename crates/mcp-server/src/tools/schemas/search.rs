use newsdesk_client::{SearchPreset, SortOrder};
use newsdesk_render::OutputFormat;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct SearchArticlesRequest {
    /// Free-text query
    #[schemars(description = "Free-text query matched against headline and body")]
    pub query: Option<String>,

    #[schemars(description = "Language codes to keep, e.g. [\"fr\", \"en\"]")]
    pub languages: Option<Vec<String>>,

    #[schemars(description = "Lower bound on publication date: ISO-8601 or relative (`now-1d`)")]
    pub date_from: Option<String>,

    #[schemars(description = "Upper bound on publication date: ISO-8601 or relative (`now`)")]
    pub date_to: Option<String>,

    /// Page size (default: 10)
    #[schemars(description = "Number of documents to return (1-1000, default 10)")]
    pub size: Option<usize>,

    #[schemars(description = "Number of documents to skip (default 0)")]
    pub offset: Option<usize>,

    #[schemars(description = "Sort by publication date: 'desc' (default) or 'asc'")]
    pub sort_order: Option<SortOrder>,

    #[schemars(description = "Country codes to keep, e.g. [\"fra\"]")]
    pub countries: Option<Vec<String>>,

    #[schemars(description = "Topic slugs to keep")]
    pub topics: Option<Vec<String>>,

    #[schemars(description = "Product types to keep, e.g. [\"news\"]")]
    pub products: Option<Vec<String>>,

    #[schemars(description = "Output format: 'markdown' (default), 'json' or 'csv'")]
    pub format: Option<OutputFormat>,

    /// Projection for json/csv output.
    #[schemars(
        description = "Fields to include in json/csv output (default: id, headline, language, genre). Unknown names yield empty values. See the newsdesk://fields resource."
    )]
    pub fields: Option<Vec<String>>,

    #[schemars(description = "Render every body paragraph in markdown instead of the first four")]
    pub full_text: Option<bool>,

    /// Named query bundle; overrides conflicting filters and forces full text.
    #[schemars(
        description = "Preset: 'a-la-une', 'agenda', 'previsions' or 'major-stories'. Preset values win over conflicting filters and full text is always rendered."
    )]
    pub preset: Option<SearchPreset>,
}
