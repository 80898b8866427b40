use newsdesk_client::FacetPreset;
use newsdesk_render::OutputFormat;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListFacetsRequest {
    /// Required unless `preset` is given.
    #[schemars(
        description = "Facet to count, e.g. 'slug', 'genre', 'country'. Required unless a preset is given."
    )]
    pub facet: Option<String>,

    #[schemars(description = "Number of facet values to return (1-1000, default 50)")]
    pub size: Option<usize>,

    #[schemars(description = "Only count documents in these languages")]
    pub languages: Option<Vec<String>>,

    #[schemars(description = "Only count documents published after this date (ISO-8601 or `now-1d`)")]
    pub date_from: Option<String>,

    #[schemars(description = "Output format: 'markdown' (default), 'json' or 'csv'")]
    pub format: Option<OutputFormat>,

    #[schemars(
        description = "Preset: 'trending-topics' counts topic slugs over the last day (default size 20)"
    )]
    pub preset: Option<FacetPreset>,
}
