use newsdesk_render::OutputFormat;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct FindSimilarRequest {
    #[schemars(description = "Identifier (UNO) of the reference document")]
    pub id: String,

    #[schemars(description = "Restrict similar documents to this language code")]
    pub language: Option<String>,

    #[schemars(description = "Number of similar documents to return (1-1000, default 10)")]
    pub size: Option<usize>,

    #[schemars(description = "Output format: 'markdown' (default), 'json' or 'csv'")]
    pub format: Option<OutputFormat>,

    #[schemars(description = "Fields to include in json/csv output")]
    pub fields: Option<Vec<String>>,

    #[schemars(description = "Render every body paragraph in markdown instead of the first four")]
    pub full_text: Option<bool>,
}
