use newsdesk_render::OutputFormat;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct GetArticleRequest {
    #[schemars(description = "Document identifier (UNO) as returned by search_articles")]
    pub id: String,

    #[schemars(description = "Output format: 'markdown' (default), 'json' or 'csv'")]
    pub format: Option<OutputFormat>,

    #[schemars(description = "Fields to include in json/csv output")]
    pub fields: Option<Vec<String>>,
}
