use newsdesk_render::OutputFormat;
use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ListSubscriptionsRequest {
    #[schemars(description = "Output format: 'markdown' (default), 'json' or 'csv'")]
    pub format: Option<OutputFormat>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct AddSubscriptionRequest {
    #[schemars(description = "Unique subscription name")]
    pub name: String,

    #[schemars(description = "Free-text query that triggers a notification")]
    pub query: Option<String>,

    #[schemars(description = "Language codes to watch")]
    pub languages: Option<Vec<String>>,

    #[schemars(description = "Topic slugs to watch")]
    pub topics: Option<Vec<String>>,

    #[schemars(description = "Product types to watch")]
    pub products: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct DeleteSubscriptionRequest {
    #[schemars(description = "Name of the subscription to remove")]
    pub name: String,
}
