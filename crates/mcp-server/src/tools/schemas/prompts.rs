use rmcp::schemars;
use serde::Deserialize;

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct DailyBriefingArgs {
    #[schemars(description = "Language of the briefing (default: fr)")]
    pub language: Option<String>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct TopicDigestArgs {
    #[schemars(description = "Topic or keywords to follow")]
    pub topic: String,

    #[schemars(description = "Language of the digest (default: any)")]
    pub language: Option<String>,
}

#[derive(Debug, Default, Deserialize, schemars::JsonSchema)]
pub struct ArticleAnalysisArgs {
    #[schemars(description = "Identifier (UNO) of the article to analyse")]
    pub id: String,
}
