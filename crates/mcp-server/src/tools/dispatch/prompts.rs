use super::{McpError, NewsdeskService};
use crate::tools::schemas::prompts::{ArticleAnalysisArgs, DailyBriefingArgs, TopicDigestArgs};
use newsdesk_client::{FacetPreset, SearchPreset};
use rmcp::handler::server::router::prompt::PromptRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{GetPromptResult, PromptMessage, PromptMessageRole};
use rmcp::{prompt, prompt_router};

pub(super) fn build_prompt_router() -> PromptRouter<NewsdeskService> {
    NewsdeskService::prompt_router()
}

fn user_prompt(description: &str, text: String) -> GetPromptResult {
    GetPromptResult {
        description: Some(description.to_string()),
        messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
    }
}

fn briefing_text(language: Option<&str>) -> String {
    let search_step = match language {
        None | Some("fr") => format!(
            "Call `search_articles` with preset `{}` to get today's French front page.",
            SearchPreset::ALaUne.as_str()
        ),
        Some("en") => format!(
            "Call `search_articles` with preset `{}` to get today's major stories in English.",
            SearchPreset::MajorStories.as_str()
        ),
        Some(other) => format!(
            "Call `search_articles` with languages [\"{other}\"], date_from \"now-1d\" and size 20."
        ),
    };
    let language = language.unwrap_or("fr");
    format!(
        "Prepare a daily news briefing.\n\n\
         1. {search_step}\n\
         2. Call `list_facets` with preset `{}` to see which topics dominate the day.\n\
         3. Group the stories by theme, lead with the most important one, and give two or three \
         sentences per story.\n\
         4. Cite each story's identifier so it can be opened with `get_article`.\n\n\
         Write the briefing in language `{language}`.",
        FacetPreset::TrendingTopics.as_str()
    )
}

fn digest_text(topic: &str, language: Option<&str>) -> String {
    let language_clause = match language {
        Some(lang) => format!(", languages [\"{lang}\"]"),
        None => String::new(),
    };
    format!(
        "Build a digest of recent coverage about \"{topic}\".\n\n\
         1. Call `search_articles` with query \"{topic}\"{language_clause}, date_from \"now-7d\" and \
         size 20.\n\
         2. Open the two most relevant results with `get_article`.\n\
         3. Summarise how the story developed over the week, noting key facts, figures and \
         actors, and flag open questions.\n\
         4. End with the identifiers of the articles you used."
    )
}

fn analysis_text(id: &str) -> String {
    format!(
        "Analyse the article `{id}`.\n\n\
         1. Call `get_article` with id \"{id}\" to read the full text and metadata.\n\
         2. Call `find_similar` with id \"{id}\" and size 5 to find related coverage.\n\
         3. Summarise the article, identify its sources and angle, and compare it with the \
         related pieces: what they add, contradict or update."
    )
}

#[prompt_router]
impl NewsdeskService {
    #[prompt(
        name = "daily_briefing",
        description = "Daily briefing of the main stories, built from the front-page presets and trending topics."
    )]
    async fn daily_briefing(
        &self,
        Parameters(args): Parameters<DailyBriefingArgs>,
    ) -> Result<GetPromptResult, McpError> {
        let language = args
            .language
            .as_deref()
            .map(str::trim)
            .filter(|lang| !lang.is_empty())
            .map(str::to_ascii_lowercase);
        Ok(user_prompt(
            "Daily briefing of the main stories.",
            briefing_text(language.as_deref()),
        ))
    }

    #[prompt(
        name = "topic_digest",
        description = "Digest of the last week of coverage about a topic."
    )]
    async fn topic_digest(
        &self,
        Parameters(args): Parameters<TopicDigestArgs>,
    ) -> Result<GetPromptResult, McpError> {
        let topic = args.topic.trim();
        if topic.is_empty() {
            return Err(McpError::invalid_params("`topic` must not be empty", None));
        }
        let language = args
            .language
            .as_deref()
            .map(str::trim)
            .filter(|lang| !lang.is_empty());
        Ok(user_prompt(
            "Digest of recent coverage about a topic.",
            digest_text(topic, language),
        ))
    }

    #[prompt(
        name = "article_analysis",
        description = "In-depth analysis of one article compared with related coverage."
    )]
    async fn article_analysis(
        &self,
        Parameters(args): Parameters<ArticleAnalysisArgs>,
    ) -> Result<GetPromptResult, McpError> {
        let id = args.id.trim();
        if id.is_empty() {
            return Err(McpError::invalid_params("`id` must not be empty", None));
        }
        Ok(user_prompt(
            "Analysis of one article against related coverage.",
            analysis_text(id),
        ))
    }
}
