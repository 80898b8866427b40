mod support;

use anyhow::{Context, Result};
use rmcp::model::{CallToolRequestParam, GetPromptRequestParam, ReadResourceRequestParam};
use rmcp::{service::ServiceExt, transport::TokioChildProcess};
use serde_json::json;
use std::collections::HashSet;
use std::time::Duration;
use tokio::process::Command;

#[tokio::test]
async fn mcp_exposes_news_tools_prompts_and_resources() -> Result<()> {
    let bin = support::locate_newsdesk_mcp_bin()?;
    let tmp = tempfile::tempdir().context("tempdir")?;
    let fixtures = support::write_fixture(tmp.path(), &support::sample_articles())?;

    let mut cmd = Command::new(bin);
    cmd.env_remove("NEWSDESK_API_TOKEN");
    cmd.env("NEWSDESK_FIXTURES", &fixtures);
    cmd.env("RUST_LOG", "warn");

    let transport = TokioChildProcess::new(cmd).context("spawn mcp server")?;
    let service = tokio::time::timeout(Duration::from_secs(10), ().serve(transport))
        .await
        .context("timeout starting MCP server")??;

    let tools = tokio::time::timeout(
        Duration::from_secs(10),
        service.list_tools(Default::default()),
    )
    .await
    .context("timeout listing tools")??;
    let tool_names: HashSet<&str> = tools.tools.iter().map(|t| t.name.as_ref()).collect();
    for expected in [
        "search_articles",
        "get_article",
        "find_similar",
        "list_facets",
        "list_subscriptions",
        "add_subscription",
        "delete_subscription",
    ] {
        assert!(tool_names.contains(expected), "missing tool '{expected}'");
    }

    let prompts = service
        .list_prompts(Default::default())
        .await
        .context("list prompts")?;
    let prompt_names: HashSet<&str> = prompts.prompts.iter().map(|p| p.name.as_str()).collect();
    for expected in ["daily_briefing", "topic_digest", "article_analysis"] {
        assert!(prompt_names.contains(expected), "missing prompt '{expected}'");
    }

    let digest = service
        .get_prompt(GetPromptRequestParam {
            name: "topic_digest".into(),
            arguments: json!({ "topic": "climat" }).as_object().cloned(),
        })
        .await
        .context("get topic_digest prompt")?;
    assert_eq!(digest.messages.len(), 1);

    let resources = service
        .list_resources(Default::default())
        .await
        .context("list resources")?;
    let uris: HashSet<&str> = resources
        .resources
        .iter()
        .map(|r| r.uri.as_str())
        .collect();
    assert!(uris.contains("newsdesk://fields"));
    assert!(uris.contains("newsdesk://presets"));

    let fields = service
        .read_resource(ReadResourceRequestParam {
            uri: "newsdesk://fields".into(),
        })
        .await
        .context("read fields resource")?;
    assert_eq!(fields.contents.len(), 1);

    let result = tokio::time::timeout(
        Duration::from_secs(10),
        service.call_tool(CallToolRequestParam {
            name: "search_articles".into(),
            arguments: json!({ "languages": ["en"], "size": 1 }).as_object().cloned(),
        }),
    )
    .await
    .context("timeout calling search_articles")??;
    assert_ne!(result.is_error, Some(true), "search_articles returned error");
    let texts: Vec<&str> = result
        .content
        .iter()
        .filter_map(|c| c.as_text())
        .map(|t| t.text.as_str())
        .collect();
    assert_eq!(
        texts[0],
        "Showing 1 of 2 results (offset: 0). Use offset=1 to see more."
    );
    assert!(texts[1].starts_with("## Headline en-2"));

    let missing = service
        .call_tool(CallToolRequestParam {
            name: "get_article".into(),
            arguments: json!({ "id": "BAD" }).as_object().cloned(),
        })
        .await
        .context("call get_article")?;
    assert_eq!(missing.is_error, Some(true));

    service.cancel().await.context("shutdown mcp service")?;
    Ok(())
}
