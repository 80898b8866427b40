//! Newsdesk MCP Server
//!
//! Gives AI agents access to a news agency wire via the MCP protocol.
//!
//! ## Tools
//!
//! - `search_articles` - Search dispatches by text, language, dates, topics (with presets)
//! - `get_article` - Read one article in full
//! - `find_similar` - Related coverage for an article
//! - `list_facets` - Topic/genre/country value counts
//! - `list_subscriptions`, `add_subscription`, `delete_subscription` - Notification center
//!
//! ## Usage
//!
//! Add to your MCP client configuration:
//! ```json
//! {
//!   "mcpServers": {
//!     "newsdesk": {
//!       "command": "newsdesk-mcp",
//!       "env": { "NEWSDESK_API_TOKEN": "..." }
//!     }
//!   }
//! }
//! ```

use anyhow::{Context, Result};
use newsdesk_mcp::{NewsdeskService, ServerConfig};
use rmcp::transport::stdio;
use rmcp::ServiceExt;

#[tokio::main]
async fn main() -> Result<()> {
    // Configure logging to stderr only (stdout is for MCP protocol)
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .target(env_logger::Target::Stderr)
        .init();

    log::info!("Starting Newsdesk MCP server");

    let config = ServerConfig::from_env().context("invalid configuration")?;
    let backend = config.build_backend().await?;

    let service = NewsdeskService::new(backend);
    let server = service
        .serve(stdio())
        .await
        .context("failed to start MCP transport")?;

    server.waiting().await?;

    log::info!("Newsdesk MCP server stopped");
    Ok(())
}
