#![allow(dead_code)]

use anyhow::{Context, Result};
use newsdesk_protocol::Document;
use std::path::PathBuf;

pub fn locate_newsdesk_mcp_bin() -> Result<PathBuf> {
    if let Some(path) = option_env!("CARGO_BIN_EXE_newsdesk-mcp") {
        return Ok(PathBuf::from(path));
    }

    // `.../target/{debug|release}/deps/<test>` → `.../target/{debug|release}/newsdesk-mcp`
    if let Ok(exe) = std::env::current_exe() {
        if let Some(target_profile_dir) = exe.parent().and_then(|p| p.parent()) {
            let candidate = target_profile_dir.join("newsdesk-mcp");
            if candidate.exists() {
                return Ok(candidate);
            }
        }
    }

    let manifest_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR"));
    let repo_root = manifest_dir
        .ancestors()
        .nth(2)
        .context("failed to resolve repo root from CARGO_MANIFEST_DIR")?;
    for rel in ["target/debug/newsdesk-mcp", "target/release/newsdesk-mcp"] {
        let candidate = repo_root.join(rel);
        if candidate.exists() {
            return Ok(candidate);
        }
    }

    anyhow::bail!("failed to locate newsdesk-mcp binary; build with: cargo build -p newsdesk-mcp")
}

pub fn article(id: &str, lang: &str, published: &str, paragraphs: usize) -> Document {
    let mut doc = Document::new(id);
    doc.headline = Some(format!("Headline {id}"));
    doc.language = Some(lang.to_string());
    doc.published_at = Some(published.to_string());
    doc.genre = Some("afpgenre:Article".to_string());
    doc.product_type = Some("news".to_string());
    doc.topic_tags = vec!["une".to_string(), "economy".to_string()];
    doc.body_paragraphs = (1..=paragraphs)
        .map(|n| format!("Paragraph {n} of {id}."))
        .collect();
    doc
}

/// Three French and two English front-page articles.
pub fn sample_articles() -> Vec<Document> {
    vec![
        article("fr-1", "fr", "2024-03-01T08:00:00Z", 6),
        article("fr-2", "fr", "2024-03-01T09:00:00Z", 2),
        article("fr-3", "fr", "2024-03-01T10:00:00Z", 1),
        article("en-1", "en", "2024-03-01T11:00:00Z", 6),
        article("en-2", "en", "2024-03-01T12:00:00Z", 3),
    ]
}

pub fn write_fixture(dir: &std::path::Path, docs: &[Document]) -> Result<PathBuf> {
    let path = dir.join("fixtures.json");
    let raw = serde_json::to_string_pretty(docs).context("serialize fixtures")?;
    std::fs::write(&path, raw).context("write fixtures")?;
    Ok(path)
}
