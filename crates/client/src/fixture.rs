//! Offline backend serving documents from a JSON fixture file.

use crate::backend::{NewsBackend, SearchResponse, Subscription};
use crate::error::{BackendError, Result};
use crate::filters::{FacetParams, SearchFilters, SortOrder};
use async_trait::async_trait;
use newsdesk_protocol::{Document, FacetEntry};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tokio::sync::Mutex;

#[derive(Deserialize)]
#[serde(untagged)]
enum FixtureFile {
    List(Vec<Document>),
    Wrapped { documents: Vec<Document> },
}

/// Offline backend over an in-memory document list.
///
/// Absolute `date_from`/`date_to` bounds (ISO dates or timestamps) are honored against
/// `published_at`; relative tokens such as `now-1d` have no clock to resolve against and
/// match every document.
#[derive(Debug, Default)]
pub struct FixtureBackend {
    documents: Vec<Document>,
    subscriptions: Mutex<Vec<Subscription>>,
}

impl FixtureBackend {
    pub fn new(documents: Vec<Document>) -> Self {
        Self {
            documents,
            subscriptions: Mutex::new(Vec::new()),
        }
    }

    /// Reads either a bare array of documents or `{ "documents": [...] }`.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = tokio::fs::read_to_string(path)
            .await
            .map_err(|source| BackendError::Fixture {
                path: path.display().to_string(),
                source,
            })?;
        let documents = match serde_json::from_str::<FixtureFile>(&raw)? {
            FixtureFile::List(documents) => documents,
            FixtureFile::Wrapped { documents } => documents,
        };
        log::info!(
            "loaded {} fixture documents from {}",
            documents.len(),
            path.display()
        );
        Ok(Self::new(documents))
    }

    pub fn documents(&self) -> &[Document] {
        &self.documents
    }

    fn find(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|doc| doc.id == id)
    }
}

fn contains_ci(haystack: &str, needle_lower: &str) -> bool {
    haystack.to_lowercase().contains(needle_lower)
}

fn any_of(value: Option<&str>, wanted: &[String]) -> bool {
    wanted.is_empty()
        || value.is_some_and(|v| wanted.iter().any(|w| w.eq_ignore_ascii_case(v)))
}

fn is_relative(bound: &str) -> bool {
    bound.trim_start().starts_with("now")
}

/// Inclusive date bounds compared on the bound's precision, so `2024-03-01` as `date_to`
/// keeps every timestamp of that day.
fn within_dates(published: Option<&str>, from: Option<&str>, to: Option<&str>) -> bool {
    let from = from.map(str::trim).filter(|b| !is_relative(b));
    let to = to.map(str::trim).filter(|b| !is_relative(b));
    if from.is_none() && to.is_none() {
        return true;
    }
    let Some(published) = published else {
        return false;
    };
    fn at_precision<'a>(published: &'a str, bound: &str) -> &'a str {
        published.get(..bound.len()).unwrap_or(published)
    }
    from.map_or(true, |from| at_precision(published, from) >= from)
        && to.map_or(true, |to| at_precision(published, to) <= to)
}

fn matches(doc: &Document, filters: &SearchFilters) -> bool {
    if !within_dates(
        doc.published_at.as_deref(),
        filters.date_from.as_deref(),
        filters.date_to.as_deref(),
    ) {
        return false;
    }
    if !any_of(doc.language.as_deref(), &filters.languages)
        || !any_of(doc.country.as_deref(), &filters.countries)
        || !any_of(doc.product_type.as_deref(), &filters.products)
    {
        return false;
    }
    if !filters.topics.is_empty()
        && !doc
            .topic_tags
            .iter()
            .any(|tag| filters.topics.iter().any(|t| t.eq_ignore_ascii_case(tag)))
    {
        return false;
    }
    if let Some(genre) = doc.genre.as_deref() {
        if filters.genre_exclusion.exclude.iter().any(|g| g == genre) {
            return false;
        }
    }
    match filters.query.as_deref() {
        Some(query) => {
            let needle = query.to_lowercase();
            doc.headline
                .as_deref()
                .is_some_and(|h| contains_ci(h, &needle))
                || doc.body_paragraphs.iter().any(|p| contains_ci(p, &needle))
        }
        None => true,
    }
}

fn facet_values<'a>(doc: &'a Document, facet: &str) -> Vec<&'a str> {
    let single = |value: &'a Option<String>| -> Vec<&'a str> {
        value.as_deref().into_iter().collect()
    };
    match facet {
        "slug" | "topics" => doc.topic_tags.iter().map(String::as_str).collect(),
        "genre" => single(&doc.genre),
        "country" => single(&doc.country),
        "city" => single(&doc.city),
        "lang" | "language" => single(&doc.language),
        "product" => single(&doc.product_type),
        _ => Vec::new(),
    }
}

#[async_trait]
impl NewsBackend for FixtureBackend {
    async fn search(&self, filters: &SearchFilters, _fields: &[&str]) -> Result<SearchResponse> {
        let mut hits: Vec<&Document> = self
            .documents
            .iter()
            .filter(|doc| matches(doc, filters))
            .collect();
        hits.sort_by(|a, b| match filters.sort_order {
            SortOrder::Asc => a.published_at.cmp(&b.published_at),
            SortOrder::Desc => b.published_at.cmp(&a.published_at),
        });
        let count = hits.len() as u64;
        let documents = hits
            .into_iter()
            .skip(filters.offset)
            .take(filters.size)
            .cloned()
            .collect();
        Ok(SearchResponse { documents, count })
    }

    async fn get(&self, id: &str) -> Result<Document> {
        self.find(id)
            .cloned()
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }

    async fn find_similar(
        &self,
        id: &str,
        language: Option<&str>,
        size: usize,
    ) -> Result<SearchResponse> {
        let origin = self
            .find(id)
            .ok_or_else(|| BackendError::NotFound(id.to_string()))?;
        let related: Vec<&Document> = self
            .documents
            .iter()
            .filter(|doc| doc.id != origin.id)
            .filter(|doc| match language {
                Some(lang) => doc
                    .language
                    .as_deref()
                    .is_some_and(|l| l.eq_ignore_ascii_case(lang)),
                None => true,
            })
            .filter(|doc| {
                (doc.genre.is_some() && doc.genre == origin.genre)
                    || doc.topic_tags.iter().any(|t| origin.topic_tags.contains(t))
            })
            .collect();
        let count = related.len() as u64;
        let documents = related.into_iter().take(size).cloned().collect();
        Ok(SearchResponse { documents, count })
    }

    async fn list_facet(
        &self,
        facet: &str,
        params: &FacetParams,
        size: usize,
    ) -> Result<Vec<FacetEntry>> {
        let mut counts: BTreeMap<&str, u64> = BTreeMap::new();
        for doc in &self.documents {
            if !any_of(doc.language.as_deref(), &params.languages)
                || !within_dates(doc.published_at.as_deref(), params.date_from.as_deref(), None)
            {
                continue;
            }
            for value in facet_values(doc, facet) {
                *counts.entry(value).or_default() += 1;
            }
        }
        let mut entries: Vec<FacetEntry> = counts
            .into_iter()
            .map(|(name, count)| FacetEntry {
                name: name.to_string(),
                count,
            })
            .collect();
        // Stable for equal counts: BTreeMap already ordered names.
        entries.sort_by(|a, b| b.count.cmp(&a.count));
        entries.truncate(size);
        Ok(entries)
    }

    async fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        Ok(self.subscriptions.lock().await.clone())
    }

    async fn add_subscription(&self, name: &str, filters: &SearchFilters) -> Result<Subscription> {
        let subscription = Subscription {
            name: name.to_string(),
            service: Some("fixture".to_string()),
            query: filters.query.clone().map(serde_json::Value::from),
        };
        let mut subscriptions = self.subscriptions.lock().await;
        subscriptions.retain(|existing| existing.name != name);
        subscriptions.push(subscription.clone());
        Ok(subscription)
    }

    async fn delete_subscription(&self, name: &str) -> Result<()> {
        let mut subscriptions = self.subscriptions.lock().await;
        let before = subscriptions.len();
        subscriptions.retain(|existing| existing.name != name);
        if subscriptions.len() == before {
            return Err(BackendError::NotFound(name.to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Write;

    fn doc(id: &str, lang: &str, published: &str, genre: &str, slug: &[&str]) -> Document {
        let mut doc = Document::new(id);
        doc.headline = Some(format!("Headline {id}"));
        doc.language = Some(lang.to_string());
        doc.published_at = Some(published.to_string());
        doc.genre = Some(genre.to_string());
        doc.topic_tags = slug.iter().map(|s| s.to_string()).collect();
        doc.body_paragraphs = vec![format!("Body of {id}")];
        doc
    }

    fn backend() -> FixtureBackend {
        FixtureBackend::new(vec![
            doc("a", "fr", "2024-01-01T08:00:00Z", "afpgenre:Article", &["economy"]),
            doc("b", "en", "2024-01-02T08:00:00Z", "afpgenre:Article", &["economy", "france"]),
            doc("c", "fr", "2024-01-03T08:00:00Z", "afpattribute:Agenda", &["agenda"]),
            doc("d", "fr", "2024-01-04T08:00:00Z", "afpgenre:Feature", &["sport"]),
        ])
    }

    #[tokio::test]
    async fn absolute_dates_bound_search_and_relative_ones_are_ignored() {
        let backend = backend();
        let ids = |response: SearchResponse| {
            response
                .documents
                .into_iter()
                .map(|d| d.id)
                .collect::<Vec<_>>()
        };
        let bounded = SearchFilters {
            date_from: Some("2024-01-02".to_string()),
            date_to: Some("2024-01-03".to_string()),
            genre_exclusion: crate::filters::GenreExclusion { exclude: Vec::new() },
            ..SearchFilters::default()
        };
        let response = backend.search(&bounded, &[]).await.unwrap();
        assert_eq!(ids(response), vec!["c", "b"]);

        let relative = SearchFilters {
            date_from: Some("now-1d".to_string()),
            ..SearchFilters::default()
        };
        let response = backend.search(&relative, &[]).await.unwrap();
        assert_eq!(response.count, 3);

        let lookback = FacetParams {
            languages: Vec::new(),
            date_from: Some("2024-01-04T00:00:00Z".to_string()),
        };
        let facets = backend.list_facet("slug", &lookback, 10).await.unwrap();
        assert_eq!(
            facets,
            vec![FacetEntry {
                name: "sport".to_string(),
                count: 1
            }]
        );
    }

    #[test]
    fn undated_documents_fail_absolute_bounds_only() {
        assert!(within_dates(None, None, Some("now")));
        assert!(!within_dates(None, Some("2024-01-01"), None));
        assert!(within_dates(Some("2024-01-01T23:59:59Z"), None, Some("2024-01-01")));
        assert!(!within_dates(Some("2023-12-31T23:59:59Z"), Some("2024-01-01"), None));
    }

    #[tokio::test]
    async fn search_filters_sorts_and_pages() {
        let backend = backend();
        let filters = SearchFilters {
            languages: vec!["fr".to_string()],
            ..SearchFilters::default()
        };
        let response = backend.search(&filters, &[]).await.unwrap();
        // "c" is an excluded genre by default.
        assert_eq!(response.count, 2);
        let ids: Vec<_> = response.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["d", "a"]);

        let paged = SearchFilters {
            size: 1,
            offset: 1,
            sort_order: SortOrder::Asc,
            ..SearchFilters::default()
        };
        let response = backend.search(&paged, &[]).await.unwrap();
        assert_eq!(response.count, 3);
        assert_eq!(response.documents[0].id, "b");
    }

    #[tokio::test]
    async fn query_matches_headline_case_insensitively() {
        let filters = SearchFilters {
            query: Some("HEADLINE b".to_string()),
            ..SearchFilters::default()
        };
        let response = backend().search(&filters, &[]).await.unwrap();
        assert_eq!(response.count, 1);
        assert_eq!(response.documents[0].id, "b");
    }

    #[tokio::test]
    async fn get_unknown_id_is_not_found() {
        let err = backend().get("BAD").await.unwrap_err();
        assert!(err.is_not_found());
        assert!(err.to_string().contains("BAD"));
    }

    #[tokio::test]
    async fn similar_shares_genre_or_topic() {
        let response = backend().find_similar("a", None, 10).await.unwrap();
        let ids: Vec<_> = response.documents.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(ids, vec!["b"]);

        let french = backend().find_similar("a", Some("fr"), 10).await.unwrap();
        assert_eq!(french.count, 0);
        assert!(backend().find_similar("BAD", None, 10).await.is_err());
    }

    #[tokio::test]
    async fn facets_count_topic_tags() {
        let entries = backend()
            .list_facet("slug", &FacetParams::default(), 2)
            .await
            .unwrap();
        assert_eq!(
            entries,
            vec![
                FacetEntry {
                    name: "economy".to_string(),
                    count: 2
                },
                FacetEntry {
                    name: "agenda".to_string(),
                    count: 1
                },
            ]
        );
    }

    #[tokio::test]
    async fn subscriptions_add_list_delete() {
        let backend = backend();
        let filters = SearchFilters {
            query: Some("climat".to_string()),
            ..SearchFilters::default()
        };
        backend.add_subscription("alerts", &filters).await.unwrap();
        backend.add_subscription("alerts", &filters).await.unwrap();
        assert_eq!(backend.list_subscriptions().await.unwrap().len(), 1);

        backend.delete_subscription("alerts").await.unwrap();
        assert!(backend.list_subscriptions().await.unwrap().is_empty());
        assert!(backend
            .delete_subscription("alerts")
            .await
            .unwrap_err()
            .is_not_found());
    }

    #[tokio::test]
    async fn load_accepts_array_or_wrapped_file() {
        let mut bare = tempfile::NamedTempFile::new().unwrap();
        write!(bare, r#"[{{"uno":"x","headline":"X"}}]"#).unwrap();
        let loaded = FixtureBackend::load(bare.path()).await.unwrap();
        assert_eq!(loaded.documents().len(), 1);

        let mut wrapped = tempfile::NamedTempFile::new().unwrap();
        write!(wrapped, r#"{{"documents":[{{"uno":"x"}},{{"uno":"y"}}]}}"#).unwrap();
        let loaded = FixtureBackend::load(wrapped.path()).await.unwrap();
        assert_eq!(loaded.documents().len(), 2);
    }

    #[tokio::test]
    async fn load_reports_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = FixtureBackend::load(dir.path().join("missing.json"))
            .await
            .unwrap_err();
        assert!(matches!(err, BackendError::Fixture { .. }));
    }
}
