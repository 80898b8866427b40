//! HTTP backend for the upstream news API.
//!
//! Authentication is resolved once in [`HttpBackend::connect`]; the resulting bearer token is
//! used for the lifetime of the process.

use crate::backend::{NewsBackend, SearchResponse, Subscription};
use crate::error::{BackendError, Result};
use crate::filters::{FacetParams, SearchFilters};
use async_trait::async_trait;
use newsdesk_protocol::{Document, FacetEntry};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::Deserialize;
use serde_json::{json, Map, Value};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://afp-apicore-prod.afp.com";

/// Service tag attached to subscriptions created through this server.
pub const SUBSCRIPTION_SERVICE: &str = "mail";

#[derive(Clone, PartialEq, Eq)]
pub enum ApiAuth {
    /// Pre-issued bearer token.
    Token(String),
    /// Password grant exchanged for a token at startup.
    Credentials {
        client_id: String,
        client_secret: String,
        username: String,
        password: String,
    },
}

impl std::fmt::Debug for ApiAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiAuth::Token(_) => f.write_str("ApiAuth::Token(..)"),
            ApiAuth::Credentials {
                client_id,
                username,
                ..
            } => f
                .debug_struct("ApiAuth::Credentials")
                .field("client_id", client_id)
                .field("username", username)
                .finish_non_exhaustive(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct DocsResponse {
    response: DocsBody,
}

#[derive(Debug, Deserialize)]
struct DocsBody {
    #[serde(default)]
    docs: Vec<Document>,
    #[serde(rename = "numFound", default)]
    num_found: u64,
}

#[derive(Debug, Deserialize)]
struct WireFacetEntry {
    #[serde(alias = "key")]
    name: String,
    #[serde(default)]
    count: u64,
}

#[derive(Debug, Deserialize)]
struct KeywordsOnly {
    keywords: Vec<WireFacetEntry>,
}

/// The list endpoint has shipped several shapes over time.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum FacetPayload {
    Bare(Vec<WireFacetEntry>),
    Keywords(KeywordsOnly),
    Wrapped { response: KeywordsOnly },
}

impl FacetPayload {
    fn into_entries(self) -> Vec<FacetEntry> {
        let wire = match self {
            FacetPayload::Bare(entries) => entries,
            FacetPayload::Keywords(body) => body.keywords,
            FacetPayload::Wrapped { response } => response.keywords,
        };
        wire.into_iter()
            .map(|entry| FacetEntry {
                name: entry.name,
                count: entry.count,
            })
            .collect()
    }
}

#[derive(Debug, Deserialize)]
struct SubscriptionsResponse {
    response: SubscriptionsBody,
}

#[derive(Debug, Deserialize)]
struct SubscriptionsBody {
    #[serde(default)]
    subscriptions: Vec<Subscription>,
}

#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: Url,
    token: String,
}

/// Appends `segments` to the base path, percent-encoding each one.
///
/// Caller-supplied values (article ids, facet names) always stay a single segment; `.` and
/// `..` are rejected because URL normalization would drop or resolve them.
pub fn endpoint(base_url: &Url, segments: &[&str]) -> Result<Url> {
    if let Some(dot) = segments.iter().find(|s| matches!(**s, "." | "..")) {
        return Err(BackendError::InvalidUrl(format!("path segment '{dot}' is not allowed")));
    }
    let mut url = base_url.clone();
    url.path_segments_mut()
        .map_err(|()| BackendError::InvalidUrl(format!("{base_url} cannot carry a path")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

impl HttpBackend {
    pub async fn connect(
        base_url: impl Into<String>,
        auth: ApiAuth,
        timeout: Duration,
    ) -> Result<Self> {
        let raw = base_url.into();
        let base_url = Url::parse(raw.trim())
            .map_err(|err| BackendError::InvalidUrl(format!("{raw}: {err}")))?;
        let client = Client::builder().timeout(timeout).build()?;
        let token = match auth {
            ApiAuth::Token(token) => token,
            ApiAuth::Credentials {
                client_id,
                client_secret,
                username,
                password,
            } => {
                exchange_credentials(
                    &client,
                    &base_url,
                    &client_id,
                    &client_secret,
                    &username,
                    &password,
                )
                .await?
            }
        };
        log::info!("news API backend ready at {base_url}");
        Ok(Self {
            client,
            base_url,
            token,
        })
    }

    fn url(&self, segments: &[&str]) -> Result<Url> {
        endpoint(&self.base_url, segments)
    }

    fn authorized(&self, request: RequestBuilder) -> RequestBuilder {
        request.bearer_auth(&self.token)
    }

    async fn fetch_docs(&self, request: RequestBuilder) -> Result<SearchResponse> {
        let response = check(self.authorized(request).send().await?).await?;
        let parsed: DocsResponse = serde_json::from_str(&response.text().await?)?;
        Ok(SearchResponse {
            documents: parsed.response.docs,
            count: parsed.response.num_found,
        })
    }
}

async fn exchange_credentials(
    client: &Client,
    base_url: &Url,
    client_id: &str,
    client_secret: &str,
    username: &str,
    password: &str,
) -> Result<String> {
    log::debug!("exchanging credentials for an access token");
    let response = client
        .post(endpoint(base_url, &["oauth", "token"])?)
        .basic_auth(client_id, Some(client_secret))
        .form(&[
            ("grant_type", "password"),
            ("username", username),
            ("password", password),
        ])
        .send()
        .await?;
    let response = check(response)
        .await
        .map_err(|err| BackendError::Auth(err.to_string()))?;
    let token: TokenResponse = serde_json::from_str(&response.text().await?)?;
    if token.access_token.trim().is_empty() {
        return Err(BackendError::Auth("empty access token".to_string()));
    }
    Ok(token.access_token)
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(BackendError::Status {
        status: status.as_u16(),
        body: body.trim().to_string(),
    })
}

fn date_range(from: Option<&str>, to: Option<&str>) -> Option<Value> {
    let mut range = Map::new();
    if let Some(from) = from {
        range.insert("from".to_string(), Value::from(from));
    }
    if let Some(to) = to {
        range.insert("to".to_string(), Value::from(to));
    }
    (!range.is_empty()).then_some(Value::Object(range))
}

fn in_clause(name: &str, values: &[String]) -> Option<Value> {
    (!values.is_empty()).then(|| json!({ "name": name, "in": values }))
}

fn query_clauses(filters: &SearchFilters) -> Vec<Value> {
    let mut clauses = Vec::new();
    if let Some(query) = &filters.query {
        clauses.push(json!({ "name": "all", "and": [query] }));
    }
    clauses.extend(in_clause("lang", &filters.languages));
    clauses.extend(in_clause("country", &filters.countries));
    clauses.extend(in_clause("slug", &filters.topics));
    clauses.extend(in_clause("product", &filters.products));
    if !filters.genre_exclusion.exclude.is_empty() {
        clauses.push(json!({
            "name": "genreid",
            "exclude": filters.genre_exclusion.exclude,
        }));
    }
    clauses
}

/// Request body for the search endpoint.
pub fn search_body(filters: &SearchFilters, fields: &[&str]) -> Value {
    let mut body = Map::new();
    if let Some(range) = date_range(filters.date_from.as_deref(), filters.date_to.as_deref()) {
        body.insert("dateRange".to_string(), range);
    }
    body.insert("sortField".to_string(), Value::from("published"));
    body.insert("sortOrder".to_string(), Value::from(filters.sort_order.as_str()));
    body.insert("maxRows".to_string(), Value::from(filters.size));
    body.insert("startAt".to_string(), Value::from(filters.offset));
    let clauses = query_clauses(filters);
    if !clauses.is_empty() {
        body.insert("query".to_string(), json!({ "and": clauses }));
    }
    body.insert("fields".to_string(), json!(fields));
    Value::Object(body)
}

/// Request body for the facet list endpoint.
pub fn facet_body(params: &FacetParams, size: usize) -> Value {
    let mut body = Map::new();
    if let Some(range) = date_range(params.date_from.as_deref(), None) {
        body.insert("dateRange".to_string(), range);
    }
    body.insert("maxRows".to_string(), Value::from(size));
    if let Some(clause) = in_clause("lang", &params.languages) {
        body.insert("query".to_string(), json!({ "and": [clause] }));
    }
    Value::Object(body)
}

#[async_trait]
impl NewsBackend for HttpBackend {
    async fn search(&self, filters: &SearchFilters, fields: &[&str]) -> Result<SearchResponse> {
        let body = search_body(filters, fields);
        log::debug!("search request: {body}");
        let url = self.url(&["v1", "api", "search"])?;
        self.fetch_docs(self.client.post(url).json(&body)).await
    }

    async fn get(&self, id: &str) -> Result<Document> {
        let request = self.client.get(self.url(&["v1", "api", "get", id])?);
        let response = match self.fetch_docs(request).await {
            Err(err) if err.is_not_found() => return Err(BackendError::NotFound(id.to_string())),
            other => other?,
        };
        response
            .documents
            .into_iter()
            .next()
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }

    async fn find_similar(
        &self,
        id: &str,
        language: Option<&str>,
        size: usize,
    ) -> Result<SearchResponse> {
        let size = size.to_string();
        let mut query = vec![("uno", id), ("size", size.as_str())];
        if let Some(lang) = language {
            query.push(("lang", lang));
        }
        let request = self.client.get(self.url(&["v1", "api", "mlt"])?).query(&query);
        match self.fetch_docs(request).await {
            Err(err) if err.is_not_found() => Err(BackendError::NotFound(id.to_string())),
            other => other,
        }
    }

    async fn list_facet(
        &self,
        facet: &str,
        params: &FacetParams,
        size: usize,
    ) -> Result<Vec<FacetEntry>> {
        let request = self
            .client
            .post(self.url(&["v1", "api", "list", facet])?)
            .query(&[("minDocCount", "1")])
            .json(&facet_body(params, size));
        let response = check(self.authorized(request).send().await?).await?;
        let payload: FacetPayload = serde_json::from_str(&response.text().await?)?;
        Ok(payload.into_entries())
    }

    async fn list_subscriptions(&self) -> Result<Vec<Subscription>> {
        let request = self
            .client
            .get(self.url(&["notification", "api", "listSubscriptions"])?);
        let response = check(self.authorized(request).send().await?).await?;
        let parsed: SubscriptionsResponse = serde_json::from_str(&response.text().await?)?;
        Ok(parsed.response.subscriptions)
    }

    async fn add_subscription(&self, name: &str, filters: &SearchFilters) -> Result<Subscription> {
        let clauses = query_clauses(filters);
        let query = json!({ "and": clauses });
        let request = self
            .client
            .post(self.url(&["notification", "api", "registerSubscription"])?)
            .query(&[("name", name), ("service", SUBSCRIPTION_SERVICE)])
            .json(&query);
        check(self.authorized(request).send().await?).await?;
        log::info!("registered subscription '{name}'");
        Ok(Subscription {
            name: name.to_string(),
            service: Some(SUBSCRIPTION_SERVICE.to_string()),
            query: Some(query),
        })
    }

    async fn delete_subscription(&self, name: &str) -> Result<()> {
        let request = self
            .client
            .delete(self.url(&["notification", "api", "deleteSubscription"])?)
            .query(&[("name", name)]);
        match check(self.authorized(request).send().await?).await {
            Err(err) if err.is_not_found() => Err(BackendError::NotFound(name.to_string())),
            Err(err) => Err(err),
            Ok(_) => {
                log::info!("deleted subscription '{name}'");
                Ok(())
            }
        }
    }
}
