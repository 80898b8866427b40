//! Startup configuration read from the environment.

use anyhow::{bail, Context, Result};
use newsdesk_client::{ApiAuth, FixtureBackend, HttpBackend, NewsBackend, DEFAULT_BASE_URL};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

pub const ENV_BASE_URL: &str = "NEWSDESK_API_BASE_URL";
pub const ENV_TOKEN: &str = "NEWSDESK_API_TOKEN";
pub const ENV_CLIENT_ID: &str = "NEWSDESK_CLIENT_ID";
pub const ENV_CLIENT_SECRET: &str = "NEWSDESK_CLIENT_SECRET";
pub const ENV_USERNAME: &str = "NEWSDESK_USERNAME";
pub const ENV_PASSWORD: &str = "NEWSDESK_PASSWORD";
pub const ENV_FIXTURES: &str = "NEWSDESK_FIXTURES";
pub const ENV_HTTP_TIMEOUT_SECS: &str = "NEWSDESK_HTTP_TIMEOUT_SECS";

const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendConfig {
    /// Serve documents from a local JSON file.
    Fixture(PathBuf),
    Http {
        base_url: String,
        auth: ApiAuth,
        timeout: Duration,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub backend: BackendConfig,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolution order: fixtures, then a bearer token, then the four credential variables.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(path) = get(ENV_FIXTURES) {
            return Ok(Self {
                backend: BackendConfig::Fixture(PathBuf::from(path)),
            });
        }

        let base_url = get(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let timeout_secs = match get(ENV_HTTP_TIMEOUT_SECS) {
            Some(raw) => raw.parse::<u64>().with_context(|| {
                format!("{ENV_HTTP_TIMEOUT_SECS} must be a whole number of seconds (got '{raw}')")
            })?,
            None => DEFAULT_HTTP_TIMEOUT_SECS,
        };
        if timeout_secs == 0 {
            bail!("{ENV_HTTP_TIMEOUT_SECS} must be greater than zero");
        }

        let auth = if let Some(token) = get(ENV_TOKEN) {
            ApiAuth::Token(token)
        } else {
            let keys = [ENV_CLIENT_ID, ENV_CLIENT_SECRET, ENV_USERNAME, ENV_PASSWORD];
            let values: Vec<Option<String>> = keys.iter().map(|key| get(*key)).collect();
            let missing: Vec<&str> = keys
                .iter()
                .zip(&values)
                .filter(|(_, value)| value.is_none())
                .map(|(key, _)| *key)
                .collect();
            if !missing.is_empty() {
                bail!(
                    "no upstream credentials configured: set {ENV_TOKEN}, or {} (missing: {}), or {ENV_FIXTURES} for offline use",
                    keys.join("/"),
                    missing.join(", ")
                );
            }
            let mut values = values.into_iter().flatten();
            ApiAuth::Credentials {
                client_id: values.next().unwrap_or_default(),
                client_secret: values.next().unwrap_or_default(),
                username: values.next().unwrap_or_default(),
                password: values.next().unwrap_or_default(),
            }
        };

        Ok(Self {
            backend: BackendConfig::Http {
                base_url,
                auth,
                timeout: Duration::from_secs(timeout_secs),
            },
        })
    }

    pub async fn build_backend(&self) -> Result<Arc<dyn NewsBackend>> {
        match &self.backend {
            BackendConfig::Fixture(path) => {
                let backend = FixtureBackend::load(path)
                    .await
                    .with_context(|| format!("failed to load fixtures from {}", path.display()))?;
                Ok(Arc::new(backend))
            }
            BackendConfig::Http {
                base_url,
                auth,
                timeout,
            } => {
                let backend = HttpBackend::connect(base_url.clone(), auth.clone(), *timeout)
                    .await
                    .with_context(|| format!("failed to connect to news API at {base_url}"))?;
                Ok(Arc::new(backend))
            }
        }
    }
}
