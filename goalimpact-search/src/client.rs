//! Goal Impact search endpoint client
//!
//! `GET {base}/search/?q={text}[&type={EntityType}]` → `{ results: [...] }`.
//! A non-2xx status or a transport failure is the only error signal; error
//! bodies are never parsed.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use crate::config::{self, ApiConfig};
use crate::error::{Result, SearchError};
use crate::model::{EntityType, SearchResponse, SearchResult};

/// Anything that can answer a search query (testable seam for the widget)
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, query: &str, scope: Option<EntityType>) -> Result<Vec<SearchResult>>;
}

/// HTTP client for the search endpoint
#[derive(Debug, Clone)]
pub struct HttpSearchClient {
    client: Client,
    base_url: Url,
}

impl HttpSearchClient {
    /// Create a client for the API rooted at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let base_url = config::parse_base_url(base_url)?;
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|source| SearchError::Client { source })?;
        Ok(Self { client, base_url })
    }

    pub fn from_config(api: &ApiConfig) -> Result<Self> {
        Self::new(&api.base_url, api.timeout())
    }

    /// Create client from environment variables
    /// Reads GOALIMPACT_API_URL (falls back to the public API)
    pub fn from_env() -> Result<Self> {
        config::load_dotenv();
        let base_url =
            std::env::var("GOALIMPACT_API_URL").unwrap_or_else(|_| config::DEFAULT_API_URL.to_string());
        Self::new(&base_url, Duration::from_secs(config::DEFAULT_TIMEOUT_SECS))
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Full request URL for a query
    pub fn search_url(&self, query: &str, scope: Option<EntityType>) -> Result<Url> {
        let mut url = self
            .base_url
            .join("search/")
            .map_err(|source| SearchError::invalid_url("search/", source))?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("q", query);
            if let Some(kind) = scope {
                pairs.append_pair("type", kind.as_str());
            }
        }
        Ok(url)
    }
}

#[async_trait]
impl SearchBackend for HttpSearchClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str, scope: Option<EntityType>) -> Result<Vec<SearchResult>> {
        let url = self.search_url(query, scope)?;

        let response = self
            .client
            .get(url.clone())
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(|source| SearchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(SearchError::status(url.as_str(), status.as_u16()));
        }

        let body = response.bytes().await.map_err(|source| SearchError::Transport {
            url: url.to_string(),
            source,
        })?;
        let data: SearchResponse =
            serde_json::from_slice(&body).map_err(|source| SearchError::Decode {
                url: url.to_string(),
                source,
            })?;

        debug!(count = data.results.len(), "search completed");
        Ok(data.results)
    }
}
