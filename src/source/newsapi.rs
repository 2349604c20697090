//! NewsAPI.org source implementation.
//!
//! Talks to two endpoints:
//!
//! * `GET /v2/top-headlines?country=..&category=..&pageSize=..`
//! * `GET /v2/everything?q=..&sortBy=publishedAt&pageSize=..&language=en`
//!
//! Both answer with `{ "articles": [...], "totalResults": n }`.  Every
//! request URL passes through [`NewsApiSource::authorize`], which appends the
//! `apiKey` parameter.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use serde::Deserialize;
use tracing::debug;

use super::{Category, GatewayError, NewsSource, PageResult};
use crate::config::Config;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// A NewsAPI.org client.
pub struct NewsApiSource {
    client: Client,
    base_url: Url,
    api_key: String,
    country: String,
    page_size: u32,
}

impl NewsApiSource {
    /// Build a source with its own HTTP client.
    ///
    /// The configured timeout applies to whole requests; there is no retry.
    pub fn new(config: &Config) -> Result<Self, GatewayError> {
        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(config.timeout)
            .connect_timeout(Duration::from_secs(10))
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            country: config.country.clone(),
            page_size: config.page_size,
        })
    }

    fn endpoint(&self, name: &str) -> Url {
        let mut url = self.base_url.clone();
        let path = format!("{}/v2/{name}", url.path().trim_end_matches('/'));
        url.set_path(&path);
        url
    }

    /// URL for the top-headlines endpoint, without credentials.
    pub fn headlines_url(&self, category: Option<Category>) -> Url {
        let mut url = self.endpoint("top-headlines");
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("country", &self.country);
            if let Some(category) = category {
                query.append_pair("category", category.as_str());
            }
            query.append_pair("pageSize", &self.page_size.to_string());
        }
        url
    }

    /// URL for the everything (search) endpoint, without credentials.
    pub fn search_url(&self, query: &str) -> Url {
        let mut url = self.endpoint("everything");
        url.query_pairs_mut()
            .append_pair("q", query)
            .append_pair("sortBy", "publishedAt")
            .append_pair("pageSize", &self.page_size.to_string())
            .append_pair("language", "en");
        url
    }

    /// Attach the API key to an outgoing request URL.
    pub fn authorize(&self, mut url: Url) -> Url {
        url.query_pairs_mut().append_pair("apiKey", &self.api_key);
        url
    }

    async fn fetch(&self, url: Url) -> Result<PageResult, GatewayError> {
        debug!(path = url.path(), query = url.query().unwrap_or(""), "requesting");

        let response = self.client.get(self.authorize(url)).send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if !status.is_success() {
            return Err(GatewayError::Status {
                status,
                message: api_error_message(&body),
            });
        }

        let page = parse_page(&body)?;
        debug!(
            returned = page.articles.len(),
            total = page.total_results,
            "page received"
        );
        Ok(page)
    }
}

/// Decode a successful response body.
///
/// A pure function (no I/O) so tests can exercise decoding without a
/// server.
pub fn parse_page(body: &[u8]) -> Result<PageResult, GatewayError> {
    Ok(serde_json::from_slice(body)?)
}

/// NewsAPI error bodies look like
/// `{"status":"error","code":"apiKeyInvalid","message":"..."}`.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

fn api_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.message)
}

#[async_trait]
impl NewsSource for NewsApiSource {
    fn name(&self) -> &str {
        "newsapi.org"
    }

    async fn top_headlines(&self, category: Option<Category>) -> Result<PageResult, GatewayError> {
        self.fetch(self.headlines_url(category)).await
    }

    async fn search(&self, query: &str) -> Result<PageResult, GatewayError> {
        self.fetch(self.search_url(query)).await
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
