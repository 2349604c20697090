//! Shared test fixtures: a scripted in-memory [`NewsSource`].

use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::source::{Article, ArticleSource, Category, GatewayError, NewsSource, PageResult};

/// A page of `n` articles whose titles start with `prefix`.
pub fn titled_page(prefix: &str, n: usize, total: u32) -> PageResult {
    let articles = (0..n)
        .map(|i| Article {
            source: ArticleSource {
                id: None,
                name: "Test Wire".into(),
            },
            author: None,
            title: format!("{prefix} {i}"),
            description: Some(format!("about {prefix} {i}")),
            url: format!("https://news.test/{prefix}/{i}"),
            url_to_image: None,
            published_at: "2025-06-01T12:00:00Z".into(),
            content: None,
        })
        .collect();
    PageResult {
        articles,
        total_results: total,
    }
}

pub fn page(n: usize, total: u32) -> PageResult {
    titled_page("headline", n, total)
}

/// `GatewayError` isn't `Clone`; rebuild an equivalent for each call.
fn replay(result: &Result<PageResult, GatewayError>) -> Result<PageResult, GatewayError> {
    match result {
        Ok(p) => Ok(p.clone()),
        Err(GatewayError::Status { status, message }) => Err(GatewayError::Status {
            status: *status,
            message: message.clone(),
        }),
        Err(GatewayError::BlankQuery) => Err(GatewayError::BlankQuery),
        Err(other) => Err(GatewayError::Status {
            status: reqwest::StatusCode::INTERNAL_SERVER_ERROR,
            message: Some(other.to_string()),
        }),
    }
}

struct Reply {
    result: Result<PageResult, GatewayError>,
    delay: Duration,
}

struct Script {
    queued: VecDeque<Reply>,
    sticky: Result<PageResult, GatewayError>,
    delay: Duration,
}

impl Script {
    fn new() -> Self {
        Self {
            queued: VecDeque::new(),
            sticky: Ok(PageResult::default()),
            delay: Duration::ZERO,
        }
    }

    fn next(&mut self) -> (Result<PageResult, GatewayError>, Duration) {
        match self.queued.pop_front() {
            Some(reply) => (reply.result, reply.delay),
            None => (replay(&self.sticky), self.delay),
        }
    }
}

/// A [`NewsSource`] that answers from a script and records every call.
///
/// Queued replies are used first, in order; afterwards every call gets the
/// sticky reply.  Delays use `tokio::time`, so paused-clock tests control
/// exactly when replies land.
pub struct FakeSource {
    headlines: Mutex<Script>,
    search: Mutex<Script>,
    headline_calls: Mutex<Vec<Option<Category>>>,
    search_calls: Mutex<Vec<String>>,
}

impl FakeSource {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            headlines: Mutex::new(Script::new()),
            search: Mutex::new(Script::new()),
            headline_calls: Mutex::new(Vec::new()),
            search_calls: Mutex::new(Vec::new()),
        })
    }

    pub fn set_headlines(&self, result: Result<PageResult, GatewayError>) {
        self.headlines.lock().sticky = result;
    }

    pub fn set_headlines_delay(&self, delay: Duration) {
        self.headlines.lock().delay = delay;
    }

    pub fn push_headlines(&self, result: Result<PageResult, GatewayError>, delay: Duration) {
        self.headlines.lock().queued.push_back(Reply { result, delay });
    }

    pub fn set_search(&self, result: Result<PageResult, GatewayError>) {
        self.search.lock().sticky = result;
    }

    pub fn set_search_delay(&self, delay: Duration) {
        self.search.lock().delay = delay;
    }

    pub fn push_search(&self, result: Result<PageResult, GatewayError>, delay: Duration) {
        self.search.lock().queued.push_back(Reply { result, delay });
    }

    pub fn headline_calls(&self) -> Vec<Option<Category>> {
        self.headline_calls.lock().clone()
    }

    pub fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().clone()
    }
}

#[async_trait]
impl NewsSource for FakeSource {
    fn name(&self) -> &str {
        "fake"
    }

    async fn top_headlines(&self, category: Option<Category>) -> Result<PageResult, GatewayError> {
        self.headline_calls.lock().push(category);
        let (result, delay) = self.headlines.lock().next();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }

    async fn search(&self, query: &str) -> Result<PageResult, GatewayError> {
        self.search_calls.lock().push(query.to_string());
        let (result, delay) = self.search.lock().next();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        result
    }
}
