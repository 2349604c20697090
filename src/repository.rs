//! The data gateway between the coordinator and a [`NewsSource`].
//!
//! Every call returns [`Outcome`]s rather than `Result`s: failures are data
//! here, already carrying the message the UI will show.

use std::sync::Arc;

use futures::stream::{self, BoxStream, StreamExt};
use tracing::{debug, warn};

use crate::source::{Category, GatewayError, NewsSource, Outcome, PageResult};

const LOAD_FAILED: &str = "Failed to load headlines";
const REFRESH_FAILED: &str = "Failed to refresh headlines";
const SEARCH_FAILED: &str = "Failed to search articles";

/// Outcome-returning facade over a news source.
pub struct NewsRepository {
    source: Arc<dyn NewsSource>,
}

impl NewsRepository {
    pub fn new(source: Arc<dyn NewsSource>) -> Self {
        Self { source }
    }

    /// Load headlines as a stream: `Loading`, then one `Success` or `Error`.
    ///
    /// Nothing is fetched until the stream is polled past `Loading`, and
    /// every call starts from scratch.
    pub fn stream_headlines(
        &self,
        category: Option<Category>,
    ) -> BoxStream<'static, Outcome<PageResult>> {
        let source = Arc::clone(&self.source);
        let terminal = async move {
            debug!(source = source.name(), ?category, "loading headlines");
            let result = source.top_headlines(category).await;
            log_failure("load", &result);
            Outcome::from_result(result, LOAD_FAILED)
        };

        stream::once(async { Outcome::Loading })
            .chain(stream::once(terminal))
            .boxed()
    }

    /// Re-fetch headlines in one shot; never yields `Loading`.
    pub async fn refresh_headlines(&self, category: Option<Category>) -> Outcome<PageResult> {
        debug!(source = self.source.name(), ?category, "refreshing headlines");
        let result = self.source.top_headlines(category).await;
        log_failure("refresh", &result);
        Outcome::from_result(result, REFRESH_FAILED)
    }

    /// Search articles.  A blank query fails without touching the network.
    pub async fn search(&self, query: &str) -> Outcome<PageResult> {
        if query.trim().is_empty() {
            return Outcome::from_error(GatewayError::BlankQuery, SEARCH_FAILED);
        }

        debug!(source = self.source.name(), query, "searching");
        let result = self.source.search(query).await;
        log_failure("search", &result);
        Outcome::from_result(result, SEARCH_FAILED)
    }
}

fn log_failure(operation: &str, result: &Result<PageResult, GatewayError>) {
    if let Err(e) = result {
        warn!(operation, error = %e, "news source call failed");
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{page, FakeSource};
    use reqwest::StatusCode;

    #[tokio::test]
    async fn stream_yields_loading_then_success() {
        let fake = FakeSource::new();
        fake.set_headlines(Ok(page(3, 40)));
        let repo = NewsRepository::new(fake.clone());

        let outcomes: Vec<_> = repo.stream_headlines(Some(Category::Health)).collect().await;

        assert_eq!(outcomes.len(), 2);
        assert!(matches!(outcomes[0], Outcome::Loading));
        match &outcomes[1] {
            Outcome::Success(p) => {
                assert_eq!(p.articles.len(), 3);
                assert_eq!(p.total_results, 40);
            }
            other => panic!("expected success, got {other:?}"),
        }
        assert_eq!(fake.headline_calls(), vec![Some(Category::Health)]);
    }

    #[tokio::test]
    async fn stream_is_lazy_and_restartable() {
        let fake = FakeSource::new();
        let repo = NewsRepository::new(fake.clone());

        let stream = repo.stream_headlines(None);
        assert!(fake.headline_calls().is_empty(), "nothing fetched before polling");
        drop(stream);

        let _: Vec<_> = repo.stream_headlines(None).collect().await;
        let _: Vec<_> = repo.stream_headlines(None).collect().await;
        assert_eq!(fake.headline_calls().len(), 2);
    }

    #[tokio::test]
    async fn stream_error_falls_back_to_generic_message() {
        let fake = FakeSource::new();
        fake.set_headlines(Err(GatewayError::Status {
            status: StatusCode::SERVICE_UNAVAILABLE,
            message: None,
        }));
        let repo = NewsRepository::new(fake);

        let outcomes: Vec<_> = repo.stream_headlines(None).collect().await;

        match &outcomes[1] {
            Outcome::Error { message, cause } => {
                assert_eq!(message, LOAD_FAILED);
                assert!(cause.is_some());
            }
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn refresh_is_single_shot() {
        let fake = FakeSource::new();
        fake.set_headlines(Ok(page(2, 2)));
        let repo = NewsRepository::new(fake.clone());

        let outcome = repo.refresh_headlines(Some(Category::Sports)).await;

        assert!(matches!(outcome, Outcome::Success(ref p) if p.articles.len() == 2));
        assert_eq!(fake.headline_calls(), vec![Some(Category::Sports)]);
    }

    #[tokio::test]
    async fn refresh_error_uses_api_message() {
        let fake = FakeSource::new();
        fake.set_headlines(Err(GatewayError::Status {
            status: StatusCode::TOO_MANY_REQUESTS,
            message: Some("You have made too many requests".into()),
        }));
        let repo = NewsRepository::new(fake);

        match repo.refresh_headlines(None).await {
            Outcome::Error { message, .. } => assert_eq!(message, "You have made too many requests"),
            other => panic!("expected error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn blank_search_fails_without_network_call() {
        let fake = FakeSource::new();
        let repo = NewsRepository::new(fake.clone());

        for query in ["", "   ", "\t\n"] {
            match repo.search(query).await {
                Outcome::Error { message, cause } => {
                    assert_eq!(message, "Search query cannot be empty");
                    assert!(matches!(cause.as_deref(), Some(GatewayError::BlankQuery)));
                }
                other => panic!("expected error, got {other:?}"),
            }
        }
        assert!(fake.search_calls().is_empty());
    }

    #[tokio::test]
    async fn search_passes_query_through() {
        let fake = FakeSource::new();
        fake.set_search(Ok(page(5, 5)));
        let repo = NewsRepository::new(fake.clone());

        let outcome = repo.search("rust").await;

        assert!(matches!(outcome, Outcome::Success(ref p) if p.articles.len() == 5));
        assert_eq!(fake.search_calls(), vec!["rust".to_string()]);
    }
}
