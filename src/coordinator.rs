//! The state coordinator: turns user intents into repository calls and
//! folds the outcomes into one observable [`NewsState`].
//!
//! ## Concurrency
//!
//! Every repository call runs on its own tokio task, so intents are accepted
//! while requests are outstanding.  Headline loads and refreshes are never
//! cancelled; if two overlap, whichever finishes last wins the page and
//! error fields.
//!
//! The debounced search is the one cancellable task.  Cancelling bumps a
//! generation counter and aborts the task.  The task compares its ticket
//! with the counter inside the same `watch` update that writes the state,
//! so once a cancel has happened a stale search can no longer write, even
//! when the abort lands after its request already returned.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures::StreamExt;
use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::repository::NewsRepository;
use crate::source::Category;
use crate::state::NewsState;

/// Default quiet period between the last keystroke and the search request.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(500);

/// Owns the news UI state for one screen.
///
/// Dropping the coordinator cancels any pending search.
pub struct NewsCoordinator {
    repository: Arc<NewsRepository>,
    state: Arc<watch::Sender<NewsState>>,
    search_generation: Arc<AtomicU64>,
    pending_search: Mutex<Option<JoinHandle<()>>>,
    debounce: Duration,
}

impl NewsCoordinator {
    /// Create the coordinator and start loading top headlines.
    ///
    /// # Panics
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(repository: NewsRepository, debounce: Duration) -> Self {
        let (state, _) = watch::channel(NewsState::default());
        let coordinator = Self {
            repository: Arc::new(repository),
            state: Arc::new(state),
            search_generation: Arc::new(AtomicU64::new(0)),
            pending_search: Mutex::new(None),
            debounce,
        };
        coordinator.load_headlines(None);
        coordinator
    }

    /// Observe state changes.
    pub fn subscribe(&self) -> watch::Receiver<NewsState> {
        self.state.subscribe()
    }

    /// A copy of the current state.
    pub fn snapshot(&self) -> NewsState {
        self.state.borrow().clone()
    }

    /// Re-fetch headlines for the selected category, keeping the current
    /// list visible until the new one arrives.
    pub fn refresh(&self) {
        let mut category = None;
        self.state.send_modify(|s| {
            category = s.selected_category;
            s.begin_refresh();
        });
        debug!(?category, "refresh requested");

        let repository = Arc::clone(&self.repository);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            let outcome = repository.refresh_headlines(category).await;
            state.send_modify(|s| s.apply_refresh(outcome));
        });
    }

    /// Record a keystroke in the search box and (re)schedule the search.
    ///
    /// A blank query goes back to the unfiltered headlines straight away.
    pub fn search(&self, query: impl Into<String>) {
        let query = query.into();
        let blank = query.trim().is_empty();

        let mut pending = self.pending_search.lock();
        let ticket = self.cancel_search(&mut pending);

        // After the cancel, so a stale task can't set `searching` again.
        self.state.send_if_modified(|s| {
            let mut changed = false;
            if s.search_query != query {
                s.search_query.clone_from(&query);
                changed = true;
            }
            if blank && s.searching {
                s.searching = false;
                changed = true;
            }
            changed
        });

        if blank {
            drop(pending);
            self.load_headlines(None);
            return;
        }

        let task = DebouncedSearch {
            repository: Arc::clone(&self.repository),
            state: Arc::clone(&self.state),
            generation: Arc::clone(&self.search_generation),
            ticket,
            query,
            debounce: self.debounce,
        };
        *pending = Some(tokio::spawn(task.run()));
    }

    /// Abandon the search and return to headlines for the selected category.
    pub fn clear_search(&self) {
        {
            let mut pending = self.pending_search.lock();
            self.cancel_search(&mut pending);
        }

        let mut category = None;
        self.state.send_modify(|s| {
            s.search_query.clear();
            s.searching = false;
            category = s.selected_category;
        });
        self.load_headlines(category);
    }

    /// Switch to another category (`None` for all of them).
    pub fn select_category(&self, category: Option<Category>) {
        self.load_headlines(category);
    }

    pub fn clear_error(&self) {
        self.state.send_if_modified(NewsState::clear_error);
    }

    /// Stream headlines for `category` into the state on a new task.
    fn load_headlines(&self, category: Option<Category>) {
        debug!(?category, "loading headlines");
        let mut outcomes = self.repository.stream_headlines(category);
        let state = Arc::clone(&self.state);
        tokio::spawn(async move {
            while let Some(outcome) = outcomes.next().await {
                state.send_modify(|s| s.apply_headlines(category, outcome));
            }
        });
    }

    /// Invalidate and abort the pending search.  Returns the ticket for the
    /// next one.
    fn cancel_search(&self, pending: &mut Option<JoinHandle<()>>) -> u64 {
        let ticket = self.search_generation.fetch_add(1, Ordering::SeqCst) + 1;
        if let Some(task) = pending.take() {
            task.abort();
        }
        ticket
    }
}

impl Drop for NewsCoordinator {
    fn drop(&mut self) {
        let mut pending = self.pending_search.lock();
        self.cancel_search(&mut pending);
    }
}

/// One scheduled search, alive until its ticket goes stale.
struct DebouncedSearch {
    repository: Arc<NewsRepository>,
    state: Arc<watch::Sender<NewsState>>,
    generation: Arc<AtomicU64>,
    ticket: u64,
    query: String,
    debounce: Duration,
}

impl DebouncedSearch {
    fn is_current(&self) -> bool {
        self.generation.load(Ordering::SeqCst) == self.ticket
    }

    async fn run(self) {
        tokio::time::sleep(self.debounce).await;

        let mut started = false;
        self.state.send_if_modified(|s| {
            started = self.is_current();
            if started {
                s.begin_search();
            }
            started
        });
        if !started {
            return;
        }

        debug!(query = %self.query, "search fired");
        let outcome = self.repository.search(&self.query).await;

        self.state.send_if_modified(|s| {
            if !self.is_current() {
                return false;
            }
            s.apply_search(outcome);
            true
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
