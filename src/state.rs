//! The UI state snapshot and its transitions.
//!
//! [`NewsState`] is what the view renders.  Each `begin_*` / `apply_*`
//! method below is one complete transition; the coordinator runs each of
//! them inside a single `watch` update so observers only ever see whole
//! transitions.

use crate::source::{Article, Category, Outcome, PageResult};

/// Everything the view needs to draw the news list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsState {
    /// Current articles together with their server-side total.  Held as one
    /// value so the two can only be replaced together.
    pub page: PageResult,
    /// Initial or category load in progress.
    pub loading: bool,
    /// Refresh in progress.
    pub refreshing: bool,
    /// Search request in progress.
    pub searching: bool,
    pub error: Option<String>,
    pub selected_category: Option<Category>,
    /// Text in the search box, updated on every keystroke.
    pub search_query: String,
}

impl NewsState {
    pub fn articles(&self) -> &[Article] {
        &self.page.articles
    }

    pub fn total_results(&self) -> u32 {
        self.page.total_results
    }

    /// Whether any request is outstanding.
    pub fn is_busy(&self) -> bool {
        self.loading || self.refreshing || self.searching
    }

    /// Fold one event of a headline stream for `category`.
    pub fn apply_headlines(&mut self, category: Option<Category>, outcome: Outcome<PageResult>) {
        match outcome {
            Outcome::Loading => {
                self.loading = true;
                self.error = None;
                self.selected_category = category;
            }
            Outcome::Success(page) => {
                self.page = page;
                self.loading = false;
                self.error = None;
            }
            Outcome::Error { message, .. } => {
                self.loading = false;
                self.error = Some(message);
            }
        }
    }

    pub fn begin_refresh(&mut self) {
        self.refreshing = true;
        self.error = None;
    }

    /// Finish a refresh.  On failure the old page stays visible.
    pub fn apply_refresh(&mut self, outcome: Outcome<PageResult>) {
        match outcome {
            // Refresh is single-shot.
            Outcome::Loading => {}
            Outcome::Success(page) => {
                self.page = page;
                self.error = None;
                self.refreshing = false;
            }
            Outcome::Error { message, .. } => {
                self.error = Some(message);
                self.refreshing = false;
            }
        }
    }

    pub fn begin_search(&mut self) {
        self.searching = true;
        self.error = None;
    }

    pub fn apply_search(&mut self, outcome: Outcome<PageResult>) {
        match outcome {
            Outcome::Loading => {}
            Outcome::Success(page) => {
                self.page = page;
                self.searching = false;
            }
            Outcome::Error { message, .. } => {
                self.error = Some(message);
                self.searching = false;
            }
        }
    }

    /// Drop the error message.  Returns whether anything changed.
    pub fn clear_error(&mut self) -> bool {
        self.error.take().is_some()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
