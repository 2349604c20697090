use ratatui::widgets::ListState;
use tokio::sync::watch;

use crate::coordinator::NewsCoordinator;
use crate::source::{Article, Category};
use crate::state::NewsState;

/// Whether keystrokes navigate or edit the search box.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    Search,
}

/// The kind of request the user last asked for, replayed by retry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LastRequest {
    Headlines,
    Refresh,
    Search,
}

pub struct App {
    coordinator: NewsCoordinator,
    updates: watch::Receiver<NewsState>,
    /// Latest snapshot published by the coordinator.
    pub news: NewsState,
    /// List selection state for scrolling.
    pub list_state: ListState,
    pub input_mode: InputMode,
    /// Whether the user has requested to quit.
    pub quit: bool,
    last_request: LastRequest,
}

impl App {
    pub fn new(coordinator: NewsCoordinator) -> Self {
        let mut updates = coordinator.subscribe();
        let news = updates.borrow_and_update().clone();
        Self {
            coordinator,
            updates,
            news,
            list_state: ListState::default(),
            input_mode: InputMode::Normal,
            quit: false,
            last_request: LastRequest::Headlines,
        }
    }

    /// Pull the newest snapshot, if any.  Returns whether it changed.
    pub fn sync(&mut self) -> bool {
        if !self.updates.has_changed().unwrap_or(false) {
            return false;
        }
        let selected_id = self.selected_article().map(|a| a.id().to_string());
        self.news = self.updates.borrow_and_update().clone();

        // Keep the cursor on the same story if it survived the reload.
        if let Some(id) = selected_id {
            let position = self.news.articles().iter().position(|a| a.id() == id);
            if position.is_some() {
                self.list_state.select(position);
            }
        }
        self.clamp_selection();
        true
    }

    pub fn selected_article(&self) -> Option<&Article> {
        self.list_state
            .selected()
            .and_then(|i| self.news.articles().get(i))
    }

    pub fn last_request(&self) -> LastRequest {
        self.last_request
    }

    fn clamp_selection(&mut self) {
        let len = self.news.articles().len();
        match self.list_state.selected() {
            _ if len == 0 => self.list_state.select(None),
            Some(i) if i >= len => self.list_state.select(Some(len - 1)),
            None => self.list_state.select(Some(0)),
            Some(_) => {}
        }
    }

    // -- intents -------------------------------------------------------------

    pub fn refresh(&mut self) {
        self.last_request = LastRequest::Refresh;
        self.coordinator.refresh();
        self.sync();
    }

    pub fn begin_search(&mut self) {
        self.input_mode = InputMode::Search;
    }

    /// Leave the search box, keeping the query and its results.
    pub fn finish_search(&mut self) {
        self.input_mode = InputMode::Normal;
    }

    pub fn push_search_char(&mut self, c: char) {
        let mut query = self.news.search_query.clone();
        query.push(c);
        self.set_query(query);
    }

    pub fn pop_search_char(&mut self) {
        let mut query = self.news.search_query.clone();
        query.pop();
        self.set_query(query);
    }

    fn set_query(&mut self, query: String) {
        self.last_request = LastRequest::Search;
        self.coordinator.search(query);
        self.sync();
    }

    pub fn cancel_search(&mut self) {
        self.input_mode = InputMode::Normal;
        self.last_request = LastRequest::Headlines;
        self.coordinator.clear_search();
        self.sync();
    }

    pub fn next_category(&mut self) {
        self.shift_category(1);
    }

    pub fn previous_category(&mut self) {
        self.shift_category(CATEGORY_CHOICES.len() - 1);
    }

    fn shift_category(&mut self, step: usize) {
        let current = CATEGORY_CHOICES
            .iter()
            .position(|c| *c == self.news.selected_category)
            .unwrap_or(0);
        let next = CATEGORY_CHOICES[(current + step) % CATEGORY_CHOICES.len()];
        self.select_category(next);
    }

    pub fn select_category(&mut self, category: Option<Category>) {
        self.last_request = LastRequest::Headlines;
        self.list_state.select(None);
        self.coordinator.select_category(category);
        self.sync();
    }

    /// Re-issue whatever the user last asked for.
    pub fn retry(&mut self) {
        match self.last_request {
            LastRequest::Headlines => self
                .coordinator
                .select_category(self.news.selected_category),
            LastRequest::Refresh => self.coordinator.refresh(),
            LastRequest::Search => self.coordinator.search(self.news.search_query.clone()),
        }
        self.sync();
    }

    pub fn dismiss_error(&mut self) {
        self.coordinator.clear_error();
        self.sync();
    }

    // -- navigation ----------------------------------------------------------

    pub fn select_next(&mut self) {
        let len = self.news.articles().len();
        if len == 0 {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => (i + 1).min(len - 1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_previous(&mut self) {
        if self.news.articles().is_empty() {
            return;
        }
        let i = match self.list_state.selected() {
            Some(i) => i.saturating_sub(1),
            None => 0,
        };
        self.list_state.select(Some(i));
    }

    pub fn select_first(&mut self) {
        if !self.news.articles().is_empty() {
            self.list_state.select(Some(0));
        }
    }

    pub fn select_last(&mut self) {
        let len = self.news.articles().len();
        if len > 0 {
            self.list_state.select(Some(len - 1));
        }
    }
}

/// Tab order: all categories first, then each one.
pub const CATEGORY_CHOICES: [Option<Category>; 8] = [
    None,
    Some(Category::Business),
    Some(Category::Entertainment),
    Some(Category::General),
    Some(Category::Health),
    Some(Category::Science),
    Some(Category::Sports),
    Some(Category::Technology),
];
