//! News source abstraction layer.
//!
//! This module defines the [`NewsSource`] trait, the shared article types,
//! the [`Outcome`] wrapper and the [`GatewayError`] taxonomy.  The concrete
//! NewsAPI.org client lives in [`newsapi`].
//!
//! ## For contributors — adding a new source
//!
//! 1. Create a new file in this directory (e.g. `guardian.rs`).
//! 2. Define a struct (e.g. `GuardianSource`) and implement [`NewsSource`].
//! 3. Add `mod guardian;` below and re-export your struct.
//! 4. Construct it in `main.rs` instead of [`NewsApiSource`].
//!
//! The repository, coordinator and UI are all source-agnostic.

mod article;
mod error;
mod newsapi;
mod outcome;

// Re-export the public API of this module so callers can write
// `use crate::source::{Article, NewsSource, Outcome};`
pub use article::{Article, ArticleSource, Category, PageResult};
pub use error::GatewayError;
pub use newsapi::NewsApiSource;
pub use outcome::Outcome;

use async_trait::async_trait;

/// Trait that every remote news source must implement.
///
/// Calls are made from tokio tasks, so implementations must be
/// `Send + Sync`.  They perform their own I/O and return one parsed page.
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Human-readable label, used in log lines.
    fn name(&self) -> &str;

    /// Current top headlines, optionally narrowed to one category.
    async fn top_headlines(&self, category: Option<Category>) -> Result<PageResult, GatewayError>;

    /// Full-text search, newest first.
    async fn search(&self, query: &str) -> Result<PageResult, GatewayError>;
}
