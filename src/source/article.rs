//! The core data types shared between the news source, the repository and
//! the UI state.
//!
//! [`Article`] mirrors one entry of a NewsAPI response and [`PageResult`] a
//! whole response page.  Both are deserialized straight from the wire format
//! and never mutated afterwards.
//!
//! ## For contributors
//!
//! If you are adding a new news source you do **not** need to modify this
//! file unless your source exposes extra fields.  Build `Article` values in
//! your source's fetch methods and wrap them in a [`PageResult`].

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::Deserialize;

/// The publisher an article came from.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
pub struct ArticleSource {
    /// NewsAPI's machine identifier, absent for many smaller publishers.
    pub id: Option<String>,
    /// Display name (e.g. "BBC News").
    #[serde(default)]
    pub name: String,
}

/// A single news item.
///
/// The canonical [`url`](Article::url) is the identity key: two articles
/// with the same URL are the same story.
#[derive(Debug, Clone, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    #[serde(default)]
    pub source: ArticleSource,
    pub author: Option<String>,
    pub title: String,
    pub description: Option<String>,
    pub url: String,
    pub url_to_image: Option<String>,
    /// ISO-8601 timestamp exactly as the API sent it.
    pub published_at: String,
    pub content: Option<String>,
}

impl Article {
    /// Identity key of this article.
    pub fn id(&self) -> &str {
        &self.url
    }

    /// Publication time parsed from [`published_at`](Article::published_at).
    ///
    /// Malformed timestamps degrade to `None` instead of failing the whole
    /// page.
    pub fn published(&self) -> Option<DateTime<Utc>> {
        DateTime::parse_from_rfc3339(&self.published_at)
            .ok()
            .map(|dt| dt.with_timezone(&Utc))
    }
}

/// One page of results, in the order the API returned them.
#[derive(Debug, Clone, Default, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    #[serde(default)]
    pub articles: Vec<Article>,
    /// Number of matches on the server; may exceed `articles.len()`.
    #[serde(default)]
    pub total_results: u32,
}

/// Top-headline categories understood by NewsAPI.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Business,
    Entertainment,
    General,
    Health,
    Science,
    Sports,
    Technology,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Business,
        Category::Entertainment,
        Category::General,
        Category::Health,
        Category::Science,
        Category::Sports,
        Category::Technology,
    ];

    /// Wire name, as used in the `category` query parameter.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Business => "business",
            Category::Entertainment => "entertainment",
            Category::General => "general",
            Category::Health => "health",
            Category::Science => "science",
            Category::Sports => "sports",
            Category::Technology => "technology",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown category: {s}"))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
