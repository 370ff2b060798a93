//! Natural-language search types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Sort order for search results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortBy {
    /// Best match first.
    Relevance,
    /// Most recently modified first.
    Date,
    /// Alphabetical by title.
    Name,
}

/// An inclusive date window for filtering results.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DateRange {
    /// Start of the window.
    pub start: DateTime<Utc>,
    /// End of the window.
    pub end: DateTime<Utc>,
}

/// Optional constraints on a search query.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchFilters {
    /// Restrict to these file extensions. Empty means no restriction.
    #[serde(default)]
    pub file_types: Vec<String>,
    /// Restrict to documents modified within this window.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Sort order for the result page.
    pub sort_by: SortBy,
}

impl Default for SearchFilters {
    fn default() -> Self {
        Self {
            file_types: Vec::new(),
            date_range: None,
            sort_by: SortBy::Relevance,
        }
    }
}

/// A single matching document passage.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchHit {
    /// Backend-assigned identifier.
    pub id: String,
    /// Document title.
    pub title: String,
    /// Short snippet of the matching content.
    pub excerpt: String,
    /// File extension of the source document.
    pub file_type: String,
    /// Size of the source document in bytes.
    pub file_size: u64,
    /// Last modification time of the source document.
    pub last_modified: DateTime<Utc>,
    /// Match quality in `0.0..=1.0`.
    pub relevance_score: f64,
    /// Document author, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    /// Tags attached to the document, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    /// Original file path or location, if known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

/// A page of search results.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResults {
    /// The matching passages for this page.
    pub items: Vec<SearchHit>,
    /// Total matches across all pages.
    pub total: u64,
    /// The page number of this response.
    pub page: u32,
    /// Page size.
    pub per_page: u32,
    /// Backend-measured query time in milliseconds, when reported.
    #[serde(default, rename = "searchTime")]
    pub search_time_ms: Option<u64>,
}
