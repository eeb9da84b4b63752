//! Core data types for book records and assembled datasets.
//!
//! This module defines the data structures shared by every pipeline stage:
//!
//! - [`BookRecord`] - one row of the result table
//! - [`Dataset`] - the ordered result table for one query
//! - [`normalize_query`] - query normalization used for display and paths
//!
//! # Examples
//!
//! ```rust
//! use folio::types::{BookRecord, Dataset};
//!
//! let record = BookRecord {
//!     id: 9780099573586,
//!     timestamp: "Mon Aug 24 10:00:00 2026".to_string(),
//!     author: "Jose Saramago".to_string(),
//!     title: "Blindness".to_string(),
//!     language: Some("English".to_string()),
//!     price: 9.99,
//!     image_link: None,
//! };
//!
//! let mut dataset = Dataset::new("jose_saramago");
//! dataset.push(record);
//! assert_eq!(dataset.len(), 1);
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Column headers of the persisted result table, in output order.
pub const COLUMNS: [&str; 7] = [
    "ID",
    "Timestamp",
    "Author",
    "Title",
    "Language",
    "Price (£)",
    "Image_link",
];

/// One row of the result table: a single catalog item.
///
/// The `id` is the 13-digit catalog identifier taken from the trailing
/// characters of the item's detail-page URL; extraction fails if it does not
/// parse as an integer. `language` is a property of the results page the item
/// was discovered on, not of the item page itself, so the extractor leaves it
/// unset and the assembler fills it in. A page may fail to declare a
/// language, in which case it stays `None`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BookRecord {
    /// 13-digit catalog identifier from the detail-page URL tail
    pub id: u64,

    /// Capture time, recorded when the record was extracted
    pub timestamp: String,

    /// Author name as displayed on the detail page
    pub author: String,

    /// Book title as displayed on the detail page
    pub title: String,

    /// Language of the results page the item was found on, if declared
    pub language: Option<String>,

    /// Price in GBP, currency symbol stripped
    pub price: f64,

    /// Absolute URL of the cover image, if present
    pub image_link: Option<String>,
}

impl BookRecord {
    /// Coerces every field to its text representation for the sink.
    ///
    /// Absent optional fields become the literal string `"None"`, so the
    /// persisted table has a uniform column typing.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use folio::types::BookRecord;
    ///
    /// let record = BookRecord {
    ///     id: 9780099573586,
    ///     timestamp: "now".to_string(),
    ///     author: "A".to_string(),
    ///     title: "T".to_string(),
    ///     language: None,
    ///     price: 8.5,
    ///     image_link: None,
    /// };
    /// let row = record.to_row();
    /// assert_eq!(row[0], "9780099573586");
    /// assert_eq!(row[4], "None");
    /// assert_eq!(row[5], "8.5");
    /// ```
    pub fn to_row(&self) -> [String; 7] {
        let none = || "None".to_string();
        [
            self.id.to_string(),
            self.timestamp.clone(),
            self.author.clone(),
            self.title.clone(),
            self.language.clone().unwrap_or_else(none),
            self.price.to_string(),
            self.image_link.clone().unwrap_or_else(none),
        ]
    }
}

/// The ordered result table assembled for one query.
///
/// Insertion order is discovery order: language pages in filter-bar order,
/// items within a page in DOM order. The same book may appear under multiple
/// languages; no cross-language deduplication is performed, since each
/// language page is a distinct facet of the query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dataset {
    /// Normalized query slug, used as the path segment for persistence
    pub query: String,

    /// Accumulated records, append-only within one query run
    pub records: Vec<BookRecord>,
}

impl Dataset {
    /// Creates an empty dataset for the given normalized query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            records: Vec::new(),
        }
    }

    /// Appends a record, preserving discovery order.
    pub fn push(&mut self, record: BookRecord) {
        self.records.push(record);
    }

    /// Number of records in the table.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the table has no records.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates over the records in discovery order.
    pub fn iter(&self) -> std::slice::Iter<'_, BookRecord> {
        self.records.iter()
    }

    /// The set of catalog ids in the table.
    ///
    /// Re-running a query against an unchanged catalog yields the same id
    /// set, though live-site pagination may permute the order.
    pub fn ids(&self) -> HashSet<u64> {
        self.records.iter().map(|r| r.id).collect()
    }
}

/// Normalizes a query string for use as a slug and path segment.
///
/// Lowercases the text and replaces spaces with underscores. The display
/// form (what is typed into the search bar) keeps its spaces.
///
/// # Examples
///
/// ```rust
/// use folio::types::normalize_query;
///
/// assert_eq!(normalize_query("Jose Saramago"), "jose_saramago");
/// ```
pub fn normalize_query(query: &str) -> String {
    query.trim().to_lowercase().replace(' ', "_")
}
