//! Error types and result handling for folio operations.
//!
//! All operations return a [`Result<T>`], a type alias for
//! `std::result::Result<T, Error>`.
//!
//! # Error Categories
//!
//! - **Navigation Errors**: an expected site-structure element (facet header,
//!   results container, detail-page field) was not found. Some of these are
//!   recovered locally by the assembler with documented fallbacks; the rest
//!   propagate.
//! - **Parse Errors**: a field that must be numeric (catalog id, price, page
//!   count) is malformed. Always fatal for the current query.
//! - **Search Errors**: the search submission itself failed. Fatal for the run.
//! - **Timeout Errors**: a bounded wait for a readiness signal expired. Only
//!   raised by consent dismissal, where callers log and ignore it.
//! - **Ambient Errors**: HTTP transport, file system, JSON, and browser
//!   backend failures. These always propagate.
//!
//! # Examples
//!
//! ```rust
//! use folio::error::Error;
//!
//! let err = Error::navigation("results container not found");
//! assert!(format!("{}", err).contains("results container"));
//!
//! let err = Error::parse("price '£' has no numeric part");
//! assert!(matches!(err, Error::Parse(_)));
//! ```

use std::time::Duration;
use thiserror::Error;

/// Type alias for Results with folio errors.
///
/// All public APIs in folio return this Result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Comprehensive error type for all folio operations.
///
/// The first four variants form the pipeline's failure taxonomy; the
/// remaining variants wrap errors from the ambient stack and always
/// propagate to the caller.
#[derive(Error, Debug)]
pub enum Error {
    /// An expected page-structure element could not be located.
    ///
    /// Raised when a selector that an ordinary results or detail page is
    /// expected to satisfy matches nothing. The assembler recovers from this
    /// in exactly two places (missing language label, missing results
    /// container); everywhere else it propagates.
    #[error("Navigation error: {0}")]
    Navigation(String),

    /// A field expected to be numeric or decimal is malformed.
    ///
    /// Covers the catalog id (trailing 13 characters of a detail-page URL),
    /// the price text, and the page-count indicator. Never recovered: a
    /// record with a malformed numeric field aborts assembly for the
    /// current query.
    #[error("Parse error: {0}")]
    Parse(String),

    /// The search-submission action did not succeed.
    ///
    /// Fatal for the whole run; not retried.
    #[error("Search error: {0}")]
    Search(String),

    /// A bounded wait for an element expired.
    ///
    /// Only produced by cookie-consent dismissal. Callers log this and
    /// proceed on the assumption that consent is not blocking.
    #[error("Timed out after {waited:?} waiting for '{selector}'")]
    Timeout { selector: String, waited: Duration },

    /// Network-related errors from HTTP operations (image downloads).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// File system and IO operation errors.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization and deserialization errors.
    ///
    /// Produced when a script-evaluation result from the browser backend
    /// cannot be interpreted.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Browser backend (CDP) errors.
    ///
    /// Transport-level failures of the underlying browser session. These are
    /// never treated as recoverable page-structure conditions.
    #[error("Browser error: {0}")]
    Browser(String),

    /// Generic error messages.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates a navigation error with the given message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use folio::Error;
    ///
    /// let error = Error::navigation("LANGUAGE facet container has no sibling");
    /// ```
    pub fn navigation(msg: impl Into<String>) -> Self {
        Error::Navigation(msg.into())
    }

    /// Creates a parse error with the given message.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use folio::Error;
    ///
    /// let error = Error::parse("id tail 'abc1234567890' is not numeric");
    /// ```
    pub fn parse(msg: impl Into<String>) -> Self {
        Error::Parse(msg.into())
    }

    /// Creates a search error with the given message.
    pub fn search(msg: impl Into<String>) -> Self {
        Error::Search(msg.into())
    }

    /// Creates a timeout error for a selector that never appeared.
    pub fn timeout(selector: impl Into<String>, waited: Duration) -> Self {
        Error::Timeout {
            selector: selector.into(),
            waited,
        }
    }
}

#[cfg(feature = "browser")]
impl From<chromiumoxide::error::CdpError> for Error {
    fn from(e: chromiumoxide::error::CdpError) -> Self {
        Error::Browser(e.to_string())
    }
}
