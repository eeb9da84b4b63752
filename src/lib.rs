//! # folio - Headless bookseller catalog scraping library
//!
//! folio turns one search term into a structured, language-tagged dataset of
//! book records by driving a headless browser through a retailer's website:
//! submitting the search, walking the language-filtered result pages,
//! revealing paginated batches, extracting per-item fields, and persisting
//! the assembled table to disk alongside downloaded cover images.
//!
//! ## Features
//!
//! - **Capability seam**: all DOM work goes through the [`session::Page`]
//!   trait, so the pipeline is testable without a browser
//! - **Typed failure taxonomy**: navigation, parse, search, and timeout
//!   conditions are distinct, and only the documented ones are recovered
//! - **Bounded pagination**: reveal loops run a fixed number of cycles
//!   derived from the page-count indicator, with a one-cycle safety margin
//! - **Persistence sink**: per-query CSV plus a cover image per record
//! - **Async/await**: built on tokio; the headless Chrome backend
//!   (`chromiumoxide`) sits behind the `browser` cargo feature
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use folio::prelude::*;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> folio::Result<()> {
//!     let config = ScraperConfig::default();
//!     let session = Arc::new(ChromeSession::launch(&config).await?);
//!
//!     if let Err(e) = dismiss_cookie_banner(session.as_ref(), config.consent_timeout).await {
//!         eprintln!("consent banner not dismissed: {}", e);
//!     }
//!
//!     let assembler = Assembler::new(session.clone(), config.clone());
//!     let dataset = assembler.assemble("jose saramago").await?;
//!
//!     write_table(&dataset, &config.raw_data_root).await?;
//!     save_cover_images(&dataset, &config.raw_data_root).await?;
//!
//!     session.quit().await
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`session`]: the page-automation capability trait and consent handling
//! - [`discover`]: language-facet and item-link discovery
//! - [`paginate`]: bounded reveal cycles for batched result pages
//! - [`extract`]: one detail page into one [`types::BookRecord`]
//! - [`assemble`]: per-query orchestration with typed fallbacks
//! - [`persist`]: CSV table and cover-image sinks
//! - [`browser`]: the `chromiumoxide` session (feature `browser`)
//! - [`error`]: the failure taxonomy

pub mod assemble;
pub mod config;
pub mod discover;
pub mod download;
pub mod error;
pub mod extract;
pub mod net;
pub mod paginate;
pub mod persist;
pub mod session;
pub mod types;

#[cfg(feature = "browser")]
pub mod browser;

/// Prelude module for convenient imports.
///
/// Re-exports the types and functions most callers need, allowing a single
/// `use folio::prelude::*;`.
pub mod prelude {
    pub use crate::{
        assemble::Assembler,
        config::{ScraperConfig, ScraperConfigBuilder},
        discover::{discover_item_links, discover_language_pages},
        download::download_file,
        error::{Error, Result},
        extract::extract_record,
        paginate::reveal_all_results,
        persist::{image_id_from_url, save_cover_images, write_table},
        session::{dismiss_cookie_banner, ElementId, Page},
        types::{normalize_query, BookRecord, Dataset},
    };

    #[cfg(feature = "browser")]
    pub use crate::browser::ChromeSession;
}

// Re-export main types at crate root for direct access
pub use assemble::Assembler;
pub use config::{ScraperConfig, ScraperConfigBuilder};
pub use error::{Error, Result};
pub use session::{ElementId, Page};
pub use types::{BookRecord, Dataset};

#[cfg(feature = "browser")]
pub use browser::ChromeSession;
