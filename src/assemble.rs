//! Dataset assembler: top-level per-query orchestration.
//!
//! [`Assembler`] drives the whole query-to-dataset pipeline: submit the
//! search, discover the language-filtered result pages, reveal and collect
//! the items on each, extract a record per item, tag it with the page's
//! language, and return the accumulated table.
//!
//! The assembler owns the session handle for the duration of one query.
//! Everything is strictly sequential: all stages share one navigable page
//! context whose current URL and DOM are mutated by every navigation, so
//! there is no concurrent page processing within a query.

use crate::config::ScraperConfig;
use crate::discover::{discover_item_links, discover_language_pages};
use crate::error::{Error, Result};
use crate::extract::extract_record;
use crate::paginate::reveal_all_results;
use crate::session::Page;
use crate::types::{normalize_query, Dataset};
use std::sync::Arc;
use tracing::{info, warn};

/// Selector for the site's search input.
pub const SEARCH_INPUT: &str = "input.input.input-search";

/// Selector for the language label on a language-filtered results page.
pub const LANGUAGE_LABEL: &str = "div.search-results-header span.active-facet-value";

/// Transient state for one search term, created per query and discarded
/// after persistence.
struct QuerySession {
    /// Display form, typed into the search bar
    display: String,
    /// Normalized form: lowercased, spaces replaced with underscores
    slug: String,
}

impl QuerySession {
    fn new(query: &str) -> Self {
        Self {
            display: query.trim().to_string(),
            slug: normalize_query(query),
        }
    }
}

/// Per-query orchestrator over a [`Page`] session.
///
/// # Examples
///
/// ```rust,no_run
/// use folio::assemble::Assembler;
/// use folio::browser::ChromeSession;
/// use folio::config::ScraperConfig;
/// use std::sync::Arc;
///
/// # async fn example() -> folio::Result<()> {
/// let config = ScraperConfig::default();
/// let session = Arc::new(ChromeSession::launch(&config).await?);
/// let assembler = Assembler::new(session, config);
///
/// let dataset = assembler.assemble("jose saramago").await?;
/// println!("{} records", dataset.len());
/// # Ok(())
/// # }
/// ```
pub struct Assembler {
    page: Arc<dyn Page>,
    config: ScraperConfig,
}

impl Assembler {
    /// Creates an assembler owning the given session for its queries.
    pub fn new(page: Arc<dyn Page>, config: ScraperConfig) -> Self {
        Self { page, config }
    }

    /// Runs the full pipeline for one query and returns the result table.
    ///
    /// Steps:
    ///
    /// 1. Normalize the query, keeping both display and slug forms.
    /// 2. Submit the display form through the site's search input. Failure
    ///    here is a fatal [`Error::Search`], never retried.
    /// 3. Discover the language-filter pages. An empty set is a zero-result
    ///    outcome, not an error.
    /// 4. For each language page in discovery order: read the language
    ///    label (missing label recovers to `None`), reveal and collect the
    ///    item links (missing results container recovers to the current URL
    ///    as the sole link), then extract a record from every item link and
    ///    tag it with the page's language.
    /// 5. Return the accumulated table.
    ///
    /// Malformed numeric fields (id, price) abort assembly for the query;
    /// no partial record is appended.
    pub async fn assemble(&self, query: &str) -> Result<Dataset> {
        let session = QuerySession::new(query);
        let page = self.page.as_ref();

        self.submit_search(&session.display).await?;

        let language_pages = discover_language_pages(page).await?;
        let mut dataset = Dataset::new(session.slug.clone());
        if language_pages.is_empty() {
            info!(query = %session.display, "no language facet pages; empty result");
            return Ok(dataset);
        }

        for language_url in &language_pages {
            page.goto(language_url).await?;
            tokio::time::sleep(self.config.nav_delay).await;

            let language = self.read_language_label().await?;
            let item_links = self.collect_item_links().await?;

            for link in &item_links {
                page.goto(link).await?;
                tokio::time::sleep(self.config.nav_delay).await;

                let mut record = extract_record(page).await?;
                record.language = language.clone();
                dataset.push(record);
            }

            info!(
                language = language.as_deref().unwrap_or("unknown"),
                items = item_links.len(),
                "language page processed"
            );
        }

        Ok(dataset)
    }

    /// Types the query into the search input and signals submission.
    async fn submit_search(&self, display: &str) -> Result<()> {
        let page = self.page.as_ref();
        let input = match page.find(SEARCH_INPUT).await {
            Ok(Some(input)) => input,
            Ok(None) => return Err(Error::search("search input not found")),
            Err(e) => return Err(Error::search(format!("search input lookup failed: {}", e))),
        };

        let submit = async {
            page.click(input).await?;
            page.fill(input, display).await?;
            page.submit(input).await
        };
        submit
            .await
            .map_err(|e| Error::search(format!("search submission failed: {}", e)))?;

        tokio::time::sleep(self.config.nav_delay).await;
        Ok(())
    }

    /// Reads the language label of the current results page.
    ///
    /// A page lacking a clear language banner must not abort the run, so a
    /// missing element recovers to `None`. Transport failures still
    /// propagate.
    async fn read_language_label(&self) -> Result<Option<String>> {
        match self.page.find(LANGUAGE_LABEL).await? {
            Some(label) => Ok(Some(self.page.text(label).await?.trim().to_string())),
            None => {
                warn!("results page does not declare a language");
                Ok(None)
            }
        }
    }

    /// Reveals all results and collects the item links for the current page.
    ///
    /// When the page's pagination structure is missing (a single-result
    /// query navigates straight to the item), the current URL is used as the
    /// sole item link. That recovery applies only to [`Error::Navigation`];
    /// anything else propagates.
    async fn collect_item_links(&self) -> Result<Vec<String>> {
        let page = self.page.as_ref();
        let discovered = async {
            reveal_all_results(page, self.config.render_delay).await?;
            discover_item_links(page).await
        };

        match discovered.await {
            Ok(links) => Ok(links),
            Err(Error::Navigation(reason)) => {
                warn!(%reason, "no results list; falling back to the current page as the item");
                Ok(vec![page.current_url().await?])
            }
            Err(e) => Err(e),
        }
    }
}
