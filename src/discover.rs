//! Link discovery: language-filter pages and item detail pages.
//!
//! Two lookups drive the pipeline's fan-out. [`discover_language_pages`]
//! reads the LANGUAGE facet of the filter bar on a search-results page and
//! returns one URL per language value. [`discover_item_links`] walks a fully
//! paginated results page and returns the detail-page URL of every listed
//! item.

use crate::error::{Error, Result};
use crate::session::{ElementId, Page};
use tracing::{debug, info};

/// Selector for the collapsible facet headers in the filter bar.
pub const FILTER_HEADER: &str = "div.filter-header.slide-trigger.js-filter-trigger";

/// Label text of the language facet. Facet headers are unordered and not
/// positionally stable, so the facet is matched by this text, never by index.
pub const LANGUAGE_FACET_LABEL: &str = "LANGUAGE";

/// Selector for the results container on a listing page.
pub const RESULTS_LIST: &str = "div.search-results-list";

/// A facet showing more than five values renders a trailing "show less"
/// control as an extra anchor; above this count the last anchor is dropped.
const MAX_FACET_ANCHORS: usize = 6;

/// Extracts the set of language-filter result-page URLs from a loaded
/// search-results page.
///
/// The LANGUAGE facet header is matched by label text; its next sibling is
/// the container holding one anchor per language value. Anchors are returned
/// in filter-bar order. When more than [`MAX_FACET_ANCHORS`] anchors are
/// collected, the last one is the "show less" control and is dropped.
///
/// A page without a LANGUAGE facet yields an empty Vec: the query simply has
/// no language facet, and the caller treats this as a zero-result outcome
/// rather than an error.
pub async fn discover_language_pages(page: &dyn Page) -> Result<Vec<String>> {
    let mut language_header = None;
    for header in page.find_all(FILTER_HEADER).await? {
        if page.text(header).await?.trim() == LANGUAGE_FACET_LABEL {
            language_header = Some(header);
        }
    }

    let Some(header) = language_header else {
        debug!("no LANGUAGE facet on this results page");
        return Ok(Vec::new());
    };

    let container = page
        .next_sibling(header)
        .await?
        .ok_or_else(|| Error::navigation("LANGUAGE facet header has no sibling container"))?;

    let mut links = Vec::new();
    for anchor in page.find_in(container, "a").await? {
        if let Some(href) = page.attr(anchor, "href").await? {
            links.push(href);
        }
    }

    if links.len() > MAX_FACET_ANCHORS {
        links.pop();
    }

    debug!(count = links.len(), "language facet pages discovered");
    Ok(links)
}

/// Extracts the item detail-page URLs from a results page, in DOM order.
///
/// The page must already be fully paginated (see
/// [`reveal_all_results`](crate::paginate::reveal_all_results)). The results
/// container's direct child blocks are iterated and the first anchor of each
/// contributes one URL.
///
/// When the container cannot be located the site has skipped the list view
/// (a single-result query navigates straight to the item), and an
/// [`Error::Navigation`] is returned so the caller can fall back to treating
/// the current page URL as the sole item link.
pub async fn discover_item_links(page: &dyn Page) -> Result<Vec<String>> {
    let container = page
        .find(RESULTS_LIST)
        .await?
        .ok_or_else(|| Error::navigation("results container not found"))?;

    let mut links = Vec::new();
    for block in page.find_in(container, ":scope > div").await? {
        let anchor = first_anchor(page, block).await?;
        if let Some(href) = page.attr(anchor, "href").await? {
            links.push(href);
        }
    }

    info!(count = links.len(), "items discovered on results page");
    Ok(links)
}

async fn first_anchor(page: &dyn Page, block: ElementId) -> Result<ElementId> {
    page.find_in(block, "a")
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| Error::navigation("result block contains no anchor"))
}
