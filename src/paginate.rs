//! Pagination enumerator: reveal every result on a listing page.
//!
//! Result pages load in batches behind a "show more" control. Before item
//! links can be collected the page has to be driven through enough reveal
//! cycles (scroll to the bottom, click the control if it is visible, pause
//! for the new batch to render) to expose the full set.

use crate::error::{Error, Result};
use crate::session::Page;
use once_cell::sync::Lazy;
use regex::Regex;
use std::time::Duration;
use tracing::debug;

/// Selector for the "N of M" page-count indicator near the results header.
pub const PAGE_COUNT_INDICATOR: &str = "div.search-controls span.page-count";

/// Selector for the "show more" control at the bottom of a results page.
pub const SHOW_MORE_BUTTON: &str = "button.button.button-teal";

static DIGITS: Lazy<Regex> = Lazy::new(|| Regex::new(r"\d+").expect("digit regex"));

/// Reveals every result on the current listing page.
///
/// Reads the page count from the "N of M" indicator, stripping its marker
/// text down to the number. If the indicator is absent the result set fits
/// on one screen and nothing needs revealing. Otherwise the page is driven
/// through exactly `page_count + 1` reveal cycles; the extra cycle is a
/// deliberate safety margin so the final batch is not missed even if the
/// indicator undercounts by one.
///
/// The loop is a bounded retry, not a condition-polled wait: every cycle
/// scrolls, clicks the "show more" control only when it is present and
/// displayed, and pauses for `render_delay`, regardless of whether new
/// content actually appeared.
///
/// # Errors
///
/// An indicator that is present but contains no digits is a fatal
/// [`Error::Parse`].
pub async fn reveal_all_results(page: &dyn Page, render_delay: Duration) -> Result<()> {
    let Some(indicator) = page.find(PAGE_COUNT_INDICATOR).await? else {
        return Ok(());
    };

    let text = page.text(indicator).await?;
    let page_count: u32 = DIGITS
        .find(&text)
        .ok_or_else(|| Error::parse(format!("page-count indicator '{}' has no digits", text)))?
        .as_str()
        .parse()
        .map_err(|e| Error::parse(format!("page-count indicator '{}': {}", text, e)))?;

    debug!(page_count, "revealing paginated results");

    for _ in 0..=page_count {
        page.scroll_to_bottom().await?;
        if let Some(button) = page.find(SHOW_MORE_BUTTON).await? {
            if page.is_displayed(button).await? {
                page.click(button).await?;
            }
        }
        tokio::time::sleep(render_delay).await;
    }

    Ok(())
}
