//! Page automation capability trait.
//!
//! This module defines the [`Page`] trait, the seam between the
//! query-to-dataset pipeline and whatever drives the actual browser. The
//! pipeline stages ([`discover`](crate::discover),
//! [`paginate`](crate::paginate), [`extract`](crate::extract),
//! [`assemble`](crate::assemble)) only ever talk to a `&dyn Page`; the
//! production implementation is [`ChromeSession`](crate::browser::ChromeSession)
//! and tests substitute an in-memory mock.
//!
//! A browser session is one shared, exclusively-owned mutable resource: the
//! current URL and current DOM are temporally global and mutated by every
//! `goto` and `click`. The [`Assembler`](crate::assemble::Assembler) owns the
//! session handle for the duration of one query; no concurrent mutators are
//! permitted by design.

use crate::error::{Error, Result};
use async_trait::async_trait;
use std::time::Duration;

/// Opaque handle to a DOM element resolved by a [`Page`] implementation.
///
/// Handles are only meaningful for the page state they were resolved
/// against; navigating invalidates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ElementId(pub u64);

/// Browser-automation capabilities consumed by the pipeline.
///
/// Element lookups return `Ok(None)` (or an empty Vec) when nothing matches;
/// `Err` is reserved for transport-level failures of the backend. Mapping
/// "element absent" onto the pipeline's failure taxonomy is the caller's
/// job, since absence is an error on some pages and an expected state on
/// others.
#[async_trait]
pub trait Page: Send + Sync {
    /// Navigates the session to the given URL.
    async fn goto(&self, url: &str) -> Result<()>;

    /// The URL the session is currently positioned on.
    async fn current_url(&self) -> Result<String>;

    /// Finds the first element matching a CSS selector, if any.
    async fn find(&self, selector: &str) -> Result<Option<ElementId>>;

    /// Finds all elements matching a CSS selector, in DOM order.
    async fn find_all(&self, selector: &str) -> Result<Vec<ElementId>>;

    /// Finds elements matching a CSS selector among a parent's descendants,
    /// in DOM order.
    async fn find_in(&self, parent: ElementId, selector: &str) -> Result<Vec<ElementId>>;

    /// The element's next sibling element, if any.
    async fn next_sibling(&self, element: ElementId) -> Result<Option<ElementId>>;

    /// The element's rendered text content.
    async fn text(&self, element: ElementId) -> Result<String>;

    /// An attribute value of the element, if the attribute is present.
    async fn attr(&self, element: ElementId, name: &str) -> Result<Option<String>>;

    /// Whether the element is currently displayed.
    async fn is_displayed(&self, element: ElementId) -> Result<bool>;

    /// Clicks the element.
    async fn click(&self, element: ElementId) -> Result<()>;

    /// Types text into the element.
    async fn fill(&self, element: ElementId, text: &str) -> Result<()>;

    /// Signals submission on the element (presses Enter).
    async fn submit(&self, element: ElementId) -> Result<()>;

    /// Scrolls to the bottom of the current page.
    async fn scroll_to_bottom(&self) -> Result<()>;

    /// Polls for an element's presence until it appears or the timeout
    /// expires. Returns whether the element appeared.
    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<bool>;

    /// Tears the session down.
    async fn quit(&self) -> Result<()>;
}

/// Selector for the cookie-consent banner shown on first page load.
pub const CONSENT_BANNER: &str = "#onetrust-banner-sdk";

/// Selector for the consent banner's accept button.
pub const CONSENT_ACCEPT: &str = "button#onetrust-accept-btn-handler";

/// Waits for the cookie-consent banner and accepts it.
///
/// This is the one condition-polled wait in the system: the banner exposes a
/// real readiness signal, so the wait is bounded by `timeout` instead of a
/// fixed sleep. If the banner never appears an [`Error::Timeout`] is
/// returned; callers log it and proceed, assuming consent was already
/// granted or is not blocking.
pub async fn dismiss_cookie_banner(page: &dyn Page, timeout: Duration) -> Result<()> {
    if !page.wait_for(CONSENT_BANNER, timeout).await? {
        return Err(Error::timeout(CONSENT_BANNER, timeout));
    }
    if let Some(button) = page.find(CONSENT_ACCEPT).await? {
        page.click(button).await?;
    }
    Ok(())
}
