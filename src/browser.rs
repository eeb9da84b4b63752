//! Headless Chrome implementation of the [`Page`] trait.
//!
//! [`ChromeSession`] drives a Chrome instance over the DevTools protocol via
//! `chromiumoxide`. One session is one browser tab; element handles resolved
//! through the trait are kept in an internal registry and invalidated on
//! every navigation.

use crate::config::ScraperConfig;
use crate::error::{Error, Result};
use crate::session::{ElementId, Page};
use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::element::Element;
use futures::StreamExt;
use parking_lot::Mutex;
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

/// Attribute used to mark a sibling element so it can be re-resolved through
/// a selector query. Cleared immediately after resolution.
const SIBLING_MARK: &str = "data-folio-sibling";

/// A live headless-Chrome session.
///
/// Launch flags mirror the reference setup: no sandbox, disabled GPU,
/// 1920x1080 window, custom user agent. The session owns the browser
/// process; [`quit`](Page::quit) tears it down.
pub struct ChromeSession {
    browser: Mutex<Option<Browser>>,
    page: chromiumoxide::Page,
    handler: tokio::task::JoinHandle<()>,
    elements: Mutex<HashMap<u64, Arc<Element>>>,
    next_id: AtomicU64,
}

impl ChromeSession {
    /// Launches a browser and opens the configured entry page.
    pub async fn launch(config: &ScraperConfig) -> Result<Self> {
        let mut builder = BrowserConfig::builder()
            .window_size(1920, 1080)
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage");
        if !config.headless {
            builder = builder.with_head();
        }
        let browser_config = builder.build().map_err(Error::Browser)?;

        let (browser, mut events) = Browser::launch(browser_config).await?;
        let handler = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser.new_page(config.base_url.as_str()).await?;
        page.set_user_agent(config.user_agent.as_str()).await?;
        debug!(url = %config.base_url, "browser session launched");

        Ok(Self {
            browser: Mutex::new(Some(browser)),
            page,
            handler,
            elements: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
        })
    }

    fn register(&self, element: Element) -> ElementId {
        let id = self.next_id.fetch_add(1, Ordering::Relaxed);
        self.elements.lock().insert(id, Arc::new(element));
        ElementId(id)
    }

    fn resolve(&self, id: ElementId) -> Result<Arc<Element>> {
        self.elements
            .lock()
            .get(&id.0)
            .cloned()
            .ok_or_else(|| Error::Browser(format!("stale element handle {:?}", id)))
    }

    async fn bool_js(&self, element: &Element, function: &str) -> Result<bool> {
        let returns = element.call_js_fn(function, false).await?;
        Ok(matches!(
            returns.result.value,
            Some(serde_json::Value::Bool(true))
        ))
    }
}

#[async_trait]
impl Page for ChromeSession {
    async fn goto(&self, url: &str) -> Result<()> {
        // Handles from the previous page are meaningless after navigation.
        self.elements.lock().clear();
        self.page.goto(url).await?;
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        self.page
            .url()
            .await?
            .ok_or_else(|| Error::Browser("page has no URL".to_string()))
    }

    // Lookups: chromiumoxide reports "no node matched" and transport-level
    // CDP failures through the same error type, so a failed lookup can only
    // be read as absence here. A dead session surfaces on the next
    // navigation or interaction instead.
    async fn find(&self, selector: &str) -> Result<Option<ElementId>> {
        match self.page.find_element(selector).await {
            Ok(element) => Ok(Some(self.register(element))),
            Err(_) => Ok(None),
        }
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<ElementId>> {
        let elements = self.page.find_elements(selector).await.unwrap_or_default();
        Ok(elements.into_iter().map(|e| self.register(e)).collect())
    }

    async fn find_in(&self, parent: ElementId, selector: &str) -> Result<Vec<ElementId>> {
        let parent = self.resolve(parent)?;
        let elements = parent.find_elements(selector).await.unwrap_or_default();
        Ok(elements.into_iter().map(|e| self.register(e)).collect())
    }

    async fn next_sibling(&self, element: ElementId) -> Result<Option<ElementId>> {
        let handle = self.resolve(element)?;
        let marked = self
            .bool_js(
                &handle,
                &format!(
                    "function() {{ \
                         const sib = this.nextElementSibling; \
                         if (sib === null) {{ return false; }} \
                         sib.setAttribute('{mark}', '1'); \
                         return true; \
                     }}",
                    mark = SIBLING_MARK
                ),
            )
            .await?;
        if !marked {
            return Ok(None);
        }

        let sibling = self
            .page
            .find_element(format!("[{}='1']", SIBLING_MARK))
            .await?;
        sibling
            .call_js_fn(
                &format!("function() {{ this.removeAttribute('{}'); }}", SIBLING_MARK),
                false,
            )
            .await?;
        Ok(Some(self.register(sibling)))
    }

    async fn text(&self, element: ElementId) -> Result<String> {
        let handle = self.resolve(element)?;
        Ok(handle.inner_text().await?.unwrap_or_default())
    }

    async fn attr(&self, element: ElementId, name: &str) -> Result<Option<String>> {
        let handle = self.resolve(element)?;
        Ok(handle.attribute(name).await?)
    }

    async fn is_displayed(&self, element: ElementId) -> Result<bool> {
        let handle = self.resolve(element)?;
        self.bool_js(&handle, "function() { return this.offsetParent !== null; }")
            .await
    }

    async fn click(&self, element: ElementId) -> Result<()> {
        let handle = self.resolve(element)?;
        handle.click().await?;
        Ok(())
    }

    async fn fill(&self, element: ElementId, text: &str) -> Result<()> {
        let handle = self.resolve(element)?;
        handle.type_str(text).await?;
        Ok(())
    }

    async fn submit(&self, element: ElementId) -> Result<()> {
        let handle = self.resolve(element)?;
        handle.press_key("Enter").await?;
        Ok(())
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.page
            .evaluate("window.scrollTo(0, document.body.scrollHeight);")
            .await?;
        Ok(())
    }

    async fn wait_for(&self, selector: &str, timeout: Duration) -> Result<bool> {
        let deadline = Instant::now() + timeout;
        loop {
            if self.page.find_element(selector).await.is_ok() {
                return Ok(true);
            }
            if Instant::now() >= deadline {
                return Ok(false);
            }
            tokio::time::sleep(Duration::from_millis(250)).await;
        }
    }

    async fn quit(&self) -> Result<()> {
        let browser = self.browser.lock().take();
        if let Some(mut browser) = browser {
            browser.close().await?;
            let _ = browser.wait().await;
        }
        self.handler.abort();
        Ok(())
    }
}
