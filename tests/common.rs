//! Common test utilities.
//!
//! [`MockPage`] is an in-memory stand-in for a browser session: a set of
//! page models keyed by URL, element handles resolved against them, and
//! counters for the interactions the pipeline is expected to perform
//! (scrolls, show-more clicks, navigations). It implements the `Page` trait
//! so every pipeline stage can be exercised without a browser.

#![allow(dead_code)]

use async_trait::async_trait;
use folio::error::Result;
use folio::session::{ElementId, Page};
use folio::{assemble, discover, extract, paginate, session};
use parking_lot::Mutex;
use std::collections::HashMap;
use std::time::Duration;

/// One DOM node in a page model.
#[derive(Debug, Default, Clone)]
pub struct Node {
    pub text: String,
    pub attrs: HashMap<String, String>,
    pub visible: bool,
    pub sibling: Option<usize>,
    /// selector -> descendant node indices, in DOM order
    pub children: HashMap<String, Vec<usize>>,
    /// "show-more" and "search-input" get interaction behavior
    pub role: Option<String>,
}

impl Node {
    pub fn text(text: &str) -> Self {
        Self {
            text: text.to_string(),
            visible: true,
            ..Default::default()
        }
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attrs.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_role(mut self, role: &str) -> Self {
        self.role = Some(role.to_string());
        self
    }

    pub fn hidden(mut self) -> Self {
        self.visible = false;
        self
    }
}

/// An in-memory model of one loaded page.
#[derive(Debug, Default, Clone)]
pub struct PageModel {
    nodes: Vec<Node>,
    by_selector: HashMap<String, Vec<usize>>,
}

impl PageModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_node(&mut self, node: Node) -> usize {
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn map_selector(&mut self, selector: &str, index: usize) {
        self.by_selector
            .entry(selector.to_string())
            .or_default()
            .push(index);
    }

    /// Merges another model into this one, reindexing its nodes.
    ///
    /// Used for pages that are simultaneously a results page and a detail
    /// page (the single-result case, where the site skips the list view).
    pub fn merge(mut self, other: PageModel) -> Self {
        let offset = self.nodes.len();
        for mut node in other.nodes {
            node.sibling = node.sibling.map(|s| s + offset);
            for indices in node.children.values_mut() {
                for i in indices.iter_mut() {
                    *i += offset;
                }
            }
            self.nodes.push(node);
        }
        for (selector, indices) in other.by_selector {
            let entry = self.by_selector.entry(selector).or_default();
            entry.extend(indices.into_iter().map(|i| i + offset));
        }
        self
    }
}

/// Builds a site entry page carrying the search input.
///
/// Submitting the input navigates the mock to `search_results_url`.
pub fn entry_page(search_results_url: &str) -> PageModel {
    let mut page = PageModel::new();
    let input = page.add_node(
        Node::text("")
            .with_role("search-input")
            .with_attr("data-search-target", search_results_url),
    );
    page.map_selector(assemble::SEARCH_INPUT, input);
    page
}

/// Builds a search-results page with a filter bar.
///
/// Each entry is a facet label and its anchor list `(text, href)`. The
/// facet container is reachable only as the header's next sibling, the way
/// the real filter bar is laid out.
pub fn facet_results_page(facets: &[(&str, &[(&str, &str)])]) -> PageModel {
    let mut page = PageModel::new();
    for (label, anchors) in facets {
        let anchor_indices: Vec<usize> = anchors
            .iter()
            .map(|(text, href)| page.add_node(Node::text(text).with_attr("href", href)))
            .collect();

        let mut container = Node::text("");
        container.visible = true;
        container.children.insert("a".to_string(), anchor_indices);
        let container_idx = page.add_node(container);

        let mut header = Node::text(label);
        header.sibling = Some(container_idx);
        let header_idx = page.add_node(header);
        page.map_selector(discover::FILTER_HEADER, header_idx);
    }
    page
}

/// Builds a language-filtered results page.
///
/// `language` is the page's language label (absent to model a page that
/// fails to declare one); `item_hrefs` are the detail links, one per result
/// block; `page_count` adds the "N of M" indicator plus a show-more button
/// (`show_more_visible` controls its visibility).
pub fn results_page(
    language: Option<&str>,
    item_hrefs: &[&str],
    page_count: Option<&str>,
    show_more_visible: bool,
) -> PageModel {
    let mut page = PageModel::new();

    if let Some(label) = language {
        let idx = page.add_node(Node::text(label));
        page.map_selector(assemble::LANGUAGE_LABEL, idx);
    }

    if let Some(indicator) = page_count {
        let idx = page.add_node(Node::text(indicator));
        page.map_selector(paginate::PAGE_COUNT_INDICATOR, idx);

        let mut button = Node::text("SHOW MORE").with_role("show-more");
        button.visible = show_more_visible;
        let button_idx = page.add_node(button);
        page.map_selector(paginate::SHOW_MORE_BUTTON, button_idx);
    }

    let block_indices: Vec<usize> = item_hrefs
        .iter()
        .map(|href| {
            let anchor = page.add_node(Node::text("item").with_attr("href", href));
            let mut block = Node::text("");
            block.children.insert("a".to_string(), vec![anchor]);
            page.add_node(block)
        })
        .collect();

    let mut container = Node::text("");
    container
        .children
        .insert(":scope > div".to_string(), block_indices);
    let container_idx = page.add_node(container);
    page.map_selector(discover::RESULTS_LIST, container_idx);

    page
}

/// Builds an item detail page.
pub fn detail_page(author: &str, title: &str, price: &str, image: Option<&str>) -> PageModel {
    let mut page = PageModel::new();

    let idx = page.add_node(Node::text(author));
    page.map_selector(extract::AUTHOR, idx);

    let idx = page.add_node(Node::text(title));
    page.map_selector(extract::TITLE, idx);

    let idx = page.add_node(Node::text(price));
    page.map_selector(extract::PRICE, idx);

    if let Some(src) = image {
        let idx = page.add_node(Node::text("").with_attr("src", src));
        page.map_selector(extract::COVER_IMAGE, idx);
    }

    page
}

/// Builds a page carrying the cookie-consent banner.
pub fn consent_banner() -> PageModel {
    let mut page = PageModel::new();
    let banner = page.add_node(Node::text("We value your privacy"));
    page.map_selector(session::CONSENT_BANNER, banner);
    let button = page.add_node(Node::text("Accept").with_role("consent-accept"));
    page.map_selector(session::CONSENT_ACCEPT, button);
    page
}

#[derive(Debug, Default)]
struct Inner {
    pages: HashMap<String, PageModel>,
    current: String,
    next_element: u64,
    resolved: HashMap<u64, (String, usize)>,
    scrolls: usize,
    show_more_clicks: usize,
    consent_clicks: usize,
    navigations: Vec<String>,
    quit_called: bool,
}

/// In-memory `Page` implementation backed by [`PageModel`]s.
pub struct MockPage {
    inner: Mutex<Inner>,
}

impl MockPage {
    pub fn new(start_url: &str) -> Self {
        let mut inner = Inner::default();
        inner.current = start_url.to_string();
        Self {
            inner: Mutex::new(inner),
        }
    }

    pub fn add_page(&self, url: &str, model: PageModel) {
        self.inner.lock().pages.insert(url.to_string(), model);
    }

    pub fn scrolls(&self) -> usize {
        self.inner.lock().scrolls
    }

    pub fn show_more_clicks(&self) -> usize {
        self.inner.lock().show_more_clicks
    }

    pub fn consent_clicks(&self) -> usize {
        self.inner.lock().consent_clicks
    }

    pub fn navigations(&self) -> Vec<String> {
        self.inner.lock().navigations.clone()
    }

    pub fn quit_called(&self) -> bool {
        self.inner.lock().quit_called
    }

    fn register(inner: &mut Inner, node: usize) -> ElementId {
        inner.next_element += 1;
        let id = inner.next_element;
        let current = inner.current.clone();
        inner.resolved.insert(id, (current, node));
        ElementId(id)
    }

    fn node(inner: &Inner, element: ElementId) -> Node {
        let (url, index) = inner
            .resolved
            .get(&element.0)
            .expect("unknown element handle")
            .clone();
        inner.pages[&url].nodes[index].clone()
    }
}

#[async_trait]
impl Page for MockPage {
    async fn goto(&self, url: &str) -> Result<()> {
        let mut inner = self.inner.lock();
        inner.current = url.to_string();
        inner.navigations.push(url.to_string());
        Ok(())
    }

    async fn current_url(&self) -> Result<String> {
        Ok(self.inner.lock().current.clone())
    }

    async fn find(&self, selector: &str) -> Result<Option<ElementId>> {
        let mut inner = self.inner.lock();
        let current = inner.current.clone();
        let node = inner
            .pages
            .get(&current)
            .and_then(|page| page.by_selector.get(selector))
            .and_then(|indices| indices.first().copied());
        Ok(node.map(|n| Self::register(&mut inner, n)))
    }

    async fn find_all(&self, selector: &str) -> Result<Vec<ElementId>> {
        let mut inner = self.inner.lock();
        let current = inner.current.clone();
        let nodes = inner
            .pages
            .get(&current)
            .and_then(|page| page.by_selector.get(selector))
            .cloned()
            .unwrap_or_default();
        Ok(nodes
            .into_iter()
            .map(|n| Self::register(&mut inner, n))
            .collect())
    }

    async fn find_in(&self, parent: ElementId, selector: &str) -> Result<Vec<ElementId>> {
        let mut inner = self.inner.lock();
        let children = Self::node(&inner, parent)
            .children
            .get(selector)
            .cloned()
            .unwrap_or_default();
        Ok(children
            .into_iter()
            .map(|n| Self::register(&mut inner, n))
            .collect())
    }

    async fn next_sibling(&self, element: ElementId) -> Result<Option<ElementId>> {
        let mut inner = self.inner.lock();
        let sibling = Self::node(&inner, element).sibling;
        Ok(sibling.map(|n| Self::register(&mut inner, n)))
    }

    async fn text(&self, element: ElementId) -> Result<String> {
        let inner = self.inner.lock();
        Ok(Self::node(&inner, element).text)
    }

    async fn attr(&self, element: ElementId, name: &str) -> Result<Option<String>> {
        let inner = self.inner.lock();
        Ok(Self::node(&inner, element).attrs.get(name).cloned())
    }

    async fn is_displayed(&self, element: ElementId) -> Result<bool> {
        let inner = self.inner.lock();
        Ok(Self::node(&inner, element).visible)
    }

    async fn click(&self, element: ElementId) -> Result<()> {
        let mut inner = self.inner.lock();
        match Self::node(&inner, element).role.as_deref() {
            Some("show-more") => inner.show_more_clicks += 1,
            Some("consent-accept") => inner.consent_clicks += 1,
            _ => {}
        }
        Ok(())
    }

    async fn fill(&self, _element: ElementId, _text: &str) -> Result<()> {
        Ok(())
    }

    async fn submit(&self, element: ElementId) -> Result<()> {
        let target = {
            let inner = self.inner.lock();
            let node = Self::node(&inner, element);
            if node.role.as_deref() == Some("search-input") {
                node.attrs.get("data-search-target").cloned()
            } else {
                None
            }
        };
        if let Some(url) = target {
            self.goto(&url).await?;
        }
        Ok(())
    }

    async fn scroll_to_bottom(&self) -> Result<()> {
        self.inner.lock().scrolls += 1;
        Ok(())
    }

    async fn wait_for(&self, selector: &str, _timeout: Duration) -> Result<bool> {
        Ok(self.find(selector).await?.is_some())
    }

    async fn quit(&self) -> Result<()> {
        self.inner.lock().quit_called = true;
        Ok(())
    }
}
