//! Record extractor: one loaded item detail page into one [`BookRecord`].

use crate::error::{Error, Result};
use crate::session::Page;
use crate::types::BookRecord;

/// Selector for the author name on a detail page.
pub const AUTHOR: &str = "span[itemprop='author']";

/// Selector for the book title on a detail page.
pub const TITLE: &str = "span.book-title";

/// Selector for the price on a detail page.
pub const PRICE: &str = "b[itemprop='price']";

/// Selector for the cover image on a detail page.
pub const COVER_IMAGE: &str = "img[itemprop='image']";

/// Number of trailing URL characters that encode the catalog id.
const ID_TAIL_LEN: usize = 13;

/// Extracts one canonical book record from a loaded item detail page.
///
/// Reads the author, title, and price from their tagged elements, derives
/// the catalog id from the last 13 characters of the page's own URL, and
/// records the cover image source if one is present (its absence is
/// tolerated). No network or file IO happens here beyond what loading the
/// page already performed.
///
/// The `language` field is left unset: language is a property of the results
/// page an item was discovered on, not of the item page, so the assembler
/// injects it from page-level context.
///
/// # Errors
///
/// - [`Error::Navigation`] when the author, title, or price element is
///   missing.
/// - [`Error::Parse`] when the id tail is non-numeric or the price text does
///   not parse as a decimal once the currency symbol is stripped. Parse
///   failures are fatal for the record; no partial record is produced.
pub async fn extract_record(page: &dyn Page) -> Result<BookRecord> {
    let author = required_text(page, AUTHOR, "author").await?;
    let title = required_text(page, TITLE, "book title").await?;

    let url = page.current_url().await?;
    let id = parse_catalog_id(&url)?;

    let price_text = required_text(page, PRICE, "price").await?;
    let price = parse_price(&price_text)?;

    let image_link = match page.find(COVER_IMAGE).await? {
        Some(img) => page.attr(img, "src").await?,
        None => None,
    };

    Ok(BookRecord {
        id,
        timestamp: chrono::Local::now().format("%c").to_string(),
        author,
        title,
        language: None,
        price,
        image_link,
    })
}

async fn required_text(page: &dyn Page, selector: &str, what: &str) -> Result<String> {
    let element = page
        .find(selector)
        .await?
        .ok_or_else(|| Error::navigation(format!("{} element not found", what)))?;
    Ok(page.text(element).await?.trim().to_string())
}

/// Derives the catalog id from the trailing characters of a detail-page URL.
fn parse_catalog_id(url: &str) -> Result<u64> {
    let tail = url
        .len()
        .checked_sub(ID_TAIL_LEN)
        .and_then(|start| url.get(start..))
        .ok_or_else(|| Error::parse(format!("URL '{}' too short for a catalog id", url)))?;

    tail.parse()
        .map_err(|_| Error::parse(format!("id tail '{}' is not numeric", tail)))
}

/// Parses a GBP price, stripping the currency symbol.
fn parse_price(text: &str) -> Result<f64> {
    let stripped = text.trim().trim_start_matches('£').trim();
    stripped
        .parse()
        .map_err(|_| Error::parse(format!("price '{}' is not a decimal amount", text)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_id_from_url_tail() {
        let url = "https://www.waterstones.com/book/blindness/9780099573586";
        assert_eq!(parse_catalog_id(url).unwrap(), 9780099573586);
    }

    #[test]
    fn non_numeric_id_tail_is_a_parse_error() {
        let err = parse_catalog_id("https://example.com/book/blindness-x").unwrap_err();
        assert!(matches!(err, Error::Parse(_)));
    }

    #[test]
    fn short_url_is_a_parse_error() {
        assert!(matches!(parse_catalog_id("short"), Err(Error::Parse(_))));
    }

    #[test]
    fn price_strips_currency_symbol() {
        assert_eq!(parse_price("£9.99").unwrap(), 9.99);
        assert_eq!(parse_price(" £12 ").unwrap(), 12.0);
    }

    #[test]
    fn bare_symbol_is_a_parse_error() {
        assert!(matches!(parse_price("£"), Err(Error::Parse(_))));
        assert!(matches!(parse_price("£TBC"), Err(Error::Parse(_))));
    }
}
