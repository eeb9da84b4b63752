//! Scraper configuration.
//!
//! [`ScraperConfig`] carries the site entry point, output root, and the
//! timing constants used by the pipeline. It uses the builder pattern
//! (via `derive_builder`) for construction:
//!
//! ```rust
//! use folio::config::ScraperConfigBuilder;
//!
//! let config = ScraperConfigBuilder::default()
//!     .raw_data_root("data/raw")
//!     .headless(false)
//!     .build()
//!     .unwrap();
//! assert!(!config.headless);
//! ```

use derive_builder::Builder;
use std::path::PathBuf;
use std::time::Duration;

/// Configuration for one scraping session.
///
/// Defaults match the reference site setup: headless 1920x1080 Chrome, a
/// 2-second fixed pause after dynamic loads, and a 10-second bounded wait
/// for the consent banner.
#[derive(Debug, Clone, Builder)]
#[builder(setter(into), default)]
pub struct ScraperConfig {
    /// Site entry point loaded when a session starts
    pub base_url: String,

    /// Root directory for persisted datasets and images
    pub raw_data_root: PathBuf,

    /// Run the browser without a visible window
    pub headless: bool,

    /// Fixed pause after navigation, waiting for the page to render
    pub nav_delay: Duration,

    /// Fixed pause after each reveal cycle, waiting for the next batch
    pub render_delay: Duration,

    /// Bounded wait for the cookie-consent banner before giving up
    pub consent_timeout: Duration,

    /// User-agent string for the browser session
    pub user_agent: String,
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: "https://www.waterstones.com/".to_string(),
            raw_data_root: PathBuf::from("raw_data"),
            headless: true,
            nav_delay: Duration::from_secs(2),
            render_delay: Duration::from_secs(2),
            consent_timeout: Duration::from_secs(10),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
                         AppleWebKit/537.36 (KHTML, like Gecko) \
                         Chrome/74.0.3729.169 Safari/537.36"
                .to_string(),
        }
    }
}
