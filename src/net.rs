//! Shared HTTP client for cover-image fetches.
//!
//! DOM work goes through the browser session; the only plain HTTP this crate
//! performs is fetching image bytes once per record with a resolved cover
//! link. Requests share one lazily-built client with connection pooling and
//! compression enabled.

use crate::error::{Error, Result};
use bytes::Bytes;
use once_cell::sync::Lazy;
use reqwest::Client;
use std::time::Duration;

/// Global HTTP client instance.
///
/// Configured with a 30-second timeout, connection pooling, and gzip/brotli
/// compression. Created lazily on first use and reused for every fetch.
static CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(30))
        .user_agent(concat!("folio/", env!("CARGO_PKG_VERSION")))
        .pool_max_idle_per_host(10)
        .gzip(true)
        .brotli(true)
        .build()
        .expect("Failed to build HTTP client")
});

/// Fetches a URL and returns the response body.
///
/// Non-2xx statuses are reported as [`Error::Other`] with the status code;
/// transport failures surface as [`Error::Network`].
pub async fn fetch_bytes(url: &str) -> Result<Bytes> {
    let response = CLIENT.get(url).send().await?;
    if !response.status().is_success() {
        return Err(Error::Other(format!(
            "Failed to fetch {}: HTTP {}",
            url,
            response.status()
        )));
    }
    Ok(response.bytes().await?)
}
