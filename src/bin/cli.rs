//! folio command-line interface.
//!
//! Collects search queries interactively (one per line, blank line to
//! finish) and processes each sequentially: launch a fresh browser session,
//! dismiss the consent banner, assemble the dataset, persist the table and
//! cover images, and tear the session down. A failed query is reported and
//! does not abort the remaining queries: each query's session and
//! accumulated table are independent.

use folio::prelude::*;
use std::io::{self, BufRead, Write};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("folio=info")),
        )
        .with_target(false)
        .init();

    let queries = collect_queries()?;
    if queries.is_empty() {
        println!("No queries entered.");
        return Ok(());
    }

    let config = ScraperConfig::default();
    for query in &queries {
        if let Err(e) = run_query(query, &config).await {
            tracing::error!(query = %query, error = %e, "query failed");
        }
    }

    Ok(())
}

/// Prompts for queries until a blank line is entered.
fn collect_queries() -> Result<Vec<String>> {
    let stdin = io::stdin();
    let mut queries = Vec::new();

    loop {
        print!("Enter a search query, or press ENTER to proceed: ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        let query = line.trim();
        if query.is_empty() {
            break;
        }
        queries.push(query.to_string());
    }

    Ok(queries)
}

/// Runs the full pipeline for one query with its own browser session.
async fn run_query(query: &str, config: &ScraperConfig) -> Result<()> {
    let session = Arc::new(ChromeSession::launch(config).await?);

    match dismiss_cookie_banner(session.as_ref(), config.consent_timeout).await {
        Ok(()) => {}
        Err(Error::Timeout { .. }) => {
            tracing::warn!("consent banner did not appear; continuing");
        }
        Err(e) => {
            session.quit().await.ok();
            return Err(e);
        }
    }

    let assembler = Assembler::new(session.clone(), config.clone());
    let result = async {
        let dataset = assembler.assemble(query).await?;
        if dataset.is_empty() {
            tracing::info!(query = %query, "no results");
            return Ok(());
        }

        let dir = write_table(&dataset, &config.raw_data_root).await?;
        let images = save_cover_images(&dataset, &config.raw_data_root).await?;
        tracing::info!(
            query = %query,
            rows = dataset.len(),
            images,
            dir = %dir.display(),
            "query complete"
        );
        Ok(())
    }
    .await;

    session.quit().await.ok();
    result
}
