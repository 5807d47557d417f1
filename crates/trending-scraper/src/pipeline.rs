//! One scrape run: build the URL, render, extract, export.
//!
//! Each call owns its own render session, so independent runs (say one per
//! language) may execute concurrently. A run itself is strictly sequential.

use crate::config::Config;
use crate::error::{ScrapeError, ScrapeResult};
use crate::export::Exporter;
use crate::extraction::{extract_from_html, ENTRY_SELECTOR};
use crate::query::build_url_for;
use crate::record::TrendingRecord;
use crate::renderer::{render_page, LaunchOptions, RenderRequest, Renderer};
use std::path::PathBuf;
use tracing::info;

/// Outcome of a successful run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub url: String,
    pub record_count: usize,
    /// Files written by the exporter.
    pub destinations: Vec<PathBuf>,
}

/// Render the listing for `config` and extract its records.
///
/// Fails with [`ScrapeError::EmptyResult`] when the page has no entries.
pub async fn scrape(config: &Config, renderer: &dyn Renderer) -> ScrapeResult<Vec<TrendingRecord>> {
    scrape_url(config, &build_url_for(config), renderer).await
}

async fn scrape_url(
    config: &Config,
    url: &str,
    renderer: &dyn Renderer,
) -> ScrapeResult<Vec<TrendingRecord>> {
    info!(url = %url, language = %config.language, since = %config.time_range, "scraping");

    let launch = LaunchOptions {
        headless: config.headless,
        chromium_path: config.chromium_path.clone(),
        ..LaunchOptions::default()
    };
    let request = RenderRequest {
        url,
        selector: ENTRY_SELECTOR,
        nav_timeout_ms: config.nav_timeout_ms,
        wait_timeout_ms: config.wait_timeout_ms,
    };

    let html = render_page(renderer, &launch, &request).await?;
    let records = extract_from_html(&html);

    if records.is_empty() {
        return Err(ScrapeError::EmptyResult {
            url: url.to_string(),
        });
    }
    info!(count = records.len(), "extracted trending repositories");
    Ok(records)
}

/// Scrape and hand the records to `exporter` exactly once.
///
/// The exporter is never called when scraping fails.
pub async fn run(
    config: &Config,
    renderer: &dyn Renderer,
    exporter: &dyn Exporter,
) -> ScrapeResult<RunSummary> {
    let url = build_url_for(config);
    let records = scrape_url(config, &url, renderer).await?;
    let record_count = records.len();

    let destinations = exporter.export(records, config.output_format)?;

    Ok(RunSummary {
        url,
        record_count,
        destinations,
    })
}
