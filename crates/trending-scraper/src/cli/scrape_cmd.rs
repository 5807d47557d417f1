//! `trending` — scrape the listing and export it.

use crate::config::Config;
use crate::export::FileExporter;
use crate::pipeline;
use crate::query::build_url_for;
use crate::renderer::ChromiumRenderer;
use anyhow::Result;

/// Run one scrape with the Chromium renderer and the file exporter.
pub async fn run(config: &Config) -> Result<()> {
    println!("GitHub Trending Scraper");
    println!("========================");
    println!();
    println!("Scraping: {}", build_url_for(config));
    println!(
        "Language: {} | Range: {}",
        if config.language.is_empty() {
            "All"
        } else {
            config.language.as_str()
        },
        config.time_range
    );
    println!();

    let renderer = ChromiumRenderer::new();
    let exporter = FileExporter::new(&config.output_dir);
    let summary = pipeline::run(config, &renderer, &exporter).await?;

    println!("Found {} trending repositories.", summary.record_count);
    println!();
    println!("Exported ({}):", config.output_format);
    for path in &summary.destinations {
        println!("  {}", path.display());
    }
    println!();
    println!("Done.");

    Ok(())
}
