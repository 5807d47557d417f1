// Copyright 2026 Trending Scraper Contributors
// SPDX-License-Identifier: Apache-2.0

use anyhow::Result;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;

use trending_scraper::cli;
use trending_scraper::config::{load_dotenv, ScrapeArgs};
use trending_scraper::error::{exit_codes, ScrapeError};

#[derive(Parser)]
#[command(
    name = "trending",
    about = "Scrape the GitHub trending listing and export it as JSON or CSV",
    version,
    after_help = "Settings can also come from the environment or a .env file (LANGUAGE, TIME_RANGE, OUTPUT_FORMAT, HEADLESS)."
)]
struct Cli {
    /// Log level (trace, debug, info, warn, error).
    #[arg(long, default_value = "info", global = true)]
    log_level: String,

    #[command(flatten)]
    scrape: ScrapeArgs,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Check that a Chromium binary is available
    Doctor,
    /// Generate shell completion scripts
    Completions {
        /// Shell type (bash, zsh, fish, powershell)
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Before parsing, so .env values act as environment fallbacks.
    load_dotenv();
    let cli = Cli::parse();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&cli.log_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let result = match cli.command {
        None => {
            let config = cli.scrape.resolve();
            cli::scrape_cmd::run(&config).await
        }
        Some(Commands::Doctor) => cli::doctor::run(cli.scrape.chromium_path.as_deref()).await,
        Some(Commands::Completions { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(shell, &mut cmd, "trending", &mut std::io::stdout());
            Ok(())
        }
    };

    // Exit codes: 0=success, 2=navigation, 3=no records, 4=export, 1=other
    if let Err(e) = &result {
        eprintln!("  Error: {e:#}");
        let code = e
            .downcast_ref::<ScrapeError>()
            .map(ScrapeError::exit_code)
            .unwrap_or(exit_codes::GENERAL);
        std::process::exit(code);
    }

    result
}
