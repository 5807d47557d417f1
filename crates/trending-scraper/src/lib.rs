// Copyright 2026 Trending Scraper Contributors
// SPDX-License-Identifier: Apache-2.0

//! Trending scraper library — render the GitHub trending listing in a
//! headless browser and turn it into typed records.
//!
//! This library crate exposes the pipeline modules for the binary and for
//! integration testing.

pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod extraction;
pub mod pipeline;
pub mod query;
pub mod record;
pub mod renderer;

pub use config::{Config, OutputFormat, TimeRange};
pub use error::{ScrapeError, ScrapeResult};
pub use export::{Exporter, FileExporter};
pub use pipeline::{run, scrape, RunSummary};
pub use record::TrendingRecord;
