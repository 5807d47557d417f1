//! Configuration loading and resolution.
//!
//! Every setting comes from a CLI flag, then an environment variable (a
//! `.env` file in the working directory is loaded first), then a default.
//! Invalid enum values never fail the run: they log a warning and fall back
//! to the default, so the rest of the pipeline only ever sees valid input.

use clap::Args;
use std::fmt;
use std::path::PathBuf;
use tracing::warn;

/// Default navigation timeout (ms).
pub const DEFAULT_NAV_TIMEOUT_MS: u64 = 30_000;

/// Default wait for the listing selector to appear (ms).
pub const DEFAULT_WAIT_TIMEOUT_MS: u64 = 15_000;

/// Trending window accepted by the listing page's `since` parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimeRange {
    #[default]
    Daily,
    Weekly,
    Monthly,
}

impl TimeRange {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeRange::Daily => "daily",
            TimeRange::Weekly => "weekly",
            TimeRange::Monthly => "monthly",
        }
    }

    /// Parse a time range, falling back to `daily` on anything unrecognised.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "daily" => TimeRange::Daily,
            "weekly" => TimeRange::Weekly,
            "monthly" => TimeRange::Monthly,
            other => {
                warn!("Invalid TIME_RANGE \"{other}\". Defaulting to \"daily\".");
                TimeRange::Daily
            }
        }
    }
}

impl fmt::Display for TimeRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which export files to write.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    Csv,
    Json,
    #[default]
    Both,
}

impl OutputFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Both => "both",
        }
    }

    /// Parse an output format, falling back to `both` on anything unrecognised.
    pub fn parse_or_default(value: &str) -> Self {
        match value {
            "csv" => OutputFormat::Csv,
            "json" => OutputFormat::Json,
            "both" => OutputFormat::Both,
            other => {
                warn!("Invalid OUTPUT_FORMAT \"{other}\". Defaulting to \"both\".");
                OutputFormat::Both
            }
        }
    }

    pub fn includes_json(&self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::Both)
    }

    pub fn includes_csv(&self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::Both)
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Validated run configuration, built once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Language filter; empty means all languages.
    pub language: String,
    pub time_range: TimeRange,
    pub output_format: OutputFormat,
    pub headless: bool,
    pub output_dir: PathBuf,
    pub nav_timeout_ms: u64,
    pub wait_timeout_ms: u64,
    /// Explicit browser binary; `None` means auto-discovery.
    pub chromium_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: String::new(),
            time_range: TimeRange::Daily,
            output_format: OutputFormat::Both,
            headless: true,
            output_dir: PathBuf::from("output"),
            nav_timeout_ms: DEFAULT_NAV_TIMEOUT_MS,
            wait_timeout_ms: DEFAULT_WAIT_TIMEOUT_MS,
            chromium_path: None,
        }
    }
}

/// Raw scrape settings as given on the command line or in the environment.
#[derive(Args, Debug, Clone)]
pub struct ScrapeArgs {
    /// Language filter (e.g. "rust", "c++"); empty for all languages
    #[arg(long, env = "LANGUAGE", default_value = "")]
    pub language: String,

    /// Trending window: daily, weekly or monthly
    #[arg(long = "since", env = "TIME_RANGE", default_value = "daily")]
    pub time_range: String,

    /// Export format: csv, json or both
    #[arg(long = "format", env = "OUTPUT_FORMAT", default_value = "both")]
    pub output_format: String,

    /// Run the browser headless; only the literal "false" disables it
    #[arg(long, env = "HEADLESS", default_value = "true")]
    pub headless: String,

    /// Directory the export files are written to
    #[arg(long, env = "OUTPUT_DIR", default_value = "output")]
    pub output_dir: PathBuf,

    /// Navigation timeout in milliseconds
    #[arg(long = "nav-timeout", env = "NAV_TIMEOUT_MS", default_value_t = DEFAULT_NAV_TIMEOUT_MS)]
    pub nav_timeout_ms: u64,

    /// Timeout in milliseconds for the listing to appear
    #[arg(long = "wait-timeout", env = "WAIT_TIMEOUT_MS", default_value_t = DEFAULT_WAIT_TIMEOUT_MS)]
    pub wait_timeout_ms: u64,

    /// Path to a Chrome/Chromium binary (auto-detected when omitted)
    #[arg(long = "chromium", env = "TRENDING_CHROMIUM_PATH")]
    pub chromium_path: Option<PathBuf>,
}

impl ScrapeArgs {
    /// Validate and normalise into a [`Config`].
    pub fn resolve(self) -> Config {
        Config {
            language: self.language.trim().to_string(),
            time_range: TimeRange::parse_or_default(self.time_range.trim()),
            output_format: OutputFormat::parse_or_default(self.output_format.trim()),
            headless: self.headless.trim() != "false",
            output_dir: self.output_dir,
            nav_timeout_ms: self.nav_timeout_ms,
            wait_timeout_ms: self.wait_timeout_ms,
            chromium_path: self.chromium_path,
        }
    }
}

/// Load `.env` from the working directory, if present.
///
/// Variables already set in the process environment take precedence.
pub fn load_dotenv() -> Option<PathBuf> {
    dotenvy::dotenv().ok()
}
