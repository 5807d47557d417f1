//! Run-level failures.
//!
//! Field-level problems never surface here: the extractor resolves them to
//! defaults. Only failures that abort the whole run are represented.

/// Process exit codes, one per failure class.
pub mod exit_codes {
    pub const SUCCESS: i32 = 0;
    pub const GENERAL: i32 = 1;
    pub const NAVIGATION: i32 = 2;
    pub const EMPTY_RESULT: i32 = 3;
    pub const EXPORT: i32 = 4;
}

/// All failures that abort a scrape run.
#[derive(thiserror::Error, Debug)]
pub enum ScrapeError {
    /// The browser could not be launched, the page did not load, or the
    /// listing never appeared before the timeout.
    #[error("Navigation failed: {0}")]
    Navigation(String),

    #[error("No repositories found at {url}. GitHub may have changed their markup.")]
    EmptyResult { url: String },

    #[error("Export failed: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

impl ScrapeError {
    pub fn exit_code(&self) -> i32 {
        use exit_codes::*;
        match self {
            ScrapeError::Navigation(_) => NAVIGATION,
            ScrapeError::EmptyResult { .. } => EMPTY_RESULT,
            ScrapeError::Export(_)
            | ScrapeError::Io(_)
            | ScrapeError::Json(_)
            | ScrapeError::Csv(_) => EXPORT,
        }
    }
}

pub type ScrapeResult<T> = Result<T, ScrapeError>;
