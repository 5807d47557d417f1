//! Record export to JSON and CSV files.

use crate::config::OutputFormat;
use crate::error::{ScrapeError, ScrapeResult};
use crate::record::{TrendingRecord, CSV_FIELDS};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// File name of the JSON export inside the output directory.
pub const JSON_FILE_NAME: &str = "trending.json";

/// File name of the CSV export inside the output directory.
pub const CSV_FILE_NAME: &str = "trending.csv";

/// Receives the final record sequence of a successful run.
pub trait Exporter {
    /// Persist `records` (in rank order) and return every destination written.
    fn export(
        &self,
        records: Vec<TrendingRecord>,
        format: OutputFormat,
    ) -> ScrapeResult<Vec<PathBuf>>;
}

/// Writes `trending.json` and/or `trending.csv` into one directory.
#[derive(Debug, Clone)]
pub struct FileExporter {
    output_dir: PathBuf,
}

impl FileExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn ensure_output_dir(&self) -> ScrapeResult<()> {
        std::fs::create_dir_all(&self.output_dir).map_err(|e| export_error(&self.output_dir, e))
    }

    fn write_json(&self, records: &[TrendingRecord]) -> ScrapeResult<PathBuf> {
        let path = self.output_dir.join(JSON_FILE_NAME);
        let mut file = create_file(&path)?;
        write_json_to(records, &mut file)?;
        info!("JSON saved to: {}", path.display());
        Ok(path)
    }

    fn write_csv(&self, records: &[TrendingRecord]) -> ScrapeResult<PathBuf> {
        let path = self.output_dir.join(CSV_FILE_NAME);
        let file = create_file(&path)?;
        write_csv_to(records, file)?;
        info!("CSV saved to: {}", path.display());
        Ok(path)
    }
}

impl Exporter for FileExporter {
    fn export(
        &self,
        records: Vec<TrendingRecord>,
        format: OutputFormat,
    ) -> ScrapeResult<Vec<PathBuf>> {
        self.ensure_output_dir()?;

        let mut written = Vec::new();
        if format.includes_json() {
            written.push(self.write_json(&records)?);
        }
        if format.includes_csv() {
            written.push(self.write_csv(&records)?);
        }
        Ok(written)
    }
}

fn create_file(path: &Path) -> ScrapeResult<std::fs::File> {
    std::fs::File::create(path).map_err(|e| export_error(path, e))
}

fn export_error(path: &Path, e: std::io::Error) -> ScrapeError {
    ScrapeError::Export(format!("{}: {e}", path.display()))
}

/// Write records as a pretty-printed JSON array.
pub fn write_json_to<W: Write>(records: &[TrendingRecord], writer: &mut W) -> ScrapeResult<()> {
    serde_json::to_writer_pretty(&mut *writer, records)?;
    writer.flush()?;
    Ok(())
}

/// Write records as CSV with a header row in [`CSV_FIELDS`] order.
///
/// The header is written even when `records` is empty.
pub fn write_csv_to<W: Write>(records: &[TrendingRecord], writer: W) -> ScrapeResult<()> {
    let mut csv_writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    csv_writer.write_record(CSV_FIELDS)?;
    for record in records {
        csv_writer.serialize(record)?;
    }
    csv_writer.flush()?;
    Ok(())
}
