//! CSV price list reading and writing.

use std::path::Path;

use pricesync_core::models::catalog::{CellValue, Dataset};
use tracing::debug;

const UTF8_BOM: char = '\u{feff}';

/// Read a CSV price list with a header row.
///
/// Rows may be shorter than the header; missing cells read as blank.
pub fn read_csv(path: &Path) -> anyhow::Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| anyhow::anyhow!("Failed to open price list {}: {}", path.display(), e))?;

    // Spreadsheet exports often start with a byte order mark
    let headers = reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, h)| if i == 0 { h.trim_start_matches(UTF8_BOM) } else { h })
        .map(|h| h.trim().to_string())
        .collect::<Vec<_>>();

    let mut dataset = Dataset::new(headers);
    for record in reader.records() {
        let record = record?;
        dataset.push_row(record.iter().map(CellValue::parse).collect());
    }

    debug!(
        "Read {} rows x {} columns from {}",
        dataset.len(),
        dataset.headers.len(),
        path.display()
    );
    Ok(dataset)
}

/// Write a price list back as CSV, padding short rows to the header width.
pub fn write_csv(dataset: &Dataset, path: &Path) -> anyhow::Result<()> {
    let mut writer = csv::WriterBuilder::new().flexible(true).from_path(path)?;

    writer.write_record(&dataset.headers)?;
    for row in &dataset.rows {
        let width = row.len().max(dataset.headers.len());
        let record = (0..width).map(|i| row.get(i).map(CellValue::as_text).unwrap_or_default());
        writer.write_record(record)?;
    }
    writer.flush()?;

    debug!("Wrote {} rows to {}", dataset.len(), path.display());
    Ok(())
}
