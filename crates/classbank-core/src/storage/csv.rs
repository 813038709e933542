//! Sheet rows as CSV: no header handling, ragged rows allowed.

use crate::error::Result;
use crate::workbook::Sheet;
use std::path::Path;

pub(crate) fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut reader = ::csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(record.iter().map(str::to_string).collect());
    }
    Ok(rows)
}

/// Write the occupied rows of `sheet`. Blank rows are written as a single empty
/// quoted field so the reader keeps them.
pub(crate) fn write_rows(path: &Path, sheet: &Sheet) -> Result<()> {
    let mut writer = ::csv::WriterBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    for row in &sheet.rows()[..sheet.last_row()] {
        if row.is_empty() {
            writer.write_record([""])?;
        } else {
            writer.write_record(row)?;
        }
    }
    writer.flush()?;
    Ok(())
}
