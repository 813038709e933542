//! On-disk workbook storage: a directory holding a `workbook.toml` manifest and
//! one CSV file per sheet.

mod csv;
mod manifest;

pub use manifest::{MANIFEST_FILE, Manifest, SheetEntry};

use crate::error::{ClassBankError, Result};
use crate::workbook::{Sheet, Workbook};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Directory holding the workbook `id` below `data_dir`.
pub fn workbook_dir(data_dir: &Path, id: &str) -> Result<PathBuf> {
    validate_workbook_id(id)?;
    Ok(data_dir.join(id))
}

/// Workbook ids name a directory, so only a conservative character set is allowed.
pub fn validate_workbook_id(id: &str) -> Result<()> {
    let valid = !id.is_empty()
        && id != "."
        && id != ".."
        && id
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'));
    if valid {
        Ok(())
    } else {
        Err(ClassBankError::InvalidWorkbookId(id.to_string()))
    }
}

/// Open the workbook `id`. A missing directory or manifest is fatal.
pub fn open_workbook(data_dir: &Path, id: &str) -> Result<Workbook> {
    let dir = workbook_dir(data_dir, id)?;
    let manifest_path = dir.join(MANIFEST_FILE);
    if !manifest_path.is_file() {
        return Err(ClassBankError::WorkbookNotFound {
            id: id.to_string(),
            path: dir,
        });
    }

    let manifest = Manifest::read(&manifest_path)?;
    let mut sheets = Vec::with_capacity(manifest.sheets.len());
    for entry in manifest.sheets {
        let sheet_path = dir.join(&entry.file);
        let rows = if sheet_path.is_file() {
            csv::read_rows(&sheet_path)?
        } else {
            tracing::warn!(sheet = %entry.name, path = %sheet_path.display(), "sheet file missing, loading as empty");
            Vec::new()
        };
        let mut sheet = Sheet::with_rows(entry.name, rows);
        if let Some(format) = entry.header_format {
            sheet.set_header_format(format);
        }
        sheets.push(sheet);
    }

    let workbook = Workbook::with_sheets(id, sheets)?;
    tracing::debug!(id, path = %dir.display(), sheets = workbook.sheets().len(), "opened workbook");
    Ok(workbook)
}

/// Write every sheet and then the manifest. Returns the workbook directory.
pub fn save_workbook(data_dir: &Path, workbook: &Workbook) -> Result<PathBuf> {
    let dir = workbook_dir(data_dir, workbook.id())?;
    std::fs::create_dir_all(&dir)?;

    let mut used = HashSet::new();
    let mut entries = Vec::with_capacity(workbook.sheets().len());
    for sheet in workbook.sheets() {
        let file = unique_file_name(sheet.name(), &mut used);
        csv::write_rows(&dir.join(&file), sheet)?;
        entries.push(SheetEntry {
            name: sheet.name().to_string(),
            file,
            header_format: sheet.header_format().copied(),
        });
    }

    Manifest { sheets: entries }.write(&dir.join(MANIFEST_FILE))?;
    tracing::debug!(id = workbook.id(), path = %dir.display(), "saved workbook");
    Ok(dir)
}

/// Create an empty workbook on disk. Refuses to overwrite an existing one.
pub fn init_workbook(data_dir: &Path, id: &str) -> Result<Workbook> {
    let dir = workbook_dir(data_dir, id)?;
    if dir.join(MANIFEST_FILE).exists() {
        return Err(ClassBankError::WorkbookExists {
            id: id.to_string(),
            path: dir,
        });
    }
    let workbook = Workbook::new(id);
    save_workbook(data_dir, &workbook)?;
    tracing::info!(id, path = %dir.display(), "created empty workbook");
    Ok(workbook)
}

/// File name for a sheet: unsafe characters replaced, made unique within the workbook.
fn unique_file_name(sheet_name: &str, used: &mut HashSet<String>) -> String {
    let stem: String = sheet_name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, ' ' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let stem = if stem.trim().is_empty() {
        "sheet".to_string()
    } else {
        stem
    };

    let mut candidate = format!("{}.csv", stem);
    let mut n = 2;
    while !used.insert(candidate.to_lowercase()) {
        candidate = format!("{}_{}.csv", stem, n);
        n += 1;
    }
    candidate
}
