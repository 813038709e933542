//! Structure verification: every expected sheet exists with its exact header row.

use crate::schema::{EXPECTED_SHEETS, SheetSpec};
use crate::workbook::Workbook;
use std::fmt;

/// Outcome of checking one expected sheet.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SheetStatus {
    Missing,
    Empty,
    /// First row differs from the expected headers in at least one position.
    Mismatch {
        expected: Vec<String>,
        found: Vec<String>,
    },
    Ok { data_rows: usize },
}

impl SheetStatus {
    pub fn is_ok(&self) -> bool {
        matches!(self, SheetStatus::Ok { .. })
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructureEntry {
    pub sheet: &'static str,
    pub status: SheetStatus,
}

/// Per-sheet verification results, in expected-sheet order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StructureReport {
    pub entries: Vec<StructureEntry>,
}

impl StructureReport {
    pub fn is_well_formed(&self) -> bool {
        self.entries.iter().all(|entry| entry.status.is_ok())
    }

    pub fn status_of(&self, sheet: &str) -> Option<&SheetStatus> {
        self.entries
            .iter()
            .find(|entry| entry.sheet == sheet)
            .map(|entry| &entry.status)
    }
}

pub fn verify_structure(workbook: &Workbook) -> StructureReport {
    StructureReport {
        entries: EXPECTED_SHEETS
            .iter()
            .map(|spec| StructureEntry {
                sheet: spec.name,
                status: check_sheet(workbook, spec),
            })
            .collect(),
    }
}

fn check_sheet(workbook: &Workbook, spec: &SheetSpec) -> SheetStatus {
    let Some(sheet) = workbook.sheet_by_name(spec.name) else {
        return SheetStatus::Missing;
    };

    let last_row = sheet.last_row();
    if last_row == 0 {
        return SheetStatus::Empty;
    }

    // Only the expected-width prefix is compared; extra columns are ignored.
    let found = sheet.row_values(1, spec.headers.len());
    if found.iter().zip(spec.headers).any(|(f, e)| f.as_str() != *e) {
        return SheetStatus::Mismatch {
            expected: spec.headers.iter().map(|h| h.to_string()).collect(),
            found,
        };
    }

    SheetStatus::Ok {
        data_rows: last_row - 1,
    }
}

impl fmt::Display for StructureReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Sheet structure check")?;
        writeln!(f)?;
        for entry in &self.entries {
            match &entry.status {
                SheetStatus::Missing => writeln!(f, "[MISSING]  {}: sheet not found", entry.sheet)?,
                SheetStatus::Empty => writeln!(f, "[EMPTY]    {}: no header row", entry.sheet)?,
                SheetStatus::Mismatch { expected, found } => {
                    writeln!(f, "[MISMATCH] {}: header row differs", entry.sheet)?;
                    writeln!(f, "           expected: {}", expected.join(", "))?;
                    writeln!(f, "           found:    {}", found.join(", "))?;
                }
                SheetStatus::Ok { data_rows } => {
                    writeln!(f, "[OK]       {}: {} data rows", entry.sheet, data_rows)?
                }
            }
        }
        writeln!(f)?;
        if self.is_well_formed() {
            write!(f, "All sheets are well-formed.")
        } else {
            let problems = self.entries.iter().filter(|e| !e.status.is_ok()).count();
            write!(f, "{} of {} sheets need attention.", problems, self.entries.len())
        }
    }
}
