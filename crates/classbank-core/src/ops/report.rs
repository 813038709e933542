//! Data-row counts for the record-bearing sheets.

use crate::schema::record_bearing_sheets;
use crate::workbook::Workbook;
use std::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SheetCount {
    pub sheet: &'static str,
    pub data_rows: usize,
    pub present: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DataReport {
    pub counts: Vec<SheetCount>,
}

impl DataReport {
    pub fn total(&self) -> usize {
        self.counts.iter().map(|c| c.data_rows).sum()
    }

    pub fn count_of(&self, sheet: &str) -> Option<usize> {
        self.counts
            .iter()
            .find(|c| c.sheet == sheet)
            .map(|c| c.data_rows)
    }
}

/// Rows below the header of each record-bearing sheet; absent or blank sheets count 0.
pub fn report_data(workbook: &Workbook) -> DataReport {
    DataReport {
        counts: record_bearing_sheets()
            .map(|spec| {
                let sheet = workbook.sheet_by_name(spec.name);
                SheetCount {
                    sheet: spec.name,
                    data_rows: sheet.map_or(0, |s| s.data_row_count()),
                    present: sheet.is_some(),
                }
            })
            .collect(),
    }
}

impl fmt::Display for DataReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Data report")?;
        writeln!(f)?;
        for count in &self.counts {
            let label = format!("{}:", count.sheet);
            if count.present {
                writeln!(f, "{:<14} {}", label, count.data_rows)?;
            } else {
                writeln!(f, "{:<14} {} (sheet missing)", label, count.data_rows)?;
            }
        }
        write!(f, "{:<14} {}", "Total:", self.total())
    }
}
