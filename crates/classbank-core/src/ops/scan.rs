//! Mixed-data scan of the Transactions sheet.
//!
//! Every non-empty `Type` cell must be `Deposit` or `Withdraw`. Anything else
//! usually means a row from another sheet was written into Transactions.

use crate::schema::{DEPOSIT, TRANSACTION_TYPE_COLUMN, TRANSACTIONS, WITHDRAW};
use crate::workbook::Workbook;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    Deposit,
    Withdrawal,
    Other,
}

/// Classify a `Type` cell. Empty cells belong to no bucket.
pub fn classify(value: &str) -> Option<Category> {
    match value {
        "" => None,
        DEPOSIT => Some(Category::Deposit),
        WITHDRAW => Some(Category::Withdrawal),
        _ => Some(Category::Other),
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CategoryCounts {
    pub deposits: usize,
    pub withdrawals: usize,
    pub other: usize,
    /// Distinct unrecognised values and how often each occurs.
    pub unrecognized: BTreeMap<String, usize>,
}

impl CategoryCounts {
    fn record(&mut self, value: &str) {
        match classify(value) {
            Some(Category::Deposit) => self.deposits += 1,
            Some(Category::Withdrawal) => self.withdrawals += 1,
            Some(Category::Other) => {
                self.other += 1;
                *self.unrecognized.entry(value.to_string()).or_default() += 1;
            }
            None => {}
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MixedDataReport {
    /// The Transactions sheet does not exist.
    SheetMissing,
    Counted(CategoryCounts),
}

impl MixedDataReport {
    pub fn has_foreign_rows(&self) -> bool {
        matches!(self, MixedDataReport::Counted(counts) if counts.other > 0)
    }
}

pub fn scan_mixed_data(workbook: &Workbook) -> MixedDataReport {
    let Some(sheet) = workbook.sheet_by_name(TRANSACTIONS) else {
        return MixedDataReport::SheetMissing;
    };

    let mut counts = CategoryCounts::default();
    for row in sheet.data_rows() {
        let value = row.get(TRANSACTION_TYPE_COLUMN).map_or("", String::as_str);
        counts.record(value);
    }
    MixedDataReport::Counted(counts)
}

impl fmt::Display for MixedDataReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Mixed data scan: {}", TRANSACTIONS)?;
        writeln!(f)?;
        let counts = match self {
            MixedDataReport::SheetMissing => {
                return write!(f, "Sheet '{}' not found; nothing to scan.", TRANSACTIONS);
            }
            MixedDataReport::Counted(counts) => counts,
        };

        writeln!(f, "{:<12} {}", format!("{}:", DEPOSIT), counts.deposits)?;
        writeln!(f, "{:<12} {}", format!("{}:", WITHDRAW), counts.withdrawals)?;
        write!(f, "{:<12} {}", "Other:", counts.other)?;

        if counts.other > 0 {
            writeln!(f)?;
            writeln!(f)?;
            writeln!(
                f,
                "Warning: {} row(s) have a Type other than {} or {}.",
                counts.other, DEPOSIT, WITHDRAW
            )?;
            write!(f, "Data from another sheet may have been written here.")?;
            for (value, n) in &counts.unrecognized {
                write!(f, "\n  \"{}\" x{}", value, n)?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workbook::Sheet;

    fn transactions(types: &[&str]) -> Workbook {
        let mut rows = vec![vec![
            "Transaction ID".to_string(),
            "Student ID".to_string(),
            "Type".to_string(),
            "Amount".to_string(),
        ]];
        for (i, ty) in types.iter().enumerate() {
            rows.push(vec![
                format!("T{}", i + 1),
                "S1".to_string(),
                ty.to_string(),
                "10".to_string(),
            ]);
        }
        Workbook::with_sheets("test", vec![Sheet::with_rows(TRANSACTIONS, rows)]).unwrap()
    }

    fn counted(report: MixedDataReport) -> CategoryCounts {
        match report {
            MixedDataReport::Counted(counts) => counts,
            MixedDataReport::SheetMissing => panic!("sheet unexpectedly missing"),
        }
    }

    #[test]
    fn classify_buckets() {
        assert_eq!(classify("Deposit"), Some(Category::Deposit));
        assert_eq!(classify("Withdraw"), Some(Category::Withdrawal));
        assert_eq!(classify("Present"), Some(Category::Other));
        assert_eq!(classify("deposit"), Some(Category::Other));
        assert_eq!(classify(""), None);
    }

    #[test]
    fn mixed_categories_are_counted_and_empty_is_excluded() {
        let counts = counted(scan_mixed_data(&transactions(&[
            "Deposit", "Withdraw", "Deposit", "Foo", "",
        ])));
        assert_eq!(counts.deposits, 2);
        assert_eq!(counts.withdrawals, 1);
        assert_eq!(counts.other, 1);
        assert_eq!(counts.unrecognized.get("Foo"), Some(&1));
    }

    #[test]
    fn short_rows_count_as_empty() {
        let mut wb = transactions(&["Deposit"]);
        wb.sheet_by_name_mut(TRANSACTIONS)
            .unwrap()
            .append_row(["T9", "S2"]);
        let counts = counted(scan_mixed_data(&wb));
        assert_eq!((counts.deposits, counts.withdrawals, counts.other), (1, 0, 0));
    }

    #[test]
    fn header_row_is_not_classified() {
        let counts = counted(scan_mixed_data(&transactions(&[])));
        assert_eq!(counts, CategoryCounts::default());
    }

    #[test]
    fn missing_sheet_is_reported_not_failed() {
        let report = scan_mixed_data(&Workbook::new("test"));
        assert_eq!(report, MixedDataReport::SheetMissing);
        assert!(!report.has_foreign_rows());
        assert!(report.to_string().contains("not found"));
    }

    #[test]
    fn warning_lists_foreign_values() {
        let report = scan_mixed_data(&transactions(&["Present", "Deposit", "Present", "72.5"]));
        assert!(report.has_foreign_rows());
        let text = report.to_string();
        assert!(text.contains("Other:       3"));
        assert!(text.contains("Warning: 3 row(s)"));
        assert!(text.contains("\"72.5\" x1"));
        assert!(text.contains("\"Present\" x2"));
    }

    #[test]
    fn clean_sheet_has_no_warning() {
        let text = scan_mixed_data(&transactions(&["Deposit", "Withdraw"])).to_string();
        assert!(!text.contains("Warning"));
        assert!(text.ends_with("Other:       0"));
    }
}
