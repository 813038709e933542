//! The ClassBank sheet layout: expected tabs, their header rows and header colours.

use crate::error::{ClassBankError, Result};
use crate::workbook::{Color, HeaderFormat};
use std::collections::BTreeMap;

pub const STUDENTS: &str = "Students";
pub const TRANSACTIONS: &str = "Transactions";
pub const ATTENDANCE: &str = "Attendance";
pub const HEALTH: &str = "Health";
pub const PROFILE: &str = "Profile";
pub const SETTINGS: &str = "Settings";

/// Zero-based index of the `Type` column on the Transactions sheet.
pub const TRANSACTION_TYPE_COLUMN: usize = 2;
pub const DEPOSIT: &str = "Deposit";
pub const WITHDRAW: &str = "Withdraw";

/// Layout of one expected sheet.
#[derive(Debug, PartialEq, Eq)]
pub struct SheetSpec {
    pub name: &'static str,
    pub headers: &'static [&'static str],
    /// Default header background.
    pub background: Color,
    /// Whether data rows are ledger entries (everything but Settings).
    pub record_bearing: bool,
}

pub static EXPECTED_SHEETS: [SheetSpec; 6] = [
    SheetSpec {
        name: STUDENTS,
        headers: &["Student ID", "Name", "Grade", "No", "Created At"],
        background: Color::rgb(0xD9, 0xEA, 0xD3),
        record_bearing: true,
    },
    SheetSpec {
        name: TRANSACTIONS,
        headers: &[
            "Transaction ID",
            "Student ID",
            "Type",
            "Amount",
            "Date",
            "Timestamp",
            "Note",
        ],
        background: Color::rgb(0xFF, 0xF2, 0xCC),
        record_bearing: true,
    },
    SheetSpec {
        name: ATTENDANCE,
        headers: &["Transaction ID", "Student ID", "Status", "Date", "Timestamp"],
        background: Color::rgb(0xCF, 0xE2, 0xF3),
        record_bearing: true,
    },
    SheetSpec {
        name: HEALTH,
        headers: &[
            "Transaction ID",
            "Student ID",
            "Weight",
            "Height",
            "BMI",
            "Date",
            "Timestamp",
        ],
        background: Color::rgb(0xF4, 0xCC, 0xCC),
        record_bearing: true,
    },
    SheetSpec {
        name: PROFILE,
        headers: &["Transaction ID", "Student ID", "Mood", "Score", "Date", "Timestamp"],
        background: Color::rgb(0xD9, 0xD2, 0xE9),
        record_bearing: true,
    },
    SheetSpec {
        name: SETTINGS,
        headers: &["Key", "Value", "Updated At"],
        background: Color::rgb(0xEF, 0xEF, 0xEF),
        record_bearing: false,
    },
];

pub fn expected_sheet(name: &str) -> Option<&'static SheetSpec> {
    EXPECTED_SHEETS.iter().find(|spec| spec.name == name)
}

pub fn record_bearing_sheets() -> impl Iterator<Item = &'static SheetSpec> {
    EXPECTED_SHEETS.iter().filter(|spec| spec.record_bearing)
}

/// Header backgrounds per sheet: the built-in colours plus configured overrides.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HeaderPalette {
    overrides: BTreeMap<String, Color>,
}

impl HeaderPalette {
    /// Build a palette from `sheet name -> #RRGGBB` overrides.
    ///
    /// Unknown sheet names and malformed colours are rejected.
    pub fn with_overrides<'a, I>(overrides: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut palette = HeaderPalette::default();
        for (sheet, color) in overrides {
            if expected_sheet(sheet).is_none() {
                return Err(ClassBankError::Config(format!(
                    "header_colors names unknown sheet '{}'",
                    sheet
                )));
            }
            palette
                .overrides
                .insert(sheet.to_string(), Color::parse(color)?);
        }
        Ok(palette)
    }

    pub fn background_for(&self, spec: &SheetSpec) -> Color {
        self.overrides
            .get(spec.name)
            .copied()
            .unwrap_or(spec.background)
    }

    pub fn header_format_for(&self, spec: &SheetSpec) -> HeaderFormat {
        HeaderFormat::bold_on(self.background_for(spec))
    }
}
