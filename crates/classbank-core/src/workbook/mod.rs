//! In-memory workbook: named sheets in tab order, each a grid of text cells.

mod format;
mod sheet;

pub use format::{Color, HeaderFormat};
pub use sheet::Sheet;

use crate::error::{ClassBankError, Result};

/// A workbook identified by a fixed id, holding its sheets in tab order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workbook {
    id: String,
    sheets: Vec<Sheet>,
}

impl Workbook {
    /// Create an empty workbook. Side-effect free: nothing touches the disk.
    pub fn new(id: impl Into<String>) -> Self {
        Workbook {
            id: id.into(),
            sheets: Vec::new(),
        }
    }

    /// Build a workbook from already loaded sheets, rejecting duplicate names.
    pub fn with_sheets(id: impl Into<String>, sheets: Vec<Sheet>) -> Result<Self> {
        let mut workbook = Workbook::new(id);
        for sheet in sheets {
            if workbook.sheet_by_name(sheet.name()).is_some() {
                return Err(ClassBankError::DuplicateSheet(sheet.name().to_string()));
            }
            workbook.sheets.push(sheet);
        }
        Ok(workbook)
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn sheets(&self) -> &[Sheet] {
        &self.sheets
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(Sheet::name).collect()
    }

    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|sheet| sheet.name() == name)
    }

    pub fn sheet_by_name_mut(&mut self, name: &str) -> Option<&mut Sheet> {
        self.sheets.iter_mut().find(|sheet| sheet.name() == name)
    }

    /// Append a new empty sheet after the existing tabs.
    pub fn insert_sheet(&mut self, name: &str) -> Result<&mut Sheet> {
        if self.sheet_by_name(name).is_some() {
            return Err(ClassBankError::DuplicateSheet(name.to_string()));
        }
        self.sheets.push(Sheet::new(name));
        let idx = self.sheets.len() - 1;
        Ok(&mut self.sheets[idx])
    }
}
