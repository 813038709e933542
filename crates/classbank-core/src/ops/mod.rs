//! Maintenance operations and the runner that reports their results.
//!
//! Each operation produces a typed report whose `Display` output is the report
//! text. [`run_operation`] logs that text and hands it to a [`ReportSink`]
//! (a modal dialog in the TUI, stdout in the CLI).

pub mod provision;
pub mod report;
pub mod scan;
pub mod verify;

pub use provision::{ProvisionReport, create_missing_sheets};
pub use report::{DataReport, SheetCount, report_data};
pub use scan::{Category, CategoryCounts, MixedDataReport, classify, scan_mixed_data};
pub use verify::{SheetStatus, StructureEntry, StructureReport, verify_structure};

use crate::error::Result;
use crate::schema::HeaderPalette;
use crate::workbook::Workbook;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Operation {
    VerifyStructure,
    ScanMixedData,
    ReportData,
    CreateMissingSheets,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::VerifyStructure,
        Operation::ScanMixedData,
        Operation::ReportData,
        Operation::CreateMissingSheets,
    ];

    /// Name menu items bind to.
    pub fn function_name(self) -> &'static str {
        match self {
            Operation::VerifyStructure => "verify_structure",
            Operation::ScanMixedData => "scan_mixed_data",
            Operation::ReportData => "report_data",
            Operation::CreateMissingSheets => "create_missing_sheets",
        }
    }

    pub fn from_function_name(name: &str) -> Option<Self> {
        Operation::ALL
            .into_iter()
            .find(|op| op.function_name() == name)
    }

    /// Dialog title for the operation's report.
    pub fn title(self) -> &'static str {
        match self {
            Operation::VerifyStructure => "Sheet Structure",
            Operation::ScanMixedData => "Mixed Data Scan",
            Operation::ReportData => "Data Report",
            Operation::CreateMissingSheets => "Create Missing Sheets",
        }
    }

    pub fn mutates(self) -> bool {
        matches!(self, Operation::CreateMissingSheets)
    }
}

/// Where an operation's report is shown.
pub trait ReportSink {
    fn alert(&mut self, title: &str, text: &str);
}

/// Collects alerts in memory.
impl ReportSink for Vec<(String, String)> {
    fn alert(&mut self, title: &str, text: &str) {
        self.push((title.to_string(), text.to_string()));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OperationOutcome {
    pub text: String,
    /// Whether the workbook was changed and needs saving.
    pub changed: bool,
}

/// Run `op`, log its report and show it through `sink`.
pub fn run_operation(
    op: Operation,
    workbook: &mut Workbook,
    palette: &HeaderPalette,
    sink: &mut dyn ReportSink,
) -> Result<OperationOutcome> {
    let (text, changed) = match op {
        Operation::VerifyStructure => (verify_structure(workbook).to_string(), false),
        Operation::ScanMixedData => (scan_mixed_data(workbook).to_string(), false),
        Operation::ReportData => (report_data(workbook).to_string(), false),
        Operation::CreateMissingSheets => {
            let report = create_missing_sheets(workbook, palette)?;
            (report.to_string(), report.changed())
        }
    };

    tracing::info!(
        operation = op.function_name(),
        workbook = workbook.id(),
        changed,
        "\n{}",
        text
    );
    sink.alert(op.title(), &text);

    Ok(OperationOutcome { text, changed })
}
