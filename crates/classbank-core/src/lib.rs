//! classbank-core - UI-agnostic workbook model, storage and maintenance operations.

pub mod config;
pub mod error;
pub mod menu;
pub mod ops;
pub mod schema;
pub mod storage;
pub mod workbook;

pub use error::{ClassBankError, Result};
pub use menu::{Menu, MenuHost, MenuItem, on_open};
pub use ops::{Operation, OperationOutcome, ReportSink, run_operation};
pub use schema::HeaderPalette;
pub use workbook::{Color, HeaderFormat, Sheet, Workbook};
