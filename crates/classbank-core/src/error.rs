//! Error types for ClassBank core.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while opening, changing or saving a workbook.
///
/// Missing sheets, empty sheets and header mismatches are not errors: they
/// are reported as part of an operation's report text.
#[derive(Error, Debug)]
pub enum ClassBankError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to parse {path}: {source}")]
    TomlDe {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Failed to serialize workbook manifest: {0}")]
    TomlSer(#[from] toml::ser::Error),

    #[error("Workbook '{id}' not found at {path}")]
    WorkbookNotFound { id: String, path: PathBuf },

    #[error("Workbook '{id}' already exists at {path}")]
    WorkbookExists { id: String, path: PathBuf },

    #[error("Invalid workbook id '{0}'")]
    InvalidWorkbookId(String),

    #[error("Sheet '{0}' already exists")]
    DuplicateSheet(String),

    #[error("Invalid color '{0}': expected #RRGGBB")]
    InvalidColor(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ClassBankError>;
