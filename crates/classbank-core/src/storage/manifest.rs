//! `workbook.toml`: tab order, sheet file names and header formats.

use crate::error::{ClassBankError, Result};
use crate::workbook::HeaderFormat;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub const MANIFEST_FILE: &str = "workbook.toml";

const MAX_MANIFEST_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Manifest {
    #[serde(default)]
    pub sheets: Vec<SheetEntry>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SheetEntry {
    pub name: String,
    pub file: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub header_format: Option<HeaderFormat>,
}

impl Manifest {
    pub fn read(path: &Path) -> Result<Self> {
        let meta = std::fs::metadata(path)?;
        if meta.len() > MAX_MANIFEST_BYTES {
            return Err(ClassBankError::Io(std::io::Error::new(
                std::io::ErrorKind::InvalidData,
                format!(
                    "Refusing to read {}: manifest too large ({} bytes, max {})",
                    path.display(),
                    meta.len(),
                    MAX_MANIFEST_BYTES
                ),
            )));
        }
        let content = std::fs::read_to_string(path)?;
        let manifest: Manifest =
            toml::from_str(&content).map_err(|source| ClassBankError::TomlDe {
                path: path.to_path_buf(),
                source,
            })?;

        for entry in &manifest.sheets {
            if entry.file.contains(['/', '\\']) || entry.file == ".." {
                return Err(ClassBankError::Config(format!(
                    "sheet '{}' points outside the workbook: {}",
                    entry.name, entry.file
                )));
            }
        }
        Ok(manifest)
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
