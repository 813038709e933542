//! User configuration loaded from `config.toml`.
//!
//! Everything is optional; a missing file means built-in defaults.

use crate::error::{ClassBankError, Result};
use crate::schema::HeaderPalette;
use crate::storage::validate_workbook_id;
use directories::ProjectDirs;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

pub const DEFAULT_WORKBOOK_ID: &str = "classbank";
pub const DEFAULT_LOG_LEVEL: &str = "info";
pub const CONFIG_FILE: &str = "config.toml";

const MAX_CONFIG_FILE_BYTES: u64 = 1_048_576; // 1 MiB

#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub workbook: Option<String>,
    pub data_dir: Option<PathBuf>,
    pub log_level: Option<String>,
    #[serde(default)]
    pub header_colors: BTreeMap<String, String>,
}

impl Settings {
    pub fn from_toml(content: &str, path: &Path) -> Result<Self> {
        toml::from_str(content).map_err(|source| ClassBankError::TomlDe {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Workbook id: explicit value first, then the config file, then the default.
    pub fn workbook_id(&self, explicit: Option<&str>) -> Result<String> {
        let id = explicit
            .or(self.workbook.as_deref())
            .unwrap_or(DEFAULT_WORKBOOK_ID);
        validate_workbook_id(id)?;
        Ok(id.to_string())
    }

    /// Directory holding workbooks: explicit value, config file, then the platform data dir.
    pub fn data_dir(&self, explicit: Option<&Path>) -> Result<PathBuf> {
        explicit
            .map(Path::to_path_buf)
            .or_else(|| self.data_dir.clone())
            .or_else(default_data_dir)
            .ok_or_else(|| {
                ClassBankError::Config(
                    "no data directory available; pass --data-dir".to_string(),
                )
            })
    }

    pub fn log_level(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }

    pub fn header_palette(&self) -> Result<HeaderPalette> {
        HeaderPalette::with_overrides(
            self.header_colors
                .iter()
                .map(|(sheet, color)| (sheet.as_str(), color.as_str())),
        )
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "classbank")
}

pub fn default_config_path() -> Option<PathBuf> {
    project_dirs().map(|proj| proj.config_dir().join(CONFIG_FILE))
}

pub fn default_data_dir() -> Option<PathBuf> {
    project_dirs().map(|proj| proj.data_dir().to_path_buf())
}

/// Load settings from `path`, or from the default location when `path` is `None`.
///
/// A file that does not exist yields defaults.
pub fn load_settings(path: Option<&Path>) -> Result<Settings> {
    let Some(path) = path.map(Path::to_path_buf).or_else(default_config_path) else {
        return Ok(Settings::default());
    };
    if !path.exists() {
        return Ok(Settings::default());
    }

    let meta = std::fs::metadata(&path)?;
    if meta.len() > MAX_CONFIG_FILE_BYTES {
        return Err(ClassBankError::Config(format!(
            "refusing to read {}: file too large ({} bytes, max {})",
            path.display(),
            meta.len(),
            MAX_CONFIG_FILE_BYTES
        )));
    }
    let content = std::fs::read_to_string(&path)?;
    let settings = Settings::from_toml(&content, &path)?;
    settings.header_palette()?;
    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::expected_sheet;
    use crate::workbook::Color;

    fn parse(text: &str) -> Result<Settings> {
        Settings::from_toml(text, Path::new("config.toml"))
    }

    #[test]
    fn empty_file_is_all_defaults() {
        let settings = parse("").unwrap();
        assert_eq!(settings, Settings::default());
        assert_eq!(settings.workbook_id(None).unwrap(), "classbank");
        assert_eq!(settings.log_level(), "info");
    }

    #[test]
    fn full_file_parses() {
        let settings = parse(
            r##"
workbook = "grade3"
data_dir = "/srv/classbank"
log_level = "debug"

[header_colors]
Students = "#B6D7A8"
"##,
        )
        .unwrap();
        assert_eq!(settings.workbook_id(None).unwrap(), "grade3");
        assert_eq!(
            settings.data_dir(None).unwrap(),
            PathBuf::from("/srv/classbank")
        );
        assert_eq!(settings.log_level(), "debug");

        let palette = settings.header_palette().unwrap();
        let students = expected_sheet("Students").unwrap();
        assert_eq!(palette.background_for(students), Color::rgb(0xB6, 0xD7, 0xA8));
    }

    #[test]
    fn explicit_values_win() {
        let settings = parse("workbook = \"grade3\"\ndata_dir = \"/srv/classbank\"").unwrap();
        assert_eq!(settings.workbook_id(Some("grade4")).unwrap(), "grade4");
        assert_eq!(
            settings.data_dir(Some(Path::new("/tmp/wb"))).unwrap(),
            PathBuf::from("/tmp/wb")
        );
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            parse("spreadsheet_id = \"abc\""),
            Err(ClassBankError::TomlDe { .. })
        ));
    }

    #[test]
    fn invalid_workbook_id_is_rejected() {
        let settings = parse("workbook = \"../etc\"").unwrap();
        assert!(matches!(
            settings.workbook_id(None),
            Err(ClassBankError::InvalidWorkbookId(_))
        ));
    }

    #[test]
    fn missing_file_yields_defaults() {
        let path = std::env::temp_dir().join(format!(
            "classbank_no_such_config_{}.toml",
            std::process::id()
        ));
        assert_eq!(load_settings(Some(&path)).unwrap(), Settings::default());
    }

    #[test]
    fn bad_header_color_fails_load() {
        let path = std::env::temp_dir().join(format!(
            "classbank_bad_color_{}_{:?}.toml",
            std::process::id(),
            std::thread::current().id(),
        ));
        struct Cleanup(PathBuf);
        impl Drop for Cleanup {
            fn drop(&mut self) {
                let _ = std::fs::remove_file(&self.0);
            }
        }
        let _cleanup = Cleanup(path.clone());

        std::fs::write(&path, "[header_colors]\nHealth = \"pinkish\"\n").unwrap();
        assert!(matches!(
            load_settings(Some(&path)),
            Err(ClassBankError::InvalidColor(_))
        ));
    }

    #[test]
    fn oversized_config_is_rejected() {
        let path = std::env::temp_dir().join(format!(
            "classbank_big_config_{}_{:?}.toml",
            std::process::id(),
            std::thread::current().id(),
        ));
        struct Cleanup(PathBuf);
        impl Drop for Cleanup {
            fn drop(&mut self) {
                let _ = std::fs::remove_file(&self.0);
            }
        }
        let _cleanup = Cleanup(path.clone());

        std::fs::write(&path, "a".repeat(MAX_CONFIG_FILE_BYTES as usize + 1)).unwrap();
        match load_settings(Some(&path)) {
            Err(ClassBankError::Config(msg)) => assert!(msg.contains("file too large")),
            other => panic!("expected size error, got {:?}", other),
        }
    }
}
