//! Create missing sheets with a styled header row.

use crate::error::Result;
use crate::schema::{EXPECTED_SHEETS, HeaderPalette};
use crate::workbook::Workbook;
use std::fmt;

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ProvisionReport {
    /// Sheets created in this run, in expected-sheet order.
    pub created: Vec<&'static str>,
}

impl ProvisionReport {
    pub fn changed(&self) -> bool {
        !self.created.is_empty()
    }
}

/// Insert every absent expected sheet. Existing sheets are left untouched, so a
/// second run creates nothing.
pub fn create_missing_sheets(
    workbook: &mut Workbook,
    palette: &HeaderPalette,
) -> Result<ProvisionReport> {
    let mut report = ProvisionReport::default();
    for spec in &EXPECTED_SHEETS {
        if workbook.sheet_by_name(spec.name).is_some() {
            continue;
        }
        let sheet = workbook.insert_sheet(spec.name)?;
        sheet.append_row(spec.headers.iter().copied());
        sheet.set_header_format(palette.header_format_for(spec));
        tracing::info!(sheet = spec.name, "created sheet");
        report.created.push(spec.name);
    }
    Ok(report)
}

impl fmt::Display for ProvisionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.created.is_empty() {
            return write!(f, "All sheets already exist. No sheets needed to be created.");
        }
        writeln!(f, "Created {} sheet(s):", self.created.len())?;
        let mut first = true;
        for name in &self.created {
            if !first {
                writeln!(f)?;
            }
            first = false;
            write!(f, "  - {}", name)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ops::verify::verify_structure;
    use crate::schema::{HEALTH, SETTINGS, expected_sheet};
    use crate::workbook::{Color, Sheet};

    fn workbook_without(missing: &[&str]) -> Workbook {
        let sheets = EXPECTED_SHEETS
            .iter()
            .filter(|spec| !missing.contains(&spec.name))
            .map(|spec| {
                Sheet::with_rows(
                    spec.name,
                    vec![spec.headers.iter().map(|h| h.to_string()).collect()],
                )
            })
            .collect();
        Workbook::with_sheets("test", sheets).unwrap()
    }

    #[test]
    fn creates_exactly_the_missing_sheets() {
        let mut wb = workbook_without(&[HEALTH, SETTINGS]);
        let report = create_missing_sheets(&mut wb, &HeaderPalette::default()).unwrap();
        assert_eq!(report.created, vec![HEALTH, SETTINGS]);
        assert_eq!(wb.sheets().len(), 6);

        for name in [HEALTH, SETTINGS] {
            let spec = expected_sheet(name).unwrap();
            let sheet = wb.sheet_by_name(name).unwrap();
            assert_eq!(sheet.last_row(), 1);
            assert_eq!(sheet.row_values(1, spec.headers.len()), spec.headers);
            let format = sheet.header_format().unwrap();
            assert!(format.bold);
            assert_eq!(format.background, spec.background);
        }
        assert!(verify_structure(&wb).is_well_formed());
    }

    #[test]
    fn second_run_creates_nothing() {
        let mut wb = workbook_without(&[HEALTH, SETTINGS]);
        create_missing_sheets(&mut wb, &HeaderPalette::default()).unwrap();
        let snapshot = wb.clone();

        let report = create_missing_sheets(&mut wb, &HeaderPalette::default()).unwrap();
        assert!(!report.changed());
        assert_eq!(wb, snapshot);
        assert_eq!(
            report.to_string(),
            "All sheets already exist. No sheets needed to be created."
        );
    }

    #[test]
    fn existing_malformed_sheet_is_not_touched() {
        let mut wb = Workbook::with_sheets(
            "test",
            vec![Sheet::with_rows(SETTINGS, vec![vec!["oops".to_string()]])],
        )
        .unwrap();
        let report = create_missing_sheets(&mut wb, &HeaderPalette::default()).unwrap();
        assert_eq!(report.created.len(), 5);
        let settings = wb.sheet_by_name(SETTINGS).unwrap();
        assert_eq!(settings.row_values(1, 1), vec!["oops"]);
        assert!(settings.header_format().is_none());
    }

    #[test]
    fn palette_override_is_applied() {
        let mut wb = workbook_without(&[HEALTH]);
        let palette = HeaderPalette::with_overrides([(HEALTH, "#123456")]).unwrap();
        create_missing_sheets(&mut wb, &palette).unwrap();
        let format = wb.sheet_by_name(HEALTH).unwrap().header_format().unwrap();
        assert_eq!(format.background, Color::rgb(0x12, 0x34, 0x56));
    }

    #[test]
    fn report_lists_created_sheets() {
        let mut wb = Workbook::new("test");
        let text = create_missing_sheets(&mut wb, &HeaderPalette::default())
            .unwrap()
            .to_string();
        assert!(text.starts_with("Created 6 sheet(s):\n  - Students\n"));
        assert!(text.ends_with("  - Settings"));
    }
}
