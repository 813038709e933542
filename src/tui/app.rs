//! Application state and logic.
//!
//! This module contains the main [`App`] struct: the open workbook, the menus
//! installed by the open hook, the current selection and the modal dialog that
//! shows an operation's report.

use classbank_core::menu::{Menu, MenuHost, MenuItem, on_open};
use classbank_core::ops::{Operation, ReportSink, run_operation};
use classbank_core::schema::HeaderPalette;
use classbank_core::storage::{open_workbook, save_workbook};
use classbank_core::{Result, Workbook};
use std::path::PathBuf;

/// Modal report dialog.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Alert {
    pub title: String,
    pub lines: Vec<String>,
    pub scroll: usize,
}

impl Alert {
    pub fn new(title: &str, text: &str) -> Self {
        Alert {
            title: title.to_string(),
            lines: text.lines().map(str::to_string).collect(),
            scroll: 0,
        }
    }
}

/// Captures the report of one operation so it can be shown as a dialog.
#[derive(Default)]
struct AlertSink {
    alert: Option<Alert>,
}

impl ReportSink for AlertSink {
    fn alert(&mut self, title: &str, text: &str) {
        self.alert = Some(Alert::new(title, text));
    }
}

/// Main application state container.
pub struct App {
    /// The open workbook
    pub workbook: Workbook,
    /// Directory the workbook is saved under
    pub data_dir: PathBuf,
    /// Header colours used when sheets are created
    pub palette: HeaderPalette,
    /// Menus installed by the open hook
    pub menus: Vec<Menu>,
    /// Index into the flattened menu items
    pub selected: usize,
    /// Report dialog (when open)
    pub alert: Option<Alert>,
    /// Help modal state
    pub help_modal: bool,
    /// Status message to display
    pub status_message: String,
    /// Set when the user asked to leave
    pub should_quit: bool,
}

impl MenuHost for App {
    fn add_menu(&mut self, menu: Menu) {
        self.menus.push(menu);
    }
}

impl App {
    /// Create app state around an already loaded workbook. No menus are installed.
    pub fn new(workbook: Workbook, data_dir: PathBuf, palette: HeaderPalette) -> Self {
        App {
            workbook,
            data_dir,
            palette,
            menus: Vec::new(),
            selected: 0,
            alert: None,
            help_modal: false,
            status_message: String::new(),
            should_quit: false,
        }
    }

    /// Open the workbook `id` under `data_dir` and run the open hook.
    pub fn open(data_dir: PathBuf, id: &str, palette: HeaderPalette) -> Result<Self> {
        let workbook = open_workbook(&data_dir, id)?;
        let mut app = App::new(workbook, data_dir, palette);
        on_open(&mut app);
        app.status_message = format!(
            "Opened workbook '{}' ({} sheets)",
            app.workbook.id(),
            app.workbook.sheets().len()
        );
        Ok(app)
    }

    pub fn menu_items(&self) -> impl Iterator<Item = &MenuItem> {
        self.menus.iter().flat_map(|menu| menu.items.iter())
    }

    pub fn item_count(&self) -> usize {
        self.menu_items().count()
    }

    pub fn selected_item(&self) -> Option<&MenuItem> {
        self.menu_items().nth(self.selected)
    }

    pub fn select_next(&mut self) {
        let count = self.item_count();
        if count > 0 {
            self.selected = (self.selected + 1) % count;
        }
    }

    pub fn select_prev(&mut self) {
        let count = self.item_count();
        if count > 0 {
            self.selected = (self.selected + count - 1) % count;
        }
    }

    /// Run the operation bound to the selected menu item.
    pub fn activate_selected(&mut self) {
        let Some((function_name, op)) = self
            .selected_item()
            .map(|item| (item.function_name, item.operation()))
        else {
            return;
        };
        match op {
            Some(op) => self.run(op),
            None => {
                self.status_message = format!("No operation named '{}'", function_name);
            }
        }
    }

    /// Run `op`, show its report in a dialog and save the workbook if it changed.
    pub fn run(&mut self, op: Operation) {
        // The in-memory workbook must not run ahead of the one on disk.
        let snapshot = op.mutates().then(|| self.workbook.clone());
        let mut sink = AlertSink::default();
        let outcome = run_operation(op, &mut self.workbook, &self.palette, &mut sink);
        match outcome {
            Ok(outcome) => {
                self.alert = sink.alert;
                if !outcome.changed {
                    self.status_message = format!("{} finished", op.title());
                    return;
                }
                match save_workbook(&self.data_dir, &self.workbook) {
                    Ok(path) => {
                        self.status_message = format!("Saved {}", path.display());
                    }
                    Err(e) => {
                        tracing::error!(error = %e, "failed to save workbook");
                        if let Some(previous) = snapshot {
                            self.workbook = previous;
                        }
                        let note = format!("Failed to save workbook: {}", e);
                        match self.alert.as_mut() {
                            Some(alert) => {
                                alert.lines.push(String::new());
                                alert.lines.push(note);
                                alert.lines.push("No changes were kept.".to_string());
                            }
                            None => self.alert = Some(Alert::new("Error", &note)),
                        }
                        self.status_message = "Save failed".to_string();
                    }
                }
            }
            Err(e) => {
                tracing::error!(operation = op.function_name(), error = %e, "operation failed");
                if let Some(previous) = snapshot {
                    self.workbook = previous;
                }
                self.alert = Some(Alert::new("Error", &e.to_string()));
                self.status_message = format!("{} failed", op.title());
            }
        }
    }

    pub fn close_alert(&mut self) {
        self.alert = None;
    }

    pub fn scroll_alert_by(&mut self, delta: isize) {
        if let Some(alert) = self.alert.as_mut() {
            let max = alert.lines.len().saturating_sub(1);
            alert.scroll = alert.scroll.saturating_add_signed(delta).min(max);
        }
    }

    pub fn open_help_modal(&mut self) {
        self.help_modal = true;
    }

    pub fn close_help_modal(&mut self) {
        self.help_modal = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use classbank_core::storage::init_workbook;

    struct TempDir(PathBuf);

    impl TempDir {
        fn new(label: &str) -> Self {
            let path = std::env::temp_dir().join(format!(
                "classbank_tui_{}_{}_{}_{:?}",
                label,
                std::process::id(),
                std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_nanos(),
                std::thread::current().id(),
            ));
            std::fs::create_dir_all(&path).unwrap();
            TempDir(path)
        }
    }

    impl Drop for TempDir {
        fn drop(&mut self) {
            let _ = std::fs::remove_dir_all(&self.0);
        }
    }

    fn opened(label: &str) -> (TempDir, App) {
        let tmp = TempDir::new(label);
        init_workbook(&tmp.0, "classbank").unwrap();
        let app = App::open(tmp.0.clone(), "classbank", HeaderPalette::default()).unwrap();
        (tmp, app)
    }

    #[test]
    fn open_installs_menu() {
        let (_tmp, app) = opened("menu");
        assert_eq!(app.menus.len(), 1);
        assert_eq!(app.item_count(), 3);
        assert_eq!(
            app.selected_item().map(|item| item.function_name),
            Some("verify_structure")
        );
    }

    #[test]
    fn open_unknown_workbook_fails() {
        let tmp = TempDir::new("unknown");
        assert!(App::open(tmp.0.clone(), "nope", HeaderPalette::default()).is_err());
    }

    #[test]
    fn selection_wraps() {
        let (_tmp, mut app) = opened("wrap");
        app.select_prev();
        assert_eq!(app.selected, 2);
        app.select_next();
        assert_eq!(app.selected, 0);
    }

    #[test]
    fn selection_without_menus_is_noop() {
        let mut app = App::new(Workbook::new("t"), PathBuf::from("."), HeaderPalette::default());
        app.select_next();
        app.select_prev();
        app.activate_selected();
        assert_eq!(app.selected, 0);
        assert!(app.alert.is_none());
    }

    #[test]
    fn verify_opens_report_dialog() {
        let (_tmp, mut app) = opened("verify");
        app.activate_selected();
        let alert = app.alert.as_ref().unwrap();
        assert_eq!(alert.title, "Sheet Structure");
        assert!(alert.lines.iter().any(|l| l.contains("[MISSING]  Students")));
        app.close_alert();
        assert!(app.alert.is_none());
    }

    #[test]
    fn provisioning_saves_workbook() {
        let (tmp, mut app) = opened("provision");
        app.selected = 2;
        app.activate_selected();
        assert!(app.status_message.starts_with("Saved"));
        assert_eq!(app.workbook.sheets().len(), 6);

        let reopened = open_workbook(&tmp.0, "classbank").unwrap();
        assert_eq!(reopened.sheets().len(), 6);

        app.activate_selected();
        let alert = app.alert.as_ref().unwrap();
        assert!(alert.lines[0].starts_with("All sheets already exist"));
    }

    #[test]
    fn failed_save_rolls_back_and_retry_saves() {
        let (tmp, mut app) = opened("failed_save");
        let dir = tmp.0.join("classbank");
        std::fs::remove_dir_all(&dir).unwrap();
        std::fs::write(&dir, "not a directory").unwrap();

        app.run(Operation::CreateMissingSheets);
        assert_eq!(app.status_message, "Save failed");
        assert!(app.workbook.sheets().is_empty());
        let alert = app.alert.as_ref().unwrap();
        assert_eq!(alert.title, "Create Missing Sheets");
        assert!(alert.lines[0].starts_with("Created 6 sheet(s)"));
        assert!(alert.lines.iter().any(|l| l.starts_with("Failed to save workbook")));

        std::fs::remove_file(&dir).unwrap();
        init_workbook(&tmp.0, "classbank").unwrap();
        app.close_alert();
        app.run(Operation::CreateMissingSheets);
        assert!(app.status_message.starts_with("Saved"));
        assert_eq!(app.workbook.sheets().len(), 6);
        assert_eq!(open_workbook(&tmp.0, "classbank").unwrap().sheets().len(), 6);
    }

    #[test]
    fn alert_scroll_is_clamped() {
        let mut app = App::new(Workbook::new("t"), PathBuf::from("."), HeaderPalette::default());
        app.alert = Some(Alert::new("x", "a\nb\nc"));
        app.scroll_alert_by(10);
        assert_eq!(app.alert.as_ref().unwrap().scroll, 2);
        app.scroll_alert_by(-5);
        assert_eq!(app.alert.as_ref().unwrap().scroll, 0);
    }
}
