//! Menu registration run when a workbook is opened.

use crate::ops::Operation;

pub const MENU_TITLE: &str = "ClassBank Tools";

/// A labelled entry bound to an operation by its function name.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MenuItem {
    pub label: &'static str,
    pub function_name: &'static str,
}

impl MenuItem {
    /// Resolve the bound function name.
    pub fn operation(&self) -> Option<Operation> {
        Operation::from_function_name(self.function_name)
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Menu {
    pub title: &'static str,
    pub items: Vec<MenuItem>,
}

/// Something that can show top-level menus (the terminal UI, or a plain list).
pub trait MenuHost {
    fn add_menu(&mut self, menu: Menu);
}

impl MenuHost for Vec<Menu> {
    fn add_menu(&mut self, menu: Menu) {
        self.push(menu);
    }
}

/// The ClassBank menu with its three user-facing operations.
pub fn classbank_menu() -> Menu {
    Menu {
        title: MENU_TITLE,
        items: vec![
            MenuItem {
                label: "Verify sheet structure",
                function_name: Operation::VerifyStructure.function_name(),
            },
            MenuItem {
                label: "Show data report",
                function_name: Operation::ReportData.function_name(),
            },
            MenuItem {
                label: "Create missing sheets",
                function_name: Operation::CreateMissingSheets.function_name(),
            },
        ],
    }
}

/// Open hook: install the ClassBank menu on `host`.
pub fn on_open(host: &mut dyn MenuHost) {
    tracing::debug!(title = MENU_TITLE, "installing menu");
    host.add_menu(classbank_menu());
}
