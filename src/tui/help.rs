//! Help text content for the help modal

/// Get the about section
pub fn get_about_help() -> Vec<String> {
    vec![
        "ClassBank workbook maintenance",
        "",
        "  Checks that the Students, Transactions, Attendance, Health,",
        "  Profile and Settings sheets exist with the expected headers,",
        "  counts their data rows and creates any that are missing.",
        "",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Get keybinding help text
pub fn get_help_text() -> Vec<String> {
    vec![
        "Menu:",
        "  j/k, Up/Down   Move selection",
        "  1-9            Run item by number",
        "  Enter          Run selected item",
        "  s              Scan Transactions for mixed data",
        "",
        "Dialogs:",
        "  j/k, Up/Down   Scroll report",
        "  Enter/Esc/q    Close",
        "",
        "Other:",
        "  ?              Show this help",
        "  q / Ctrl+c     Quit",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}
