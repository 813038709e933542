//! Terminal UI: hosts the ClassBank menu and shows reports as modal dialogs.

mod app;
mod help;
mod input;
mod ui;

pub use app::App;

use crossterm::{
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use std::io;

/// Take over the terminal and run the menu loop until the user quits.
pub fn run(app: &mut App) -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    if let Err(e) = execute!(stdout, EnterAlternateScreen) {
        let _ = disable_raw_mode();
        return Err(e);
    }

    let result = Terminal::new(CrosstermBackend::new(stdout))
        .and_then(|mut terminal| {
            let res = input::run_app(&mut terminal, app);
            terminal.show_cursor()?;
            res
        });

    // Restore the terminal even when the loop failed.
    let restore = disable_raw_mode().and_then(|_| execute!(io::stdout(), LeaveAlternateScreen));
    result.and(restore)
}
