use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::prelude::*;
use std::io;

use super::app::App;
use super::ui;
use classbank_core::Operation;

pub fn run_app<B: Backend>(terminal: &mut Terminal<B>, app: &mut App) -> io::Result<()> {
    loop {
        terminal.draw(|f| ui::draw(f, app))?;

        if let Event::Key(key) = event::read()? {
            // Only process key press events (Windows reports Press + Release)
            if key.kind != KeyEventKind::Press {
                continue;
            }
            handle_key(app, key);
            if app.should_quit {
                return Ok(());
            }
        }
    }
}

pub fn handle_key(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    // Report dialog takes over input
    if app.alert.is_some() {
        match key.code {
            KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q') => app.close_alert(),
            KeyCode::Down | KeyCode::Char('j') => app.scroll_alert_by(1),
            KeyCode::Up | KeyCode::Char('k') => app.scroll_alert_by(-1),
            KeyCode::PageDown => app.scroll_alert_by(10),
            KeyCode::PageUp => app.scroll_alert_by(-10),
            _ => {}
        }
        return;
    }

    // Help modal takes over input
    if app.help_modal {
        if matches!(key.code, KeyCode::Esc | KeyCode::Enter | KeyCode::Char('q' | '?')) {
            app.close_help_modal();
        }
        return;
    }

    match key.code {
        KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,
        KeyCode::Down | KeyCode::Char('j') | KeyCode::Tab => app.select_next(),
        KeyCode::Up | KeyCode::Char('k') | KeyCode::BackTab => app.select_prev(),
        KeyCode::Enter => app.activate_selected(),
        KeyCode::Char('s') => app.run(Operation::ScanMixedData),
        KeyCode::Char('?') => app.open_help_modal(),
        KeyCode::Char(c @ '1'..='9') => {
            let idx = c as usize - '1' as usize;
            if idx < app.item_count() {
                app.selected = idx;
                app.activate_selected();
            }
        }
        _ => {}
    }
}
