//! UI rendering

use super::app::{Alert, App};
use super::help::{get_about_help, get_help_text};
use ratatui::{
    Frame,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
};

pub(crate) const TITLE_BAR_HEIGHT: u16 = 1;
pub(crate) const BODY_MIN_HEIGHT: u16 = 8;
pub(crate) const STATUS_BAR_HEIGHT: u16 = 1;
pub(crate) const MENU_WIDTH_PERCENT: u16 = 40;

pub(crate) fn split_main_chunks(area: Rect) -> [Rect; 3] {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(TITLE_BAR_HEIGHT),
            Constraint::Min(BODY_MIN_HEIGHT),
            Constraint::Length(STATUS_BAR_HEIGHT),
        ])
        .split(area);
    [chunks[0], chunks[1], chunks[2]]
}

/// Draw the application UI
pub fn draw(f: &mut Frame, app: &App) {
    let [title_area, body_area, status_area] = split_main_chunks(f.area());
    let body = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage(MENU_WIDTH_PERCENT),
            Constraint::Percentage(100 - MENU_WIDTH_PERCENT),
        ])
        .split(body_area);

    draw_title_bar(f, app, title_area);
    draw_menu(f, app, body[0]);
    draw_sheets(f, app, body[1]);
    draw_status_bar(f, app, status_area);

    if let Some(alert) = &app.alert {
        draw_alert_modal(f, alert);
    }

    if app.help_modal {
        draw_help_modal(f);
    }
}

fn draw_title_bar(f: &mut Frame, app: &App, area: Rect) {
    let line = Line::from(vec![
        Span::styled(
            " ClassBank ",
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        ),
        Span::raw(format!(" workbook: {}", app.workbook.id())),
    ]);
    f.render_widget(Paragraph::new(line), area);
}

fn draw_menu(f: &mut Frame, app: &App, area: Rect) {
    let title = app
        .menus
        .first()
        .map_or(" Menu ".to_string(), |menu| format!(" {} ", menu.title));

    let items: Vec<ListItem> = app
        .menu_items()
        .enumerate()
        .map(|(idx, item)| ListItem::new(format!("{}. {}", idx + 1, item.label)))
        .collect();

    let list = List::new(items)
        .block(Block::default().borders(Borders::ALL).title(title))
        .highlight_style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Cyan)
                .add_modifier(Modifier::BOLD),
        )
        .highlight_symbol("> ");

    let mut state = ListState::default().with_selected(Some(app.selected));
    f.render_stateful_widget(list, area, &mut state);
}

/// Tabs of the open workbook with their data-row counts and header colour.
fn draw_sheets(f: &mut Frame, app: &App, area: Rect) {
    let header = Row::new(vec!["Sheet", "Data rows", "Header"]).style(
        Style::default()
            .fg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let rows: Vec<Row> = app
        .workbook
        .sheets()
        .iter()
        .map(|sheet| {
            let header_cell = match sheet.header_format() {
                Some(format) => {
                    let bg = format.background;
                    let mut style = Style::default()
                        .fg(Color::Black)
                        .bg(Color::Rgb(bg.r, bg.g, bg.b));
                    if format.bold {
                        style = style.add_modifier(Modifier::BOLD);
                    }
                    Cell::from(bg.to_string()).style(style)
                }
                None => Cell::from("-"),
            };
            Row::new(vec![
                Cell::from(sheet.name().to_string()),
                Cell::from(sheet.data_row_count().to_string()),
                header_cell,
            ])
        })
        .collect();

    let block = Block::default().borders(Borders::ALL).title(" Sheets ");
    if rows.is_empty() {
        let empty = Paragraph::new("No sheets. Run \"Create missing sheets\".").block(block);
        f.render_widget(empty, area);
        return;
    }

    let table = Table::new(
        rows,
        [
            Constraint::Min(14),
            Constraint::Length(10),
            Constraint::Length(9),
        ],
    )
    .header(header)
    .block(block)
    .column_spacing(1);
    f.render_widget(table, area);
}

fn draw_status_bar(f: &mut Frame, app: &App, area: Rect) {
    let help = "j/k:move  Enter:run  s:scan  ?:help  q:quit";

    let status = if !app.status_message.is_empty() {
        format!("{}  |  {}", app.status_message, help)
    } else {
        help.to_string()
    };

    let style = if app.status_message.contains("failed") {
        Style::default().fg(Color::Red)
    } else if !app.status_message.is_empty() {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::DarkGray)
    };

    f.render_widget(Paragraph::new(Line::from(Span::styled(status, style))), area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}

/// Style for one report line: status tags and warnings stand out.
fn report_line_style(text: &str) -> Style {
    if text.starts_with("[OK]") || text.starts_with("All sheets") {
        Style::default().fg(Color::Green)
    } else if text.starts_with("[MISSING]")
        || text.starts_with("[MISMATCH]")
        || text.starts_with("Warning")
    {
        Style::default().fg(Color::Red).add_modifier(Modifier::BOLD)
    } else if text.starts_with("[EMPTY]") {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

fn draw_alert_modal(f: &mut Frame, alert: &Alert) {
    let area = centered_rect(70, 70, f.area());
    let modal_style = Style::default().fg(Color::White).bg(Color::Black);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(format!(" {} ", alert.title))
        .title_bottom(" Enter/Esc: close ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(modal_style);

    let lines: Vec<Line> = alert
        .lines
        .iter()
        .map(|text| Line::from(Span::styled(text.clone(), report_line_style(text))))
        .collect();

    let scroll_y = u16::try_from(alert.scroll).unwrap_or(u16::MAX);
    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(modal_style)
        .scroll((scroll_y, 0))
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

fn draw_help_modal(f: &mut Frame) {
    let area = centered_rect(60, 60, f.area());
    let modal_style = Style::default().fg(Color::White).bg(Color::Black);

    let block = Block::default()
        .borders(Borders::ALL)
        .title(" About ClassBank ")
        .border_style(Style::default().fg(Color::Green))
        .style(modal_style);

    let mut lines: Vec<Line> = Vec::new();
    for text in get_about_help().into_iter().chain(get_help_text()) {
        let style = if text.starts_with("  ") || text.is_empty() {
            Style::default().fg(Color::White)
        } else {
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD)
        };
        lines.push(Line::from(Span::styled(text, style)));
    }

    let paragraph = Paragraph::new(lines)
        .block(block)
        .style(modal_style)
        .wrap(Wrap { trim: false });

    f.render_widget(Clear, area);
    f.render_widget(paragraph, area);
}

#[cfg(test)]
mod tests {
    use super::*;
    use classbank_core::menu::on_open;
    use classbank_core::{HeaderPalette, Workbook};
    use ratatui::{Terminal, backend::TestBackend};
    use std::path::PathBuf;

    fn rendered(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        terminal.draw(|f| draw(f, app)).unwrap();
        let buffer = terminal.backend().buffer();
        let width = buffer.area.width as usize;
        buffer
            .content
            .chunks(width)
            .map(|row| row.iter().map(|cell| cell.symbol()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn app_with_menu() -> App {
        let mut app = App::new(
            Workbook::new("classbank"),
            PathBuf::from("."),
            HeaderPalette::default(),
        );
        on_open(&mut app);
        app
    }

    #[test]
    fn split_main_chunks_fills_area() {
        let [title, body, status] = split_main_chunks(Rect::new(0, 0, 80, 24));
        assert_eq!(title.height, TITLE_BAR_HEIGHT);
        assert_eq!(status.height, STATUS_BAR_HEIGHT);
        assert_eq!(title.height + body.height + status.height, 24);
    }

    #[test]
    fn centered_rect_is_inside_area() {
        let area = Rect::new(0, 0, 100, 40);
        let popup = centered_rect(70, 70, area);
        assert!(popup.x > 0 && popup.y > 0);
        assert!(popup.right() <= area.right() && popup.bottom() <= area.bottom());
    }

    #[test]
    fn menu_items_are_drawn() {
        let screen = rendered(&app_with_menu());
        assert!(screen.contains("ClassBank Tools"));
        assert!(screen.contains("1. Verify sheet structure"));
        assert!(screen.contains("3. Create missing sheets"));
        assert!(screen.contains("No sheets."));
    }

    #[test]
    fn alert_modal_is_drawn_over_menu() {
        let mut app = app_with_menu();
        app.run(classbank_core::Operation::ReportData);
        let screen = rendered(&app);
        assert!(screen.contains("Data Report"));
        assert!(screen.contains("Total:"));
    }

    #[test]
    fn report_line_styles() {
        assert_eq!(report_line_style("[OK]       Students: 0 data rows").fg, Some(Color::Green));
        assert_eq!(report_line_style("[MISSING]  Health: sheet not found").fg, Some(Color::Red));
        assert_eq!(report_line_style("Deposit:     2").fg, Some(Color::White));
    }
}
