//! Drawing the dashboard.
//!
//! [`render`] draws into a live frame; [`project`] draws the very same widget
//! tree into an off-screen buffer and returns it as text. Both only read the
//! [`App`], so identical state always gives identical output.
//!
//! ```text
//! ┌ Places ───────┐┌ Dashboard ─────────────────────┐
//! │> Home         ││Time: ...                        │
//! └───────────────┘│Host: ...                        │
//! ┌ Applications ─┐└─────────────────────────────────┘
//! │  LazyGit      │┌ Preview ───────────────────────┐
//! └───────────────┘│Category Preview: Widget         │
//! ┌ Shortcuts ────┐│                                 │
//! │  Keys: Tab    ││A widget                         │
//! └───────────────┘└─────────────────────────────────┘
//!  Tab Focus  Enter Open  a Add  o Shell  r Refresh  q Quit
//! ```

use crate::registry::{EntryTarget, Panel};
use crate::ui::app::{App, Mode, StatusLevel};
use crate::ui::form::{AddForm, FormField};
use ratatui::{
    buffer::{Buffer, Cell},
    layout::{Constraint, Direction, Layout, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{
        Block, Borders, Clear, List, ListItem, ListState, Paragraph, StatefulWidget, Widget, Wrap,
    },
    Frame,
};
use unicode_width::UnicodeWidthStr;

const BROWSE_HINTS: &str =
    " Tab Focus  ↑↓ Move  Enter Open  a Add  o Shell  r Refresh  Esc Clear  q Quit";
const FORM_HINTS: &str = " Tab Switch field  Enter Next/Save  Esc Cancel  Ctrl+C Quit";

pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();
    draw(app, area, frame.buffer_mut());
}

/// Render the dashboard to `height` lines, each exactly `width` columns
/// wide on screen.
pub fn project(app: &App, width: u16, height: u16) -> Vec<String> {
    if width == 0 {
        return vec![String::new(); usize::from(height)];
    }
    let area = Rect::new(0, 0, width, height);
    let mut buf = Buffer::empty(area);
    draw(app, area, &mut buf);
    buf.content
        .chunks(usize::from(width))
        .map(row_text)
        .collect()
}

/// Text of one buffer row. Cells hidden under a wide grapheme are skipped.
fn row_text(row: &[Cell]) -> String {
    let mut line = String::new();
    let mut hidden = 0;
    for cell in row {
        if hidden > 0 {
            hidden -= 1;
            continue;
        }
        let symbol = cell.symbol();
        line.push_str(symbol);
        hidden = symbol.width().saturating_sub(1);
    }
    line
}

fn draw(app: &App, area: Rect, buf: &mut Buffer) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
        .split(rows[0]);

    let panel_areas = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ])
        .split(columns[0]);
    for (panel, panel_area) in app.registry.panels().zip(panel_areas.iter()) {
        draw_panel(app, panel, *panel_area, buf);
    }

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(columns[1]);
    draw_dashboard(app, right[0], buf);
    draw_preview(app, right[1], buf);

    draw_footer(app, rows[1], buf);

    if let Mode::EditingNewEntry(form) = &app.mode {
        draw_form(app, form, area, buf);
    }
}

fn draw_panel(app: &App, panel: &Panel, area: Rect, buf: &mut Buffer) {
    let theme = &app.theme;
    let focused = app.focus.focused() == panel.id;

    let items: Vec<ListItem> = panel
        .entries
        .iter()
        .map(|entry| ListItem::new(entry.name.as_str()))
        .collect();

    let (border, highlight) = if focused {
        (
            theme.accent,
            Style::default()
                .fg(theme.bg)
                .bg(theme.accent)
                .add_modifier(Modifier::BOLD),
        )
    } else {
        (
            theme.fg_dim,
            Style::default().fg(theme.fg).add_modifier(Modifier::BOLD),
        )
    };

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(format!(" {} ", panel.id.title()))
                .border_style(Style::default().fg(border)),
        )
        .style(Style::default().fg(theme.fg))
        .highlight_style(highlight)
        .highlight_symbol("> ");

    let mut state = ListState::default();
    if !panel.is_empty() {
        state.select(Some(app.focus.cursor(panel.id)));
    }
    StatefulWidget::render(list, area, buf, &mut state);
}

fn draw_dashboard(app: &App, area: Rect, buf: &mut Buffer) {
    let theme = &app.theme;
    let label = Style::default().fg(theme.fg_dim);
    let snapshot = &app.dashboard;

    let mut lines = vec![
        Line::from(vec![Span::styled("Time: ", label), Span::raw(&snapshot.time)]),
        Line::from(vec![Span::styled("Host: ", label), Span::raw(&snapshot.host)]),
        Line::from(vec![Span::styled("Dir:  ", label), Span::raw(&snapshot.dir)]),
        Line::from(""),
    ];

    match app.selected_entry() {
        Some(entry) => {
            lines.push(Line::from(vec![
                Span::styled("Selected: ", label),
                Span::raw(&entry.name),
            ]));
            let target = match &entry.target {
                Some(EntryTarget::Command(command)) => format!("Cmd:  {command}"),
                Some(EntryTarget::Path(path)) => format!("Path: {}", path.display()),
                None => String::new(),
            };
            lines.push(Line::styled(target, label));
        }
        None => lines.push(Line::styled("Nothing selected. Use ↑/↓ to choose.", label)),
    }

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Dashboard ")
                .border_style(Style::default().fg(theme.fg_dim)),
        )
        .style(Style::default().fg(theme.fg))
        .render(area, buf);
}

fn draw_preview(app: &App, area: Rect, buf: &mut Buffer) {
    let theme = &app.theme;

    let lines = match &app.preview {
        Some(preview) => {
            let mut lines = vec![
                Line::styled(
                    preview.title.as_str(),
                    Style::default()
                        .fg(theme.title)
                        .add_modifier(Modifier::BOLD),
                ),
                Line::from(""),
            ];
            lines.extend(preview.body.lines().map(Line::from));
            lines
        }
        None => vec![
            Line::from("Press Enter to preview a place or shortcut,"),
            Line::from("or to launch an application."),
        ],
    };

    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Preview ")
                .border_style(Style::default().fg(theme.fg_dim)),
        )
        .style(Style::default().fg(theme.fg))
        .wrap(Wrap { trim: true })
        .render(area, buf);
}

fn draw_footer(app: &App, area: Rect, buf: &mut Buffer) {
    let theme = &app.theme;
    let line = match &app.status {
        Some(status) => {
            let color = match status.level {
                StatusLevel::Info => theme.success,
                StatusLevel::Error => theme.error,
            };
            Line::styled(format!(" {}", status.text), Style::default().fg(color))
        }
        None if app.is_editing() => Line::styled(FORM_HINTS, Style::default().fg(theme.fg_dim)),
        None => Line::styled(BROWSE_HINTS, Style::default().fg(theme.fg_dim)),
    };
    Paragraph::new(line).render(area, buf);
}

fn draw_form(app: &App, form: &AddForm, area: Rect, buf: &mut Buffer) {
    let theme = &app.theme;
    let popup = centered_rect(64, 9, area);

    let field = |label: &str, value: &str, active: bool| {
        let style = if active {
            Style::default()
                .fg(theme.title)
                .add_modifier(Modifier::BOLD)
        } else {
            Style::default().fg(theme.fg)
        };
        let cursor = if active { "_" } else { "" };
        Line::from(vec![
            Span::styled(format!("{label:<9}"), Style::default().fg(theme.fg_dim)),
            Span::styled(format!("{value}{cursor}"), style),
        ])
    };

    let lines = vec![
        Line::from("Enter details below."),
        Line::styled(
            "Enter on Command saves. Esc cancels.",
            Style::default().fg(theme.fg_dim),
        ),
        Line::from(""),
        field("Name", &form.name, form.field == FormField::Name),
        Line::from(""),
        field("Command", &form.command, form.field == FormField::Command),
    ];

    Clear.render(popup, buf);
    Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .title(" Add Application ")
                .border_style(Style::default().fg(theme.accent)),
        )
        .style(Style::default().fg(theme.fg).bg(theme.bg))
        .render(popup, buf);
}

/// A `width` x `height` rectangle centred in `area`, shrunk to fit.
fn centered_rect(width: u16, height: u16, area: Rect) -> Rect {
    let width = width.min(area.width);
    let height = height.min(area.height);
    Rect::new(
        area.x + (area.width - width) / 2,
        area.y + (area.height - height) / 2,
        width,
        height,
    )
}
