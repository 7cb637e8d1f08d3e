//! UI rendering using ratatui

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, List, ListItem, ListState, Paragraph, Row, Table, Wrap},
    Frame,
};

use chrono::{DateTime, Utc};

use super::app::{App, Focus};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Highlight color for the selected row
const HIGHLIGHT: Color = Color::Yellow;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);
/// Alert border color
const ALERT: Color = Color::Red;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Blank for rows stored without a timestamp
fn timestamp(at: Option<DateTime<Utc>>) -> String {
    at.map(|at| at.format(TIMESTAMP_FORMAT).to_string())
        .unwrap_or_default()
}

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Heading + status
            Constraint::Length(3), // Todo title input
            Constraint::Min(5),    // Todo list
            Constraint::Length(3), // Contact inputs
            Constraint::Min(5),    // Contact table
            Constraint::Length(1), // Key hints
        ])
        .split(frame.area());

    render_header(frame, app, chunks[0]);
    render_input(frame, "New todo title", &app.title, app.focus == Focus::TitleInput, chunks[1]);
    render_todos(frame, app, chunks[2]);

    let contact_inputs = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(chunks[3]);
    render_input(frame, "Name", &app.name, app.focus == Focus::NameInput, contact_inputs[0]);
    render_input(frame, "Email", &app.email, app.focus == Focus::EmailInput, contact_inputs[1]);
    render_contacts(frame, app, chunks[4]);

    render_hints(frame, app, chunks[5]);

    if let Some(message) = &app.alert {
        render_alert(frame, message);
    }
}

fn render_header(frame: &mut Frame, app: &App, area: Rect) {
    let lines = vec![
        Line::from(Span::styled(
            "Tasklist",
            Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::raw(app.status.as_str())),
    ];
    frame.render_widget(Paragraph::new(lines), area);
}

fn focus_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(ACCENT)
    } else {
        Style::default().fg(DIM)
    }
}

fn render_input(frame: &mut Frame, label: &str, value: &str, focused: bool, area: Rect) {
    let block = Block::default()
        .title(format!(" {label} "))
        .borders(Borders::ALL)
        .border_style(focus_style(focused));

    let text = if value.is_empty() && !focused {
        Span::styled(label, Style::default().fg(DIM))
    } else {
        Span::raw(value)
    };
    frame.render_widget(Paragraph::new(Line::from(text)).block(block), area);

    if focused {
        frame.set_cursor_position(cursor_position(area, value));
    }
}

/// Cursor after the last character, clamped inside the border
fn cursor_position(area: Rect, value: &str) -> (u16, u16) {
    let typed = u16::try_from(value.chars().count()).unwrap_or(u16::MAX);
    let x = area.x.saturating_add(1).saturating_add(typed);
    let last = area.right().saturating_sub(2).max(area.x);
    (x.min(last), area.y.saturating_add(1))
}

fn render_todos(frame: &mut Frame, app: &App, area: Rect) {
    let focused = app.focus == Focus::TodoList;
    let block = Block::default()
        .title(format!(" Todos ({}) ", app.todos.len()))
        .borders(Borders::ALL)
        .border_style(focus_style(focused));

    let items: Vec<ListItem> = app
        .todos
        .iter()
        .map(|todo| {
            let (mark, title_style) = if todo.completed {
                ("[x] ", Style::default().fg(DIM).add_modifier(Modifier::CROSSED_OUT))
            } else {
                ("[ ] ", Style::default())
            };
            ListItem::new(Line::from(vec![
                Span::raw(mark),
                Span::styled(todo.title.as_str(), title_style),
                Span::styled(
                    format!("  {}", timestamp(todo.created_at)),
                    Style::default().fg(DIM),
                ),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(if focused {
        Style::default()
            .fg(Color::Black)
            .bg(HIGHLIGHT)
            .add_modifier(Modifier::BOLD)
    } else {
        Style::default()
    });

    let mut state = ListState::default();
    if !app.todos.is_empty() {
        state.select(Some(app.selected));
    }
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_contacts(frame: &mut Frame, app: &App, area: Rect) {
    let block = Block::default()
        .title(format!(" Contacts ({}) ", app.contacts.len()))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(DIM));

    let header = Row::new(["Name", "Email", "Created"])
        .style(Style::default().fg(ACCENT).add_modifier(Modifier::BOLD));

    let rows = app.contacts.iter().map(|contact| {
        Row::new([
            Cell::from(contact.name.as_str()),
            Cell::from(contact.email.as_str()),
            Cell::from(timestamp(contact.created_at)),
        ])
    });

    let table = Table::new(
        rows,
        [
            Constraint::Percentage(30),
            Constraint::Percentage(40),
            Constraint::Percentage(30),
        ],
    )
    .header(header)
    .block(block);

    frame.render_widget(table, area);
}

fn render_hints(frame: &mut Frame, app: &App, area: Rect) {
    let hint = match app.focus {
        Focus::TodoList => "j/k move  enter toggle  d delete  a add  tab next  q quit",
        Focus::TitleInput => "enter add  esc list  tab next  ctrl+c quit",
        Focus::NameInput => "enter next field  tab next  ctrl+c quit",
        Focus::EmailInput => "enter save contact  tab next  ctrl+c quit",
    };
    frame.render_widget(
        Paragraph::new(Span::styled(hint, Style::default().fg(DIM))),
        area,
    );
}

/// Centered modal; any key dismisses it
fn render_alert(frame: &mut Frame, message: &str) {
    let area = frame.area();
    let width = 50.min(area.width.saturating_sub(4));
    let height = 5.min(area.height);

    let popup_area = Rect {
        x: area.width.saturating_sub(width) / 2,
        y: area.height.saturating_sub(height) / 2,
        width,
        height,
    };

    frame.render_widget(Clear, popup_area);

    let block = Block::default()
        .title(" Alert ")
        .title_style(Style::default().fg(ALERT).add_modifier(Modifier::BOLD))
        .borders(Borders::ALL)
        .border_style(Style::default().fg(ALERT));

    let text = vec![
        Line::from(message),
        Line::from(Span::styled("press any key", Style::default().fg(DIM))),
    ];
    frame.render_widget(
        Paragraph::new(text).block(block).wrap(Wrap { trim: true }),
        popup_area,
    );
}
