//! UI rendering using ratatui

use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap},
    Frame,
};
use userdesk_core::view::{Body, FormView, RowView};
use userdesk_core::{project, Notice};

use super::app::{App, Focus};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Highlight color for selected items
const HIGHLIGHT: Color = Color::Yellow;
const SUCCESS: Color = Color::Green;
const DANGER: Color = Color::Red;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

/// Render the entire UI
pub fn render(frame: &mut Frame, app: &App) {
    let view = project(app.list.state());

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // Title
            Constraint::Min(5),    // Body
            Constraint::Length(1), // Status bar
        ])
        .split(frame.area());

    let title = Paragraph::new(Line::from(Span::styled(
        view.title,
        Style::default().fg(ACCENT).add_modifier(Modifier::BOLD),
    )))
    .block(Block::default().borders(Borders::ALL));
    frame.render_widget(title, chunks[0]);

    match &view.body {
        Body::Loading(text) => {
            let loading = Paragraph::new(Span::styled(*text, Style::default().fg(DIM)));
            frame.render_widget(loading, chunks[1]);
        }
        Body::Ready { form, rows } => {
            let body = Layout::default()
                .direction(Direction::Horizontal)
                .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
                .split(chunks[1]);
            render_form(frame, app, form, body[0]);
            render_list(frame, app, rows, body[1]);
        }
    }

    render_status_bar(frame, app, chunks[2]);

    if let Some(prompt) = view.confirm {
        render_confirm(frame, prompt);
    }
    if let Some(notice) = view.notice {
        render_notice(frame, notice);
    }
}

fn render_form(frame: &mut Frame, app: &App, form: &FormView<'_>, area: Rect) {
    let title = if form.editing { " Edit User " } else { " New User " };
    let form_focused = matches!(app.focus, Focus::Form(_));
    let block = Block::default()
        .title(title)
        .borders(Borders::ALL)
        .border_style(if form_focused {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(DIM)
        });
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
        ])
        .split(inner);

    for (i, input) in form.inputs.iter().enumerate() {
        let focused = app.focus == Focus::Form(input.field);
        let content = if focused {
            let at = input
                .value
                .char_indices()
                .nth(app.cursor)
                .map_or(input.value.len(), |(idx, _)| idx);
            Line::from(vec![
                Span::raw(&input.value[..at]),
                Span::styled("|", Style::default().fg(HIGHLIGHT)),
                Span::raw(&input.value[at..]),
            ])
        } else if input.value.is_empty() {
            Line::from(Span::styled(input.placeholder, Style::default().fg(DIM)))
        } else {
            Line::from(input.value)
        };

        let border = if focused { HIGHLIGHT } else { DIM };
        let field = Paragraph::new(content).block(
            Block::default()
                .title(format!(" {} ", input.placeholder))
                .borders(Borders::ALL)
                .border_style(Style::default().fg(border)),
        );
        frame.render_widget(field, rows[i]);
    }

    let button = Line::from(vec![
        Span::styled(
            format!("[ {} ]", form.submit_label),
            Style::default().fg(SUCCESS).add_modifier(Modifier::BOLD),
        ),
        Span::styled("  Enter", Style::default().fg(DIM)),
    ]);
    frame.render_widget(Paragraph::new(button), rows[3]);
}

fn render_list(frame: &mut Frame, app: &App, rows: &[RowView<'_>], area: Rect) {
    let block = Block::default()
        .title(format!(" Users ({}) ", rows.len()))
        .borders(Borders::ALL)
        .border_style(if app.focus == Focus::List {
            Style::default().fg(ACCENT)
        } else {
            Style::default().fg(DIM)
        });

    if rows.is_empty() {
        let empty = Paragraph::new(Span::styled("No users", Style::default().fg(DIM))).block(block);
        frame.render_widget(empty, area);
        return;
    }

    let items: Vec<ListItem> = rows
        .iter()
        .map(|row| {
            ListItem::new(Line::from(vec![
                Span::styled(format!("#{:<4}", row.id.0), Style::default().fg(DIM)),
                Span::styled(row.name, Style::default().add_modifier(Modifier::BOLD)),
                Span::raw("  "),
                Span::raw(row.email),
                Span::raw("  "),
                Span::styled(row.department, Style::default().fg(ACCENT)),
            ]))
        })
        .collect();

    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(HIGHLIGHT)
            .add_modifier(Modifier::BOLD),
    );
    let mut state = ListState::default().with_selected(Some(app.selected));
    frame.render_stateful_widget(list, area, &mut state);
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let (mode, help_text) = match app.focus {
        Focus::List => (
            Span::styled(" LIST ", Style::default().bg(ACCENT).fg(Color::Black)),
            "j/k:nav  e:edit  d:delete  Tab:form  Esc:cancel edit  q:quit",
        ),
        Focus::Form(_) => (
            Span::styled(" FORM ", Style::default().bg(SUCCESS).fg(Color::Black)),
            "Tab:next field  Enter:submit  Esc:list  Ctrl+C:quit",
        ),
    };

    let mut spans = vec![
        mode,
        Span::raw(" "),
        Span::styled(help_text, Style::default().fg(DIM)),
    ];
    if app.list.in_flight() > 0 {
        spans.push(Span::styled(
            format!("  {} pending", app.list.in_flight()),
            Style::default().fg(HIGHLIGHT),
        ));
    }
    spans.push(Span::styled(
        format!("  {}", app.endpoint),
        Style::default().fg(DIM),
    ));

    frame.render_widget(Paragraph::new(Line::from(spans)), area);
}

/// Fixed-size rectangle centered in the frame
fn popup_area(frame: &Frame, width: u16, height: u16) -> Rect {
    let area = frame.area();
    let width = width.min(area.width.saturating_sub(4));
    let height = height.min(area.height);
    Rect {
        x: (area.width.saturating_sub(width)) / 2,
        y: (area.height.saturating_sub(height)) / 2,
        width,
        height,
    }
}

fn render_confirm(frame: &mut Frame, prompt: &str) {
    let area = popup_area(frame, 50, 5);
    frame.render_widget(Clear, area);

    let text = vec![
        Line::from(prompt),
        Line::from(Span::styled("y: delete  any other key: cancel", Style::default().fg(DIM))),
    ];
    let dialog = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(" Confirm ")
            .title_style(Style::default().fg(DANGER).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(DANGER)),
    );
    frame.render_widget(dialog, area);
}

fn render_notice(frame: &mut Frame, notice: &Notice) {
    let area = popup_area(frame, 60, 5);
    frame.render_widget(Clear, area);

    let (title, color) = if notice.is_error() {
        (" Error ", DANGER)
    } else {
        (" Info ", SUCCESS)
    };
    let text = vec![
        Line::from(notice.text.as_str()),
        Line::from(Span::styled("press any key", Style::default().fg(DIM))),
    ];
    let popup = Paragraph::new(text).wrap(Wrap { trim: true }).block(
        Block::default()
            .title(title)
            .title_style(Style::default().fg(color).add_modifier(Modifier::BOLD))
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color)),
    );
    frame.render_widget(popup, area);
}
