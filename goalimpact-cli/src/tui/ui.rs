//! UI rendering using ratatui

use goalimpact_search::{Phase, WidgetState};
use ratatui::{
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use super::app::{dropdown_rows, to_bounds, App, DropdownRow};

/// Primary accent color
const ACCENT: Color = Color::Cyan;
/// Secondary color for less important elements
const SECONDARY: Color = Color::DarkGray;
/// Highlight color for selected items
const HIGHLIGHT: Color = Color::Yellow;
/// Dim text color
const DIM: Color = Color::Rgb(100, 100, 100);

/// Render the entire UI and record where each widget was drawn
pub fn render(frame: &mut Frame, app: &mut App) {
    let area = frame.area();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Min(4),    // Panes
            Constraint::Length(1), // Status bar
        ])
        .split(area);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints(vec![Constraint::Ratio(1, app.panes.len() as u32); app.panes.len()])
        .split(chunks[0]);

    for index in 0..app.panes.len() {
        render_pane(frame, app, index, columns[index]);
    }

    render_status_bar(frame, app, chunks[1]);
}

fn render_pane(frame: &mut Frame, app: &mut App, index: usize, area: Rect) {
    let focused = index == app.focused;
    let pane = &mut app.panes[index];
    let state = pane.widget.state();

    let input_area = Rect {
        height: area.height.min(3),
        ..area
    };
    render_input(frame, &pane.title, &state, focused, input_area);

    let rows = dropdown_rows(&state);
    let below = area.height.saturating_sub(input_area.height);
    let dropdown_area = (!rows.is_empty() && below > 2).then(|| Rect {
        x: area.x,
        y: input_area.y + input_area.height,
        width: area.width,
        height: below.min(rows.len() as u16 + 2),
    });

    let mut inner = None;
    if let Some(dropdown_area) = dropdown_area {
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(SECONDARY));
        let dropdown_inner = block.inner(dropdown_area);
        frame.render_widget(Clear, dropdown_area);
        frame.render_widget(block, dropdown_area);

        let lines: Vec<Line> = rows
            .iter()
            .take(usize::from(dropdown_inner.height))
            .map(|row| row_line(row, &state))
            .collect();
        frame.render_widget(Paragraph::new(lines), dropdown_inner);
        inner = Some(dropdown_inner);
    }

    pane.widget
        .set_layout(Some(to_bounds(input_area)), dropdown_area.map(to_bounds));
    pane.dropdown_inner = inner;
    pane.rows = rows;
    pane.drawn_results = state.results;
}

fn render_input(frame: &mut Frame, title: &str, state: &WidgetState, focused: bool, area: Rect) {
    let border = if focused { ACCENT } else { SECONDARY };
    let indicator = match state.phase {
        Phase::Debouncing | Phase::Loading => " …",
        _ => "",
    };

    let mut spans = vec![Span::raw(state.query.clone())];
    if focused {
        spans.push(Span::styled("▏", Style::default().fg(ACCENT)));
    }
    if state.query.is_empty() && !focused {
        spans = vec![Span::styled(
            "Search players, clubs, leagues, nations",
            Style::default().fg(DIM),
        )];
    }

    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::default().fg(border))
        .title(format!(" {}{} ", title, indicator));
    frame.render_widget(Paragraph::new(Line::from(spans)).block(block), area);
}

fn row_line(row: &DropdownRow, state: &WidgetState) -> Line<'static> {
    match row {
        DropdownRow::Header(kind) => Line::from(Span::styled(
            kind.group_label(),
            Style::default().fg(DIM).add_modifier(Modifier::BOLD),
        )),
        DropdownRow::Message(msg) => Line::from(Span::styled(*msg, Style::default().fg(DIM))),
        DropdownRow::Result(index) => {
            let name = state
                .results
                .get(*index)
                .map(|r| r.name.clone())
                .unwrap_or_default();
            if state.highlighted == Some(*index) {
                Line::from(Span::styled(
                    format!("▸ {}", name),
                    Style::default().fg(HIGHLIGHT).add_modifier(Modifier::BOLD),
                ))
            } else {
                Line::from(format!("  {}", name))
            }
        }
    }
}

fn render_status_bar(frame: &mut Frame, app: &App, area: Rect) {
    let help_text = if app.panes.len() > 1 {
        "type:search  ↑/↓:nav  Enter:open  Esc:close  Tab:switch  Ctrl+C:quit"
    } else {
        "type:search  ↑/↓:nav  Enter:open  Esc:close  Ctrl+U:clear  Ctrl+C:quit"
    };
    let status = app.status_message.as_deref().unwrap_or("");

    let line = Line::from(vec![
        Span::styled(" GOAL IMPACT ", Style::default().bg(ACCENT).fg(Color::Black)),
        Span::raw(" "),
        Span::styled(help_text, Style::default().fg(DIM)),
        Span::raw(" "),
        Span::styled(status.to_string(), Style::default().fg(HIGHLIGHT)),
    ]);

    frame.render_widget(Paragraph::new(line), area);
}
