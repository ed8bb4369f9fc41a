//! Event handling for the TUI

use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use goalimpact_search::{Phase, Point};

use super::app::App;

/// Poll for events with timeout
pub fn poll_event(timeout: Duration) -> std::io::Result<Option<Event>> {
    if event::poll(timeout)? {
        Ok(Some(event::read()?))
    } else {
        Ok(None)
    }
}

/// Result of handling an event
#[derive(Debug, PartialEq, Eq)]
pub enum HandleResult {
    /// Continue running
    Continue,
    /// Quit the application
    Quit,
}

pub fn handle_event(app: &mut App, event: Event) -> HandleResult {
    match event {
        Event::Key(key) if key.kind == KeyEventKind::Press => handle_key(app, key),
        Event::Mouse(mouse) => {
            handle_mouse(app, mouse);
            HandleResult::Continue
        }
        _ => HandleResult::Continue,
    }
}

/// Handle a key event for the focused widget
pub fn handle_key(app: &mut App, key: KeyEvent) -> HandleResult {
    // Global quit shortcuts (Ctrl+C, Ctrl+Q)
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c') | KeyCode::Char('q') => HandleResult::Quit,
            KeyCode::Char('u') => {
                app.focused_widget().clear();
                HandleResult::Continue
            }
            KeyCode::Char('n') => {
                app.focused_widget().move_highlight(1);
                HandleResult::Continue
            }
            KeyCode::Char('p') => {
                app.focused_widget().move_highlight(-1);
                HandleResult::Continue
            }
            _ => HandleResult::Continue,
        };
    }

    match key.code {
        KeyCode::Char(c) => app.insert_char(c),
        KeyCode::Backspace => app.backspace(),
        KeyCode::Down => app.focused_widget().move_highlight(1),
        KeyCode::Up => app.focused_widget().move_highlight(-1),
        KeyCode::Enter => {
            let widget = app.focused_widget();
            if widget.select_highlighted().is_none() {
                let state = widget.state();
                if state.is_open && state.phase == Phase::Results {
                    widget.select(0);
                }
            }
        }
        KeyCode::Esc => app.focused_widget().dismiss(),
        KeyCode::Tab | KeyCode::BackTab => app.focus_next(),
        _ => {}
    }
    HandleResult::Continue
}

/// Offer a left press to every widget, then focus/select under the pointer
fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let point = Point::new(mouse.column, mouse.row);

    let mut hit = None;
    for (index, pane) in app.panes.iter().enumerate() {
        if pane.widget.pointer_down(point) {
            hit = Some(index);
        }
    }

    let Some(index) = hit else {
        return;
    };
    if index != app.focused {
        app.focus(index);
    } else {
        app.panes[index].widget.focus();
    }

    let pane = &app.panes[index];
    if let Some(result) = pane.current_result_at(mouse.column, mouse.row) {
        pane.widget.select(result);
    }
}
