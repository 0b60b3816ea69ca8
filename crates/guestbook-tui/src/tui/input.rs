// Keyboard and mouse input handling.
//
// Translates crossterm events into `UserCommand`s for the TUI loop, or into
// local `ViewState` edits (typing, scrolling). A submit key or click is
// consumed here and has no other effect.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use guestbook_core::surface::SubmitTrigger;
use ratatui::layout::Position;

use super::layout::AppLayout;
use super::ViewState;
use crate::protocol::UserCommand;

/// Rows moved by PageUp/PageDown.
const PAGE_SIZE: usize = 10;

/// Handle a keyboard event.
///
/// Returns `Some(UserCommand)` for submit and quit. Everything else edits
/// `ViewState` in place and returns `None`.
pub fn handle_key(key_event: KeyEvent, view_state: &mut ViewState) -> Option<UserCommand> {
    // Only process key press events. On Windows, crossterm emits both
    // Press and Release events for each physical keypress.
    if key_event.kind != KeyEventKind::Press {
        return None;
    }

    if key_event.modifiers.contains(KeyModifiers::CONTROL) {
        return match key_event.code {
            KeyCode::Char('c') => Some(UserCommand::Quit),
            // Ctrl+U clears the input, like a shell line editor.
            KeyCode::Char('u') => {
                view_state.input.clear();
                None
            }
            _ => None,
        };
    }

    match key_event.code {
        KeyCode::Esc => Some(UserCommand::Quit),
        KeyCode::Enter => Some(UserCommand::Submit(SubmitTrigger::Enter)),

        KeyCode::Backspace => {
            view_state.input.pop();
            None
        }
        KeyCode::Char(c) if !key_event.modifiers.contains(KeyModifiers::ALT) => {
            view_state.input.push(c);
            None
        }

        KeyCode::Up => {
            scroll_up(view_state, 1);
            None
        }
        KeyCode::Down => {
            scroll_down(view_state, 1);
            None
        }
        KeyCode::PageUp => {
            scroll_up(view_state, PAGE_SIZE);
            None
        }
        KeyCode::PageDown => {
            scroll_down(view_state, PAGE_SIZE);
            None
        }
        KeyCode::Home => {
            view_state.scroll_offset = 0;
            None
        }
        KeyCode::End => {
            view_state.scroll_offset = max_offset(view_state);
            None
        }

        _ => None,
    }
}

/// Handle a mouse event. A left click inside the submit control submits;
/// the wheel scrolls the entry list.
pub fn handle_mouse(
    mouse_event: MouseEvent,
    view_state: &mut ViewState,
    layout: &AppLayout,
) -> Option<UserCommand> {
    let position = Position::new(mouse_event.column, mouse_event.row);
    match mouse_event.kind {
        MouseEventKind::Down(MouseButton::Left) if layout.submit_button.contains(position) => {
            Some(UserCommand::Submit(SubmitTrigger::Click))
        }
        MouseEventKind::ScrollUp if layout.entries.contains(position) => {
            scroll_up(view_state, 1);
            None
        }
        MouseEventKind::ScrollDown if layout.entries.contains(position) => {
            scroll_down(view_state, 1);
            None
        }
        _ => None,
    }
}

fn max_offset(view_state: &ViewState) -> usize {
    view_state.entries.len().saturating_sub(1)
}

fn scroll_up(view_state: &mut ViewState, amount: usize) {
    view_state.scroll_offset = view_state.scroll_offset.saturating_sub(amount);
}

/// The renderer clamps further so the last page stays full.
fn scroll_down(view_state: &mut ViewState, amount: usize) {
    view_state.scroll_offset = view_state
        .scroll_offset
        .saturating_add(amount)
        .min(max_offset(view_state));
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
