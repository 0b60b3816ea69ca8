// Screen layout: panel arrangement and sizing.
//
// +--------------------------------------------------+
// | Header: title + host address (3 rows)            |
// +--------------------------------------------------+
// | Entries (fill)                                   |
// +--------------------------------------+-----------+
// | Input (3 rows)                       | Submit    |
// +--------------------------------------+-----------+
// | Help Bar (1 row)                                 |
// +--------------------------------------------------+

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Width of the submit control, borders included.
pub const SUBMIT_BUTTON_WIDTH: u16 = 12;

/// Resolved screen areas for each zone.
#[derive(Debug, Clone)]
pub struct AppLayout {
    pub header: Rect,
    pub entries: Rect,
    pub input: Rect,
    /// Clickable submit control to the right of the input.
    pub submit_button: Rect,
    pub help_bar: Rect,
}

/// Build the layout from the available terminal area.
pub fn build_layout(area: Rect) -> AppLayout {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3), // header
            Constraint::Min(3),    // entries
            Constraint::Length(3), // input row
            Constraint::Length(1), // help bar
        ])
        .split(area);

    let header = vertical[0];
    let entries = vertical[1];
    let input_row = vertical[2];
    let help_bar = vertical[3];

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Min(10),
            Constraint::Length(SUBMIT_BUTTON_WIDTH),
        ])
        .split(input_row);

    AppLayout {
        header,
        entries,
        input: horizontal[0],
        submit_button: horizontal[1],
        help_bar,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
