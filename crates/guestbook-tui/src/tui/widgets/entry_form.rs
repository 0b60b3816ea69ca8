// Entry form widget: the text input and the submit control next to it.

use ratatui::layout::{Alignment, Position};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::tui::layout::AppLayout;
use crate::tui::ViewState;

pub const SUBMIT_LABEL: &str = "Submit";

pub fn render(frame: &mut Frame, layout: &AppLayout, state: &ViewState) {
    let area = layout.input;
    let inner_width = area.width.saturating_sub(2) as usize;
    let visible = visible_tail(&state.input, inner_width.saturating_sub(1));

    let input = Paragraph::new(visible.to_string())
        .block(Block::default().borders(Borders::ALL).title("Your message"));
    frame.render_widget(input, area);

    if area.width > 2 && area.height > 2 {
        let cursor_x = area.x + 1 + visible.width() as u16;
        frame.set_cursor_position(Position::new(cursor_x, area.y + 1));
    }

    let button = Paragraph::new(SUBMIT_LABEL)
        .alignment(Alignment::Center)
        .style(
            Style::default()
                .fg(Color::Black)
                .bg(Color::Green)
                .add_modifier(Modifier::BOLD),
        )
        .block(Block::default().borders(Borders::ALL));
    frame.render_widget(button, layout.submit_button);
}

/// The longest suffix of `text` that fits in `width` terminal columns, so
/// the end being typed stays visible.
pub fn visible_tail(text: &str, width: usize) -> &str {
    let mut used = 0;
    let mut start = text.len();
    for (index, c) in text.char_indices().rev() {
        used += c.width().unwrap_or(0);
        if used > width {
            break;
        }
        start = index;
    }
    &text[start..]
}
