// Header widget: title, host address, and time of the last list update.

use ratatui::layout::Rect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Paragraph};
use ratatui::Frame;

use crate::tui::ViewState;

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let paragraph = Paragraph::new(header_line(state)).block(
        Block::default()
            .borders(Borders::ALL)
            .title(Span::styled(
                " Guestbook ",
                Style::default().add_modifier(Modifier::BOLD),
            )),
    );
    frame.render_widget(paragraph, area);
}

/// "Host: <address>  updated HH:MM:SS"
pub fn header_line(state: &ViewState) -> Line<'static> {
    let address = state.host_address.clone().unwrap_or_else(|| "--".to_string());
    let mut spans = vec![
        Span::styled(" Host: ", Style::default().fg(Color::Gray)),
        Span::styled(address, Style::default().fg(Color::Cyan)),
    ];

    if let Some(updated) = state.last_update {
        spans.push(Span::styled(
            format!("  updated {}", updated.format("%H:%M:%S")),
            Style::default().fg(Color::DarkGray),
        ));
    }

    Line::from(spans)
}
