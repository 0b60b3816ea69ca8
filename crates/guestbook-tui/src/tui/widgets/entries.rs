// Entry list widget: one row per displayed node, in list order.
//
// Pending placeholders are dimmed. The list scrolls with the view state's
// offset, clamped so the last page stays full.

use ratatui::layout::{Margin, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{
    Block, Borders, List, ListItem, Paragraph, Scrollbar, ScrollbarOrientation, ScrollbarState,
};
use ratatui::Frame;

use crate::tui::{EntryNode, ViewState};

pub fn render(frame: &mut Frame, area: Rect, state: &ViewState) {
    let title = format!("Entries ({})", state.entries.len());

    if state.entries.is_empty() {
        let paragraph = Paragraph::new("  No entries yet.")
            .style(Style::default().fg(Color::DarkGray))
            .block(Block::default().borders(Borders::ALL).title(title));
        frame.render_widget(paragraph, area);
        return;
    }

    // Visible row count: subtract 2 for borders
    let visible_rows = (area.height as usize).saturating_sub(2);
    let offset = clamp_offset(state.scroll_offset, state.entries.len(), visible_rows);

    let items: Vec<ListItem> = visible_nodes(&state.entries, offset, visible_rows)
        .iter()
        .map(node_item)
        .collect();

    let list = List::new(items).block(Block::default().borders(Borders::ALL).title(title));
    frame.render_widget(list, area);

    if state.entries.len() > visible_rows {
        let mut scrollbar_state = ScrollbarState::new(state.entries.len()).position(offset);
        frame.render_stateful_widget(
            Scrollbar::new(ScrollbarOrientation::VerticalRight),
            area.inner(Margin {
                vertical: 1,
                horizontal: 0,
            }),
            &mut scrollbar_state,
        );
    }
}

/// Largest useful offset: the one that shows the last `visible_rows` nodes.
pub fn clamp_offset(offset: usize, total: usize, visible_rows: usize) -> usize {
    offset.min(total.saturating_sub(visible_rows))
}

/// The nodes that fit on screen starting at `offset`.
pub fn visible_nodes(nodes: &[EntryNode], offset: usize, visible_rows: usize) -> &[EntryNode] {
    let start = offset.min(nodes.len());
    let end = (start + visible_rows).min(nodes.len());
    &nodes[start..end]
}

fn node_item(node: &EntryNode) -> ListItem<'static> {
    match node {
        EntryNode::Stored(entry) => ListItem::new(format!(" {}", entry.as_str())),
        EntryNode::Pending(marker) => ListItem::new(format!(" {marker}")).style(
            Style::default()
                .fg(Color::DarkGray)
                .add_modifier(Modifier::ITALIC),
        ),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
