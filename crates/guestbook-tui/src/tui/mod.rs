// TUI: layout, input handling, and widget rendering.
//
// The TUI owns a `ViewState` that holds everything on screen. Client tasks
// push `UiUpdate` messages over an mpsc channel; the TUI applies them to
// `ViewState` in arrival order and re-renders at ~30 fps.

pub mod input;
pub mod layout;
pub mod widgets;

use std::panic::PanicHookInfo;
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Local};
use crossterm::event::{DisableMouseCapture, EnableMouseCapture, Event, EventStream};
use futures_util::StreamExt;
use guestbook_core::client::GuestbookClient;
use guestbook_core::entry::Entry;
use guestbook_core::surface::{HostDisplay, InputSource};
use ratatui::layout::Rect;
use ratatui::{DefaultTerminal, Frame};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::protocol::{UiUpdate, UserCommand};

use layout::build_layout;

// ---------------------------------------------------------------------------
// ViewState
// ---------------------------------------------------------------------------

/// One rendered row of the entry list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryNode {
    Stored(Entry),
    /// Stand-in for a submission that has not been answered yet.
    Pending(String),
}

impl EntryNode {
    pub fn text(&self) -> &str {
        match self {
            EntryNode::Stored(entry) => entry.as_str(),
            EntryNode::Pending(marker) => marker,
        }
    }
}

/// TUI-local state read by `render_frame`.
#[derive(Debug, Default)]
pub struct ViewState {
    /// Displayed rows, in order.
    pub entries: Vec<EntryNode>,
    /// Current contents of the text input.
    pub input: String,
    /// Written once at startup.
    pub host_address: Option<String>,
    /// When the entry list was last replaced from a backend response.
    pub last_update: Option<DateTime<Local>>,
    /// First visible row of the entry list.
    pub scroll_offset: usize,
}

impl ViewState {
    /// Replace every row with `entries`.
    pub fn replace_entries(&mut self, entries: Vec<Entry>) {
        self.entries = entries.into_iter().map(EntryNode::Stored).collect();
        self.last_update = Some(Local::now());
    }

    pub fn push_placeholder(&mut self, marker: String) {
        self.entries.push(EntryNode::Pending(marker));
    }

    pub fn pending_count(&self) -> usize {
        self.entries
            .iter()
            .filter(|node| matches!(node, EntryNode::Pending(_)))
            .count()
    }
}

impl InputSource for ViewState {
    fn text(&self) -> &str {
        &self.input
    }

    fn clear(&mut self) {
        self.input.clear();
    }
}

impl HostDisplay for ViewState {
    fn set_host_address(&mut self, address: &str) {
        self.host_address = Some(address.to_string());
    }
}

// ---------------------------------------------------------------------------
// UiUpdate processing
// ---------------------------------------------------------------------------

/// Apply a single UiUpdate to the ViewState.
pub fn apply_ui_update(state: &mut ViewState, update: UiUpdate) {
    match update {
        UiUpdate::Entries(entries) => state.replace_entries(entries),
        UiUpdate::Placeholder(marker) => state.push_placeholder(marker),
    }
}

// ---------------------------------------------------------------------------
// Render frame
// ---------------------------------------------------------------------------

/// Render the complete frame.
pub fn render_frame(frame: &mut Frame, state: &ViewState) {
    let layout = build_layout(frame.area());

    widgets::header::render(frame, layout.header, state);
    widgets::entries::render(frame, layout.entries, state);
    widgets::entry_form::render(frame, &layout, state);
    widgets::help_bar::render(frame, layout.help_bar);
}

// ---------------------------------------------------------------------------
// Main TUI loop
// ---------------------------------------------------------------------------

/// Run the TUI until the user quits.
///
/// 1. Installs a panic hook that restores the terminal.
/// 2. Initializes the terminal (raw mode, alternate screen, mouse capture).
/// 3. Starts the client (host address, refresh loop).
/// 4. Runs the select loop: UI updates, keyboard/mouse input, render ticks.
/// 5. Stops the client, restores the terminal and the previous panic hook.
pub async fn run(
    mut client: GuestbookClient,
    mut ui_rx: mpsc::Receiver<UiUpdate>,
) -> anyhow::Result<()> {
    let _panic_guard = PanicHookGuard::install(restore_terminal);

    let mut terminal = ratatui::init();
    if let Err(e) = crossterm::execute!(std::io::stdout(), EnableMouseCapture) {
        restore_terminal();
        return Err(e.into());
    }

    let mut view_state = ViewState::default();
    client.start(&mut view_state);

    let result = event_loop(&mut terminal, &client, &mut ui_rx, &mut view_state).await;

    client.stop().await;
    restore_terminal();

    result
}

fn restore_terminal() {
    let _ = crossterm::execute!(std::io::stdout(), DisableMouseCapture);
    ratatui::restore();
}

type PanicHook = Box<dyn Fn(&PanicHookInfo<'_>) + Sync + Send + 'static>;

/// Runs `cleanup` before the previous panic hook while alive. Dropping it
/// puts the previous hook back.
struct PanicHookGuard {
    previous: Arc<PanicHook>,
}

impl PanicHookGuard {
    fn install(cleanup: impl Fn() + Sync + Send + 'static) -> Self {
        let previous: Arc<PanicHook> = Arc::new(std::panic::take_hook());
        let chained = Arc::clone(&previous);
        std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
            cleanup();
            chained(panic_info);
        }));
        Self { previous }
    }
}

impl Drop for PanicHookGuard {
    fn drop(&mut self) {
        let previous = Arc::clone(&self.previous);
        std::panic::set_hook(Box::new(move |panic_info: &PanicHookInfo<'_>| {
            previous(panic_info)
        }));
    }
}

async fn event_loop(
    terminal: &mut DefaultTerminal,
    client: &GuestbookClient,
    ui_rx: &mut mpsc::Receiver<UiUpdate>,
    view_state: &mut ViewState,
) -> anyhow::Result<()> {
    let mut event_stream = EventStream::new();

    let mut render_tick = tokio::time::interval(Duration::from_millis(33));
    render_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            update = ui_rx.recv() => {
                match update {
                    Some(ui_update) => apply_ui_update(view_state, ui_update),
                    None => {
                        info!("UI channel closed, leaving TUI");
                        return Ok(());
                    }
                }
            }

            maybe_event = event_stream.next() => {
                let command = match maybe_event {
                    Some(Ok(Event::Key(key_event))) => input::handle_key(key_event, view_state),
                    Some(Ok(Event::Mouse(mouse_event))) => {
                        let size = terminal.size()?;
                        let layout = build_layout(Rect::new(0, 0, size.width, size.height));
                        input::handle_mouse(mouse_event, view_state, &layout)
                    }
                    Some(Ok(_)) => None,
                    Some(Err(e)) => {
                        warn!("Terminal input error: {}", e);
                        return Ok(());
                    }
                    None => return Ok(()),
                };

                match command {
                    Some(UserCommand::Quit) => {
                        info!("Quit requested");
                        return Ok(());
                    }
                    Some(UserCommand::Submit(trigger)) => {
                        let _ = client.submit_entry(view_state, trigger).await;
                    }
                    None => {}
                }
            }

            _ = render_tick.tick() => {
                terminal.draw(|frame| render_frame(frame, view_state))?;
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
