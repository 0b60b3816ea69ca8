// Messages between the client tasks and the TUI loop.

use guestbook_core::entry::EntryList;
use guestbook_core::surface::SubmitTrigger;

/// Display mutations pushed to the TUI. Applied strictly in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Replace every displayed node with these entries.
    Entries(EntryList),
    /// Append a pending-submission placeholder.
    Placeholder(String),
}

/// Commands produced by keyboard and mouse handling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserCommand {
    Submit(SubmitTrigger),
    Quit,
}
