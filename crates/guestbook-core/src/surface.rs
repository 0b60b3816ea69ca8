// Capabilities the client needs from whatever is displaying the guestbook.
//
// A front end implements these so the submit and refresh flows never touch a
// concrete rendering environment.

use async_trait::async_trait;

use crate::entry::EntryList;

/// Where rendered entries go.
///
/// Both the refresh loop and submit responses write here without
/// coordination; whichever call lands last wins.
#[async_trait]
pub trait EntrySink: Send + Sync {
    /// Discard every displayed node and show one node per entry, in order.
    async fn replace_entries(&self, entries: EntryList);

    /// Append a pending-submission placeholder after the displayed entries.
    async fn push_placeholder(&self, marker: &str);
}

/// The text input the user types an entry into.
pub trait InputSource {
    fn text(&self) -> &str;
    fn clear(&mut self);
}

/// Static display of the address the client is talking to.
pub trait HostDisplay {
    fn set_host_address(&mut self, address: &str);
}

/// What caused a submission. Both triggers take the same path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitTrigger {
    /// The submit control was clicked.
    Click,
    /// The form was submitted from the keyboard.
    Enter,
}

impl std::fmt::Display for SubmitTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SubmitTrigger::Click => f.write_str("click"),
            SubmitTrigger::Enter => f.write_str("enter"),
        }
    }
}
