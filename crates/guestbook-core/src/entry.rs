// Guestbook entries as stored by the backend.

use serde::{Deserialize, Serialize};

/// Key the guestbook list is stored under in the backend.
pub const DEFAULT_LIST_KEY: &str = "guestbook";

/// Marker rendered for a submission that has not been answered yet.
pub const DEFAULT_PENDING_MARKER: &str = "...";

/// A single stored guestbook value. The backend keeps no id, author or
/// timestamp, only the text.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Entry(String);

impl Entry {
    pub fn new(text: impl Into<String>) -> Self {
        Entry(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl From<&str> for Entry {
    fn from(text: &str) -> Self {
        Entry::new(text)
    }
}

impl From<String> for Entry {
    fn from(text: String) -> Self {
        Entry(text)
    }
}

impl std::fmt::Display for Entry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Entries in backend insertion order. Duplicates are allowed.
pub type EntryList = Vec<Entry>;

/// Decode a backend response body into an entry list.
///
/// The backend answers with a JSON array of strings. A key that was never
/// written comes back as `null`, which decodes to an empty list.
pub fn decode_entry_list(body: &str) -> Result<EntryList, serde_json::Error> {
    let entries: Option<EntryList> = serde_json::from_str(body)?;
    Ok(entries.unwrap_or_default())
}

/// Build an entry list from string literals.
pub fn entry_list<I, S>(items: I) -> EntryList
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Entry::new).collect()
}
