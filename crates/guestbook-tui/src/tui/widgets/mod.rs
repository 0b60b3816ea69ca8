// TUI widget modules for each screen zone.

pub mod entries;
pub mod entry_form;
pub mod header;
pub mod help_bar;
