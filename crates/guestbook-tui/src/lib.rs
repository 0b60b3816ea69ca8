// Library root: re-exports the front end modules so integration tests can
// drive them without a terminal.

pub mod protocol;
pub mod sink;
pub mod tui;
