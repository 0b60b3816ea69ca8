// Library root: the guestbook client logic, independent of any front end.
//
// The front end supplies the capability traits in `surface`; everything else
// (backend calls, the refresh loop, the submit flow, config) lives here.

pub mod backend;
pub mod client;
pub mod config;
pub mod entry;
pub mod refresh;
pub mod surface;
