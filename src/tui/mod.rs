//! Terminal browser for the advocate directory
//!
//! Shows one page of advocates at a time in a table, with a debounced search
//! box and a pager. Every fetch happens in the background so typing never
//! waits on the network.

pub mod app;
pub mod event;
pub mod terminal;
pub mod ui;

pub use terminal::run;
