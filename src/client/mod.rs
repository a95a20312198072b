pub mod api;
pub mod debounce;
pub mod session;
