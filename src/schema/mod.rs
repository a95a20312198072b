pub mod advocate;
pub mod common;
