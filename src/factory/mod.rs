pub mod advocate;
