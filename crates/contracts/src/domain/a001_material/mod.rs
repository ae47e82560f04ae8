pub mod aggregate;
pub mod code;
