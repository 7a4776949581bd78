//! Pure functions module (no side effects)

pub mod command;

pub use command::{build_fiji_command, format_command};
