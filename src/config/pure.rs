pub mod dot_path;

pub use dot_path::{get_path, insert_nested, merge_values, parse_cli_value};
