pub mod validate;

pub use validate::validate_input_file;
