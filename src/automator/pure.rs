pub mod probe_output;

pub use probe_output::{parse_imagej_version, saw_probe_marker};
