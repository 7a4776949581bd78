pub mod literal;
pub mod render;

pub use render::{PROBE_MARKER, render_analysis_macro, render_probe_macro};
