//! ImageJ macro rendering
//!
//! Fiji is driven headlessly by writing a macro file and passing it to
//! `--run`. The macro language and the ThunderSTORM commands belong to
//! ImageJ; this module only fills parameters into fixed templates.
//!
//! ## Module Structure
//! - `pure/literal.rs`: escaping and number formatting for macro literals
//! - `pure/render.rs`: analysis and probe macro templates

mod pure;

pub use pure::{PROBE_MARKER, render_analysis_macro, render_probe_macro};
