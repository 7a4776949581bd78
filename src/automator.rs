//! Automator module - headless ThunderSTORM runs through Fiji
//!
//! A run renders the analysis macro into the output directory, starts Fiji
//! with `--headless --console --run`, waits under a deadline, then checks
//! and parses what the macro left behind.
//!
//! ## Module Structure
//! - `types.rs`: ThunderstormAutomator, AnalysisReport
//! - `pure/`: Probe output parsing (no I/O)
//! - `operations/`: Input validation
//! - `pipelines/`: Analysis and probe runs

mod operations;
mod pipelines;
mod pure;
mod types;

// Re-export public API
pub use operations::validate_input_file;
pub use pipelines::probe_fiji;
pub use types::ThunderstormAutomator;
