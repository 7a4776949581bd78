//! Launch module - running Fiji as a headless subprocess
//!
//! ## Module Structure
//! - `types.rs`: ProcessOutput and launch constants
//! - `pure/`: Command building and formatting (no I/O)
//! - `operations/`: Spawning with a deadline, process table probes

mod operations;
mod pure;
mod types;

// Re-export public API
pub use operations::{is_process_running, run_with_timeout};
pub use pure::{build_fiji_command, format_command};
