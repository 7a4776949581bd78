//! Operations module (atomic side effects)

pub mod run;
pub mod scan;

pub use run::run_with_timeout;
pub use scan::is_process_running;
