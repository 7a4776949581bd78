//! Results module - ThunderSTORM localization tables and output checks
//!
//! ## Module Structure
//! - `types.rs`: Localization, ResultsSummary
//! - `pure/`: Header normalisation and column mapping (no I/O)
//! - `operations/`: CSV reading, output verification

mod operations;
mod pure;
mod types;

// Re-export public API
pub use operations::{read_localizations, verify_outputs};
pub use pure::summarize;
pub use types::ResultsSummary;
