//! Setup module - installing Fiji and the ThunderSTORM plugin
//!
//! ## Module Structure
//! - `types.rs`: FijiSetup, ReinstallPolicy, release and report types
//! - `pure/`: Release asset selection and version comparison (no I/O)
//! - `operations/`: HTTP downloads, zip extraction, plugin bookkeeping, prompts
//! - `pipelines/`: Full install and verification flows

mod operations;
mod pipelines;
mod pure;
mod types;

// Re-export public API
pub use types::{FijiSetup, ReinstallPolicy};
