//! Imaging module - TIFF validation, inspection and synthetic test stacks
//!
//! ## Module Structure
//! - `types.rs`: ImageInfo
//! - `pure/`: TIFF signature checks (no I/O)
//! - `operations/`: File inspection and test image generation

mod operations;
mod pure;
mod types;

// Re-export public API
pub use operations::{create_test_image, image_info, validate_tiff_file};
pub use types::ImageInfo;
