pub mod tiff_header;

pub use tiff_header::{has_tiff_extension, is_tiff_magic};
