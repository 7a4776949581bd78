pub mod inspect;
pub mod synth;

pub use inspect::{image_info, validate_tiff_file};
pub use synth::create_test_image;
