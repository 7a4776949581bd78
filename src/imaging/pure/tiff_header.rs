// TIFF signature checks (no I/O)

use std::path::Path;

pub const TIFF_EXTENSIONS: [&str; 2] = ["tif", "tiff"];

/// Classic TIFF magic in either byte order: `II*\0` or `MM\0*`
pub fn is_tiff_magic(magic: &[u8]) -> bool {
    matches!(magic.get(..4), Some([b'I', b'I', 42, 0] | [b'M', b'M', 0, 42]))
}

pub fn has_tiff_extension(path: &Path) -> bool {
    path.extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .is_some_and(|e| TIFF_EXTENSIONS.contains(&e.as_str()))
}
