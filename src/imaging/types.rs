//! Imaging type definitions

use serde::Serialize;
use std::path::PathBuf;

/// What could be learned about an image file without failing
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImageInfo {
    pub path: PathBuf,
    pub exists: bool,
    pub size_bytes: u64,
    pub valid_tiff: bool,
    pub width: Option<u32>,
    pub height: Option<u32>,
    /// Number of IFDs (pages) in the TIFF
    pub frames: Option<u32>,
    pub color: Option<String>,
    /// Decoder error, if the file could not be read as an image
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail_error: Option<String>,
}

impl ImageInfo {
    pub fn missing(path: PathBuf) -> Self {
        ImageInfo {
            path,
            ..Default::default()
        }
    }

    pub fn dimensions(&self) -> Option<(u32, u32)> {
        Some((self.width?, self.height?))
    }
}
