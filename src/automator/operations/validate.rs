//! Analysis input checks

use std::path::Path;

use crate::automator::types::MIN_INPUT_SIDE;
use crate::error::{AutomatorError, Result};
use crate::imaging::{ImageInfo, image_info};

/// Reject inputs ThunderSTORM cannot do anything useful with
///
/// The file must exist, be non-empty, be a TIFF and, when its dimensions can
/// be read, be at least 10x10 pixels.
pub fn validate_input_file(path: &Path) -> Result<ImageInfo> {
    let invalid = |reason: String| AutomatorError::InvalidInput {
        path: path.to_path_buf(),
        reason,
    };

    let info = image_info(path);
    if !info.exists {
        return Err(AutomatorError::InputNotFound(path.to_path_buf()));
    }
    if info.size_bytes == 0 {
        return Err(invalid("file is empty".to_string()));
    }
    if !info.valid_tiff {
        return Err(invalid("not a TIFF file".to_string()));
    }
    if let Some((w, h)) = info.dimensions() {
        if w < MIN_INPUT_SIDE || h < MIN_INPUT_SIDE {
            return Err(invalid(format!("image is too small: {}x{}", w, h)));
        }
    }

    match (info.dimensions(), info.frames) {
        (Some((w, h)), Some(frames)) => log::info!(
            "automator - Input ok: {} ({}x{}, {} frame(s))",
            path.display(),
            w,
            h,
            frames
        ),
        _ => log::info!("automator - Input ok: {}", path.display()),
    }
    Ok(info)
}
