//! Synthetic test stacks

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use tiff::encoder::{TiffEncoder, colortype};

use crate::error::{AutomatorError, Result};

/// Write an uncompressed 8-bit grayscale TIFF of random noise
///
/// `frames > 1` produces a multi-page stack, the layout ThunderSTORM expects
/// for a time series.
pub fn create_test_image(path: &Path, width: u32, height: u32, frames: u32) -> Result<()> {
    if width == 0 || height == 0 || frames == 0 {
        return Err(AutomatorError::InvalidInput {
            path: path.to_path_buf(),
            reason: format!("test image must be non-empty, got {}x{}x{}", width, height, frames),
        });
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let mut writer = BufWriter::new(File::create(path)?);
    let mut encoder = TiffEncoder::new(&mut writer)?;
    let mut rng = fastrand::Rng::new();
    let mut page = vec![0u8; width as usize * height as usize];
    for _ in 0..frames {
        rng.fill(&mut page);
        encoder.write_image::<colortype::Gray8>(width, height, &page)?;
    }
    drop(encoder);
    writer.flush()?;

    log::info!(
        "imaging - Created test image {} ({}x{}, {} frame(s))",
        path.display(),
        width,
        height,
        frames
    );
    Ok(())
}
