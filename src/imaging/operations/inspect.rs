//! TIFF validation and metadata probing

use std::fs::{self, File};
use std::io::{BufReader, Read, Seek};
use std::path::Path;

use image::ImageDecoder;
use image::codecs::tiff::TiffDecoder;
use tiff::decoder::Decoder;

use crate::imaging::pure::{has_tiff_extension, is_tiff_magic};
use crate::imaging::types::ImageInfo;

/// Existing file, `.tif`/`.tiff` extension, classic TIFF magic
pub fn validate_tiff_file(path: &Path) -> bool {
    if !path.is_file() || !has_tiff_extension(path) {
        return false;
    }

    let mut magic = [0u8; 4];
    match File::open(path).and_then(|mut f| f.read_exact(&mut magic)) {
        Ok(()) => is_tiff_magic(&magic),
        Err(_) => false,
    }
}

/// Gather what can be learned about `path`; never fails
pub fn image_info(path: &Path) -> ImageInfo {
    let Ok(meta) = fs::metadata(path) else {
        return ImageInfo::missing(path.to_path_buf());
    };

    let mut info = ImageInfo {
        path: path.to_path_buf(),
        exists: true,
        size_bytes: meta.len(),
        valid_tiff: validate_tiff_file(path),
        ..Default::default()
    };
    if !info.valid_tiff {
        return info;
    }

    match decode_header(path) {
        Ok((width, height, color)) => {
            info.width = Some(width);
            info.height = Some(height);
            info.color = Some(color);
        }
        Err(e) => {
            log::debug!("imaging - Decoder failed on {}: {}", path.display(), e);
            info.detail_error = Some(e.to_string());
        }
    }

    let frames = File::open(path)
        .map_err(tiff::TiffError::from)
        .and_then(|f| count_frames(BufReader::new(f)));
    match frames {
        Ok(frames) => info.frames = Some(frames),
        Err(e) => {
            if info.detail_error.is_none() {
                info.detail_error = Some(format!("IFD chain: {}", e));
            }
        }
    }

    info
}

fn decode_header(path: &Path) -> image::ImageResult<(u32, u32, String)> {
    let file = File::open(path)?;
    let decoder = TiffDecoder::new(BufReader::new(file))?;
    let (width, height) = decoder.dimensions();
    Ok((width, height, format!("{:?}", decoder.color_type())))
}

/// Count the pages (IFDs) of a TIFF
pub fn count_frames<R: Read + Seek>(reader: R) -> tiff::TiffResult<u32> {
    let mut decoder = Decoder::new(reader)?;
    let mut frames = 1;
    while decoder.more_images() {
        decoder.next_image()?;
        frames += 1;
    }
    Ok(frames)
}
