//! Zip extraction and launcher permissions

use std::fs::{self, File};
use std::io::{self, BufReader};
use std::path::Path;

use zip::ZipArchive;

use crate::error::{AutomatorError, Result};

/// Extract a zip archive into `dest_dir`, returning the number of files written
///
/// Entries whose names would escape `dest_dir` are skipped. Unix permission
/// bits stored in the archive are restored.
pub fn extract_zip(zip_path: &Path, dest_dir: &Path) -> Result<usize> {
    let file = File::open(zip_path)?;
    let mut archive = ZipArchive::new(BufReader::new(file)).map_err(|e| AutomatorError::Archive {
        path: zip_path.to_path_buf(),
        reason: e.to_string(),
    })?;

    log::info!(
        "setup - Extracting {} entries into {}",
        archive.len(),
        dest_dir.display()
    );

    let mut written = 0;
    for i in 0..archive.len() {
        let mut file = archive.by_index(i)?;
        let outpath = match file.enclosed_name() {
            Some(path) => dest_dir.join(path),
            None => {
                log::warn!("setup - Skipping unsafe archive entry {}", file.name());
                continue;
            }
        };

        if file.name().ends_with('/') {
            fs::create_dir_all(&outpath)?;
        } else {
            if let Some(parent) = outpath.parent() {
                fs::create_dir_all(parent)?;
            }
            let mut outfile = File::create(&outpath)?;
            io::copy(&mut file, &mut outfile)?;
            written += 1;
        }

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            if let Some(mode) = file.unix_mode() {
                fs::set_permissions(&outpath, fs::Permissions::from_mode(mode))?;
            }
        }
    }

    Ok(written)
}

/// chmod 755 on Unix; no-op elsewhere
pub fn make_executable(path: &Path) -> Result<()> {
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(path, fs::Permissions::from_mode(0o755))?;
    }
    #[cfg(not(unix))]
    let _ = path;
    Ok(())
}
