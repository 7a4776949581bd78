//! Post-run output checks

use std::path::{Path, PathBuf};

use crate::config::RECONSTRUCTED_IMAGE_FILE;
use crate::error::{AutomatorError, Result};

/// Check that Fiji left every expected file in `output_dir`
///
/// The reconstructed image is only required when one was requested. Returns
/// the paths that were checked; the first missing one is an `OutputMissing`.
pub fn verify_outputs(
    output_dir: &Path,
    expected: &[String],
    create_reconstructed_image: bool,
) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();
    for name in expected {
        if name == RECONSTRUCTED_IMAGE_FILE && !create_reconstructed_image {
            continue;
        }
        let path = output_dir.join(name);
        if !path.is_file() {
            log::error!("results - Expected output missing: {}", path.display());
            return Err(AutomatorError::OutputMissing(path));
        }
        log::debug!("results - Found {}", path.display());
        found.push(path);
    }
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RESULTS_FILE;
    use std::fs;

    fn expected() -> Vec<String> {
        vec![RESULTS_FILE.to_string(), RECONSTRUCTED_IMAGE_FILE.to_string()]
    }

    #[test]
    fn all_present() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(RESULTS_FILE), "x").unwrap();
        fs::write(dir.path().join(RECONSTRUCTED_IMAGE_FILE), "x").unwrap();

        let found = verify_outputs(dir.path(), &expected(), true).unwrap();
        assert_eq!(found.len(), 2);
    }

    #[test]
    fn missing_results_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        match verify_outputs(dir.path(), &expected(), false) {
            Err(AutomatorError::OutputMissing(p)) => assert!(p.ends_with(RESULTS_FILE)),
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn reconstruction_only_required_when_requested() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join(RESULTS_FILE), "x").unwrap();

        assert_eq!(verify_outputs(dir.path(), &expected(), false).unwrap().len(), 1);
        match verify_outputs(dir.path(), &expected(), true) {
            Err(AutomatorError::OutputMissing(p)) => assert!(p.ends_with(RECONSTRUCTED_IMAGE_FILE)),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
