//! Fiji executable resolution
//!
//! Either the caller names the launcher explicitly, or the per-platform
//! candidate list from the config is probed in order.

use std::path::{Path, PathBuf};

use crate::config::AutomatorConfig;
use crate::error::{AutomatorError, Result};
use crate::platform::Os;

/// First candidate that exists on disk
pub fn find_fiji_executable(candidates: &[PathBuf]) -> Option<PathBuf> {
    candidates.iter().find(|p| p.exists()).cloned()
}

/// Resolve the Fiji launcher to use
///
/// An explicit path must exist; it is never silently replaced by a
/// discovered one.
pub fn resolve_fiji_executable(
    explicit: Option<&Path>,
    config: &AutomatorConfig,
    os: Os,
) -> Result<PathBuf> {
    if let Some(path) = explicit {
        if path.exists() {
            return Ok(path.to_path_buf());
        }
        return Err(AutomatorError::ExecutableNotFound {
            searched: vec![path.to_path_buf()],
        });
    }

    let candidates = config.fiji_install_paths(os);
    match find_fiji_executable(&candidates) {
        Some(found) => {
            log::debug!("locate - Using {}", found.display());
            Ok(found)
        }
        None => Err(AutomatorError::ExecutableNotFound {
            searched: candidates,
        }),
    }
}
