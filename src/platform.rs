//! Platform abstraction - WHERE Fiji lives
//!
//! Fiji ships a different launcher per operating system, and every
//! configuration table (download URLs, install candidates, default install
//! directories) is keyed by the same three platform names.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Operating systems Fiji publishes builds for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Os {
    Windows,
    Darwin,
    Linux,
}

impl Os {
    /// Detect the host OS
    ///
    /// Unknown Unix-likes fall back to Linux paths.
    pub fn current() -> Self {
        match std::env::consts::OS {
            "windows" => Os::Windows,
            "macos" => Os::Darwin,
            "linux" => Os::Linux,
            other => {
                log::warn!("platform - Unrecognised OS '{}', using Linux layout", other);
                Os::Linux
            }
        }
    }

    /// Key used in configuration tables
    pub fn key(&self) -> &'static str {
        match self {
            Os::Windows => "windows",
            Os::Darwin => "darwin",
            Os::Linux => "linux",
        }
    }

    pub fn is_unix(&self) -> bool {
        !matches!(self, Os::Windows)
    }

    /// Launcher location inside a `Fiji.app` directory
    pub fn fiji_executable(&self, fiji_dir: &Path) -> PathBuf {
        match self {
            Os::Windows => fiji_dir.join("ImageJ-win64.exe"),
            Os::Darwin => fiji_dir.join("Contents").join("MacOS").join("ImageJ-macosx"),
            Os::Linux => fiji_dir.join("ImageJ-linux64"),
        }
    }

    /// Archive suffix used by the Fiji download server
    pub fn archive_tag(&self) -> &'static str {
        match self {
            Os::Windows => "win64",
            Os::Darwin => "macosx",
            Os::Linux => "linux64",
        }
    }
}

/// A value per supported platform
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PerOs<T> {
    pub windows: T,
    pub darwin: T,
    pub linux: T,
}

impl<T> PerOs<T> {
    pub fn get(&self, os: Os) -> &T {
        match os {
            Os::Windows => &self.windows,
            Os::Darwin => &self.darwin,
            Os::Linux => &self.linux,
        }
    }
}
