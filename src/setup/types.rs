//! Setup type definitions

use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::config::AutomatorConfig;
use crate::platform::Os;

pub const FIJI_DIR_NAME: &str = "Fiji.app";
pub const PLUGIN_VERSION_FILE: &str = ".thunderstorm-version";
/// Matches `Thunder_STORM.jar` as well as `thunderstorm-1.3.jar`
pub const PLUGIN_JAR_PATTERN: &str = "*thunder*storm*.jar";

/// What to do when something is already installed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReinstallPolicy {
    /// Leave existing installs alone (plugin still upgrades when known to be older)
    #[default]
    Keep,
    Replace,
    /// Prompt on stdin
    Ask,
}

/// Subset of the GitHub release payload that matters here
#[derive(Debug, Clone, Deserialize)]
pub struct GithubRelease {
    pub tag_name: String,
    #[serde(default)]
    pub assets: Vec<ReleaseAsset>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ReleaseAsset {
    pub name: String,
    pub browser_download_url: String,
}

/// The plugin jar picked from the latest release
#[derive(Debug, Clone, PartialEq)]
pub struct ReleaseInfo {
    pub tag: String,
    pub download_url: String,
    pub file_name: String,
}

#[derive(Debug, Clone)]
pub struct SetupReport {
    pub fiji_executable: PathBuf,
    pub plugin_jar: PathBuf,
    /// ImageJ version printed by the probe macro
    pub fiji_version: Option<String>,
}

/// Install layout: `<install_dir>/Fiji.app/plugins`
#[derive(Debug, Clone)]
pub struct FijiSetup {
    pub os: Os,
    pub install_dir: PathBuf,
    pub fiji_dir: PathBuf,
    pub plugins_dir: PathBuf,
    pub(crate) config: AutomatorConfig,
}

impl FijiSetup {
    /// `install_dir` defaults to the configured per-OS location
    pub fn new(install_dir: Option<&Path>, config: AutomatorConfig) -> Self {
        Self::for_os(Os::current(), install_dir, config)
    }

    pub fn for_os(os: Os, install_dir: Option<&Path>, config: AutomatorConfig) -> Self {
        let install_dir = match install_dir {
            Some(dir) => dir.to_path_buf(),
            None => config.fiji_default_install_dir(os),
        };
        let fiji_dir = install_dir.join(FIJI_DIR_NAME);
        let plugins_dir = fiji_dir.join("plugins");
        FijiSetup {
            os,
            install_dir,
            fiji_dir,
            plugins_dir,
            config,
        }
    }

    pub fn fiji_executable(&self) -> PathBuf {
        self.os.fiji_executable(&self.fiji_dir)
    }

    pub fn version_file(&self) -> PathBuf {
        self.plugins_dir.join(PLUGIN_VERSION_FILE)
    }
}
