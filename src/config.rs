pub mod operations;
pub mod pure;
pub mod types;

// Re-export types
pub use types::{
    AnalysisParams, AutomatorConfig, ParamOverrides, MACRO_FILE, RECONSTRUCTED_IMAGE_FILE,
    RESULTS_FILE,
};

// Re-export operations
pub use operations::{load_cfg, save_cfg};

use crate::error::{AutomatorError, Result};
use crate::platform::Os;
use std::path::PathBuf;
use std::time::Duration;

impl AutomatorConfig {
    /// Dot-notation lookup, e.g. `fiji.urls.windows`
    pub fn get(&self, key: &str) -> Option<serde_json::Value> {
        let tree = serde_json::to_value(self).ok()?;
        pure::get_path(&tree, key).cloned()
    }

    /// Dot-notation insert
    ///
    /// The updated tree must still describe a valid config; on failure the
    /// config is left unchanged.
    pub fn set(&mut self, key: &str, value: serde_json::Value) -> Result<()> {
        if key.is_empty() || key.split('.').any(str::is_empty) {
            return Err(AutomatorError::Config(format!("invalid key '{}'", key)));
        }

        let mut tree = serde_json::to_value(&*self)?;
        let serde_json::Value::Object(map) = &mut tree else {
            return Err(AutomatorError::Config("config is not an object".to_string()));
        };
        let parts: Vec<&str> = key.split('.').collect();
        pure::insert_nested(map, &parts, value);

        *self = serde_json::from_value(tree)
            .map_err(|e| AutomatorError::Config(format!("cannot set '{}': {}", key, e)))?;
        Ok(())
    }

    pub fn fiji_url(&self, os: Os) -> &str {
        self.fiji.urls.get(os)
    }

    pub fn fiji_install_paths(&self, os: Os) -> Vec<PathBuf> {
        self.fiji.install_paths.get(os).iter().map(PathBuf::from).collect()
    }

    pub fn fiji_default_install_dir(&self, os: Os) -> PathBuf {
        PathBuf::from(self.fiji.default_install_dirs.get(os))
    }

    pub fn thunderstorm_api_url(&self) -> &str {
        &self.thunderstorm.github_api_url
    }

    pub fn default_parameters(&self) -> &AnalysisParams {
        &self.thunderstorm.default_parameters
    }

    pub fn analysis_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis.timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.analysis.probe_timeout_secs)
    }

    pub fn expected_output_files(&self) -> &[String] {
        &self.analysis.output_files
    }
}
