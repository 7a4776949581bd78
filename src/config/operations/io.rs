use crate::config::pure::merge_values;
use crate::config::types::AutomatorConfig;
use crate::error::{AutomatorError, Result};
use crate::paths::PATH_CONFIG_FILE;

use std::fs::{self, File};
use std::io::BufReader;
use std::path::Path;

/// Load config: built-in defaults, deep-merged with the JSON file if present
///
/// Without an explicit path the per-user config file is used when it exists.
/// An explicit path that does not exist yields the defaults, so `config save`
/// can create it later.
pub fn load_cfg(path: Option<&Path>) -> Result<AutomatorConfig> {
    let path = path.unwrap_or(PATH_CONFIG_FILE.as_path());

    if !path.exists() {
        log::debug!("config - No config at {}, using defaults", path.display());
        return Ok(AutomatorConfig::default());
    }

    let file = File::open(path)?;
    let custom: serde_json::Value = serde_json::from_reader(BufReader::new(file))
        .map_err(|e| AutomatorError::Config(format!("{}: {}", path.display(), e)))?;

    let mut merged = serde_json::to_value(AutomatorConfig::default())?;
    merge_values(&mut merged, custom);

    let config = serde_json::from_value(merged)
        .map_err(|e| AutomatorError::Config(format!("{}: {}", path.display(), e)))?;
    log::info!("config - Loaded {}", path.display());
    Ok(config)
}

pub fn save_cfg(config: &AutomatorConfig, path: Option<&Path>) -> Result<()> {
    let path = path.unwrap_or(PATH_CONFIG_FILE.as_path());
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let file = File::create(path)?;
    serde_json::to_writer_pretty(file, config)?;
    log::info!("config - Saved to {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let cfg = load_cfg(Some(&dir.path().join("nope.json"))).unwrap();
        assert_eq!(cfg, AutomatorConfig::default());
    }

    #[test]
    fn partial_file_merges_over_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(
            &path,
            r#"{"analysis": {"timeout_secs": 900},
                "thunderstorm": {"default_parameters": {"gain": 300.0}}}"#,
        )
        .unwrap();

        let cfg = load_cfg(Some(&path)).unwrap();
        assert_eq!(cfg.analysis.timeout_secs, 900);
        assert_eq!(cfg.analysis.probe_timeout_secs, 30);
        assert_eq!(cfg.thunderstorm.default_parameters.gain, 300.0);
        assert_eq!(cfg.thunderstorm.default_parameters.sigma, 1.6);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        fs::write(&path, "{ not json").unwrap();
        assert!(matches!(load_cfg(Some(&path)), Err(AutomatorError::Config(_))));
    }

    #[test]
    fn save_then_load_preserves_custom_keys() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut cfg = AutomatorConfig::default();
        cfg.set("demo.custom_setting", serde_json::json!("test_value"))
            .unwrap();
        save_cfg(&cfg, Some(&path)).unwrap();

        let loaded = load_cfg(Some(&path)).unwrap();
        assert_eq!(
            loaded.get("demo.custom_setting"),
            Some(serde_json::json!("test_value"))
        );
    }
}
