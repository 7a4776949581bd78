//! Installed plugin bookkeeping

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::setup::types::PLUGIN_JAR_PATTERN;
use crate::util;

pub fn installed_plugin_jars(plugins_dir: &Path) -> Vec<PathBuf> {
    util::find_files(plugins_dir, PLUGIN_JAR_PATTERN)
}

/// Release tag recorded at install time, if any
pub fn read_installed_version(version_file: &Path) -> Option<String> {
    let text = fs::read_to_string(version_file).ok()?;
    let tag = text.trim();
    (!tag.is_empty()).then(|| tag.to_string())
}

pub fn write_installed_version(version_file: &Path, tag: &str) -> Result<()> {
    fs::write(version_file, format!("{}\n", tag))?;
    Ok(())
}

pub fn remove_plugin_jars(jars: &[PathBuf]) -> Result<()> {
    for jar in jars {
        log::info!("setup - Removing {}", jar.display());
        util::remove_file(jar)?;
    }
    Ok(())
}
