use std::env;
use std::path::PathBuf;
use std::sync::LazyLock;

pub static PATH_HOME: LazyLock<PathBuf> = LazyLock::new(|| {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
});

pub static PATH_CONFIG_DIR: LazyLock<PathBuf> = LazyLock::new(|| {
    if let Some(xdg_config_home) = env::var_os("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg_config_home).join("fiji-automator");
    }
    PATH_HOME.join(".config").join("fiji-automator")
});

pub static PATH_CONFIG_FILE: LazyLock<PathBuf> =
    LazyLock::new(|| PATH_CONFIG_DIR.join("config.json"));

/// `%PROGRAMFILES%` on Windows hosts, the stock location everywhere else
pub static PATH_PROGRAM_FILES: LazyLock<PathBuf> = LazyLock::new(|| {
    env::var_os("PROGRAMFILES")
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(r"C:\Program Files"))
});
