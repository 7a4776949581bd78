//! Error taxonomy for the automator
//!
//! The four terminal failures of an analysis run are `ExecutableNotFound`,
//! `NonZeroExit`, `Timeout` and `OutputMissing`. Everything else is plumbing
//! around setup, config and file handling.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum AutomatorError {
    #[error("Fiji executable not found (searched: {})", format_paths(.searched))]
    ExecutableNotFound { searched: Vec<PathBuf> },

    #[error("Fiji exited with status {code}: {}", last_line(.stderr))]
    NonZeroExit { code: i32, stderr: String },

    #[error("Fiji did not finish within {}s and was killed", .timeout.as_secs())]
    Timeout { timeout: Duration },

    #[error("expected output file missing: {0}")]
    OutputMissing(PathBuf),

    #[error("input file not found: {0}")]
    InputNotFound(PathBuf),

    #[error("invalid input {path}: {reason}")]
    InvalidInput { path: PathBuf, reason: String },

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("download of {url} failed: {reason}")]
    Download { url: String, reason: String },

    #[error("archive {path}: {reason}")]
    Archive { path: PathBuf, reason: String },

    #[error("ThunderSTORM plugin not found in {0}")]
    PluginMissing(PathBuf),

    #[error("ThunderSTORM release lookup failed: {0}")]
    Release(String),

    #[error("results file {path}: {reason}")]
    ResultsFormat { path: PathBuf, reason: String },

    #[error("config: {0}")]
    Config(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Http(#[from] reqwest::Error),

    #[error(transparent)]
    Csv(#[from] csv::Error),

    #[error(transparent)]
    Zip(#[from] zip::result::ZipError),

    #[error(transparent)]
    Tiff(#[from] tiff::TiffError),
}

pub type Result<T> = std::result::Result<T, AutomatorError>;

fn format_paths(paths: &[PathBuf]) -> String {
    if paths.is_empty() {
        return "no candidate paths".to_string();
    }
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn last_line(stderr: &str) -> &str {
    stderr
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("no stderr output")
}
