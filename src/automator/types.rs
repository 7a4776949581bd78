//! Automator type definitions

use serde::Serialize;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::AutomatorConfig;
use crate::results::ResultsSummary;

/// Smallest width/height accepted as analysis input
pub const MIN_INPUT_SIDE: u32 = 10;

/// Resolved Fiji launcher plus the config it runs with
#[derive(Debug, Clone)]
pub struct ThunderstormAutomator {
    pub(crate) fiji: PathBuf,
    pub(crate) config: AutomatorConfig,
}

/// Outcome of a successful analysis run
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    /// Kept next to the results for debugging
    pub macro_path: PathBuf,
    pub results_path: PathBuf,
    pub reconstructed_image: Option<PathBuf>,
    pub reconstructed_dimensions: Option<(u32, u32)>,
    pub summary: ResultsSummary,
    #[serde(skip)]
    pub stdout: String,
    #[serde(skip)]
    pub stderr: String,
    pub elapsed: Duration,
}
