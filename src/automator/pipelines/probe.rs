//! Probe run: does Fiji start and execute a macro?

use std::io::Write;
use std::path::Path;
use std::time::Duration;

use crate::automator::pure::{parse_imagej_version, saw_probe_marker};
use crate::automator::types::ThunderstormAutomator;
use crate::error::Result;
use crate::launch::{build_fiji_command, format_command, run_with_timeout};
use crate::script::render_probe_macro;

/// Run the probe macro with `fiji`, returning the ImageJ version it printed
///
/// The macro lives in a temp file that is removed when the run ends.
pub fn probe_fiji(fiji: &Path, timeout: Duration) -> Result<Option<String>> {
    log::info!("automator - Testing Fiji installation at {}", fiji.display());

    let mut macro_file = tempfile::Builder::new()
        .prefix("fiji-automator-probe-")
        .suffix(".ijm")
        .tempfile()?;
    macro_file.write_all(render_probe_macro().as_bytes())?;
    macro_file.flush()?;

    let fiji = std::path::absolute(fiji)?;
    let cmd = build_fiji_command(&fiji, macro_file.path());
    log::debug!("automator - Command: {}", format_command(&cmd));

    let output = run_with_timeout(cmd, timeout)?.into_success()?;
    log::debug!("automator - Probe stdout:\n{}", output.stdout);

    if !saw_probe_marker(&output.stdout) {
        log::warn!("automator - Fiji exited cleanly but the probe marker was not printed");
    }

    let version = parse_imagej_version(&output.stdout);
    match &version {
        Some(v) => log::info!("automator - Fiji is working (ImageJ {})", v),
        None => log::info!("automator - Fiji is working"),
    }
    Ok(version)
}

impl ThunderstormAutomator {
    /// Probe the resolved Fiji with the configured probe timeout
    pub fn test_fiji_installation(&self) -> Result<Option<String>> {
        probe_fiji(&self.fiji, self.config.probe_timeout())
    }
}
