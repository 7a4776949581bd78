//! Full analysis run

use std::fs;
use std::path::Path;

use crate::automator::types::{AnalysisReport, ThunderstormAutomator};
use crate::config::{AutomatorConfig, MACRO_FILE, ParamOverrides, RECONSTRUCTED_IMAGE_FILE, RESULTS_FILE};
use crate::error::{AutomatorError, Result};
use crate::imaging::{image_info, validate_tiff_file};
use crate::launch::{build_fiji_command, format_command, run_with_timeout};
use crate::locate::resolve_fiji_executable;
use crate::platform::Os;
use crate::results::{read_localizations, summarize, verify_outputs};
use crate::script::render_analysis_macro;
use crate::util::{self, MacroPath};

impl ThunderstormAutomator {
    /// Resolve the Fiji launcher, explicitly or from the configured candidates
    pub fn new(explicit_fiji: Option<&Path>, config: AutomatorConfig) -> Result<Self> {
        let found = resolve_fiji_executable(explicit_fiji, &config, Os::current())?;
        // Fiji runs with its own directory as cwd, so relative paths would break
        let fiji = std::path::absolute(&found)?;
        log::info!("automator - Fiji executable found at: {}", fiji.display());
        log::info!(
            "automator - ThunderSTORM must be installed in Fiji (Help > Update... > Manage update sites, \
             or drop the .jar from GitHub into Fiji.app/plugins/)"
        );
        Ok(ThunderstormAutomator { fiji, config })
    }

    pub fn fiji_executable(&self) -> &Path {
        &self.fiji
    }

    /// Remove outputs of an earlier run so they cannot pass for this run's
    fn clear_previous_outputs(&self, output_dir: &Path) -> Result<()> {
        let names = self
            .config
            .expected_output_files()
            .iter()
            .map(String::as_str)
            .chain([RESULTS_FILE, RECONSTRUCTED_IMAGE_FILE])
            .filter(|name| *name != MACRO_FILE);
        for name in names {
            let path = output_dir.join(name);
            if path.is_file() {
                log::debug!("automator - Removing stale output {}", path.display());
                util::remove_file(&path)?;
            }
        }
        Ok(())
    }

    /// Run ThunderSTORM on `input`, writing everything into `output_dir`
    pub fn run_analysis(
        &self,
        input: &Path,
        output_dir: &Path,
        overrides: &ParamOverrides,
    ) -> Result<AnalysisReport> {
        let params = self.config.default_parameters().with_overrides(overrides);

        if !input.exists() {
            return Err(AutomatorError::InputNotFound(input.to_path_buf()));
        }
        if !validate_tiff_file(input) {
            log::warn!("automator - {} may not be a valid TIFF file", input.display());
        }

        let input = std::path::absolute(input)?;
        let output_dir = util::ensure_directory(&std::path::absolute(output_dir)?)?;
        self.clear_previous_outputs(&output_dir)?;

        let macro_text = render_analysis_macro(
            &input.to_macro_path(),
            &output_dir.to_macro_path(),
            &params,
        );
        let macro_path = output_dir.join(MACRO_FILE);
        fs::write(&macro_path, macro_text)?;
        log::info!("automator - Generated macro saved to: {}", macro_path.display());

        let cmd = build_fiji_command(&self.fiji, &macro_path);
        log::info!("automator - Running ThunderSTORM analysis via Fiji");
        log::debug!("automator - Command: {}", format_command(&cmd));

        let output = run_with_timeout(cmd, self.config.analysis_timeout())?;
        if !output.stdout.is_empty() {
            log::debug!("automator - Fiji stdout:\n{}", output.stdout);
        }
        if !output.stderr.is_empty() {
            log::debug!("automator - Fiji stderr:\n{}", output.stderr);
        }
        let output = output.into_success()?;

        verify_outputs(
            &output_dir,
            self.config.expected_output_files(),
            params.create_reconstructed_image,
        )?;

        let results_path = output_dir.join(RESULTS_FILE);
        let localizations = read_localizations(&results_path)?;
        let summary = summarize(&localizations);
        if summary.count == 0 {
            log::warn!("automator - No localizations found in {}", results_path.display());
        } else {
            log::info!("automator - Found {} localizations", summary.count);
        }

        let reconstructed_image = params
            .create_reconstructed_image
            .then(|| output_dir.join(RECONSTRUCTED_IMAGE_FILE))
            .filter(|p| p.is_file());
        let reconstructed_dimensions = reconstructed_image
            .as_deref()
            .and_then(|p| image_info(p).dimensions());
        if let Some((w, h)) = reconstructed_dimensions {
            log::info!("automator - Super-resolved image: {}x{} pixels", w, h);
        }

        log::info!(
            "automator - Analysis complete in {:.1}s, results in {}",
            output.elapsed.as_secs_f32(),
            output_dir.display()
        );

        Ok(AnalysisReport {
            input,
            output_dir,
            macro_path,
            results_path,
            reconstructed_image,
            reconstructed_dimensions,
            summary,
            stdout: output.stdout,
            stderr: output.stderr,
            elapsed: output.elapsed,
        })
    }
}
