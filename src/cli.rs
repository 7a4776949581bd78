//! Command-line interface

use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};

use crate::automator::{ThunderstormAutomator, validate_input_file};
use crate::config::{self, AutomatorConfig, ParamOverrides};
use crate::error::{AutomatorError, Result};
use crate::imaging::{create_test_image, image_info};
use crate::locate::resolve_fiji_executable;
use crate::platform::Os;
use crate::setup::{FijiSetup, ReinstallPolicy};

#[derive(Debug, Parser)]
#[command(name = "fiji-automator", version, about = "Install Fiji/ThunderSTORM and run headless localization analysis")]
pub struct Cli {
    /// Config file (defaults to the per-user config path)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Download and install Fiji and the ThunderSTORM plugin
    Setup {
        #[arg(long, value_name = "DIR")]
        install_dir: Option<PathBuf>,
        /// Replace existing installs without asking
        #[arg(long, conflicts_with = "keep")]
        force: bool,
        /// Keep existing installs without asking
        #[arg(long)]
        keep: bool,
    },
    /// Print the Fiji executable that would be used
    Locate {
        #[arg(long, value_name = "PATH")]
        fiji: Option<PathBuf>,
    },
    /// Run a probe macro to check that Fiji works headlessly
    Check {
        #[arg(long, value_name = "PATH")]
        fiji: Option<PathBuf>,
    },
    /// Validate an input image and print what is known about it
    Inspect { image: PathBuf },
    /// Run ThunderSTORM on a TIFF stack
    Analyze(AnalyzeArgs),
    /// Show or edit the configuration
    #[command(subcommand)]
    Config(ConfigCommand),
    /// Write a random-noise TIFF stack for trying things out
    MakeTestImage {
        path: PathBuf,
        #[arg(long, default_value_t = 256)]
        width: u32,
        #[arg(long, default_value_t = 256)]
        height: u32,
        #[arg(long, default_value_t = 10)]
        frames: u32,
    },
}

#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    #[arg(long, value_name = "PATH")]
    pub fiji: Option<PathBuf>,
    /// Camera pixel size in nm
    #[arg(long)]
    pub pixel_size: Option<f64>,
    #[arg(long)]
    pub gain: Option<f64>,
    #[arg(long)]
    pub offset: Option<f64>,
    #[arg(long)]
    pub processing_method: Option<String>,
    #[arg(long)]
    pub localization_method: Option<String>,
    #[arg(long)]
    pub sigma: Option<f64>,
    #[arg(long)]
    pub fitting_radius: Option<u32>,
    /// Skip rendering the super-resolved image
    #[arg(long)]
    pub no_reconstruction: bool,
    /// Override the configured analysis timeout
    #[arg(long, value_name = "SECS")]
    pub timeout: Option<u64>,
}

impl AnalyzeArgs {
    pub fn overrides(&self) -> ParamOverrides {
        ParamOverrides {
            pixel_size: self.pixel_size,
            gain: self.gain,
            offset: self.offset,
            processing_method: self.processing_method.clone(),
            localization_method: self.localization_method.clone(),
            sigma: self.sigma,
            fitting_radius: self.fitting_radius,
            create_reconstructed_image: self.no_reconstruction.then_some(false),
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the effective configuration
    Show,
    /// Print one value by dotted key, e.g. `analysis.timeout_secs`
    Get { key: String },
    /// Set a value (parsed as JSON, else taken as a string) and save
    Set { key: String, value: String },
    /// Write the effective configuration to PATH (or the config file)
    Save { path: Option<PathBuf> },
}

pub fn run(cli: Cli) -> Result<()> {
    let config_path = cli.config.as_deref();
    let mut cfg = config::load_cfg(config_path)?;

    match cli.command {
        Command::Setup {
            install_dir,
            force,
            keep,
        } => {
            let policy = match (force, keep) {
                (true, _) => ReinstallPolicy::Replace,
                (_, true) => ReinstallPolicy::Keep,
                _ => ReinstallPolicy::Ask,
            };
            let setup = FijiSetup::new(install_dir.as_deref(), cfg);
            let report = setup.setup_all(policy)?;
            println!("Fiji installed at: {}", setup.fiji_dir.display());
            println!("ThunderSTORM plugin: {}", report.plugin_jar.display());
            if let Some(version) = report.fiji_version {
                println!("ImageJ version: {}", version);
            }
        }
        Command::Locate { fiji } => {
            let found = resolve_fiji_executable(fiji.as_deref(), &cfg, Os::current())?;
            println!("{}", found.display());
        }
        Command::Check { fiji } => {
            let automator = ThunderstormAutomator::new(fiji.as_deref(), cfg)?;
            println!("Fiji: {}", automator.fiji_executable().display());
            match automator.test_fiji_installation()? {
                Some(version) => println!("Fiji is working (ImageJ {})", version),
                None => println!("Fiji is working"),
            }
        }
        Command::Inspect { image } => inspect(&image)?,
        Command::Analyze(args) => {
            if let Some(secs) = args.timeout {
                cfg.analysis.timeout_secs = secs;
            }
            let automator = ThunderstormAutomator::new(args.fiji.as_deref(), cfg)?;
            validate_input_file(&args.input)?;
            let report = automator.run_analysis(&args.input, &args.output_dir, &args.overrides())?;

            println!("Results: {}", report.results_path.display());
            println!("Localizations: {}", report.summary.count);
            if let Some(path) = &report.reconstructed_image {
                println!("Super-resolved image: {}", path.display());
            }
            println!("Macro: {}", report.macro_path.display());
        }
        Command::Config(cmd) => run_config(cmd, &mut cfg, config_path)?,
        Command::MakeTestImage {
            path,
            width,
            height,
            frames,
        } => {
            create_test_image(&path, width, height, frames)?;
            println!("{}", path.display());
        }
    }
    Ok(())
}

fn inspect(image: &Path) -> Result<()> {
    let verdict = validate_input_file(image);
    let info = match &verdict {
        Ok(info) => info.clone(),
        Err(_) => image_info(image),
    };
    println!("{}", serde_json::to_string_pretty(&info)?);
    verdict.map(|_| ())
}

fn run_config(cmd: ConfigCommand, cfg: &mut AutomatorConfig, path: Option<&Path>) -> Result<()> {
    match cmd {
        ConfigCommand::Show => println!("{}", serde_json::to_string_pretty(cfg)?),
        ConfigCommand::Get { key } => {
            let value = cfg
                .get(&key)
                .ok_or_else(|| AutomatorError::Config(format!("no such key '{}'", key)))?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        ConfigCommand::Set { key, value } => {
            cfg.set(&key, config::pure::parse_cli_value(&value))?;
            config::save_cfg(cfg, path)?;
        }
        ConfigCommand::Save { path: target } => {
            config::save_cfg(cfg, target.as_deref().or(path))?;
        }
    }
    Ok(())
}
