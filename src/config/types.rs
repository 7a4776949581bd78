use serde::{Deserialize, Serialize};

use crate::paths::{PATH_HOME, PATH_PROGRAM_FILES};
use crate::platform::PerOs;

pub const RESULTS_FILE: &str = "results.csv";
pub const RECONSTRUCTED_IMAGE_FILE: &str = "reconstructed_image.tif";
pub const MACRO_FILE: &str = "thunderstorm_macro.ijm";

/// ThunderSTORM analysis parameters rendered into the macro
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisParams {
    /// Camera pixel size in nm
    pub pixel_size: f64,
    /// EM gain
    pub gain: f64,
    /// Camera offset (ADU)
    pub offset: f64,
    /// Image filter, e.g. "Wavelet filter (B-Spline)"
    pub processing_method: String,
    /// Sub-pixel estimator, e.g. "PSF: Integrated Gaussian"
    pub localization_method: String,
    /// Expected PSF sigma in pixels
    pub sigma: f64,
    /// Fitting radius in pixels
    pub fitting_radius: u32,
    pub create_reconstructed_image: bool,
}

impl Default for AnalysisParams {
    fn default() -> Self {
        Self {
            pixel_size: 100.0,
            gain: 100.0,
            offset: 100.0,
            processing_method: "Wavelet filter (B-Spline)".to_string(),
            localization_method: "PSF: Integrated Gaussian".to_string(),
            sigma: 1.6,
            fitting_radius: 3,
            create_reconstructed_image: true,
        }
    }
}

/// Per-run overrides; `None` keeps the configured default
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParamOverrides {
    pub pixel_size: Option<f64>,
    pub gain: Option<f64>,
    pub offset: Option<f64>,
    pub processing_method: Option<String>,
    pub localization_method: Option<String>,
    pub sigma: Option<f64>,
    pub fitting_radius: Option<u32>,
    pub create_reconstructed_image: Option<bool>,
}

impl AnalysisParams {
    /// Return a copy with every set override applied
    pub fn with_overrides(&self, o: &ParamOverrides) -> Self {
        Self {
            pixel_size: o.pixel_size.unwrap_or(self.pixel_size),
            gain: o.gain.unwrap_or(self.gain),
            offset: o.offset.unwrap_or(self.offset),
            processing_method: o
                .processing_method
                .clone()
                .unwrap_or_else(|| self.processing_method.clone()),
            localization_method: o
                .localization_method
                .clone()
                .unwrap_or_else(|| self.localization_method.clone()),
            sigma: o.sigma.unwrap_or(self.sigma),
            fitting_radius: o.fitting_radius.unwrap_or(self.fitting_radius),
            create_reconstructed_image: o
                .create_reconstructed_image
                .unwrap_or(self.create_reconstructed_image),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FijiSection {
    /// Download URL of the Fiji bundle per platform
    pub urls: PerOs<String>,
    /// Candidate launcher paths, checked in order
    pub install_paths: PerOs<Vec<String>>,
    /// Where `setup` installs when no directory is given
    pub default_install_dirs: PerOs<String>,
}

impl Default for FijiSection {
    fn default() -> Self {
        let home = |parts: &[&str]| {
            let mut p = PATH_HOME.clone();
            for part in parts {
                p.push(part);
            }
            p.to_string_lossy().into_owned()
        };

        Self {
            urls: PerOs {
                windows: "https://downloads.imagej.net/fiji/latest/fiji-win64.zip".to_string(),
                darwin: "https://downloads.imagej.net/fiji/latest/fiji-macosx.zip".to_string(),
                linux: "https://downloads.imagej.net/fiji/latest/fiji-linux64.zip".to_string(),
            },
            install_paths: PerOs {
                windows: vec![
                    r"C:\Program Files\Fiji.app\ImageJ-win64.exe".to_string(),
                    r"C:\Program Files (x86)\Fiji.app\ImageJ-win64.exe".to_string(),
                    home(&["Fiji.app", "ImageJ-win64.exe"]),
                    home(&["Desktop", "Fiji.app", "ImageJ-win64.exe"]),
                ],
                darwin: vec![
                    "/Applications/Fiji.app/Contents/MacOS/ImageJ-macosx".to_string(),
                    "/Applications/Fiji.app/Contents/MacOS/ImageJ-macosx64".to_string(),
                    home(&["Applications", "Fiji.app", "Contents", "MacOS", "ImageJ-macosx"]),
                ],
                linux: vec![
                    home(&["Fiji.app", "ImageJ-linux64"]),
                    "/opt/Fiji.app/ImageJ-linux64".to_string(),
                ],
            },
            default_install_dirs: PerOs {
                windows: PATH_PROGRAM_FILES.to_string_lossy().into_owned(),
                darwin: "/Applications".to_string(),
                linux: PATH_HOME.to_string_lossy().into_owned(),
            },
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThunderstormSection {
    pub github_api_url: String,
    pub default_parameters: AnalysisParams,
}

impl Default for ThunderstormSection {
    fn default() -> Self {
        Self {
            github_api_url: "https://api.github.com/repos/zitmen/thunderstorm/releases/latest"
                .to_string(),
            default_parameters: AnalysisParams::default(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisSection {
    /// Deadline for a full analysis run
    pub timeout_secs: u64,
    /// Deadline for the installation probe macro
    pub probe_timeout_secs: u64,
    pub output_files: Vec<String>,
}

impl Default for AnalysisSection {
    fn default() -> Self {
        Self {
            timeout_secs: 300,
            probe_timeout_secs: 30,
            output_files: vec![
                RESULTS_FILE.to_string(),
                RECONSTRUCTED_IMAGE_FILE.to_string(),
                MACRO_FILE.to_string(),
            ],
        }
    }
}

/// Main application configuration
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AutomatorConfig {
    #[serde(default)]
    pub fiji: FijiSection,
    #[serde(default)]
    pub thunderstorm: ThunderstormSection,
    #[serde(default)]
    pub analysis: AnalysisSection,
    /// Keys this crate does not interpret, kept so `set` and `save` round-trip
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_replace_only_set_fields() {
        let base = AnalysisParams::default();
        let o = ParamOverrides {
            gain: Some(300.0),
            create_reconstructed_image: Some(false),
            ..Default::default()
        };
        let merged = base.with_overrides(&o);
        assert_eq!(merged.gain, 300.0);
        assert!(!merged.create_reconstructed_image);
        assert_eq!(merged.pixel_size, base.pixel_size);
        assert_eq!(merged.processing_method, base.processing_method);
    }

    #[test]
    fn partial_params_json_fills_defaults() {
        let p: AnalysisParams = serde_json::from_str(r#"{"sigma": 2.0}"#).unwrap();
        assert_eq!(p.sigma, 2.0);
        assert_eq!(p.fitting_radius, 3);
    }

    #[test]
    fn default_output_files_cover_all_artifacts() {
        let a = AnalysisSection::default();
        assert_eq!(
            a.output_files,
            vec![RESULTS_FILE, RECONSTRUCTED_IMAGE_FILE, MACRO_FILE]
        );
    }

    #[test]
    fn every_platform_has_candidates_and_https_url() {
        let f = FijiSection::default();
        for list in [&f.install_paths.windows, &f.install_paths.darwin, &f.install_paths.linux] {
            assert!(!list.is_empty());
        }
        for url in [&f.urls.windows, &f.urls.darwin, &f.urls.linux] {
            assert!(url.starts_with("https://"));
        }
    }
}
