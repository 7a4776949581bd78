//! Results type definitions

use serde::Serialize;

/// One fitted molecule from a ThunderSTORM results table
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Localization {
    pub id: Option<u64>,
    pub frame: Option<u64>,
    /// Position in nm
    pub x: f64,
    pub y: f64,
    pub sigma: f64,
    /// Photons
    pub intensity: f64,
    pub offset: f64,
    pub bkgstd: f64,
    /// Localization uncertainty in nm
    pub uncertainty: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ResultsSummary {
    pub count: usize,
    /// Distinct frames with at least one localization
    pub frames: usize,
    pub mean_intensity: Option<f64>,
    pub mean_uncertainty: Option<f64>,
}
