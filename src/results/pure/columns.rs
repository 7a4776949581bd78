// Column lookup for ThunderSTORM CSV headers (pure functions, no I/O)

use std::collections::BTreeSet;

use crate::results::types::{Localization, ResultsSummary};

pub const REQUIRED_COLUMNS: [&str; 7] =
    ["x", "y", "intensity", "sigma", "offset", "bkgstd", "uncertainty"];

/// 3D exports name the lateral uncertainty `uncertainty_xy`
const ALIASES: [(&str, &str); 1] = [("uncertainty_xy", "uncertainty")];

/// `"x [nm]"` -> `x`, `"Intensity [photon]"` -> `intensity`
pub fn normalize_header(raw: &str) -> String {
    let unquoted = raw.trim().trim_matches('"');
    let name = match unquoted.find('[') {
        Some(i) => &unquoted[..i],
        None => unquoted,
    };
    let name = name.trim().to_ascii_lowercase();
    ALIASES
        .iter()
        .find(|(alias, _)| *alias == name)
        .map(|(_, canonical)| canonical.to_string())
        .unwrap_or(name)
}

/// Positions of the known columns within a header row
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnMap {
    pub id: Option<usize>,
    pub frame: Option<usize>,
    /// Indices in `REQUIRED_COLUMNS` order
    pub required: [usize; 7],
}

impl ColumnMap {
    /// Map header cells to column indices; `Err` names the first missing required column
    pub fn from_headers<'a, I>(headers: I) -> Result<Self, &'static str>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<String> = headers.into_iter().map(normalize_header).collect();
        let find = |wanted: &str| names.iter().position(|n| n == wanted);

        let mut required = [0usize; 7];
        for (slot, column) in required.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = find(column).ok_or(column)?;
        }

        Ok(ColumnMap {
            id: find("id"),
            frame: find("frame"),
            required,
        })
    }

    /// Build a localization from already-parsed cells
    pub fn build(&self, cell: impl Fn(usize) -> Option<f64>) -> Option<Localization> {
        let [x, y, intensity, sigma, offset, bkgstd, uncertainty] = self.required.map(&cell);
        Some(Localization {
            id: self.id.and_then(&cell).map(|v| v as u64),
            frame: self.frame.and_then(&cell).map(|v| v as u64),
            x: x?,
            y: y?,
            sigma: sigma?,
            intensity: intensity?,
            offset: offset?,
            bkgstd: bkgstd?,
            uncertainty: uncertainty?,
        })
    }
}

pub fn summarize(locs: &[Localization]) -> ResultsSummary {
    if locs.is_empty() {
        return ResultsSummary::default();
    }
    let n = locs.len() as f64;
    let frames: BTreeSet<u64> = locs.iter().filter_map(|l| l.frame).collect();
    ResultsSummary {
        count: locs.len(),
        frames: frames.len(),
        mean_intensity: Some(locs.iter().map(|l| l.intensity).sum::<f64>() / n),
        mean_uncertainty: Some(locs.iter().map(|l| l.uncertainty).sum::<f64>() / n),
    }
}
