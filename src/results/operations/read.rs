//! ThunderSTORM CSV reader

use std::path::Path;

use crate::error::{AutomatorError, Result};
use crate::results::pure::ColumnMap;
use crate::results::types::Localization;

/// Parse every localization in a ThunderSTORM results CSV
///
/// A header-only file is a valid, empty result.
pub fn read_localizations(path: &Path) -> Result<Vec<Localization>> {
    let format_err = |reason: String| AutomatorError::ResultsFormat {
        path: path.to_path_buf(),
        reason,
    };

    let mut reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let columns = ColumnMap::from_headers(reader.headers()?.iter())
        .map_err(|missing| format_err(format!("missing required column '{}'", missing)))?;

    let mut locs = Vec::new();
    for (row, record) in reader.records().enumerate() {
        let record = record?;
        let loc = columns
            .build(|i| record.get(i).and_then(|v| v.parse::<f64>().ok()))
            .ok_or_else(|| format_err(format!("row {} has a missing or non-numeric value", row + 1)))?;
        locs.push(loc);
    }

    log::debug!("results - Read {} localizations from {}", locs.len(), path.display());
    Ok(locs)
}
