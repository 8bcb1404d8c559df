pub mod extract;
pub mod loader;
pub mod ranges;

use crate::error::Result;
use crate::types::metrics::{MetricRanges, MetricRecord};
use std::path::Path;

#[derive(Debug, Clone)]
pub struct Dataset {
    pub metrics: Vec<MetricRecord>,
    pub ranges: Option<MetricRanges>,
    /// SHA-256 of the data file bytes, `None` when the file was missing.
    pub sha256: Option<String>,
}

/// Loads, projects and ranges a data file; `ranges` is `None` for an empty dataset.
pub fn discover(path: &Path) -> Result<Dataset> {
    let data = loader::load_repo_data(path)?;
    let metrics = extract::get_metrics(&data.records)?;
    let ranges = if metrics.is_empty() {
        None
    } else {
        Some(ranges::get_metrics_ranges(&metrics)?)
    };
    Ok(Dataset {
        metrics,
        ranges,
        sha256: data.sha256,
    })
}
