use crate::types::report::{OptimizationReport, RangesReport};

pub fn to_json(report: &OptimizationReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn ranges_to_json(report: &RangesReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}
