use crate::types::report::{OptimizationReport, RangesReport};

pub fn to_text(report: &OptimizationReport) -> String {
    format!(
        "Best Position: {}\nBest Value: {}",
        format_vector(&report.best_position),
        report.best_value
    )
}

pub fn ranges_to_text(report: &RangesReport) -> String {
    report
        .ranges
        .iter()
        .map(|entry| format!("{}: {}..{}", entry.field, entry.min, entry.max))
        .collect::<Vec<_>>()
        .join("\n")
}

fn format_vector(values: &[f64]) -> String {
    let joined = values
        .iter()
        .map(|value| value.to_string())
        .collect::<Vec<_>>()
        .join(", ");
    format!("[{joined}]")
}
