use crate::error::{Result, SwarmError};
use crate::types::metrics::{MetricField, MetricRange, MetricRanges, MetricRecord};

pub fn get_metrics_ranges(metrics: &[MetricRecord]) -> Result<MetricRanges> {
    if metrics.is_empty() {
        return Err(SwarmError::EmptyDataset);
    }

    let ranges = MetricField::ALL.map(|field| {
        metrics.iter().map(|record| record.get(field)).fold(
            MetricRange {
                min: f64::INFINITY,
                max: f64::NEG_INFINITY,
            },
            |range, value| MetricRange {
                min: range.min.min(value),
                max: range.max.max(value),
            },
        )
    });

    Ok(MetricRanges::new(ranges))
}
