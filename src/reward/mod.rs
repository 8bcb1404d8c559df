//! Scoring of candidate metric profiles against a loaded dataset.
//!
//! Both scorers are maximized and normalize every dimension by its dataset
//! range, so metrics with large absolute values do not dominate.

pub mod target;
pub mod typicality;

use crate::error::{Result, SwarmError};
use crate::pso::RewardError;
use crate::types::config::{RewardConfig, RewardKind};
use crate::types::metrics::{MetricField, MetricRanges, MetricRecord, METRIC_COUNT};
pub use target::TargetDistance;
pub use typicality::Typicality;

pub trait RewardFunction {
    fn name(&self) -> &'static str;
    fn evaluate(&self, position: &[f64]) -> std::result::Result<f64, RewardError>;
}

/// Range-normalized difference; zero-width ranges contribute nothing.
pub(crate) fn normalized_diff(ranges: &MetricRanges, field: MetricField, a: f64, b: f64) -> f64 {
    let width = ranges.get(field).width();
    if width > 0.0 {
        (a - b) / width
    } else {
        0.0
    }
}

pub(crate) fn check_dimensions(position: &[f64]) -> std::result::Result<(), RewardError> {
    if position.len() != METRIC_COUNT {
        return Err(RewardError::new(format!(
            "expected {METRIC_COUNT} metric values, found {}",
            position.len()
        )));
    }
    Ok(())
}

pub fn build(
    config: &RewardConfig,
    metrics: &[MetricRecord],
    ranges: &MetricRanges,
) -> Result<Box<dyn RewardFunction>> {
    match config.kind {
        RewardKind::Typicality => Ok(Box::new(Typicality::new(
            metrics.to_vec(),
            ranges.clone(),
            config.bandwidth(),
        ))),
        RewardKind::Target => {
            let target = config.target_profile().ok_or_else(|| {
                SwarmError::ConfigParse(
                    "reward.target must set every metric when reward.kind = \"target\""
                        .to_string(),
                )
            })?;
            Ok(Box::new(TargetDistance::new(target, ranges.clone())))
        }
    }
}
