use super::{check_dimensions, normalized_diff, RewardFunction};
use crate::pso::RewardError;
use crate::types::metrics::{MetricField, MetricRanges, MetricRecord};

/// Negative squared range-normalized distance to a fixed metric profile.
#[derive(Debug, Clone)]
pub struct TargetDistance {
    target: MetricRecord,
    ranges: MetricRanges,
}

impl TargetDistance {
    pub fn new(target: MetricRecord, ranges: MetricRanges) -> Self {
        Self { target, ranges }
    }
}

impl RewardFunction for TargetDistance {
    fn name(&self) -> &'static str {
        "target"
    }

    fn evaluate(&self, position: &[f64]) -> Result<f64, RewardError> {
        check_dimensions(position)?;
        let squared: f64 = MetricField::ALL
            .iter()
            .map(|field| {
                let diff = normalized_diff(
                    &self.ranges,
                    *field,
                    position[field.index()],
                    self.target.get(*field),
                );
                diff * diff
            })
            .sum();
        Ok(-squared)
    }
}
