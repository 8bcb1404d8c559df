use super::{check_dimensions, normalized_diff, RewardFunction};
use crate::pso::RewardError;
use crate::types::metrics::{MetricField, MetricRanges, MetricRecord};

pub const DEFAULT_BANDWIDTH: f64 = 0.25;

/// Mean Gaussian kernel similarity between a candidate and every record.
#[derive(Debug, Clone)]
pub struct Typicality {
    metrics: Vec<MetricRecord>,
    ranges: MetricRanges,
    bandwidth: f64,
}

impl Typicality {
    pub fn new(metrics: Vec<MetricRecord>, ranges: MetricRanges, bandwidth: f64) -> Self {
        Self {
            metrics,
            ranges,
            bandwidth,
        }
    }
}

impl RewardFunction for Typicality {
    fn name(&self) -> &'static str {
        "typicality"
    }

    fn evaluate(&self, position: &[f64]) -> Result<f64, RewardError> {
        check_dimensions(position)?;
        if self.metrics.is_empty() {
            return Err(RewardError::new("typicality needs at least one record"));
        }

        let denominator = 2.0 * self.bandwidth * self.bandwidth;
        let total: f64 = self
            .metrics
            .iter()
            .map(|record| {
                let squared: f64 = MetricField::ALL
                    .iter()
                    .map(|field| {
                        let diff = normalized_diff(
                            &self.ranges,
                            *field,
                            position[field.index()],
                            record.get(*field),
                        );
                        diff * diff
                    })
                    .sum();
                (-squared / denominator).exp()
            })
            .sum();

        Ok(total / self.metrics.len() as f64)
    }
}
