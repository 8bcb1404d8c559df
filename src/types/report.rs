use crate::pso::{Objective, PsoOutcome};
use crate::types::metrics::{MetricField, MetricRange, MetricRanges};
use chrono::Utc;
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct OptimizationReport {
    pub version: String,
    pub generated_at: String,
    pub data_file: String,
    pub data_sha256: String,
    pub records: usize,
    pub reward: String,
    pub objective: Objective,
    pub seed: Option<u64>,
    pub fields: Vec<MetricField>,
    pub best_position: Vec<f64>,
    pub best_value: f64,
    pub iterations: usize,
    pub evaluations: usize,
    pub stopped_early: bool,
}

pub struct RunContext<'a> {
    pub data_file: &'a str,
    pub data_sha256: String,
    pub records: usize,
    pub reward: &'a str,
    pub objective: Objective,
    pub seed: Option<u64>,
}

impl OptimizationReport {
    pub fn new(context: RunContext<'_>, outcome: PsoOutcome) -> Self {
        Self {
            version: env!("CARGO_PKG_VERSION").to_string(),
            generated_at: Utc::now().to_rfc3339(),
            data_file: context.data_file.to_string(),
            data_sha256: context.data_sha256,
            records: context.records,
            reward: context.reward.to_string(),
            objective: context.objective,
            seed: context.seed,
            fields: MetricField::ALL.to_vec(),
            best_position: outcome.best_position,
            best_value: outcome.best_value,
            iterations: outcome.iterations,
            evaluations: outcome.evaluations,
            stopped_early: outcome.stopped_early,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RangeEntry {
    pub field: MetricField,
    pub min: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct RangesReport {
    pub data_file: String,
    pub records: usize,
    pub ranges: Vec<RangeEntry>,
}

impl RangesReport {
    pub fn new(data_file: &str, records: usize, ranges: &MetricRanges) -> Self {
        Self {
            data_file: data_file.to_string(),
            records,
            ranges: ranges
                .iter()
                .map(|(field, MetricRange { min, max })| RangeEntry { field, min, max })
                .collect(),
        }
    }
}
