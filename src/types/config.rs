use crate::error::SwarmError;
use crate::pso::{Objective, PsoParams, MAX_POPULATION_SIZE};
use crate::reward::typicality::DEFAULT_BANDWIDTH;
use crate::types::metrics::{MetricField, MetricRecord, METRIC_COUNT};
use serde::Deserialize;
use std::collections::HashMap;

pub const DEFAULT_DATA_FILE: &str = "data/data.json";

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwarmConfig {
    pub data: Option<DataConfig>,
    pub optimizer: Option<OptimizerConfig>,
    #[serde(default)]
    pub reward: RewardConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DataConfig {
    pub path: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OptimizerConfig {
    pub population_size: Option<usize>,
    pub max_iterations: Option<usize>,
    pub inertia_weight: Option<f64>,
    pub cognitive_coeff: Option<f64>,
    pub social_coeff: Option<f64>,
    pub velocity_fraction: Option<f64>,
    pub patience: Option<usize>,
    pub seed: Option<u64>,
    pub objective: Option<Objective>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    #[default]
    Typicality,
    Target,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RewardConfig {
    #[serde(default)]
    pub kind: RewardKind,
    pub bandwidth: Option<f64>,
    pub target: Option<HashMap<String, f64>>,
}

impl RewardConfig {
    pub fn bandwidth(&self) -> f64 {
        self.bandwidth.unwrap_or(DEFAULT_BANDWIDTH)
    }

    /// The configured target as a full metric record, if every field is present.
    pub fn target_profile(&self) -> Option<MetricRecord> {
        let target = self.target.as_ref()?;
        let mut values = [0.0; METRIC_COUNT];
        for field in MetricField::ALL {
            values[field.index()] = *target.get(field.as_str())?;
        }
        Some(MetricRecord::from_values(values))
    }
}

impl SwarmConfig {
    pub fn data_path(&self) -> &str {
        self.data
            .as_ref()
            .and_then(|data| data.path.as_deref())
            .unwrap_or(DEFAULT_DATA_FILE)
    }

    pub fn pso_params(&self) -> PsoParams {
        let defaults = PsoParams::default();
        match &self.optimizer {
            Some(optimizer) => PsoParams {
                population_size: optimizer
                    .population_size
                    .unwrap_or(defaults.population_size),
                max_iterations: optimizer.max_iterations.unwrap_or(defaults.max_iterations),
                inertia_weight: optimizer.inertia_weight.unwrap_or(defaults.inertia_weight),
                cognitive_coeff: optimizer
                    .cognitive_coeff
                    .unwrap_or(defaults.cognitive_coeff),
                social_coeff: optimizer.social_coeff.unwrap_or(defaults.social_coeff),
                velocity_fraction: optimizer
                    .velocity_fraction
                    .unwrap_or(defaults.velocity_fraction),
                objective: optimizer.objective.unwrap_or(defaults.objective),
                patience: optimizer.patience,
                seed: optimizer.seed,
            },
            None => defaults,
        }
    }

    /// Layers command-line values over the optimizer section and re-validates.
    pub fn apply_overrides(
        &mut self,
        population_size: Option<usize>,
        max_iterations: Option<usize>,
        seed: Option<u64>,
    ) -> Result<(), SwarmError> {
        let optimizer = self.optimizer.get_or_insert_with(OptimizerConfig::default);
        if population_size.is_some() {
            optimizer.population_size = population_size;
        }
        if max_iterations.is_some() {
            optimizer.max_iterations = max_iterations;
        }
        if seed.is_some() {
            optimizer.seed = seed;
        }
        self.validate()
    }

    pub fn validate(&self) -> Result<(), SwarmError> {
        if let Some(data) = &self.data {
            if data.path.as_deref().is_some_and(|path| path.trim().is_empty()) {
                return Err(SwarmError::ConfigParse(
                    "data.path must not be empty".to_string(),
                ));
            }
        }

        if let Some(optimizer) = &self.optimizer {
            if optimizer.population_size == Some(0) {
                return Err(SwarmError::ConfigParse(
                    "optimizer.population_size must be greater than 0".to_string(),
                ));
            }
            if optimizer
                .population_size
                .is_some_and(|size| size > MAX_POPULATION_SIZE)
            {
                return Err(SwarmError::ConfigParse(format!(
                    "optimizer.population_size must be at most {MAX_POPULATION_SIZE}"
                )));
            }
            if optimizer.patience == Some(0) {
                return Err(SwarmError::ConfigParse(
                    "optimizer.patience must be greater than 0".to_string(),
                ));
            }
            for (name, value) in [
                ("inertia_weight", optimizer.inertia_weight),
                ("cognitive_coeff", optimizer.cognitive_coeff),
                ("social_coeff", optimizer.social_coeff),
            ] {
                if let Some(value) = value {
                    if !(0.0..=4.0).contains(&value) {
                        return Err(SwarmError::ConfigParse(format!(
                            "optimizer.{name} must be between 0.0 and 4.0"
                        )));
                    }
                }
            }
            if let Some(velocity_fraction) = optimizer.velocity_fraction {
                if !(0.0..=1.0).contains(&velocity_fraction) {
                    return Err(SwarmError::ConfigParse(
                        "optimizer.velocity_fraction must be between 0.0 and 1.0".to_string(),
                    ));
                }
            }
        }

        if let Some(bandwidth) = self.reward.bandwidth {
            if !(bandwidth.is_finite() && bandwidth > 0.0) {
                return Err(SwarmError::ConfigParse(
                    "reward.bandwidth must be greater than 0".to_string(),
                ));
            }
        }

        if let Some(target) = &self.reward.target {
            let unknown = target
                .keys()
                .filter(|key| MetricField::from_name(key).is_none())
                .cloned()
                .collect::<Vec<_>>();
            if !unknown.is_empty() {
                return Err(SwarmError::ConfigParse(format!(
                    "reward.target contains unknown metric(s): {}",
                    unknown.join(", ")
                )));
            }
            if let Some((key, _)) = target.iter().find(|(_, value)| !value.is_finite()) {
                return Err(SwarmError::ConfigParse(format!(
                    "reward.target.{key} must be a finite number"
                )));
            }
        }

        if self.reward.kind == RewardKind::Target && self.reward.target_profile().is_none() {
            return Err(SwarmError::ConfigParse(
                "reward.target must set every metric when reward.kind = \"target\"".to_string(),
            ));
        }

        Ok(())
    }
}
