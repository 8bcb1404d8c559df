//! Particle swarm optimization over a bounded box.
//!
//! Each iteration moves every particle against the global best committed at
//! the end of the previous iteration, hard-clamps the new position into its
//! bounds, evaluates the reward, and only then commits a new global best.

pub mod swarm;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use swarm::Swarm;
use thiserror::Error;
use tracing::{debug, info};

pub const DEFAULT_POPULATION_SIZE: usize = 30;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
pub const DEFAULT_INERTIA_WEIGHT: f64 = 0.5;
pub const DEFAULT_COGNITIVE_COEFF: f64 = 1.5;
pub const DEFAULT_SOCIAL_COEFF: f64 = 1.5;
pub const DEFAULT_VELOCITY_FRACTION: f64 = 0.1;
pub const MAX_POPULATION_SIZE: usize = 100_000;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PsoError {
    #[error("invalid bounds: {0}")]
    InvalidBounds(String),

    #[error("invalid optimizer parameters: {0}")]
    InvalidParams(String),

    #[error("reward function failed at {position:?}: {reason}")]
    InvalidReward { position: Vec<f64>, reason: String },
}

/// Failure raised by a reward function for a sampled position.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{0}")]
pub struct RewardError(pub String);

impl RewardError {
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }
}

/// Inclusive range for one dimension.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bound {
    pub min: f64,
    pub max: f64,
}

impl Bound {
    pub fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    pub fn contains(&self, value: f64) -> bool {
        (self.min..=self.max).contains(&value)
    }

    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }

    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        self.clamp(self.min + rng.gen::<f64>() * self.width())
    }

    fn validate(&self, dim: usize) -> Result<(), PsoError> {
        if !self.min.is_finite() || !self.max.is_finite() || !self.width().is_finite() {
            return Err(PsoError::InvalidBounds(format!(
                "dimension {dim} has non-finite bound ({}, {})",
                self.min, self.max
            )));
        }
        if self.min > self.max {
            return Err(PsoError::InvalidBounds(format!(
                "dimension {dim} has min {} greater than max {}",
                self.min, self.max
            )));
        }
        Ok(())
    }
}

pub fn validate_bounds(dim: usize, bounds: &[Bound]) -> Result<(), PsoError> {
    if dim == 0 {
        return Err(PsoError::InvalidBounds(
            "dimension must be greater than 0".to_string(),
        ));
    }
    if bounds.len() != dim {
        return Err(PsoError::InvalidBounds(format!(
            "expected {dim} bounds, found {}",
            bounds.len()
        )));
    }
    for (index, bound) in bounds.iter().enumerate() {
        bound.validate(index)?;
    }
    Ok(())
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Objective {
    #[default]
    Maximize,
    Minimize,
}

impl Objective {
    /// Strict comparison; ties keep the incumbent.
    pub fn is_better(self, candidate: f64, incumbent: f64) -> bool {
        match self {
            Objective::Maximize => candidate > incumbent,
            Objective::Minimize => candidate < incumbent,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PsoParams {
    pub population_size: usize,
    pub max_iterations: usize,
    pub inertia_weight: f64,
    pub cognitive_coeff: f64,
    pub social_coeff: f64,
    /// Initial velocity is drawn from +/- this fraction of each bound's width.
    pub velocity_fraction: f64,
    pub objective: Objective,
    /// Stop after this many iterations without a global-best improvement.
    pub patience: Option<usize>,
    pub seed: Option<u64>,
}

impl Default for PsoParams {
    fn default() -> Self {
        Self {
            population_size: DEFAULT_POPULATION_SIZE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            inertia_weight: DEFAULT_INERTIA_WEIGHT,
            cognitive_coeff: DEFAULT_COGNITIVE_COEFF,
            social_coeff: DEFAULT_SOCIAL_COEFF,
            velocity_fraction: DEFAULT_VELOCITY_FRACTION,
            objective: Objective::Maximize,
            patience: None,
            seed: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PsoOutcome {
    pub best_position: Vec<f64>,
    pub best_value: f64,
    pub iterations: usize,
    pub evaluations: usize,
    pub stopped_early: bool,
}

impl PsoParams {
    pub fn validate(&self) -> Result<(), PsoError> {
        if self.population_size == 0 {
            return Err(PsoError::InvalidParams(
                "population_size must be greater than 0".to_string(),
            ));
        }
        if self.population_size > MAX_POPULATION_SIZE {
            return Err(PsoError::InvalidParams(format!(
                "population_size must be at most {MAX_POPULATION_SIZE} (found {})",
                self.population_size
            )));
        }
        for (name, value) in [
            ("inertia_weight", self.inertia_weight),
            ("cognitive_coeff", self.cognitive_coeff),
            ("social_coeff", self.social_coeff),
            ("velocity_fraction", self.velocity_fraction),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(PsoError::InvalidParams(format!(
                    "{name} must be a finite non-negative number (found {value})"
                )));
            }
        }
        if self.patience == Some(0) {
            return Err(PsoError::InvalidParams(
                "patience must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Runs the swarm with an RNG seeded from `self.seed`, or from entropy when unset.
    pub fn optimize<F>(
        &self,
        dim: usize,
        bounds: &[Bound],
        reward: F,
    ) -> Result<PsoOutcome, PsoError>
    where
        F: FnMut(&[f64]) -> Result<f64, RewardError>,
    {
        let mut rng = match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        self.optimize_with_rng(dim, bounds, &mut rng, reward)
    }

    pub fn optimize_with_rng<R, F>(
        &self,
        dim: usize,
        bounds: &[Bound],
        rng: &mut R,
        mut reward: F,
    ) -> Result<PsoOutcome, PsoError>
    where
        R: Rng + ?Sized,
        F: FnMut(&[f64]) -> Result<f64, RewardError>,
    {
        validate_bounds(dim, bounds)?;
        self.validate()?;

        let mut swarm = Swarm::initialize(self, bounds, rng, &mut reward)?;
        let mut evaluations = self.population_size;
        let mut iterations = 0;
        let mut stale = 0;
        let mut stopped_early = false;

        while iterations < self.max_iterations {
            let improved = swarm.step(self, bounds, rng, &mut reward)?;
            iterations += 1;
            evaluations += self.population_size;

            if improved {
                stale = 0;
                debug!(
                    iteration = iterations,
                    best_value = swarm.best_value,
                    "global best improved"
                );
            } else {
                stale += 1;
            }

            if let Some(patience) = self.patience {
                if stale >= patience && iterations < self.max_iterations {
                    stopped_early = true;
                    break;
                }
            }
        }

        debug_assert!(swarm
            .best_position
            .iter()
            .zip(bounds)
            .all(|(value, bound)| bound.contains(*value)));

        info!(
            iterations,
            evaluations,
            best_value = swarm.best_value,
            stopped_early,
            "swarm optimization finished"
        );

        Ok(PsoOutcome {
            best_position: swarm.best_position,
            best_value: swarm.best_value,
            iterations,
            evaluations,
            stopped_early,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn seeded(seed: u64) -> PsoParams {
        PsoParams {
            seed: Some(seed),
            ..PsoParams::default()
        }
    }

    fn squared_distance(position: &[f64], target: &[f64]) -> f64 {
        position
            .iter()
            .zip(target)
            .map(|(x, t)| (x - t) * (x - t))
            .sum()
    }

    #[test]
    fn best_position_lies_within_bounds() {
        let bounds = vec![
            Bound::new(-3.0, 2.0),
            Bound::new(10.0, 10.5),
            Bound::new(0.0, 100.0),
        ];
        let outcome = seeded(3)
            .optimize(3, &bounds, |position| Ok(position.iter().sum()))
            .expect("optimization should succeed");

        assert_eq!(outcome.best_position.len(), 3);
        for (value, bound) in outcome.best_position.iter().zip(&bounds) {
            assert!(bound.contains(*value), "{value} outside {bound:?}");
        }
    }

    #[test]
    fn fixed_seed_is_reproducible() {
        let bounds = vec![Bound::new(-5.0, 5.0); 4];
        let reward = |position: &[f64]| -> Result<f64, RewardError> {
            Ok(-squared_distance(position, &[1.0, 2.0, -1.0, 0.0]))
        };

        let first = seeded(42).optimize(4, &bounds, reward).expect("first run");
        let second = seeded(42).optimize(4, &bounds, reward).expect("second run");

        assert_eq!(first.best_position, second.best_position);
        assert_eq!(first.best_value.to_bits(), second.best_value.to_bits());
    }

    #[test]
    fn constant_reward_returns_constant() {
        let bounds = vec![Bound::new(0.0, 1.0); 7];
        let outcome = seeded(1)
            .optimize(7, &bounds, |_| Ok(4.25))
            .expect("optimization should succeed");
        assert_eq!(outcome.best_value, 4.25);
    }

    #[test]
    fn minimizing_squared_distance_converges_to_target() {
        let target = [1.0, -2.0, 0.5];
        let bounds = vec![Bound::new(-5.0, 5.0); 3];
        let params = PsoParams {
            population_size: 40,
            max_iterations: 200,
            objective: Objective::Minimize,
            ..seeded(2024)
        };

        for seed in 0..3 {
            let params = PsoParams {
                seed: Some(seed),
                ..params.clone()
            };
            let outcome = params
                .optimize(3, &bounds, |position| Ok(squared_distance(position, &target)))
                .expect("optimization should succeed");
            assert!(outcome.best_value < 1e-4, "seed {seed}: {}", outcome.best_value);
            for (value, expected) in outcome.best_position.iter().zip(target) {
                assert!((value - expected).abs() < 1e-2);
            }
        }
    }

    #[test]
    fn maximize_and_minimize_pick_opposite_corners() {
        let bounds = vec![Bound::new(0.0, 1.0); 2];
        let params = PsoParams {
            max_iterations: 150,
            ..seeded(5)
        };
        let maximized = params
            .optimize(2, &bounds, |position| Ok(position.iter().sum()))
            .expect("maximize");
        let minimized = PsoParams {
            objective: Objective::Minimize,
            ..params.clone()
        }
        .optimize(2, &bounds, |position| Ok(position.iter().sum()))
        .expect("minimize");

        assert!(maximized.best_value > 1.99);
        assert!(minimized.best_value < 0.01);
    }

    #[test]
    fn zero_width_dimension_stays_fixed() {
        let bounds = vec![Bound::new(3.0, 3.0), Bound::new(-1.0, 1.0)];
        let outcome = seeded(9)
            .optimize(2, &bounds, |position| Ok(position[1]))
            .expect("optimization should succeed");
        assert_eq!(outcome.best_position[0], 3.0);
    }

    #[test]
    fn rejects_dimension_mismatch() {
        let bounds = vec![Bound::new(0.0, 1.0); 5];
        let err = seeded(1)
            .optimize(9, &bounds, |_| Ok(0.0))
            .expect_err("mismatch should fail");
        assert!(matches!(err, PsoError::InvalidBounds(_)));
        assert!(err.to_string().contains("expected 9 bounds, found 5"));
    }

    #[test]
    fn rejects_inverted_and_non_finite_bounds() {
        let inverted = vec![Bound::new(0.0, 1.0), Bound::new(2.0, 1.0)];
        let err = seeded(1)
            .optimize(2, &inverted, |_| Ok(0.0))
            .expect_err("inverted bound should fail");
        assert!(err.to_string().contains("dimension 1 has min 2 greater than max 1"));

        let infinite = vec![Bound::new(0.0, f64::INFINITY)];
        assert!(matches!(
            seeded(1).optimize(1, &infinite, |_| Ok(0.0)),
            Err(PsoError::InvalidBounds(_))
        ));

        assert!(matches!(
            seeded(1).optimize(0, &[], |_| Ok(0.0)),
            Err(PsoError::InvalidBounds(_))
        ));
    }

    #[test]
    fn rejects_invalid_params() {
        let bounds = vec![Bound::new(0.0, 1.0)];
        let empty = PsoParams {
            population_size: 0,
            ..PsoParams::default()
        };
        assert!(matches!(
            empty.optimize(1, &bounds, |_| Ok(0.0)),
            Err(PsoError::InvalidParams(_))
        ));

        let oversized = PsoParams {
            population_size: usize::MAX,
            ..PsoParams::default()
        };
        let err = oversized
            .optimize(1, &bounds, |_| Ok(0.0))
            .expect_err("oversized population should fail");
        assert!(matches!(err, PsoError::InvalidParams(_)));
        assert!(err.to_string().contains("population_size must be at most"));

        let negative = PsoParams {
            social_coeff: -1.0,
            ..PsoParams::default()
        };
        let err = negative
            .optimize(1, &bounds, |_| Ok(0.0))
            .expect_err("negative coefficient should fail");
        assert!(err.to_string().contains("social_coeff"));
    }

    #[test]
    fn reward_error_propagates_with_position() {
        let bounds = vec![Bound::new(0.0, 1.0); 2];
        let mut calls = 0;
        let err = seeded(8)
            .optimize(2, &bounds, |_| {
                calls += 1;
                if calls == 10 {
                    Err(RewardError::new("scoring backend unavailable"))
                } else {
                    Ok(1.0)
                }
            })
            .expect_err("reward error should propagate");

        match err {
            PsoError::InvalidReward { position, reason } => {
                assert_eq!(position.len(), 2);
                assert_eq!(reason, "scoring backend unavailable");
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(calls, 10);
    }

    #[test]
    fn patience_stops_when_global_best_stalls() {
        let bounds = vec![Bound::new(0.0, 1.0); 3];
        let params = PsoParams {
            population_size: 5,
            max_iterations: 50,
            patience: Some(4),
            ..seeded(12)
        };
        let outcome = params
            .optimize(3, &bounds, |_| Ok(1.0))
            .expect("optimization should succeed");

        assert!(outcome.stopped_early);
        assert_eq!(outcome.iterations, 4);
        assert_eq!(outcome.evaluations, 5 * 5);
    }

    #[test]
    fn evaluation_count_covers_initialization_and_iterations() {
        let bounds = vec![Bound::new(0.0, 1.0)];
        let params = PsoParams {
            population_size: 4,
            max_iterations: 6,
            ..seeded(0)
        };
        let mut calls = 0;
        let outcome = params
            .optimize(1, &bounds, |position| {
                calls += 1;
                Ok(position[0])
            })
            .expect("optimization should succeed");

        assert_eq!(outcome.iterations, 6);
        assert_eq!(outcome.evaluations, 28);
        assert_eq!(calls, 28);
        assert!(!outcome.stopped_early);
    }

    proptest! {
        #[test]
        fn positions_stay_within_arbitrary_bounds(
            raw in prop::collection::vec((-1.0e3f64..1.0e3, 0.0f64..50.0), 1..6),
            seed in any::<u64>(),
        ) {
            let bounds = raw
                .iter()
                .map(|&(min, width)| Bound::new(min, min + width))
                .collect::<Vec<_>>();
            let params = PsoParams {
                population_size: 8,
                max_iterations: 15,
                ..seeded(seed)
            };
            let outcome = params
                .optimize(bounds.len(), &bounds, |position| {
                    Ok(position.iter().map(|x| x.sin()).sum())
                })
                .expect("optimization should succeed");
            for (value, bound) in outcome.best_position.iter().zip(&bounds) {
                prop_assert!(bound.contains(*value));
            }
        }
    }
}
