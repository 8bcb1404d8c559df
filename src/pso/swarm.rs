use super::{Bound, Objective, PsoError, PsoParams, RewardError};
use rand::Rng;

#[derive(Debug, Clone)]
pub struct Particle {
    pub position: Vec<f64>,
    pub velocity: Vec<f64>,
    pub best_position: Vec<f64>,
    pub best_value: f64,
}

/// Particles plus the global best committed at the end of the last iteration.
#[derive(Debug, Clone)]
pub struct Swarm {
    pub particles: Vec<Particle>,
    pub best_position: Vec<f64>,
    pub best_value: f64,
}

impl Swarm {
    pub fn initialize<R, F>(
        params: &PsoParams,
        bounds: &[Bound],
        rng: &mut R,
        reward: &mut F,
    ) -> Result<Self, PsoError>
    where
        R: Rng + ?Sized,
        F: FnMut(&[f64]) -> Result<f64, RewardError>,
    {
        let mut particles = Vec::with_capacity(params.population_size);
        for _ in 0..params.population_size {
            let position = bounds
                .iter()
                .map(|bound| bound.sample(rng))
                .collect::<Vec<_>>();
            let velocity = bounds
                .iter()
                .map(|bound| {
                    let span = params.velocity_fraction * bound.width();
                    (rng.gen::<f64>() * 2.0 - 1.0) * span
                })
                .collect::<Vec<_>>();
            let value = evaluate(reward, &position)?;
            particles.push(Particle {
                best_position: position.clone(),
                position,
                velocity,
                best_value: value,
            });
        }

        let mut swarm = Self {
            best_position: particles[0].best_position.clone(),
            best_value: particles[0].best_value,
            particles,
        };
        swarm.commit_global_best(params.objective);
        Ok(swarm)
    }

    /// Moves every particle once and reports whether the global best improved.
    pub fn step<R, F>(
        &mut self,
        params: &PsoParams,
        bounds: &[Bound],
        rng: &mut R,
        reward: &mut F,
    ) -> Result<bool, PsoError>
    where
        R: Rng + ?Sized,
        F: FnMut(&[f64]) -> Result<f64, RewardError>,
    {
        let global_best = &self.best_position;
        for particle in self.particles.iter_mut() {
            for (dim, bound) in bounds.iter().enumerate() {
                let r1: f64 = rng.gen();
                let r2: f64 = rng.gen();
                let position = particle.position[dim];
                let velocity = params.inertia_weight * particle.velocity[dim]
                    + params.cognitive_coeff * r1 * (particle.best_position[dim] - position)
                    + params.social_coeff * r2 * (global_best[dim] - position);
                particle.velocity[dim] = velocity;
                particle.position[dim] = bound.clamp(position + velocity);
            }

            let value = evaluate(reward, &particle.position)?;
            if params.objective.is_better(value, particle.best_value) {
                particle.best_position.clone_from(&particle.position);
                particle.best_value = value;
            }
        }

        Ok(self.commit_global_best(params.objective))
    }

    fn commit_global_best(&mut self, objective: Objective) -> bool {
        let mut improved = false;
        for particle in &self.particles {
            if objective.is_better(particle.best_value, self.best_value) {
                self.best_value = particle.best_value;
                self.best_position.clone_from(&particle.best_position);
                improved = true;
            }
        }
        improved
    }
}

fn evaluate<F>(reward: &mut F, position: &[f64]) -> Result<f64, PsoError>
where
    F: FnMut(&[f64]) -> Result<f64, RewardError>,
{
    let value = reward(position).map_err(|err| PsoError::InvalidReward {
        position: position.to_vec(),
        reason: err.to_string(),
    })?;
    if !value.is_finite() {
        return Err(PsoError::InvalidReward {
            position: position.to_vec(),
            reason: format!("reward is not finite ({value})"),
        });
    }
    Ok(value)
}
