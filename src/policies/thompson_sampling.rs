//! Thompson sampling bandit policy.
//!
//! Uses a Normal likelihood with known variance and a Normal prior, so the
//! posterior over each arm's mean is available in closed form.
use super::{BuildPolicy, BuildPolicyError, Policy};
use crate::utils::iter::ArgMaxBy;
use crate::Prng;
use ndarray::Array1;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a [`ThompsonSampling`] policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThompsonSamplingConfig {
    /// Prior mean of every arm's expected reward.
    pub prior_mean: f64,
    /// Known observation variance assumed for every arm's rewards.
    pub prior_variance: f64,
}

impl ThompsonSamplingConfig {
    pub const fn new(prior_mean: f64, prior_variance: f64) -> Self {
        Self {
            prior_mean,
            prior_variance,
        }
    }
}

impl Default for ThompsonSamplingConfig {
    fn default() -> Self {
        Self::new(0.0, 1.0)
    }
}

impl BuildPolicy for ThompsonSamplingConfig {
    type Policy = ThompsonSampling;

    fn build_policy(
        &self,
        num_arms: usize,
        seed: u64,
    ) -> Result<ThompsonSampling, BuildPolicyError> {
        if num_arms == 0 {
            return Err(BuildPolicyError::NoArms);
        }
        if self.prior_variance <= 0.0 {
            return Err(BuildPolicyError::NonPositive {
                name: "prior_variance",
                value: self.prior_variance,
            });
        }
        Ok(ThompsonSampling::new(
            num_arms,
            self.prior_mean,
            self.prior_variance,
            seed,
        ))
    }
}

/// A Thompson sampling policy with a Normal-Normal conjugate model.
///
/// Each round samples one value from every arm's posterior and plays the arm
/// with the largest sample. Observing a reward sharpens that arm's posterior
/// in closed form from the per-arm observation count and reward sum; no
/// individual past rewards are stored.
pub struct ThompsonSampling {
    /// Number of observations for each arm.
    pub selection_counts: Array1<u64>,
    /// Sum of all rewards observed for each arm.
    pub reward_sums: Array1<f64>,
    /// Known observation variance assumed for each arm.
    pub prior_vars: Array1<f64>,
    /// Posterior mean of each arm's expected reward.
    pub posterior_means: Array1<f64>,
    /// Posterior variance of each arm's expected reward.
    pub posterior_vars: Array1<f64>,
    rng: Prng,
}

impl ThompsonSampling {
    pub fn new(num_arms: usize, prior_mean: f64, prior_variance: f64, seed: u64) -> Self {
        assert!(num_arms > 0, "policy requires at least one arm");
        assert!(prior_variance > 0.0, "prior variance must be positive");
        Self {
            selection_counts: Array1::zeros(num_arms),
            reward_sums: Array1::zeros(num_arms),
            prior_vars: Array1::from_elem(num_arms, prior_variance),
            posterior_means: Array1::from_elem(num_arms, prior_mean),
            posterior_vars: Array1::ones(num_arms),
            rng: Prng::seed_from_u64(seed),
        }
    }
}

impl fmt::Display for ThompsonSampling {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "ThompsonSampling({} arms)", self.num_arms())
    }
}

impl Policy for ThompsonSampling {
    fn num_arms(&self) -> usize {
        self.posterior_means.len()
    }

    fn select_action(&mut self) -> usize {
        let rng = &mut self.rng;
        self.posterior_means
            .iter()
            .zip(self.posterior_vars.iter())
            .map(|(&mean, &var)| mean + var.sqrt() * rng.sample::<f64, _>(StandardNormal))
            .argmax_by(|a, b| a.partial_cmp(b).expect("posterior samples are comparable"))
            .expect("at least one arm")
    }

    fn update(&mut self, action: usize, reward: f64) {
        assert!(
            action < self.num_arms(),
            "arm index {} out of range for {} arms",
            action,
            self.num_arms()
        );
        self.reward_sums[action] += reward;
        self.selection_counts[action] += 1;
        // Conjugate update for a Normal likelihood with known variance.
        let posterior_var = 1.0
            / (1.0 / self.posterior_vars[action]
                + self.selection_counts[action] as f64 / self.prior_vars[action]);
        self.posterior_means[action] = posterior_var
            * (self.posterior_means[action] / self.posterior_vars[action]
                + self.reward_sums[action] / self.prior_vars[action]);
        self.posterior_vars[action] = posterior_var;
    }
}
