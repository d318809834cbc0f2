//! Gaussian multi-armed bandits.
use super::{BanditEnvironment, BuildEnvError, EnvBuilder};
use crate::utils::iter::ArgMaxBy;
use crate::Prng;
use ndarray::Array1;
use rand::{Rng, SeedableRng};
use rand_distr::StandardNormal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Standard deviation of the random-walk step applied to every latent mean
/// before each pull of a non-stationary bandit.
const DRIFT_STD: f64 = 0.01;

/// Configuration for a [`GaussianBandit`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GaussianBanditConfig {
    /// Number of arms.
    pub num_arms: usize,
    /// Whether the latent means stay fixed for the lifetime of the
    /// environment. If false, every mean takes an independent Gaussian
    /// random-walk step on each pull.
    pub stationary: bool,
}

impl GaussianBanditConfig {
    pub const fn new(num_arms: usize, stationary: bool) -> Self {
        Self {
            num_arms,
            stationary,
        }
    }
}

impl Default for GaussianBanditConfig {
    fn default() -> Self {
        Self::new(10, true)
    }
}

impl EnvBuilder<GaussianBandit> for GaussianBanditConfig {
    fn build_env(&self, seed: u64) -> Result<GaussianBandit, BuildEnvError> {
        if self.num_arms == 0 {
            return Err(BuildEnvError::NoArms);
        }
        let env = if self.stationary {
            GaussianBandit::new(self.num_arms, seed)
        } else {
            GaussianBandit::non_stationary(self.num_arms, seed)
        };
        Ok(env)
    }
}

/// A multi-armed bandit with unit-variance Gaussian arm rewards.
///
/// The latent mean of each arm is drawn from the standard normal at
/// construction. A non-stationary instance perturbs every mean by an
/// independent `Normal(0, 0.0001)` step before each reward sample, so the
/// identity of the best arm can change over the course of a run.
pub struct GaussianBandit {
    true_means: Array1<f64>,
    stationary: bool,
    rng: Prng,
}

impl GaussianBandit {
    /// Create a stationary bandit with latent means drawn from the standard
    /// normal.
    pub fn new(num_arms: usize, seed: u64) -> Self {
        assert!(num_arms > 0, "bandit must have at least one arm");
        let mut rng = Prng::seed_from_u64(seed);
        let true_means: Array1<f64> = Array1::from_shape_fn(num_arms, |_| rng.sample(StandardNormal));
        Self {
            true_means,
            stationary: true,
            rng,
        }
    }

    /// Create a bandit whose latent means take a random-walk step on every
    /// pull.
    pub fn non_stationary(num_arms: usize, seed: u64) -> Self {
        Self {
            stationary: false,
            ..Self::new(num_arms, seed)
        }
    }

    /// Create a stationary bandit with the given latent means.
    pub fn from_means(means: Vec<f64>, seed: u64) -> Self {
        assert!(!means.is_empty(), "bandit must have at least one arm");
        Self {
            true_means: Array1::from_vec(means),
            stationary: true,
            rng: Prng::seed_from_u64(seed),
        }
    }

    /// The current latent mean reward of each arm.
    pub fn means(&self) -> &Array1<f64> {
        &self.true_means
    }
}

impl fmt::Display for GaussianBandit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "GaussianBandit({} arms, stationary={})",
            self.true_means.len(),
            self.stationary
        )
    }
}

impl BanditEnvironment for GaussianBandit {
    fn num_arms(&self) -> usize {
        self.true_means.len()
    }

    fn pull(&mut self, arm: usize) -> f64 {
        assert!(
            arm < self.num_arms(),
            "arm index {} out of range for {} arms",
            arm,
            self.num_arms()
        );
        if !self.stationary {
            for mean in self.true_means.iter_mut() {
                *mean += DRIFT_STD * self.rng.sample::<f64, _>(StandardNormal);
            }
        }
        self.true_means[arm] + self.rng.sample::<f64, _>(StandardNormal)
    }

    fn best_arm(&self) -> usize {
        self.true_means
            .iter()
            .copied()
            .argmax_by(|a, b| a.partial_cmp(b).expect("means are comparable"))
            .expect("at least one arm")
    }

    fn optimal_return(&self) -> f64 {
        self.true_means
            .iter()
            .copied()
            .fold(f64::NEG_INFINITY, f64::max)
    }
}
