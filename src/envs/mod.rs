//! Bandit environments
mod bandits;
#[cfg(test)]
pub mod testing;

pub use bandits::{GaussianBandit, GaussianBanditConfig};

use thiserror::Error;

/// A stochastic reward-generating environment with a fixed number of arms.
pub trait BanditEnvironment {
    /// The number of arms.
    fn num_arms(&self) -> usize;

    /// Sample a reward for pulling the given arm.
    ///
    /// This is the only state-mutating call: a non-stationary environment
    /// perturbs its latent means before sampling.
    ///
    /// # Panics
    /// If `arm` is not in `[0, num_arms)`.
    fn pull(&mut self, arm: usize) -> f64;

    /// The arm with the highest expected reward at this instant.
    ///
    /// Ties are broken by the lowest index.
    fn best_arm(&self) -> usize;

    /// The highest expected reward achievable at this instant.
    ///
    /// Drifts over time in a non-stationary environment, so it must be
    /// re-queried every round when used as a regret baseline.
    fn optimal_return(&self) -> f64;
}

impl<E: BanditEnvironment + ?Sized> BanditEnvironment for Box<E> {
    fn num_arms(&self) -> usize {
        E::num_arms(self)
    }
    fn pull(&mut self, arm: usize) -> f64 {
        E::pull(self, arm)
    }
    fn best_arm(&self) -> usize {
        E::best_arm(self)
    }
    fn optimal_return(&self) -> f64 {
        E::optimal_return(self)
    }
}

/// Build an environment instance.
pub trait EnvBuilder<E> {
    /// Build an environment.
    ///
    /// # Args
    /// * `seed` - Seeds the environment's pseudo-random state.
    fn build_env(&self, seed: u64) -> Result<E, BuildEnvError>;
}

/// Error building an environment.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildEnvError {
    #[error("environment must have at least one arm")]
    NoArms,
}
