//! Action-selection policies for multi-armed bandits
mod epsilon_greedy;
mod gradient;
mod random;
#[cfg(test)]
pub mod testing;
mod thompson_sampling;
mod ucb;

pub use epsilon_greedy::{EpsilonGreedy, EpsilonGreedyConfig};
pub use gradient::{GradientBandit, GradientBanditConfig};
pub use random::RandomPolicy;
pub use thompson_sampling::{ThompsonSampling, ThompsonSamplingConfig};
pub use ucb::{Ucb, UcbConfig};

use thiserror::Error;

/// An action-selection policy for a multi-armed bandit.
///
/// A policy repeatedly proposes an arm index and revises its internal
/// belief state from the reward observed for that arm.
pub trait Policy {
    /// The number of arms this policy selects among.
    fn num_arms(&self) -> usize;

    /// Choose an arm index in `[0, num_arms)`.
    fn select_action(&mut self) -> usize;

    /// Revise the belief state from the reward observed for `action`.
    ///
    /// `action` is assumed to be the most recent value returned by
    /// [`select_action`](Self::select_action).
    ///
    /// # Panics
    /// If `action` is not in `[0, num_arms)`.
    fn update(&mut self, action: usize, reward: f64);
}

impl<P: Policy + ?Sized> Policy for Box<P> {
    fn num_arms(&self) -> usize {
        P::num_arms(self)
    }
    fn select_action(&mut self) -> usize {
        P::select_action(self)
    }
    fn update(&mut self, action: usize, reward: f64) {
        P::update(self, action, reward)
    }
}

/// Build a policy instance.
pub trait BuildPolicy {
    type Policy: Policy;

    /// Build a policy over `num_arms` arms.
    ///
    /// # Args
    /// * `num_arms` - Number of arms to select among.
    /// * `seed` - Seeds the policy's pseudo-random state.
    fn build_policy(&self, num_arms: usize, seed: u64) -> Result<Self::Policy, BuildPolicyError>;
}

/// Error building a policy.
#[derive(Debug, Error, PartialEq)]
pub enum BuildPolicyError {
    #[error("policy requires at least one arm")]
    NoArms,
    #[error("{name} must be a probability in [0, 1], got {value}")]
    InvalidProbability { name: &'static str, value: f64 },
    #[error("{name} must be positive, got {value}")]
    NonPositive { name: &'static str, value: f64 },
    #[error("{name} must not be negative, got {value}")]
    Negative { name: &'static str, value: f64 },
}
