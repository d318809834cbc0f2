//! Epsilon-greedy bandit policy.
use super::{BuildPolicy, BuildPolicyError, Policy};
use crate::utils::iter::ArgMaxBy;
use crate::Prng;
use ndarray::Array1;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Initial action-value estimate used when optimistic initialization is on.
///
/// Large relative to standard-normal arm means, so every arm looks worth
/// trying until it has actually been sampled.
const OPTIMISTIC_INITIAL_VALUE: f64 = 5.0;

/// Configuration for an [`EpsilonGreedy`] policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EpsilonGreedyConfig {
    /// Probability of taking a uniformly random exploratory action.
    pub epsilon: f64,
    /// Start the action-value estimates at an optimistic constant instead of
    /// zero, encouraging early exploration without explicit randomness.
    pub optimistic: bool,
    /// Fixed step size for the value update. Uses the sample-average rule
    /// (step size `1 / visit_count`) when unset.
    pub learning_rate: Option<f64>,
}

impl EpsilonGreedyConfig {
    pub const fn new(epsilon: f64) -> Self {
        Self {
            epsilon,
            optimistic: false,
            learning_rate: None,
        }
    }
}

impl Default for EpsilonGreedyConfig {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl BuildPolicy for EpsilonGreedyConfig {
    type Policy = EpsilonGreedy;

    fn build_policy(&self, num_arms: usize, seed: u64) -> Result<EpsilonGreedy, BuildPolicyError> {
        if num_arms == 0 {
            return Err(BuildPolicyError::NoArms);
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(BuildPolicyError::InvalidProbability {
                name: "epsilon",
                value: self.epsilon,
            });
        }
        if let Some(rate) = self.learning_rate {
            if rate <= 0.0 {
                return Err(BuildPolicyError::NonPositive {
                    name: "learning_rate",
                    value: rate,
                });
            }
        }
        Ok(EpsilonGreedy::new(
            num_arms,
            self.epsilon,
            self.optimistic,
            self.learning_rate,
            seed,
        ))
    }
}

/// An epsilon-greedy bandit policy.
///
/// Exploits the arm with the highest running value estimate, except that
/// with probability `epsilon` it explores a uniformly random arm instead.
pub struct EpsilonGreedy {
    /// Probability of taking a uniformly random exploratory action.
    pub epsilon: f64,
    /// Fixed step size; sample-average rule when `None`.
    pub learning_rate: Option<f64>,
    /// Running estimate of each arm's mean reward.
    pub q_values: Array1<f64>,
    /// Number of updates observed for each arm.
    pub action_counts: Array1<u64>,
    rng: Prng,
}

impl EpsilonGreedy {
    pub fn new(
        num_arms: usize,
        epsilon: f64,
        optimistic: bool,
        learning_rate: Option<f64>,
        seed: u64,
    ) -> Self {
        assert!(num_arms > 0, "policy requires at least one arm");
        let initial_value = if optimistic {
            OPTIMISTIC_INITIAL_VALUE
        } else {
            0.0
        };
        Self {
            epsilon,
            learning_rate,
            q_values: Array1::from_elem(num_arms, initial_value),
            action_counts: Array1::zeros(num_arms),
            rng: Prng::seed_from_u64(seed),
        }
    }
}

impl fmt::Display for EpsilonGreedy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "EpsilonGreedy(epsilon={})", self.epsilon)
    }
}

impl Policy for EpsilonGreedy {
    fn num_arms(&self) -> usize {
        self.q_values.len()
    }

    fn select_action(&mut self) -> usize {
        if self.rng.gen::<f64>() < self.epsilon {
            self.rng.gen_range(0..self.num_arms())
        } else {
            self.q_values
                .iter()
                .copied()
                .argmax_by(|a, b| a.partial_cmp(b).expect("value estimates are comparable"))
                .expect("at least one arm")
        }
    }

    fn update(&mut self, action: usize, reward: f64) {
        assert!(
            action < self.num_arms(),
            "arm index {} out of range for {} arms",
            action,
            self.num_arms()
        );
        self.action_counts[action] += 1;
        let step_size = match self.learning_rate {
            Some(rate) => rate,
            None => 1.0 / self.action_counts[action] as f64,
        };
        self.q_values[action] += step_size * (reward - self.q_values[action]);
    }
}
