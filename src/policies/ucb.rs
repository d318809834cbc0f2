//! Upper confidence bound bandit policy.
use super::{BuildPolicy, BuildPolicyError, Policy};
use crate::utils::iter::ArgMaxBy;
use crate::Prng;
use ndarray::Array1;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a [`Ucb`] policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UcbConfig {
    /// Scale factor on the confidence interval; controls the exploration
    /// rate. Larger values keep under-sampled arms attractive for longer.
    pub confidence: f64,
}

impl UcbConfig {
    pub const fn new(confidence: f64) -> Self {
        Self { confidence }
    }
}

impl Default for UcbConfig {
    fn default() -> Self {
        Self::new(2.0)
    }
}

impl BuildPolicy for UcbConfig {
    type Policy = Ucb;

    fn build_policy(&self, num_arms: usize, seed: u64) -> Result<Ucb, BuildPolicyError> {
        if num_arms == 0 {
            return Err(BuildPolicyError::NoArms);
        }
        if self.confidence < 0.0 {
            return Err(BuildPolicyError::Negative {
                name: "confidence",
                value: self.confidence,
            });
        }
        Ok(Ucb::new(num_arms, self.confidence, seed))
    }
}

/// An upper-confidence-bound bandit policy.
///
/// Every arm is tried once (in uniformly random order) before the
/// confidence-bound score `q + c * sqrt(ln(t) / n)` is applied, so the score
/// is never evaluated with a zero visit count or a zero round total.
pub struct Ucb {
    /// Scale factor on the confidence interval.
    pub confidence: f64,
    /// Sample-mean estimate of each arm's reward.
    pub q_values: Array1<f64>,
    /// Number of updates observed for each arm.
    pub action_counts: Array1<u64>,
    /// Total updates observed across all arms.
    pub total_pulls: u64,
    rng: Prng,
}

impl Ucb {
    pub fn new(num_arms: usize, confidence: f64, seed: u64) -> Self {
        assert!(num_arms > 0, "policy requires at least one arm");
        Self {
            confidence,
            q_values: Array1::zeros(num_arms),
            action_counts: Array1::zeros(num_arms),
            total_pulls: 0,
            rng: Prng::seed_from_u64(seed),
        }
    }
}

impl fmt::Display for Ucb {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Ucb(c={})", self.confidence)
    }
}

impl Policy for Ucb {
    fn num_arms(&self) -> usize {
        self.q_values.len()
    }

    fn select_action(&mut self) -> usize {
        let unvisited: Vec<usize> = self
            .action_counts
            .iter()
            .enumerate()
            .filter(|(_, &count)| count == 0)
            .map(|(arm, _)| arm)
            .collect();
        if !unvisited.is_empty() {
            return *unvisited
                .choose(&mut self.rng)
                .expect("at least one unvisited arm");
        }

        // Every count is at least 1 and total_pulls >= num_arms >= 1.
        let log_total = (self.total_pulls as f64).ln();
        let confidence = self.confidence;
        let scores = &self.q_values
            + &self
                .action_counts
                .mapv(|count| confidence * (log_total / count as f64).sqrt());
        scores
            .iter()
            .copied()
            .argmax_by(|a, b| a.partial_cmp(b).expect("scores are comparable"))
            .expect("at least one arm")
    }

    fn update(&mut self, action: usize, reward: f64) {
        assert!(
            action < self.num_arms(),
            "arm index {} out of range for {} arms",
            action,
            self.num_arms()
        );
        self.total_pulls += 1;
        self.action_counts[action] += 1;
        self.q_values[action] +=
            (reward - self.q_values[action]) / self.action_counts[action] as f64;
    }
}
