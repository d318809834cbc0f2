//! Gradient bandit policy with softmax action preferences.
use super::{BuildPolicy, BuildPolicyError, Policy};
use crate::Prng;
use ndarray::Array1;
use rand::distributions::{Distribution, WeightedIndex};
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Configuration for a [`GradientBandit`] policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GradientBanditConfig {
    /// Step size for the preference gradient updates.
    pub learning_rate: f64,
    /// Center the reward signal on the running mean reward. Reduces the
    /// variance of the preference updates.
    pub use_baseline: bool,
}

impl GradientBanditConfig {
    pub const fn new(learning_rate: f64) -> Self {
        Self {
            learning_rate,
            use_baseline: false,
        }
    }
}

impl Default for GradientBanditConfig {
    fn default() -> Self {
        Self::new(0.1)
    }
}

impl BuildPolicy for GradientBanditConfig {
    type Policy = GradientBandit;

    fn build_policy(&self, num_arms: usize, seed: u64) -> Result<GradientBandit, BuildPolicyError> {
        if num_arms == 0 {
            return Err(BuildPolicyError::NoArms);
        }
        if self.learning_rate <= 0.0 {
            return Err(BuildPolicyError::NonPositive {
                name: "learning_rate",
                value: self.learning_rate,
            });
        }
        Ok(GradientBandit::new(
            num_arms,
            self.learning_rate,
            self.use_baseline,
            seed,
        ))
    }
}

/// A gradient bandit policy.
///
/// Maintains a real-valued preference per arm and selects through the
/// softmax (Boltzmann) distribution over the preferences. Updates follow the
/// softmax policy-gradient rule with an optional mean-reward baseline: the
/// selected arm's preference moves with `1 - p(arm)` and every other arm's
/// against `p(arm)`, scaled by the (optionally centered) reward.
pub struct GradientBandit {
    /// Step size for the preference gradient updates.
    pub learning_rate: f64,
    /// Whether the reward signal is centered on the running mean reward.
    pub use_baseline: bool,
    /// Action preference for each arm.
    pub preferences: Array1<f64>,
    /// Running mean of all observed rewards.
    pub mean_reward: f64,
    /// Total number of updates observed.
    pub step_count: u64,
    /// Selection probabilities cached by the most recent `select_action`
    /// call, consumed by the following `update`.
    probs: Option<Array1<f64>>,
    rng: Prng,
}

impl GradientBandit {
    pub fn new(num_arms: usize, learning_rate: f64, use_baseline: bool, seed: u64) -> Self {
        assert!(num_arms > 0, "policy requires at least one arm");
        Self {
            learning_rate,
            use_baseline,
            preferences: Array1::zeros(num_arms),
            mean_reward: 0.0,
            step_count: 0,
            probs: None,
            rng: Prng::seed_from_u64(seed),
        }
    }

    /// Softmax over the current preferences.
    ///
    /// The maximum preference is subtracted before exponentiating so the
    /// exponentials cannot overflow.
    fn softmax(&self) -> Array1<f64> {
        let max_preference = self.preferences.fold(f64::NEG_INFINITY, |max, &p| max.max(p));
        let exp = self.preferences.mapv(|p| (p - max_preference).exp());
        let total = exp.sum();
        exp / total
    }
}

impl fmt::Display for GradientBandit {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "GradientBandit(lr={}, baseline={})",
            self.learning_rate, self.use_baseline
        )
    }
}

impl Policy for GradientBandit {
    fn num_arms(&self) -> usize {
        self.preferences.len()
    }

    fn select_action(&mut self) -> usize {
        let probs = self.softmax();
        let action = WeightedIndex::new(probs.iter())
            .expect("softmax probabilities are positive and finite")
            .sample(&mut self.rng);
        self.probs = Some(probs);
        action
    }

    /// # Panics
    /// If no `select_action` call precedes this update: the cached selection
    /// probabilities are consumed by each update, so every update must be
    /// paired with the `select_action` that produced it.
    fn update(&mut self, action: usize, reward: f64) {
        let probs = self
            .probs
            .take()
            .expect("select_action must be called before each update");
        assert!(
            action < self.num_arms(),
            "arm index {} out of range for {} arms",
            action,
            self.num_arms()
        );
        self.step_count += 1;
        self.mean_reward += (reward - self.mean_reward) / self.step_count as f64;
        let reward_diff = if self.use_baseline {
            reward - self.mean_reward
        } else {
            reward
        };
        for (arm, (preference, &prob)) in
            self.preferences.iter_mut().zip(probs.iter()).enumerate()
        {
            if arm == action {
                *preference += self.learning_rate * reward_diff * (1.0 - prob);
            } else {
                *preference -= self.learning_rate * reward_diff * prob;
            }
        }
    }
}

#[cfg(test)]
mod gradient_bandit {
    use super::super::testing;
    use super::*;
    use ndarray::array;
    use rstest::rstest;

    #[rstest]
    #[case(1)]
    #[case(4)]
    #[case(11)]
    fn selects_valid_arms(#[case] num_arms: usize) {
        let mut policy = GradientBanditConfig::default()
            .build_policy(num_arms, 0)
            .unwrap();
        testing::selects_valid_arms(&mut policy, 10_000);
    }

    #[test]
    fn softmax_is_stable_for_extreme_preferences() {
        let mut policy = GradientBanditConfig::default().build_policy(3, 1).unwrap();
        policy.preferences = array![1000.0, -1000.0, 999.0];
        policy.select_action();
        let probs = policy.probs.as_ref().unwrap();
        assert!(probs.iter().all(|p| p.is_finite()));
        assert!((probs.sum() - 1.0).abs() < 1e-12);
        assert!(probs[0] > probs[2] && probs[2] > probs[1]);
    }

    #[test]
    fn preference_mass_is_conserved() {
        let mut policy = GradientBanditConfig::default().build_policy(4, 2).unwrap();
        let action = policy.select_action();
        policy.update(action, 2.5);
        assert!(policy.preferences.sum().abs() < 1e-12);
        assert!(policy.preferences[action] > 0.0);
    }

    #[test]
    #[should_panic(expected = "select_action must be called")]
    fn update_without_select_panics() {
        let mut policy = GradientBanditConfig::default().build_policy(3, 3).unwrap();
        policy.update(0, 1.0);
    }

    #[test]
    #[should_panic(expected = "select_action must be called")]
    fn second_update_without_fresh_select_panics() {
        let mut policy = GradientBanditConfig::default().build_policy(3, 4).unwrap();
        let action = policy.select_action();
        policy.update(action, 1.0);
        policy.update(action, 1.0);
    }

    #[test]
    fn baseline_tracks_mean_reward() {
        let config = GradientBanditConfig {
            learning_rate: 0.1,
            use_baseline: true,
        };
        let mut policy = config.build_policy(2, 5).unwrap();
        let action = policy.select_action();
        policy.update(action, 1.0);
        let action = policy.select_action();
        policy.update(action, 3.0);
        assert!((policy.mean_reward - 2.0).abs() < 1e-12);
        assert_eq!(policy.step_count, 2);
    }

    #[test]
    fn first_baselined_update_leaves_preferences_unchanged() {
        let config = GradientBanditConfig {
            learning_rate: 0.1,
            use_baseline: true,
        };
        let mut policy = config.build_policy(3, 6).unwrap();
        let action = policy.select_action();
        // The running mean equals the reward after one observation, so the
        // centered reward signal is exactly zero.
        policy.update(action, 5.0);
        assert!(policy.preferences.iter().all(|&p| p == 0.0));
    }

    #[test]
    fn build_rejects_non_positive_learning_rate() {
        assert_eq!(
            GradientBanditConfig::new(0.0).build_policy(2, 7).err(),
            Some(BuildPolicyError::NonPositive {
                name: "learning_rate",
                value: 0.0
            })
        );
    }

    #[test]
    fn build_rejects_zero_arms() {
        assert_eq!(
            GradientBanditConfig::default().build_policy(0, 8).err(),
            Some(BuildPolicyError::NoArms)
        );
    }

    #[test]
    fn learns_two_armed_bandit() {
        let config = GradientBanditConfig {
            learning_rate: 0.1,
            use_baseline: true,
        };
        let mut policy = config.build_policy(2, 9).unwrap();
        testing::learns_two_armed_bandit(&mut policy, 2000, 0.7);
    }
}
