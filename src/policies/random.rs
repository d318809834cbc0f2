//! Uniform random baseline policy.
use super::Policy;
use crate::Prng;
use rand::{Rng, SeedableRng};
use std::fmt;

/// A policy that selects arms uniformly at random and never learns.
///
/// Useful as a baseline when evaluating the learning policies.
pub struct RandomPolicy {
    num_arms: usize,
    rng: Prng,
}

impl RandomPolicy {
    pub fn new(num_arms: usize, seed: u64) -> Self {
        assert!(num_arms > 0, "policy requires at least one arm");
        Self {
            num_arms,
            rng: Prng::seed_from_u64(seed),
        }
    }
}

impl fmt::Display for RandomPolicy {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "RandomPolicy({} arms)", self.num_arms)
    }
}

impl Policy for RandomPolicy {
    fn num_arms(&self) -> usize {
        self.num_arms
    }

    fn select_action(&mut self) -> usize {
        self.rng.gen_range(0..self.num_arms)
    }

    fn update(&mut self, action: usize, _reward: f64) {
        assert!(
            action < self.num_arms,
            "arm index {} out of range for {} arms",
            action,
            self.num_arms
        );
    }
}

#[cfg(test)]
mod random_policy {
    use super::*;

    #[test]
    fn selects_valid_arms() {
        let mut policy = RandomPolicy::new(5, 0);
        for _ in 0..10_000 {
            assert!(policy.select_action() < 5);
        }
    }

    #[test]
    fn covers_every_arm() {
        let num_arms = 4;
        let mut policy = RandomPolicy::new(num_arms, 1);
        let mut counts = vec![0u64; num_arms];
        for _ in 0..1000 {
            counts[policy.select_action()] += 1;
        }
        assert!(counts.iter().all(|&count| count > 0));
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn update_rejects_out_of_range_arm() {
        let mut policy = RandomPolicy::new(2, 2);
        policy.update(2, 0.0);
    }
}
