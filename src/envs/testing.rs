//! Environment testing utilities
use super::BanditEnvironment;
use crate::policies::{Policy, RandomPolicy};

/// Pull arms uniformly at random and check that environment invariants hold.
pub fn run_random<E: BanditEnvironment>(env: &mut E, num_pulls: u64, seed: u64) {
    let mut policy = RandomPolicy::new(env.num_arms(), seed);
    for _ in 0..num_pulls {
        let arm = policy.select_action();
        assert!(arm < env.num_arms());
        let reward = env.pull(arm);
        assert!(reward.is_finite());
        assert!(env.best_arm() < env.num_arms());
        assert!(env.optimal_return().is_finite());
        policy.update(arm, reward);
    }
}
