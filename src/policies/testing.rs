//! Policy testing utilities
use super::Policy;
use crate::envs::{BanditEnvironment, GaussianBandit};

/// Run repeated select/update rounds against a Gaussian bandit and check
/// that every selected arm index is in range.
pub fn selects_valid_arms<P: Policy>(policy: &mut P, num_rounds: u64) {
    let mut env = GaussianBandit::new(policy.num_arms(), 83);
    for _ in 0..num_rounds {
        let action = policy.select_action();
        assert!(action < policy.num_arms());
        let reward = env.pull(action);
        policy.update(action, reward);
    }
}

/// Train on a two-armed bandit with well separated means, then check that
/// the policy mostly selects the better arm.
///
/// The arms have latent means -1 and +1, so the better arm is index 1.
pub fn learns_two_armed_bandit<P: Policy>(policy: &mut P, num_train_rounds: u64, threshold: f64) {
    assert_eq!(policy.num_arms(), 2, "harness expects a two-armed policy");
    let mut env = GaussianBandit::from_means(vec![-1.0, 1.0], 17);
    for _ in 0..num_train_rounds {
        let action = policy.select_action();
        let reward = env.pull(action);
        policy.update(action, reward);
    }

    let num_eval_rounds = 1000;
    let mut better_arm_count = 0;
    for _ in 0..num_eval_rounds {
        let action = policy.select_action();
        if action == 1 {
            better_arm_count += 1;
        }
        let reward = env.pull(action);
        policy.update(action, reward);
    }
    assert!(
        f64::from(better_arm_count) >= threshold * f64::from(num_eval_rounds),
        "better arm selected only {} of {} times",
        better_arm_count,
        num_eval_rounds
    );
}
