//! Sequential simulation of a policy acting in a bandit environment.
use crate::envs::BanditEnvironment;
use crate::logging::{Loggable, StatsLogger};
use crate::policies::Policy;

/// One round of interaction between a policy and an environment.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Step {
    /// The arm pulled this round.
    pub action: usize,
    /// The reward the environment produced.
    pub reward: f64,
}

/// Run a policy in an environment until the callback returns false.
///
/// Each round selects an arm, pulls it, feeds the reward back into the
/// policy, and logs the action and reward.
pub fn run<E, P, F>(env: &mut E, policy: &mut P, logger: &mut dyn StatsLogger, callback: &mut F)
where
    E: BanditEnvironment + ?Sized,
    P: Policy + ?Sized,
    F: FnMut(&Step) -> bool,
{
    loop {
        let action = policy.select_action();
        let reward = env.pull(action);
        policy.update(action, reward);

        logger.log(
            "action",
            Loggable::IndexSample {
                value: action,
                size: env.num_arms(),
            },
        );
        logger.log("reward", Loggable::Scalar(reward));
        logger.end_round();

        if !callback(&Step { action, reward }) {
            break;
        }
    }
}

/// Statistics accumulated over a fixed-length run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    /// Number of rounds simulated.
    pub num_steps: u64,
    /// Sum of all observed rewards.
    pub total_reward: f64,
    /// Sum of the environment's per-round optimal expected return.
    pub total_optimal_return: f64,
    /// Number of pulls of each arm.
    pub action_counts: Vec<u64>,
}

impl RunSummary {
    /// Mean reward per round.
    pub fn mean_reward(&self) -> f64 {
        if self.num_steps == 0 {
            0.0
        } else {
            self.total_reward / self.num_steps as f64
        }
    }

    /// Gap between the best achievable expected return and the realized
    /// reward, summed over the run.
    pub fn regret(&self) -> f64 {
        self.total_optimal_return - self.total_reward
    }
}

/// Run a policy in an environment for a fixed number of rounds.
///
/// The optimal return is re-queried every round so the regret baseline stays
/// correct for non-stationary environments.
pub fn run_steps<E, P>(
    env: &mut E,
    policy: &mut P,
    num_steps: u64,
    logger: &mut dyn StatsLogger,
) -> RunSummary
where
    E: BanditEnvironment + ?Sized,
    P: Policy + ?Sized,
{
    let mut summary = RunSummary {
        num_steps: 0,
        total_reward: 0.0,
        total_optimal_return: 0.0,
        action_counts: vec![0; env.num_arms()],
    };
    for _ in 0..num_steps {
        let action = policy.select_action();
        let reward = env.pull(action);
        policy.update(action, reward);

        logger.log(
            "action",
            Loggable::IndexSample {
                value: action,
                size: env.num_arms(),
            },
        );
        logger.log("reward", Loggable::Scalar(reward));
        logger.end_round();

        summary.num_steps += 1;
        summary.total_reward += reward;
        summary.total_optimal_return += env.optimal_return();
        summary.action_counts[action] += 1;
    }
    summary
}

#[cfg(test)]
mod simulation {
    use super::*;
    use crate::envs::{EnvBuilder, GaussianBandit, GaussianBanditConfig};
    use crate::logging::DisplayLogger;
    use crate::policies::{BuildPolicy, EpsilonGreedyConfig, RandomPolicy};
    use crate::BanditError;

    #[test]
    fn run_stops_when_callback_returns_false() {
        let mut env = GaussianBandit::new(3, 0);
        let mut policy = RandomPolicy::new(3, 1);
        let mut rounds = 0;
        run(&mut env, &mut policy, &mut (), &mut |_| {
            rounds += 1;
            rounds < 10
        });
        assert_eq!(rounds, 10);
    }

    #[test]
    fn summary_counts_every_round() {
        let mut env = GaussianBandit::from_means(vec![0.0, 1.0], 2);
        let mut policy = RandomPolicy::new(2, 3);
        let summary = run_steps(&mut env, &mut policy, 400, &mut ());
        assert_eq!(summary.num_steps, 400);
        assert_eq!(summary.action_counts.iter().sum::<u64>(), 400);
        assert!((summary.total_optimal_return - 400.0).abs() < 1e-9);
        // A random policy forfeits about half the optimal return here.
        assert!(summary.regret() > 50.0);
        assert!(summary.regret() < 350.0);
        assert!(summary.mean_reward().is_finite());
    }

    #[test]
    fn empty_run_has_zero_mean_reward() {
        let mut env = GaussianBandit::new(2, 4);
        let mut policy = RandomPolicy::new(2, 5);
        let summary = run_steps(&mut env, &mut policy, 0, &mut ());
        assert_eq!(summary.mean_reward(), 0.0);
        assert_eq!(summary.regret(), 0.0);
    }

    #[test]
    fn builds_from_configs() -> Result<(), BanditError> {
        let mut env = GaussianBanditConfig::default().build_env(6)?;
        let mut policy = EpsilonGreedyConfig::default().build_policy(env.num_arms(), 7)?;
        let summary = run_steps(&mut env, &mut policy, 100, &mut DisplayLogger::new(50));
        assert_eq!(summary.num_steps, 100);
        Ok(())
    }
}
