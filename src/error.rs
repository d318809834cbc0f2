//! Error type
use crate::envs::BuildEnvError;
use crate::policies::BuildPolicyError;
use thiserror::Error;

/// Error from the bandit crate.
#[derive(Error, Debug)]
pub enum BanditError {
    #[error("error building policy")]
    BuildPolicy(#[from] BuildPolicyError),
    #[error("error building environment")]
    BuildEnv(#[from] BuildEnvError),
}
