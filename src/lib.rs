//! A k-armed bandit simulation library.
#![warn(clippy::cast_lossless)]
#![warn(clippy::doc_markdown)]
#![warn(clippy::explicit_iter_loop)]
#![warn(clippy::needless_borrow)]
#![warn(clippy::needless_pass_by_value)]
#![warn(clippy::redundant_closure_for_method_calls)]
#![warn(clippy::use_self)]
pub mod envs;
mod error;
pub mod logging;
pub mod policies;
pub mod simulation;
pub mod utils;

pub use envs::{BanditEnvironment, GaussianBandit};
pub use error::BanditError;
pub use policies::{BuildPolicy, Policy};
pub use simulation::{run, run_steps, RunSummary, Step};

/// Deterministic pseudo-random number generator used by environments and
/// policies.
pub type Prng = rand_chacha::ChaCha8Rng;
