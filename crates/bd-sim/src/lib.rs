//! `bd-sim`: round loop orchestrator for the behavior-diffusion simulator.
//!
//! # Two-phase round loop
//!
//! ```text
//! while rounds < config.max_rounds (unbounded if unset):
//!   ① Proposals: call AdoptionModel::propose for every node against the
//!                 pre-round snapshot (parallel with the `parallel` feature).
//!   ② Apply    : for each proposal in ascending NodeId order, charge the
//!                 behavior costs and add them to the node's adopted set.
//!   ③ Resample : redraw every node's post and read counts.
//!   ④ Stop     : if no node adopted anything this round (equilibrium).
//! ```
//!
//! # Cargo features
//!
//! | Feature    | Effect                                                 |
//! |------------|--------------------------------------------------------|
//! | `parallel` | Runs the proposal phase on Rayon's thread pool.        |
//! | `serde`    | Adds `Serialize`/`Deserialize` to `RunOutcome`.        |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use bd_core::DiffusionConfig;
//! use bd_graph::SocialGraph;
//!
//! let config = DiffusionConfig { seed: 42, ..DiffusionConfig::default() };
//! let (outcome, sim) = bd_sim::run(SocialGraph::ring(100), &config)?;
//! println!("{:?} after {} rounds, utilization {:.3}",
//!          outcome.termination, outcome.rounds, outcome.utilization);
//! ```

pub mod builder;
pub mod error;
pub mod metrics;
pub mod observer;
pub mod sim;


pub use builder::{seed_count, SimBuilder};
pub use error::{SimError, SimResult};
pub use metrics::{adopter_fraction, behavior_uptake, resource_utilization};
pub use observer::{NoopObserver, RoundHistory, RoundSummary, SimObserver};
pub use sim::{run, RoundReport, RunOutcome, Sim, Termination};
