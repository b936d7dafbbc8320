//! `bd-agent`: Structure-of-Arrays node state for the diffusion simulator.
//!
//! # Crate layout
//!
//! | Module         | Contents                                                  |
//! |----------------|-----------------------------------------------------------|
//! | [`store`]      | `NodeStore` (SoA arrays), `NodeRngs` (per-node RNG)       |
//! | [`activity`]   | `ActivitySampler`: Poisson post/read counts              |
//! | [`builder`]    | `NodeStoreBuilder`: draws initial resources, thresholds, activity |
//!
//! The graph itself lives in `bd-graph`; `NodeId` indexes both.

pub mod activity;
pub mod builder;
pub mod store;

#[cfg(test)]
mod tests;

pub use activity::ActivitySampler;
pub use builder::NodeStoreBuilder;
pub use store::{NodeRngs, NodeStore};
