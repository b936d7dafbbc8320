//! `bd-core`: foundational types for the behavior-diffusion simulator.
//!
//! This crate is a dependency of every other `bd-*` crate.  It intentionally
//! has no `bd-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `NodeId`, `BehaviorId`                                |
//! | [`round`]       | `Round` counter                                       |
//! | [`rng`]         | `NodeRng` (per-node), `SimRng` (global)               |
//! | [`config`]      | `DiffusionConfig`, `ActivityRates`                    |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod round;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{ActivityRates, DiffusionConfig};
pub use error::{CoreError, CoreResult};
pub use ids::{BehaviorId, NodeId};
pub use rng::{NodeRng, SimRng};
pub use round::Round;
