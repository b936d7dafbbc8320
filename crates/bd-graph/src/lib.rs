//! `bd-graph`: the social graph the diffusion runs over, plus the operations
//! that shape it before a run.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                     |
//! |--------------|--------------------------------------------------------------|
//! | [`graph`]    | `SocialGraph` (adjacency lists + labels), `GraphBuilder`     |
//! | [`perturb`]  | `perturb`, `add_random_edges`: uniform new-edge sampling    |
//! | [`generate`] | `erdos_renyi`, `copy_model`, `CopyModelParams`               |
//! | [`error`]    | `GraphError`, `GraphResult<T>`                               |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | FxHash edge sets instead of SipHash.                       |
//! | `serde`   | Derives `Serialize`/`Deserialize` on generator parameters. |

pub mod error;
pub mod generate;
pub mod graph;
pub mod perturb;

#[cfg(test)]
mod tests;

pub use error::{GraphError, GraphResult};
pub use generate::{copy_model, erdos_renyi, CopyModelParams, Mechanism, MechanismWeights};
pub use graph::{GraphBuilder, SocialGraph};
pub use perturb::{add_random_edges, perturb, target_edge_count};

/// Set of undirected edges keyed by `(min, max)` node index.
#[cfg(feature = "fx-hash")]
pub(crate) type EdgeSet = rustc_hash::FxHashSet<(u32, u32)>;

#[cfg(not(feature = "fx-hash"))]
pub(crate) type EdgeSet = std::collections::HashSet<(u32, u32)>;
