//! `bd-behavior`: behaviors and the rules nodes use to adopt them.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                        |
//! |---------------|-----------------------------------------------------------------|
//! | [`catalog`]   | `BehaviorCatalog`: cost and utility per behavior               |
//! | [`context`]   | `RoundContext<'a>`: read-only pre-round snapshot               |
//! | [`model`]     | `AdoptionModel` trait, `Adoption` proposal                      |
//! | [`threshold`] | `ThresholdModel`: observe, score, select under budget          |
//! | [`noop`]      | `NoopModel`: never proposes anything                           |
//! | [`error`]     | `BehaviorError`, `BehaviorResult<T>`                            |
//!
//! # Design notes
//!
//! A round in bd-sim works as follows:
//!
//! 1. **Proposal phase**: for every node, call `AdoptionModel::propose`.
//!    All reads go through `&RoundContext`, which borrows the state as it
//!    was when the round began; no mutation.
//!
//! 2. **Apply phase** (sequential): consume the collected `Adoption`s and
//!    mutate `NodeStore` accordingly.
//!
//! Adoptions made in a round therefore never influence other nodes' signals
//! in the same round.

pub mod catalog;
pub mod context;
pub mod error;
pub mod model;
pub mod noop;
pub mod threshold;


pub use catalog::BehaviorCatalog;
pub use context::RoundContext;
pub use error::{BehaviorError, BehaviorResult};
pub use model::{Adoption, AdoptionModel};
pub use noop::NoopModel;
pub use threshold::ThresholdModel;
