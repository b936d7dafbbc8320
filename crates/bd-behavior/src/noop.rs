//! A no-op adoption model: nodes never adopt anything.

use bd_core::{NodeId, NodeRng};

use crate::{Adoption, AdoptionModel, RoundContext};

/// An [`AdoptionModel`] that always returns an empty proposal.
///
/// Useful as a placeholder in tests: a run under `NoopModel` reaches
/// equilibrium after its first round.
pub struct NoopModel;

impl AdoptionModel for NoopModel {
    fn propose(&self, _node: NodeId, _ctx: &RoundContext<'_>, _rng: &mut NodeRng) -> Adoption {
        Adoption::none()
    }
}
