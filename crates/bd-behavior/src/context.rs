//! Read-only simulation state passed to every adoption model call.

use bd_agent::NodeStore;
use bd_core::Round;
use bd_graph::SocialGraph;

use crate::BehaviorCatalog;

/// A read-only snapshot of the simulation state, shared by every
/// [`AdoptionModel`][crate::AdoptionModel] call in one round.
///
/// All borrows live for the duration of one round's proposal phase.  bd-sim
/// never allows mutable access to these structures while the context is
/// live, which is what makes a round's proposals independent of each other.
pub struct RoundContext<'a> {
    /// Round being computed.
    pub round: Round,

    /// Social ties.
    pub graph: &'a SocialGraph,

    /// Node state as it was when the round began.
    pub nodes: &'a NodeStore,

    /// Cost and utility of every behavior.
    pub catalog: &'a BehaviorCatalog,
}

impl<'a> RoundContext<'a> {
    #[inline]
    pub fn new(
        round:   Round,
        graph:   &'a SocialGraph,
        nodes:   &'a NodeStore,
        catalog: &'a BehaviorCatalog,
    ) -> Self {
        Self { round, graph, nodes, catalog }
    }
}
