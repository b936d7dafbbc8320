//! The `AdoptionModel` trait: the rule a node uses to pick new behaviors.

use bd_core::{BehaviorId, NodeId, NodeRng};

use crate::RoundContext;

/// Behaviors one node proposes to adopt this round, in commit order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Adoption {
    pub behaviors: Vec<BehaviorId>,
    /// Sum of the proposed behaviors' costs.
    pub spent: f64,
}

impl Adoption {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.behaviors.is_empty()
    }
}

/// Pluggable adoption rule.
///
/// Implementations receive a read-only [`RoundContext`] and the node's own
/// [`NodeRng`], so a proposal depends only on the pre-round state and the
/// node's random stream, never on the order nodes are visited in.
///
/// # Thread safety
///
/// With the `parallel` feature bd-sim calls `propose` for many nodes at once,
/// so implementations must be `Send + Sync`.
pub trait AdoptionModel: Send + Sync + 'static {
    /// Behaviors `node` wants to adopt this round.  An empty proposal means
    /// "adopt nothing".
    ///
    /// The apply phase charges each behavior's cost against the node's
    /// resource in order; proposing something the node cannot afford is an
    /// error there.
    fn propose(&self, node: NodeId, ctx: &RoundContext<'_>, rng: &mut NodeRng) -> Adoption;

    /// The social weight `W` this model scores with, if it has one.
    ///
    /// bd-sim refuses to build a simulation whose configured `W` differs
    /// from the value reported here.  Models that do not blend social signal
    /// with utility keep the default `None`.
    fn social_weight(&self) -> Option<f64> {
        None
    }
}
