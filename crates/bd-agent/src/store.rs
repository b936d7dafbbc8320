//! Core node storage: `NodeStore` (SoA data) and `NodeRngs` (per-node RNG).
//!
//! # Why two structs?
//!
//! The proposal phase needs `&mut NodeRngs` (exclusive access to each node's
//! RNG) and `&NodeStore` (shared read access to the pre-round snapshot)
//! simultaneously.  Keeping RNGs in a separate struct lets the borrow checker
//! see the two as disjoint:
//!
//! ```ignore
//! let nodes: &NodeStore = &sim.nodes;
//! let proposals = sim.rngs.inner
//!     .iter_mut()
//!     .enumerate()
//!     .map(|(i, rng)| model.propose(NodeId(i as u32), &ctx, rng))
//!     .collect::<Vec<_>>();
//! ```

use std::collections::BTreeSet;

use bd_core::{BehaviorId, CoreError, CoreResult, NodeId, NodeRng};

use crate::ActivitySampler;

// ── NodeRngs ──────────────────────────────────────────────────────────────────

/// Per-node deterministic RNG state, separated from [`NodeStore`] to enable
/// simultaneous `&mut NodeRngs` + `&NodeStore` borrows.
pub struct NodeRngs {
    pub inner: Vec<NodeRng>,
}

impl NodeRngs {
    /// Allocate and seed `count` per-node RNGs from `global_seed`.
    pub fn new(count: usize, global_seed: u64) -> Self {
        let inner = (0..count as u32)
            .map(|i| NodeRng::new(global_seed, NodeId(i)))
            .collect();
        Self { inner }
    }

    /// Mutable reference to one node's RNG.
    #[inline]
    pub fn get_mut(&mut self, node: NodeId) -> &mut NodeRng {
        &mut self.inner[node.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── NodeStore ─────────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all per-node diffusion state.
///
/// Every `Vec` field has exactly `count` elements; the `NodeId` value is the
/// index into all of them.
///
/// `resource` and `adopted` are only changed through [`NodeStore::adopt`] and
/// [`NodeStore::seed`], which keep `resource >= 0` and never remove an
/// adopted behavior.
#[derive(Clone, Debug)]
pub struct NodeStore {
    /// Number of nodes.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Remaining budget, decremented by the cost of each adoption.
    resource: Vec<f64>,

    /// Budget at initialization; the denominator of resource utilization.
    initial_resource: Vec<f64>,

    /// Minimum score a behavior needs to become a candidate.
    pub threshold: Vec<f64>,

    /// Posts this node publishes in the current round.
    pub posts_per_round: Vec<u32>,

    /// Posts this node reads in the current round.
    pub reads_per_round: Vec<u32>,

    /// Behaviors adopted so far.  Grows monotonically.
    adopted: Vec<BTreeSet<BehaviorId>>,
}

impl NodeStore {
    /// Store with explicit per-node values.  All slices must have the same
    /// length, every resource must be finite and non-negative, and every
    /// threshold must lie in `[0, 1]`.
    pub fn from_parts(
        resource:        Vec<f64>,
        threshold:       Vec<f64>,
        posts_per_round: Vec<u32>,
        reads_per_round: Vec<u32>,
    ) -> CoreResult<Self> {
        let count = resource.len();
        if threshold.len() != count || posts_per_round.len() != count || reads_per_round.len() != count {
            return Err(CoreError::InvalidParameter(format!(
                "per-node arrays disagree on length: {count}, {}, {}, {}",
                threshold.len(),
                posts_per_round.len(),
                reads_per_round.len()
            )));
        }
        if let Some(r) = resource.iter().find(|r| !r.is_finite() || **r < 0.0) {
            return Err(CoreError::InvalidParameter(format!(
                "resource must be finite and >= 0, got {r}"
            )));
        }
        if let Some(t) = threshold.iter().find(|t| !(0.0..=1.0).contains(*t)) {
            return Err(CoreError::InvalidParameter(format!(
                "threshold must lie in [0, 1], got {t}"
            )));
        }
        Ok(Self {
            count,
            initial_resource: resource.clone(),
            resource,
            threshold,
            posts_per_round,
            reads_per_round,
            adopted: vec![BTreeSet::new(); count],
        })
    }

    /// `true` if there are no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Iterator over all `NodeId`s in ascending index order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        (0..self.count as u32).map(NodeId)
    }

    // ── Read access ───────────────────────────────────────────────────────

    #[inline]
    pub fn resource(&self, node: NodeId) -> f64 {
        self.resource[node.index()]
    }

    #[inline]
    pub fn initial_resource(&self, node: NodeId) -> f64 {
        self.initial_resource[node.index()]
    }

    pub fn resources(&self) -> &[f64] {
        &self.resource
    }

    pub fn initial_resources(&self) -> &[f64] {
        &self.initial_resource
    }

    #[inline]
    pub fn adopted(&self, node: NodeId) -> &BTreeSet<BehaviorId> {
        &self.adopted[node.index()]
    }

    #[inline]
    pub fn has_adopted(&self, node: NodeId, behavior: BehaviorId) -> bool {
        self.adopted[node.index()].contains(&behavior)
    }

    /// Total adoptions across all nodes.
    pub fn adoption_count(&self) -> usize {
        self.adopted.iter().map(BTreeSet::len).sum()
    }

    // ── Mutation ──────────────────────────────────────────────────────────

    /// Adopt `behavior` at `cost`, paying from the node's resource.
    ///
    /// Returns `Ok(false)` without charging if the behavior was already
    /// adopted.  Fails if the node cannot afford it; the store is unchanged
    /// in that case.
    pub fn adopt(&mut self, node: NodeId, behavior: BehaviorId, cost: f64) -> CoreResult<bool> {
        let i = node.index();
        if i >= self.count {
            return Err(CoreError::NodeNotFound(node));
        }
        if self.adopted[i].contains(&behavior) {
            return Ok(false);
        }
        let available = self.resource[i];
        if cost.is_nan() || cost < 0.0 || cost > available {
            return Err(CoreError::InsufficientResource { node, cost, available });
        }
        self.resource[i] = (available - cost).max(0.0);
        self.adopted[i].insert(behavior);
        Ok(true)
    }

    /// Give `node` an initial behavior without charging its resource.
    pub fn seed(&mut self, node: NodeId, behavior: BehaviorId) -> CoreResult<bool> {
        match self.adopted.get_mut(node.index()) {
            Some(set) => Ok(set.insert(behavior)),
            None => Err(CoreError::NodeNotFound(node)),
        }
    }

    /// Redraw every node's post and read counts for the next round.
    pub fn resample_activity(&mut self, sampler: &ActivitySampler, rngs: &mut NodeRngs) {
        for (i, rng) in rngs.inner.iter_mut().enumerate().take(self.count) {
            self.posts_per_round[i] = sampler.posts(rng.inner());
            self.reads_per_round[i] = sampler.reads(rng.inner());
        }
    }
}
