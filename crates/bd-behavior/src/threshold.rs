//! Threshold adoption: observe neighbours' posts, score behaviors, then
//! adopt greedily under the node's remaining resource.
//!
//! # Per-node update
//!
//! 1. **Observe.**  Every neighbour contributes one post per unit of its
//!    `posts_per_round`.  The node reads `min(posts, reads_per_round)` of
//!    them, sampled without replacement.  No posts means no adoption.
//! 2. **Signal.**  For each behavior held by the source of at least one read
//!    post, `signal = reads from holders / reads`.
//! 3. **Score.**  A behavior the node has not adopted is a candidate iff
//!    `utility * W + signal * (1 - W) > threshold`.
//! 4. **Select.**  Candidates are tried in ascending utility order (ties by
//!    id).  Each one whose cost fits the remaining resource is taken and its
//!    cost deducted; the rest are skipped without stopping the scan.

use std::collections::BTreeMap;

use bd_core::{BehaviorId, NodeId, NodeRng};

use crate::{Adoption, AdoptionModel, BehaviorError, BehaviorResult, RoundContext};

/// The diffusion rule: social signal blended with intrinsic utility.
#[derive(Clone, Copy, Debug)]
pub struct ThresholdModel {
    social_weight: f64,
}

impl ThresholdModel {
    /// `social_weight` is `W`: 1 ignores peers entirely, 0 ignores utility.
    pub fn new(social_weight: f64) -> BehaviorResult<Self> {
        if !(0.0..=1.0).contains(&social_weight) {
            return Err(BehaviorError::InvalidParameter(format!(
                "social_weight must be in [0, 1], got {social_weight}"
            )));
        }
        Ok(Self { social_weight })
    }

    /// Sources of the posts `node` reads this round.  A source appears once
    /// per post of theirs that was read.
    pub fn observe(node: NodeId, ctx: &RoundContext<'_>, rng: &mut NodeRng) -> Vec<NodeId> {
        let mut posts = Vec::new();
        for &nbr in ctx.graph.neighbors(node) {
            let n = ctx.nodes.posts_per_round[nbr.index()] as usize;
            posts.extend(std::iter::repeat_n(nbr, n));
        }
        if posts.is_empty() {
            return posts;
        }
        let reads = ctx.nodes.reads_per_round[node.index()] as usize;
        rng.sample_indices(posts.len(), reads)
            .into_iter()
            .map(|i| posts[i])
            .collect()
    }

    /// Fraction of `observed` posts whose source holds each behavior.
    /// Behaviors nobody in the sample holds are absent.
    pub fn signals(observed: &[NodeId], ctx: &RoundContext<'_>) -> BTreeMap<BehaviorId, f64> {
        let mut counts: BTreeMap<BehaviorId, u32> = BTreeMap::new();
        for &src in observed {
            for &b in ctx.nodes.adopted(src) {
                *counts.entry(b).or_default() += 1;
            }
        }
        let total = observed.len() as f64;
        counts
            .into_iter()
            .map(|(b, c)| (b, c as f64 / total))
            .collect()
    }

    /// Behaviors from `signals` that `node` lacks and whose score beats its
    /// threshold, sorted ascending by utility then id.
    pub fn candidates(
        &self,
        node:    NodeId,
        signals: &BTreeMap<BehaviorId, f64>,
        ctx:     &RoundContext<'_>,
    ) -> Vec<BehaviorId> {
        let w = self.social_weight;
        let threshold = ctx.nodes.threshold[node.index()];
        let mut out: Vec<BehaviorId> = signals
            .iter()
            .filter(|&(&b, _)| !ctx.nodes.has_adopted(node, b))
            .filter(|&(&b, &signal)| ctx.catalog.utility(b) * w + signal * (1.0 - w) > threshold)
            .map(|(&b, _)| b)
            .collect();
        out.sort_by(|&a, &b| {
            ctx.catalog
                .utility(a)
                .total_cmp(&ctx.catalog.utility(b))
                .then(a.cmp(&b))
        });
        out
    }

    /// Greedy pass over `candidates` against the node's current resource.
    pub fn select(node: NodeId, candidates: &[BehaviorId], ctx: &RoundContext<'_>) -> Adoption {
        let mut budget = ctx.nodes.resource(node);
        let mut adoption = Adoption::none();
        for &b in candidates {
            let cost = ctx.catalog.cost(b);
            if cost <= budget {
                budget -= cost;
                adoption.spent += cost;
                adoption.behaviors.push(b);
            }
        }
        adoption
    }
}

impl AdoptionModel for ThresholdModel {
    fn propose(&self, node: NodeId, ctx: &RoundContext<'_>, rng: &mut NodeRng) -> Adoption {
        let observed = Self::observe(node, ctx, rng);
        if observed.is_empty() {
            return Adoption::none();
        }
        let signals = Self::signals(&observed, ctx);
        let candidates = self.candidates(node, &signals, ctx);
        Self::select(node, &candidates, ctx)
    }

    fn social_weight(&self) -> Option<f64> {
        Some(self.social_weight)
    }
}
