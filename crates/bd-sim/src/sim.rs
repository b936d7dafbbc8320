//! The `Sim` struct and its round loop.

use bd_agent::{ActivitySampler, NodeRngs, NodeStore};
use bd_behavior::{Adoption, AdoptionModel, BehaviorCatalog, RoundContext, ThresholdModel};
use bd_core::{BehaviorId, CoreError, CoreResult, DiffusionConfig, NodeId, Round};
use bd_graph::SocialGraph;
use tracing::{debug, info};

use crate::{resource_utilization, NoopObserver, SimBuilder, SimObserver, SimResult};

// ── Round and run results ─────────────────────────────────────────────────────

/// What one call to [`Sim::update`] changed.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundReport {
    /// The round that was computed.
    pub round: Round,
    /// Newly adopted behaviors, indexed by `NodeId`, in commit order.
    pub per_node: Vec<Vec<BehaviorId>>,
    /// All of `per_node` flattened in node order.
    pub all: Vec<BehaviorId>,
}

impl RoundReport {
    /// No node adopted anything this round.
    pub fn is_equilibrium(&self) -> bool {
        self.all.is_empty()
    }

    /// Number of nodes that adopted at least one behavior.
    pub fn adopters(&self) -> usize {
        self.per_node.iter().filter(|b| !b.is_empty()).count()
    }
}

/// Why [`Sim::run`] stopped.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Termination {
    /// The last round produced no adoptions.
    Equilibrium,
    /// `max_rounds` rounds ran without reaching equilibrium.
    RoundLimit,
}

/// Summary returned by [`Sim::run`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct RunOutcome {
    /// Rounds executed by this call, including the final empty round when
    /// equilibrium was reached.
    pub rounds: u64,
    pub termination: Termination,
    /// Resource utilization after the last round.
    pub utilization: f64,
    /// Adoptions made by this call (seeds excluded).
    pub total_adoptions: usize,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<M>` holds all simulation state and drives the two-phase round loop:
///
/// 1. **Proposal phase** (optionally parallel with the `parallel` feature):
///    call [`AdoptionModel::propose`] for every node against a
///    [`RoundContext`] borrowing the pre-round state.
/// 2. **Apply phase** (sequential, ascending `NodeId`): charge and record
///    every proposed behavior, then resample post and read counts.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<M: AdoptionModel> {
    /// Run configuration (seed, rates, `W`, round cap, …).
    pub config: DiffusionConfig,

    /// Next round to be computed.
    pub round: Round,

    /// The (perturbed) social graph.
    pub graph: SocialGraph,

    /// Node state (SoA arrays).  Adoption models read this through
    /// `RoundContext`.
    pub nodes: NodeStore,

    /// Per-node deterministic RNGs, separated for the split-borrow pattern.
    pub rngs: NodeRngs,

    /// Behaviors available in this run.
    pub catalog: BehaviorCatalog,

    /// The adoption rule.  Called once per node per round.
    pub model: M,

    pub(crate) sampler: ActivitySampler,
}

impl<M: AdoptionModel> Sim<M> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run rounds until equilibrium or `config.max_rounds`, whichever comes
    /// first.
    ///
    /// Calls observer hooks at every round boundary.  Use
    /// [`NoopObserver`][crate::NoopObserver] if you don't need callbacks.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RunOutcome> {
        let start = self.round;
        let mut total_adoptions = 0usize;

        let termination = loop {
            if self.config.max_rounds.is_some_and(|max| self.round.since(start) >= max) {
                break Termination::RoundLimit;
            }
            let report = self.step(observer)?;
            total_adoptions += report.all.len();
            if report.is_equilibrium() {
                break Termination::Equilibrium;
            }
        };
        let rounds = self.round.since(start);

        let outcome = RunOutcome {
            rounds,
            termination,
            utilization: self.utilization(),
            total_adoptions,
        };
        info!(
            rounds,
            termination = ?outcome.termination,
            utilization = outcome.utilization,
            adoptions = total_adoptions,
            "diffusion finished"
        );
        observer.on_sim_end(self.round, &outcome);
        Ok(outcome)
    }

    /// Run exactly `n` rounds from the current position, ignoring both the
    /// round cap and equilibrium.  Returns the number of adoptions made.
    ///
    /// Useful for tests and incremental stepping.
    pub fn run_rounds<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<usize> {
        let mut adoptions = 0;
        for _ in 0..n {
            adoptions += self.step(observer)?.all.len();
        }
        Ok(adoptions)
    }

    /// Compute one round against the pre-round snapshot, apply it, and
    /// resample activity for the next round.
    ///
    /// Every proposal is checked before any is applied.  If one names a
    /// behavior outside the catalog or overdraws its node, the error is
    /// returned and the simulation is left exactly as it was before the call.
    pub fn update(&mut self) -> SimResult<RoundReport> {
        let round = self.round;
        let proposals = self.compute_proposals(round);
        for (i, adoption) in proposals.iter().enumerate() {
            self.check_proposal(NodeId(i as u32), adoption)?;
        }

        let mut report = RoundReport {
            round,
            per_node: Vec::with_capacity(proposals.len()),
            all:      Vec::new(),
        };
        // Proposals are indexed by NodeId; applying them in this order keeps
        // results identical whether or not the proposal phase ran in parallel.
        for (i, adoption) in proposals.into_iter().enumerate() {
            let node = NodeId(i as u32);
            for &behavior in &adoption.behaviors {
                self.nodes.adopt(node, behavior, self.catalog.cost(behavior))?;
            }
            report.all.extend_from_slice(&adoption.behaviors);
            report.per_node.push(adoption.behaviors);
        }

        self.nodes.resample_activity(&self.sampler, &mut self.rngs);
        self.round = round.next();

        debug!(
            round = round.0,
            adoptions = report.all.len(),
            adopters = report.adopters(),
            "round complete"
        );
        Ok(report)
    }

    /// Fraction of the total initial endowment spent on adopted behaviors.
    pub fn utilization(&self) -> f64 {
        resource_utilization(&self.nodes, &self.catalog)
    }

    /// Consume the simulation, returning the final graph, node state, and
    /// catalog.
    pub fn into_parts(self) -> (SocialGraph, NodeStore, BehaviorCatalog) {
        (self.graph, self.nodes, self.catalog)
    }

    // ── Core round processing ─────────────────────────────────────────────

    fn step<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<RoundReport> {
        observer.on_round_start(self.round);
        let report = self.update()?;
        observer.on_round_end(&report, &self.nodes);
        Ok(report)
    }

    /// Replays `adoption` against a copy of the node's budget, with the same
    /// rules [`NodeStore::adopt`] applies.
    fn check_proposal(&self, node: NodeId, adoption: &Adoption) -> CoreResult<()> {
        let mut available = self.nodes.resource(node);
        for (k, &behavior) in adoption.behaviors.iter().enumerate() {
            let cost = *self
                .catalog
                .costs()
                .get(behavior.index())
                .ok_or(CoreError::BehaviorNotFound(behavior))?;
            if self.nodes.has_adopted(node, behavior) || adoption.behaviors[..k].contains(&behavior) {
                continue;
            }
            if cost.is_nan() || cost < 0.0 || cost > available {
                return Err(CoreError::InsufficientResource { node, cost, available });
            }
            available = (available - cost).max(0.0);
        }
        Ok(())
    }

    /// Proposals for every node, indexed by `NodeId`.
    ///
    /// With the `parallel` Cargo feature, `propose` runs on Rayon's thread
    /// pool.
    fn compute_proposals(&mut self, round: Round) -> Vec<Adoption> {
        // Explicit field borrows so the borrow checker sees disjoint access.
        let model = &self.model;
        let rngs  = &mut self.rngs.inner;
        let ctx   = RoundContext::new(round, &self.graph, &self.nodes, &self.catalog);

        #[cfg(not(feature = "parallel"))]
        {
            rngs.iter_mut()
                .enumerate()
                .map(|(i, rng)| model.propose(NodeId(i as u32), &ctx, rng))
                .collect()
        }

        #[cfg(feature = "parallel")]
        {
            use rayon::prelude::*;

            rngs.par_iter_mut()
                .enumerate()
                .map(|(i, rng)| model.propose(NodeId(i as u32), &ctx, rng))
                .collect()
        }
    }
}

// ── Convenience entry point ───────────────────────────────────────────────────

/// Run the threshold diffusion model over `graph` with `config`.
///
/// Builds a [`Sim`] with a [`ThresholdModel`] weighted by
/// `config.social_weight`, runs it to equilibrium or the round cap, and
/// returns the outcome together with the final simulation state.
pub fn run(graph: SocialGraph, config: &DiffusionConfig) -> SimResult<(RunOutcome, Sim<ThresholdModel>)> {
    let mut sim = SimBuilder::threshold(config.clone(), graph)?.build()?;
    let outcome = sim.run(&mut NoopObserver)?;
    Ok((outcome, sim))
}
