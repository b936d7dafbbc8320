//! Simulation observer trait for progress reporting and data collection.

use bd_agent::NodeStore;
use bd_core::Round;

use crate::{RoundReport, RunOutcome};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] and
/// [`Sim::run_rounds`][crate::Sim::run_rounds] at round boundaries.
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: progress printer
///
/// ```rust,ignore
/// struct ProgressPrinter;
///
/// impl SimObserver for ProgressPrinter {
///     fn on_round_end(&mut self, report: &RoundReport, _nodes: &NodeStore) {
///         println!("{}: {} adoptions", report.round, report.all.len());
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called at the very start of each round, before any processing.
    fn on_round_start(&mut self, _round: Round) {}

    /// Called after a round has been applied.  `nodes` already reflects the
    /// round's adoptions.
    fn on_round_end(&mut self, _report: &RoundReport, _nodes: &NodeStore) {}

    /// Called once when [`Sim::run`][crate::Sim::run] stops.  `next_round`
    /// is the round that would have run next.
    fn on_sim_end(&mut self, _next_round: Round, _outcome: &RunOutcome) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}

/// Per-round counts kept by [`RoundHistory`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RoundSummary {
    pub round:     Round,
    pub adoptions: usize,
    pub adopters:  usize,
    /// Adoptions across all nodes after the round, seeds included.
    pub cumulative: usize,
}

/// Records the adoption trajectory of a run, one entry per round.
#[derive(Clone, Debug, Default)]
pub struct RoundHistory {
    pub rounds: Vec<RoundSummary>,
    pub outcome: Option<RunOutcome>,
}

impl RoundHistory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adoptions per round, in round order.
    pub fn adoptions(&self) -> Vec<usize> {
        self.rounds.iter().map(|r| r.adoptions).collect()
    }
}

impl SimObserver for RoundHistory {
    fn on_round_end(&mut self, report: &RoundReport, nodes: &NodeStore) {
        self.rounds.push(RoundSummary {
            round:      report.round,
            adoptions:  report.all.len(),
            adopters:   report.adopters(),
            cumulative: nodes.adoption_count(),
        });
    }

    fn on_sim_end(&mut self, _next_round: Round, outcome: &RunOutcome) {
        self.outcome = Some(outcome.clone());
    }
}
