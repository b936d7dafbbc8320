//! Run configuration.
//!
//! Typically built by the application (or deserialized with the `serde`
//! feature) and handed to `bd_sim::SimBuilder`.  Every parameter is checked
//! by [`DiffusionConfig::validate`] before the first random draw.

use crate::{CoreError, CoreResult, NodeId};

// ── ActivityRates ─────────────────────────────────────────────────────────────

/// Poisson means for the per-round read and post counts of every node.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityRates {
    /// λ_read: expected posts a node reads per round.
    pub read: f64,
    /// λ_post: expected posts a node publishes per round.
    pub post: f64,
}

impl ActivityRates {
    pub fn new(read: f64, post: f64) -> Self {
        Self { read, post }
    }

    /// Both rates must be finite and non-negative.  Zero is valid and means
    /// "never reads" / "never posts".
    pub fn validate(&self) -> CoreResult<()> {
        check_rate("read rate", self.read)?;
        check_rate("post rate", self.post)
    }
}

impl Default for ActivityRates {
    fn default() -> Self {
        Self { read: 1.0, post: 1.0 }
    }
}

fn check_rate(what: &str, lambda: f64) -> CoreResult<()> {
    if !lambda.is_finite() || lambda < 0.0 {
        return Err(CoreError::InvalidParameter(format!(
            "{what} must be finite and >= 0, got {lambda}"
        )));
    }
    Ok(())
}

// ── DiffusionConfig ───────────────────────────────────────────────────────────

/// Top-level configuration of one diffusion run.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DiffusionConfig {
    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Poisson means for per-round reads and posts.
    pub rates: ActivityRates,

    /// Number of behaviors in the generated catalog.  Zero makes the run a
    /// no-op.
    pub num_behaviors: usize,

    /// When `true`, every behavior's utility equals its cost.
    pub equal_cost_utility: bool,

    /// Fraction `c` of the current edge count to add as new random edges
    /// before the run starts.
    pub perturbation_fraction: f64,

    /// Weight `W` in `[0, 1]` of intrinsic utility against observed signal.
    pub social_weight: f64,

    /// Upper bound on rounds.  `None` runs until equilibrium.
    pub max_rounds: Option<u64>,

    /// Explicit seed set.  `None` picks `⌈log2(n)⌉` random nodes.
    pub seed_nodes: Option<Vec<NodeId>>,
}

impl DiffusionConfig {
    /// Check every parameter that can be checked without the graph.
    pub fn validate(&self) -> CoreResult<()> {
        self.rates.validate()?;

        if !self.perturbation_fraction.is_finite() || self.perturbation_fraction < 0.0 {
            return Err(CoreError::InvalidParameter(format!(
                "perturbation fraction must be finite and >= 0, got {}",
                self.perturbation_fraction
            )));
        }
        if !(0.0..=1.0).contains(&self.social_weight) {
            return Err(CoreError::InvalidParameter(format!(
                "social weight must lie in [0, 1], got {}",
                self.social_weight
            )));
        }
        if u32::try_from(self.num_behaviors).is_err() {
            return Err(CoreError::InvalidParameter(format!(
                "too many behaviors: {}",
                self.num_behaviors
            )));
        }
        Ok(())
    }

    /// Check the explicit seed set (if any) against the graph size.
    pub fn validate_seeds(&self, node_count: usize) -> CoreResult<()> {
        if let Some(seeds) = &self.seed_nodes {
            if let Some(&bad) = seeds.iter().find(|s| s.index() >= node_count) {
                return Err(CoreError::NodeNotFound(bad));
            }
        }
        Ok(())
    }
}

impl Default for DiffusionConfig {
    fn default() -> Self {
        Self {
            seed:                  0,
            rates:                 ActivityRates::default(),
            num_behaviors:         3,
            equal_cost_utility:    false,
            perturbation_fraction: 0.0,
            social_weight:         0.5,
            max_rounds:            None,
            seed_nodes:            None,
        }
    }
}
