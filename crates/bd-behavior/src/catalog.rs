//! The fixed set of behaviors available in one run.

use bd_core::{BehaviorId, SimRng};

use crate::{BehaviorError, BehaviorResult};

/// Cost and utility of every behavior, indexed by `BehaviorId`.
///
/// Immutable once built; a run never changes its catalog.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BehaviorCatalog {
    cost:    Vec<f64>,
    utility: Vec<f64>,
}

impl BehaviorCatalog {
    /// Draw `n` costs from U(0,1), then `n` utilities from U(0,1) unless
    /// `equal_cost_utility` is set, in which case utility = cost.
    pub fn generate(n: usize, equal_cost_utility: bool, rng: &mut SimRng) -> Self {
        let cost: Vec<f64> = (0..n).map(|_| rng.random::<f64>()).collect();
        let utility = if equal_cost_utility {
            cost.clone()
        } else {
            (0..n).map(|_| rng.random::<f64>()).collect()
        };
        Self { cost, utility }
    }

    /// Catalog with explicit values.  Costs must be finite and non-negative;
    /// utilities must be finite.
    pub fn from_parts(cost: Vec<f64>, utility: Vec<f64>) -> BehaviorResult<Self> {
        if cost.len() != utility.len() {
            return Err(BehaviorError::InvalidParameter(format!(
                "{} costs but {} utilities",
                cost.len(),
                utility.len()
            )));
        }
        if let Some(c) = cost.iter().find(|c| !c.is_finite() || **c < 0.0) {
            return Err(BehaviorError::InvalidParameter(format!(
                "cost must be finite and >= 0, got {c}"
            )));
        }
        if let Some(u) = utility.iter().find(|u| !u.is_finite()) {
            return Err(BehaviorError::InvalidParameter(format!("utility must be finite, got {u}")));
        }
        Ok(Self { cost, utility })
    }

    pub fn len(&self) -> usize {
        self.cost.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cost.is_empty()
    }

    /// All behavior ids in ascending order.
    pub fn ids(&self) -> impl Iterator<Item = BehaviorId> + '_ {
        (0..self.cost.len() as u32).map(BehaviorId)
    }

    #[inline]
    pub fn cost(&self, behavior: BehaviorId) -> f64 {
        self.cost[behavior.index()]
    }

    #[inline]
    pub fn utility(&self, behavior: BehaviorId) -> f64 {
        self.utility[behavior.index()]
    }

    pub fn costs(&self) -> &[f64] {
        &self.cost
    }

    pub fn utilities(&self) -> &[f64] {
        &self.utility
    }
}
