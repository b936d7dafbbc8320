//! Fluent builder that draws the initial state of every node.
//!
//! # Usage
//!
//! ```rust
//! use bd_agent::NodeStoreBuilder;
//! use bd_core::{ActivityRates, SimRng};
//!
//! let mut rng = SimRng::new(42);
//! let (store, rngs) = NodeStoreBuilder::new(1_000, /*seed=*/ 42)
//!     .rates(ActivityRates::new(5.0, 5.0))
//!     .build(&mut rng)
//!     .unwrap();
//!
//! assert_eq!(store.count, 1_000);
//! assert_eq!(rngs.len(),  1_000);
//! assert!(store.node_ids().all(|n| store.adopted(n).is_empty()));
//! ```

use bd_core::{ActivityRates, CoreResult, SimRng};

use crate::{ActivitySampler, NodeRngs, NodeStore};

/// Fluent builder for [`NodeStore`] + [`NodeRngs`].
///
/// Per node, in order: `resource ~ U(0,1)` (also recorded as the initial
/// resource), `threshold ~ U(0,1)`, `posts ~ Poisson(λ_post)`,
/// `reads ~ Poisson(λ_read)`.  Adopted sets start empty.
pub struct NodeStoreBuilder {
    count: usize,
    seed:  u64,
    rates: ActivityRates,
}

impl NodeStoreBuilder {
    /// Create a builder for `count` nodes; `seed` seeds the per-node RNGs.
    pub fn new(count: usize, seed: u64) -> Self {
        Self { count, seed, rates: ActivityRates::default() }
    }

    /// Poisson means used for the initial post/read counts.
    pub fn rates(mut self, rates: ActivityRates) -> Self {
        self.rates = rates;
        self
    }

    /// Draw every node's initial state from `rng`.
    pub fn build(self, rng: &mut SimRng) -> CoreResult<(NodeStore, NodeRngs)> {
        let sampler = ActivitySampler::new(self.rates)?;

        let mut resource  = Vec::with_capacity(self.count);
        let mut threshold = Vec::with_capacity(self.count);
        let mut posts     = Vec::with_capacity(self.count);
        let mut reads     = Vec::with_capacity(self.count);
        for _ in 0..self.count {
            resource.push(rng.random::<f64>());
            threshold.push(rng.random::<f64>());
            posts.push(sampler.posts(rng.inner()));
            reads.push(sampler.reads(rng.inner()));
        }

        let store = NodeStore::from_parts(resource, threshold, posts, reads)?;
        let rngs = NodeRngs::new(self.count, self.seed);
        Ok((store, rngs))
    }
}
