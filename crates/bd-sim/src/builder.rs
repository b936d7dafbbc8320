//! Fluent builder for constructing a [`Sim`].

use bd_agent::{ActivitySampler, NodeRngs, NodeStore, NodeStoreBuilder};
use bd_behavior::{AdoptionModel, BehaviorCatalog, ThresholdModel};
use bd_core::{BehaviorId, DiffusionConfig, NodeId, Round, SimRng};
use bd_graph::{perturb, SocialGraph};
use tracing::debug;

use crate::{Sim, SimError, SimResult};

/// Fluent builder for [`Sim<M>`].
///
/// # Required inputs
///
/// - [`DiffusionConfig`]: seed, activity rates, behavior count, `W`, …
/// - [`SocialGraph`]: the network to diffuse over
/// - `M: AdoptionModel`: the adoption rule (e.g. [`ThresholdModel`])
///
/// `config.social_weight` is the only source of `W`: a model that reports
/// its own weight through [`AdoptionModel::social_weight`] must agree with
/// it, or [`build`](Self::build) fails.  [`SimBuilder::threshold`] builds the
/// model from the config directly.
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                           |
/// |---------------------|---------------------------------------------------|
/// | `.catalog(c)`       | `config.num_behaviors` behaviors drawn from U(0,1) |
/// | `.nodes(store, r)`  | Drawn by [`NodeStoreBuilder`]                     |
///
/// # Build order
///
/// All global draws come from one [`SimRng`] seeded with `config.seed`, in
/// this order: catalog, node state, structure perturbation, seeding.  A
/// supplied catalog or node store skips its draws.
pub struct SimBuilder<M: AdoptionModel> {
    config:  DiffusionConfig,
    graph:   SocialGraph,
    model:   M,
    catalog: Option<BehaviorCatalog>,
    nodes:   Option<(NodeStore, NodeRngs)>,
}

impl<M: AdoptionModel> SimBuilder<M> {
    /// Create a builder with all required inputs.
    pub fn new(config: DiffusionConfig, graph: SocialGraph, model: M) -> Self {
        Self { config, graph, model, catalog: None, nodes: None }
    }

    /// Use fixed behaviors instead of drawing `config.num_behaviors` of them.
    pub fn catalog(mut self, catalog: BehaviorCatalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Use explicit node state.  Both must have one entry per graph node.
    pub fn nodes(mut self, store: NodeStore, rngs: NodeRngs) -> Self {
        self.nodes = Some((store, rngs));
        self
    }

    /// Validate inputs, initialize, perturb and seed, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<M>> {
        let config = self.config;
        config.validate()?;
        if let Some(model) = self.model.social_weight().filter(|&w| w != config.social_weight) {
            return Err(SimError::SocialWeightMismatch { configured: config.social_weight, model });
        }
        let mut graph = self.graph;
        let node_count = graph.node_count();
        config.validate_seeds(node_count)?;
        let sampler = ActivitySampler::new(config.rates)?;

        let mut rng = SimRng::new(config.seed);

        // ── Behaviors ─────────────────────────────────────────────────────
        let catalog = match self.catalog {
            Some(c) => c,
            None => BehaviorCatalog::generate(config.num_behaviors, config.equal_cost_utility, &mut rng),
        };

        // ── Node state ────────────────────────────────────────────────────
        let (mut nodes, rngs) = match self.nodes {
            Some((store, rngs)) => {
                if store.count != node_count {
                    return Err(SimError::NodeCountMismatch {
                        expected: node_count,
                        got:      store.count,
                        what:     "node store",
                    });
                }
                if rngs.len() != node_count {
                    return Err(SimError::NodeCountMismatch {
                        expected: node_count,
                        got:      rngs.len(),
                        what:     "node rngs",
                    });
                }
                (store, rngs)
            }
            None => NodeStoreBuilder::new(node_count, config.seed)
                .rates(config.rates)
                .build(&mut rng)?,
        };

        // ── Structure perturbation ────────────────────────────────────────
        perturb(&mut graph, config.perturbation_fraction, &mut rng)?;

        // ── Seeding ───────────────────────────────────────────────────────
        //
        // Seeds are exogenous: the behavior is granted without charging the
        // node's resource.
        let mut seeded = 0usize;
        if !catalog.is_empty() {
            let seeds: Vec<NodeId> = match &config.seed_nodes {
                Some(explicit) => explicit.clone(),
                None => (0..seed_count(node_count))
                    .map(|_| NodeId(rng.gen_range(0..node_count as u32)))
                    .collect(),
            };
            for node in seeds {
                let behavior = BehaviorId(rng.gen_range(0..catalog.len() as u32));
                if nodes.seed(node, behavior)? {
                    seeded += 1;
                }
            }
        }

        debug!(
            nodes = node_count,
            edges = graph.edge_count(),
            behaviors = catalog.len(),
            seeded,
            "simulation initialized"
        );

        Ok(Sim {
            config,
            round: Round::ZERO,
            graph,
            nodes,
            rngs,
            catalog,
            model: self.model,
            sampler,
        })
    }
}

impl SimBuilder<ThresholdModel> {
    /// Builder for the threshold rule weighted by `config.social_weight`.
    pub fn threshold(config: DiffusionConfig, graph: SocialGraph) -> SimResult<Self> {
        let model = ThresholdModel::new(config.social_weight)?;
        Ok(Self::new(config, graph, model))
    }
}

/// Number of randomly chosen seed nodes for a graph of `node_count` nodes:
/// `⌈log2 n⌉`, and 0 for graphs with fewer than two nodes.
pub fn seed_count(node_count: usize) -> usize {
    if node_count < 2 {
        0
    } else {
        (usize::BITS - (node_count - 1).leading_zeros()) as usize
    }
}
