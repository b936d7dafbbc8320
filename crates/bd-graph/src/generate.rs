//! Synthetic graph generators.
//!
//! # Copy model
//!
//! [`copy_model`] grows a graph on top of an Erdős–Rényi seed.  Each step
//! draws one of three mechanisms:
//!
//! | Mechanism          | Effect                                                  |
//! |--------------------|---------------------------------------------------------|
//! | `VertexCopy`       | New node with a drawn label; `m` edges to anchors that share the label, each redirected to one of the anchor's neighbours with probability `1 - copy_prob`. |
//! | `TriadicClosure`   | Join two neighbours of a random existing node.          |
//! | `Uniform`          | Join two uniformly random existing nodes.               |
//!
//! Only `VertexCopy` consumes the node budget; generation stops once
//! `new_nodes` nodes have been added.  The accumulated edge list is then
//! simplified, so duplicates and self-loops drawn along the way vanish.

use std::collections::HashMap;

use bd_core::{NodeId, SimRng};
use rand::distributions::{Distribution, WeightedIndex};
use tracing::debug;

use crate::{add_random_edges, GraphBuilder, GraphError, GraphResult, SocialGraph};

/// Slack allowed when checking that mechanism probabilities sum to one.
const PROB_TOLERANCE: f64 = 1e-9;

// ── Parameters ────────────────────────────────────────────────────────────────

/// One of the three edge-formation mechanisms.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Mechanism {
    VertexCopy,
    TriadicClosure,
    Uniform,
}

impl Mechanism {
    const ALL: [Mechanism; 3] = [Mechanism::VertexCopy, Mechanism::TriadicClosure, Mechanism::Uniform];
}

/// Categorical distribution over [`Mechanism`]s (`p_new`, `p_in`, `p_out`).
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MechanismWeights {
    pub vertex_copy:     f64,
    pub triadic_closure: f64,
    pub uniform:         f64,
}

impl MechanismWeights {
    /// Each weight must lie in `[0, 1]` and together they must sum to one.
    pub fn validate(&self) -> GraphResult<()> {
        let ws = [self.vertex_copy, self.triadic_closure, self.uniform];
        if ws.iter().any(|w| !(0.0..=1.0).contains(w)) {
            return Err(GraphError::InvalidParameter(format!(
                "mechanism probabilities must lie in [0, 1], got {ws:?}"
            )));
        }
        let sum: f64 = ws.iter().sum();
        if (sum - 1.0).abs() > PROB_TOLERANCE {
            return Err(GraphError::InvalidParameter(format!(
                "mechanism probabilities must sum to 1, got {sum}"
            )));
        }
        Ok(())
    }

    fn as_array(&self) -> [f64; 3] {
        [self.vertex_copy, self.triadic_closure, self.uniform]
    }
}

/// Parameters of [`copy_model`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CopyModelParams {
    /// Nodes to add on top of the seed graph (`n`).
    pub new_nodes: usize,
    /// Edges formed by every vertex-copy step (`m`).
    pub edges_per_node: usize,
    /// Mechanism probabilities.
    pub mechanisms: MechanismWeights,
    /// Probability of keeping the anchor rather than redirecting to one of
    /// its neighbours (`p_vc`).
    pub copy_prob: f64,
    /// `(label, weight)` pairs; weights are normalised.
    pub attributes: Vec<(u32, f64)>,
    /// Node count of the Erdős–Rényi seed graph.
    pub seed_nodes: usize,
    /// The seed graph has `seed_nodes * seed_edges_per_node` edges.
    pub seed_edges_per_node: usize,
}

impl Default for CopyModelParams {
    fn default() -> Self {
        Self {
            new_nodes:      1000,
            edges_per_node: 5,
            mechanisms:     MechanismWeights { vertex_copy: 0.7, triadic_closure: 0.2, uniform: 0.1 },
            copy_prob:      0.1,
            attributes:     vec![(0, 0.5), (1, 0.5)],
            seed_nodes:          20,
            seed_edges_per_node: 4,
        }
    }
}

impl CopyModelParams {
    pub fn validate(&self) -> GraphResult<()> {
        self.mechanisms.validate()?;

        if !(0.0..=1.0).contains(&self.copy_prob) {
            return Err(GraphError::InvalidParameter(format!(
                "copy probability must lie in [0, 1], got {}",
                self.copy_prob
            )));
        }
        if self.attributes.is_empty() {
            return Err(GraphError::InvalidParameter("attribute distribution is empty".into()));
        }
        if self.new_nodes > 0 {
            if self.mechanisms.vertex_copy <= 0.0 {
                return Err(GraphError::InvalidParameter(
                    "vertex-copy probability must be > 0 when new nodes are requested".into(),
                ));
            }
            if self.seed_nodes == 0 {
                return Err(GraphError::InvalidParameter(
                    "new nodes need a non-empty seed graph to attach to".into(),
                ));
            }
        }
        Ok(())
    }
}

// ── Erdős–Rényi ───────────────────────────────────────────────────────────────

/// G(n, m): `node_count` nodes and exactly `edge_count` distinct edges drawn
/// uniformly from all node pairs.
pub fn erdos_renyi(node_count: usize, edge_count: usize, rng: &mut SimRng) -> GraphResult<SocialGraph> {
    let mut g = SocialGraph::new(node_count);
    add_random_edges(&mut g, edge_count, rng)?;
    g.simplify();
    Ok(g)
}

// ── Copy model ────────────────────────────────────────────────────────────────

/// Grow a labelled graph with the three-mechanism copy model.
///
/// With `new_nodes = 0` the result is the labelled seed graph.
pub fn copy_model(params: &CopyModelParams, rng: &mut SimRng) -> GraphResult<SocialGraph> {
    params.validate()?;

    let label_values: Vec<u32> = params.attributes.iter().map(|&(v, _)| v).collect();
    let label_dist = WeightedIndex::new(params.attributes.iter().map(|&(_, w)| w))
        .map_err(|e| GraphError::InvalidParameter(format!("attribute weights: {e}")))?;
    let mechanism_dist = WeightedIndex::new(params.mechanisms.as_array())
        .map_err(|e| GraphError::InvalidParameter(format!("mechanism weights: {e}")))?;

    let seed = erdos_renyi(
        params.seed_nodes,
        params.seed_nodes.saturating_mul(params.seed_edges_per_node),
        rng,
    )?;

    // Working state: labels, label index, adjacency, and the edge list.
    let mut labels: Vec<u32> = Vec::with_capacity(params.seed_nodes + params.new_nodes);
    let mut by_label: HashMap<u32, Vec<NodeId>> = HashMap::new();
    for node in seed.node_ids() {
        let label = label_values[label_dist.sample(rng.inner())];
        labels.push(label);
        by_label.entry(label).or_default().push(node);
    }
    let mut adjacency: Vec<Vec<NodeId>> =
        seed.node_ids().map(|n| seed.neighbors(n).to_vec()).collect();
    let mut edges: Vec<(NodeId, NodeId)> = seed.edges().to_vec();

    let mut remaining = params.new_nodes;
    while remaining > 0 {
        match Mechanism::ALL[mechanism_dist.sample(rng.inner())] {
            Mechanism::VertexCopy => {
                let existing = adjacency.len() as u32;
                let new = NodeId(existing);
                let label = label_values[label_dist.sample(rng.inner())];
                adjacency.push(Vec::new());

                for _ in 0..params.edges_per_node {
                    let mut target = match by_label.get(&label).and_then(|ids| rng.choose(ids)) {
                        Some(&anchor) => anchor,
                        // Nobody carries this label yet: anchor anywhere.
                        None => NodeId(rng.gen_range(0..existing)),
                    };
                    if !rng.gen_bool(params.copy_prob) {
                        if let Some(&nbr) = rng.choose(&adjacency[target.index()]) {
                            target = nbr;
                        }
                    }
                    link(&mut adjacency, &mut edges, new, target);
                }

                labels.push(label);
                by_label.entry(label).or_default().push(new);
                remaining -= 1;
            }

            Mechanism::TriadicClosure => {
                let hub = rng.gen_range(0..adjacency.len());
                let nbrs = &adjacency[hub];
                if nbrs.len() >= 2 {
                    let picked = rng.sample_indices(nbrs.len(), 2);
                    let (a, b) = (nbrs[picked[0]], nbrs[picked[1]]);
                    link(&mut adjacency, &mut edges, a, b);
                }
            }

            Mechanism::Uniform => {
                let n = adjacency.len() as u32;
                let a = NodeId(rng.gen_range(0..n));
                let b = NodeId(rng.gen_range(0..n));
                link(&mut adjacency, &mut edges, a, b);
            }
        }
    }

    let raw_edges = edges.len();
    let mut builder = GraphBuilder::with_capacity(labels.len(), raw_edges);
    for label in labels {
        builder.add_node(Some(label));
    }
    for (a, b) in edges {
        builder.add_edge(a, b);
    }
    let g = builder.build()?;

    debug!(
        nodes = g.node_count(),
        edges = g.edge_count(),
        dropped = raw_edges - g.edge_count(),
        "copy-model graph generated"
    );
    Ok(g)
}

fn link(adjacency: &mut [Vec<NodeId>], edges: &mut Vec<(NodeId, NodeId)>, a: NodeId, b: NodeId) {
    edges.push((a, b));
    adjacency[a.index()].push(b);
    if a != b {
        adjacency[b.index()].push(a);
    }
}
