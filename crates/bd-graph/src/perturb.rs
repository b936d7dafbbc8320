//! Structure perturbation: add new ties uniformly at random.
//!
//! New edges are drawn without replacement from the pool of unordered node
//! pairs that are not yet connected (self-pairs excluded).  Requests larger
//! than that pool fail up front with
//! [`GraphError::InsufficientCandidatePool`].
//!
//! Two sampling strategies share one entry point:
//!
//! - **Sparse** (request at most half the pool): rejection-sample random
//!   pairs against an edge set.  No O(n²) allocation.
//! - **Dense**: enumerate the pool in `(i, j)` order and draw distinct
//!   indices from it.

use bd_core::{NodeId, SimRng};
use tracing::debug;

use crate::graph::edge_key;
use crate::{GraphError, GraphResult, SocialGraph};

/// `T = round(c * E)` for the current edge count `E`.
pub fn target_edge_count(edge_count: usize, fraction: f64) -> usize {
    (fraction * edge_count as f64).round() as usize
}

/// Add `round(fraction * edge_count)` new random edges to `graph`.
///
/// Returns the number of edges added.  `fraction = 0` leaves the graph
/// untouched.
pub fn perturb(graph: &mut SocialGraph, fraction: f64, rng: &mut SimRng) -> GraphResult<usize> {
    if !fraction.is_finite() || fraction < 0.0 {
        return Err(GraphError::InvalidParameter(format!(
            "perturbation fraction must be finite and >= 0, got {fraction}"
        )));
    }
    let target = target_edge_count(graph.edge_count(), fraction);
    let added = add_random_edges(graph, target, rng)?;
    debug!(fraction, added, edges = graph.edge_count(), "structure perturbed");
    Ok(added)
}

/// Add exactly `count` distinct new edges between unconnected node pairs.
pub fn add_random_edges(graph: &mut SocialGraph, count: usize, rng: &mut SimRng) -> GraphResult<usize> {
    let n = graph.node_count();
    let mut existing = graph.edge_set();
    let all_pairs = n.saturating_mul(n.saturating_sub(1)) / 2;
    let available = all_pairs.saturating_sub(existing.len());

    if count > available {
        return Err(GraphError::InsufficientCandidatePool { requested: count, available });
    }
    if count == 0 {
        return Ok(0);
    }

    if count.saturating_mul(2) <= available {
        let mut added = 0;
        while added < count {
            let a = rng.gen_range(0..n as u32);
            let b = rng.gen_range(0..n as u32);
            if a == b {
                continue;
            }
            if existing.insert(edge_key(NodeId(a), NodeId(b))) {
                graph.push_edge(NodeId(a), NodeId(b));
                added += 1;
            }
        }
    } else {
        let mut pool: Vec<(u32, u32)> = Vec::with_capacity(available);
        for i in 0..n as u32 {
            for j in (i + 1)..n as u32 {
                if !existing.contains(&(i, j)) {
                    pool.push((i, j));
                }
            }
        }
        for idx in rng.sample_indices(pool.len(), count) {
            let (a, b) = pool[idx];
            graph.push_edge(NodeId(a), NodeId(b));
        }
    }

    Ok(count)
}
