//! Aggregate measures over the node state.

use bd_agent::NodeStore;
use bd_behavior::BehaviorCatalog;

/// Total cost of every adopted behavior (seeds included) divided by the total
/// *initial* resource endowment.
///
/// Returns +0.0 when the endowment is 0 or nothing has been adopted.
pub fn resource_utilization(nodes: &NodeStore, catalog: &BehaviorCatalog) -> f64 {
    let endowment = nodes.initial_resources().iter().fold(0.0_f64, |acc, &r| acc + r);
    if endowment <= 0.0 {
        return 0.0;
    }
    let spent = nodes
        .node_ids()
        .flat_map(|n| nodes.adopted(n).iter())
        .map(|&b| catalog.cost(b))
        .fold(0.0_f64, |acc, c| acc + c);
    spent / endowment
}

/// Number of nodes holding each behavior, indexed by `BehaviorId`.
pub fn behavior_uptake(nodes: &NodeStore, catalog: &BehaviorCatalog) -> Vec<usize> {
    let mut uptake = vec![0; catalog.len()];
    for node in nodes.node_ids() {
        for b in nodes.adopted(node) {
            uptake[b.index()] += 1;
        }
    }
    uptake
}

/// Share of nodes that hold at least one behavior; 0 for an empty store.
pub fn adopter_fraction(nodes: &NodeStore) -> f64 {
    if nodes.is_empty() {
        return 0.0;
    }
    let adopters = nodes.node_ids().filter(|&n| !nodes.adopted(n).is_empty()).count();
    adopters as f64 / nodes.count as f64
}
