//! sweep: resource utilization as the network gains random ties.
//!
//! Grows a 1 000-node copy-model network (two equally likely attribute
//! labels, five edges per new node), then runs the threshold diffusion once
//! per structure-perturbation fraction and prints one JSON line per run.
//! Every run shares the same seed, so the only thing that changes between
//! lines is how many random edges were added.

use std::time::Instant;

use anyhow::Result;

use bd_core::{ActivityRates, DiffusionConfig, SimRng};
use bd_graph::{copy_model, CopyModelParams};
use bd_sim::{adopter_fraction, behavior_uptake, RoundHistory, SimBuilder};

// ── Constants ─────────────────────────────────────────────────────────────────

const SEED:          u64   = 42;
const NEW_NODES:     usize = 1_000;
const BEHAVIORS:     usize = 3;
const SOCIAL_WEIGHT: f64   = 0.1;
const READ_RATE:     f64   = 5.0;
const POST_RATE:     f64   = 2.0;
const MAX_ROUNDS:    u64   = 200;
const FRACTIONS:     [f64; 6] = [0.0, 0.1, 0.25, 0.5, 1.0, 2.0];

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter("sweep=info,bd_sim=info,bd_graph=warn")
        .init();

    let params = CopyModelParams { new_nodes: NEW_NODES, ..CopyModelParams::default() };
    let t0 = Instant::now();
    let graph = copy_model(&params, &mut SimRng::new(SEED))?;
    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        elapsed_ms = t0.elapsed().as_millis() as u64,
        "network generated"
    );

    for fraction in FRACTIONS {
        let config = DiffusionConfig {
            seed: SEED,
            rates: ActivityRates::new(READ_RATE, POST_RATE),
            num_behaviors: BEHAVIORS,
            perturbation_fraction: fraction,
            social_weight: SOCIAL_WEIGHT,
            max_rounds: Some(MAX_ROUNDS),
            ..DiffusionConfig::default()
        };

        let mut sim = SimBuilder::threshold(config, graph.clone())?.build()?;
        let mut history = RoundHistory::new();
        let outcome = sim.run(&mut history)?;

        let line = serde_json::json!({
            "fraction": fraction,
            "edges": sim.graph.edge_count(),
            "outcome": outcome,
            "adopters": adopter_fraction(&sim.nodes),
            "uptake": behavior_uptake(&sim.nodes, &sim.catalog),
            "per_round": history.adoptions(),
        });
        println!("{line}");
    }
    Ok(())
}
