//! Unit tests for bd-graph.
//!
//! All tests use hand-built graphs or small seeded generators.

#[cfg(test)]
mod graph {
    use bd_core::NodeId;
    use crate::{GraphBuilder, GraphError, SocialGraph};

    #[test]
    fn empty_graph() {
        let g = SocialGraph::new(0);
        assert!(g.is_empty());
        assert_eq!(g.edge_count(), 0);
    }

    #[test]
    fn ring_topology() {
        let g = SocialGraph::ring(4);
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.edge_count(), 4);
        assert_eq!(g.neighbors(NodeId(0)), &[NodeId(1), NodeId(3)]);
        assert!(g.has_edge(NodeId(3), NodeId(0)));
        assert!(!g.has_edge(NodeId(0), NodeId(2)));
        assert!(g.node_ids().all(|n| g.degree(n) == 2));
    }

    #[test]
    fn tiny_rings_collapse() {
        assert_eq!(SocialGraph::ring(1).edge_count(), 0);
        assert_eq!(SocialGraph::ring(2).edge_count(), 1);
    }

    #[test]
    fn simplify_drops_duplicates_and_loops() {
        let mut g = SocialGraph::new(3);
        g.add_edge(NodeId(0), NodeId(1)).unwrap();
        g.add_edge(NodeId(1), NodeId(0)).unwrap();
        g.add_edge(NodeId(2), NodeId(2)).unwrap();
        g.add_edge(NodeId(1), NodeId(2)).unwrap();
        assert!(!g.is_simple());

        let removed = g.simplify();
        assert_eq!(removed, 2);
        assert!(g.is_simple());
        assert_eq!(g.edge_count(), 2);
        assert_eq!(g.neighbors(NodeId(1)), &[NodeId(0), NodeId(2)]);
        assert!(g.neighbors(NodeId(2)).iter().all(|&n| n != NodeId(2)));
    }

    #[test]
    fn add_edge_out_of_range_errors() {
        let mut g = SocialGraph::new(2);
        assert_eq!(
            g.add_edge(NodeId(0), NodeId(5)),
            Err(GraphError::NodeNotFound(NodeId(5)))
        );
    }

    #[test]
    fn add_vertex_and_labels() {
        let mut g = SocialGraph::new(1);
        let v = g.add_vertex();
        assert_eq!(v, NodeId(1));
        g.add_vertices(2);
        assert_eq!(g.node_count(), 4);
        g.set_attr(NodeId(3), 7).unwrap();
        assert_eq!(g.attr(NodeId(3)), Some(7));
        assert_eq!(g.attr(NodeId(0)), None);
        assert!(g.set_attr(NodeId(9), 1).is_err());
    }

    #[test]
    fn from_edges_simplifies() {
        let g = SocialGraph::from_edges(3, &[(0, 1), (1, 0), (1, 1), (1, 2)]).unwrap();
        assert_eq!(g.edge_count(), 2);
        assert!(SocialGraph::from_edges(2, &[(0, 2)]).is_err());
    }

    #[test]
    fn builder_keeps_labels() {
        let mut b = GraphBuilder::new();
        let a = b.add_node(Some(1));
        let c = b.add_node(None);
        b.add_edge(a, c);
        b.add_edge(a, a);
        assert_eq!(b.edge_count(), 2);
        let g = b.build().unwrap();
        assert_eq!(g.edge_count(), 1);
        assert_eq!(g.attrs(), &[Some(1), None]);
    }

    #[test]
    fn builder_rejects_dangling_edge() {
        let mut b = GraphBuilder::new();
        let a = b.add_node(None);
        b.add_edge(a, NodeId(3));
        assert!(b.build().is_err());
    }
}

#[cfg(test)]
mod perturb {
    use bd_core::{NodeId, SimRng};
    use crate::{add_random_edges, perturb, target_edge_count, GraphError, SocialGraph};

    #[test]
    fn target_rounds() {
        assert_eq!(target_edge_count(10, 0.0), 0);
        assert_eq!(target_edge_count(10, 0.26), 3);
        assert_eq!(target_edge_count(4, 0.5), 2);
    }

    #[test]
    fn zero_fraction_leaves_graph_unchanged() {
        let mut g = SocialGraph::ring(6);
        let before = g.edges().to_vec();
        let added = perturb(&mut g, 0.0, &mut SimRng::new(1)).unwrap();
        assert_eq!(added, 0);
        assert_eq!(g.edges(), before.as_slice());
    }

    #[test]
    fn adds_distinct_new_edges() {
        let mut g = SocialGraph::ring(30);
        let added = perturb(&mut g, 1.0, &mut SimRng::new(3)).unwrap();
        assert_eq!(added, 30);
        assert_eq!(g.edge_count(), 60);
        assert!(g.is_simple(), "perturbation must not create duplicates or loops");
    }

    #[test]
    fn dense_request_fills_pool_exactly() {
        // Ring(5) has 5 edges; K5 has 10, so exactly 5 non-edges remain.
        let mut g = SocialGraph::ring(5);
        let added = add_random_edges(&mut g, 5, &mut SimRng::new(9)).unwrap();
        assert_eq!(added, 5);
        assert_eq!(g.edge_count(), 10);
        assert!(g.is_simple());
        for a in g.node_ids() {
            assert_eq!(g.degree(a), 4, "{a} should be connected to everyone");
        }
    }

    #[test]
    fn oversized_request_fails() {
        // Ring(4) leaves two non-edges (the diagonals).
        let mut g = SocialGraph::ring(4);
        let err = perturb(&mut g, 1.0, &mut SimRng::new(0)).unwrap_err();
        assert_eq!(err, GraphError::InsufficientCandidatePool { requested: 4, available: 2 });
        assert_eq!(g.edge_count(), 4, "failed perturbation must not touch the graph");
    }

    #[test]
    fn negative_fraction_rejected() {
        let mut g = SocialGraph::ring(4);
        assert!(matches!(
            perturb(&mut g, -0.5, &mut SimRng::new(0)),
            Err(GraphError::InvalidParameter(_))
        ));
    }

    #[test]
    fn deterministic_given_seed() {
        let mut a = SocialGraph::ring(20);
        let mut b = SocialGraph::ring(20);
        perturb(&mut a, 0.5, &mut SimRng::new(42)).unwrap();
        perturb(&mut b, 0.5, &mut SimRng::new(42)).unwrap();
        assert_eq!(a.edges(), b.edges());
        assert!(a.has_edge(NodeId(0), NodeId(1)));
    }
}

#[cfg(test)]
mod generate {
    use bd_core::SimRng;
    use crate::{copy_model, erdos_renyi, CopyModelParams, GraphError, MechanismWeights};

    fn small_params(new_nodes: usize) -> CopyModelParams {
        CopyModelParams {
            new_nodes,
            edges_per_node: 3,
            seed_nodes: 10,
            seed_edges_per_node: 2,
            ..CopyModelParams::default()
        }
    }

    #[test]
    fn erdos_renyi_exact_edge_count() {
        let g = erdos_renyi(20, 80, &mut SimRng::new(5)).unwrap();
        assert_eq!(g.node_count(), 20);
        assert_eq!(g.edge_count(), 80);
        assert!(g.is_simple());
    }

    #[test]
    fn erdos_renyi_too_many_edges() {
        let err = erdos_renyi(4, 7, &mut SimRng::new(0)).unwrap_err();
        assert_eq!(err, GraphError::InsufficientCandidatePool { requested: 7, available: 6 });
    }

    #[test]
    fn zero_new_nodes_returns_seed_graph() {
        let params = small_params(0);
        let g = copy_model(&params, &mut SimRng::new(11)).unwrap();
        assert_eq!(g.node_count(), 10);
        assert_eq!(g.edge_count(), 20);

        // Same seed stream without labelling draws reproduces the edges.
        let seed = erdos_renyi(10, 20, &mut SimRng::new(11)).unwrap();
        assert_eq!(g.edges(), seed.edges());
    }

    #[test]
    fn grows_requested_node_count() {
        let g = copy_model(&small_params(200), &mut SimRng::new(2)).unwrap();
        assert_eq!(g.node_count(), 210);
        assert!(g.is_simple());
        assert!(g.attrs().iter().all(|a| matches!(a, Some(0) | Some(1))));
    }

    #[test]
    fn new_nodes_get_edges() {
        let params = CopyModelParams {
            mechanisms: MechanismWeights { vertex_copy: 1.0, triadic_closure: 0.0, uniform: 0.0 },
            copy_prob: 1.0,
            ..small_params(50)
        };
        let g = copy_model(&params, &mut SimRng::new(4)).unwrap();
        // With copy_prob = 1 every edge goes to an existing anchor, never a
        // self-loop, so each new node keeps at least one distinct neighbour.
        for node in g.node_ids().skip(10) {
            assert!(g.degree(node) >= 1, "{node} has no edges");
        }
    }

    #[test]
    fn single_label_population() {
        let params = CopyModelParams {
            attributes: vec![(9, 3.0)],
            ..small_params(20)
        };
        let g = copy_model(&params, &mut SimRng::new(8)).unwrap();
        assert_eq!(g.node_count(), 30);
        assert!(g.attrs().iter().all(|&a| a == Some(9)));
    }

    #[test]
    fn rare_labels_do_not_stall_generation() {
        // A label with almost no weight is unlikely to have carriers when it is
        // first drawn; anchoring then falls back to any existing node.
        let params = CopyModelParams {
            attributes: vec![(0, 1.0), (1, 1e-3)],
            ..small_params(500)
        };
        let g = copy_model(&params, &mut SimRng::new(13)).unwrap();
        assert_eq!(g.node_count(), 510);
    }

    #[test]
    fn deterministic_given_seed() {
        let a = copy_model(&small_params(100), &mut SimRng::new(77)).unwrap();
        let b = copy_model(&small_params(100), &mut SimRng::new(77)).unwrap();
        assert_eq!(a.edges(), b.edges());
        assert_eq!(a.attrs(), b.attrs());
    }

    #[test]
    fn probabilities_must_sum_to_one() {
        let params = CopyModelParams {
            mechanisms: MechanismWeights { vertex_copy: 0.5, triadic_closure: 0.2, uniform: 0.1 },
            ..small_params(5)
        };
        assert!(matches!(params.validate(), Err(GraphError::InvalidParameter(_))));
    }

    #[test]
    fn vertex_copy_required_for_growth() {
        let params = CopyModelParams {
            mechanisms: MechanismWeights { vertex_copy: 0.0, triadic_closure: 0.5, uniform: 0.5 },
            ..small_params(5)
        };
        assert!(copy_model(&params, &mut SimRng::new(0)).is_err());
    }

    #[test]
    fn invalid_copy_prob_and_attributes() {
        let bad_prob = CopyModelParams { copy_prob: 1.5, ..small_params(1) };
        assert!(bad_prob.validate().is_err());

        let no_attrs = CopyModelParams { attributes: vec![], ..small_params(1) };
        assert!(no_attrs.validate().is_err());

        let zero_weights = CopyModelParams { attributes: vec![(0, 0.0)], ..small_params(1) };
        assert!(copy_model(&zero_weights, &mut SimRng::new(0)).is_err());
    }
}
