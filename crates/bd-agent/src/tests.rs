//! Unit tests for bd-agent.

#[cfg(test)]
mod activity {
    use bd_core::{ActivityRates, NodeId, NodeRng};
    use crate::ActivitySampler;

    #[test]
    fn zero_rates_always_zero() {
        let sampler = ActivitySampler::new(ActivityRates::new(0.0, 0.0)).unwrap();
        let mut rng = NodeRng::new(3, NodeId(0));
        for _ in 0..100 {
            assert_eq!(sampler.posts(rng.inner()), 0);
            assert_eq!(sampler.reads(rng.inner()), 0);
        }
    }

    #[test]
    fn mean_is_close_to_rate() {
        let sampler = ActivitySampler::new(ActivityRates::new(2.0, 5.0)).unwrap();
        let mut rng = NodeRng::new(11, NodeId(0));
        let n = 20_000;
        let posts: u64 = (0..n).map(|_| sampler.posts(rng.inner()) as u64).sum();
        let reads: u64 = (0..n).map(|_| sampler.reads(rng.inner()) as u64).sum();
        let post_mean = posts as f64 / n as f64;
        let read_mean = reads as f64 / n as f64;
        assert!((post_mean - 5.0).abs() < 0.15, "post mean {post_mean}");
        assert!((read_mean - 2.0).abs() < 0.1, "read mean {read_mean}");
    }

    #[test]
    fn negative_rate_rejected() {
        assert!(ActivitySampler::new(ActivityRates::new(-1.0, 1.0)).is_err());
    }
}

#[cfg(test)]
mod builder {
    use bd_core::{ActivityRates, SimRng};
    use crate::NodeStoreBuilder;

    #[test]
    fn correct_count() {
        let (store, rngs) = NodeStoreBuilder::new(500, 1).build(&mut SimRng::new(1)).unwrap();
        assert_eq!(store.count, 500);
        assert_eq!(rngs.len(), 500);
    }

    #[test]
    fn zero_nodes() {
        let (store, rngs) = NodeStoreBuilder::new(0, 0).build(&mut SimRng::new(0)).unwrap();
        assert!(store.is_empty());
        assert!(rngs.is_empty());
    }

    #[test]
    fn initial_values_in_range() {
        let (store, _) = NodeStoreBuilder::new(200, 5)
            .rates(ActivityRates::new(3.0, 0.0))
            .build(&mut SimRng::new(5))
            .unwrap();
        for n in store.node_ids() {
            let r = store.resource(n);
            assert!((0.0..1.0).contains(&r));
            assert_eq!(store.initial_resource(n), r);
            assert!((0.0..1.0).contains(&store.threshold[n.index()]));
            assert_eq!(store.posts_per_round[n.index()], 0, "λ_post = 0");
            assert!(store.adopted(n).is_empty());
        }
    }

    #[test]
    fn deterministic_given_seed() {
        let (a, _) = NodeStoreBuilder::new(50, 9).build(&mut SimRng::new(9)).unwrap();
        let (b, _) = NodeStoreBuilder::new(50, 9).build(&mut SimRng::new(9)).unwrap();
        assert_eq!(a.resources(), b.resources());
        assert_eq!(a.threshold, b.threshold);
        assert_eq!(a.reads_per_round, b.reads_per_round);
    }

    #[test]
    fn invalid_rates_rejected() {
        let result = NodeStoreBuilder::new(3, 0)
            .rates(ActivityRates::new(f64::INFINITY, 1.0))
            .build(&mut SimRng::new(0));
        assert!(result.is_err());
    }
}

#[cfg(test)]
mod store {
    use bd_core::{ActivityRates, BehaviorId, CoreError, NodeId};
    use crate::{ActivitySampler, NodeRngs, NodeStore};

    fn two_nodes() -> NodeStore {
        NodeStore::from_parts(vec![0.5, 0.2], vec![0.1, 0.9], vec![1, 2], vec![3, 4]).unwrap()
    }

    #[test]
    fn adopt_charges_resource() {
        let mut s = two_nodes();
        assert_eq!(s.adopt(NodeId(0), BehaviorId(0), 0.3), Ok(true));
        assert!((s.resource(NodeId(0)) - 0.2).abs() < 1e-12);
        assert_eq!(s.initial_resource(NodeId(0)), 0.5, "initial resource is a snapshot");
        assert!(s.has_adopted(NodeId(0), BehaviorId(0)));
    }

    #[test]
    fn readoption_is_free_noop() {
        let mut s = two_nodes();
        s.adopt(NodeId(0), BehaviorId(1), 0.1).unwrap();
        assert_eq!(s.adopt(NodeId(0), BehaviorId(1), 0.1), Ok(false));
        assert!((s.resource(NodeId(0)) - 0.4).abs() < 1e-12);
        assert_eq!(s.adoption_count(), 1);
    }

    #[test]
    fn unaffordable_adoption_rejected() {
        let mut s = two_nodes();
        let err = s.adopt(NodeId(1), BehaviorId(0), 0.3).unwrap_err();
        assert!(matches!(err, CoreError::InsufficientResource { .. }));
        assert_eq!(s.resource(NodeId(1)), 0.2);
        assert!(s.adopted(NodeId(1)).is_empty());
    }

    #[test]
    fn exact_budget_reaches_zero() {
        let mut s = two_nodes();
        s.adopt(NodeId(1), BehaviorId(0), 0.2).unwrap();
        assert_eq!(s.resource(NodeId(1)), 0.0);
    }

    #[test]
    fn seed_is_free() {
        let mut s = two_nodes();
        assert_eq!(s.seed(NodeId(1), BehaviorId(4)), Ok(true));
        assert_eq!(s.resource(NodeId(1)), 0.2);
        assert!(s.seed(NodeId(7), BehaviorId(0)).is_err());
    }

    #[test]
    fn from_parts_validates() {
        assert!(NodeStore::from_parts(vec![0.1], vec![], vec![0], vec![0]).is_err());
        assert!(NodeStore::from_parts(vec![-0.1], vec![0.5], vec![0], vec![0]).is_err());
    }

    #[test]
    fn from_parts_rejects_thresholds_outside_unit_interval() {
        for bad in [1.5, -0.1, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                NodeStore::from_parts(vec![0.5], vec![bad], vec![0], vec![0]),
                Err(CoreError::InvalidParameter(_))
            ));
        }
        assert!(NodeStore::from_parts(vec![0.5, 0.5], vec![0.0, 1.0], vec![0, 0], vec![0, 0]).is_ok());
    }

    #[test]
    fn resample_activity_redraws() {
        let mut s = two_nodes();
        let mut rngs = NodeRngs::new(2, 1);
        let sampler = ActivitySampler::new(ActivityRates::new(0.0, 0.0)).unwrap();
        s.resample_activity(&sampler, &mut rngs);
        assert_eq!(s.posts_per_round, vec![0, 0]);
        assert_eq!(s.reads_per_round, vec![0, 0]);
    }

    #[test]
    fn per_node_rng_determinism() {
        let mut rngs1 = NodeRngs::new(10, 999);
        let mut rngs2 = NodeRngs::new(10, 999);
        for i in 0..10u32 {
            let a: f64 = rngs1.get_mut(NodeId(i)).random();
            let b: f64 = rngs2.get_mut(NodeId(i)).random();
            assert_eq!(a, b, "node {i} RNG should be deterministic");
        }
    }
}
