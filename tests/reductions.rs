use std::collections::BTreeSet;

use flownet::reduction::{BipartiteMatching, ChannelAssignment, EdgeDisjointPaths};
use flownet::{compute_max_flow, Algorithm, Config};

#[test]
fn applicant_matching_is_the_same_for_both_algorithms() {
    let mut matching = BipartiteMatching::new(6, 6);
    for (applicant, job) in [(0, 1), (0, 2), (2, 0), (2, 3), (3, 2), (4, 2), (4, 3), (5, 5)] {
        matching.add(applicant, job).unwrap();
    }

    let ek = matching.compute(&Config::new(Algorithm::EdmondsKarp)).unwrap();
    let pr = matching.compute(&Config::new(Algorithm::PushRelabel)).unwrap();
    assert_eq!(ek.size(), pr.size());
    assert_eq!(ek.value, pr.value);

    // cross-check against the raw network
    let network = matching.flow_network().unwrap();
    let (value, residual) = compute_max_flow(&network, &Config::default()).unwrap();
    assert_eq!(value, ek.value);
    assert_eq!(matching.matched_pairs(&residual), ek.pairs);
}

#[test]
fn channel_assignment_uses_each_endpoint_once() {
    let mut channels = ChannelAssignment::new(4, 3);
    channels
        .set_rows(&[vec![5, 0, 1], vec![2, 0, 0], vec![0, 7, 0], vec![0, 3, 0]])
        .unwrap();

    for algorithm in [Algorithm::EdmondsKarp, Algorithm::PushRelabel] {
        let result = channels.compute(&Config::new(algorithm)).unwrap();
        assert_eq!(result.value, 3);
        let tx: BTreeSet<_> = result.pairs.iter().map(|p| p.0).collect();
        let rx: BTreeSet<_> = result.pairs.iter().map(|p| p.1).collect();
        assert_eq!(tx.len(), result.size());
        assert_eq!(rx.len(), result.size());
    }
}

#[test]
fn edge_disjoint_paths_do_not_share_edges() {
    let graph = EdgeDisjointPaths::from_edges(
        6,
        0,
        5,
        &[
            (0, 1),
            (0, 2),
            (0, 3),
            (1, 4),
            (2, 4),
            (3, 4),
            (4, 5),
            (1, 5),
            (3, 5),
        ],
    )
    .unwrap();

    for algorithm in [Algorithm::EdmondsKarp, Algorithm::PushRelabel] {
        let result = graph.compute(&Config::new(algorithm)).unwrap();
        assert_eq!(result.count, 3);
        let mut used = BTreeSet::new();
        for path in &result.paths {
            assert_eq!(path[0], 0);
            assert_eq!(path[path.len() - 1], 5);
            for w in path.windows(2) {
                assert!(used.insert((w[0], w[1])));
            }
        }
    }
}
