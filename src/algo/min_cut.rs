use alloc::vec;
use alloc::vec::Vec;

use crate::error::Error;
use crate::int::Int;
use crate::network::{FlowNetwork, ResidualGraph};

/// Vertices reachable from the source over edges with positive residual
/// capacity, as a membership mask.
pub fn source_side<F: Int>(residual: &ResidualGraph<F>) -> Vec<bool> {
    let mut reached = vec![false; residual.vertex_count()];
    let mut stack = vec![residual.source()];
    reached[residual.source()] = true;

    while let Some(u) = stack.pop() {
        for e in residual.edges_from(u) {
            if !reached[e.head()] && e.residual() > F::zero() {
                reached[e.head()] = true;
                stack.push(e.head());
            }
        }
    }

    reached
}

/// Original edges of `network` leaving the source side of a maximum flow held
/// in `residual`, in insertion order.
///
/// Their capacities sum to the flow value. Fails if `residual` was not derived
/// from `network` or does not hold a maximum flow yet.
pub fn min_cut<F: Int>(
    network: &FlowNetwork<F>,
    residual: &ResidualGraph<F>,
) -> Result<Vec<(usize, usize)>, Error> {
    let same_edges = network
        .edges()
        .map(|e| (e.tail(), e.head(), e.capacity()))
        .eq(residual
            .original_edges()
            .map(|e| (e.tail(), e.head(), e.capacity())));
    if residual.vertex_count() != network.vertex_count()
        || residual.source() != network.source()
        || residual.sink() != network.sink()
        || !same_edges
    {
        return Err(Error::ForeignResidual);
    }

    let reached = source_side(residual);
    if reached[residual.sink()] {
        return Err(Error::SinkReachable);
    }

    Ok(network
        .edges()
        .filter(|e| reached[e.tail()] && !reached[e.head()] && e.capacity() > F::zero())
        .map(|e| (e.tail(), e.head()))
        .collect())
}

/// Total capacity of `cut` in `network`.
pub fn cut_capacity<F: Int>(network: &FlowNetwork<F>, cut: &[(usize, usize)]) -> Result<F, Error> {
    cut.iter()
        .try_fold(F::zero(), |acc, &(u, v)| acc.checked_add(&network.capacity(u, v)))
        .ok_or(Error::ArithmeticOverflow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::edmonds_karp::EdmondsKarp;
    use crate::algo::push_relabel::PushRelabel;
    use crate::algo::MaxFlow;

    fn clrs() -> FlowNetwork<i32> {
        let mut n = FlowNetwork::new(6, 0, 5).unwrap();
        for (u, v, c) in [
            (0, 1, 16),
            (0, 2, 13),
            (1, 2, 10),
            (1, 3, 12),
            (2, 1, 4),
            (2, 4, 14),
            (3, 2, 9),
            (3, 5, 20),
            (4, 3, 7),
            (4, 5, 4),
        ] {
            n.add_edge(u, v, c).unwrap();
        }
        n
    }

    #[test]
    fn cut_matches_flow_value() {
        let n = clrs();
        let (value, r) = EdmondsKarp::new().max_flow(n.residual()).unwrap();
        assert_eq!(source_side(&r), vec![true, true, true, false, true, false]);

        let cut = min_cut(&n, &r).unwrap();
        assert_eq!(cut, vec![(1, 3), (4, 3), (4, 5)]);
        assert_eq!(cut_capacity(&n, &cut), Ok(value));
        // idempotent on the same residual graph
        assert_eq!(min_cut(&n, &r).unwrap(), cut);
    }

    #[test]
    fn both_algorithms_leave_the_same_cut() {
        let n = clrs();
        let (_, ek) = EdmondsKarp::new().max_flow(n.residual()).unwrap();
        let (_, pr) = PushRelabel::new().max_flow(n.residual()).unwrap();
        assert_eq!(min_cut(&n, &ek), min_cut(&n, &pr));
    }

    #[test]
    fn refuses_unfinished_or_foreign_residuals() {
        let n = clrs();
        assert_eq!(min_cut(&n, &n.residual()), Err(Error::SinkReachable));

        let other = FlowNetwork::<i32>::new(6, 0, 4).unwrap();
        assert_eq!(min_cut(&other, &n.residual()), Err(Error::ForeignResidual));
    }

    #[test]
    fn refuses_residual_of_a_network_with_the_same_shape() {
        let n = clrs();
        let (_, r) = EdmondsKarp::new().max_flow(n.residual()).unwrap();

        let mut lighter = FlowNetwork::<i32>::new(6, 0, 5).unwrap();
        lighter.add_edge(0, 1, 1).unwrap();
        lighter.add_edge(1, 5, 1).unwrap();
        assert_eq!(min_cut(&lighter, &r), Err(Error::ForeignResidual));

        // same edges, one capacity differs
        let mut changed = FlowNetwork::<i32>::new(6, 0, 5).unwrap();
        for e in n.edges() {
            let c = if (e.tail(), e.head()) == (4, 5) { 5 } else { e.capacity() };
            changed.add_edge(e.tail(), e.head(), c).unwrap();
        }
        assert_eq!(min_cut(&changed, &r), Err(Error::ForeignResidual));
        assert_eq!(min_cut(&n, &r).map(|c| c.len()), Ok(3));
    }

    #[test]
    fn disconnected_network_has_empty_cut() {
        let mut n = FlowNetwork::<i32>::new(4, 0, 3).unwrap();
        n.add_edge(0, 1, 3).unwrap();
        n.add_edge(2, 3, 3).unwrap();
        let (value, r) = EdmondsKarp::new().max_flow(n.residual()).unwrap();
        assert_eq!(value, 0);
        assert_eq!(min_cut(&n, &r), Ok(vec![]));
    }
}
