//! Max flow by repeatedly augmenting along shortest residual paths (Edmonds-Karp).
//!
//! Each augmentation saturates at least one edge and shortest-path lengths never
//! decrease, so the number of augmentations is bounded by `O(V * E)` whatever the
//! capacities are.

use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use itertools::{process_results, Itertools};

use crate::algo::{IterationBudget, MaxFlow};
use crate::error::Error;
use crate::int::Int;
use crate::network::ResidualGraph;

#[derive(Clone, Debug, Default)]
pub struct EdmondsKarp {
    iteration_limit: Option<usize>,
}

impl EdmondsKarp {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`Error::IterationLimitExceeded`] after `limit` augmentations.
    pub fn with_iteration_limit(limit: Option<usize>) -> Self {
        Self {
            iteration_limit: limit,
        }
    }
}

/// Finds a fewest-edge path from source to sink over edges with positive
/// residual capacity, as the sequence of its vertices.
///
/// Vertices at equal distance are discovered in edge-insertion order. Returns
/// `None` once no augmenting path is left.
pub fn shortest_augmenting_path<F: Int>(residual: &ResidualGraph<F>) -> Option<Vec<usize>> {
    let (source, sink) = (residual.source(), residual.sink());
    let mut parent: Vec<Option<usize>> = vec![None; residual.vertex_count()];
    let mut visited = vec![false; residual.vertex_count()];
    let mut queue = VecDeque::new();

    visited[source] = true;
    queue.push_back(source);

    'search: while let Some(u) = queue.pop_front() {
        for e in residual.edges_from(u) {
            let v = e.head();
            if !visited[v] && e.residual() > F::zero() {
                visited[v] = true;
                parent[v] = Some(u);
                if v == sink {
                    break 'search;
                }
                queue.push_back(v);
            }
        }
    }

    if !visited[sink] {
        return None;
    }

    let mut path = vec![sink];
    let mut v = sink;
    while let Some(u) = parent[v] {
        path.push(u);
        v = u;
    }
    path.reverse();
    Some(path)
}

/// Smallest residual capacity along `path`.
pub fn bottleneck<F: Int>(residual: &ResidualGraph<F>, path: &[usize]) -> Result<F, Error> {
    let min = process_results(
        path.iter()
            .tuple_windows()
            .map(|(&u, &v)| residual.effective_capacity(u, v)),
        |capacities| capacities.min(),
    )?;
    Ok(min.unwrap_or_else(F::zero))
}

impl<F: Int> MaxFlow<F> for EdmondsKarp {
    fn max_flow(
        &mut self,
        mut residual: ResidualGraph<F>,
    ) -> Result<(F, ResidualGraph<F>), Error> {
        let mut budget = IterationBudget::new(self.iteration_limit);
        // non-zero when the network was seeded with initial flow
        let mut total = residual.flow_value()?;

        while let Some(path) = shortest_augmenting_path(&residual) {
            budget.tick()?;

            let delta = bottleneck(&residual, &path)?;
            log::trace!("augmenting {path:?} by {delta}");

            for (&u, &v) in path.iter().tuple_windows() {
                residual.push_flow(u, v, delta)?;
            }
            total = total
                .checked_add(&delta)
                .ok_or(Error::ArithmeticOverflow)?;
        }

        log::debug!(
            "edmonds-karp: flow value {total} after {} augmentations",
            budget.used()
        );
        Ok((total, residual))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::network::FlowNetwork;

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
    fn first_path_is_shortest_and_follows_insertion_order() {
        let r = clrs().residual();
        // 0-1-3-5 and 0-2-4-5 both have three edges; vertex 1 is discovered first
        assert_eq!(shortest_augmenting_path(&r), Some(vec![0, 1, 3, 5]));
        assert_eq!(bottleneck(&r, &[0, 1, 3, 5]), Ok(12));
    }

    #[test]
    fn max_flow_example() {
        let (value, r) = EdmondsKarp::new().max_flow(clrs().residual()).unwrap();
        assert_eq!(value, 23);
        assert_eq!(r.flow_value(), Ok(23));
        assert_eq!(shortest_augmenting_path(&r), None);
        assert_eq!(r.check_capacities(), Ok(()));
        assert_eq!(r.check_conservation(), Ok(()));
    }

    #[test]
    fn augmentation_count_does_not_depend_on_capacity() {
        // the classic bad case for arbitrary augmenting paths
        let mut n = FlowNetwork::new(4, 0, 3).unwrap();
        n.add_edge(0, 1, 1_000_000).unwrap();
        n.add_edge(0, 2, 1_000_000).unwrap();
        n.add_edge(1, 2, 1).unwrap();
        n.add_edge(1, 3, 1_000_000).unwrap();
        n.add_edge(2, 3, 1_000_000).unwrap();

        let (value, _) = EdmondsKarp::with_iteration_limit(Some(2))
            .max_flow(n.residual())
            .unwrap();
        assert_eq!(value, 2_000_000);
    }

    #[test]
    fn iteration_limit_is_reported() {
        assert_eq!(
            EdmondsKarp::with_iteration_limit(Some(1)).max_flow(clrs().residual()).map(|(v, _)| v),
            Err(Error::IterationLimitExceeded(1))
        );
    }

    #[test]
    fn disconnected_sink_has_zero_flow() {
        let mut n = FlowNetwork::<i64>::new(3, 0, 2).unwrap();
        n.add_edge(0, 1, 5).unwrap();
        let (value, r) = EdmondsKarp::new().max_flow(n.residual()).unwrap();
        assert_eq!(value, 0);
        assert!(r.edge_flows().is_empty());
    }

    #[test]
    fn seeded_flow_counts_toward_the_total() {
        let mut n = FlowNetwork::<i64>::new(3, 0, 2).unwrap();
        n.add_edge_with_flow(0, 1, 5, 2).unwrap();
        n.add_edge_with_flow(1, 2, 3, 2).unwrap();
        let (value, r) = EdmondsKarp::new().max_flow(n.residual()).unwrap();
        assert_eq!(value, 3);
        assert_eq!(r.edge_flows(), vec![(0, 1, 3), (1, 2, 3)]);
    }
}
