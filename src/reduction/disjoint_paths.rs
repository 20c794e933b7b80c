use alloc::collections::VecDeque;
use alloc::vec;
use alloc::vec::Vec;

use crate::algo::Config;
use crate::compute_max_flow;
use crate::error::Error;
use crate::network::{FlowNetwork, ResidualGraph};

/// Counts edge-disjoint source-to-sink paths in a directed graph by giving
/// every edge unit capacity.
#[derive(Clone, Debug)]
pub struct EdgeDisjointPaths {
    network: FlowNetwork<i64>,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DisjointPaths {
    pub count: usize,
    /// Vertex sequences from source to sink; no edge appears in two of them.
    pub paths: Vec<Vec<usize>>,
}

impl EdgeDisjointPaths {
    pub fn new(vertex_count: usize, source: usize, sink: usize) -> Result<Self, Error> {
        Ok(Self {
            network: FlowNetwork::new(vertex_count, source, sink)?,
        })
    }

    pub fn from_edges(
        vertex_count: usize,
        source: usize,
        sink: usize,
        edges: &[(usize, usize)],
    ) -> Result<Self, Error> {
        let mut paths = Self::new(vertex_count, source, sink)?;
        for &(u, v) in edges {
            paths.add_edge(u, v)?;
        }
        Ok(paths)
    }

    /// Adds the directed edge `(u, v)`. Parallel edges are rejected.
    pub fn add_edge(&mut self, u: usize, v: usize) -> Result<(), Error> {
        self.network.add_edge(u, v, 1)
    }

    pub fn flow_network(&self) -> &FlowNetwork<i64> {
        &self.network
    }

    /// Splits the flow in `residual` into paths by walking flow-carrying
    /// edges forward from the source, consuming each edge once.
    pub fn trace_paths(&self, residual: &ResidualGraph<i64>) -> Vec<Vec<usize>> {
        let (source, sink) = (self.network.source(), self.network.sink());

        let mut unused = vec![VecDeque::new(); self.network.vertex_count()];
        for (u, v, _) in residual.edge_flows() {
            unused[u].push_back(v);
        }

        let mut paths = Vec::new();
        while let Some(first) = unused[source].pop_front() {
            let mut path = vec![source, first];
            let mut u = first;
            // conservation guarantees an unused outgoing edge at every
            // intermediate vertex, including the source when a path cycles back
            while u != sink {
                match unused[u].pop_front() {
                    Some(v) => {
                        path.push(v);
                        u = v;
                    }
                    None => break,
                }
            }
            if u == sink {
                paths.push(path);
            }
        }
        paths
    }

    pub fn compute(&self, config: &Config) -> Result<DisjointPaths, Error> {
        let (value, residual) = compute_max_flow(&self.network, config)?;
        let paths = self.trace_paths(&residual);
        log::debug!("{value} edge-disjoint paths: {paths:?}");
        DisjointPaths::new(value, paths)
    }
}

impl DisjointPaths {
    /// Fails if `paths` does not account for every unit of `value`.
    fn new(value: i64, paths: Vec<Vec<usize>>) -> Result<DisjointPaths, Error> {
        let flow = usize::try_from(value).map_err(|_| Error::ArithmeticOverflow)?;
        if flow != paths.len() {
            return Err(Error::PathCountMismatch {
                flow,
                paths: paths.len(),
            });
        }
        Ok(DisjointPaths { count: flow, paths })
    }
}
