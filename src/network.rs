use alloc::collections::BTreeMap;
use alloc::vec;
use alloc::vec::Vec;

use petgraph::visit::{EdgeRef, IntoEdgeReferences, NodeIndexable};

use crate::error::Error;
use crate::int::Int;

/// What `add_edge` does with a second edge between the same ordered pair.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum EdgePolicy {
    /// Fail with [`Error::DuplicateEdge`].
    #[default]
    Reject,
    /// Accumulate capacity and flow onto the existing edge.
    Merge,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Edge<F> {
    tail: usize,
    head: usize,
    capacity: F,
    flow: F,
    // false for reverse edges created on demand by `push_flow`
    original: bool,
}

impl<F: Int> Edge<F> {
    fn new(tail: usize, head: usize, capacity: F, original: bool) -> Edge<F> {
        Edge {
            tail,
            head,
            capacity,
            flow: F::zero(),
            original,
        }
    }

    pub fn tail(&self) -> usize {
        self.tail
    }

    pub fn head(&self) -> usize {
        self.head
    }

    pub fn capacity(&self) -> F {
        self.capacity
    }

    pub fn flow(&self) -> F {
        self.flow
    }

    /// Whether the edge was added by the caller, as opposed to a reverse edge
    /// materialised while pushing flow.
    pub fn is_original(&self) -> bool {
        self.original
    }

    /// Residual capacity, `capacity - flow`.
    pub fn residual(&self) -> F {
        self.capacity - self.flow
    }
}

/// Edges, flows and residual capacities of a flow network.
///
/// Flow is skew-symmetric: pushing `d` along `(u, v)` adds `d` to `flow(u, v)`
/// and subtracts `d` from `flow(v, u)`, so `residual(u, v) + residual(v, u)`
/// only changes when capacities do. Every edge carrying non-zero flow has its
/// reverse present.
#[derive(Clone, Debug)]
pub struct ResidualGraph<F> {
    source: usize,
    sink: usize,
    edges: Vec<Edge<F>>,
    // outgoing edge ids per vertex, in insertion order
    adjacency: Vec<Vec<usize>>,
    // We need random access to the edges by endpoint pair.
    index: BTreeMap<(usize, usize), usize>,
}

impl<F: Int> ResidualGraph<F> {
    fn new(vertex_count: usize, source: usize, sink: usize) -> ResidualGraph<F> {
        ResidualGraph {
            source,
            sink,
            edges: Vec::new(),
            adjacency: vec![Vec::new(); vertex_count],
            index: BTreeMap::new(),
        }
    }

    pub fn vertex_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn source(&self) -> usize {
        self.source
    }

    pub fn sink(&self) -> usize {
        self.sink
    }

    /// Outgoing edges of `u` (original and reverse) in insertion order.
    ///
    /// Panics if `u` is not a vertex of the graph.
    pub fn edges_from(&self, u: usize) -> impl Iterator<Item = &Edge<F>> + '_ {
        self.adjacency[u].iter().map(move |&id| &self.edges[id])
    }

    /// Edges added by the caller, in insertion order.
    pub fn original_edges(&self) -> impl Iterator<Item = &Edge<F>> + '_ {
        self.edges.iter().filter(|e| e.original)
    }

    pub fn edge(&self, u: usize, v: usize) -> Option<&Edge<F>> {
        self.index.get(&(u, v)).map(|&id| &self.edges[id])
    }

    /// Flow currently assigned to `(u, v)`, zero when there is no such edge.
    pub fn flow(&self, u: usize, v: usize) -> F {
        self.edge(u, v).map_or_else(F::zero, Edge::flow)
    }

    /// Residual capacity of `(u, v)`, zero when there is no such edge.
    pub fn effective_capacity(&self, u: usize, v: usize) -> Result<F, Error> {
        match self.edge(u, v) {
            None => Ok(F::zero()),
            Some(e) if e.flow > e.capacity => {
                Err(Error::CapacityInvariantViolation { tail: u, head: v })
            }
            Some(e) => Ok(e.residual()),
        }
    }

    /// Pushes `delta` units along `(u, v)` and takes them off `(v, u)`,
    /// creating either edge with capacity 0 if it does not exist yet.
    ///
    /// Fails without touching any flow if the push would leave an edge with
    /// more flow than capacity.
    pub fn push_flow(&mut self, u: usize, v: usize, delta: F) -> Result<(), Error> {
        self.check_vertex(u)?;
        self.check_vertex(v)?;
        if u == v {
            return Err(Error::SelfLoop(u));
        }

        let forward = self.edge_id_or_insert(u, v);
        let backward = self.edge_id_or_insert(v, u);

        let forward_flow = self.edges[forward]
            .flow
            .checked_add(&delta)
            .ok_or(Error::ArithmeticOverflow)?;
        let backward_flow = self.edges[backward]
            .flow
            .checked_sub(&delta)
            .ok_or(Error::ArithmeticOverflow)?;

        if forward_flow > self.edges[forward].capacity {
            return Err(Error::CapacityInvariantViolation { tail: u, head: v });
        }
        if backward_flow > self.edges[backward].capacity {
            return Err(Error::CapacityInvariantViolation { tail: v, head: u });
        }

        self.edges[forward].flow = forward_flow;
        self.edges[backward].flow = backward_flow;
        Ok(())
    }

    /// Net flow leaving the source, i.e. the value of the current flow.
    pub fn flow_value(&self) -> Result<F, Error> {
        self.net_outflow(self.source)
    }

    /// Flow received by `u` and not forwarded (negative when `u` sends more than it gets).
    pub fn excess(&self, u: usize) -> Result<F, Error> {
        self.net_outflow(u).map(|out| -out)
    }

    fn net_outflow(&self, u: usize) -> Result<F, Error> {
        self.edges_from(u)
            .try_fold(F::zero(), |acc, e| acc.checked_add(&e.flow))
            .ok_or(Error::ArithmeticOverflow)
    }

    /// The flow assignment: original edges carrying positive flow, as
    /// `(tail, head, flow)` in insertion order.
    pub fn edge_flows(&self) -> Vec<(usize, usize, F)> {
        self.edges
            .iter()
            .filter(|e| e.original && e.flow > F::zero())
            .map(|e| (e.tail, e.head, e.flow))
            .collect()
    }

    /// Checks that inflow equals outflow at every vertex except source and sink.
    pub fn check_conservation(&self) -> Result<(), Error> {
        for u in (0..self.vertex_count()).filter(|&u| u != self.source && u != self.sink) {
            if self.excess(u)? != F::zero() {
                return Err(Error::UnbalancedFlow(u));
            }
        }
        Ok(())
    }

    /// Checks `flow <= capacity` on every edge, and thereby `0 <= flow` on
    /// every original edge whose reverse has no capacity.
    pub fn check_capacities(&self) -> Result<(), Error> {
        match self.edges.iter().find(|e| e.flow > e.capacity) {
            Some(e) => Err(Error::CapacityInvariantViolation {
                tail: e.tail,
                head: e.head,
            }),
            None => Ok(()),
        }
    }

    fn check_vertex(&self, u: usize) -> Result<(), Error> {
        if u < self.vertex_count() {
            Ok(())
        } else {
            Err(Error::VertexOutOfRange {
                vertex: u,
                vertex_count: self.vertex_count(),
            })
        }
    }

    fn edge_id_or_insert(&mut self, u: usize, v: usize) -> usize {
        if let Some(&id) = self.index.get(&(u, v)) {
            return id;
        }
        let id = self.edges.len();
        self.edges.push(Edge::new(u, v, F::zero(), false));
        self.adjacency[u].push(id);
        self.index.insert((u, v), id);
        id
    }
}

/// A directed capacitated network with a distinguished source and sink.
///
/// Edges are added up front; max-flow runs work on a copy of the residual
/// state (see [`FlowNetwork::residual`]) so the network stays queryable and
/// can be solved again.
#[derive(Clone, Debug)]
pub struct FlowNetwork<F> {
    policy: EdgePolicy,
    base: ResidualGraph<F>,
}

impl<F: Int> FlowNetwork<F> {
    pub fn new(vertex_count: usize, source: usize, sink: usize) -> Result<FlowNetwork<F>, Error> {
        for vertex in [source, sink] {
            if vertex >= vertex_count {
                return Err(Error::VertexOutOfRange {
                    vertex,
                    vertex_count,
                });
            }
        }
        if source == sink {
            return Err(Error::SourceIsSink(source));
        }

        Ok(FlowNetwork {
            policy: EdgePolicy::default(),
            base: ResidualGraph::new(vertex_count, source, sink),
        })
    }

    pub fn with_policy(mut self, policy: EdgePolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> EdgePolicy {
        self.policy
    }

    pub fn vertex_count(&self) -> usize {
        self.base.vertex_count()
    }

    pub fn source(&self) -> usize {
        self.base.source
    }

    pub fn sink(&self) -> usize {
        self.base.sink
    }

    pub fn add_edge(&mut self, u: usize, v: usize, capacity: F) -> Result<(), Error> {
        self.add_edge_with_flow(u, v, capacity, F::zero())
    }

    /// Adds `(u, v)` carrying an initial `flow` (mirrored onto `(v, u)`).
    ///
    /// Under [`EdgePolicy::Merge`] a repeated pair accumulates both capacity
    /// and flow; under [`EdgePolicy::Reject`] it fails with
    /// [`Error::DuplicateEdge`].
    pub fn add_edge_with_flow(
        &mut self,
        u: usize,
        v: usize,
        capacity: F,
        flow: F,
    ) -> Result<(), Error> {
        self.base.check_vertex(u)?;
        self.base.check_vertex(v)?;
        if u == v {
            return Err(Error::SelfLoop(u));
        }
        if capacity < F::zero() {
            return Err(Error::NegativeCapacity { tail: u, head: v });
        }
        if flow < F::zero() || flow > capacity {
            return Err(Error::InvalidInitialFlow { tail: u, head: v });
        }

        let id = match self.base.index.get(&(u, v)).copied() {
            Some(id) if self.base.edges[id].original && self.policy == EdgePolicy::Reject => {
                return Err(Error::DuplicateEdge { tail: u, head: v });
            }
            // a reverse edge seeded by an earlier initial flow becomes original here
            Some(id) => id,
            None => self.base.edge_id_or_insert(u, v),
        };

        let edge = &mut self.base.edges[id];
        edge.capacity = edge
            .capacity
            .checked_add(&capacity)
            .ok_or(Error::ArithmeticOverflow)?;
        edge.original = true;

        if flow != F::zero() {
            self.base.push_flow(u, v, flow)?;
        }
        Ok(())
    }

    /// Original edges in insertion order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge<F>> + '_ {
        self.base.original_edges()
    }

    /// Capacity of `(u, v)` as added by the caller, zero when absent.
    pub fn capacity(&self, u: usize, v: usize) -> F {
        self.base.edge(u, v).map_or_else(F::zero, Edge::capacity)
    }

    /// A fresh copy of the residual state for one max-flow run.
    pub fn residual(&self) -> ResidualGraph<F> {
        self.base.clone()
    }

    /// Builds a network from a petgraph graph whose edge weights are capacities.
    ///
    /// Vertex ids are the graph's node indices.
    pub fn from_graph<G>(
        g: G,
        source: G::NodeId,
        sink: G::NodeId,
        policy: EdgePolicy,
    ) -> Result<FlowNetwork<F>, Error>
    where
        G: IntoEdgeReferences<EdgeWeight = F> + NodeIndexable,
    {
        let mut network =
            FlowNetwork::new(g.node_bound(), g.to_index(source), g.to_index(sink))?
                .with_policy(policy);
        for e in g.edge_references() {
            network.add_edge(g.to_index(e.source()), g.to_index(e.target()), *e.weight())?;
        }
        Ok(network)
    }
}
