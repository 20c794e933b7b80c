//! Problems solved by building a synthetic flow network and reading the answer
//! back off the flow.

pub mod bipartite;
pub mod channel;
pub mod disjoint_paths;

use alloc::vec::Vec;

use crate::error::Error;
use crate::int::Int;
use crate::network::{EdgePolicy, FlowNetwork, ResidualGraph};

pub use self::bipartite::BipartiteMatching;
pub use self::channel::ChannelAssignment;
pub use self::disjoint_paths::{DisjointPaths, EdgeDisjointPaths};

/// Pairs chosen by a matching-style reduction, with the flow value that picked them.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Assignment<F> {
    pub value: F,
    pub pairs: Vec<(usize, usize)>,
}

impl<F> Assignment<F> {
    pub fn size(&self) -> usize {
        self.pairs.len()
    }
}

/// Vertex numbering for a two-sided network: left indices first, then right
/// indices, then super-source and super-sink.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Layout {
    left: usize,
    right: usize,
}

impl Layout {
    pub(crate) fn new(left: usize, right: usize) -> Self {
        Self { left, right }
    }

    pub(crate) fn source(&self) -> usize {
        self.left + self.right
    }

    pub(crate) fn sink(&self) -> usize {
        self.left + self.right + 1
    }

    pub(crate) fn right_vertex(&self, j: usize) -> usize {
        self.left + j
    }

    pub(crate) fn check_left(&self, i: usize) -> Result<(), Error> {
        check_index(i, self.left)
    }

    pub(crate) fn check_right(&self, j: usize) -> Result<(), Error> {
        check_index(j, self.right)
    }

    /// An empty network over the layout, merging repeated pairs.
    pub(crate) fn network<F: Int>(&self) -> Result<FlowNetwork<F>, Error> {
        Ok(FlowNetwork::new(self.left + self.right + 2, self.source(), self.sink())?
            .with_policy(EdgePolicy::Merge))
    }

    /// Connects the super-source to every left vertex and every right vertex
    /// to the super-sink with unit capacity.
    pub(crate) fn attach_terminals<F: Int>(&self, network: &mut FlowNetwork<F>) -> Result<(), Error> {
        for i in 0..self.left {
            network.add_edge(self.source(), i, F::one())?;
        }
        for j in 0..self.right {
            network.add_edge(self.right_vertex(j), self.sink(), F::one())?;
        }
        Ok(())
    }

    /// Left-to-right edges carrying flow, as `(left index, right index)`.
    pub(crate) fn matched_pairs<F: Int>(&self, residual: &ResidualGraph<F>) -> Vec<(usize, usize)> {
        residual
            .edge_flows()
            .into_iter()
            .filter(|&(u, v, _)| u < self.left && (self.left..self.source()).contains(&v))
            .map(|(u, v, _)| (u, v - self.left))
            .collect()
    }
}

fn check_index(index: usize, len: usize) -> Result<(), Error> {
    if index < len {
        Ok(())
    } else {
        Err(Error::IndexOutOfRange { index, len })
    }
}
