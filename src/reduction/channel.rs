use alloc::vec::Vec;

use crate::algo::Config;
use crate::compute_max_flow;
use crate::error::Error;
use crate::int::Int;
use crate::network::{FlowNetwork, ResidualGraph};
use crate::reduction::{Assignment, Layout};

/// Assigns transmitters to receivers over weighted links.
///
/// Same shape as [`crate::reduction::BipartiteMatching`], but a link carries
/// its own capacity. Terminal edges stay at capacity one, so every transmitter
/// and receiver is used at most once.
#[derive(Clone, Debug)]
pub struct ChannelAssignment<F> {
    layout: Layout,
    transmitters: usize,
    receivers: usize,
    links: Vec<(usize, usize, F)>,
}

impl<F: Int> ChannelAssignment<F> {
    pub fn new(transmitters: usize, receivers: usize) -> Self {
        Self {
            layout: Layout::new(transmitters, receivers),
            transmitters,
            receivers,
            links: Vec::new(),
        }
    }

    /// Replaces all links with a transmitter x receiver capacity matrix.
    ///
    /// Row `i` holds the capacities from transmitter `i`; a zero entry means
    /// there is no link. Rows may be shorter than the receiver count.
    pub fn set_rows(&mut self, rows: &[Vec<F>]) -> Result<(), Error> {
        if rows.len() > self.transmitters {
            return Err(Error::IndexOutOfRange {
                index: rows.len() - 1,
                len: self.transmitters,
            });
        }

        self.links.clear();
        for (tx, row) in rows.iter().enumerate() {
            for (rx, &capacity) in row.iter().enumerate() {
                self.add(tx, rx, capacity)?;
            }
        }
        Ok(())
    }

    /// Links `tx` to `rx` with `capacity`; zero capacity adds nothing.
    pub fn add(&mut self, tx: usize, rx: usize, capacity: F) -> Result<(), Error> {
        self.layout.check_left(tx)?;
        self.layout.check_right(rx)?;
        if capacity < F::zero() {
            return Err(Error::NegativeCapacity { tail: tx, head: rx });
        }
        if capacity > F::zero() {
            self.links.push((tx, rx, capacity));
        }
        Ok(())
    }

    pub fn transmitters(&self) -> usize {
        self.transmitters
    }

    pub fn receivers(&self) -> usize {
        self.receivers
    }

    pub fn flow_network(&self) -> Result<FlowNetwork<F>, Error> {
        let mut network = self.layout.network()?;
        for &(tx, rx, capacity) in &self.links {
            network.add_edge(tx, self.layout.right_vertex(rx), capacity)?;
        }
        self.layout.attach_terminals(&mut network)?;
        Ok(network)
    }

    /// `(transmitter, receiver)` pairs carrying flow in `residual`.
    pub fn assigned_pairs(&self, residual: &ResidualGraph<F>) -> Vec<(usize, usize)> {
        self.layout.matched_pairs(residual)
    }

    pub fn compute(&self, config: &Config) -> Result<Assignment<F>, Error> {
        let network = self.flow_network()?;
        let (value, residual) = compute_max_flow(&network, config)?;
        let pairs = self.assigned_pairs(&residual);
        log::debug!("{value} channels assigned: {pairs:?}");
        Ok(Assignment { value, pairs })
    }
}
