use alloc::vec;
use alloc::vec::Vec;
use core::cmp::min;

use crate::algo::{IterationBudget, MaxFlow};
use crate::error::Error;
use crate::int::Int;
use crate::network::ResidualGraph;

/// Generic push-relabel max flow.
///
/// The overflowing vertex with the lowest id is always processed next, and it
/// pushes along the first admissible edge in insertion order, so runs are
/// deterministic.
#[derive(Clone, Debug, Default)]
pub struct PushRelabel {
    iteration_limit: Option<usize>,
}

impl PushRelabel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fail with [`Error::IterationLimitExceeded`] after `limit` push and relabel operations.
    pub fn with_iteration_limit(limit: Option<usize>) -> Self {
        Self {
            iteration_limit: limit,
        }
    }
}

struct State<F> {
    residual: ResidualGraph<F>,
    height: Vec<usize>,
    excess: Vec<F>,
}

impl<F: Int> State<F> {
    /// Builds the initial preflow: the source is lifted to height `V` and every
    /// edge leaving it is saturated.
    fn new(residual: ResidualGraph<F>) -> Result<State<F>, Error> {
        let n = residual.vertex_count();
        let source = residual.source();

        let mut height = vec![0; n];
        height[source] = n;

        // picks up any flow the network was seeded with; the source's own
        // balance is never read and stays at zero
        let excess = (0..n)
            .map(|u| {
                if u == source {
                    Ok(F::zero())
                } else {
                    residual.excess(u)
                }
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut state = State {
            residual,
            height,
            excess,
        };

        let saturating: Vec<_> = state
            .residual
            .edges_from(source)
            .filter(|e| e.residual() > F::zero())
            .map(|e| (e.head(), e.residual()))
            .collect();
        for (v, capacity) in saturating {
            state.move_flow(source, v, capacity)?;
        }

        Ok(state)
    }

    /// Moves `amount` from `u` to `v`. The source is not accounted, its
    /// outflow may exceed what `F` can hold.
    fn move_flow(&mut self, u: usize, v: usize, amount: F) -> Result<(), Error> {
        self.residual.push_flow(u, v, amount)?;
        let source = self.residual.source();
        if u != source {
            self.excess[u] = self.excess[u]
                .checked_sub(&amount)
                .ok_or(Error::ArithmeticOverflow)?;
        }
        if v != source {
            self.excess[v] = self.excess[v]
                .checked_add(&amount)
                .ok_or(Error::ArithmeticOverflow)?;
        }
        Ok(())
    }

    /// Lowest-id vertex other than source and sink holding positive excess.
    fn overflow_vertex(&self) -> Option<usize> {
        let (source, sink) = (self.residual.source(), self.residual.sink());
        (0..self.excess.len())
            .find(|&u| u != source && u != sink && self.excess[u] > F::zero())
    }

    /// Pushes excess from `u` along its first admissible edge. Returns `false`
    /// if there is none.
    fn push(&mut self, u: usize) -> Result<bool, Error> {
        let height = &self.height;
        let admissible = self
            .residual
            .edges_from(u)
            .find(|e| e.residual() > F::zero() && height[u] > height[e.head()])
            .map(|e| (e.head(), e.residual()));

        let Some((v, residual)) = admissible else {
            return Ok(false);
        };

        debug_assert!(self.excess[u] > F::zero());
        debug_assert!(self.height[u] == self.height[v] + 1);

        let amount = min(residual, self.excess[u]);
        log::trace!("push {amount} along ({u}, {v})");
        self.move_flow(u, v, amount)?;
        Ok(true)
    }

    fn relabel(&mut self, u: usize) -> Result<(), Error> {
        // An overflowing vertex received flow, so the reverse of that edge has
        // residual capacity. Finding none means the flow bookkeeping is broken.
        let min_nbr_height = self
            .residual
            .edges_from(u)
            .filter(|e| e.residual() > F::zero())
            .map(|e| self.height[e.head()])
            .min()
            .ok_or(Error::NoResidualNeighbor(u))?;

        debug_assert!(min_nbr_height + 1 > self.height[u]);
        log::trace!("relabel {u}: {} -> {}", self.height[u], min_nbr_height + 1);
        self.height[u] = min_nbr_height + 1;
        Ok(())
    }

    fn run(&mut self, budget: &mut IterationBudget) -> Result<(), Error> {
        while let Some(u) = self.overflow_vertex() {
            budget.tick()?;
            if !self.push(u)? {
                self.relabel(u)?;
            }
        }
        Ok(())
    }
}

impl<F: Int> MaxFlow<F> for PushRelabel {
    fn max_flow(&mut self, residual: ResidualGraph<F>) -> Result<(F, ResidualGraph<F>), Error> {
        let mut budget = IterationBudget::new(self.iteration_limit);
        let mut state = State::new(residual)?;
        state.run(&mut budget)?;

        let value = state.excess[state.residual.sink()];
        log::debug!(
            "push-relabel: flow value {value} after {} push/relabel operations",
            budget.used()
        );
        Ok((value, state.residual))
    }
}
