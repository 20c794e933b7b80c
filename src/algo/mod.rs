pub mod edmonds_karp;
pub mod min_cut;
pub mod push_relabel;

use crate::error::Error;
use crate::int::Int;
use crate::network::ResidualGraph;

use self::edmonds_karp::EdmondsKarp;
use self::push_relabel::PushRelabel;

/// A maximum-flow algorithm.
pub trait MaxFlow<F> {
    /// Drive `residual` to a maximum flow and return the flow value along with the final
    /// residual graph.
    fn max_flow(&mut self, residual: ResidualGraph<F>) -> Result<(F, ResidualGraph<F>), Error>;
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub enum Algorithm {
    /// Shortest augmenting paths found by breadth-first search.
    #[default]
    EdmondsKarp,
    /// Generic push-relabel on a preflow.
    PushRelabel,
}

/// Run configuration for [`crate::compute_max_flow`].
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Config {
    pub algorithm: Algorithm,
    /// Upper bound on augmentations (Edmonds-Karp) or push/relabel operations (push-relabel).
    pub iteration_limit: Option<usize>,
}

impl Config {
    pub fn new(algorithm: Algorithm) -> Self {
        Self {
            algorithm,
            iteration_limit: None,
        }
    }

    pub fn with_algorithm(mut self, algorithm: Algorithm) -> Self {
        self.algorithm = algorithm;
        self
    }

    pub fn with_iteration_limit(mut self, limit: usize) -> Self {
        self.iteration_limit = Some(limit);
        self
    }
}

pub(crate) fn run<F: Int>(
    config: &Config,
    residual: ResidualGraph<F>,
) -> Result<(F, ResidualGraph<F>), Error> {
    match config.algorithm {
        Algorithm::EdmondsKarp => {
            EdmondsKarp::with_iteration_limit(config.iteration_limit).max_flow(residual)
        }
        Algorithm::PushRelabel => {
            PushRelabel::with_iteration_limit(config.iteration_limit).max_flow(residual)
        }
    }
}

/// Counts loop iterations against an optional cap.
#[derive(Debug)]
pub(crate) struct IterationBudget {
    limit: Option<usize>,
    used: usize,
}

impl IterationBudget {
    pub(crate) fn new(limit: Option<usize>) -> Self {
        Self { limit, used: 0 }
    }

    pub(crate) fn tick(&mut self) -> Result<(), Error> {
        self.used += 1;
        match self.limit {
            Some(limit) if self.used > limit => Err(Error::IterationLimitExceeded(limit)),
            _ => Ok(()),
        }
    }

    pub(crate) fn used(&self) -> usize {
        self.used
    }
}
