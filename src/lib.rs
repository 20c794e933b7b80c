//! Maximum flow on directed capacitated networks.
//!
//! Build a [`FlowNetwork`], solve it with [`compute_max_flow`] using either
//! Edmonds-Karp or push-relabel, and hand the returned [`ResidualGraph`] to
//! [`compute_min_cut`]. The [`reduction`] module solves bipartite matching,
//! channel assignment and edge-disjoint path counting on top of this.
//!
//! ```
//! use flownet::{compute_max_flow, compute_min_cut, Algorithm, Config, FlowNetwork};
//!
//! let mut network = FlowNetwork::<i32>::new(4, 0, 3).unwrap();
//! network.add_edge(0, 1, 3).unwrap();
//! network.add_edge(0, 2, 2).unwrap();
//! network.add_edge(1, 3, 2).unwrap();
//! network.add_edge(2, 3, 3).unwrap();
//!
//! let (value, residual) = compute_max_flow(&network, &Config::new(Algorithm::PushRelabel)).unwrap();
//! assert_eq!(value, 4);
//! assert_eq!(compute_min_cut(&network, &residual).unwrap(), vec![(0, 2), (1, 3)]);
//! ```

#![no_std]
#![deny(
    warnings,
    trivial_casts,
    trivial_numeric_casts,
    unused_import_braces,
    unused_qualifications,
    rust_2018_idioms
)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod algo;
pub mod error;
pub mod int;
pub mod network;
pub mod reduction;

use alloc::vec::Vec;

pub use crate::algo::{Algorithm, Config, MaxFlow};
pub use crate::error::{Error, ErrorKind};
pub use crate::int::Int;
pub use crate::network::{Edge, EdgePolicy, FlowNetwork, ResidualGraph};

/// Runs the configured max-flow algorithm on a copy of `network`'s residual
/// state and returns the flow value with the final residual graph.
///
/// `network` itself is left untouched and can be solved again.
pub fn compute_max_flow<F: Int>(
    network: &FlowNetwork<F>,
    config: &Config,
) -> Result<(F, ResidualGraph<F>), Error> {
    let residual = network.residual();
    residual.check_conservation()?;
    algo::run(config, residual)
}

/// Edges of a minimum cut read off the residual graph of a completed run.
pub fn compute_min_cut<F: Int>(
    network: &FlowNetwork<F>,
    residual: &ResidualGraph<F>,
) -> Result<Vec<(usize, usize)>, Error> {
    algo::min_cut::min_cut(network, residual)
}
