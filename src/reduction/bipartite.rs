use alloc::vec;
use alloc::vec::Vec;

use crate::algo::Config;
use crate::compute_max_flow;
use crate::error::Error;
use crate::network::{FlowNetwork, ResidualGraph};
use crate::reduction::{Assignment, Layout};

/// Maximum bipartite matching between applicants and jobs.
///
/// Applicant `i` becomes vertex `i`, job `j` vertex `applicants + j`; the
/// super-source feeds each applicant and each job drains into the super-sink,
/// all with unit capacity.
#[derive(Clone, Debug)]
pub struct BipartiteMatching {
    layout: Layout,
    allowed: Vec<Vec<usize>>,
}

impl BipartiteMatching {
    pub fn new(applicants: usize, jobs: usize) -> Self {
        Self {
            layout: Layout::new(applicants, jobs),
            allowed: vec![Vec::new(); applicants],
        }
    }

    /// Builds the matching problem from an applicant -> allowed-jobs adjacency list.
    pub fn from_adjacency(jobs: usize, allowed: &[Vec<usize>]) -> Result<Self, Error> {
        let mut matching = Self::new(allowed.len(), jobs);
        for (applicant, jobs) in allowed.iter().enumerate() {
            for &job in jobs {
                matching.add(applicant, job)?;
            }
        }
        Ok(matching)
    }

    /// Allows `applicant` to take `job`.
    pub fn add(&mut self, applicant: usize, job: usize) -> Result<(), Error> {
        self.layout.check_left(applicant)?;
        self.layout.check_right(job)?;
        self.allowed[applicant].push(job);
        Ok(())
    }

    pub fn flow_network(&self) -> Result<FlowNetwork<i64>, Error> {
        let mut network = self.layout.network()?;
        for (applicant, jobs) in self.allowed.iter().enumerate() {
            for &job in jobs {
                network.add_edge(applicant, self.layout.right_vertex(job), 1)?;
            }
        }
        self.layout.attach_terminals(&mut network)?;
        Ok(network)
    }

    /// `(applicant, job)` pairs matched by a maximum flow in `residual`.
    pub fn matched_pairs(&self, residual: &ResidualGraph<i64>) -> Vec<(usize, usize)> {
        self.layout.matched_pairs(residual)
    }

    pub fn compute(&self, config: &Config) -> Result<Assignment<i64>, Error> {
        let network = self.flow_network()?;
        let (value, residual) = compute_max_flow(&network, config)?;
        let pairs = self.matched_pairs(&residual);
        log::debug!("bipartite matching of size {value}: {pairs:?}");
        Ok(Assignment { value, pairs })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::algo::Algorithm;

    fn applicants() -> BipartiteMatching {
        BipartiteMatching::from_adjacency(
            6,
            &[
                vec![1, 2],
                vec![],
                vec![0, 3],
                vec![2],
                vec![2, 3],
                vec![5],
            ],
        )
        .unwrap()
    }

    #[test]
    fn algorithms_agree_on_the_matching_size() {
        let matching = applicants();
        let ek = matching.compute(&Config::new(Algorithm::EdmondsKarp)).unwrap();
        let pr = matching.compute(&Config::new(Algorithm::PushRelabel)).unwrap();
        assert_eq!(ek.value, pr.value);
        assert_eq!(ek.size(), pr.size());
        // applicant 1 has no allowed job, every other applicant can be placed
        assert_eq!(ek.size(), 5);
    }

    #[test]
    fn pairs_form_a_matching_of_allowed_edges() {
        let result = applicants().compute(&Config::default()).unwrap();
        assert_eq!(result.value, result.size() as i64);
        for &(a, j) in &result.pairs {
            assert!(applicants().allowed[a].contains(&j));
            assert_eq!(result.pairs.iter().filter(|p| p.0 == a).count(), 1);
            assert_eq!(result.pairs.iter().filter(|p| p.1 == j).count(), 1);
        }
    }

    #[test]
    fn rejects_out_of_range_indices() {
        let mut m = BipartiteMatching::new(2, 3);
        assert_eq!(m.add(2, 0), Err(Error::IndexOutOfRange { index: 2, len: 2 }));
        assert_eq!(m.add(0, 3), Err(Error::IndexOutOfRange { index: 3, len: 3 }));
    }

    #[test]
    fn duplicate_pairs_do_not_inflate_the_matching() {
        let mut m = BipartiteMatching::new(1, 1);
        m.add(0, 0).unwrap();
        m.add(0, 0).unwrap();
        let result = m.compute(&Config::default()).unwrap();
        assert_eq!(result.pairs, vec![(0, 0)]);
    }

    #[test]
    fn empty_sides() {
        let result = BipartiteMatching::new(0, 3).compute(&Config::default()).unwrap();
        assert_eq!(result.value, 0);
        assert!(result.pairs.is_empty());
    }
}
