use displaydoc::Display;

#[derive(Clone, Debug, Display, PartialEq, Eq)]
pub enum Error {
    /// vertex {vertex} is out of range for a network of {vertex_count} vertices
    VertexOutOfRange { vertex: usize, vertex_count: usize },
    /// source and sink must be distinct vertices, both are {0}
    SourceIsSink(usize),
    /// self-loop on vertex {0} is not allowed
    SelfLoop(usize),
    /// negative capacity on edge ({tail}, {head})
    NegativeCapacity { tail: usize, head: usize },
    /// initial flow on edge ({tail}, {head}) must lie within 0..=capacity
    InvalidInitialFlow { tail: usize, head: usize },
    /// flow is not conserved at vertex {0}
    UnbalancedFlow(usize),
    /// index {index} is out of range, expected a value below {len}
    IndexOutOfRange { index: usize, len: usize },
    /// parallel edge ({tail}, {head}) rejected, an edge between these vertices already exists
    DuplicateEdge { tail: usize, head: usize },
    /// flow on edge ({tail}, {head}) left the range allowed by its capacity
    CapacityInvariantViolation { tail: usize, head: usize },
    /// overflowing vertex {0} has no residual neighbour to relabel against
    NoResidualNeighbor(usize),
    /// flow value {flow} was split into {paths} paths
    PathCountMismatch { flow: usize, paths: usize },
    /// arithmetic overflow while accumulating flow
    ArithmeticOverflow,
    /// iteration limit of {0} exceeded before the flow became maximal
    IterationLimitExceeded(usize),
    /// residual graph was not produced from this flow network
    ForeignResidual,
    /// sink is still reachable from the source, the residual graph does not carry a maximum flow
    SinkReachable,
}

/// Coarse classification of [`Error`] variants.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Invalid ids, ranges or inputs supplied by the caller.
    Configuration,
    /// A second edge between the same ordered pair under the reject policy.
    DuplicateEdge,
    /// A bug in an algorithm: flow left its bounds or a relabel had nothing to look at.
    InvariantViolation,
    /// A capacity, flow or excess no longer fits the integer type.
    Overflow,
    /// The caller-imposed iteration cap was hit.
    IterationLimit,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::VertexOutOfRange { .. }
            | Error::SourceIsSink(_)
            | Error::SelfLoop(_)
            | Error::NegativeCapacity { .. }
            | Error::InvalidInitialFlow { .. }
            | Error::UnbalancedFlow(_)
            | Error::IndexOutOfRange { .. }
            | Error::ForeignResidual
            | Error::SinkReachable => ErrorKind::Configuration,
            Error::DuplicateEdge { .. } => ErrorKind::DuplicateEdge,
            Error::CapacityInvariantViolation { .. }
            | Error::NoResidualNeighbor(_)
            | Error::PathCountMismatch { .. } => ErrorKind::InvariantViolation,
            Error::ArithmeticOverflow => ErrorKind::Overflow,
            Error::IterationLimitExceeded(_) => ErrorKind::IterationLimit,
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::ToString;

    use super::*;

    #[test]
    fn messages_interpolate_fields() {
        let e = Error::VertexOutOfRange {
            vertex: 7,
            vertex_count: 3,
        };
        assert_eq!(
            e.to_string(),
            "vertex 7 is out of range for a network of 3 vertices"
        );
        assert_eq!(
            Error::IterationLimitExceeded(10).to_string(),
            "iteration limit of 10 exceeded before the flow became maximal"
        );
    }

    #[test]
    fn kinds() {
        assert_eq!(Error::SourceIsSink(0).kind(), ErrorKind::Configuration);
        assert_eq!(
            Error::DuplicateEdge { tail: 0, head: 1 }.kind(),
            ErrorKind::DuplicateEdge
        );
        assert_eq!(
            Error::CapacityInvariantViolation { tail: 0, head: 1 }.kind(),
            ErrorKind::InvariantViolation
        );
        assert_eq!(
            Error::IterationLimitExceeded(1).kind(),
            ErrorKind::IterationLimit
        );
    }
}
