//! Error types.

use thiserror::Error;

/// Failures reported by the [`Tango`](crate::Tango) call surface.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TangoError {
    #[error("key not found")]
    KeyNotFound,
    #[error("build keys are not strictly increasing at index {index}")]
    UnsortedKeys { index: usize },
}

/// A broken structural invariant, as found by
/// [`Tango::check_invariants`](crate::Tango::check_invariants).
///
/// These are programming errors, never the result of a bad argument.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InvariantViolation {
    #[error("broken parent/child link at reference node {node}")]
    BrokenLink { node: u32 },
    #[error("{reachable} of {allocated} reference nodes are reachable from the root")]
    DetachedNodes { reachable: usize, allocated: usize },
    #[error("reference keys out of order at node {node}")]
    OutOfOrder { node: u32 },
    #[error("reference node {node} prefers a node that is not its child")]
    StalePreferred { node: u32 },
    #[error("reference node {node} has a missing or stale auxiliary reference")]
    StaleAuxRef { node: u32 },
    #[error("broken link in auxiliary tree at node {node}")]
    BrokenAuxLink { node: u32 },
    #[error("reference node {node} is reachable from more than one auxiliary root")]
    DuplicateMember { node: u32 },
    #[error("auxiliary trees cover {auxiliary} nodes, reference tree has {reference}")]
    PartitionMismatch { reference: usize, auxiliary: usize },
    #[error("auxiliary tree at {root} is not exactly one maximal preferred path")]
    ChainMismatch { root: u32 },
}
