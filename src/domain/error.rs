//! Domain-level errors (no external dependencies)

use thiserror::Error;

use crate::domain::node::NodeId;

/// Broad classes of domain failures.
///
/// Every class is a usage error; none of them is transient.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A node handle is not where the operation needs it to be
    InvalidOperand,
    /// A required argument (the colour) is absent or unusable
    PreconditionViolation,
    /// Tree invariants found broken by `verify`
    Corruption,
}

/// Domain errors represent tree-rule violations.
/// All of them are raised before any mutation takes place.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("unknown node: {0}")]
    UnknownNode(NodeId),

    #[error("node {0} is not reachable from the tree root")]
    NotInTree(NodeId),

    #[error("node {0} has no parent (root or detached)")]
    NoParent(NodeId),

    #[error("node {child} is already attached to {parent}")]
    AlreadyAttached { child: NodeId, parent: NodeId },

    #[error("node {child} is not a child of {parent}")]
    NotAChild { parent: NodeId, child: NodeId },

    #[error("attaching {child} under {parent} would create a cycle")]
    WouldCycle { parent: NodeId, child: NodeId },

    #[error("cannot swap {ancestor} with its descendant {descendant}")]
    AncestorSwap {
        ancestor: NodeId,
        descendant: NodeId,
    },

    #[error("cannot swap node {0} with itself")]
    SelfSwap(NodeId),

    #[error("node {0} is still attached, only detached subtrees can be discarded")]
    StillAttached(NodeId),

    #[error("colour required: {0}")]
    MissingColour(String),

    #[error("unknown colour: {0}")]
    UnknownColour(String),

    #[error("invariant violated at {node}: {reason}")]
    InvariantViolation { node: NodeId, reason: String },
}

impl DomainError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            DomainError::MissingColour(_) | DomainError::UnknownColour(_) => {
                ErrorKind::PreconditionViolation
            }
            DomainError::InvariantViolation { .. } => ErrorKind::Corruption,
            _ => ErrorKind::InvalidOperand,
        }
    }
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;
