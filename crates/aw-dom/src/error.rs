//! DOM operation errors

use crate::NodeId;

/// Result type for DOM operations
pub type DomResult<T> = Result<T, DomError>;

/// DOM operation errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DomError {
    /// Node does not exist (never allocated or already removed)
    #[error("node {0:?} not found")]
    NotFound(NodeId),
    /// Operation requires an element node
    #[error("node {0:?} is not an element")]
    NotAnElement(NodeId),
    /// Insertion would create a cycle
    #[error("hierarchy request error: {0:?} is an ancestor of the target")]
    HierarchyRequest(NodeId),
    /// Reference node is not a child of the parent
    #[error("node {0:?} is not a child of {1:?}")]
    NotAChild(NodeId, NodeId),
}
