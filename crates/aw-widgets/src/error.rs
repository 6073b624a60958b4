//! Widget construction errors
//!
//! Only programmer errors fail construction; missing internal structure
//! degrades to an inert widget instead (logged, not fatal).

use aw_dom::NodeId;

/// Errors surfaced to the host at construction time
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum WidgetError {
    /// The required container node does not exist in the document
    #[error("{widget} requires a container element")]
    MissingContainer { widget: &'static str },
    /// The supplied container node is not an element
    #[error("{widget} container {node:?} is not an element")]
    NotAnElement {
        widget: &'static str,
        node: NodeId,
    },
}
