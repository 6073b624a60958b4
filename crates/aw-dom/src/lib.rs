//! aw-dom - Headless DOM
//!
//! Arena-based element tree with attributes, inline styles, input events,
//! and the document-level state widgets depend on (focus, scroll lock,
//! open-dialog stack).

mod document;
mod error;
mod event;
mod node;
mod tree;

pub use document::Document;
pub use error::{DomError, DomResult};
pub use event::{Event, EventData, EventKind, Key, KeyEvent, ListenerSet};
pub use node::{Attribute, ElementData, Node, NodeData};
pub use tree::DomTree;

/// Node identifier (index into arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Sentinel for "no node"
    pub const NONE: NodeId = NodeId(u32::MAX);

    /// Check this is a real node id
    #[inline]
    pub fn is_valid(&self) -> bool {
        *self != Self::NONE
    }
}
