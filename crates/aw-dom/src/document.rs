//! Document - High-level document API
//!
//! Owns the tree plus the page-level state the widgets share: the focused
//! element, a reference-counted scroll lock, and the ordered stack of open
//! dialogs.

use tracing::trace;

use crate::{DomResult, DomTree, ElementData, NodeId};

/// Headless document
pub struct Document {
    /// The DOM tree
    tree: DomTree,
    /// Cached reference to the body element
    body: NodeId,
    /// Currently focused element
    active_element: Option<NodeId>,
    /// Scroll-lock reference count; body overflow is hidden while > 0
    scroll_locks: u32,
    /// Open dialogs, bottom to top
    dialog_stack: Vec<NodeId>,
}

impl Document {
    /// Create a new document with an empty body
    pub fn new() -> Self {
        let mut tree = DomTree::new();
        let body = tree.create_element("body");
        Self {
            tree,
            body,
            active_element: None,
            scroll_locks: 0,
            dialog_stack: Vec::new(),
        }
    }

    /// Get the body element
    pub fn body(&self) -> NodeId {
        self.body
    }

    /// Access the DOM tree
    pub fn tree(&self) -> &DomTree {
        &self.tree
    }

    /// Access the DOM tree mutably
    pub fn tree_mut(&mut self) -> &mut DomTree {
        &mut self.tree
    }

    // === Construction conveniences ===

    /// Create a detached element
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.tree.create_element(tag)
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.tree.create_text(content)
    }

    /// Append a child node
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        self.tree.append_child(parent, child)
    }

    // === Element conveniences ===

    /// Element data for a node
    pub fn element(&self, id: NodeId) -> Option<&ElementData> {
        self.tree.get(id)?.as_element()
    }

    /// Mutable element data for a node
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut ElementData> {
        self.tree.get_mut(id)?.as_element_mut()
    }

    /// Get an attribute value
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id)?.attr(name)
    }

    /// Set an attribute; no-op on removed or non-element nodes
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.set_attr(name, value);
        }
    }

    /// Remove an attribute
    pub fn remove_attr(&mut self, id: NodeId, name: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.remove_attr(name);
        }
    }

    /// Check class membership
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|e| e.has_class(class))
    }

    /// Add a class
    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.add_class(class);
        }
    }

    /// Remove a class
    pub fn remove_class(&mut self, id: NodeId, class: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.remove_class(class);
        }
    }

    /// Get an inline style property
    pub fn style(&self, id: NodeId, property: &str) -> Option<&str> {
        self.element(id)?.style(property)
    }

    /// Set an inline style property
    pub fn set_style(&mut self, id: NodeId, property: &str, value: &str) {
        if let Some(elem) = self.element_mut(id) {
            elem.set_style(property, value);
        }
    }

    // === Queries (document order) ===

    /// Get element by ID
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.tree
            .descendants(self.body)
            .into_iter()
            .find(|&n| self.element(n).and_then(|e| e.id()) == Some(id))
    }

    /// Descendant elements of `root` carrying a class
    pub fn elements_by_class(&self, root: NodeId, class: &str) -> Vec<NodeId> {
        self.tree
            .descendants(root)
            .into_iter()
            .filter(|&n| self.element(n).is_some_and(|e| e.has_class(class)))
            .collect()
    }

    /// Descendant elements of `root` carrying a role attribute
    pub fn elements_by_role(&self, root: NodeId, role: &str) -> Vec<NodeId> {
        self.tree
            .descendants(root)
            .into_iter()
            .filter(|&n| self.element(n).and_then(|e| e.attr("role")) == Some(role))
            .collect()
    }

    /// First descendant of `root` carrying a class
    pub fn first_by_class(&self, root: NodeId, class: &str) -> Option<NodeId> {
        self.elements_by_class(root, class).into_iter().next()
    }

    /// First descendant of `root` carrying a role attribute
    pub fn first_by_role(&self, root: NodeId, role: &str) -> Option<NodeId> {
        self.elements_by_role(root, role).into_iter().next()
    }

    // === Focus ===

    /// Currently focused element
    pub fn active_element(&self) -> Option<NodeId> {
        self.active_element
    }

    /// Move focus to an element; no-op if the node no longer exists
    pub fn focus(&mut self, id: NodeId) {
        if self.tree.contains(id) {
            trace!(?id, "focus");
            self.active_element = Some(id);
        }
    }

    /// Clear focus
    pub fn blur(&mut self) {
        self.active_element = None;
    }

    // === Scroll lock (reference-counted) ===

    /// Acquire the page scroll lock
    pub fn lock_scroll(&mut self) {
        self.scroll_locks += 1;
        let body = self.body;
        self.set_style(body, "overflow", "hidden");
    }

    /// Release one scroll lock; body scroll returns when all are released
    pub fn unlock_scroll(&mut self) {
        self.scroll_locks = self.scroll_locks.saturating_sub(1);
        if self.scroll_locks == 0 {
            let body = self.body;
            if let Some(elem) = self.element_mut(body) {
                elem.remove_style("overflow");
            }
        }
    }

    /// Check the page scroll is locked
    pub fn scroll_locked(&self) -> bool {
        self.scroll_locks > 0
    }

    // === Open-dialog stack ===

    /// Push a dialog root onto the open stack (moves to top if present)
    pub fn push_dialog(&mut self, root: NodeId) {
        self.dialog_stack.retain(|&d| d != root);
        self.dialog_stack.push(root);
    }

    /// Remove a dialog root from the open stack
    pub fn remove_dialog(&mut self, root: NodeId) {
        self.dialog_stack.retain(|&d| d != root);
    }

    /// Top-most open dialog, if any
    pub fn top_dialog(&self) -> Option<NodeId> {
        self.dialog_stack.last().copied()
    }
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_by_id() {
        let mut doc = Document::new();
        let body = doc.body();
        let div = doc.create_element("div");
        doc.set_attr(div, "id", "main");
        doc.append_child(body, div).unwrap();

        assert_eq!(doc.element_by_id("main"), Some(div));
        assert_eq!(doc.element_by_id("missing"), None);
    }

    #[test]
    fn test_queries_in_document_order() {
        let mut doc = Document::new();
        let body = doc.body();
        let first = doc.create_element("div");
        let second = doc.create_element("div");
        doc.set_attr(first, "class", "slide");
        doc.set_attr(second, "class", "slide");
        doc.append_child(body, first).unwrap();
        doc.append_child(body, second).unwrap();

        assert_eq!(doc.elements_by_class(body, "slide"), vec![first, second]);
        assert_eq!(doc.first_by_class(body, "slide"), Some(first));
    }

    #[test]
    fn test_focus_ignores_removed_nodes() {
        let mut doc = Document::new();
        let body = doc.body();
        let btn = doc.create_element("button");
        doc.append_child(body, btn).unwrap();

        doc.focus(btn);
        assert_eq!(doc.active_element(), Some(btn));

        doc.tree_mut().remove_subtree(btn);
        let ghost = btn;
        doc.blur();
        doc.focus(ghost);
        assert_eq!(doc.active_element(), None);
    }

    #[test]
    fn test_scroll_lock_refcount() {
        let mut doc = Document::new();
        let body = doc.body();

        doc.lock_scroll();
        doc.lock_scroll();
        assert_eq!(doc.style(body, "overflow"), Some("hidden"));

        doc.unlock_scroll();
        assert!(doc.scroll_locked());
        doc.unlock_scroll();
        assert!(!doc.scroll_locked());
        assert_eq!(doc.style(body, "overflow"), None);

        // Extra release stays a no-op
        doc.unlock_scroll();
        assert!(!doc.scroll_locked());
    }

    #[test]
    fn test_dialog_stack_order() {
        let mut doc = Document::new();
        let a = doc.create_element("div");
        let b = doc.create_element("div");

        doc.push_dialog(a);
        doc.push_dialog(b);
        assert_eq!(doc.top_dialog(), Some(b));

        doc.remove_dialog(b);
        assert_eq!(doc.top_dialog(), Some(a));
        doc.remove_dialog(a);
        assert_eq!(doc.top_dialog(), None);
    }
}
