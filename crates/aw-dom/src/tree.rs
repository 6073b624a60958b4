//! DOM Tree (arena-based allocation)
//!
//! Removed subtrees leave tombstone slots so stale ids answer "gone"
//! instead of aliasing a later node.

use crate::{DomError, DomResult, Node, NodeId};

/// Arena-based DOM tree
#[derive(Debug, Default)]
pub struct DomTree {
    nodes: Vec<Option<Node>>,
}

impl DomTree {
    /// Create a new empty DOM tree
    pub fn new() -> Self {
        Self { nodes: Vec::new() }
    }

    fn alloc(&mut self, node: Node) -> NodeId {
        let id = NodeId(self.nodes.len() as u32);
        self.nodes.push(Some(node));
        id
    }

    /// Create a detached element node
    pub fn create_element(&mut self, tag: &str) -> NodeId {
        self.alloc(Node::element(tag))
    }

    /// Create a detached text node
    pub fn create_text(&mut self, content: &str) -> NodeId {
        self.alloc(Node::text(content.to_string()))
    }

    /// Get a node by ID
    pub fn get(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(id.0 as usize)?.as_ref()
    }

    /// Get a mutable node by ID
    pub fn get_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(id.0 as usize)?.as_mut()
    }

    /// Check a node still exists (not removed)
    pub fn contains(&self, id: NodeId) -> bool {
        self.get(id).is_some()
    }

    /// Number of live nodes
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// Check if tree is empty
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Parent of a node, if attached
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.get(id)?.parent;
        parent.is_valid().then_some(parent)
    }

    /// Children of a node, in order
    pub fn children(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let Some(node) = self.get(id) else {
            return out;
        };
        let mut child = node.first_child;
        while child.is_valid() {
            out.push(child);
            child = match self.get(child) {
                Some(n) => n.next_sibling,
                None => break,
            };
        }
        out
    }

    /// Descendants of a node in document (pre-)order, excluding the node
    pub fn descendants(&self, id: NodeId) -> Vec<NodeId> {
        let mut out = Vec::new();
        let mut stack: Vec<NodeId> = self.children(id);
        stack.reverse();
        while let Some(next) = stack.pop() {
            out.push(next);
            let mut kids = self.children(next);
            kids.reverse();
            stack.extend(kids);
        }
        out
    }

    /// Check `ancestor` is `node` or one of its ancestors
    pub fn is_ancestor_or_self(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut current = node;
        while current.is_valid() {
            if current == ancestor {
                return true;
            }
            current = match self.get(current) {
                Some(n) => n.parent,
                None => return false,
            };
        }
        false
    }

    // === Mutation ===

    /// Append a child node, detaching it from any previous parent
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> DomResult<NodeId> {
        if !self.contains(parent) {
            return Err(DomError::NotFound(parent));
        }
        if !self.contains(child) {
            return Err(DomError::NotFound(child));
        }
        if self.is_ancestor_or_self(child, parent) {
            return Err(DomError::HierarchyRequest(child));
        }
        self.detach(child);

        let old_last = self.get(parent).map(|n| n.last_child).unwrap_or(NodeId::NONE);
        {
            let node = self.get_mut(child).ok_or(DomError::NotFound(child))?;
            node.parent = parent;
            node.prev_sibling = old_last;
        }
        if old_last.is_valid() {
            if let Some(last) = self.get_mut(old_last) {
                last.next_sibling = child;
            }
        }
        if let Some(p) = self.get_mut(parent) {
            if !p.first_child.is_valid() {
                p.first_child = child;
            }
            p.last_child = child;
        }
        Ok(child)
    }

    /// Insert `new_child` before `reference` under `parent`
    pub fn insert_before(
        &mut self,
        parent: NodeId,
        new_child: NodeId,
        reference: NodeId,
    ) -> DomResult<NodeId> {
        if self.get(reference).map(|n| n.parent) != Some(parent) {
            return Err(DomError::NotAChild(reference, parent));
        }
        if self.is_ancestor_or_self(new_child, parent) {
            return Err(DomError::HierarchyRequest(new_child));
        }
        self.detach(new_child);

        let prev = self.get(reference).map(|n| n.prev_sibling).unwrap_or(NodeId::NONE);
        {
            let node = self.get_mut(new_child).ok_or(DomError::NotFound(new_child))?;
            node.parent = parent;
            node.prev_sibling = prev;
            node.next_sibling = reference;
        }
        if let Some(r) = self.get_mut(reference) {
            r.prev_sibling = new_child;
        }
        if prev.is_valid() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = new_child;
            }
        } else if let Some(p) = self.get_mut(parent) {
            p.first_child = new_child;
        }
        Ok(new_child)
    }

    /// Unlink a node from its parent and siblings; the node stays alive
    pub fn detach(&mut self, id: NodeId) {
        let Some(node) = self.get(id) else { return };
        let (parent, prev, next) = (node.parent, node.prev_sibling, node.next_sibling);

        if prev.is_valid() {
            if let Some(p) = self.get_mut(prev) {
                p.next_sibling = next;
            }
        }
        if next.is_valid() {
            if let Some(n) = self.get_mut(next) {
                n.prev_sibling = prev;
            }
        }
        if parent.is_valid() {
            if let Some(p) = self.get_mut(parent) {
                if p.first_child == id {
                    p.first_child = next;
                }
                if p.last_child == id {
                    p.last_child = prev;
                }
            }
        }
        if let Some(node) = self.get_mut(id) {
            node.parent = NodeId::NONE;
            node.prev_sibling = NodeId::NONE;
            node.next_sibling = NodeId::NONE;
        }
    }

    /// Detach a node and free it together with all its descendants
    pub fn remove_subtree(&mut self, id: NodeId) {
        if !self.contains(id) {
            return;
        }
        self.detach(id);
        let descendants = self.descendants(id);
        self.nodes[id.0 as usize] = None;
        for d in descendants {
            self.nodes[d.0 as usize] = None;
        }
    }

    /// Concatenated text of all descendant text nodes
    pub fn text_content(&self, id: NodeId) -> String {
        let mut out = String::new();
        if let Some(text) = self.get(id).and_then(|n| n.as_text()) {
            out.push_str(text);
        }
        for d in self.descendants(id) {
            if let Some(text) = self.get(d).and_then(|n| n.as_text()) {
                out.push_str(text);
            }
        }
        out
    }

    /// Replace all children of `id` with a single text node
    pub fn set_text_content(&mut self, id: NodeId, content: &str) {
        for child in self.children(id) {
            self.remove_subtree(child);
        }
        let text = self.create_text(content);
        let _ = self.append_child(id, text);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_children() {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let a = tree.create_element("span");
        let b = tree.create_element("span");

        tree.append_child(root, a).unwrap();
        tree.append_child(root, b).unwrap();

        assert_eq!(tree.children(root), vec![a, b]);
        assert_eq!(tree.parent(a), Some(root));
    }

    #[test]
    fn test_insert_before() {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let a = tree.create_element("span");
        let b = tree.create_element("span");
        tree.append_child(root, b).unwrap();
        tree.insert_before(root, a, b).unwrap();

        assert_eq!(tree.children(root), vec![a, b]);
    }

    #[test]
    fn test_remove_subtree_tombstones() {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        let child = tree.create_element("span");
        let grandchild = tree.create_text("hi");
        tree.append_child(root, child).unwrap();
        tree.append_child(child, grandchild).unwrap();

        tree.remove_subtree(child);

        assert!(tree.contains(root));
        assert!(!tree.contains(child));
        assert!(!tree.contains(grandchild));
        assert!(tree.children(root).is_empty());
    }

    #[test]
    fn test_append_detaches_from_old_parent() {
        let mut tree = DomTree::new();
        let a = tree.create_element("div");
        let b = tree.create_element("div");
        let child = tree.create_element("span");
        tree.append_child(a, child).unwrap();
        tree.append_child(b, child).unwrap();

        assert!(tree.children(a).is_empty());
        assert_eq!(tree.children(b), vec![child]);
    }

    #[test]
    fn test_cycle_rejected() {
        let mut tree = DomTree::new();
        let a = tree.create_element("div");
        let b = tree.create_element("div");
        tree.append_child(a, b).unwrap();

        assert_eq!(
            tree.append_child(b, a),
            Err(DomError::HierarchyRequest(a))
        );
    }

    #[test]
    fn test_text_content() {
        let mut tree = DomTree::new();
        let root = tree.create_element("div");
        tree.set_text_content(root, "Slide 1 of 3");
        assert_eq!(tree.text_content(root), "Slide 1 of 3");

        tree.set_text_content(root, "Slide 2 of 3");
        assert_eq!(tree.text_content(root), "Slide 2 of 3");
    }
}
