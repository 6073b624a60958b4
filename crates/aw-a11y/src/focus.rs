//! Focus Management
//!
//! Focusable-element detection and Tab-cycle containment.

use aw_dom::{Document, ElementData, Key, KeyEvent, NodeId};

/// Tab index semantics of a `tabindex` attribute value
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TabIndex {
    NotFocusable,
    Sequential(i32),
}

impl TabIndex {
    pub fn parse(value: &str) -> Self {
        match value.trim().parse::<i32>() {
            Ok(n) if n < 0 => Self::NotFocusable,
            Ok(n) => Self::Sequential(n),
            Err(_) => Self::NotFocusable,
        }
    }

    pub fn is_focusable(&self) -> bool {
        matches!(self, Self::Sequential(_))
    }
}

/// Check an element can take keyboard focus.
///
/// Matches links with an `href`, non-disabled form controls, and any
/// element with an explicit non-negative `tabindex`.
pub fn is_focusable(elem: &ElementData) -> bool {
    if let Some(tabindex) = elem.attr("tabindex") {
        return TabIndex::parse(tabindex).is_focusable();
    }
    match elem.tag() {
        "a" => elem.has_attr("href"),
        "button" | "textarea" | "input" | "select" => !elem.has_attr("disabled"),
        _ => false,
    }
}

/// Focusable descendants of `root` in document order
pub fn scan_focusables(doc: &Document, root: NodeId) -> Vec<NodeId> {
    doc.tree()
        .descendants(root)
        .into_iter()
        .filter(|&id| doc.element(id).is_some_and(is_focusable))
        .collect()
}

/// Tab-cycle containment over an ordered focusable list
///
/// `target` answers where a Tab keypress should move focus: wraps at the
/// ends, swallows the key when the list is empty, and defers to default
/// handling (`None` without prevent-default) in the interior.
#[derive(Debug, Default)]
pub struct FocusTrap {
    focusables: Vec<NodeId>,
}

impl FocusTrap {
    pub fn new(focusables: Vec<NodeId>) -> Self {
        Self { focusables }
    }

    /// Replace the cached focusable list
    pub fn set_focusables(&mut self, focusables: Vec<NodeId>) {
        self.focusables = focusables;
    }

    /// First focusable element, if any
    pub fn first(&self) -> Option<NodeId> {
        self.focusables.first().copied()
    }

    pub fn is_empty(&self) -> bool {
        self.focusables.is_empty()
    }

    /// Where a Tab keypress moves focus from `current`.
    ///
    /// Marks the event default-prevented whenever the trap takes over.
    pub fn target(&self, current: Option<NodeId>, key: &mut KeyEvent) -> Option<NodeId> {
        if key.key != Key::Tab {
            return None;
        }
        if self.focusables.is_empty() {
            key.prevent_default();
            return None;
        }
        let first = *self.focusables.first()?;
        let last = *self.focusables.last()?;
        if key.shift {
            if current == Some(first) {
                key.prevent_default();
                return Some(last);
            }
        } else if current == Some(last) {
            key.prevent_default();
            return Some(first);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_index() {
        assert!(!TabIndex::parse("-1").is_focusable());
        assert!(TabIndex::parse("0").is_focusable());
        assert!(TabIndex::parse("5").is_focusable());
        assert!(!TabIndex::parse("nope").is_focusable());
    }

    #[test]
    fn test_focusable_detection() {
        let mut doc = Document::new();
        let body = doc.body();

        let link = doc.create_element("a");
        doc.set_attr(link, "href", "#");
        let bare_link = doc.create_element("a");
        let button = doc.create_element("button");
        let disabled = doc.create_element("button");
        doc.set_attr(disabled, "disabled", "");
        let div = doc.create_element("div");
        let tabbable_div = doc.create_element("div");
        doc.set_attr(tabbable_div, "tabindex", "0");

        for id in [link, bare_link, button, disabled, div, tabbable_div] {
            doc.append_child(body, id).unwrap();
        }

        assert_eq!(scan_focusables(&doc, body), vec![link, button, tabbable_div]);
    }

    #[test]
    fn test_trap_wraps_at_ends() {
        let trap = FocusTrap::new(vec![NodeId(1), NodeId(2), NodeId(3)]);

        let mut tab = KeyEvent::new(Key::Tab);
        assert_eq!(trap.target(Some(NodeId(3)), &mut tab), Some(NodeId(1)));
        assert!(tab.is_default_prevented());

        let mut shift_tab = KeyEvent::new(Key::Tab).shifted();
        assert_eq!(trap.target(Some(NodeId(1)), &mut shift_tab), Some(NodeId(3)));
        assert!(shift_tab.is_default_prevented());
    }

    #[test]
    fn test_trap_defers_in_interior() {
        let trap = FocusTrap::new(vec![NodeId(1), NodeId(2), NodeId(3)]);
        let mut tab = KeyEvent::new(Key::Tab);
        assert_eq!(trap.target(Some(NodeId(2)), &mut tab), None);
        assert!(!tab.is_default_prevented());
    }

    #[test]
    fn test_trap_swallows_when_empty() {
        let trap = FocusTrap::new(Vec::new());
        let mut tab = KeyEvent::new(Key::Tab);
        assert_eq!(trap.target(None, &mut tab), None);
        assert!(tab.is_default_prevented());
    }
}
