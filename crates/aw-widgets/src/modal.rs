//! Modal Dialog
//!
//! Focus-trapped overlay dialog. The widget synthesizes its own root under
//! the document body, so construction never fails. Open and close are an
//! explicit state machine; the visual transition hand-off is a cancellable
//! one-shot timer, pumped through [`Modal::tick`].

use std::time::Duration;

use aw_a11y::{scan_focusables, FocusTrap, Role};
use aw_dom::{Document, Event, EventData, EventKind, Key, KeyEvent, ListenerSet, NodeId};
use tracing::debug;

use crate::timer::{TimerId, TimerQueue};

/// Delay before the open transition completes (lets CSS pick up the class)
const OPEN_DELAY: Duration = Duration::from_millis(10);
/// Close transition duration; hidden state is finalized after this
const CLOSE_DELAY: Duration = Duration::from_millis(300);

/// Modal configuration
pub struct ModalOptions {
    /// Element id for the dialog root; generated when absent
    pub id: Option<String>,
    /// Clicking the backdrop closes the dialog
    pub close_on_backdrop: bool,
    /// Escape closes the dialog (top-most open dialog only)
    pub close_on_escape: bool,
    /// Invoked when the open transition completes
    pub on_open: Box<dyn FnMut()>,
    /// Invoked when the close transition completes
    pub on_close: Box<dyn FnMut()>,
}

impl Default for ModalOptions {
    fn default() -> Self {
        Self {
            id: None,
            close_on_backdrop: true,
            close_on_escape: true,
            on_open: Box::new(|| {}),
            on_close: Box::new(|| {}),
        }
    }
}

/// Content accepted by [`Modal::set_content`]
pub enum ModalContent {
    /// Plain text, inserted as a text node
    Text(String),
    /// An existing subtree, reparented into the dialog body
    Node(NodeId),
}

impl From<&str> for ModalContent {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for ModalContent {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<NodeId> for ModalContent {
    fn from(node: NodeId) -> Self {
        Self::Node(node)
    }
}

/// Open/close lifecycle state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalState {
    Closed,
    /// Visible, waiting for the open transition to complete
    Opening,
    Open,
    /// Transitioning out; still visible until the timer fires
    Closing,
}

/// Modal dialog widget
pub struct Modal {
    options: ModalOptions,
    state: ModalState,
    /// Dialog root (`.modal-overlay`), owned by the widget
    root: NodeId,
    backdrop: NodeId,
    close_btn: NodeId,
    /// Content area replaced by `set_content`
    body: NodeId,
    trap: FocusTrap,
    /// Focus to restore when the close transition completes
    previously_focused: Option<NodeId>,
    listeners: ListenerSet,
    timers: TimerQueue,
    /// In-flight transition completion, cancelled on interrupt
    pending: Option<TimerId>,
    destroyed: bool,
}

impl Modal {
    /// Create the dialog structure under the document body, initially hidden
    pub fn new(doc: &mut Document, mut options: ModalOptions) -> Self {
        let root = doc.create_element("div");
        let id = options
            .id
            .take()
            .unwrap_or_else(|| format!("modal-{}", root.0));

        doc.set_attr(root, "id", &id);
        doc.set_attr(root, "class", "modal-overlay");
        doc.set_attr(root, "role", Role::Dialog.as_str());
        doc.set_attr(root, "aria-modal", "true");
        doc.set_attr(root, "aria-labelledby", &format!("{id}-title"));
        doc.set_attr(root, "aria-hidden", "true");
        doc.set_style(root, "display", "none");

        let backdrop = doc.create_element("div");
        doc.set_attr(backdrop, "class", "modal-backdrop");
        doc.set_attr(backdrop, "aria-hidden", "true");

        let container = doc.create_element("div");
        doc.set_attr(container, "class", "modal-container");
        let content = doc.create_element("div");
        doc.set_attr(content, "class", "modal-content");

        let close_btn = doc.create_element("button");
        doc.set_attr(close_btn, "class", "modal-close");
        doc.set_attr(close_btn, "aria-label", "Close dialog");

        let body = doc.create_element("div");
        doc.set_attr(body, "class", "modal-body");

        let doc_body = doc.body();
        // Structure is synthesized in one place; appends cannot cycle
        let _ = doc.append_child(root, backdrop);
        let _ = doc.append_child(root, container);
        let _ = doc.append_child(container, content);
        let _ = doc.append_child(content, close_btn);
        let _ = doc.append_child(content, body);
        let _ = doc.append_child(doc_body, root);

        let mut listeners = ListenerSet::new();
        listeners.subscribe(close_btn, EventKind::Click);
        if options.close_on_backdrop {
            listeners.subscribe(backdrop, EventKind::Click);
        }
        if options.close_on_escape {
            listeners.subscribe(doc_body, EventKind::KeyDown);
        }
        listeners.subscribe(root, EventKind::KeyDown);

        let trap = FocusTrap::new(scan_focusables(doc, root));

        Self {
            options,
            state: ModalState::Closed,
            root,
            backdrop,
            close_btn,
            body,
            trap,
            previously_focused: None,
            listeners,
            timers: TimerQueue::new(),
            pending: None,
            destroyed: false,
        }
    }

    /// Dialog root node
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Current lifecycle state
    pub fn state(&self) -> ModalState {
        self.state
    }

    /// Check the dialog is open or opening
    pub fn is_open(&self) -> bool {
        matches!(self.state, ModalState::Opening | ModalState::Open)
    }

    /// Replace the dialog body content and re-scan it for focusable
    /// descendants. Returns the widget for chaining.
    pub fn set_content(
        &mut self,
        doc: &mut Document,
        content: impl Into<ModalContent>,
    ) -> &mut Self {
        if self.destroyed {
            return self;
        }
        for child in doc.tree().children(self.body) {
            doc.tree_mut().remove_subtree(child);
        }
        match content.into() {
            ModalContent::Text(text) => {
                let node = doc.create_text(&text);
                let _ = doc.append_child(self.body, node);
            }
            ModalContent::Node(node) => {
                let _ = doc.append_child(self.body, node);
            }
        }
        self.trap.set_focusables(scan_focusables(doc, self.root));
        self
    }

    /// Open the dialog. No-op if already open or opening.
    pub fn open(&mut self, doc: &mut Document) {
        if self.destroyed || self.is_open() {
            return;
        }
        let interrupted_close = self.state == ModalState::Closing;
        if let Some(pending) = self.pending.take() {
            self.timers.cancel(pending);
        }

        self.previously_focused = doc.active_element();
        self.state = ModalState::Opening;
        debug!(root = ?self.root, "modal opening");

        doc.push_dialog(self.root);
        // The lock from the interrupted close was never released
        if !interrupted_close {
            doc.lock_scroll();
        }
        doc.set_style(self.root, "display", "flex");
        doc.set_attr(self.root, "aria-hidden", "false");

        self.pending = Some(self.timers.schedule(OPEN_DELAY));
    }

    /// Close the dialog. No-op if already closed or closing.
    ///
    /// The hidden state, focus restoration, and `on_close` land after the
    /// transition delay; pump [`Modal::tick`] to observe them.
    pub fn close(&mut self, doc: &mut Document) {
        if self.destroyed || !self.is_open() {
            return;
        }
        if let Some(pending) = self.pending.take() {
            self.timers.cancel(pending);
        }

        self.state = ModalState::Closing;
        debug!(root = ?self.root, "modal closing");

        doc.remove_dialog(self.root);
        doc.remove_class(self.root, "modal-open");

        self.pending = Some(self.timers.schedule(CLOSE_DELAY));
    }

    /// Advance the widget clock, completing any due transition
    pub fn tick(&mut self, doc: &mut Document, dt: Duration) {
        for fired in self.timers.advance(dt) {
            if Some(fired) != self.pending {
                continue;
            }
            self.pending = None;
            match self.state {
                ModalState::Opening => self.complete_open(doc),
                ModalState::Closing => self.complete_close(doc),
                ModalState::Closed | ModalState::Open => {}
            }
        }
    }

    fn complete_open(&mut self, doc: &mut Document) {
        self.state = ModalState::Open;
        doc.add_class(self.root, "modal-open");
        match self.trap.first() {
            Some(first) => doc.focus(first),
            None => doc.focus(self.root),
        }
        (self.options.on_open)();
    }

    fn complete_close(&mut self, doc: &mut Document) {
        self.state = ModalState::Closed;
        doc.set_style(self.root, "display", "none");
        doc.set_attr(self.root, "aria-hidden", "true");
        doc.unlock_scroll();
        if let Some(prev) = self.previously_focused.take() {
            // Restore only if the element still exists
            doc.focus(prev);
        }
        (self.options.on_close)();
    }

    /// Deliver an input event
    pub fn handle_event(&mut self, doc: &mut Document, event: &mut Event) {
        if self.destroyed {
            return;
        }
        match &mut event.data {
            EventData::Click => {
                let target = event.target;
                if target == self.close_btn && self.listeners.contains(target, EventKind::Click) {
                    self.close(doc);
                } else if target == self.backdrop
                    && self.listeners.contains(target, EventKind::Click)
                {
                    self.close(doc);
                }
            }
            EventData::Key(key) => self.handle_key(doc, key),
            _ => {}
        }
    }

    fn handle_key(&mut self, doc: &mut Document, key: &mut KeyEvent) {
        match key.key {
            Key::Escape => {
                // Global listener, gated to the top of the dialog stack
                if self.options.close_on_escape
                    && self.is_open()
                    && doc.top_dialog() == Some(self.root)
                {
                    self.close(doc);
                }
            }
            Key::Tab => {
                if !self.is_open() {
                    return;
                }
                let active = doc.active_element();
                let inside = active
                    .is_some_and(|a| doc.tree().is_ancestor_or_self(self.root, a));
                if !inside {
                    return;
                }
                if let Some(target) = self.trap.target(active, key) {
                    doc.focus(target);
                }
            }
            _ => {}
        }
    }

    /// Remove the dialog node and all listeners.
    ///
    /// A close still in flight never completes, so its scroll-lock release
    /// is forfeited; the host should close and pump before destroying.
    pub fn destroy(&mut self, doc: &mut Document) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        if let Some(pending) = self.pending.take() {
            self.timers.cancel(pending);
        }
        self.listeners.clear();
        doc.remove_dialog(self.root);
        doc.tree_mut().remove_subtree(self.root);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pump(modal: &mut Modal, doc: &mut Document) {
        modal.tick(doc, Duration::from_millis(500));
    }

    #[test]
    fn test_synthesized_structure() {
        let mut doc = Document::new();
        let modal = Modal::new(&mut doc, ModalOptions::default());

        let root = modal.root();
        assert_eq!(doc.attr(root, "role"), Some("dialog"));
        assert_eq!(doc.attr(root, "aria-modal"), Some("true"));
        assert_eq!(doc.attr(root, "aria-hidden"), Some("true"));
        assert_eq!(doc.style(root, "display"), Some("none"));

        assert!(doc.first_by_class(root, "modal-backdrop").is_some());
        assert!(doc.first_by_class(root, "modal-close").is_some());
        assert!(doc.first_by_class(root, "modal-body").is_some());
    }

    #[test]
    fn test_generated_id_labels_title() {
        let mut doc = Document::new();
        let modal = Modal::new(&mut doc, ModalOptions::default());
        let id = doc.attr(modal.root(), "id").unwrap().to_string();
        assert_eq!(
            doc.attr(modal.root(), "aria-labelledby"),
            Some(format!("{id}-title").as_str())
        );
    }

    #[test]
    fn test_open_close_lifecycle() {
        let mut doc = Document::new();
        let mut modal = Modal::new(&mut doc, ModalOptions::default());
        let root = modal.root();

        modal.open(&mut doc);
        assert_eq!(modal.state(), ModalState::Opening);
        assert_eq!(doc.style(root, "display"), Some("flex"));
        assert_eq!(doc.attr(root, "aria-hidden"), Some("false"));
        assert!(doc.scroll_locked());

        pump(&mut modal, &mut doc);
        assert_eq!(modal.state(), ModalState::Open);
        assert!(doc.has_class(root, "modal-open"));

        modal.close(&mut doc);
        assert_eq!(modal.state(), ModalState::Closing);
        assert!(!doc.has_class(root, "modal-open"));
        // Hidden state lands only after the transition delay
        assert_eq!(doc.style(root, "display"), Some("flex"));

        pump(&mut modal, &mut doc);
        assert_eq!(modal.state(), ModalState::Closed);
        assert_eq!(doc.style(root, "display"), Some("none"));
        assert_eq!(doc.attr(root, "aria-hidden"), Some("true"));
        assert!(!doc.scroll_locked());
    }

    #[test]
    fn test_open_is_idempotent_while_open() {
        let mut doc = Document::new();
        let mut modal = Modal::new(&mut doc, ModalOptions::default());

        modal.open(&mut doc);
        pump(&mut modal, &mut doc);
        modal.open(&mut doc);
        assert_eq!(modal.state(), ModalState::Open);
        assert!(doc.scroll_locked());

        modal.close(&mut doc);
        pump(&mut modal, &mut doc);
        assert!(!doc.scroll_locked());
    }

    #[test]
    fn test_close_during_opening_suppresses_on_open() {
        use std::cell::Cell;
        use std::rc::Rc;

        let opened = Rc::new(Cell::new(0u32));
        let closed = Rc::new(Cell::new(0u32));
        let (o, c) = (opened.clone(), closed.clone());

        let mut doc = Document::new();
        let mut modal = Modal::new(
            &mut doc,
            ModalOptions {
                on_open: Box::new(move || o.set(o.get() + 1)),
                on_close: Box::new(move || c.set(c.get() + 1)),
                ..Default::default()
            },
        );

        modal.open(&mut doc);
        modal.close(&mut doc);
        pump(&mut modal, &mut doc);

        assert_eq!(opened.get(), 0);
        assert_eq!(closed.get(), 1);
        assert_eq!(modal.state(), ModalState::Closed);
        assert!(!doc.scroll_locked());
    }

    #[test]
    fn test_reopen_during_closing_keeps_lock_balanced() {
        let mut doc = Document::new();
        let mut modal = Modal::new(&mut doc, ModalOptions::default());

        modal.open(&mut doc);
        pump(&mut modal, &mut doc);
        modal.close(&mut doc);
        modal.open(&mut doc);
        pump(&mut modal, &mut doc);
        assert_eq!(modal.state(), ModalState::Open);
        assert!(doc.scroll_locked());

        modal.close(&mut doc);
        pump(&mut modal, &mut doc);
        assert!(!doc.scroll_locked());
    }

    #[test]
    fn test_focus_restored_after_close() {
        let mut doc = Document::new();
        let body = doc.body();
        let trigger = doc.create_element("button");
        doc.append_child(body, trigger).unwrap();
        doc.focus(trigger);

        let mut modal = Modal::new(&mut doc, ModalOptions::default());
        modal.open(&mut doc);
        pump(&mut modal, &mut doc);
        assert_ne!(doc.active_element(), Some(trigger));

        modal.close(&mut doc);
        pump(&mut modal, &mut doc);
        assert_eq!(doc.active_element(), Some(trigger));
    }

    #[test]
    fn test_focus_trap_wraps() {
        let mut doc = Document::new();
        let mut modal = Modal::new(&mut doc, ModalOptions::default());

        let content = doc.create_element("div");
        let a = doc.create_element("button");
        let b = doc.create_element("button");
        doc.append_child(content, a).unwrap();
        doc.append_child(content, b).unwrap();
        modal.set_content(&mut doc, content);

        modal.open(&mut doc);
        pump(&mut modal, &mut doc);
        // Close button is the first focusable in document order
        let close_btn = doc.first_by_class(modal.root(), "modal-close").unwrap();
        assert_eq!(doc.active_element(), Some(close_btn));

        doc.focus(b);
        let mut event = Event::key_down(b, KeyEvent::new(Key::Tab));
        modal.handle_event(&mut doc, &mut event);
        assert_eq!(doc.active_element(), Some(close_btn));

        let mut event = Event::key_down(close_btn, KeyEvent::new(Key::Tab).shifted());
        modal.handle_event(&mut doc, &mut event);
        assert_eq!(doc.active_element(), Some(b));
    }

    #[test]
    fn test_escape_closes_topmost_only() {
        let mut doc = Document::new();
        let mut lower = Modal::new(&mut doc, ModalOptions::default());
        let mut upper = Modal::new(&mut doc, ModalOptions::default());

        lower.open(&mut doc);
        upper.open(&mut doc);

        let body = doc.body();
        let mut event = Event::key_down(body, KeyEvent::new(Key::Escape));
        lower.handle_event(&mut doc, &mut event);
        let mut event = Event::key_down(body, KeyEvent::new(Key::Escape));
        upper.handle_event(&mut doc, &mut event);

        assert!(lower.is_open());
        assert_eq!(upper.state(), ModalState::Closing);
    }

    #[test]
    fn test_backdrop_click_respects_option() {
        let mut doc = Document::new();
        let mut modal = Modal::new(
            &mut doc,
            ModalOptions {
                close_on_backdrop: false,
                ..Default::default()
            },
        );
        modal.open(&mut doc);
        pump(&mut modal, &mut doc);

        let backdrop = doc.first_by_class(modal.root(), "modal-backdrop").unwrap();
        let mut event = Event::click(backdrop);
        modal.handle_event(&mut doc, &mut event);
        assert!(modal.is_open());
    }

    #[test]
    fn test_set_content_chains_and_replaces() {
        let mut doc = Document::new();
        let mut modal = Modal::new(&mut doc, ModalOptions::default());

        modal
            .set_content(&mut doc, "first")
            .set_content(&mut doc, "second");

        let body = doc.first_by_class(modal.root(), "modal-body").unwrap();
        assert_eq!(doc.tree().text_content(body), "second");
    }

    #[test]
    fn test_destroy_removes_root_and_is_idempotent() {
        let mut doc = Document::new();
        let mut modal = Modal::new(&mut doc, ModalOptions::default());
        let root = modal.root();

        modal.destroy(&mut doc);
        assert!(!doc.tree().contains(root));
        modal.destroy(&mut doc);
        modal.open(&mut doc);
        assert_eq!(modal.state(), ModalState::Closed);
    }
}
