//! Tabs
//!
//! WAI-ARIA tabs pattern with a roving tabindex: only the active tab sits
//! in the tab order, arrow keys move between tabs, and activation is
//! either automatic (follows focus) or manual (click/Enter). The widget
//! annotates pre-existing markup in place; nothing is synthesized.

use aw_dom::{Document, Event, EventData, EventKind, Key, KeyEvent, ListenerSet, NodeId};
use tracing::error;

use crate::error::WidgetError;

/// Tablist orientation; arrow keys on the other axis are ignored
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// The `aria-orientation` attribute value
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Horizontal => "horizontal",
            Self::Vertical => "vertical",
        }
    }
}

/// When arrow movement activates the focused tab
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Activation {
    /// Moving focus also activates the target tab
    #[default]
    Automatic,
    /// Focus moves freely; activation needs a click or Enter
    Manual,
}

/// Tabs configuration
pub struct TabsOptions {
    /// Tab selected at construction
    pub default_tab: usize,
    pub orientation: Orientation,
    pub activation: Activation,
    /// Invoked with the new index on every activation
    pub on_change: Box<dyn FnMut(usize)>,
}

impl Default for TabsOptions {
    fn default() -> Self {
        Self {
            default_tab: 0,
            orientation: Orientation::Horizontal,
            activation: Activation::Automatic,
            on_change: Box::new(|_| {}),
        }
    }
}

/// Tablist/tabpanel coordinator
pub struct Tabs {
    options: TabsOptions,
    /// Tab elements in document order; empty when inert
    tabs: Vec<NodeId>,
    /// Panels paired positionally with `tabs`
    panels: Vec<NodeId>,
    current: usize,
    listeners: ListenerSet,
    destroyed: bool,
}

impl Tabs {
    /// Scan `container` for a tablist and annotate the ARIA relationships.
    ///
    /// Fails if the container is gone; a missing tablist only logs and
    /// leaves the widget inert.
    pub fn new(
        doc: &mut Document,
        container: NodeId,
        options: TabsOptions,
    ) -> Result<Self, WidgetError> {
        if !doc.tree().contains(container) {
            return Err(WidgetError::MissingContainer { widget: "Tabs" });
        }
        if doc.element(container).is_none() {
            return Err(WidgetError::NotAnElement {
                widget: "Tabs",
                node: container,
            });
        }

        let mut widget = Self {
            current: options.default_tab,
            options,
            tabs: Vec::new(),
            panels: Vec::new(),
            listeners: ListenerSet::new(),
            destroyed: false,
        };

        let Some(tablist) = doc.first_by_role(container, "tablist") else {
            error!("Tabs requires an element with role=\"tablist\"");
            return Ok(widget);
        };

        doc.set_attr(tablist, "aria-orientation", widget.options.orientation.as_str());

        widget.tabs = doc.elements_by_role(tablist, "tab");
        widget.panels = doc.elements_by_role(container, "tabpanel");
        widget.current = widget.current.min(widget.tabs.len().saturating_sub(1));

        for (index, (&tab, &panel)) in widget.tabs.iter().zip(&widget.panels).enumerate() {
            let panel_id = match doc.element(panel).and_then(|e| e.id()) {
                Some(id) => id.to_string(),
                None => {
                    let generated = format!("panel-{index}");
                    doc.set_attr(panel, "id", &generated);
                    generated
                }
            };
            doc.set_attr(tab, "aria-controls", &panel_id);

            let tab_id = doc
                .element(tab)
                .and_then(|e| e.id())
                .map(str::to_string)
                .unwrap_or_else(|| format!("tab-{index}"));
            doc.set_attr(panel, "aria-labelledby", &tab_id);
            doc.set_attr(panel, "tabindex", "0");

            widget.listeners.subscribe(tab, EventKind::Click);
            widget.listeners.subscribe(tab, EventKind::KeyDown);
        }

        let initial = widget.current;
        widget.activate_tab(doc, initial);
        Ok(widget)
    }

    /// Currently active tab index
    pub fn active_tab(&self) -> usize {
        self.current
    }

    /// Number of tabs found at construction
    pub fn len(&self) -> usize {
        self.tabs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tabs.is_empty()
    }

    /// Activate a tab: exactly one tab selected, its panel un-hidden.
    ///
    /// Every navigation path funnels through here. Out-of-range indices
    /// are ignored.
    pub fn activate_tab(&mut self, doc: &mut Document, index: usize) {
        if self.destroyed || index >= self.tabs.len() {
            return;
        }

        // Clear all before setting one
        for &tab in &self.tabs {
            doc.set_attr(tab, "aria-selected", "false");
            doc.set_attr(tab, "tabindex", "-1");
            doc.remove_class(tab, "active");
        }
        for &panel in &self.panels {
            doc.set_attr(panel, "hidden", "");
        }

        let tab = self.tabs[index];
        doc.set_attr(tab, "aria-selected", "true");
        doc.set_attr(tab, "tabindex", "0");
        doc.add_class(tab, "active");
        if let Some(&panel) = self.panels.get(index) {
            doc.remove_attr(panel, "hidden");
        }

        self.current = index;
        (self.options.on_change)(index);
    }

    /// Deliver an input event
    pub fn handle_event(&mut self, doc: &mut Document, event: &mut Event) {
        if self.destroyed || !self.listeners.contains(event.target, event.kind()) {
            return;
        }
        let Some(index) = self.tabs.iter().position(|&t| t == event.target) else {
            return;
        };
        match &mut event.data {
            EventData::Click => self.activate_tab(doc, index),
            EventData::Key(key) => self.handle_key(doc, index, key),
            _ => {}
        }
    }

    fn handle_key(&mut self, doc: &mut Document, index: usize, key: &mut KeyEvent) {
        let horizontal = self.options.orientation == Orientation::Horizontal;
        let last = self.tabs.len() - 1;

        let new_index = match key.key {
            Key::ArrowLeft if horizontal => prev_wrapping(index, last),
            Key::ArrowRight if horizontal => next_wrapping(index, last),
            Key::ArrowUp if !horizontal => prev_wrapping(index, last),
            Key::ArrowDown if !horizontal => next_wrapping(index, last),
            Key::Home => 0,
            Key::End => last,
            Key::Enter | Key::Space => {
                key.prevent_default();
                self.activate_tab(doc, index);
                return;
            }
            _ => return,
        };
        key.prevent_default();

        doc.focus(self.tabs[new_index]);
        if self.options.activation == Activation::Automatic {
            self.activate_tab(doc, new_index);
        }
    }

    /// Detach every listener registration; DOM annotations stay in place
    pub fn destroy(&mut self) {
        self.destroyed = true;
        self.listeners.clear();
    }
}

fn prev_wrapping(index: usize, last: usize) -> usize {
    if index == 0 {
        last
    } else {
        index - 1
    }
}

fn next_wrapping(index: usize, last: usize) -> usize {
    if index == last {
        0
    } else {
        index + 1
    }
}
