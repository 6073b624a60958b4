//! Input Events
//!
//! Click, keyboard, touch, and pointer-crossing events delivered by the
//! host, plus the explicit listener registrations widgets use so that
//! `destroy()` can deterministically unsubscribe every one.

use crate::NodeId;

/// Event category, used for listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Click,
    KeyDown,
    TouchStart,
    TouchEnd,
    PointerEnter,
    PointerLeave,
}

/// Named keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Tab,
    Enter,
    Escape,
    Space,
    ArrowLeft,
    ArrowRight,
    ArrowUp,
    ArrowDown,
    Home,
    End,
    Char(char),
}

/// Keyboard event
#[derive(Debug, Clone)]
pub struct KeyEvent {
    pub key: Key,
    pub shift: bool,
    default_prevented: bool,
}

impl KeyEvent {
    pub fn new(key: Key) -> Self {
        Self {
            key,
            shift: false,
            default_prevented: false,
        }
    }

    /// Same key with the shift modifier held
    pub fn shifted(mut self) -> Self {
        self.shift = true;
        self
    }

    /// Suppress the host's default handling
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Check if default was prevented
    pub fn is_default_prevented(&self) -> bool {
        self.default_prevented
    }
}

/// Event payload
#[derive(Debug, Clone)]
pub enum EventData {
    Click,
    Key(KeyEvent),
    /// Horizontal touch coordinate, device-independent pixels
    TouchStart { x: f32 },
    TouchEnd { x: f32 },
    PointerEnter,
    PointerLeave,
}

/// An input event aimed at a node
#[derive(Debug, Clone)]
pub struct Event {
    pub target: NodeId,
    pub data: EventData,
}

impl Event {
    pub fn click(target: NodeId) -> Self {
        Self {
            target,
            data: EventData::Click,
        }
    }

    pub fn key_down(target: NodeId, key: KeyEvent) -> Self {
        Self {
            target,
            data: EventData::Key(key),
        }
    }

    pub fn touch_start(target: NodeId, x: f32) -> Self {
        Self {
            target,
            data: EventData::TouchStart { x },
        }
    }

    pub fn touch_end(target: NodeId, x: f32) -> Self {
        Self {
            target,
            data: EventData::TouchEnd { x },
        }
    }

    pub fn pointer_enter(target: NodeId) -> Self {
        Self {
            target,
            data: EventData::PointerEnter,
        }
    }

    pub fn pointer_leave(target: NodeId) -> Self {
        Self {
            target,
            data: EventData::PointerLeave,
        }
    }

    /// Category of this event
    pub fn kind(&self) -> EventKind {
        match self.data {
            EventData::Click => EventKind::Click,
            EventData::Key(_) => EventKind::KeyDown,
            EventData::TouchStart { .. } => EventKind::TouchStart,
            EventData::TouchEnd { .. } => EventKind::TouchEnd,
            EventData::PointerEnter => EventKind::PointerEnter,
            EventData::PointerLeave => EventKind::PointerLeave,
        }
    }
}

/// Listener registration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Listener {
    pub target: NodeId,
    pub kind: EventKind,
}

/// Per-widget subscription list
///
/// Widgets record every registration here at construction and consult it
/// on delivery; clearing the set is a complete unsubscribe.
#[derive(Debug, Default)]
pub struct ListenerSet {
    entries: Vec<Listener>,
}

impl ListenerSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register interest in `kind` events on `target`
    pub fn subscribe(&mut self, target: NodeId, kind: EventKind) {
        let listener = Listener { target, kind };
        if !self.entries.contains(&listener) {
            self.entries.push(listener);
        }
    }

    /// Check a registration exists
    pub fn contains(&self, target: NodeId, kind: EventKind) -> bool {
        self.entries.contains(&Listener { target, kind })
    }

    /// Drop every registration for one target
    pub fn unsubscribe_target(&mut self, target: NodeId) {
        self.entries.retain(|l| l.target != target);
    }

    /// Drop every registration
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
