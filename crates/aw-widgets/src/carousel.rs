//! Carousel
//!
//! Sliding-viewport widget: one slide visible at a time, moved by buttons,
//! indicators, arrow keys, swipe, or the auto-advance timer. Changes are
//! announced through a visually-hidden live region.

use std::time::Duration;

use aw_a11y::{Live, Role};
use aw_dom::{Document, Event, EventData, EventKind, Key, KeyEvent, ListenerSet, NodeId};
use tracing::error;

use crate::error::WidgetError;
use crate::timer::{TimerId, TimerQueue};

/// Minimum horizontal travel for a swipe, device-independent pixels
const SWIPE_THRESHOLD: f32 = 50.0;

/// Carousel configuration
pub struct CarouselOptions {
    /// Start the auto-advance timer at construction
    pub auto_play: bool,
    /// Auto-advance period
    pub interval: Duration,
    /// Wrap at the ends instead of clamping
    pub looping: bool,
    /// Recognized for compatibility; offset math assumes one slide per view
    pub slides_to_show: usize,
    /// Invoked with the target index on every navigation, changed or not
    pub on_change: Box<dyn FnMut(usize)>,
}

impl Default for CarouselOptions {
    fn default() -> Self {
        Self {
            auto_play: false,
            interval: Duration::from_millis(5000),
            looping: true,
            slides_to_show: 1,
            on_change: Box::new(|_| {}),
        }
    }
}

/// Sliding-viewport carousel widget
pub struct Carousel {
    options: CarouselOptions,
    container: NodeId,
    /// Track element holding one child per slide; NONE when inert
    track: NodeId,
    slides: Vec<NodeId>,
    /// Synthesized controls; all removed on destroy
    prev_btn: NodeId,
    next_btn: NodeId,
    controls: NodeId,
    indicators_root: NodeId,
    indicators: Vec<NodeId>,
    live_region: NodeId,
    current: usize,
    touch_start_x: f32,
    listeners: ListenerSet,
    timers: TimerQueue,
    auto_play_timer: Option<TimerId>,
    destroyed: bool,
}

impl Carousel {
    /// Annotate `container` and synthesize controls, indicators, and the
    /// live region. Fails if the container is gone; a missing track only
    /// logs and leaves the widget inert.
    pub fn new(
        doc: &mut Document,
        container: NodeId,
        options: CarouselOptions,
    ) -> Result<Self, WidgetError> {
        if !doc.tree().contains(container) {
            return Err(WidgetError::MissingContainer { widget: "Carousel" });
        }
        if doc.element(container).is_none() {
            return Err(WidgetError::NotAnElement {
                widget: "Carousel",
                node: container,
            });
        }

        let mut widget = Self {
            options,
            container,
            track: NodeId::NONE,
            slides: Vec::new(),
            prev_btn: NodeId::NONE,
            next_btn: NodeId::NONE,
            controls: NodeId::NONE,
            indicators_root: NodeId::NONE,
            indicators: Vec::new(),
            live_region: NodeId::NONE,
            current: 0,
            touch_start_x: 0.0,
            listeners: ListenerSet::new(),
            timers: TimerQueue::new(),
            auto_play_timer: None,
            destroyed: false,
        };

        let Some(track) = doc.first_by_class(container, "carousel-track") else {
            error!("Carousel requires an element with class \"carousel-track\"");
            return Ok(widget);
        };
        widget.track = track;

        doc.set_attr(container, "role", Role::Region.as_str());
        doc.set_attr(container, "aria-roledescription", "carousel");
        doc.set_attr(container, "aria-label", "Image carousel");

        widget.slides = doc
            .tree()
            .children(track)
            .into_iter()
            .filter(|&c| doc.element(c).is_some())
            .collect();
        let count = widget.slides.len();
        for (index, &slide) in widget.slides.iter().enumerate() {
            doc.set_attr(slide, "role", Role::Group.as_str());
            doc.set_attr(slide, "aria-roledescription", "slide");
            doc.set_attr(slide, "aria-label", &format!("{} of {}", index + 1, count));
        }

        widget.synthesize_controls(doc);
        widget.attach_listeners(doc);
        widget.update_slides(doc);

        if widget.options.auto_play {
            widget.start_auto_play();
        }
        Ok(widget)
    }

    fn synthesize_controls(&mut self, doc: &mut Document) {
        // Live region for screen reader announcements
        let live_region = doc.create_element("div");
        doc.set_attr(live_region, "class", "sr-only");
        doc.set_attr(live_region, "aria-live", Live::Polite.as_str());
        doc.set_attr(live_region, "aria-atomic", "true");
        let _ = doc.append_child(self.container, live_region);
        self.live_region = live_region;

        let controls = doc.create_element("div");
        doc.set_attr(controls, "class", "carousel-controls");

        let prev_btn = doc.create_element("button");
        doc.set_attr(prev_btn, "class", "carousel-btn carousel-prev");
        doc.set_attr(prev_btn, "aria-label", "Previous slide");
        let next_btn = doc.create_element("button");
        doc.set_attr(next_btn, "class", "carousel-btn carousel-next");
        doc.set_attr(next_btn, "aria-label", "Next slide");

        let _ = doc.append_child(controls, prev_btn);
        let _ = doc.append_child(controls, next_btn);
        let _ = doc.append_child(self.container, controls);

        let indicators_root = doc.create_element("div");
        doc.set_attr(indicators_root, "class", "carousel-indicators");
        doc.set_attr(indicators_root, "role", Role::TabList.as_str());

        for index in 0..self.slides.len() {
            let indicator = doc.create_element("button");
            doc.set_attr(indicator, "class", "carousel-indicator");
            doc.set_attr(indicator, "role", Role::Tab.as_str());
            doc.set_attr(indicator, "aria-label", &format!("Go to slide {}", index + 1));
            doc.set_attr(
                indicator,
                "aria-selected",
                if index == 0 { "true" } else { "false" },
            );
            let _ = doc.append_child(indicators_root, indicator);
            self.indicators.push(indicator);
        }
        let _ = doc.append_child(self.container, indicators_root);

        self.controls = controls;
        self.prev_btn = prev_btn;
        self.next_btn = next_btn;
        self.indicators_root = indicators_root;
    }

    fn attach_listeners(&mut self, _doc: &Document) {
        self.listeners.subscribe(self.prev_btn, EventKind::Click);
        self.listeners.subscribe(self.next_btn, EventKind::Click);
        for &indicator in &self.indicators {
            self.listeners.subscribe(indicator, EventKind::Click);
        }
        self.listeners.subscribe(self.track, EventKind::TouchStart);
        self.listeners.subscribe(self.track, EventKind::TouchEnd);
        self.listeners.subscribe(self.container, EventKind::KeyDown);
        if self.options.auto_play {
            self.listeners.subscribe(self.container, EventKind::PointerEnter);
            self.listeners.subscribe(self.container, EventKind::PointerLeave);
        }
    }

    /// Current slide index
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Number of slides
    pub fn len(&self) -> usize {
        self.slides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slides.is_empty()
    }

    /// Advance to the next slide, wrapping or clamping at the end
    pub fn next(&mut self, doc: &mut Document) {
        if self.slides.is_empty() {
            return;
        }
        let last = self.slides.len() - 1;
        let target = if self.current >= last {
            if self.options.looping {
                0
            } else {
                last
            }
        } else {
            self.current + 1
        };
        self.go_to_slide(doc, target);
    }

    /// Step back to the previous slide, wrapping or clamping at the start
    pub fn prev(&mut self, doc: &mut Document) {
        if self.slides.is_empty() {
            return;
        }
        let target = if self.current == 0 {
            if self.options.looping {
                self.slides.len() - 1
            } else {
                0
            }
        } else {
            self.current - 1
        };
        self.go_to_slide(doc, target);
    }

    /// Jump to a slide. Out-of-range indices are ignored; in-range
    /// navigation fires `on_change` even when the index is unchanged.
    pub fn go_to_slide(&mut self, doc: &mut Document, index: usize) {
        if self.destroyed || index >= self.slides.len() {
            return;
        }
        self.current = index;
        self.update_slides(doc);
        (self.options.on_change)(index);
    }

    fn update_slides(&mut self, doc: &mut Document) {
        if self.slides.is_empty() {
            return;
        }
        let offset = -(self.current as i64) * 100;
        doc.set_style(self.track, "transform", &format!("translateX({offset}%)"));

        for (index, &indicator) in self.indicators.iter().enumerate() {
            if index == self.current {
                doc.set_attr(indicator, "aria-selected", "true");
                doc.add_class(indicator, "active");
            } else {
                doc.set_attr(indicator, "aria-selected", "false");
                doc.remove_class(indicator, "active");
            }
        }

        let announcement = format!("Slide {} of {}", self.current + 1, self.slides.len());
        doc.tree_mut().set_text_content(self.live_region, &announcement);

        if !self.options.looping {
            let last = self.slides.len() - 1;
            set_disabled(doc, self.prev_btn, self.current == 0);
            set_disabled(doc, self.next_btn, self.current == last);
        }
    }

    /// Start the auto-advance timer; any running timer is replaced
    pub fn start_auto_play(&mut self) {
        self.stop_auto_play();
        self.auto_play_timer = Some(self.timers.schedule_repeating(self.options.interval));
    }

    /// Stop the auto-advance timer; safe to call when already stopped
    pub fn stop_auto_play(&mut self) {
        if let Some(timer) = self.auto_play_timer.take() {
            self.timers.cancel(timer);
        }
    }

    /// Advance the widget clock; each elapsed interval advances one slide
    pub fn tick(&mut self, doc: &mut Document, dt: Duration) {
        for fired in self.timers.advance(dt) {
            if Some(fired) == self.auto_play_timer {
                self.next(doc);
            }
        }
    }

    /// Deliver an input event
    pub fn handle_event(&mut self, doc: &mut Document, event: &mut Event) {
        if self.destroyed {
            return;
        }
        match &mut event.data {
            EventData::Click => self.handle_click(doc, event.target),
            EventData::Key(key) => {
                let inside = self.listeners.contains(self.container, EventKind::KeyDown)
                    && doc.tree().is_ancestor_or_self(self.container, event.target);
                if inside {
                    self.handle_key(doc, key);
                }
            }
            EventData::TouchStart { x } => {
                if self.listeners.contains(event.target, EventKind::TouchStart) {
                    self.touch_start_x = *x;
                    self.stop_auto_play();
                }
            }
            EventData::TouchEnd { x } => {
                if self.listeners.contains(event.target, EventKind::TouchEnd) {
                    self.handle_swipe(doc, *x);
                }
            }
            EventData::PointerEnter => {
                if self.listeners.contains(event.target, EventKind::PointerEnter) {
                    self.stop_auto_play();
                }
            }
            EventData::PointerLeave => {
                // Resume only when auto-play was requested in configuration
                if self.listeners.contains(event.target, EventKind::PointerLeave)
                    && self.options.auto_play
                {
                    self.start_auto_play();
                }
            }
        }
    }

    fn handle_click(&mut self, doc: &mut Document, target: NodeId) {
        if !self.listeners.contains(target, EventKind::Click) {
            return;
        }
        // Disabled boundary buttons emit no activation
        let disabled = doc.element(target).is_some_and(|e| e.has_attr("disabled"));
        if disabled {
            return;
        }
        if target == self.prev_btn {
            self.prev(doc);
        } else if target == self.next_btn {
            self.next(doc);
        } else if let Some(index) = self.indicators.iter().position(|&i| i == target) {
            self.go_to_slide(doc, index);
        }
    }

    fn handle_key(&mut self, doc: &mut Document, key: &mut KeyEvent) {
        match key.key {
            Key::ArrowLeft => {
                key.prevent_default();
                self.prev(doc);
            }
            Key::ArrowRight => {
                key.prevent_default();
                self.next(doc);
            }
            Key::Home => {
                key.prevent_default();
                self.go_to_slide(doc, 0);
            }
            Key::End => {
                key.prevent_default();
                if !self.slides.is_empty() {
                    let last = self.slides.len() - 1;
                    self.go_to_slide(doc, last);
                }
            }
            _ => {}
        }
    }

    fn handle_swipe(&mut self, doc: &mut Document, touch_end_x: f32) {
        let diff = self.touch_start_x - touch_end_x;
        if diff.abs() > SWIPE_THRESHOLD {
            if diff > 0.0 {
                self.next(doc);
            } else {
                self.prev(doc);
            }
        }
    }

    /// Stop the timer and remove every synthesized element; the host keeps
    /// the original track and slides
    pub fn destroy(&mut self, doc: &mut Document) {
        if self.destroyed {
            return;
        }
        self.destroyed = true;
        self.stop_auto_play();
        self.listeners.clear();
        for node in [self.controls, self.indicators_root, self.live_region] {
            if node.is_valid() {
                doc.tree_mut().remove_subtree(node);
            }
        }
        self.indicators.clear();
    }
}

fn set_disabled(doc: &mut Document, button: NodeId, disabled: bool) {
    if disabled {
        doc.set_attr(button, "disabled", "");
    } else {
        doc.remove_attr(button, "disabled");
    }
}
