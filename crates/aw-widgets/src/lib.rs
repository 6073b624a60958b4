//! Accessible UI widgets over the arena DOM
//!
//! Three self-contained components: [`Modal`] dialogs with focus trapping,
//! [`Tabs`] with roving tabindex, and a [`Carousel`] with deterministic
//! auto-advance. Each widget owns only node ids and state; the host passes
//! `&mut Document` into every call, delivers input through
//! `handle_event`, and pumps timers through `tick`.

mod carousel;
mod error;
mod modal;
mod tabs;
mod timer;

pub use carousel::{Carousel, CarouselOptions};
pub use error::WidgetError;
pub use modal::{Modal, ModalContent, ModalOptions, ModalState};
pub use tabs::{Activation, Orientation, Tabs, TabsOptions};
pub use timer::{TimerId, TimerQueue};
