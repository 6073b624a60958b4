//! aw-a11y - Accessibility support
//!
//! ARIA role/state vocabulary and the focus utilities (focusable scan,
//! tab-order wrap) the widgets build on. The strings emitted here are a
//! compatibility surface: stylesheets and assistive technology match on
//! the exact attribute values.

mod aria;
mod focus;

pub use aria::{Live, Role};
pub use focus::{is_focusable, scan_focusables, FocusTrap, TabIndex};
