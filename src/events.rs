//! Raw device events at the host boundary

/// Axis code for horizontal cursor position
pub const AXIS_CURSOR_X: u32 = 0;
/// Axis code for vertical cursor position
pub const AXIS_CURSOR_Y: u32 = 1;
/// Axis code for horizontal scroll, in pixel units
pub const AXIS_SCROLL_X: u32 = 2;
/// Axis code for vertical scroll, in pixel units
pub const AXIS_SCROLL_Y: u32 = 3;

/// Mouse button codes start at this offset so they never collide with key codes
pub const MOUSE_BUTTON_BASE: u32 = 0x1_0000;

/// A raw input event as delivered by the host's event loop
///
/// Codes are opaque integers; the translation from platform key and button
/// enumerations happens outside the core, e.g. in
/// [`InputCollector`](crate::InputCollector). Button and axis codes are
/// separate namespaces, so the same integer may be used for both.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RawEvent {
    /// A key or mouse button transition
    Button {
        code: u32,
        pressed: bool,
        /// Whether the button was already down before this event
        was_pressed: bool,
    },
    /// An axis sample, e.g. a cursor coordinate or scroll delta
    Axis { code: u32, value: f32 },
}
