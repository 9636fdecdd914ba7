//! Raw input collection from winit events

use std::collections::BTreeSet;

use winit::event::{MouseButton, MouseScrollDelta, WindowEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

use crate::Symbol;
use crate::events::{
    AXIS_CURSOR_X, AXIS_CURSOR_Y, AXIS_SCROLL_X, AXIS_SCROLL_Y, MOUSE_BUTTON_BASE, RawEvent,
};
use crate::mapper::Mapper;

/// Translates winit window events into buffered [`RawEvent`]s
///
/// The collector tracks which buttons are currently down so every button
/// event carries a correct `was_pressed` flag, turning OS key-repeat into
/// held presses instead of fresh edges. Buffered events are drained into a
/// [`Mapper`] once per tick.
pub struct InputCollector {
    held: BTreeSet<u32>,
    queue: Vec<RawEvent>,
}

impl InputCollector {
    /// Creates a new input collector
    pub fn new() -> Self {
        Self {
            held: BTreeSet::new(),
            queue: Vec::new(),
        }
    }

    /// Handles a winit window event
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(key) = event.physical_key
                    && let Some(code) = key_code(key)
                {
                    self.track_button(code, event.state.is_pressed());
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                self.track_button(mouse_button_code(*button), state.is_pressed());
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.track_axis(AXIS_CURSOR_X, position.x as f32);
                self.track_axis(AXIS_CURSOR_Y, position.y as f32);
            }

            WindowEvent::MouseWheel { delta, .. } => {
                // Convert MouseScrollDelta to consistent pixel units
                let pixel_delta = match delta {
                    MouseScrollDelta::LineDelta(x, y) => [*x * 20.0, *y * 20.0],
                    MouseScrollDelta::PixelDelta(pos) => [pos.x as f32, pos.y as f32],
                };

                if pixel_delta[0] != 0.0 {
                    self.track_axis(AXIS_SCROLL_X, pixel_delta[0]);
                }
                if pixel_delta[1] != 0.0 {
                    self.track_axis(AXIS_SCROLL_Y, pixel_delta[1]);
                }
            }

            WindowEvent::Focused(false) => self.release_all(),

            _ => {}
        }
    }

    /// Records a raw button transition from any source
    ///
    /// `was_pressed` is derived from the held set, so callers only report the
    /// transition they observed.
    pub fn track_button(&mut self, code: u32, pressed: bool) {
        let was_pressed = self.held.contains(&code);
        if pressed {
            self.held.insert(code);
        } else {
            self.held.remove(&code);
        }

        self.queue.push(RawEvent::Button {
            code,
            pressed,
            was_pressed,
        });
    }

    /// Records a raw axis sample from any source
    pub fn track_axis(&mut self, code: u32, value: f32) {
        self.queue.push(RawEvent::Axis { code, value });
    }

    /// Synthesizes a release for every held button
    ///
    /// Called on focus loss so held states retire instead of sticking until
    /// the window regains focus.
    pub fn release_all(&mut self) {
        let held = std::mem::take(&mut self.held);
        for code in held {
            self.queue.push(RawEvent::Button {
                code,
                pressed: false,
                was_pressed: true,
            });
        }
    }

    /// Drains the buffered events into `mapper` in arrival order
    pub fn flush_into<A, S, R>(&mut self, mapper: &mut Mapper<A, S, R>)
    where
        A: Symbol,
        S: Symbol,
        R: Symbol,
    {
        for event in self.queue.drain(..) {
            mapper.handle(event);
        }
    }

    /// Drains and returns the buffered events in arrival order
    pub fn drain(&mut self) -> Vec<RawEvent> {
        std::mem::take(&mut self.queue)
    }

    /// Returns the number of buffered events
    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Returns true if the button with `code` is currently down
    pub fn is_held(&self, code: u32) -> bool {
        self.held.contains(&code)
    }
}

impl Default for InputCollector {
    fn default() -> Self {
        Self::new()
    }
}

/// Returns the raw mouse button code for `button`
///
/// Mouse buttons live above [`MOUSE_BUTTON_BASE`] so they never collide with
/// keyboard codes.
pub fn mouse_button_code(button: MouseButton) -> u32 {
    let index = match button {
        MouseButton::Left => 0,
        MouseButton::Right => 1,
        MouseButton::Middle => 2,
        MouseButton::Back => 3,
        MouseButton::Forward => 4,
        MouseButton::Other(id) => 5 + id as u32,
    };

    MOUSE_BUTTON_BASE + index
}

/// Returns the stable raw code for a winit key, if the key is in the table
pub fn key_code(key: KeyCode) -> Option<u32> {
    use KeyCode as K;
    let code = match key {
        K::Space => 1,
        K::Enter => 2,
        K::Escape => 3,
        K::Backspace => 4,
        K::Tab => 5,

        K::KeyA => 10,
        K::KeyB => 11,
        K::KeyC => 12,
        K::KeyD => 13,
        K::KeyE => 14,
        K::KeyF => 15,
        K::KeyG => 16,
        K::KeyH => 17,
        K::KeyI => 18,
        K::KeyJ => 19,
        K::KeyK => 20,
        K::KeyL => 21,
        K::KeyM => 22,
        K::KeyN => 23,
        K::KeyO => 24,
        K::KeyP => 25,
        K::KeyQ => 26,
        K::KeyR => 27,
        K::KeyS => 28,
        K::KeyT => 29,
        K::KeyU => 30,
        K::KeyV => 31,
        K::KeyW => 32,
        K::KeyX => 33,
        K::KeyY => 34,
        K::KeyZ => 35,

        K::Digit0 => 40,
        K::Digit1 => 41,
        K::Digit2 => 42,
        K::Digit3 => 43,
        K::Digit4 => 44,
        K::Digit5 => 45,
        K::Digit6 => 46,
        K::Digit7 => 47,
        K::Digit8 => 48,
        K::Digit9 => 49,

        K::F1 => 50,
        K::F2 => 51,
        K::F3 => 52,
        K::F4 => 53,
        K::F5 => 54,
        K::F6 => 55,
        K::F7 => 56,
        K::F8 => 57,
        K::F9 => 58,
        K::F10 => 59,
        K::F11 => 60,
        K::F12 => 61,

        K::ArrowLeft => 70,
        K::ArrowRight => 71,
        K::ArrowUp => 72,
        K::ArrowDown => 73,

        K::ShiftLeft => 80,
        K::ShiftRight => 81,
        K::ControlLeft => 82,
        K::ControlRight => 83,
        K::AltLeft => 84,
        K::AltRight => 85,
        K::SuperLeft => 86,
        K::SuperRight => 87,

        _ => return None,
    };

    Some(code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_press_is_an_edge() {
        let mut collector = InputCollector::new();
        collector.track_button(32, true);

        assert_eq!(
            collector.drain(),
            vec![RawEvent::Button {
                code: 32,
                pressed: true,
                was_pressed: false,
            }]
        );
    }

    #[test]
    fn test_repeat_press_is_not_an_edge() {
        let mut collector = InputCollector::new();
        collector.track_button(32, true);
        collector.track_button(32, true);

        let events = collector.drain();
        assert_eq!(
            events[1],
            RawEvent::Button {
                code: 32,
                pressed: true,
                was_pressed: true,
            }
        );
    }

    #[test]
    fn test_release_clears_held_tracking() {
        let mut collector = InputCollector::new();
        collector.track_button(32, true);
        assert!(collector.is_held(32));

        collector.track_button(32, false);
        assert!(!collector.is_held(32));

        let events = collector.drain();
        assert_eq!(
            events[1],
            RawEvent::Button {
                code: 32,
                pressed: false,
                was_pressed: true,
            }
        );

        // The next press is a fresh edge again
        collector.track_button(32, true);
        assert_eq!(
            collector.drain(),
            vec![RawEvent::Button {
                code: 32,
                pressed: true,
                was_pressed: false,
            }]
        );
    }

    #[test]
    fn test_release_all_synthesizes_releases() {
        let mut collector = InputCollector::new();
        collector.track_button(10, true);
        collector.track_button(32, true);
        collector.drain();

        collector.release_all();
        assert!(!collector.is_held(10));
        assert!(!collector.is_held(32));

        let events = collector.drain();
        assert_eq!(
            events,
            vec![
                RawEvent::Button {
                    code: 10,
                    pressed: false,
                    was_pressed: true,
                },
                RawEvent::Button {
                    code: 32,
                    pressed: false,
                    was_pressed: true,
                },
            ]
        );
    }

    #[test]
    fn test_mouse_buttons_offset_above_key_codes() {
        assert_eq!(mouse_button_code(MouseButton::Left), MOUSE_BUTTON_BASE);
        assert_eq!(mouse_button_code(MouseButton::Right), MOUSE_BUTTON_BASE + 1);
        assert_eq!(
            mouse_button_code(MouseButton::Other(7)),
            MOUSE_BUTTON_BASE + 12
        );
    }

    #[test]
    fn test_key_codes_are_distinct() {
        let keys = [
            KeyCode::Space,
            KeyCode::Enter,
            KeyCode::KeyA,
            KeyCode::KeyW,
            KeyCode::KeyZ,
            KeyCode::Digit0,
            KeyCode::Digit9,
            KeyCode::F1,
            KeyCode::F12,
            KeyCode::ArrowDown,
            KeyCode::ShiftLeft,
            KeyCode::SuperRight,
        ];

        let codes: BTreeSet<u32> = keys.iter().filter_map(|key| key_code(*key)).collect();
        assert_eq!(codes.len(), keys.len());
    }

    #[test]
    fn test_unmapped_key_produces_no_code() {
        assert_eq!(key_code(KeyCode::NumLock), None);
    }
}
