// Synthetic key events for hosts that only understand keyboards

use crate::engine::input::button::LogicalButton;
use crate::engine::input::controls::ControlState;
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// One key transition to inject into a keyboard-only host
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyntheticKeyEvent {
    pub code: KeyCode,
    pub pressed: bool,
}

/// Turns button edges into key down/up events
///
/// A key goes down on the frame its button rises and up on the frame it
/// falls. Holding a button produces no further events.
#[derive(Debug, Clone)]
pub struct KeyEventBridge {
    keys: HashMap<LogicalButton, KeyCode>,
}

impl KeyEventBridge {
    pub fn new(keys: impl IntoIterator<Item = (LogicalButton, KeyCode)>) -> Self {
        Self {
            keys: keys.into_iter().collect(),
        }
    }

    pub fn key_for(&self, button: LogicalButton) -> Option<KeyCode> {
        self.keys.get(&button).copied()
    }

    /// Events for this frame's edges, in logical button order
    pub fn translate(&self, controls: &impl ControlState) -> Vec<SyntheticKeyEvent> {
        let mut events = Vec::new();
        for button in LogicalButton::ALL {
            let Some(code) = self.key_for(button) else {
                continue;
            };
            if controls.just_pressed(button) {
                events.push(SyntheticKeyEvent { code, pressed: true });
            } else if controls.just_released(button) {
                events.push(SyntheticKeyEvent {
                    code,
                    pressed: false,
                });
            }
        }
        events
    }
}

impl Default for KeyEventBridge {
    fn default() -> Self {
        Self::new([
            (LogicalButton::Up, KeyCode::ArrowUp),
            (LogicalButton::Down, KeyCode::ArrowDown),
            (LogicalButton::Left, KeyCode::ArrowLeft),
            (LogicalButton::Right, KeyCode::ArrowRight),
            (LogicalButton::A, KeyCode::Space),
            (LogicalButton::Start, KeyCode::Enter),
            (LogicalButton::Select, KeyCode::Escape),
        ])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::gamepad::frame::*;
    use crate::engine::input::gamepad::VirtualGamepads;
    use crate::engine::input::options::InputOptions;
    use crate::engine::input::unifier::InputUnifier;

    #[test]
    fn test_press_hold_release() {
        let pads = VirtualGamepads::new();
        pads.connect(0, RawGamepadFrame::new(0, "pad"));
        let mut unifier = InputUnifier::init(InputOptions::default(), Box::new(pads.clone()));
        let bridge = KeyEventBridge::default();
        unifier.tick();
        assert!(bridge.translate(&unifier).is_empty());

        pads.update(0, |f| f.buttons[BUTTON_START] = true);
        unifier.tick();
        assert_eq!(
            bridge.translate(&unifier),
            vec![SyntheticKeyEvent {
                code: KeyCode::Enter,
                pressed: true
            }]
        );

        unifier.tick();
        assert!(bridge.translate(&unifier).is_empty());

        pads.update(0, |f| f.buttons[BUTTON_START] = false);
        unifier.tick();
        assert_eq!(
            bridge.translate(&unifier),
            vec![SyntheticKeyEvent {
                code: KeyCode::Enter,
                pressed: false
            }]
        );
    }

    #[test]
    fn test_unmapped_buttons_are_silent() {
        let pads = VirtualGamepads::new();
        pads.connect(0, RawGamepadFrame::new(0, "pad").with_button(BUTTON_NORTH, true));
        let mut unifier = InputUnifier::init(InputOptions::default(), Box::new(pads));
        unifier.tick();

        assert!(KeyEventBridge::default().translate(&unifier).is_empty());
        assert_eq!(KeyEventBridge::default().key_for(LogicalButton::Y), None);
    }
}
