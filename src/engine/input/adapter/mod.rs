// Framework adapters
//
// Pure translation over the unified snapshot: aliases, analog getters,
// vibration passthrough, and an optional keyboard merged by the same rules
// the unifier uses (OR for buttons, override-above-deadzone for axes).

mod bridge;
mod profile;

pub use bridge::{KeyEventBridge, SyntheticKeyEvent};
pub use profile::{AdapterProfile, BUILTIN_PROFILES};

use super::button::{ButtonSnapshot, DirectionVector, LogicalButton};
use super::controls::ControlState;
use super::gamepad::frame::{AXIS_LEFT_X, AXIS_LEFT_Y, AXIS_RIGHT_X, AXIS_RIGHT_Y};
use super::gamepad::VibrationRequest;
use super::keyboard::KeyboardListener;
use super::options::InputOptions;
use super::unifier::InputUnifier;
use crate::core::math::exceeds_deadzone;
use glam::Vec2;
use log::debug;
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::KeyCode;

/// What an adapter saw on one frame
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct AdapterFrame {
    direction: DirectionVector,
    buttons: ButtonSnapshot,
}

/// Translates the unified state into one framework's vocabulary
#[derive(Debug)]
pub struct FrameworkAdapter {
    profile: AdapterProfile,
    keyboard: Option<KeyboardListener>,
    deadzone: f32,

    current: AdapterFrame,
    previous: AdapterFrame,
    axes: [f32; 4],
    has_gamepad: bool,
    has_touch: bool,

    /// Unifier frame this adapter last synced to
    synced_frame: Option<u64>,
}

impl FrameworkAdapter {
    pub fn new(profile: AdapterProfile, options: &InputOptions) -> Self {
        let keyboard = options
            .setup_keyboard
            .then(|| KeyboardListener::new(profile.keyboard().clone()));
        debug!(
            "Adapter '{}' created (keyboard: {})",
            profile.name(),
            keyboard.is_some()
        );

        Self {
            profile,
            keyboard,
            deadzone: options.clone().sanitized().deadzone,
            current: AdapterFrame::default(),
            previous: AdapterFrame::default(),
            axes: [0.0; 4],
            has_gamepad: false,
            has_touch: false,
            synced_frame: None,
        }
    }

    pub fn profile(&self) -> &AdapterProfile {
        &self.profile
    }

    pub fn has_keyboard(&self) -> bool {
        self.keyboard.is_some()
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) -> bool {
        match self.keyboard.as_mut() {
            Some(keyboard) => keyboard.process_keyboard_event(event),
            None => false,
        }
    }

    /// Record a key transition directly
    pub fn handle_key(&mut self, code: KeyCode, state: ElementState, repeat: bool) -> bool {
        match self.keyboard.as_mut() {
            Some(keyboard) => keyboard.handle_key(code, state, repeat),
            None => false,
        }
    }

    /// Drop held keys, e.g. on focus loss
    pub fn release_keys(&mut self) {
        if let Some(keyboard) = self.keyboard.as_mut() {
            keyboard.release_all();
        }
    }

    /// Sync to the unifier's current frame
    ///
    /// Call once per frame after `InputUnifier::tick`. Extra calls within
    /// the same unifier frame do nothing, so edges cannot shift twice.
    pub fn update(&mut self, unifier: &InputUnifier) {
        if self.synced_frame == Some(unifier.frame()) {
            return;
        }
        self.synced_frame = Some(unifier.frame());

        let state = unifier.state();
        let (direction, buttons) = match &self.keyboard {
            Some(keyboard) => {
                let keys = keyboard.direction();
                let x = if exceeds_deadzone(keys.x, self.deadzone) {
                    keys.x
                } else {
                    state.direction.x
                };
                let y = if exceeds_deadzone(keys.y, self.deadzone) {
                    keys.y
                } else {
                    state.direction.y
                };
                (
                    DirectionVector::new(x, y),
                    state.buttons.union(&keyboard.snapshot()),
                )
            }
            None => (state.direction, state.buttons),
        };

        self.previous = self.current;
        self.current = AdapterFrame { direction, buttons };
        self.axes = state.gamepad.as_ref().map_or([0.0; 4], |frame| frame.axes);
        self.has_gamepad = unifier.has_gamepad();
        self.has_touch = unifier.has_touch();
    }

    /// Check if an alias (or raw button name) is held
    pub fn is_down(&self, name: &str) -> bool {
        self.profile
            .resolve(name)
            .into_iter()
            .any(|button| self.current.buttons.is_pressed(button))
    }

    /// Rising edge of an alias: none of its buttons held last frame, some now
    pub fn just_pressed(&self, name: &str) -> bool {
        let buttons = self.profile.resolve(name);
        let now = buttons.iter().any(|b| self.current.buttons.is_pressed(*b));
        let before = buttons.iter().any(|b| self.previous.buttons.is_pressed(*b));
        now && !before
    }

    /// Falling edge of an alias
    pub fn just_released(&self, name: &str) -> bool {
        let buttons = self.profile.resolve(name);
        let now = buttons.iter().any(|b| self.current.buttons.is_pressed(*b));
        let before = buttons.iter().any(|b| self.previous.buttons.is_pressed(*b));
        !now && before
    }

    pub fn axis_x(&self) -> f32 {
        self.current.direction.x
    }

    pub fn axis_y(&self) -> f32 {
        self.current.direction.y
    }

    /// Raw analog axis of the active gamepad, 0.0 without one
    pub fn raw_axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    pub fn left_stick(&self) -> Vec2 {
        Vec2::new(self.raw_axis(AXIS_LEFT_X), self.raw_axis(AXIS_LEFT_Y))
    }

    pub fn right_stick(&self) -> Vec2 {
        Vec2::new(self.raw_axis(AXIS_RIGHT_X), self.raw_axis(AXIS_RIGHT_Y))
    }

    pub fn has_gamepad(&self) -> bool {
        self.has_gamepad
    }

    pub fn has_touch(&self) -> bool {
        self.has_touch
    }

    /// Rumble the active gamepad if it supports it
    pub fn vibrate(&self, unifier: &mut InputUnifier, request: VibrationRequest) -> bool {
        match unifier.vibrate(request) {
            Ok(started) => started,
            Err(e) => {
                debug!("Adapter '{}': {}", self.profile.name(), e);
                false
            }
        }
    }
}

impl ControlState for FrameworkAdapter {
    fn direction(&self) -> DirectionVector {
        self.current.direction
    }

    fn is_pressed(&self, button: LogicalButton) -> bool {
        self.current.buttons.is_pressed(button)
    }

    fn just_pressed(&self, button: LogicalButton) -> bool {
        self.current.buttons.is_pressed(button) && !self.previous.buttons.is_pressed(button)
    }

    fn just_released(&self, button: LogicalButton) -> bool {
        !self.current.buttons.is_pressed(button) && self.previous.buttons.is_pressed(button)
    }
}
