// Raw gamepad frame in the standard 17-button / 4-axis layout

use crate::core::math::exceeds_deadzone;
use crate::engine::input::button::{ButtonSnapshot, LogicalButton};

/// Number of buttons in the standard layout
pub const BUTTON_COUNT: usize = 17;

/// Number of stick axes in the standard layout
pub const AXIS_COUNT: usize = 4;

// Standard button indices
pub const BUTTON_SOUTH: usize = 0;
pub const BUTTON_EAST: usize = 1;
pub const BUTTON_WEST: usize = 2;
pub const BUTTON_NORTH: usize = 3;
pub const BUTTON_LEFT_BUMPER: usize = 4;
pub const BUTTON_RIGHT_BUMPER: usize = 5;
pub const BUTTON_LEFT_TRIGGER: usize = 6;
pub const BUTTON_RIGHT_TRIGGER: usize = 7;
pub const BUTTON_SELECT: usize = 8;
pub const BUTTON_START: usize = 9;
pub const BUTTON_LEFT_STICK: usize = 10;
pub const BUTTON_RIGHT_STICK: usize = 11;
pub const BUTTON_DPAD_UP: usize = 12;
pub const BUTTON_DPAD_DOWN: usize = 13;
pub const BUTTON_DPAD_LEFT: usize = 14;
pub const BUTTON_DPAD_RIGHT: usize = 15;
pub const BUTTON_HOME: usize = 16;

// Standard axis indices, y axes grow downward
pub const AXIS_LEFT_X: usize = 0;
pub const AXIS_LEFT_Y: usize = 1;
pub const AXIS_RIGHT_X: usize = 2;
pub const AXIS_RIGHT_Y: usize = 3;

/// Standard index of every logical button a gamepad can produce
pub const LOGICAL_BUTTON_INDICES: [(LogicalButton, usize); LogicalButton::COUNT] = [
    (LogicalButton::A, BUTTON_SOUTH),
    (LogicalButton::B, BUTTON_EAST),
    (LogicalButton::X, BUTTON_WEST),
    (LogicalButton::Y, BUTTON_NORTH),
    (LogicalButton::Lb, BUTTON_LEFT_BUMPER),
    (LogicalButton::Rb, BUTTON_RIGHT_BUMPER),
    (LogicalButton::Lt, BUTTON_LEFT_TRIGGER),
    (LogicalButton::Rt, BUTTON_RIGHT_TRIGGER),
    (LogicalButton::Select, BUTTON_SELECT),
    (LogicalButton::Start, BUTTON_START),
    (LogicalButton::Up, BUTTON_DPAD_UP),
    (LogicalButton::Down, BUTTON_DPAD_DOWN),
    (LogicalButton::Left, BUTTON_DPAD_LEFT),
    (LogicalButton::Right, BUTTON_DPAD_RIGHT),
];

/// Whether the device reported a known button layout
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MappingKind {
    #[default]
    Standard,
    /// Unknown layout, buttons decoded best effort
    NonStandard,
}

/// One poll worth of hardware state for a single device
#[derive(Debug, Clone, PartialEq)]
pub struct RawGamepadFrame {
    /// Slot the device occupies (0..=3)
    pub slot: usize,
    pub name: String,
    pub mapping: MappingKind,
    pub axes: [f32; AXIS_COUNT],
    pub buttons: [bool; BUTTON_COUNT],
}

impl RawGamepadFrame {
    /// Neutral frame for a slot
    pub fn new(slot: usize, name: impl Into<String>) -> Self {
        Self {
            slot,
            name: name.into(),
            mapping: MappingKind::Standard,
            axes: [0.0; AXIS_COUNT],
            buttons: [false; BUTTON_COUNT],
        }
    }

    /// Builder-style helper to set a button by standard index
    pub fn with_button(mut self, index: usize, pressed: bool) -> Self {
        if let Some(slot) = self.buttons.get_mut(index) {
            *slot = pressed;
        }
        self
    }

    /// Builder-style helper to set an axis by standard index
    pub fn with_axis(mut self, index: usize, value: f32) -> Self {
        if let Some(slot) = self.axes.get_mut(index) {
            *slot = value;
        }
        self
    }

    /// Check a button by standard index, out-of-range is released
    pub fn pressed(&self, index: usize) -> bool {
        self.buttons.get(index).copied().unwrap_or(false)
    }

    /// Raw axis value by standard index, out-of-range is centred
    /// Not deadzone-filtered
    pub fn axis(&self, index: usize) -> f32 {
        self.axes.get(index).copied().unwrap_or(0.0)
    }

    /// Logical press map for this device
    pub fn logical_buttons(&self) -> ButtonSnapshot {
        let mut pressed = Vec::with_capacity(LogicalButton::COUNT);
        for (button, index) in LOGICAL_BUTTON_INDICES {
            if self.pressed(index) {
                pressed.push(button);
            }
        }
        ButtonSnapshot::from_pressed(pressed)
    }

    /// Left stick converted to booleans (up, down, left, right)
    pub fn stick_directions(&self, deadzone: f32) -> (bool, bool, bool, bool) {
        let x = self.axis(AXIS_LEFT_X);
        let y = self.axis(AXIS_LEFT_Y);
        let x_active = exceeds_deadzone(x, deadzone);
        let y_active = exceeds_deadzone(y, deadzone);
        (
            y_active && y < 0.0,
            y_active && y > 0.0,
            x_active && x < 0.0,
            x_active && x > 0.0,
        )
    }
}
