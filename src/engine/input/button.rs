// Logical button vocabulary and per-frame snapshots

use super::error::InputError;
use crate::core::math::{clamp_axis, digital_axis};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Every button the unified state knows about
///
/// Face, shoulder and menu buttons come from the standard gamepad layout;
/// the four directions are only produced by digital pads (touch D-pad,
/// gamepad D-pad, keyboard).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicalButton {
    A,
    B,
    X,
    Y,
    Start,
    Select,
    Lb,
    Rb,
    Lt,
    Rt,
    Up,
    Down,
    Left,
    Right,
}

impl LogicalButton {
    /// Number of logical buttons
    pub const COUNT: usize = 14;

    /// All logical buttons in index order
    pub const ALL: [LogicalButton; Self::COUNT] = [
        Self::A,
        Self::B,
        Self::X,
        Self::Y,
        Self::Start,
        Self::Select,
        Self::Lb,
        Self::Rb,
        Self::Lt,
        Self::Rt,
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
    ];

    /// Position of this button inside a snapshot
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Lowercase name used by consumers and configuration files
    pub fn name(self) -> &'static str {
        match self {
            Self::A => "a",
            Self::B => "b",
            Self::X => "x",
            Self::Y => "y",
            Self::Start => "start",
            Self::Select => "select",
            Self::Lb => "lb",
            Self::Rb => "rb",
            Self::Lt => "lt",
            Self::Rt => "rt",
            Self::Up => "up",
            Self::Down => "down",
            Self::Left => "left",
            Self::Right => "right",
        }
    }

    /// Look a button up by its lowercase name
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|button| button.name() == name)
    }
}

impl fmt::Display for LogicalButton {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for LogicalButton {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(&s.to_ascii_lowercase())
            .ok_or_else(|| InputError::UnknownButton(s.to_string()))
    }
}

/// Pressed state of every logical button for one frame
///
/// Snapshots are produced whole and never edited afterwards; combining
/// sources yields a new snapshot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ButtonSnapshot {
    pressed: [bool; LogicalButton::COUNT],
}

impl ButtonSnapshot {
    /// Snapshot with nothing pressed
    pub const fn empty() -> Self {
        Self {
            pressed: [false; LogicalButton::COUNT],
        }
    }

    /// Build a snapshot by asking `f` about every logical button
    pub fn from_fn(mut f: impl FnMut(LogicalButton) -> bool) -> Self {
        let mut pressed = [false; LogicalButton::COUNT];
        for button in LogicalButton::ALL {
            pressed[button.index()] = f(button);
        }
        Self { pressed }
    }

    /// Build a snapshot where exactly the given buttons are pressed
    pub fn from_pressed(buttons: impl IntoIterator<Item = LogicalButton>) -> Self {
        let mut pressed = [false; LogicalButton::COUNT];
        for button in buttons {
            pressed[button.index()] = true;
        }
        Self { pressed }
    }

    /// Check if a button is pressed
    pub fn is_pressed(&self, button: LogicalButton) -> bool {
        self.pressed[button.index()]
    }

    /// Boolean OR of two snapshots
    pub fn union(&self, other: &ButtonSnapshot) -> Self {
        Self::from_fn(|button| self.is_pressed(button) || other.is_pressed(button))
    }

    /// Iterate over pressed buttons in index order
    pub fn pressed_buttons(&self) -> impl Iterator<Item = LogicalButton> + '_ {
        LogicalButton::ALL
            .into_iter()
            .filter(move |button| self.is_pressed(*button))
    }

    /// Check if nothing is pressed
    pub fn is_empty(&self) -> bool {
        !self.pressed.iter().any(|pressed| *pressed)
    }

    /// Digital direction from the four directional buttons
    pub fn digital_direction(&self) -> DirectionVector {
        DirectionVector::new(
            digital_axis(
                self.is_pressed(LogicalButton::Left),
                self.is_pressed(LogicalButton::Right),
            ),
            digital_axis(
                self.is_pressed(LogicalButton::Up),
                self.is_pressed(LogicalButton::Down),
            ),
        )
    }
}

/// Merged movement intent, both axes in [-1, 1]
///
/// `y` grows downward, matching screen coordinates and the standard
/// gamepad stick convention.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct DirectionVector {
    pub x: f32,
    pub y: f32,
}

impl DirectionVector {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    /// Create a direction, clamping both axes into [-1, 1]
    pub fn new(x: f32, y: f32) -> Self {
        Self {
            x: clamp_axis(x),
            y: clamp_axis(y),
        }
    }

    /// Check if neither axis reports movement
    pub fn is_zero(&self) -> bool {
        self.x == 0.0 && self.y == 0.0
    }
}
