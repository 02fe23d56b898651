// Read-only view shared by the unifier and adapters

use super::button::{DirectionVector, LogicalButton};

/// Per-frame input queries a consumer needs
///
/// Implemented by `InputUnifier` (touch + gamepad) and `FrameworkAdapter`
/// (the same plus its keyboard), so consumers like the menu work with
/// either.
pub trait ControlState {
    fn direction(&self) -> DirectionVector;

    fn is_pressed(&self, button: LogicalButton) -> bool;

    fn just_pressed(&self, button: LogicalButton) -> bool;

    fn just_released(&self, button: LogicalButton) -> bool;

    /// Check if any of the buttons has a rising edge this frame
    fn any_just_pressed(&self, buttons: &[LogicalButton]) -> bool {
        buttons.iter().any(|button| self.just_pressed(*button))
    }
}
