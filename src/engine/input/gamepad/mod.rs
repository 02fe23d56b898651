// Gamepad hardware polling
//
// - `frame`: raw per-device snapshot in the standard button/axis layout
// - `backend`: device sources (gilrs hardware, virtual pads, none)
// - `poller`: per-frame slot selection and vibration passthrough

pub mod backend;
pub mod frame;
pub mod poller;

/// Number of device slots checked in priority order
pub const MAX_SLOTS: usize = 4;

pub use backend::{GamepadBackend, GilrsBackend, NoGamepads, VibrationRequest, VirtualGamepads};
pub use frame::{MappingKind, RawGamepadFrame};
pub use poller::GamepadPoller;
