// Input unification
//
// Touch controls, gamepads and (per adapter) the keyboard, merged into one
// snapshot per frame.
//
// ## Architecture
//
// - `touch`: virtual D-pad and buttons, touch phases to a press map
// - `overlay`: registry of legacy on-screen joysticks the touch surface hides
// - `gamepad`: device backends and the slot-priority poller
// - `keyboard`: key bindings and a held-key listener
// - `edge`: previous/current button cache behind `just_pressed`
// - `unifier`: the per-frame merge and lifecycle
// - `context`: the one installed unifier per thread
// - `adapter`: alias vocabularies, keyboard merge and vibration passthrough
//
// ## Usage Example
//
// ```rust
// use arcade_input::engine::input::{AdapterProfile, FrameworkAdapter, InputOptions, InputUnifier};
//
// let options = InputOptions::default();
// let mut unifier = InputUnifier::with_default_backend(options.clone());
// let mut adapter = FrameworkAdapter::new(AdapterProfile::arcade(), &options);
//
// // Forward window events
// adapter.process_keyboard_event(&key_event);
// unifier.handle_touch(touch.id, touch.phase, position);
//
// // Once per frame
// unifier.tick();
// adapter.update(&unifier);
//
// if adapter.just_pressed("jump") {
//     // Rising edge this frame only
// }
// let x = adapter.axis_x();
// ```

pub mod adapter;
pub mod button;
pub mod context;
pub mod controls;
pub mod edge;
pub mod error;
pub mod gamepad;
pub mod keyboard;
pub mod options;
pub mod overlay;
pub mod touch;
pub mod unifier;

// Re-export commonly used types
pub use adapter::{AdapterProfile, FrameworkAdapter, KeyEventBridge, SyntheticKeyEvent};
pub use button::{ButtonSnapshot, DirectionVector, LogicalButton};
pub use controls::ControlState;
pub use error::InputError;
pub use gamepad::{GamepadBackend, RawGamepadFrame, VibrationRequest};
pub use keyboard::{KeyBindings, KeyboardListener};
pub use options::{InputOptions, TouchMode, DEFAULT_DEADZONE};
pub use touch::{TouchButton, TouchControls};
pub use unifier::{InputState, InputUnifier, Lifecycle, SourceAvailability};
