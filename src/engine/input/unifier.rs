// State unifier - merges touch and gamepad into one snapshot per frame

use super::button::{ButtonSnapshot, DirectionVector, LogicalButton};
use super::controls::ControlState;
use super::edge::EdgeTracker;
use super::error::InputError;
use super::gamepad::frame::{
    RawGamepadFrame, AXIS_LEFT_X, AXIS_LEFT_Y, BUTTON_DPAD_DOWN, BUTTON_DPAD_LEFT,
    BUTTON_DPAD_RIGHT, BUTTON_DPAD_UP,
};
use super::gamepad::{GamepadBackend, GamepadPoller, VibrationRequest};
use super::options::InputOptions;
use super::touch::TouchControls;
use crate::core::math::digital_axis;
use glam::Vec2;
use log::{debug, info};
use winit::event::TouchPhase;

/// Window size assumed until the host reports the real one
pub const INITIAL_VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

/// Which sources are live this frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SourceAvailability {
    pub touch: bool,
    pub gamepad: bool,
}

/// The unified snapshot handed to every consumer
#[derive(Debug, Clone, Default, PartialEq)]
pub struct InputState {
    pub direction: DirectionVector,
    pub buttons: ButtonSnapshot,
    /// Raw frame of the active device, `None` while disconnected
    pub gamepad: Option<RawGamepadFrame>,
    pub source: SourceAvailability,
}

impl InputState {
    /// Snapshot with no movement, no presses and no sources
    pub fn neutral() -> Self {
        Self::default()
    }
}

/// Lifecycle of the unifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lifecycle {
    Active,
    /// Virtual controls hidden; gamepad still polled
    Hidden,
    /// Torn down; every tick yields a neutral snapshot
    Destroyed,
}

/// Merge touch and gamepad directions by precedence
///
/// 1. touch D-pad (digital)
/// 2. stick axis overrides when its magnitude exceeds the deadzone
/// 3. gamepad D-pad overrides the stick on any axis it presses
/// 4. clamp to [-1, 1]
pub fn merge_direction(
    touch: DirectionVector,
    gamepad: Option<&RawGamepadFrame>,
    deadzone: f32,
) -> DirectionVector {
    let mut x = touch.x;
    let mut y = touch.y;

    if let Some(frame) = gamepad {
        let (up, down, left, right) = frame.stick_directions(deadzone);
        if left || right {
            x = frame.axis(AXIS_LEFT_X);
        }
        if up || down {
            y = frame.axis(AXIS_LEFT_Y);
        }

        let (left, right) = (frame.pressed(BUTTON_DPAD_LEFT), frame.pressed(BUTTON_DPAD_RIGHT));
        if left || right {
            x = digital_axis(left, right);
        }
        let (up, down) = (frame.pressed(BUTTON_DPAD_UP), frame.pressed(BUTTON_DPAD_DOWN));
        if up || down {
            y = digital_axis(up, down);
        }
    }

    DirectionVector::new(x, y)
}

/// Single owner of the per-frame unified input state
///
/// `tick()` is the frame boundary: it shifts the edge cache and then builds
/// the new snapshot. Every other method is a pure read until the next tick.
pub struct InputUnifier {
    options: InputOptions,
    touch: TouchControls,
    gamepad: GamepadPoller,
    edges: EdgeTracker,
    state: InputState,
    lifecycle: Lifecycle,
    frame: u64,
}

impl InputUnifier {
    /// Create a unifier reading devices from `backend`
    pub fn init(options: InputOptions, backend: Box<dyn GamepadBackend>) -> Self {
        let options = options.sanitized();
        info!(
            "Initializing input unifier (deadzone {}, touch {:?})",
            options.deadzone, options.touch
        );
        let touch = TouchControls::new(options.touch, options.hide_existing, INITIAL_VIEWPORT);

        Self {
            options,
            touch,
            gamepad: GamepadPoller::new(backend),
            edges: EdgeTracker::new(),
            state: InputState::neutral(),
            lifecycle: Lifecycle::Active,
            frame: 0,
        }
    }

    /// Create a unifier over the platform gamepad API
    pub fn with_default_backend(options: InputOptions) -> Self {
        let mut unifier = Self::init(options, Box::new(super::gamepad::NoGamepads));
        unifier.gamepad = GamepadPoller::with_default_backend();
        unifier
    }

    pub fn options(&self) -> &InputOptions {
        &self.options
    }

    pub fn lifecycle(&self) -> Lifecycle {
        self.lifecycle
    }

    /// Number of ticks since init
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// Advance one frame and return the new unified snapshot
    pub fn tick(&mut self) -> &InputState {
        self.frame += 1;
        if self.lifecycle == Lifecycle::Destroyed {
            return &self.state;
        }

        self.gamepad.poll();
        let pad = self.gamepad.active_frame();

        let direction = merge_direction(self.touch.direction(), pad, self.options.deadzone);
        let pad_buttons = pad.map(RawGamepadFrame::logical_buttons).unwrap_or_default();
        let buttons = self.touch.buttons().union(&pad_buttons);

        self.edges.advance(buttons);
        self.state = InputState {
            direction,
            buttons,
            gamepad: pad.cloned(),
            source: SourceAvailability {
                touch: self.touch.is_available() && self.touch.is_visible(),
                gamepad: pad.is_some(),
            },
        };
        &self.state
    }

    /// Unified snapshot of the current frame
    pub fn state(&self) -> &InputState {
        &self.state
    }

    /// Button state of the previous frame
    pub fn previous_buttons(&self) -> &ButtonSnapshot {
        self.edges.previous()
    }

    pub fn has_gamepad(&self) -> bool {
        self.gamepad.is_connected()
    }

    pub fn has_touch(&self) -> bool {
        self.touch.is_available()
    }

    pub fn is_held(&self, button: LogicalButton) -> bool {
        self.edges.is_held(button)
    }

    /// Rising edge by button name, unknown names never fire
    pub fn just_pressed_named(&self, name: &str) -> bool {
        LogicalButton::from_name(name).is_some_and(|button| self.edges.just_pressed(button))
    }

    /// Falling edge by button name, unknown names never fire
    pub fn just_released_named(&self, name: &str) -> bool {
        LogicalButton::from_name(name).is_some_and(|button| self.edges.just_released(button))
    }

    /// Feed a window touch event to the virtual controls
    pub fn handle_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) -> bool {
        if self.lifecycle == Lifecycle::Destroyed {
            return false;
        }
        self.touch.handle_touch(id, phase, position)
    }

    pub fn resize(&mut self, width: f32, height: f32) {
        self.touch.resize(width, height);
    }

    /// Forward a vibration to the active gamepad
    pub fn vibrate(&mut self, request: VibrationRequest) -> Result<bool, InputError> {
        self.gamepad.vibrate(request)
    }

    pub fn touch(&self) -> &TouchControls {
        &self.touch
    }

    pub fn touch_mut(&mut self) -> &mut TouchControls {
        &mut self.touch
    }

    pub fn gamepad(&self) -> &GamepadPoller {
        &self.gamepad
    }

    /// Show the virtual controls again
    pub fn show(&mut self) {
        if self.lifecycle == Lifecycle::Hidden {
            self.touch.show();
            self.lifecycle = Lifecycle::Active;
            debug!("Input controls shown");
        }
    }

    /// Hide the virtual controls, releasing anything they hold
    pub fn hide(&mut self) {
        if self.lifecycle == Lifecycle::Active {
            self.touch.hide();
            self.lifecycle = Lifecycle::Hidden;
            debug!("Input controls hidden");
        }
    }

    /// Tear down the controls and drop the device backend
    pub fn destroy(&mut self) {
        if self.lifecycle == Lifecycle::Destroyed {
            return;
        }
        self.touch.teardown();
        self.gamepad.shutdown();
        self.edges.reset();
        self.state = InputState::neutral();
        self.lifecycle = Lifecycle::Destroyed;
        info!("Input unifier destroyed");
    }
}

impl ControlState for InputUnifier {
    fn direction(&self) -> DirectionVector {
        self.state.direction
    }

    fn is_pressed(&self, button: LogicalButton) -> bool {
        self.edges.is_pressed(button)
    }

    fn just_pressed(&self, button: LogicalButton) -> bool {
        self.edges.just_pressed(button)
    }

    fn just_released(&self, button: LogicalButton) -> bool {
        self.edges.just_released(button)
    }
}
