// Per-frame gamepad polling with fixed slot priority

use super::backend::{GamepadBackend, GilrsBackend, NoGamepads, VibrationRequest};
use super::frame::RawGamepadFrame;
use super::MAX_SLOTS;
use crate::engine::input::error::InputError;
use log::{info, warn};

/// Reads the single active gamepad once per frame
///
/// The poller exposes no edge detection of its own; consecutive-frame
/// comparisons happen in the unifier only.
pub struct GamepadPoller {
    backend: Box<dyn GamepadBackend>,

    /// Most recent frame read from a connected device
    last_frame: Option<RawGamepadFrame>,

    connected: bool,
    active_slot: Option<usize>,
}

impl GamepadPoller {
    pub fn new(backend: Box<dyn GamepadBackend>) -> Self {
        Self {
            backend,
            last_frame: None,
            connected: false,
            active_slot: None,
        }
    }

    /// Poller over gilrs, or over no devices when the platform has no
    /// gamepad support
    pub fn with_default_backend() -> Self {
        match GilrsBackend::new() {
            Ok(backend) => Self::new(Box::new(backend)),
            Err(e) => {
                warn!("{}; continuing without gamepads", e);
                Self::new(Box::new(NoGamepads))
            }
        }
    }

    /// Refresh the backend and pick the lowest connected slot
    pub fn poll(&mut self) {
        self.backend.refresh();

        let found = (0..MAX_SLOTS).find_map(|slot| self.backend.read_slot(slot));
        match found {
            Some(frame) => {
                if self.active_slot != Some(frame.slot) {
                    info!("Active gamepad: '{}' (slot {})", frame.name, frame.slot);
                }
                self.active_slot = Some(frame.slot);
                self.connected = true;
                self.last_frame = Some(frame);
            }
            None => {
                if self.connected {
                    info!("No gamepad connected");
                }
                // Last frame kept for inspection; active_frame() hides it
                self.connected = false;
                self.active_slot = None;
            }
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected
    }

    pub fn active_slot(&self) -> Option<usize> {
        self.active_slot
    }

    /// Frame of the connected device, `None` while disconnected
    pub fn active_frame(&self) -> Option<&RawGamepadFrame> {
        if self.connected {
            self.last_frame.as_ref()
        } else {
            None
        }
    }

    /// Last frame ever read, even after the device went away
    pub fn last_known(&self) -> Option<&RawGamepadFrame> {
        self.last_frame.as_ref()
    }

    /// Forward a vibration to the active device
    pub fn vibrate(&mut self, request: VibrationRequest) -> Result<bool, InputError> {
        match self.active_slot {
            Some(slot) if self.connected => self.backend.vibrate(slot, request),
            _ => Ok(false),
        }
    }

    /// Drop the device backend; the poller reports nothing afterwards
    pub fn shutdown(&mut self) {
        self.backend = Box::new(NoGamepads);
        self.connected = false;
        self.active_slot = None;
        self.last_frame = None;
    }
}
