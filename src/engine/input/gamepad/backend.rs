// Gamepad device backends

use super::frame::*;
use super::MAX_SLOTS;
use crate::engine::input::error::InputError;
use gilrs::ff::{BaseEffect, BaseEffectType, Effect, EffectBuilder, Replay, Ticks};
use gilrs::ev::filter::{axis_dpad_to_button, Filter};
use gilrs::{Axis, Button, EventType, GamepadId, Gilrs, GilrsBuilder, MappingSource};
use log::{debug, info, warn};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

/// Haptic feedback request forwarded to the active device
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VibrationRequest {
    pub duration: Duration,
    /// Low-frequency motor magnitude in [0, 1]
    pub strong: f32,
    /// High-frequency motor magnitude in [0, 1]
    pub weak: f32,
}

impl VibrationRequest {
    pub fn new(duration: Duration, strong: f32, weak: f32) -> Self {
        Self {
            duration,
            strong: strong.clamp(0.0, 1.0),
            weak: weak.clamp(0.0, 1.0),
        }
    }

    /// Short pulse on both motors
    pub fn pulse(duration: Duration) -> Self {
        Self::new(duration, 1.0, 1.0)
    }
}

/// Source of connected devices, one per slot
///
/// Backends never decide which device is active; the poller walks the
/// slots in priority order.
pub trait GamepadBackend {
    /// Drain pending connect/disconnect notifications
    fn refresh(&mut self);

    /// Read the device in `slot` if one is connected
    fn read_slot(&self, slot: usize) -> Option<RawGamepadFrame>;

    /// Start a vibration on the device in `slot`
    /// Returns `Ok(false)` when the device cannot vibrate
    fn vibrate(&mut self, slot: usize, request: VibrationRequest) -> Result<bool, InputError>;
}

/// Backend for hosts without a gamepad API
#[derive(Debug, Default)]
pub struct NoGamepads;

impl GamepadBackend for NoGamepads {
    fn refresh(&mut self) {}

    fn read_slot(&self, _slot: usize) -> Option<RawGamepadFrame> {
        None
    }

    fn vibrate(&mut self, _slot: usize, _request: VibrationRequest) -> Result<bool, InputError> {
        Ok(false)
    }
}

/// Standard layout position of every gilrs button we decode
const GILRS_BUTTONS: [(Button, usize); BUTTON_COUNT] = [
    (Button::South, BUTTON_SOUTH),
    (Button::East, BUTTON_EAST),
    (Button::West, BUTTON_WEST),
    (Button::North, BUTTON_NORTH),
    (Button::LeftTrigger, BUTTON_LEFT_BUMPER),
    (Button::RightTrigger, BUTTON_RIGHT_BUMPER),
    (Button::LeftTrigger2, BUTTON_LEFT_TRIGGER),
    (Button::RightTrigger2, BUTTON_RIGHT_TRIGGER),
    (Button::Select, BUTTON_SELECT),
    (Button::Start, BUTTON_START),
    (Button::LeftThumb, BUTTON_LEFT_STICK),
    (Button::RightThumb, BUTTON_RIGHT_STICK),
    (Button::DPadUp, BUTTON_DPAD_UP),
    (Button::DPadDown, BUTTON_DPAD_DOWN),
    (Button::DPadLeft, BUTTON_DPAD_LEFT),
    (Button::DPadRight, BUTTON_DPAD_RIGHT),
    (Button::Mode, BUTTON_HOME),
];

/// How the gilrs context is built
///
/// Stock gilrs filters rescale sticks through their own radial deadzone.
/// Axes here must stay raw, so only the hat-to-D-pad filter runs, by hand
/// in `refresh`, and the state is updated after it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GilrsSettings {
    pub default_filters: bool,
    pub update_state: bool,
}

pub const GILRS_SETTINGS: GilrsSettings = GilrsSettings {
    default_filters: false,
    update_state: false,
};

impl GilrsSettings {
    pub fn builder(&self) -> GilrsBuilder {
        GilrsBuilder::new()
            .with_default_filters(self.default_filters)
            .set_update_state(self.update_state)
    }
}

/// Hardware backend built on gilrs
///
/// Devices get the lowest free slot when they connect and keep it until
/// they disconnect, so slot priority is stable across hot-plugging.
pub struct GilrsBackend {
    gilrs: Gilrs,
    slots: [Option<GamepadId>; MAX_SLOTS],
    /// Keeps the last effect alive while it plays
    effect: Option<Effect>,
}

impl GilrsBackend {
    pub fn new() -> Result<Self, InputError> {
        info!("Initializing gilrs gamepad backend");
        let gilrs = GILRS_SETTINGS
            .builder()
            .build()
            .map_err(|e| InputError::GamepadInit(e.to_string()))?;

        let mut backend = Self {
            gilrs,
            slots: [None; MAX_SLOTS],
            effect: None,
        };

        let connected: Vec<GamepadId> = backend.gilrs.gamepads().map(|(id, _)| id).collect();
        for id in connected {
            backend.assign(id);
        }

        Ok(backend)
    }

    fn assign(&mut self, id: GamepadId) {
        if self.slots.contains(&Some(id)) {
            return;
        }
        match self.slots.iter().position(Option::is_none) {
            Some(slot) => {
                self.slots[slot] = Some(id);
                let gamepad = self.gilrs.gamepad(id);
                info!("Gamepad '{}' connected in slot {}", gamepad.name(), slot);
                if gamepad.mapping_source() == MappingSource::None {
                    warn!(
                        "Gamepad '{}' has no known mapping, decoding best effort",
                        gamepad.name()
                    );
                }
            }
            None => warn!("All {} gamepad slots in use, ignoring {}", MAX_SLOTS, id),
        }
    }

    fn release(&mut self, id: GamepadId) {
        for (slot, entry) in self.slots.iter_mut().enumerate() {
            if *entry == Some(id) {
                info!("Gamepad in slot {} disconnected", slot);
                *entry = None;
            }
        }
    }
}

impl GamepadBackend for GilrsBackend {
    fn refresh(&mut self) {
        while let Some(raw) = self.gilrs.next_event() {
            let Some(event) = raw.filter_ev(&axis_dpad_to_button, &mut self.gilrs) else {
                continue;
            };
            if event.is_dropped() {
                continue;
            }
            self.gilrs.update(&event);
            match event.event {
                EventType::Connected => self.assign(event.id),
                EventType::Disconnected => self.release(event.id),
                _ => {}
            }
        }
    }

    fn read_slot(&self, slot: usize) -> Option<RawGamepadFrame> {
        let id = self.slots.get(slot).copied().flatten()?;
        let gamepad = self.gilrs.connected_gamepad(id)?;

        let mut frame = RawGamepadFrame::new(slot, gamepad.name());
        if gamepad.mapping_source() == MappingSource::None {
            frame.mapping = MappingKind::NonStandard;
        }
        for (button, index) in GILRS_BUTTONS {
            frame.buttons[index] = gamepad.is_pressed(button);
        }
        frame.axes[AXIS_LEFT_X] = gamepad.value(Axis::LeftStickX);
        frame.axes[AXIS_LEFT_Y] = -gamepad.value(Axis::LeftStickY);
        frame.axes[AXIS_RIGHT_X] = gamepad.value(Axis::RightStickX);
        frame.axes[AXIS_RIGHT_Y] = -gamepad.value(Axis::RightStickY);

        Some(frame)
    }

    fn vibrate(&mut self, slot: usize, request: VibrationRequest) -> Result<bool, InputError> {
        let Some(id) = self.slots.get(slot).copied().flatten() else {
            return Ok(false);
        };
        let supported = self
            .gilrs
            .connected_gamepad(id)
            .map(|gamepad| gamepad.is_ff_supported())
            .unwrap_or(false);
        if !supported {
            debug!("Gamepad in slot {} has no force feedback", slot);
            return Ok(false);
        }

        let play_for = Ticks::from_ms(request.duration.as_millis().min(u32::MAX as u128) as u32);
        let scheduling = Replay {
            play_for,
            ..Default::default()
        };
        let effect = EffectBuilder::new()
            .add_effect(BaseEffect {
                kind: BaseEffectType::Strong {
                    magnitude: (request.strong * u16::MAX as f32) as u16,
                },
                scheduling,
                envelope: Default::default(),
            })
            .add_effect(BaseEffect {
                kind: BaseEffectType::Weak {
                    magnitude: (request.weak * u16::MAX as f32) as u16,
                },
                scheduling,
                envelope: Default::default(),
            })
            .gamepads(&[id])
            .finish(&mut self.gilrs)
            .map_err(|e| InputError::Vibration(e.to_string()))?;
        effect
            .play()
            .map_err(|e| InputError::Vibration(e.to_string()))?;

        self.effect = Some(effect);
        Ok(true)
    }
}

#[derive(Debug, Default)]
struct VirtualSlots {
    slots: [Option<RawGamepadFrame>; MAX_SLOTS],
    rumble_capable: bool,
    vibrations: Vec<(usize, VibrationRequest)>,
}

/// Programmatically driven devices
///
/// Handles are cheap clones sharing the same slots, so a host can keep one
/// handle to feed frames while the poller owns another. Used by headless
/// hosts (devices bridged from elsewhere) and by tests.
#[derive(Debug, Clone, Default)]
pub struct VirtualGamepads {
    inner: Rc<RefCell<VirtualSlots>>,
}

impl VirtualGamepads {
    pub fn new() -> Self {
        Self::default()
    }

    /// Plug a device into a slot, replacing any previous one
    pub fn connect(&self, slot: usize, mut frame: RawGamepadFrame) {
        if slot >= MAX_SLOTS {
            warn!("Virtual gamepad slot {} out of range", slot);
            return;
        }
        frame.slot = slot;
        self.inner.borrow_mut().slots[slot] = Some(frame);
    }

    /// Mutate the device in a slot, no-op when the slot is empty
    pub fn update(&self, slot: usize, f: impl FnOnce(&mut RawGamepadFrame)) {
        if let Some(Some(frame)) = self.inner.borrow_mut().slots.get_mut(slot) {
            f(frame);
        }
    }

    pub fn disconnect(&self, slot: usize) {
        if let Some(entry) = self.inner.borrow_mut().slots.get_mut(slot) {
            *entry = None;
        }
    }

    /// Let vibration requests succeed
    pub fn set_rumble_capable(&self, capable: bool) {
        self.inner.borrow_mut().rumble_capable = capable;
    }

    /// Vibration requests that reached a device, in order
    pub fn vibrations(&self) -> Vec<(usize, VibrationRequest)> {
        self.inner.borrow().vibrations.clone()
    }
}

impl GamepadBackend for VirtualGamepads {
    fn refresh(&mut self) {}

    fn read_slot(&self, slot: usize) -> Option<RawGamepadFrame> {
        self.inner.borrow().slots.get(slot).cloned().flatten()
    }

    fn vibrate(&mut self, slot: usize, request: VibrationRequest) -> Result<bool, InputError> {
        let mut inner = self.inner.borrow_mut();
        let connected = matches!(inner.slots.get(slot), Some(Some(_)));
        if !connected || !inner.rumble_capable {
            return Ok(false);
        }
        inner.vibrations.push((slot, request));
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vibration_request_clamps() {
        let request = VibrationRequest::new(Duration::from_millis(100), 1.5, -0.2);
        assert_eq!(request.strong, 1.0);
        assert_eq!(request.weak, 0.0);
    }

    #[test]
    fn test_no_gamepads_reports_nothing() {
        let mut backend = NoGamepads;
        backend.refresh();
        for slot in 0..MAX_SLOTS {
            assert!(backend.read_slot(slot).is_none());
        }
        let request = VibrationRequest::pulse(Duration::from_millis(50));
        assert!(!backend.vibrate(0, request).unwrap());
    }

    #[test]
    fn test_virtual_handles_share_slots() {
        let feeder = VirtualGamepads::new();
        let backend = feeder.clone();

        feeder.connect(2, RawGamepadFrame::new(0, "virtual"));
        let frame = backend.read_slot(2).unwrap();
        assert_eq!(frame.slot, 2);

        feeder.update(2, |frame| frame.buttons[BUTTON_EAST] = true);
        assert!(backend.read_slot(2).unwrap().pressed(BUTTON_EAST));

        feeder.disconnect(2);
        assert!(backend.read_slot(2).is_none());
    }

    #[test]
    fn test_virtual_vibration_needs_capable_device() {
        let feeder = VirtualGamepads::new();
        let mut backend = feeder.clone();
        let request = VibrationRequest::pulse(Duration::from_millis(80));

        assert!(!backend.vibrate(0, request).unwrap());

        feeder.connect(0, RawGamepadFrame::new(0, "virtual"));
        assert!(!backend.vibrate(0, request).unwrap());

        feeder.set_rumble_capable(true);
        assert!(backend.vibrate(0, request).unwrap());
        assert_eq!(feeder.vibrations(), vec![(0, request)]);
    }

    #[test]
    fn test_gilrs_keeps_axes_unfiltered() {
        assert!(!GILRS_SETTINGS.default_filters);
        assert!(!GILRS_SETTINGS.update_state);
    }

    #[test]
    fn test_gilrs_button_table_covers_layout() {
        let mut seen = [false; BUTTON_COUNT];
        for (_, index) in GILRS_BUTTONS {
            seen[index] = true;
        }
        assert!(seen.iter().all(|s| *s));
    }
}
