// Input options recognised by the unifier and its adapters

use log::warn;
use serde::{Deserialize, Serialize};

/// Analog-to-digital threshold used when no option overrides it
pub const DEFAULT_DEADZONE: f32 = 0.15;

/// How the touch surface decides whether touch input exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchMode {
    /// Build the controls when the first touch event arrives
    #[default]
    Auto,
    /// Build the controls immediately
    Enabled,
    /// Never build the controls and ignore touch events
    Disabled,
}

/// Options passed to `InputUnifier::init`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputOptions {
    /// Minimum stick magnitude treated as intentional input
    pub deadzone: f32,

    /// Suppress legacy on-screen joystick overlays when the touch controls appear
    pub hide_existing: bool,

    /// Whether adapters attach their own keyboard listener
    pub setup_keyboard: bool,

    /// Touch capability detection
    pub touch: TouchMode,
}

impl Default for InputOptions {
    fn default() -> Self {
        Self {
            deadzone: DEFAULT_DEADZONE,
            hide_existing: true,
            setup_keyboard: true,
            touch: TouchMode::Auto,
        }
    }
}

impl InputOptions {
    /// Replace values the merge rules cannot work with
    ///
    /// A deadzone must be finite and inside [0, 1); anything else falls back
    /// to the default rather than failing initialisation.
    pub fn sanitized(mut self) -> Self {
        if !self.deadzone.is_finite() || !(0.0..1.0).contains(&self.deadzone) {
            warn!(
                "Ignoring invalid deadzone {}, using {}",
                self.deadzone, DEFAULT_DEADZONE
            );
            self.deadzone = DEFAULT_DEADZONE;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let options = InputOptions::default();
        assert_eq!(options.deadzone, 0.15);
        assert!(options.hide_existing);
        assert!(options.setup_keyboard);
        assert_eq!(options.touch, TouchMode::Auto);
    }

    #[test]
    fn test_sanitized_keeps_valid_deadzone() {
        let options = InputOptions {
            deadzone: 0.3,
            ..Default::default()
        }
        .sanitized();
        assert_eq!(options.deadzone, 0.3);
    }

    #[test]
    fn test_sanitized_replaces_invalid_deadzone() {
        for bad in [f32::NAN, -0.1, 1.0, 5.0, f32::INFINITY] {
            let options = InputOptions {
                deadzone: bad,
                ..Default::default()
            }
            .sanitized();
            assert_eq!(options.deadzone, DEFAULT_DEADZONE);
        }
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let options: InputOptions = toml::from_str("deadzone = 0.2\ntouch = \"disabled\"").unwrap();
        assert_eq!(options.deadzone, 0.2);
        assert_eq!(options.touch, TouchMode::Disabled);
        assert!(options.hide_existing);
        assert!(options.setup_keyboard);
    }
}
