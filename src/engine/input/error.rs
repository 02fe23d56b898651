// Input subsystem errors

/// Errors raised by input setup and passthrough operations
///
/// The per-frame path (`tick`, `state`, edge queries) never fails; these
/// only surface from initialisation, configuration and device requests.
#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Gamepad backend unavailable: {0}")]
    GamepadInit(String),

    #[error("Vibration request failed: {0}")]
    Vibration(String),

    #[error("Unknown button name: {0}")]
    UnknownButton(String),

    #[error("Unknown adapter profile: {0}")]
    UnknownProfile(String),

    #[error("An input context is already installed on this thread")]
    ContextInstalled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_error_display() {
        let err = InputError::UnknownButton("turbo".to_string());
        assert_eq!(err.to_string(), "Unknown button name: turbo");

        let err = InputError::UnknownProfile("phaser".to_string());
        assert_eq!(err.to_string(), "Unknown adapter profile: phaser");
    }
}
