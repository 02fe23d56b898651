// The one input unifier per window, reachable from any consumer
//
// The host constructs the unifier and installs it here; adapters and
// scenes that cannot be handed a reference at construction time reach it
// through `with_input`. Lifecycle: install -> active -> uninstall.

use super::error::InputError;
use super::unifier::InputUnifier;
use log::{info, warn};
use std::cell::RefCell;

thread_local! {
    static ACTIVE: RefCell<Option<InputUnifier>> = const { RefCell::new(None) };
}

/// Install the unifier for this thread
/// Fails if one is already installed
pub fn install(unifier: InputUnifier) -> Result<(), InputError> {
    ACTIVE.with(|slot| {
        let mut slot = slot.borrow_mut();
        if slot.is_some() {
            return Err(InputError::ContextInstalled);
        }
        *slot = Some(unifier);
        info!("Input context installed");
        Ok(())
    })
}

/// Check if a unifier is installed on this thread
pub fn is_installed() -> bool {
    ACTIVE.with(|slot| slot.try_borrow().map_or(true, |slot| slot.is_some()))
}

/// Run `f` against the installed unifier
///
/// Returns `None` when nothing is installed or when called re-entrantly
/// from inside another `with_input`.
pub fn with_input<R>(f: impl FnOnce(&mut InputUnifier) -> R) -> Option<R> {
    ACTIVE.with(|slot| {
        let Ok(mut slot) = slot.try_borrow_mut() else {
            warn!("Re-entrant input context access refused");
            return None;
        };
        slot.as_mut().map(f)
    })
}

/// Destroy and remove the installed unifier
/// Returns false when nothing was installed
pub fn uninstall() -> bool {
    let taken = ACTIVE.with(|slot| slot.borrow_mut().take());
    match taken {
        Some(mut unifier) => {
            unifier.destroy();
            info!("Input context uninstalled");
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::gamepad::frame::{RawGamepadFrame, BUTTON_SOUTH};
    use crate::engine::input::gamepad::VirtualGamepads;
    use crate::engine::input::options::InputOptions;
    use crate::engine::input::{ControlState, LogicalButton};

    // Each test runs on its own thread, so the thread-local starts empty

    #[test]
    fn test_nothing_installed() {
        assert!(!is_installed());
        assert_eq!(with_input(|u| u.frame()), None);
        assert!(!uninstall());
    }

    #[test]
    fn test_install_and_use() {
        let pads = VirtualGamepads::new();
        pads.connect(0, RawGamepadFrame::new(0, "pad").with_button(BUTTON_SOUTH, true));
        install(InputUnifier::init(InputOptions::default(), Box::new(pads))).unwrap();
        assert!(is_installed());

        with_input(|u| {
            u.tick();
        });
        let pressed = with_input(|u| u.just_pressed(LogicalButton::A));
        assert_eq!(pressed, Some(true));

        assert!(uninstall());
        assert!(!is_installed());
    }

    #[test]
    fn test_second_install_rejected() {
        let options = InputOptions::default();
        install(InputUnifier::init(options.clone(), Box::new(VirtualGamepads::new()))).unwrap();
        let second = install(InputUnifier::init(options, Box::new(VirtualGamepads::new())));
        assert!(matches!(second, Err(InputError::ContextInstalled)));
        uninstall();
    }

    #[test]
    fn test_reentrant_access_refused() {
        install(InputUnifier::init(
            InputOptions::default(),
            Box::new(VirtualGamepads::new()),
        ))
        .unwrap();

        let inner = with_input(|_| with_input(|u| u.frame()));
        assert_eq!(inner, Some(None));
        uninstall();
    }
}
