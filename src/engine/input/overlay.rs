// Registry of host overlays that compete with the virtual controls

use log::{debug, info};

/// Name fragments identifying legacy on-screen joysticks
///
/// Matching is a case-insensitive substring test against the overlay name.
pub const LEGACY_OVERLAY_PATTERNS: &[&str] =
    &["joystick", "virtual-pad", "vpad", "dpad", "touch-controls"];

/// An overlay the host draws on its own
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Overlay {
    pub name: String,
    visible: bool,
    suppressed: bool,
}

impl Overlay {
    pub fn is_visible(&self) -> bool {
        self.visible && !self.suppressed
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppressed
    }
}

/// Overlays registered by the host, with suppression bookkeeping
///
/// Suppression is best effort: the host is expected to skip drawing any
/// overlay whose `is_visible` turns false. Nothing here depends on the
/// host honouring it.
#[derive(Debug, Default)]
pub struct LegacyOverlays {
    entries: Vec<Overlay>,
    suppressing: bool,
}

impl LegacyOverlays {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an overlay by name
    ///
    /// Registering while suppression is active hides matching overlays
    /// immediately. Registering the same name twice is a no-op.
    pub fn register(&mut self, name: impl Into<String>) {
        let name = name.into();
        if self.entries.iter().any(|overlay| overlay.name == name) {
            return;
        }
        let suppressed = self.suppressing && Self::matches_legacy(&name);
        if suppressed {
            debug!("Suppressing overlay '{}' on registration", name);
        }
        self.entries.push(Overlay {
            name,
            visible: true,
            suppressed,
        });
    }

    /// Remove an overlay from the registry
    pub fn unregister(&mut self, name: &str) {
        self.entries.retain(|overlay| overlay.name != name);
    }

    /// Set the host-side visibility of an overlay
    pub fn set_visible(&mut self, name: &str, visible: bool) {
        if let Some(overlay) = self.entries.iter_mut().find(|o| o.name == name) {
            overlay.visible = visible;
        }
    }

    /// Hide every overlay that looks like a legacy joystick
    /// Returns the number of overlays newly suppressed
    pub fn suppress_legacy(&mut self) -> usize {
        self.suppressing = true;
        let mut count = 0;
        for overlay in &mut self.entries {
            if !overlay.suppressed && Self::matches_legacy(&overlay.name) {
                overlay.suppressed = true;
                count += 1;
            }
        }
        if count > 0 {
            info!("Suppressed {} legacy overlay(s)", count);
        }
        count
    }

    /// Undo every suppression
    pub fn restore(&mut self) {
        self.suppressing = false;
        for overlay in &mut self.entries {
            overlay.suppressed = false;
        }
    }

    /// Check whether the host should draw the named overlay
    /// Unknown overlays are reported visible
    pub fn is_visible(&self, name: &str) -> bool {
        self.entries
            .iter()
            .find(|overlay| overlay.name == name)
            .map_or(true, Overlay::is_visible)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Overlay> {
        self.entries.iter()
    }

    fn matches_legacy(name: &str) -> bool {
        let name = name.to_ascii_lowercase();
        LEGACY_OVERLAY_PATTERNS
            .iter()
            .any(|pattern| name.contains(pattern))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_suppress_only_matching() {
        let mut overlays = LegacyOverlays::new();
        overlays.register("Virtual-Joystick-Left");
        overlays.register("score-panel");
        overlays.register("vpad_buttons");

        assert_eq!(overlays.suppress_legacy(), 2);
        assert!(!overlays.is_visible("Virtual-Joystick-Left"));
        assert!(!overlays.is_visible("vpad_buttons"));
        assert!(overlays.is_visible("score-panel"));
    }

    #[test]
    fn test_restore_brings_overlays_back() {
        let mut overlays = LegacyOverlays::new();
        overlays.register("dpad");
        overlays.suppress_legacy();
        overlays.restore();
        assert!(overlays.is_visible("dpad"));
    }

    #[test]
    fn test_late_registration_is_suppressed() {
        let mut overlays = LegacyOverlays::new();
        overlays.suppress_legacy();
        overlays.register("touch-controls-legacy");
        assert!(!overlays.is_visible("touch-controls-legacy"));
    }

    #[test]
    fn test_host_visibility_is_kept_separately() {
        let mut overlays = LegacyOverlays::new();
        overlays.register("joystick");
        overlays.set_visible("joystick", false);
        overlays.suppress_legacy();
        overlays.restore();
        assert!(!overlays.is_visible("joystick"));
    }

    #[test]
    fn test_unknown_overlay_is_visible() {
        let overlays = LegacyOverlays::new();
        assert!(overlays.is_visible("minimap"));
    }

    #[test]
    fn test_duplicate_registration_ignored() {
        let mut overlays = LegacyOverlays::new();
        overlays.register("hud");
        overlays.register("hud");
        assert_eq!(overlays.iter().count(), 1);
        overlays.unregister("hud");
        assert_eq!(overlays.iter().count(), 0);
    }
}
