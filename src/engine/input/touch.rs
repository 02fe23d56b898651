// Virtual on-screen controls driven by touch events
//
// The surface only turns touch phases into a boolean press map. It never
// looks at other sources and keeps no history; edges belong to the unifier.

use super::button::{ButtonSnapshot, DirectionVector, LogicalButton};
use super::options::TouchMode;
use super::overlay::LegacyOverlays;
use crate::core::math::Rect;
use glam::Vec2;
use log::{debug, info};
use std::collections::HashMap;
use winit::event::TouchPhase;

/// Buttons drawn on the touch surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TouchButton {
    Up,
    Down,
    Left,
    Right,
    A,
    B,
    Start,
}

impl TouchButton {
    pub const ALL: [TouchButton; 7] = [
        Self::Up,
        Self::Down,
        Self::Left,
        Self::Right,
        Self::A,
        Self::B,
        Self::Start,
    ];

    /// Logical button this control reports as
    pub fn logical(self) -> LogicalButton {
        match self {
            Self::Up => LogicalButton::Up,
            Self::Down => LogicalButton::Down,
            Self::Left => LogicalButton::Left,
            Self::Right => LogicalButton::Right,
            Self::A => LogicalButton::A,
            Self::B => LogicalButton::B,
            Self::Start => LogicalButton::Start,
        }
    }
}

/// Screen placement of every touch button
#[derive(Debug, Clone, PartialEq)]
pub struct TouchLayout {
    buttons: Vec<(TouchButton, Rect)>,
}

impl TouchLayout {
    /// Lay out the controls for a window of the given size
    ///
    /// D-pad bottom-left, A/B bottom-right, Start bottom-centre. Sizes scale
    /// with the shorter window edge so the pad stays thumb-sized.
    pub fn for_viewport(width: f32, height: f32) -> Self {
        let unit = width.min(height).max(1.0) * 0.09;
        let margin = unit * 0.6;

        let dpad_center = Vec2::new(margin + unit * 1.5, height - margin - unit * 1.5);
        let cell = Vec2::splat(unit);

        let a_center = Vec2::new(width - margin - unit * 0.75, height - margin - unit * 1.9);
        let b_center = Vec2::new(width - margin - unit * 2.4, height - margin - unit * 0.9);
        let start_center = Vec2::new(width / 2.0, height - margin - unit * 0.4);

        Self {
            buttons: vec![
                (TouchButton::Up, Rect::centered(dpad_center - Vec2::new(0.0, unit), cell)),
                (TouchButton::Down, Rect::centered(dpad_center + Vec2::new(0.0, unit), cell)),
                (TouchButton::Left, Rect::centered(dpad_center - Vec2::new(unit, 0.0), cell)),
                (TouchButton::Right, Rect::centered(dpad_center + Vec2::new(unit, 0.0), cell)),
                (TouchButton::A, Rect::centered(a_center, Vec2::splat(unit * 1.3))),
                (TouchButton::B, Rect::centered(b_center, Vec2::splat(unit * 1.3))),
                (
                    TouchButton::Start,
                    Rect::centered(start_center, Vec2::new(unit * 1.6, unit * 0.7)),
                ),
            ],
        }
    }

    /// Find the button under a point
    pub fn hit_test(&self, point: Vec2) -> Option<TouchButton> {
        self.buttons
            .iter()
            .find(|(_, rect)| rect.contains(point))
            .map(|(button, _)| *button)
    }

    /// Get the rectangle of a button
    pub fn rect(&self, button: TouchButton) -> Option<Rect> {
        self.buttons
            .iter()
            .find(|(b, _)| *b == button)
            .map(|(_, rect)| *rect)
    }

    pub fn iter(&self) -> impl Iterator<Item = (TouchButton, Rect)> + '_ {
        self.buttons.iter().copied()
    }
}

/// Touch control surface
#[derive(Debug)]
pub struct TouchControls {
    mode: TouchMode,
    hide_existing: bool,
    viewport: Vec2,

    /// Built once touch capability is known
    layout: Option<TouchLayout>,

    /// Which button each live touch started on
    active: HashMap<u64, TouchButton>,

    visible: bool,
    overlays: LegacyOverlays,
}

impl TouchControls {
    /// Create the surface; with `TouchMode::Enabled` the layout is built now
    pub fn new(mode: TouchMode, hide_existing: bool, viewport: Vec2) -> Self {
        let mut controls = Self {
            mode,
            hide_existing,
            viewport,
            layout: None,
            active: HashMap::new(),
            visible: true,
            overlays: LegacyOverlays::new(),
        };
        if mode == TouchMode::Enabled {
            controls.build();
        }
        controls
    }

    /// Check whether the controls exist (touch capability detected)
    pub fn is_available(&self) -> bool {
        self.layout.is_some()
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn layout(&self) -> Option<&TouchLayout> {
        self.layout.as_ref()
    }

    pub fn overlays(&self) -> &LegacyOverlays {
        &self.overlays
    }

    pub fn overlays_mut(&mut self) -> &mut LegacyOverlays {
        &mut self.overlays
    }

    /// Feed a window touch event
    /// Returns true when the event landed on (or released) a control
    pub fn handle_touch(&mut self, id: u64, phase: TouchPhase, position: Vec2) -> bool {
        if self.mode == TouchMode::Disabled {
            return false;
        }
        if self.layout.is_none() && self.mode == TouchMode::Auto {
            info!("Touch input detected, building virtual controls");
            self.build();
        }

        match phase {
            TouchPhase::Started => {
                if !self.visible {
                    return false;
                }
                let hit = self.layout.as_ref().and_then(|l| l.hit_test(position));
                match hit {
                    Some(button) => {
                        debug!("Touch {} pressed {:?}", id, button);
                        self.active.insert(id, button);
                        true
                    }
                    None => false,
                }
            }
            // Bound to the starting button until the touch lifts
            TouchPhase::Moved => self.active.contains_key(&id),
            // Platform cancellation must never leave a button stuck down
            TouchPhase::Ended | TouchPhase::Cancelled => self.release(id),
        }
    }

    /// Check if a touch button is held by any touch
    pub fn is_pressed(&self, button: TouchButton) -> bool {
        self.active.values().any(|held| *held == button)
    }

    /// Current press map in logical buttons
    pub fn buttons(&self) -> ButtonSnapshot {
        ButtonSnapshot::from_pressed(self.active.values().map(|button| button.logical()))
    }

    /// Digital direction from the D-pad, opposing directions cancel
    pub fn direction(&self) -> DirectionVector {
        self.buttons().digital_direction()
    }

    /// Re-lay out after a window resize, keeping held touches
    pub fn resize(&mut self, width: f32, height: f32) {
        self.viewport = Vec2::new(width, height);
        if self.layout.is_some() {
            self.layout = Some(TouchLayout::for_viewport(width, height));
        }
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    /// Hide the controls and release everything they hold
    pub fn hide(&mut self) {
        self.visible = false;
        self.active.clear();
    }

    /// Remove the controls entirely and restore suppressed overlays
    pub fn teardown(&mut self) {
        self.active.clear();
        self.layout = None;
        self.visible = false;
        self.mode = TouchMode::Disabled;
        self.overlays.restore();
    }

    fn build(&mut self) {
        self.layout = Some(TouchLayout::for_viewport(self.viewport.x, self.viewport.y));
        if self.hide_existing {
            self.overlays.suppress_legacy();
        }
    }

    fn release(&mut self, id: u64) -> bool {
        match self.active.remove(&id) {
            Some(button) => {
                debug!("Touch {} released {:?}", id, button);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Vec2 = Vec2::new(1280.0, 720.0);

    fn controls() -> TouchControls {
        TouchControls::new(TouchMode::Enabled, true, VIEWPORT)
    }

    fn center_of(controls: &TouchControls, button: TouchButton) -> Vec2 {
        controls.layout().unwrap().rect(button).unwrap().center()
    }

    #[test]
    fn test_disabled_mode_builds_nothing() {
        let mut controls = TouchControls::new(TouchMode::Disabled, true, VIEWPORT);
        assert!(!controls.is_available());
        assert!(!controls.handle_touch(1, TouchPhase::Started, Vec2::new(10.0, 700.0)));
        assert!(!controls.is_available());
        assert!(controls.buttons().is_empty());
    }

    #[test]
    fn test_auto_mode_builds_on_first_touch() {
        let mut controls = TouchControls::new(TouchMode::Auto, true, VIEWPORT);
        assert!(!controls.is_available());

        controls.handle_touch(1, TouchPhase::Started, Vec2::new(640.0, 10.0));
        assert!(controls.is_available());
    }

    #[test]
    fn test_layout_has_every_button_without_overlap() {
        let layout = TouchLayout::for_viewport(VIEWPORT.x, VIEWPORT.y);
        for button in TouchButton::ALL {
            let rect = layout.rect(button).unwrap();
            assert_eq!(layout.hit_test(rect.center()), Some(button));
        }
    }

    #[test]
    fn test_left_only_gives_negative_x() {
        let mut controls = controls();
        let left = center_of(&controls, TouchButton::Left);
        controls.handle_touch(1, TouchPhase::Started, left);

        let direction = controls.direction();
        assert_eq!(direction, DirectionVector { x: -1.0, y: 0.0 });
    }

    #[test]
    fn test_opposing_directions_cancel() {
        let mut controls = controls();
        let left = center_of(&controls, TouchButton::Left);
        let right = center_of(&controls, TouchButton::Right);
        controls.handle_touch(1, TouchPhase::Started, left);
        controls.handle_touch(2, TouchPhase::Started, right);

        assert_eq!(controls.direction().x, 0.0);
    }

    #[test]
    fn test_cancel_matches_release() {
        let sequences: [&[TouchPhase]; 3] = [
            &[TouchPhase::Started],
            &[TouchPhase::Started, TouchPhase::Moved],
            &[TouchPhase::Started, TouchPhase::Moved, TouchPhase::Moved],
        ];

        for prefix in sequences {
            let mut released = controls();
            let mut cancelled = controls();
            let a = center_of(&released, TouchButton::A);

            for phase in prefix {
                released.handle_touch(7, *phase, a);
                cancelled.handle_touch(7, *phase, a);
            }
            released.handle_touch(7, TouchPhase::Ended, a);
            cancelled.handle_touch(7, TouchPhase::Cancelled, a);

            assert_eq!(released.buttons(), cancelled.buttons());
            assert!(!cancelled.is_pressed(TouchButton::A));
        }
    }

    #[test]
    fn test_moving_off_button_keeps_it_held() {
        let mut controls = controls();
        let b = center_of(&controls, TouchButton::B);
        controls.handle_touch(3, TouchPhase::Started, b);
        assert!(controls.handle_touch(3, TouchPhase::Moved, Vec2::new(640.0, 10.0)));
        assert!(controls.buttons().is_pressed(LogicalButton::B));
    }

    #[test]
    fn test_button_held_until_last_touch_lifts() {
        let mut controls = controls();
        let start = center_of(&controls, TouchButton::Start);
        controls.handle_touch(1, TouchPhase::Started, start);
        controls.handle_touch(2, TouchPhase::Started, start);

        controls.handle_touch(1, TouchPhase::Ended, start);
        assert!(controls.is_pressed(TouchButton::Start));

        controls.handle_touch(2, TouchPhase::Cancelled, start);
        assert!(!controls.is_pressed(TouchButton::Start));
    }

    #[test]
    fn test_touch_outside_controls_is_ignored() {
        let mut controls = controls();
        assert!(!controls.handle_touch(1, TouchPhase::Started, Vec2::new(640.0, 10.0)));
        assert!(controls.buttons().is_empty());
    }

    #[test]
    fn test_hide_releases_and_blocks_new_presses() {
        let mut controls = controls();
        let a = center_of(&controls, TouchButton::A);
        controls.handle_touch(1, TouchPhase::Started, a);
        controls.hide();
        assert!(controls.buttons().is_empty());

        controls.handle_touch(2, TouchPhase::Started, a);
        assert!(controls.buttons().is_empty());

        controls.show();
        controls.handle_touch(3, TouchPhase::Started, a);
        assert!(controls.is_pressed(TouchButton::A));
    }

    #[test]
    fn test_build_suppresses_legacy_overlays() {
        let mut controls = TouchControls::new(TouchMode::Auto, true, VIEWPORT);
        controls.overlays_mut().register("legacy-joystick");
        assert!(controls.overlays().is_visible("legacy-joystick"));

        controls.handle_touch(1, TouchPhase::Started, Vec2::ZERO);
        assert!(!controls.overlays().is_visible("legacy-joystick"));

        controls.teardown();
        assert!(controls.overlays().is_visible("legacy-joystick"));
        assert!(!controls.is_available());
    }

    #[test]
    fn test_hide_existing_off_leaves_overlays() {
        let mut controls = TouchControls::new(TouchMode::Auto, false, VIEWPORT);
        controls.overlays_mut().register("joystick");
        controls.handle_touch(1, TouchPhase::Started, Vec2::ZERO);
        assert!(controls.overlays().is_visible("joystick"));
    }

    #[test]
    fn test_resize_keeps_held_touch() {
        let mut controls = controls();
        let up = center_of(&controls, TouchButton::Up);
        controls.handle_touch(1, TouchPhase::Started, up);
        controls.resize(800.0, 600.0);

        assert!(controls.is_pressed(TouchButton::Up));
        let layout = controls.layout().unwrap();
        assert!(layout.rect(TouchButton::Up).unwrap().max().y <= 600.0);
    }
}
