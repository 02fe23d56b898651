// Draw list for the on-screen touch controls

use super::QuadBatch;
use crate::engine::input::touch::{TouchButton, TouchControls};
use glam::Vec4;

const IDLE_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.18);
const PRESSED_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.45);
const BORDER_COLOR: Vec4 = Vec4::new(1.0, 1.0, 1.0, 0.6);
const START_COLOR: Vec4 = Vec4::new(0.95, 0.75, 0.2, 0.3);

/// Emit quads for the virtual controls
/// Nothing is drawn until touch is detected, or while the controls are hidden.
pub fn draw_touch_controls(batch: &mut QuadBatch, touch: &TouchControls) {
    if !touch.is_visible() {
        return;
    }
    let Some(layout) = touch.layout() else {
        return;
    };

    for (button, rect) in layout.iter() {
        let fill = match (touch.is_pressed(button), button) {
            (true, _) => PRESSED_COLOR,
            (false, TouchButton::Start) => START_COLOR,
            (false, _) => IDLE_COLOR,
        };
        let border = (rect.size.x * 0.05).max(1.0);
        batch.push_rect(rect.inset(border), fill);
        batch.push_outline(rect, border, BORDER_COLOR);
    }
}
