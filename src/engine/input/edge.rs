// Frame-coherent edge detection

use super::button::{ButtonSnapshot, LogicalButton};

/// Current and previous frame button state
///
/// `advance` is the only mutation and marks the frame boundary. Every query
/// between two boundaries reads the same pair, so asking twice in one
/// frame can never fire twice.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EdgeTracker {
    current: ButtonSnapshot,
    previous: ButtonSnapshot,
}

impl EdgeTracker {
    /// Create a tracker with everything released on both frames
    pub fn new() -> Self {
        Self::default()
    }

    /// Cross a frame boundary: current becomes previous, `next` becomes current
    pub fn advance(&mut self, next: ButtonSnapshot) {
        self.previous = self.current;
        self.current = next;
    }

    pub fn current(&self) -> &ButtonSnapshot {
        &self.current
    }

    pub fn previous(&self) -> &ButtonSnapshot {
        &self.previous
    }

    /// Check if a button is pressed this frame
    pub fn is_pressed(&self, button: LogicalButton) -> bool {
        self.current.is_pressed(button)
    }

    /// Rising edge between the previous and current frame
    pub fn just_pressed(&self, button: LogicalButton) -> bool {
        self.current.is_pressed(button) && !self.previous.is_pressed(button)
    }

    /// Falling edge between the previous and current frame
    pub fn just_released(&self, button: LogicalButton) -> bool {
        !self.current.is_pressed(button) && self.previous.is_pressed(button)
    }

    /// Check if a button is held (pressed on both frames)
    pub fn is_held(&self, button: LogicalButton) -> bool {
        self.current.is_pressed(button) && self.previous.is_pressed(button)
    }

    /// Forget both frames
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pressed(buttons: &[LogicalButton]) -> ButtonSnapshot {
        ButtonSnapshot::from_pressed(buttons.iter().copied())
    }

    #[test]
    fn test_tracker_creation() {
        let tracker = EdgeTracker::new();
        for button in LogicalButton::ALL {
            assert!(!tracker.is_pressed(button));
            assert!(!tracker.just_pressed(button));
            assert!(!tracker.just_released(button));
        }
    }

    #[test]
    fn test_rising_edge() {
        let mut tracker = EdgeTracker::new();
        tracker.advance(pressed(&[LogicalButton::A]));
        assert!(tracker.just_pressed(LogicalButton::A));
        assert!(!tracker.is_held(LogicalButton::A));
    }

    #[test]
    fn test_repeated_queries_agree_within_frame() {
        let mut tracker = EdgeTracker::new();
        tracker.advance(pressed(&[LogicalButton::A]));
        assert!(tracker.just_pressed(LogicalButton::A));
        assert!(tracker.just_pressed(LogicalButton::A));
        assert!(tracker.just_pressed(LogicalButton::A));
    }

    #[test]
    fn test_holding_fires_once() {
        let mut tracker = EdgeTracker::new();
        let held = pressed(&[LogicalButton::Start]);

        let mut fired = 0;
        for _ in 0..10 {
            tracker.advance(held);
            if tracker.just_pressed(LogicalButton::Start) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
        assert!(tracker.is_held(LogicalButton::Start));
    }

    #[test]
    fn test_falling_edge() {
        let mut tracker = EdgeTracker::new();
        tracker.advance(pressed(&[LogicalButton::B]));
        tracker.advance(ButtonSnapshot::empty());
        assert!(tracker.just_released(LogicalButton::B));
        assert!(!tracker.just_pressed(LogicalButton::B));

        tracker.advance(ButtonSnapshot::empty());
        assert!(!tracker.just_released(LogicalButton::B));
    }

    #[test]
    fn test_reset() {
        let mut tracker = EdgeTracker::new();
        tracker.advance(pressed(&[LogicalButton::Lt]));
        tracker.reset();
        assert!(!tracker.is_pressed(LogicalButton::Lt));
        assert!(!tracker.just_pressed(LogicalButton::Lt));
    }
}
