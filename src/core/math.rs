// Math utilities shared by the input and layout code

use glam::Vec2;

/// Clamp an axis value into the unit range [-1, 1]
///
/// NaN collapses to 0.0 so a misbehaving source can never poison a merge.
pub fn clamp_axis(value: f32) -> f32 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(-1.0, 1.0)
    }
}

/// Combine two opposing digital inputs into -1.0, 0.0 or 1.0
pub fn digital_axis(negative: bool, positive: bool) -> f32 {
    let mut value = 0.0;
    if negative {
        value -= 1.0;
    }
    if positive {
        value += 1.0;
    }
    value
}

/// True when an analog value is strictly outside the deadzone
pub fn exceeds_deadzone(value: f32, deadzone: f32) -> bool {
    value.abs() > deadzone
}

/// Axis-aligned rectangle in window pixels (origin top-left, y down)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub min: Vec2,
    pub size: Vec2,
}

impl Rect {
    /// Create a rectangle from its top-left corner and size
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            min: Vec2::new(x, y),
            size: Vec2::new(width, height),
        }
    }

    /// Create a rectangle centred on a point
    pub fn centered(center: Vec2, size: Vec2) -> Self {
        Self {
            min: center - size / 2.0,
            size,
        }
    }

    pub fn max(&self) -> Vec2 {
        self.min + self.size
    }

    pub fn center(&self) -> Vec2 {
        self.min + self.size / 2.0
    }

    /// Check if a point is inside the rectangle (edges inclusive)
    pub fn contains(&self, point: Vec2) -> bool {
        let max = self.max();
        point.x >= self.min.x && point.x <= max.x && point.y >= self.min.y && point.y <= max.y
    }

    /// Shrink the rectangle by `amount` on every side
    pub fn inset(&self, amount: f32) -> Self {
        let amount = amount.min(self.size.x / 2.0).min(self.size.y / 2.0);
        Self {
            min: self.min + Vec2::splat(amount),
            size: self.size - Vec2::splat(amount * 2.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clamp_axis() {
        assert_eq!(clamp_axis(0.5), 0.5);
        assert_eq!(clamp_axis(-3.0), -1.0);
        assert_eq!(clamp_axis(2.0), 1.0);
        assert_eq!(clamp_axis(f32::NAN), 0.0);
    }

    #[test]
    fn test_digital_axis() {
        assert_eq!(digital_axis(false, false), 0.0);
        assert_eq!(digital_axis(true, false), -1.0);
        assert_eq!(digital_axis(false, true), 1.0);
        assert_eq!(digital_axis(true, true), 0.0);
    }

    #[test]
    fn test_exceeds_deadzone_is_strict() {
        assert!(!exceeds_deadzone(0.15, 0.15));
        assert!(!exceeds_deadzone(-0.1, 0.15));
        assert!(exceeds_deadzone(-0.16, 0.15));
    }

    #[test]
    fn test_rect_contains() {
        let rect = Rect::new(10.0, 20.0, 30.0, 40.0);
        assert!(rect.contains(Vec2::new(10.0, 20.0)));
        assert!(rect.contains(Vec2::new(40.0, 60.0)));
        assert!(!rect.contains(Vec2::new(41.0, 30.0)));
        assert_eq!(rect.center(), Vec2::new(25.0, 40.0));
    }

    #[test]
    fn test_rect_centered_and_inset() {
        let rect = Rect::centered(Vec2::new(50.0, 50.0), Vec2::new(20.0, 10.0));
        assert_eq!(rect.min, Vec2::new(40.0, 45.0));

        let inner = rect.inset(2.0);
        assert_eq!(inner.size, Vec2::new(16.0, 6.0));
        assert_eq!(inner.center(), rect.center());
    }
}
