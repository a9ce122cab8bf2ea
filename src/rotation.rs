//! Rotate-and-translate primitive shared by the cache builder and the
//! compositors.
//!
//! Angles are clockwise from 12 o'clock in radians, which in screen
//! coordinates (y down) is the ordinary rotation matrix:
//!
//! ```text
//! x' = x·cos θ − y·sin θ + origin.x
//! y' = x·sin θ + y·cos θ + origin.y
//! ```
//!
//! Both results are snapped with [`round_half_up`].
//!
//! # Example
//!
//! ```rust
//! use embedded_graphics::prelude::Point;
//! use tickface::rotation::{rotate, second_angle};
//!
//! let center = Point::new(130, 130);
//! // 15 seconds: straight up becomes straight right
//! let p = rotate(Point::new(0, -100), second_angle(15), center);
//! assert_eq!(p, Point::new(230, 130));
//! ```

use core::f64::consts::TAU;

use embedded_graphics::prelude::Point;

use crate::geometry::round_half_up;

/// Angle of the second hand (or a tick mark) at position `second`.
#[inline]
pub fn second_angle(second: u8) -> f64 {
    f64::from(second % 60) * (TAU / 60.0)
}

/// Angle of the minute hand. Hands tick, so only whole minutes count.
#[inline]
pub fn minute_angle(minute: u8) -> f64 {
    second_angle(minute)
}

/// Angle of the hour hand, advanced by the minutes past the hour.
#[inline]
pub fn hour_angle(hour: u8, minute: u8) -> f64 {
    let minutes = u32::from(hour % 12) * 60 + u32::from(minute % 60);
    f64::from(minutes) * (TAU / 720.0)
}

/// A precomputed rotation (sine and cosine evaluated once per angle).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Rotation {
    sin: f64,
    cos: f64,
}

impl Rotation {
    /// Evaluates the trigonometry for `angle` radians.
    pub fn new(angle: f64) -> Self {
        Self {
            sin: libm::sin(angle),
            cos: libm::cos(angle),
        }
    }

    /// Rotates `point` (an offset from the pivot) and translates it to `origin`.
    #[inline]
    pub fn apply(&self, point: Point, origin: Point) -> Point {
        let x = f64::from(point.x);
        let y = f64::from(point.y);
        Point::new(
            round_half_up(x * self.cos - y * self.sin + f64::from(origin.x)),
            round_half_up(x * self.sin + y * self.cos + f64::from(origin.y)),
        )
    }

    /// Rotates all four corners of a shape.
    #[inline]
    pub fn apply_all(&self, corners: &[Point; 4], origin: Point) -> [Point; 4] {
        [
            self.apply(corners[0], origin),
            self.apply(corners[1], origin),
            self.apply(corners[2], origin),
            self.apply(corners[3], origin),
        ]
    }
}

/// Rotates a single `point` by `angle` about `origin`.
pub fn rotate(point: Point, angle: f64, origin: Point) -> Point {
    Rotation::new(angle).apply(point, origin)
}

/// Rotates a four-corner shape by `angle` about `origin`.
pub fn rotate_polygon(corners: &[Point; 4], angle: f64, origin: Point) -> [Point; 4] {
    Rotation::new(angle).apply_all(corners, origin)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::{build_shape_table, Shape};

    #[test]
    fn zero_angle_is_pure_translation() {
        let origin = Point::new(130, 130);
        let p = rotate(Point::new(-3, -104), 0.0, origin);
        assert_eq!(p, Point::new(127, 26));
    }

    #[test]
    fn quarter_turns() {
        let origin = Point::new(100, 100);
        let up = Point::new(0, -50);
        assert_eq!(rotate(up, second_angle(15), origin), Point::new(150, 100));
        assert_eq!(rotate(up, second_angle(30), origin), Point::new(100, 150));
        assert_eq!(rotate(up, second_angle(45), origin), Point::new(50, 100));
    }

    #[test]
    fn full_turn_is_periodic() {
        let table = build_shape_table(130);
        let origin = Point::new(130, 130);
        for shape in Shape::ALL {
            for s in 0..60u8 {
                let a = second_angle(s);
                assert_eq!(
                    rotate_polygon(&table.corners(shape), a, origin),
                    rotate_polygon(&table.corners(shape), a + TAU, origin),
                    "{:?} at {}",
                    shape,
                    s
                );
            }
        }
    }

    #[test]
    fn hour_angle_advances_with_minutes() {
        assert_eq!(hour_angle(0, 0), 0.0);
        assert!((hour_angle(3, 0) - TAU / 4.0).abs() < 1e-12);
        assert!((hour_angle(15, 0) - TAU / 4.0).abs() < 1e-12);
        assert!(hour_angle(3, 30) > hour_angle(3, 0));
        assert!(hour_angle(3, 59) < hour_angle(4, 0));
    }

    #[test]
    fn second_angle_wraps() {
        assert_eq!(second_angle(60), second_angle(0));
        assert_eq!(minute_angle(7), second_angle(7));
    }
}
