//! Clock shape definitions and the shape coordinate table.
//!
//! Every shape on the face (tick marks and hands) is a trapezoid described
//! in percent of the clock *diameter*. [`build_shape_table`] converts those
//! percentages to whole pixels once, at layout time, and derives the four
//! un-rotated corners of each shape pointing at 12 o'clock.
//!
//! # Coordinate Convention
//!
//! Offsets are relative to the clock center in screen orientation: `x` grows
//! to the right and `y` grows downward, so a hand pointing at 12 has a
//! negative tip `y`. Corners are stored in the order
//! `[tail-left, tail-right, tip-right, tip-left]`.
//!
//! ```text
//!        tip-left  tip-right
//!             +----+          <- y = tail - length
//!             |    |
//!             |    |
//!     ........|.o..|.......   <- clock center (y = 0)
//!             +----+          <- y = tail
//!        tail-left tail-right
//! ```
//!
//! # Example
//!
//! ```rust
//! use tickface::geometry::{build_shape_table, Shape};
//!
//! let table = build_shape_table(130);
//! let [tail_left, tail_right, _, _] = table.corners(Shape::Second);
//! assert_eq!(tail_left.y, tail_right.y);
//! assert!(table.corners(Shape::Second)[2].y < 0); // tip points up
//! ```

use embedded_graphics::prelude::Point;

/// Clock radius (in pixels) from which the second hand gets its one-pixel
/// widening on odd widths.
pub const LARGE_FACE_RADIUS: u32 = 130;

/// Second-hand tip circle radius, in percent of the clock diameter.
pub const SECOND_CIRCLE_PCT: f32 = 3.0;

/// Rounds half-up: `floor(v + 0.5)`.
///
/// Used for every pixel snap in the crate (shape table, rotation, cache).
/// Never substitute round-half-to-even here; hands sharing the rotation
/// logic must land on identical pixels.
///
/// ```rust
/// use tickface::geometry::round_half_up;
///
/// assert_eq!(round_half_up(2.5), 3);
/// assert_eq!(round_half_up(2.49), 2);
/// assert_eq!(round_half_up(-2.5), -2);
/// ```
#[inline]
pub fn round_half_up(v: f64) -> i32 {
    libm::floor(v + 0.5) as i32
}

/// Converts a percent-of-diameter parameter to pixels for `radius`.
#[inline]
pub fn pct_to_px(pct: f32, radius: u32) -> i32 {
    round_half_up(f64::from(pct) * f64::from(radius) / 50.0)
}

/// A shape drawn on the clock face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum Shape {
    /// Hour marker on the rim (every fifth position).
    BigTick,
    /// Minute marker on the rim.
    SmallTick,
    /// Hour hand.
    Hour,
    /// Minute hand.
    Minute,
    /// Second hand (stem only; the tip circle is stored separately).
    Second,
}

impl Shape {
    /// Number of shapes.
    pub const COUNT: usize = 5;

    /// All shapes, in table order.
    pub const ALL: [Shape; Shape::COUNT] = [
        Shape::BigTick,
        Shape::SmallTick,
        Shape::Hour,
        Shape::Minute,
        Shape::Second,
    ];

    /// Index of this shape in a [`ShapeTable`].
    #[inline]
    pub const fn index(self) -> usize {
        match self {
            Shape::BigTick => 0,
            Shape::SmallTick => 1,
            Shape::Hour => 2,
            Shape::Minute => 3,
            Shape::Second => 4,
        }
    }

    /// Percent-of-diameter parameters for this shape.
    pub const fn spec(self) -> ShapeSpec {
        match self {
            Shape::BigTick => ShapeSpec::new(8.0, 3.0, 3.0, -42.0),
            Shape::SmallTick => ShapeSpec::new(4.0, 1.2, 1.2, -46.0),
            Shape::Hour => ShapeSpec::new(32.0, 5.0, 3.6, 6.0),
            Shape::Minute => ShapeSpec::new(46.0, 4.0, 2.6, 6.0),
            Shape::Second => ShapeSpec::new(50.0, 1.6, 1.0, 10.0),
        }
    }
}

/// Trapezoid parameters in percent of the clock diameter.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ShapeSpec {
    /// Distance from tail to tip.
    pub length: f32,
    /// Width at the tail end.
    pub tail_width: f32,
    /// Width at the tip end.
    pub tip_width: f32,
    /// Signed offset of the tail from the clock center, positive toward 6
    /// o'clock. Hands overhang the pivot (positive); ticks sit on the rim
    /// (negative).
    pub tail_offset: f32,
}

impl ShapeSpec {
    /// Creates a new parameter set.
    pub const fn new(length: f32, tail_width: f32, tip_width: f32, tail_offset: f32) -> Self {
        Self {
            length,
            tail_width,
            tip_width,
            tail_offset,
        }
    }
}

/// Un-rotated corner offsets for every shape, scaled to one clock radius.
///
/// Immutable after layout and shared by every rotation of a shape.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ShapeTable {
    radius: u32,
    corners: [[Point; 4]; Shape::COUNT],
    second_circle: Point,
    second_circle_radius: u32,
}

impl ShapeTable {
    /// The clock radius this table was built for.
    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Corner offsets of `shape`: `[tail-left, tail-right, tip-right, tip-left]`.
    #[inline]
    pub fn corners(&self, shape: Shape) -> [Point; 4] {
        self.corners[shape.index()]
    }

    /// Offset of the second-hand tip circle center (on the hand's axis, at
    /// the tip).
    #[inline]
    pub fn second_circle(&self) -> Point {
        self.second_circle
    }

    /// Radius of the second-hand tip circle in pixels.
    #[inline]
    pub fn second_circle_radius(&self) -> u32 {
        self.second_circle_radius
    }
}

/// Builds the shape coordinate table for a clock of `radius` pixels.
///
/// `radius` is half the smaller screen dimension. A zero radius is a
/// configuration error caught by [`FaceConfig::validate`] before layout.
///
/// [`FaceConfig::validate`]: crate::config::FaceConfig::validate
pub fn build_shape_table(radius: u32) -> ShapeTable {
    let mut corners = [[Point::zero(); 4]; Shape::COUNT];
    for shape in Shape::ALL {
        corners[shape.index()] = trapezoid(shape, radius);
    }

    let second = corners[Shape::Second.index()];
    let tip_y = second[2].y;

    ShapeTable {
        radius,
        corners,
        second_circle: Point::new(0, tip_y),
        second_circle_radius: pct_to_px(SECOND_CIRCLE_PCT, radius).max(1) as u32,
    }
}

fn trapezoid(shape: Shape, radius: u32) -> [Point; 4] {
    let spec = shape.spec();
    let length = pct_to_px(spec.length, radius);
    let tail = pct_to_px(spec.tail_offset, radius);
    let tip = tail - length;

    let (tail_left, tail_right) = edge(shape, pct_to_px(spec.tail_width, radius), radius);
    let (tip_left, tip_right) = edge(shape, pct_to_px(spec.tip_width, radius), radius);

    [
        Point::new(tail_left, tail),
        Point::new(tail_right, tail),
        Point::new(tip_right, tip),
        Point::new(tip_left, tip),
    ]
}

/// Left and right x offsets for an edge of `width` pixels.
///
/// The span is `2 * (width / 2)` so both sides stay symmetric about the hand
/// axis. On large faces an odd second-hand width would otherwise lose a
/// pixel against the tip circle; that side is widened by one.
fn edge(shape: Shape, width: i32, radius: u32) -> (i32, i32) {
    let half = width / 2;
    let widen = shape == Shape::Second && radius >= LARGE_FACE_RADIUS && width % 2 == 1;
    (-half, half + i32::from(widen))
}
