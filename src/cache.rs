//! Per-second second-hand cache.
//!
//! For each of the 60 second positions the cache holds the rotated hand
//! polygon, the rotated tip-circle center and the clip rectangle that must
//! be touched to erase and redraw the hand. It is built once at layout time
//! and never mutated, so the incremental update path reduces to an array
//! lookup: no trigonometry, no allocation.
//!
//! # Bounding Box
//!
//! The clip rectangle is scanned from the two trailing (tail) corners and
//! the four cardinal extremes of the tip circle. The two leading (tip)
//! corners are skipped: with the stock hand parameters they always lie
//! inside the tip circle. That assumption is tied to
//! [`Shape::Second`](crate::geometry::Shape::Second)'s parameters and is
//! re-checked by a debug assertion whenever the cache is built.
//!
//! # Example
//!
//! ```rust
//! use embedded_graphics::prelude::Point;
//! use tickface::cache::{build_second_cache, CLIP_MARGIN};
//! use tickface::geometry::build_shape_table;
//!
//! let table = build_shape_table(130);
//! let cache = build_second_cache(&table, Point::new(130, 130));
//!
//! let entry = cache.get(0);
//! assert_eq!(entry.circle, Point::new(130, 26));
//! assert!(entry.clip.size.width >= 2 * CLIP_MARGIN);
//! ```

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

use crate::geometry::{Shape, ShapeTable};
use crate::rotation::{second_angle, Rotation};

/// Padding added on every side of a clip rectangle to absorb rounding.
pub const CLIP_MARGIN: u32 = 2;

/// Number of cached second positions.
pub const SECONDS: usize = 60;

/// Precomputed second-hand geometry for one second position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SecondEntry {
    /// Rotated tip-circle center.
    pub circle: Point,
    /// Tip-circle radius in pixels.
    pub circle_radius: u32,
    /// Rotated corners: `[tail-left, tail-right, tip-right, tip-left]`.
    pub polygon: [Point; 4],
    /// Region touched when this hand is drawn, padded by [`CLIP_MARGIN`].
    pub clip: Rectangle,
}

impl SecondEntry {
    /// Bounding box of the tip circle as drawn (diameter `2r + 1`).
    pub fn circle_bounds(&self) -> Rectangle {
        let r = self.circle_radius as i32;
        Rectangle::with_corners(
            self.circle - Point::new(r, r),
            self.circle + Point::new(r, r),
        )
    }
}

/// The 60-entry second-hand cache.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SecondCache {
    entries: [SecondEntry; SECONDS],
}

impl SecondCache {
    /// Entry for `second` (wrapped to 0..60).
    #[inline]
    pub fn get(&self, second: u8) -> &SecondEntry {
        &self.entries[usize::from(second) % SECONDS]
    }

    /// All entries, indexed by second.
    #[inline]
    pub fn entries(&self) -> &[SecondEntry; SECONDS] {
        &self.entries
    }

    /// Always 60.
    #[inline]
    pub fn len(&self) -> usize {
        SECONDS
    }

    /// Never empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Builds the second-hand cache for a clock centered at `center`.
///
/// Pure and deterministic: the same table and center always produce the
/// same entries, bit for bit.
pub fn build_second_cache(table: &ShapeTable, center: Point) -> SecondCache {
    let corners = table.corners(Shape::Second);
    let circle = table.second_circle();
    let radius = table.second_circle_radius();

    let entries = core::array::from_fn(|s| {
        let rotation = Rotation::new(second_angle(s as u8));
        let polygon = rotation.apply_all(&corners, center);
        let circle = rotation.apply(circle, center);
        let clip = clip_rect(&polygon, circle, radius);

        debug_assert!(
            polygon[2..].iter().all(|p| clip_contains(&clip, *p)),
            "second-hand tip escaped its clip at {}s",
            s
        );

        SecondEntry {
            circle,
            circle_radius: radius,
            polygon,
            clip,
        }
    });

    SecondCache { entries }
}

fn clip_rect(polygon: &[Point; 4], circle: Point, radius: u32) -> Rectangle {
    let r = radius as i32;
    let [tail_left, tail_right, _, _] = *polygon;

    let mut min = Point::new(circle.x - r, circle.y - r);
    let mut max = Point::new(circle.x + r, circle.y + r);
    for p in [tail_left, tail_right] {
        min = min.component_min(p);
        max = max.component_max(p);
    }

    let m = CLIP_MARGIN as i32;
    Rectangle::new(
        min - Point::new(m, m),
        Size::new(
            (max.x - min.x) as u32 + 1 + 2 * CLIP_MARGIN,
            (max.y - min.y) as u32 + 1 + 2 * CLIP_MARGIN,
        ),
    )
}

fn clip_contains(clip: &Rectangle, p: Point) -> bool {
    p.x >= clip.top_left.x
        && p.y >= clip.top_left.y
        && p.x < clip.top_left.x + clip.size.width as i32
        && p.y < clip.top_left.y + clip.size.height as i32
}
