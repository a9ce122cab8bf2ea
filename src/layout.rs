//! Screen layout computed once at startup.
//!
//! [`FaceLayout`] bundles everything derived from the screen dimensions:
//! center, clock radius, the shape table and the second-hand cache. It is
//! built once when the face is created and is read-only afterwards.

use embedded_graphics::{
    prelude::{Point, Size},
    primitives::Rectangle,
};

use crate::cache::{build_second_cache, SecondCache, SecondEntry};
use crate::config::{ConfigError, FaceConfig, IndicatorConfig};
use crate::geometry::{build_shape_table, ShapeTable};

/// Immutable face geometry.
///
/// # Example
///
/// ```rust
/// use tickface::config::FaceConfig;
/// use tickface::layout::FaceLayout;
///
/// let layout = FaceLayout::from_config(&FaceConfig::default()).unwrap();
/// assert_eq!(layout.radius(), 130);
/// assert_eq!(layout.seconds().len(), 60);
/// ```
#[derive(Clone, Debug)]
pub struct FaceLayout {
    size: Size,
    center: Point,
    radius: u32,
    indicators: IndicatorConfig,
    shapes: ShapeTable,
    seconds: SecondCache,
}

impl FaceLayout {
    /// Validates `config` and builds the layout.
    pub fn from_config(config: &FaceConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let size = config.display.size();
        let center = config.display.center();
        let radius = config.display.radius();
        let shapes = build_shape_table(radius);
        let seconds = build_second_cache(&shapes, center);

        log::debug!(
            "layout {}x{} center ({}, {}) radius {}",
            size.width,
            size.height,
            center.x,
            center.y,
            radius
        );

        Ok(Self {
            size,
            center,
            radius,
            indicators: config.indicators,
            shapes,
            seconds,
        })
    }

    /// Screen size.
    #[inline]
    pub fn size(&self) -> Size {
        self.size
    }

    /// Full-screen rectangle.
    #[inline]
    pub fn bounds(&self) -> Rectangle {
        Rectangle::new(Point::zero(), self.size)
    }

    /// Clock center.
    #[inline]
    pub fn center(&self) -> Point {
        self.center
    }

    /// Clock radius in pixels.
    #[inline]
    pub fn radius(&self) -> u32 {
        self.radius
    }

    /// Enabled indicators.
    #[inline]
    pub fn indicators(&self) -> IndicatorConfig {
        self.indicators
    }

    /// Un-rotated shape corners.
    #[inline]
    pub fn shapes(&self) -> &ShapeTable {
        &self.shapes
    }

    /// Second-hand cache.
    #[inline]
    pub fn seconds(&self) -> &SecondCache {
        &self.seconds
    }

    /// Cache entry for `second`.
    #[inline]
    pub fn second(&self, second: u8) -> &SecondEntry {
        self.seconds.get(second)
    }
}
