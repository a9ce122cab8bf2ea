//! Mock implementations for testing without hardware.
//!
//! This module provides test doubles for the display and the host traits,
//! enabling development and testing on desktop without a watch.
//!
//! # Available Mocks
//!
//! | Mock | Trait | Purpose |
//! |------|-------|---------|
//! | [`MockPanel`] | [`DrawTarget`] | In-memory display that records every write |
//! | [`MockClock`] | [`WallClock`] | Controllable time source |
//! | [`MockStatus`] | [`StatusSource`] | Settable indicator values |
//!
//! # Example
//!
//! ```rust
//! use tickface::{WatchFace, ClockReading};
//! use tickface::compositor::BufferedCompositor;
//! use tickface::config::FaceConfig;
//! use tickface::frame::FrameInputs;
//! use tickface::hal::MockPanel;
//! use tickface::palette::Palette;
//!
//! let config = FaceConfig::default();
//! let mut face = WatchFace::<BufferedCompositor>::new(&config).unwrap();
//! let mut panel = MockPanel::new(config.display.size());
//!
//! let frame = FrameInputs::new(ClockReading::new(10, 8, 42), Palette::default());
//! let outcome = face.on_update(&mut panel, &frame).unwrap();
//!
//! assert!(outcome.full_redraw);
//! assert!(panel.write_count() > 0);
//! ```
//!
//! [`DrawTarget`]: embedded_graphics::prelude::DrawTarget
//! [`WallClock`]: crate::traits::WallClock
//! [`StatusSource`]: crate::traits::StatusSource

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::{Rgb565, RgbColor},
    prelude::{DrawTarget, OriginDimensions, Point, Size},
    primitives::Rectangle,
    Pixel,
};

use crate::traits::{ClockReading, Indicators, StatusSource, WallClock};

// ============================================================================
// Display Mock
// ============================================================================

/// Instrumented in-memory display.
///
/// Stores pixels like a real framebuffer and additionally records how many
/// pixel writes happened and the bounding box of everything written since
/// the last [`reset_tracking`](Self::reset_tracking). Writes outside the
/// panel are counted in [`out_of_bounds`](Self::out_of_bounds) and included
/// in the bounding box, so a stray write can never hide.
///
/// # Example
///
/// ```rust
/// use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
/// use tickface::hal::MockPanel;
///
/// let mut panel = MockPanel::new(Size::new(16, 16));
/// let area = Rectangle::new(Point::new(4, 4), Size::new(3, 2));
/// panel.fill_solid(&area, Rgb565::RED).unwrap();
///
/// assert_eq!(panel.write_count(), 6);
/// assert_eq!(panel.touched(), Some(area));
///
/// panel.reset_tracking();
/// assert_eq!(panel.touched(), None);
/// assert_eq!(panel.pixel(Point::new(4, 4)), Some(Rgb565::RED)); // pixels kept
/// ```
#[derive(Clone, Debug)]
pub struct MockPanel {
    size: Size,
    pixels: Vec<Rgb565>,
    writes: usize,
    out_of_bounds: usize,
    min: Point,
    max: Point,
}

impl MockPanel {
    /// Creates a black panel of `size`.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![Rgb565::BLACK; (size.width * size.height) as usize],
            writes: 0,
            out_of_bounds: 0,
            min: Point::new(i32::MAX, i32::MAX),
            max: Point::new(i32::MIN, i32::MIN),
        }
    }

    /// Creates a square panel.
    pub fn square(side: u32) -> Self {
        Self::new(Size::new(side, side))
    }

    /// Color at `p`, if inside the panel.
    pub fn pixel(&self, p: Point) -> Option<Rgb565> {
        self.index(p).map(|i| self.pixels[i])
    }

    /// All pixels, row-major.
    pub fn frame(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// Number of pixels equal to `color`.
    pub fn count_color(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|c| **c == color).count()
    }

    /// Pixel writes since the last reset.
    pub fn write_count(&self) -> usize {
        self.writes
    }

    /// Writes that landed outside the panel since the last reset.
    pub fn out_of_bounds(&self) -> usize {
        self.out_of_bounds
    }

    /// Bounding box of all writes since the last reset.
    pub fn touched(&self) -> Option<Rectangle> {
        if self.writes == 0 {
            return None;
        }
        Some(Rectangle::with_corners(self.min, self.max))
    }

    /// Whether every write since the last reset fell inside `area`.
    pub fn touched_within(&self, area: &Rectangle) -> bool {
        let Some(touched) = self.touched() else {
            return true;
        };
        let Some(area_max) = area.bottom_right() else {
            return false;
        };
        touched.top_left.x >= area.top_left.x
            && touched.top_left.y >= area.top_left.y
            && self.max.x <= area_max.x
            && self.max.y <= area_max.y
    }

    /// Clears the write counters and bounding box (pixels are kept).
    pub fn reset_tracking(&mut self) {
        self.writes = 0;
        self.out_of_bounds = 0;
        self.min = Point::new(i32::MAX, i32::MAX);
        self.max = Point::new(i32::MIN, i32::MIN);
    }

    fn index(&self, p: Point) -> Option<usize> {
        if p.x < 0 || p.y < 0 || p.x as u32 >= self.size.width || p.y as u32 >= self.size.height {
            return None;
        }
        Some(p.y as usize * self.size.width as usize + p.x as usize)
    }
}

impl OriginDimensions for MockPanel {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for MockPanel {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            self.writes += 1;
            self.min = self.min.component_min(p);
            self.max = self.max.component_max(p);
            match self.index(p) {
                Some(i) => self.pixels[i] = color,
                None => self.out_of_bounds += 1,
            }
        }
        Ok(())
    }
}

// ============================================================================
// Host Mocks
// ============================================================================

/// Mock clock for testing.
///
/// Provides a controllable time source for testing time-dependent behavior.
///
/// # Example
///
/// ```rust
/// use tickface::hal::MockClock;
/// use tickface::traits::{ClockReading, WallClock};
///
/// let mut clock = MockClock::new(ClockReading::new(14, 59, 58));
/// clock.advance(3);
/// assert_eq!(clock.now(), ClockReading::new(15, 0, 1));
/// ```
#[derive(Debug, Default)]
pub struct MockClock {
    reading: ClockReading,
}

impl MockClock {
    /// Creates a mock clock at `reading`.
    pub fn new(reading: ClockReading) -> Self {
        Self { reading }
    }

    /// Sets the current time.
    pub fn set(&mut self, reading: ClockReading) {
        self.reading = reading;
    }

    /// Advances the clock by whole seconds.
    pub fn advance(&mut self, seconds: u32) {
        for _ in 0..seconds {
            self.reading = self.reading.next_second();
        }
    }
}

impl WallClock for MockClock {
    fn now(&self) -> ClockReading {
        self.reading
    }
}

/// Mock status source with directly settable values.
///
/// # Example
///
/// ```rust
/// use tickface::hal::MockStatus;
/// use tickface::traits::StatusSource;
///
/// let status = MockStatus::new().with_battery(15).with_notifications(3);
/// assert_eq!(status.indicators().battery_percent, Some(15));
/// assert_eq!(status.indicators().notifications, 3);
/// ```
#[derive(Debug, Default)]
pub struct MockStatus {
    /// Values returned by [`StatusSource::indicators`].
    pub indicators: Indicators,
}

impl MockStatus {
    /// Creates a status source with default (empty) indicators.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the battery percentage
    pub fn with_battery(mut self, percent: u8) -> Self {
        self.indicators.battery_percent = Some(percent.min(100));
        self
    }

    /// Set the notification count
    pub fn with_notifications(mut self, count: u8) -> Self {
        self.indicators.notifications = count;
        self
    }

    /// Set phone connection state
    pub fn with_phone(mut self, connected: bool) -> Self {
        self.indicators.phone_connected = connected;
        self
    }

    /// Set do-not-disturb
    pub fn with_do_not_disturb(mut self, dnd: bool) -> Self {
        self.indicators.do_not_disturb = dnd;
        self
    }

    /// Set the day of month
    pub fn with_day(mut self, day: u8) -> Self {
        self.indicators.day_of_month = Some(day);
        self
    }
}

impl StatusSource for MockStatus {
    fn indicators(&self) -> Indicators {
        self.indicators
    }
}
