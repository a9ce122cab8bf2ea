//! Per-tick input snapshot.
//!
//! Everything a full redraw reads from outside the core travels in one
//! immutable [`FrameInputs`] value: the time, the palette, the accent color
//! and the status indicators. Nothing is read from ambient global state.
//!
//! # Example
//!
//! ```rust
//! use tickface::frame::FrameInputs;
//! use tickface::hal::{MockClock, MockStatus};
//! use tickface::palette::{ColorRole, StaticTheme};
//! use tickface::ClockReading;
//!
//! let clock = MockClock::new(ClockReading::new(10, 8, 42));
//! let frame = FrameInputs::gather(&StaticTheme::default(), &clock, &MockStatus::new(), true);
//!
//! assert_eq!(frame.reading.minute, 8);
//! assert_eq!(frame.accent, frame.palette[ColorRole::Accent]);
//! ```

use embedded_graphics::pixelcolor::Rgb565;

use crate::palette::{ColorRole, Palette, ThemeContext};
use crate::traits::{ClockReading, Indicators, StatusSource, ThemeSource, WallClock};

/// Immutable inputs for one tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrameInputs {
    /// Time to display.
    pub reading: ClockReading,
    /// Colors for this frame.
    pub palette: Palette,
    /// Second-hand color.
    pub accent: Rgb565,
    /// Status indicator values.
    pub indicators: Indicators,
}

impl FrameInputs {
    /// Creates inputs with the palette's accent and no indicator data.
    pub fn new(reading: ClockReading, palette: Palette) -> Self {
        Self {
            reading,
            palette,
            accent: palette[ColorRole::Accent],
            indicators: Indicators::default(),
        }
    }

    /// Set indicator values
    pub fn with_indicators(mut self, indicators: Indicators) -> Self {
        self.indicators = indicators;
        self
    }

    /// Override the accent color
    pub fn with_accent(mut self, accent: Rgb565) -> Self {
        self.accent = accent;
        self
    }

    /// Samples the host collaborators into a snapshot.
    ///
    /// The palette is derived from the power state, do-not-disturb and
    /// hour; the accent comes from [`ThemeSource::accent`] when the theme
    /// cycles it.
    pub fn gather<T, C, S>(theme: &T, clock: &C, status: &S, awake: bool) -> Self
    where
        T: ThemeSource + ?Sized,
        C: WallClock + ?Sized,
        S: StatusSource + ?Sized,
    {
        let reading = clock.now();
        let indicators = status.indicators();
        let ctx = ThemeContext::new(awake, indicators.do_not_disturb, reading.hour);
        let palette = theme.palette(ctx);
        let accent = theme
            .accent(reading)
            .unwrap_or(palette[ColorRole::Accent]);

        Self {
            reading,
            palette,
            accent,
            indicators,
        }
    }
}
