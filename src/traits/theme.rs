//! Theme abstraction.
//!
//! This module defines the [`ThemeSource`] trait through which the settings
//! collaborator supplies colors. The core calls it once per full redraw and
//! works from the returned [`Palette`] snapshot for the rest of the tick.

use embedded_graphics::pixelcolor::Rgb565;

use crate::palette::{Palette, ThemeContext};
use crate::traits::ClockReading;

/// Supplies colors for the face.
///
/// # Example
///
/// ```rust
/// use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
/// use tickface::palette::{ColorRole, Palette, ThemeContext};
/// use tickface::traits::{ClockReading, ThemeSource};
///
/// struct Mono;
///
/// impl ThemeSource for Mono {
///     fn palette(&self, _ctx: ThemeContext) -> Palette {
///         Palette::new([Rgb565::WHITE; ColorRole::COUNT])
///             .with(ColorRole::Background, Rgb565::BLACK)
///     }
/// }
///
/// let p = Mono.palette(ThemeContext::new(true, false, 8));
/// assert_eq!(p[ColorRole::Accent], Rgb565::WHITE);
/// assert!(Mono.accent(ClockReading::new(8, 0, 0)).is_none());
/// ```
pub trait ThemeSource {
    /// Palette for the given power/do-not-disturb/time-of-day context.
    fn palette(&self, ctx: ThemeContext) -> Palette;

    /// Accent override for the "cycle accent color" option.
    ///
    /// `None` means use the palette's accent.
    fn accent(&self, _reading: ClockReading) -> Option<Rgb565> {
        None
    }
}
