//! Color snapshots and the stock theme.
//!
//! A [`Palette`] is a flat, `Copy` array of colors indexed by [`ColorRole`].
//! The rendering core never reads ambient theme state: the host (or the
//! [`StaticTheme`] provided here) computes a palette once per full redraw
//! and hands it in with the rest of the frame inputs.
//!
//! # Example
//!
//! ```rust
//! use embedded_graphics::pixelcolor::Rgb565;
//! use tickface::palette::{ColorRole, Palette, StaticTheme, ThemeContext};
//! use tickface::traits::ThemeSource;
//!
//! let theme = StaticTheme::default();
//! let day = theme.palette(ThemeContext::new(true, false, 12));
//! let asleep = theme.palette(ThemeContext::new(false, false, 12));
//!
//! // Background is never dimmed
//! assert_eq!(day[ColorRole::Background], asleep[ColorRole::Background]);
//! assert_ne!(day[ColorRole::Foreground], asleep[ColorRole::Foreground]);
//! ```

use core::ops::Index;

use embedded_graphics::pixelcolor::{Rgb565, Rgb888, RgbColor};

use crate::config::ThemeConfig;
use crate::traits::{ClockReading, ThemeSource};

/// Semantic color roles.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum ColorRole {
    /// Hub and general foreground.
    Foreground,
    /// Face background.
    Background,
    /// Date and other text.
    Text,
    /// Status indicators in their normal state.
    Indicator,
    /// Second hand and highlights.
    Accent,
    /// First warning tier (e.g. battery getting low).
    WarningLow,
    /// Second warning tier (e.g. battery critical).
    WarningCritical,
    /// Hour hand fill.
    HourHand,
    /// Minute hand fill.
    MinuteHand,
    /// Tick marks.
    Tick,
}

impl ColorRole {
    /// Number of roles.
    pub const COUNT: usize = 10;

    /// All roles, in palette order.
    pub const ALL: [ColorRole; ColorRole::COUNT] = [
        ColorRole::Foreground,
        ColorRole::Background,
        ColorRole::Text,
        ColorRole::Indicator,
        ColorRole::Accent,
        ColorRole::WarningLow,
        ColorRole::WarningCritical,
        ColorRole::HourHand,
        ColorRole::MinuteHand,
        ColorRole::Tick,
    ];

    #[inline]
    const fn index(self) -> usize {
        self as usize
    }
}

/// Converts `0xRRGGBB` to RGB565.
///
/// ```rust
/// use embedded_graphics::pixelcolor::{Rgb565, RgbColor};
/// use tickface::palette::rgb;
///
/// assert_eq!(rgb(0xFFFFFF), Rgb565::WHITE);
/// assert_eq!(rgb(0x000000), Rgb565::BLACK);
/// ```
pub fn rgb(hex: u32) -> Rgb565 {
    Rgb888::new((hex >> 16) as u8, (hex >> 8) as u8, hex as u8).into()
}

/// Halves every channel.
pub fn dim(color: Rgb565) -> Rgb565 {
    Rgb565::new(color.r() / 2, color.g() / 2, color.b() / 2)
}

/// Immutable color snapshot indexed by [`ColorRole`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    colors: [Rgb565; ColorRole::COUNT],
}

impl Palette {
    /// Creates a palette from colors in [`ColorRole::ALL`] order.
    pub const fn new(colors: [Rgb565; ColorRole::COUNT]) -> Self {
        Self { colors }
    }

    /// Color for `role`.
    #[inline]
    pub fn get(&self, role: ColorRole) -> Rgb565 {
        self.colors[role.index()]
    }

    /// Returns a copy with `role` replaced.
    pub fn with(mut self, role: ColorRole, color: Rgb565) -> Self {
        self.colors[role.index()] = color;
        self
    }

    /// Flat view in [`ColorRole::ALL`] order.
    pub fn as_slice(&self) -> &[Rgb565] {
        &self.colors
    }

    /// Builds a palette from a theme configuration.
    pub fn from_config(theme: &ThemeConfig) -> Self {
        Self::new([
            rgb(theme.foreground),
            rgb(theme.background),
            rgb(theme.text),
            rgb(theme.indicator),
            rgb(theme.accent),
            rgb(theme.warning_low),
            rgb(theme.warning_critical),
            rgb(theme.hour_hand),
            rgb(theme.minute_hand),
            rgb(theme.tick),
        ])
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self::from_config(&ThemeConfig::default())
    }
}

impl Index<ColorRole> for Palette {
    type Output = Rgb565;

    fn index(&self, role: ColorRole) -> &Rgb565 {
        &self.colors[role.index()]
    }
}

/// Inputs a theme uses to derive a palette.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ThemeContext {
    /// Display is in high-power mode.
    pub awake: bool,
    /// Do-not-disturb is active.
    pub do_not_disturb: bool,
    /// Hour of day, 0..24.
    pub hour: u8,
}

impl ThemeContext {
    /// Creates a context.
    pub const fn new(awake: bool, do_not_disturb: bool, hour: u8) -> Self {
        Self {
            awake,
            do_not_disturb,
            hour,
        }
    }

    /// 22:00 to 05:59.
    pub fn is_night(&self) -> bool {
        self.hour >= 22 || self.hour < 6
    }
}

/// Accent colors stepped through when accent cycling is enabled.
pub const ACCENT_WHEEL: [u32; 12] = [
    0xFF3B30, 0xFF9500, 0xFFCC00, 0xA8E000, 0x34C759, 0x00C7BE, 0x30B0FF, 0x007AFF, 0x5856D6,
    0xAF52DE, 0xFF2D92, 0xFF6482,
];

/// Theme backed by a fixed [`ThemeConfig`].
///
/// - Asleep or at night (with `dim_at_night`): every role except the
///   background is dimmed.
/// - Do-not-disturb: the accent falls back to the indicator color.
/// - `cycle_accent`: the second hand walks [`ACCENT_WHEEL`], one step per
///   five seconds.
#[derive(Clone, Debug)]
pub struct StaticTheme {
    base: Palette,
    cycle_accent: bool,
    dim_at_night: bool,
}

impl StaticTheme {
    /// Creates a theme from configuration.
    pub fn new(config: &ThemeConfig) -> Self {
        Self {
            base: Palette::from_config(config),
            cycle_accent: config.cycle_accent,
            dim_at_night: config.dim_at_night,
        }
    }

    /// The undimmed palette.
    pub fn base(&self) -> &Palette {
        &self.base
    }
}

impl Default for StaticTheme {
    fn default() -> Self {
        Self::new(&ThemeConfig::default())
    }
}

impl ThemeSource for StaticTheme {
    fn palette(&self, ctx: ThemeContext) -> Palette {
        let mut palette = self.base;

        if ctx.do_not_disturb {
            palette = palette.with(ColorRole::Accent, palette[ColorRole::Indicator]);
        }

        if !ctx.awake || (self.dim_at_night && ctx.is_night()) {
            for role in ColorRole::ALL {
                if role != ColorRole::Background {
                    palette = palette.with(role, dim(palette[role]));
                }
            }
        }

        palette
    }

    fn accent(&self, reading: ClockReading) -> Option<Rgb565> {
        if !self.cycle_accent {
            return None;
        }
        let seconds = u32::from(reading.hour) * 3600
            + u32::from(reading.minute) * 60
            + u32::from(reading.second);
        Some(rgb(ACCENT_WHEEL[(seconds / 5) as usize % ACCENT_WHEEL.len()]))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_index_in_order() {
        for (i, role) in ColorRole::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
        }
    }

    #[test]
    fn with_replaces_single_role() {
        let p = Palette::default().with(ColorRole::Accent, Rgb565::GREEN);
        assert_eq!(p[ColorRole::Accent], Rgb565::GREEN);
        assert_eq!(p[ColorRole::Background], Palette::default()[ColorRole::Background]);
    }

    #[test]
    fn dnd_mutes_accent() {
        let theme = StaticTheme::default();
        let p = theme.palette(ThemeContext::new(true, true, 12));
        assert_eq!(p[ColorRole::Accent], p[ColorRole::Indicator]);
    }

    #[test]
    fn night_dims_when_enabled() {
        let config = ThemeConfig::default().with_dim_at_night(true);
        let theme = StaticTheme::new(&config);
        let noon = theme.palette(ThemeContext::new(true, false, 12));
        let night = theme.palette(ThemeContext::new(true, false, 23));
        assert_eq!(night[ColorRole::Foreground], dim(noon[ColorRole::Foreground]));

        let plain = StaticTheme::new(&config.with_dim_at_night(false));
        assert_eq!(
            plain.palette(ThemeContext::new(true, false, 23)),
            plain.palette(ThemeContext::new(true, false, 12))
        );
    }

    #[test]
    fn accent_cycles_only_when_enabled() {
        let reading = ClockReading::new(10, 9, 30);
        assert!(StaticTheme::default().accent(reading).is_none());

        let theme = StaticTheme::new(&ThemeConfig::default().with_cycle_accent(true));
        let a = theme.accent(ClockReading::new(10, 9, 30));
        let b = theme.accent(ClockReading::new(10, 9, 34));
        let c = theme.accent(ClockReading::new(10, 9, 35));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn dim_halves_channels() {
        let c = dim(Rgb565::WHITE);
        assert_eq!(c.r(), Rgb565::MAX_R / 2);
        assert_eq!(c.g(), Rgb565::MAX_G / 2);
    }
}
