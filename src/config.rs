//! Face configuration shared by device builds and the desktop simulator.
//!
//! Uses `heapless::String` for `no_std` compatibility while remaining
//! ergonomic to use on desktop with `std`. Everything here is a plain value
//! snapshot: the settings store and its menu UI live outside this crate and
//! hand a finished [`FaceConfig`] to [`WatchFace::new`].
//!
//! # Example
//!
//! ```rust
//! use tickface::config::{DisplayConfig, FaceConfig, HandsConfig};
//!
//! let config = FaceConfig::default()
//!     .with_display(DisplayConfig::new(454, 454))
//!     .with_hands(HandsConfig::default().with_seconds_in_low_power(false));
//!
//! assert!(config.validate().is_ok());
//! assert_eq!(config.display.radius(), 227);
//! ```
//!
//! [`WatchFace::new`]: crate::face::WatchFace::new

use core::fmt;

use embedded_graphics::prelude::{Point, Size};
use heapless::String as HString;

use crate::traits::CompositorKind;

/// Maximum length for short config strings (theme and device names)
pub const MAX_SHORT_STRING: usize = 32;

/// Type alias for short config strings
pub type ShortString = HString<MAX_SHORT_STRING>;

/// Smallest clock radius the hand geometry is defined for.
pub const MIN_RADIUS: u32 = 24;

/// Default length of the wire-hands override, in ticks.
pub const DEFAULT_WIRE_HANDS_TICKS: u8 = 6;

/// Create a ShortString from a &str, truncating if too long
pub fn short_string(s: &str) -> ShortString {
    let mut hs = ShortString::new();
    let take = s.len().min(MAX_SHORT_STRING);
    // Find valid UTF-8 boundary
    let valid_end = s
        .char_indices()
        .take_while(|(i, c)| i + c.len_utf8() <= take)
        .last()
        .map(|(i, c)| i + c.len_utf8())
        .unwrap_or(0);
    let _ = hs.push_str(&s[..valid_end]);
    hs
}

// ============================================================================
// Errors
// ============================================================================

/// Configuration rejected by [`FaceConfig::validate`].
///
/// These are startup preconditions: a host that gets one of these has been
/// handed screen dimensions no face can be laid out on.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigError {
    /// Width or height is zero.
    ZeroDimension {
        /// Configured width.
        width: u32,
        /// Configured height.
        height: u32,
    },
    /// Half the smaller dimension is below [`MIN_RADIUS`].
    RadiusTooSmall {
        /// Computed clock radius.
        radius: u32,
    },
    /// Wire hands are enabled with a zero-tick countdown.
    ZeroWireHandsTicks,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::ZeroDimension { width, height } => {
                write!(f, "screen dimensions must be non-zero, got {}x{}", width, height)
            }
            ConfigError::RadiusTooSmall { radius } => write!(
                f,
                "clock radius {}px is below the minimum of {}px",
                radius, MIN_RADIUS
            ),
            ConfigError::ZeroWireHandsTicks => {
                write!(f, "wire hands enabled with a zero-tick countdown")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ConfigError {}

// ============================================================================
// Main Config
// ============================================================================

/// Complete face configuration
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FaceConfig {
    /// Screen geometry
    pub display: DisplayConfig,
    /// Hand behavior
    pub hands: HandsConfig,
    /// Which status indicators are drawn
    pub indicators: IndicatorConfig,
    /// Colors
    pub theme: ThemeConfig,
    /// Device identification and compositor selection
    pub device: DeviceConfig,
}

impl FaceConfig {
    /// Set display configuration
    pub fn with_display(mut self, display: DisplayConfig) -> Self {
        self.display = display;
        self
    }

    /// Set hands configuration
    pub fn with_hands(mut self, hands: HandsConfig) -> Self {
        self.hands = hands;
        self
    }

    /// Set indicator configuration
    pub fn with_indicators(mut self, indicators: IndicatorConfig) -> Self {
        self.indicators = indicators;
        self
    }

    /// Set theme configuration
    pub fn with_theme(mut self, theme: ThemeConfig) -> Self {
        self.theme = theme;
        self
    }

    /// Set device configuration
    pub fn with_device(mut self, device: DeviceConfig) -> Self {
        self.device = device;
        self
    }

    /// Check startup preconditions.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let DisplayConfig { width, height } = self.display;
        if width == 0 || height == 0 {
            return Err(ConfigError::ZeroDimension { width, height });
        }
        let radius = self.display.radius();
        if radius < MIN_RADIUS {
            return Err(ConfigError::RadiusTooSmall { radius });
        }
        if self.hands.wire_hands_enabled && self.hands.wire_hands_ticks == 0 {
            return Err(ConfigError::ZeroWireHandsTicks);
        }
        Ok(())
    }
}

// ============================================================================
// Display Config
// ============================================================================

/// Screen geometry, fixed at startup
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DisplayConfig {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 260,
            height: 260,
        }
    }
}

impl DisplayConfig {
    /// Create a display configuration
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Screen size
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Clock radius: half the smaller dimension
    pub fn radius(&self) -> u32 {
        self.width.min(self.height) / 2
    }

    /// Screen center
    pub fn center(&self) -> Point {
        Point::new((self.width / 2) as i32, (self.height / 2) as i32)
    }
}

// ============================================================================
// Hands Config
// ============================================================================

/// Hand rendering behavior
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct HandsConfig {
    /// Draw the second hand in high-power mode
    pub seconds_when_awake: bool,
    /// Draw the second hand in low-power mode (when the compositor can)
    pub seconds_in_low_power: bool,
    /// Allow the touch-and-hold wire-hands override
    pub wire_hands_enabled: bool,
    /// Number of ticks the wire-hands override lasts
    pub wire_hands_ticks: u8,
}

impl Default for HandsConfig {
    fn default() -> Self {
        Self {
            seconds_when_awake: true,
            seconds_in_low_power: true,
            wire_hands_enabled: true,
            wire_hands_ticks: DEFAULT_WIRE_HANDS_TICKS,
        }
    }
}

impl HandsConfig {
    /// Show or hide the second hand while awake
    pub fn with_seconds_when_awake(mut self, show: bool) -> Self {
        self.seconds_when_awake = show;
        self
    }

    /// Show or hide the second hand in low-power mode
    pub fn with_seconds_in_low_power(mut self, show: bool) -> Self {
        self.seconds_in_low_power = show;
        self
    }

    /// Enable or disable wire hands
    pub fn with_wire_hands(mut self, enabled: bool) -> Self {
        self.wire_hands_enabled = enabled;
        self
    }

    /// Set the wire-hands countdown length
    pub fn with_wire_hands_ticks(mut self, ticks: u8) -> Self {
        self.wire_hands_ticks = ticks;
        self
    }
}

// ============================================================================
// Indicator Config
// ============================================================================

/// Which status indicators are drawn
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct IndicatorConfig {
    /// Battery gauge at 6 o'clock
    pub battery: bool,
    /// Phone connection dot below 12
    pub connection: bool,
    /// Notification dot at 9 o'clock
    pub notifications: bool,
    /// Alarm ring below the connection dot
    pub alarm: bool,
    /// Day-of-month at 3 o'clock
    pub date: bool,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            battery: true,
            connection: true,
            notifications: true,
            alarm: true,
            date: true,
        }
    }
}

impl IndicatorConfig {
    /// All indicators disabled
    pub fn none() -> Self {
        Self {
            battery: false,
            connection: false,
            notifications: false,
            alarm: false,
            date: false,
        }
    }

    /// Enable or disable the battery gauge
    pub fn with_battery(mut self, on: bool) -> Self {
        self.battery = on;
        self
    }

    /// Enable or disable the date
    pub fn with_date(mut self, on: bool) -> Self {
        self.date = on;
        self
    }
}

// ============================================================================
// Theme Config
// ============================================================================

/// Theme colors as `0xRRGGBB`
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ThemeConfig {
    /// Theme name
    pub name: ShortString,
    /// Hub and general foreground
    pub foreground: u32,
    /// Face background
    pub background: u32,
    /// Text
    pub text: u32,
    /// Indicators
    pub indicator: u32,
    /// Second hand
    pub accent: u32,
    /// First warning tier
    pub warning_low: u32,
    /// Second warning tier
    pub warning_critical: u32,
    /// Hour hand
    pub hour_hand: u32,
    /// Minute hand
    pub minute_hand: u32,
    /// Tick marks
    pub tick: u32,
    /// Step the accent color around a wheel
    pub cycle_accent: bool,
    /// Dim the face between 22:00 and 06:00
    pub dim_at_night: bool,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            name: short_string("classic"),
            foreground: 0xFFFFFF,
            background: 0x000000,
            text: 0xC0C0C0,
            indicator: 0x8E8E93,
            accent: 0xFF3B30,
            warning_low: 0xFFCC00,
            warning_critical: 0xFF3B30,
            hour_hand: 0xFFFFFF,
            minute_hand: 0xFFFFFF,
            tick: 0xD0D0D0,
            cycle_accent: false,
            dim_at_night: false,
        }
    }
}

impl ThemeConfig {
    /// Set the theme name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Set the accent color
    pub fn with_accent(mut self, rgb: u32) -> Self {
        self.accent = rgb;
        self
    }

    /// Set the background color
    pub fn with_background(mut self, rgb: u32) -> Self {
        self.background = rgb;
        self
    }

    /// Enable or disable accent cycling
    pub fn with_cycle_accent(mut self, cycle: bool) -> Self {
        self.cycle_accent = cycle;
        self
    }

    /// Enable or disable night dimming
    pub fn with_dim_at_night(mut self, dim: bool) -> Self {
        self.dim_at_night = dim;
        self
    }
}

// ============================================================================
// Device Config
// ============================================================================

/// Device identification configuration
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct DeviceConfig {
    /// Human-readable device name
    pub name: ShortString,
    /// Compositor the device class is built with
    pub compositor: CompositorKind,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            name: short_string("tickface"),
            compositor: CompositorKind::Buffered,
        }
    }
}

impl DeviceConfig {
    /// Set the device name
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = short_string(name);
        self
    }

    /// Set the compositor
    pub fn with_compositor(mut self, compositor: CompositorKind) -> Self {
        self.compositor = compositor;
        self
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = FaceConfig::default();
        assert_eq!(config.display.radius(), 130);
        assert_eq!(config.display.center(), Point::new(130, 130));
        assert_eq!(config.hands.wire_hands_ticks, 6);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn radius_uses_smaller_dimension() {
        let display = DisplayConfig::new(320, 240);
        assert_eq!(display.radius(), 120);
        assert_eq!(display.center(), Point::new(160, 120));
    }

    #[test]
    fn zero_dimension_rejected() {
        let config = FaceConfig::default().with_display(DisplayConfig::new(0, 240));
        assert_eq!(
            config.validate(),
            Err(ConfigError::ZeroDimension {
                width: 0,
                height: 240
            })
        );
    }

    #[test]
    fn tiny_screen_rejected() {
        let config = FaceConfig::default().with_display(DisplayConfig::new(40, 40));
        assert_eq!(
            config.validate(),
            Err(ConfigError::RadiusTooSmall { radius: 20 })
        );
    }

    #[test]
    fn zero_wire_ticks_rejected_only_when_enabled() {
        let hands = HandsConfig::default().with_wire_hands_ticks(0);
        let config = FaceConfig::default().with_hands(hands);
        assert_eq!(config.validate(), Err(ConfigError::ZeroWireHandsTicks));

        let config = FaceConfig::default().with_hands(hands.with_wire_hands(false));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn short_string_truncation() {
        let long_input = "a".repeat(100);
        let s = short_string(&long_input);
        assert!(s.len() <= MAX_SHORT_STRING);

        // Multi-byte characters are never split
        let s = short_string(&"é".repeat(40));
        assert_eq!(s.len(), MAX_SHORT_STRING);
        assert!(s.chars().all(|c| c == 'é'));
    }

    #[test]
    fn builder_pattern() {
        let config = FaceConfig::default()
            .with_display(DisplayConfig::new(416, 416))
            .with_theme(ThemeConfig::default().with_name("ocean").with_accent(0x30B0FF))
            .with_device(
                DeviceConfig::default()
                    .with_name("fr965")
                    .with_compositor(CompositorKind::Layered),
            );

        assert_eq!(config.display.radius(), 208);
        assert_eq!(config.theme.name.as_str(), "ocean");
        assert_eq!(config.theme.accent, 0x30B0FF);
        assert_eq!(config.device.compositor, CompositorKind::Layered);
    }

    #[test]
    fn error_messages_name_the_problem() {
        let msg = ConfigError::RadiusTooSmall { radius: 10 }.to_string();
        assert!(msg.contains("10px"));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_fills_defaults() {
        let json = r#"{"display":{"width":390,"height":390},"device":{"compositor":"layered"}}"#;
        let config: FaceConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.display.radius(), 195);
        assert_eq!(config.device.compositor, CompositorKind::Layered);
        assert_eq!(config.hands, HandsConfig::default());
    }
}
