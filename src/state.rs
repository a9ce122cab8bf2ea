//! Render state carried between ticks.
//!
//! The dispatcher's memory is deliberately small: the power state, the
//! minute of the last full redraw, and the wire-hands countdown. Everything
//! else is recomputed from the tick's inputs, so a late or skipped tick
//! corrects itself on the next one.
//!
//! # Example
//!
//! ```rust
//! use tickface::state::{PowerState, RenderState};
//! use tickface::traits::HandStyle;
//!
//! let mut state = RenderState::new();
//! assert!(state.needs_full_redraw(600, false));
//!
//! state.mark_full_redraw(600);
//! assert!(!state.needs_full_redraw(600, false));
//! assert!(state.needs_full_redraw(601, false));
//!
//! state.hold(2);
//! assert_eq!(state.hand_style(), HandStyle::Wire);
//! state.end_tick();
//! assert!(state.end_tick()); // countdown expired
//! assert_eq!(state.hand_style(), HandStyle::Filled);
//!
//! state.sleep(true);
//! assert_eq!(state.power(), PowerState::LowPowerIncremental);
//! ```

use core::fmt;

use crate::traits::HandStyle;

/// Display power state as seen by the face.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum PowerState {
    /// Display on, updated every second.
    #[default]
    AwakeHighRate,
    /// Always-on display with a once-per-second second-hand update.
    LowPowerIncremental,
    /// Always-on display updated once per minute.
    LowPowerMinuteOnly,
}

impl PowerState {
    /// Returns true when the display is fully on.
    #[inline]
    pub const fn is_awake(&self) -> bool {
        matches!(self, PowerState::AwakeHighRate)
    }

    /// Returns the state as a lowercase string.
    pub const fn as_str(&self) -> &'static str {
        match self {
            PowerState::AwakeHighRate => "awake",
            PowerState::LowPowerIncremental => "low-power incremental",
            PowerState::LowPowerMinuteOnly => "low-power minute-only",
        }
    }
}

impl fmt::Display for PowerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Mutable dispatcher state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RenderState {
    power: PowerState,
    last_full_redraw_minute: Option<u16>,
    wire_hands_countdown: u8,
}

impl RenderState {
    /// Awake, nothing drawn yet.
    pub const fn new() -> Self {
        Self {
            power: PowerState::AwakeHighRate,
            last_full_redraw_minute: None,
            wire_hands_countdown: 0,
        }
    }

    /// Current power state.
    #[inline]
    pub fn power(&self) -> PowerState {
        self.power
    }

    /// Minute of day of the last full redraw, or `None` when invalidated.
    #[inline]
    pub fn last_full_redraw_minute(&self) -> Option<u16> {
        self.last_full_redraw_minute
    }

    /// Ticks of wire hands remaining.
    #[inline]
    pub fn wire_hands_countdown(&self) -> u8 {
        self.wire_hands_countdown
    }

    /// Style for hour and minute hands at the next full redraw.
    pub fn hand_style(&self) -> HandStyle {
        if self.wire_hands_countdown > 0 {
            HandStyle::Wire
        } else {
            HandStyle::Filled
        }
    }

    /// Forces a full redraw on the next tick.
    #[inline]
    pub fn invalidate(&mut self) {
        self.last_full_redraw_minute = None;
    }

    /// Whether a tick at `minute_of_day` needs a full redraw.
    ///
    /// `every_tick` is set for compositors that cannot erase a second hand
    /// and must repaint every visible tick.
    pub fn needs_full_redraw(&self, minute_of_day: u16, every_tick: bool) -> bool {
        self.last_full_redraw_minute != Some(minute_of_day) || (every_tick && self.power.is_awake())
    }

    /// Records a completed full redraw.
    #[inline]
    pub fn mark_full_redraw(&mut self, minute_of_day: u16) {
        self.last_full_redraw_minute = Some(minute_of_day);
    }

    /// Display turned fully on.
    pub fn wake(&mut self) {
        self.power = PowerState::AwakeHighRate;
        self.invalidate();
    }

    /// Display entered always-on mode.
    ///
    /// `incremental` selects whether the second hand keeps moving.
    pub fn sleep(&mut self, incremental: bool) {
        self.power = if incremental {
            PowerState::LowPowerIncremental
        } else {
            PowerState::LowPowerMinuteOnly
        };
        self.wire_hands_countdown = 0;
        self.invalidate();
    }

    /// Starts wire hands for `ticks` ticks. Ignored unless awake.
    ///
    /// Returns whether the countdown was started.
    pub fn hold(&mut self, ticks: u8) -> bool {
        if !self.power.is_awake() || ticks == 0 {
            return false;
        }
        self.wire_hands_countdown = ticks;
        self.invalidate();
        true
    }

    /// Counts one tick off the wire-hands countdown.
    ///
    /// Returns true on the tick the countdown reaches zero; the next tick
    /// then redraws with filled hands.
    pub fn end_tick(&mut self) -> bool {
        if self.wire_hands_countdown == 0 {
            return false;
        }
        self.wire_hands_countdown -= 1;
        if self.wire_hands_countdown == 0 {
            self.invalidate();
            return true;
        }
        false
    }
}
