//! Values and traits supplied by the host platform.
//!
//! The rendering core never queries the system clock or sensor services
//! itself. The host samples a [`ClockReading`] and the status
//! [`Indicators`] once per tick and passes them in.
//!
//! # Key Traits
//!
//! | Trait | Purpose |
//! |-------|---------|
//! | [`WallClock`] | Local time of day |
//! | [`StatusSource`] | Battery and connectivity state |
//!
//! For desktop development use [`MockClock`] and [`MockStatus`].
//!
//! [`MockClock`]: crate::hal::MockClock
//! [`MockStatus`]: crate::hal::MockStatus

/// Local time of day, sampled once per tick.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ClockReading {
    /// Hour, 0..24.
    pub hour: u8,
    /// Minute, 0..60.
    pub minute: u8,
    /// Second, 0..60.
    pub second: u8,
}

impl ClockReading {
    /// Creates a reading. Out-of-range fields wrap.
    ///
    /// ```
    /// use tickface::ClockReading;
    ///
    /// let t = ClockReading::new(25, 61, 60);
    /// assert_eq!((t.hour, t.minute, t.second), (1, 1, 0));
    /// ```
    pub const fn new(hour: u8, minute: u8, second: u8) -> Self {
        Self {
            hour: hour % 24,
            minute: minute % 60,
            second: second % 60,
        }
    }

    /// Minutes since midnight. Used as the full-redraw sentinel so an hour
    /// rollover with an unchanged minute value still redraws.
    #[inline]
    pub const fn minute_of_day(&self) -> u16 {
        self.hour as u16 * 60 + self.minute as u16
    }

    /// The reading one second later, wrapping at midnight.
    pub const fn next_second(&self) -> Self {
        let total = (self.minute_of_day() as u32 * 60 + self.second as u32 + 1) % 86_400;
        Self {
            hour: (total / 3600) as u8,
            minute: ((total / 60) % 60) as u8,
            second: (total % 60) as u8,
        }
    }
}

/// Status indicators drawn on the face.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Indicators {
    /// Battery charge, 0..=100, when known.
    pub battery_percent: Option<u8>,
    /// Battery is charging.
    pub charging: bool,
    /// Phone is connected.
    pub phone_connected: bool,
    /// Unread notification count.
    pub notifications: u8,
    /// An alarm is set.
    pub alarm_set: bool,
    /// Do-not-disturb is active.
    pub do_not_disturb: bool,
    /// Day of month, 1..=31, when known.
    pub day_of_month: Option<u8>,
}

/// Time source.
pub trait WallClock {
    /// Current local time.
    fn now(&self) -> ClockReading;
}

/// Status data source (battery, connectivity, notifications).
pub trait StatusSource {
    /// Current indicator values.
    fn indicators(&self) -> Indicators;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_second_rolls_over() {
        assert_eq!(
            ClockReading::new(14, 59, 59).next_second(),
            ClockReading::new(15, 0, 0)
        );
        assert_eq!(
            ClockReading::new(23, 59, 59).next_second(),
            ClockReading::new(0, 0, 0)
        );
        assert_eq!(
            ClockReading::new(9, 14, 30).next_second(),
            ClockReading::new(9, 14, 31)
        );
    }

    #[test]
    fn minute_of_day_distinguishes_hours() {
        assert_ne!(
            ClockReading::new(9, 15, 0).minute_of_day(),
            ClockReading::new(10, 15, 0).minute_of_day()
        );
        assert_eq!(ClockReading::new(23, 59, 0).minute_of_day(), 1439);
    }
}
