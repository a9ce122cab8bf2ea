//! The watch-face dispatcher.
//!
//! [`WatchFace`] receives the host's events (tick, partial tick, wake,
//! sleep, hold) and decides per tick whether to do a full redraw, an
//! incremental second-hand update, both, or nothing. The drawing itself is
//! delegated to a [`Compositor`] chosen by type parameter.
//!
//! # Example
//!
//! ```rust
//! use tickface::{
//!     compositor::BufferedCompositor,
//!     config::FaceConfig,
//!     frame::FrameInputs,
//!     hal::MockPanel,
//!     palette::Palette,
//!     state::PowerState,
//!     ClockReading, WatchFace,
//! };
//!
//! let config = FaceConfig::default();
//! let mut face = WatchFace::<BufferedCompositor>::new(&config).unwrap();
//! let mut panel = MockPanel::new(config.display.size());
//!
//! // First tick paints the whole face, then the second hand
//! let frame = FrameInputs::new(ClockReading::new(14, 59, 58), Palette::default());
//! let outcome = face.on_update(&mut panel, &frame).unwrap();
//! assert!(outcome.full_redraw);
//! assert_eq!(outcome.second_drawn, Some(58));
//!
//! // Same minute: only the second hand moves
//! let frame = FrameInputs::new(ClockReading::new(14, 59, 59), Palette::default());
//! let outcome = face.on_update(&mut panel, &frame).unwrap();
//! assert!(!outcome.full_redraw);
//!
//! // Going to sleep forces a full redraw on the next tick
//! face.on_sleep();
//! assert_eq!(face.state().power(), PowerState::LowPowerIncremental);
//! let outcome = face.on_update(&mut panel, &frame).unwrap();
//! assert!(outcome.full_redraw);
//! ```

use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget, primitives::Rectangle};

use crate::compositor::LayeredCompositor;
use crate::config::{ConfigError, FaceConfig, HandsConfig};
use crate::frame::FrameInputs;
use crate::layout::FaceLayout;
use crate::state::{PowerState, RenderState};
use crate::surface::bounding_union;
use crate::traits::{ClockReading, Compositor};

/// What a tick did.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TickOutcome {
    /// The whole face was repainted.
    pub full_redraw: bool,
    /// The second hand was drawn at this second.
    pub second_drawn: Option<u8>,
    /// Region written to the display, if any.
    pub dirty: Option<Rectangle>,
}

impl TickOutcome {
    fn touch(&mut self, area: Rectangle) {
        self.dirty = Some(match self.dirty {
            Some(dirty) => bounding_union(&dirty, &area),
            None => area,
        });
    }
}

/// Analog watch face driven by host events.
///
/// # Type Parameter
///
/// - `C`: The compositing strategy ([`Compositor`] trait)
///
/// # Thread Safety
///
/// The face is single-threaded and synchronous. Every event takes
/// `&mut self`; the host serialises them on its UI thread.
pub struct WatchFace<C: Compositor> {
    compositor: C,
    layout: FaceLayout,
    hands: HandsConfig,
    state: RenderState,
}

impl<C: Compositor> WatchFace<C> {
    /// Validates `config`, builds the layout and second-hand cache, and
    /// allocates the compositor's surfaces.
    pub fn new(config: &FaceConfig) -> Result<Self, ConfigError> {
        let layout = FaceLayout::from_config(config)?;
        let compositor = C::with_layout(&layout);

        log::debug!(
            "face '{}' ready ({} compositor)",
            config.device.name.as_str(),
            C::KIND
        );

        Ok(Self {
            compositor,
            layout,
            hands: config.hands,
            state: RenderState::new(),
        })
    }

    /// Current dispatcher state.
    pub fn state(&self) -> &RenderState {
        &self.state
    }

    /// The immutable layout.
    pub fn layout(&self) -> &FaceLayout {
        &self.layout
    }

    /// The compositor.
    pub fn compositor(&self) -> &C {
        &self.compositor
    }

    /// Hands settings in effect.
    pub fn hands_config(&self) -> &HandsConfig {
        &self.hands
    }

    // ========================================================================
    // Host Events
    // ========================================================================

    /// Display turned fully on.
    pub fn on_wake(&mut self) {
        self.state.wake();
        log::debug!("wake");
    }

    /// Display entered always-on mode.
    ///
    /// Returns the low-power state chosen: incremental when the compositor
    /// can move the second hand cheaply and the configuration asks for it.
    pub fn on_sleep(&mut self) -> PowerState {
        let incremental = C::LOW_POWER_SECONDS && self.hands.seconds_in_low_power;
        self.state.sleep(incremental);
        log::debug!("sleep -> {}", self.state.power());
        self.state.power()
    }

    /// Touch-and-hold gesture. Shows wire hands while awake.
    ///
    /// Returns whether wire hands were started.
    pub fn on_hold(&mut self) -> bool {
        if !self.hands.wire_hands_enabled {
            return false;
        }
        let started = self.state.hold(self.hands.wire_hands_ticks);
        if started {
            log::debug!("wire hands for {} ticks", self.hands.wire_hands_ticks);
        }
        started
    }

    /// Draw-on-tick entry point.
    ///
    /// Does a full redraw when the minute changed since the last one (or on
    /// every visible tick for compositors that need it), then moves the
    /// second hand when it is shown in the current state.
    pub fn on_update<D>(&mut self, target: &mut D, frame: &FrameInputs) -> Result<TickOutcome, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let mut outcome = TickOutcome::default();
        let minute = frame.reading.minute_of_day();

        if self.state.needs_full_redraw(minute, C::REDRAWS_EVERY_TICK) {
            let style = self.state.hand_style();
            log::trace!(
                "full redraw {:02}:{:02} {:?} hands",
                frame.reading.hour,
                frame.reading.minute,
                style
            );
            self.compositor
                .full_redraw(target, &self.layout, frame, style)?;
            self.state.mark_full_redraw(minute);
            outcome.full_redraw = true;
            outcome.touch(self.layout.bounds());
        }

        if self.second_hand_shown() {
            let second = frame.reading.second;
            let area = self
                .compositor
                .second_update(target, self.layout.second(second), frame.accent)?;
            outcome.second_drawn = Some(second);
            outcome.touch(area);
        }

        if self.state.end_tick() {
            log::debug!("wire hands expired");
        }

        Ok(outcome)
    }

    /// Draw-on-partial-tick entry point.
    ///
    /// Only moves the second hand, and only in
    /// [`PowerState::LowPowerIncremental`]. Returns the region written.
    pub fn on_partial_update<D>(
        &mut self,
        target: &mut D,
        reading: ClockReading,
        accent: Rgb565,
    ) -> Result<Option<Rectangle>, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        if self.state.power() != PowerState::LowPowerIncremental {
            return Ok(None);
        }
        let area = self
            .compositor
            .second_update(target, self.layout.second(reading.second), accent)?;
        Ok(Some(area))
    }

    fn second_hand_shown(&self) -> bool {
        match self.state.power() {
            PowerState::AwakeHighRate => self.hands.seconds_when_awake,
            PowerState::LowPowerIncremental => true,
            PowerState::LowPowerMinuteOnly => false,
        }
    }
}

impl WatchFace<LayeredCompositor> {
    /// Repaints only the status indicators.
    ///
    /// Hosts call this when battery or connection data changes between
    /// minutes. Returns the region written.
    pub fn refresh_indicators<D>(
        &mut self,
        target: &mut D,
        frame: &FrameInputs,
    ) -> Result<Rectangle, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        self.compositor
            .refresh_indicators(target, &self.layout, frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compositor::{BufferedCompositor, DirectCompositor};
    use crate::hal::MockPanel;
    use crate::palette::Palette;
    use crate::traits::HandStyle;

    fn frame(h: u8, m: u8, s: u8) -> FrameInputs {
        FrameInputs::new(ClockReading::new(h, m, s), Palette::default())
    }

    fn buffered() -> (WatchFace<BufferedCompositor>, MockPanel) {
        let config = FaceConfig::default();
        let face = WatchFace::new(&config).unwrap();
        (face, MockPanel::new(config.display.size()))
    }

    #[test]
    fn invalid_config_is_rejected() {
        let config = FaceConfig::default().with_display(crate::config::DisplayConfig::new(0, 100));
        assert!(WatchFace::<BufferedCompositor>::new(&config).is_err());
    }

    #[test]
    fn outcome_dirty_is_clip_without_full_redraw() {
        let (mut face, mut panel) = buffered();
        face.on_update(&mut panel, &frame(9, 0, 0)).unwrap();

        let outcome = face.on_update(&mut panel, &frame(9, 0, 1)).unwrap();
        let expected = bounding_union(&face.layout().second(0).clip, &face.layout().second(1).clip);
        assert_eq!(outcome.dirty, Some(expected));
    }

    #[test]
    fn seconds_hidden_when_disabled() {
        let config = FaceConfig::default()
            .with_hands(HandsConfig::default().with_seconds_when_awake(false));
        let mut face = WatchFace::<BufferedCompositor>::new(&config).unwrap();
        let mut panel = MockPanel::new(config.display.size());

        let outcome = face.on_update(&mut panel, &frame(9, 0, 0)).unwrap();
        assert_eq!(outcome.second_drawn, None);
    }

    #[test]
    fn direct_sleeps_minute_only() {
        let mut face = WatchFace::<DirectCompositor>::new(&FaceConfig::default()).unwrap();
        assert_eq!(face.on_sleep(), PowerState::LowPowerMinuteOnly);
    }

    #[test]
    fn low_power_seconds_can_be_disabled() {
        let config = FaceConfig::default()
            .with_hands(HandsConfig::default().with_seconds_in_low_power(false));
        let mut face = WatchFace::<BufferedCompositor>::new(&config).unwrap();
        assert_eq!(face.on_sleep(), PowerState::LowPowerMinuteOnly);
    }

    #[test]
    fn partial_update_only_in_incremental() {
        let (mut face, mut panel) = buffered();
        let accent = Palette::default()[crate::palette::ColorRole::Accent];

        assert_eq!(
            face.on_partial_update(&mut panel, ClockReading::new(1, 1, 1), accent)
                .unwrap(),
            None
        );
        assert_eq!(panel.write_count(), 0);

        face.on_sleep();
        let area = face
            .on_partial_update(&mut panel, ClockReading::new(1, 1, 1), accent)
            .unwrap();
        assert_eq!(area, Some(face.layout().second(1).clip));
    }

    #[test]
    fn hold_disabled_by_config() {
        let config = FaceConfig::default().with_hands(HandsConfig::default().with_wire_hands(false));
        let mut face = WatchFace::<BufferedCompositor>::new(&config).unwrap();
        assert!(!face.on_hold());
        assert_eq!(face.state().hand_style(), HandStyle::Filled);
    }
}
