//! Compositing strategy trait.
//!
//! A compositor decides *how* the face reaches the display: through an
//! off-screen bitmap, through independent layers, or by drawing everything
//! directly each tick. All three share one contract so the dispatcher can be
//! written once, and the choice is a type parameter fixed when the host
//! builds the face, never a runtime branch.
//!
//! # Built-in Compositors
//!
//! | Compositor | Memory | Seconds asleep | Erase method |
//! |------------|--------|----------------|--------------|
//! | [`BufferedCompositor`] | 1 full-screen bitmap | Yes | Copy from clean bitmap |
//! | [`LayeredCompositor`] | 3 full-screen layers | Yes | Clear to transparent |
//! | [`DirectCompositor`] | None | No | Full redraw every tick |
//!
//! [`BufferedCompositor`]: crate::compositor::BufferedCompositor
//! [`LayeredCompositor`]: crate::compositor::LayeredCompositor
//! [`DirectCompositor`]: crate::compositor::DirectCompositor

use core::fmt;

use embedded_graphics::{pixelcolor::Rgb565, prelude::DrawTarget, primitives::Rectangle};

use crate::cache::SecondEntry;
use crate::frame::FrameInputs;
use crate::layout::FaceLayout;

/// Identifies a compositor family (device capability tier).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CompositorKind {
    /// Off-screen bitmap with clipped partial blits.
    #[default]
    Buffered,
    /// Hardware or software layer stack.
    Layered,
    /// No partial updates; full redraw whenever visible.
    Direct,
}

impl CompositorKind {
    /// Returns the kind as a lowercase string.
    ///
    /// ```
    /// use tickface::CompositorKind;
    ///
    /// assert_eq!(CompositorKind::Layered.as_str(), "layered");
    /// ```
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            CompositorKind::Buffered => "buffered",
            CompositorKind::Layered => "layered",
            CompositorKind::Direct => "direct",
        }
    }

    /// Parse a kind from text, case-insensitive.
    ///
    /// ```
    /// use tickface::CompositorKind;
    ///
    /// assert_eq!(CompositorKind::from_text(" Direct "), Some(CompositorKind::Direct));
    /// assert_eq!(CompositorKind::from_text("bitmap"), Some(CompositorKind::Buffered));
    /// assert_eq!(CompositorKind::from_text("gpu"), None);
    /// ```
    pub fn from_text(s: &str) -> Option<Self> {
        let s = s.trim();
        [
            ("buffered", CompositorKind::Buffered),
            ("bitmap", CompositorKind::Buffered),
            ("layered", CompositorKind::Layered),
            ("layer", CompositorKind::Layered),
            ("direct", CompositorKind::Direct),
        ]
        .into_iter()
        .find(|(name, _)| s.eq_ignore_ascii_case(name))
        .map(|(_, kind)| kind)
    }
}

impl fmt::Display for CompositorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How the hour and minute hands are rendered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum HandStyle {
    /// Filled polygons.
    #[default]
    Filled,
    /// Outlines only, so whatever is underneath stays legible.
    Wire,
}

/// A strategy for getting the face onto the display.
///
/// # Contract
///
/// - [`full_redraw`](Self::full_redraw) renders tick marks, indicators and
///   the hour/minute hands, and leaves no second hand visible. Calling it
///   twice with the same inputs produces the same frame.
/// - [`second_update`](Self::second_update) erases the previously drawn
///   second hand (if any) and draws the one described by `entry`. It must
///   not allocate or evaluate trigonometry, and it returns the region it
///   touched: `entry.clip`, enlarged to cover the previous hand's clip when
///   one was still on screen.
///
/// # Example Implementation
///
/// ```rust
/// use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
/// use tickface::{
///     cache::SecondEntry, frame::FrameInputs, layout::FaceLayout,
///     traits::{Compositor, CompositorKind, HandStyle},
/// };
///
/// /// Draws nothing; useful for timing the dispatcher alone.
/// struct Null;
///
/// impl Compositor for Null {
///     const KIND: CompositorKind = CompositorKind::Direct;
///     const LOW_POWER_SECONDS: bool = false;
///     const REDRAWS_EVERY_TICK: bool = false;
///
///     fn with_layout(_layout: &FaceLayout) -> Self {
///         Null
///     }
///
///     fn full_redraw<D>(&mut self, _: &mut D, _: &FaceLayout, _: &FrameInputs, _: HandStyle)
///         -> Result<(), D::Error>
///     where
///         D: DrawTarget<Color = Rgb565>,
///     {
///         Ok(())
///     }
///
///     fn second_update<D>(&mut self, _: &mut D, entry: &SecondEntry, _: Rgb565)
///         -> Result<Rectangle, D::Error>
///     where
///         D: DrawTarget<Color = Rgb565>,
///     {
///         Ok(entry.clip)
///     }
/// }
/// ```
pub trait Compositor {
    /// Capability tier of this compositor.
    const KIND: CompositorKind;

    /// Whether the second hand can be shown in low-power mode.
    const LOW_POWER_SECONDS: bool;

    /// Whether every visible high-power tick needs a full redraw.
    const REDRAWS_EVERY_TICK: bool;

    /// Allocates whatever surfaces the compositor needs for `layout`.
    ///
    /// Called once when the face is built.
    fn with_layout(layout: &FaceLayout) -> Self
    where
        Self: Sized;

    /// Re-renders the face without the second hand.
    fn full_redraw<D>(
        &mut self,
        target: &mut D,
        layout: &FaceLayout,
        frame: &FrameInputs,
        hands: HandStyle,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>;

    /// Moves the second hand to `entry`.
    fn second_update<D>(
        &mut self,
        target: &mut D,
        entry: &SecondEntry,
        accent: Rgb565,
    ) -> Result<Rectangle, D::Error>
    where
        D: DrawTarget<Color = Rgb565>;
}
