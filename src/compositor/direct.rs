//! Compositor for displays without off-screen memory.

use embedded_graphics::{
    draw_target::DrawTargetExt, pixelcolor::Rgb565, prelude::DrawTarget, primitives::Rectangle,
};

use crate::cache::SecondEntry;
use crate::frame::FrameInputs;
use crate::layout::FaceLayout;
use crate::painter;
use crate::traits::{Compositor, CompositorKind, HandStyle};

/// Paints straight onto the display.
///
/// Nothing is buffered, so the only way to erase a second hand is to repaint
/// the whole face; the dispatcher does that on every visible tick. The
/// second-hand cache is still used so that no trigonometry runs per second.
/// Seconds are never shown in low power.
#[derive(Clone, Copy, Debug, Default)]
pub struct DirectCompositor;

impl Compositor for DirectCompositor {
    const KIND: CompositorKind = CompositorKind::Direct;
    const LOW_POWER_SECONDS: bool = false;
    const REDRAWS_EVERY_TICK: bool = true;

    fn with_layout(_layout: &FaceLayout) -> Self {
        DirectCompositor
    }

    fn full_redraw<D>(
        &mut self,
        target: &mut D,
        layout: &FaceLayout,
        frame: &FrameInputs,
        hands: HandStyle,
    ) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        painter::draw_background(target, layout, frame)?;
        painter::draw_hands(target, layout, frame, hands)
    }

    fn second_update<D>(
        &mut self,
        target: &mut D,
        entry: &SecondEntry,
        accent: Rgb565,
    ) -> Result<Rectangle, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        painter::draw_second_hand(&mut target.clipped(&entry.clip), entry, accent)?;
        Ok(entry.clip)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FaceConfig;
    use crate::hal::MockPanel;
    use crate::palette::Palette;
    use crate::traits::ClockReading;
    use embedded_graphics::pixelcolor::RgbColor;

    #[test]
    fn full_redraw_is_idempotent() {
        let layout = FaceLayout::from_config(&FaceConfig::default()).unwrap();
        let frame = FrameInputs::new(ClockReading::new(4, 41, 0), Palette::default());
        let mut compositor = DirectCompositor::with_layout(&layout);

        let mut first = MockPanel::new(layout.size());
        compositor
            .full_redraw(&mut first, &layout, &frame, HandStyle::Filled)
            .unwrap();
        let mut second = first.clone();
        compositor
            .full_redraw(&mut second, &layout, &frame, HandStyle::Filled)
            .unwrap();

        assert_eq!(first.frame(), second.frame());
    }

    #[test]
    fn second_update_writes_only_the_hand() {
        let layout = FaceLayout::from_config(&FaceConfig::default()).unwrap();
        let mut compositor = DirectCompositor;
        let mut panel = MockPanel::new(layout.size());

        let entry = layout.second(45);
        let touched = compositor.second_update(&mut panel, entry, Rgb565::GREEN).unwrap();

        assert_eq!(touched, entry.clip);
        assert!(panel.touched_within(&entry.clip));
        assert_eq!(panel.pixel(entry.circle), Some(Rgb565::GREEN));
    }
}
