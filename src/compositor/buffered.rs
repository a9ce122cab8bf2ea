//! Off-screen bitmap compositor.

use embedded_graphics::{
    draw_target::DrawTargetExt,
    pixelcolor::{Rgb565, RgbColor},
    prelude::DrawTarget,
    primitives::Rectangle,
};

use crate::cache::SecondEntry;
use crate::frame::FrameInputs;
use crate::layout::FaceLayout;
use crate::painter;
use crate::surface::{bounding_union, infallible, Bitmap};
use crate::traits::{Compositor, CompositorKind, HandStyle};

/// Keeps a clean copy of the face (everything but the second hand) in a
/// full-screen [`Bitmap`].
///
/// Erasing the second hand is a blit of its clip rectangle from the clean
/// copy, so each second touches two small rectangles at most.
#[derive(Clone, Debug)]
pub struct BufferedCompositor {
    clean: Bitmap,
    last_clip: Option<Rectangle>,
}

impl BufferedCompositor {
    /// The face as it looks without a second hand.
    pub fn clean(&self) -> &Bitmap {
        &self.clean
    }

    /// Clip of the second hand currently on screen.
    pub fn last_clip(&self) -> Option<Rectangle> {
        self.last_clip
    }
}

impl Compositor for BufferedCompositor {
    const KIND: CompositorKind = CompositorKind::Buffered;
    const LOW_POWER_SECONDS: bool = true;
    const REDRAWS_EVERY_TICK: bool = false;

    fn with_layout(layout: &FaceLayout) -> Self {
        Self {
            clean: Bitmap::new(layout.size(), Rgb565::BLACK),
            last_clip: None,
        }
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
        infallible(painter::draw_background(&mut self.clean, layout, frame));
        infallible(painter::draw_hands(&mut self.clean, layout, frame, hands));

        self.clean.blit(target, &layout.bounds())?;
        self.last_clip = None;
        Ok(())
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
        let mut touched = entry.clip;
        if let Some(previous) = self.last_clip.take() {
            if previous != entry.clip {
                self.clean.blit(target, &previous)?;
                touched = bounding_union(&touched, &previous);
            }
        }

        self.clean.blit(target, &entry.clip)?;
        painter::draw_second_hand(&mut target.clipped(&entry.clip), entry, accent)?;
        self.last_clip = Some(entry.clip);
        Ok(touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FaceConfig;
    use crate::hal::MockPanel;
    use crate::palette::Palette;
    use crate::traits::ClockReading;
    use embedded_graphics::prelude::Point;

    fn setup() -> (FaceLayout, BufferedCompositor, MockPanel) {
        let layout = FaceLayout::from_config(&FaceConfig::default()).unwrap();
        let compositor = BufferedCompositor::with_layout(&layout);
        let panel = MockPanel::new(layout.size());
        (layout, compositor, panel)
    }

    fn frame() -> FrameInputs {
        FrameInputs::new(ClockReading::new(10, 8, 0), Palette::default())
    }

    #[test]
    fn full_redraw_matches_clean_copy() {
        let (layout, mut compositor, mut panel) = setup();
        compositor
            .full_redraw(&mut panel, &layout, &frame(), HandStyle::Filled)
            .unwrap();

        assert_eq!(panel.frame(), compositor.clean().pixels());
        assert_eq!(compositor.last_clip(), None);
    }

    #[test]
    fn first_update_touches_only_its_clip() {
        let (layout, mut compositor, mut panel) = setup();
        compositor
            .full_redraw(&mut panel, &layout, &frame(), HandStyle::Filled)
            .unwrap();
        panel.reset_tracking();

        let entry = layout.second(7);
        let touched = compositor.second_update(&mut panel, entry, Rgb565::RED).unwrap();

        assert_eq!(touched, entry.clip);
        assert!(panel.touched_within(&entry.clip));
        assert_eq!(panel.pixel(entry.circle), Some(Rgb565::RED));
    }

    #[test]
    fn previous_hand_is_erased() {
        let (layout, mut compositor, mut panel) = setup();
        compositor
            .full_redraw(&mut panel, &layout, &frame(), HandStyle::Filled)
            .unwrap();

        compositor
            .second_update(&mut panel, layout.second(0), Rgb565::RED)
            .unwrap();
        compositor
            .second_update(&mut panel, layout.second(30), Rgb565::RED)
            .unwrap();

        // Tip circle of second 0 is gone
        let old_tip = layout.second(0).circle;
        assert_eq!(panel.pixel(old_tip), compositor.clean().pixel(old_tip));
        assert_eq!(panel.pixel(Point::new(130, 234)), Some(Rgb565::RED));
    }

    #[test]
    fn repeated_second_keeps_single_clip() {
        let (layout, mut compositor, mut panel) = setup();
        compositor
            .full_redraw(&mut panel, &layout, &frame(), HandStyle::Filled)
            .unwrap();
        let entry = layout.second(12);

        compositor.second_update(&mut panel, entry, Rgb565::RED).unwrap();
        let touched = compositor.second_update(&mut panel, entry, Rgb565::RED).unwrap();
        assert_eq!(touched, entry.clip);
    }
}
