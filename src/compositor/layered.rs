//! Layer-stack compositor.

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
use crate::palette::ColorRole;
use crate::surface::{bounding_union, compose, infallible, Layer};
use crate::traits::{Compositor, CompositorKind, HandStyle};

/// Three independent layers, bottom to top:
///
/// 1. background: tick marks and indicators (opaque)
/// 2. hands: hour and minute hands with the hub
/// 3. seconds: the second hand only
///
/// Moving the second hand only clears and repaints two small regions of the
/// seconds layer. Indicators can be refreshed on their own with
/// [`refresh_indicators`](Self::refresh_indicators) without touching the
/// hands.
#[derive(Clone, Debug)]
pub struct LayeredCompositor {
    background: Layer,
    hands: Layer,
    seconds: Layer,
    backdrop: Rgb565,
    last_clip: Option<Rectangle>,
}

impl LayeredCompositor {
    /// The background layer.
    pub fn background(&self) -> &Layer {
        &self.background
    }

    /// The hour/minute hand layer.
    pub fn hands(&self) -> &Layer {
        &self.hands
    }

    /// The second-hand layer.
    pub fn seconds(&self) -> &Layer {
        &self.seconds
    }

    /// Repaints the indicators on the background layer and composites the
    /// indicator region to `target`.
    ///
    /// Returns the region written.
    pub fn refresh_indicators<D>(
        &mut self,
        target: &mut D,
        layout: &FaceLayout,
        frame: &FrameInputs,
    ) -> Result<Rectangle, D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let area = painter::indicator_bounds(layout);
        if area.is_zero_sized() {
            return Ok(area);
        }

        let mut region = self.background.clipped(&area);
        infallible(region.clear(frame.palette[ColorRole::Background]));
        infallible(painter::draw_ticks(&mut region, layout, &frame.palette));
        infallible(painter::draw_indicators(&mut region, layout, frame));

        self.backdrop = frame.palette[ColorRole::Background];
        compose(target, &self.stack(), self.backdrop, &area)?;
        Ok(area)
    }

    fn stack(&self) -> [&Layer; 3] {
        [&self.background, &self.hands, &self.seconds]
    }
}

impl Compositor for LayeredCompositor {
    const KIND: CompositorKind = CompositorKind::Layered;
    const LOW_POWER_SECONDS: bool = true;
    const REDRAWS_EVERY_TICK: bool = false;

    fn with_layout(layout: &FaceLayout) -> Self {
        let size = layout.size();
        Self {
            background: Layer::new(size),
            hands: Layer::new(size),
            seconds: Layer::new(size),
            backdrop: Rgb565::BLACK,
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
        infallible(painter::draw_background(&mut self.background, layout, frame));

        self.hands.clear_transparent();
        infallible(painter::draw_hands(&mut self.hands, layout, frame, hands));

        self.seconds.clear_transparent();
        self.last_clip = None;

        self.backdrop = frame.palette[ColorRole::Background];
        compose(target, &self.stack(), self.backdrop, &layout.bounds())
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
        let previous = self.last_clip.take().filter(|clip| *clip != entry.clip);
        if let Some(clip) = previous {
            self.seconds.clear_region(&clip);
        }
        self.seconds.clear_region(&entry.clip);
        infallible(painter::draw_second_hand(
            &mut self.seconds.clipped(&entry.clip),
            entry,
            accent,
        ));
        self.last_clip = Some(entry.clip);

        let mut touched = entry.clip;
        if let Some(clip) = previous {
            compose(target, &self.stack(), self.backdrop, &clip)?;
            touched = bounding_union(&touched, &clip);
        }
        compose(target, &self.stack(), self.backdrop, &entry.clip)?;
        Ok(touched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FaceConfig;
    use crate::hal::MockPanel;
    use crate::palette::Palette;
    use crate::traits::{ClockReading, Indicators};

    fn setup() -> (FaceLayout, LayeredCompositor, MockPanel) {
        let layout = FaceLayout::from_config(&FaceConfig::default()).unwrap();
        let compositor = LayeredCompositor::with_layout(&layout);
        let panel = MockPanel::new(layout.size());
        (layout, compositor, panel)
    }

    fn frame() -> FrameInputs {
        FrameInputs::new(ClockReading::new(7, 20, 0), Palette::default())
    }

    #[test]
    fn full_redraw_empties_seconds_layer() {
        let (layout, mut compositor, mut panel) = setup();
        compositor
            .full_redraw(&mut panel, &layout, &frame(), HandStyle::Filled)
            .unwrap();
        compositor
            .second_update(&mut panel, layout.second(3), Rgb565::RED)
            .unwrap();
        assert!(compositor.seconds().opaque_count() > 0);

        compositor
            .full_redraw(&mut panel, &layout, &frame(), HandStyle::Filled)
            .unwrap();
        assert_eq!(compositor.seconds().opaque_count(), 0);
    }

    #[test]
    fn background_layer_is_opaque() {
        let (layout, mut compositor, mut panel) = setup();
        compositor
            .full_redraw(&mut panel, &layout, &frame(), HandStyle::Filled)
            .unwrap();
        let pixels = (layout.size().width * layout.size().height) as usize;
        assert_eq!(compositor.background().opaque_count(), pixels);
    }

    #[test]
    fn consecutive_seconds_stay_in_union() {
        let (layout, mut compositor, mut panel) = setup();
        compositor
            .full_redraw(&mut panel, &layout, &frame(), HandStyle::Filled)
            .unwrap();
        compositor
            .second_update(&mut panel, layout.second(20), Rgb565::RED)
            .unwrap();
        panel.reset_tracking();

        let touched = compositor
            .second_update(&mut panel, layout.second(21), Rgb565::RED)
            .unwrap();
        let union = bounding_union(&layout.second(20).clip, &layout.second(21).clip);

        assert_eq!(touched, union);
        assert!(panel.touched_within(&union));
    }

    #[test]
    fn refresh_indicators_touches_only_indicator_region() {
        let (layout, mut compositor, mut panel) = setup();
        compositor
            .full_redraw(&mut panel, &layout, &frame(), HandStyle::Filled)
            .unwrap();
        panel.reset_tracking();

        let status = Indicators {
            notifications: 1,
            ..Indicators::default()
        };
        let area = compositor
            .refresh_indicators(&mut panel, &layout, &frame().with_indicators(status))
            .unwrap();

        assert_eq!(area, painter::indicator_bounds(&layout));
        assert!(panel.touched_within(&area));
        assert!(panel.write_count() > 0);
    }
}
