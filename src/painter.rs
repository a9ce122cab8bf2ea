//! Face painting shared by every compositor.
//!
//! The functions here draw onto any `DrawTarget<Color = Rgb565>`: the real
//! display, an off-screen [`Bitmap`](crate::surface::Bitmap) or a
//! [`Layer`](crate::surface::Layer). Compositors decide *where* to paint;
//! this module decides *what* a face looks like.
//!
//! Tick marks and hour/minute hands are rotated live with
//! [`Rotation`]; the second hand is only ever drawn from a cached
//! [`SecondEntry`].

use core::fmt::Write;

use embedded_graphics::{
    mono_font::{ascii::FONT_6X10, MonoTextStyle},
    pixelcolor::{Rgb565, RgbColor},
    prelude::{Dimensions, DrawTarget, OffsetOutline, Point, Primitive, Size},
    primitives::{
        Circle, Line, PrimitiveStyle, PrimitiveStyleBuilder, Rectangle, StrokeAlignment, Triangle,
    },
    text::{Alignment, Baseline, Text, TextStyle, TextStyleBuilder},
    Drawable,
};

use crate::cache::SecondEntry;
use crate::frame::FrameInputs;
use crate::geometry::{pct_to_px, Shape};
use crate::layout::FaceLayout;
use crate::palette::{ColorRole, Palette};
use crate::rotation::{hour_angle, minute_angle, second_angle, Rotation};
use crate::surface::bounding_union;
use crate::traits::HandStyle;

/// Hub radius, in percent of the clock diameter.
const HUB_PCT: f32 = 2.0;

/// Indicator dot radius, in percent of the clock diameter.
const DOT_PCT: f32 = 1.5;

/// Battery percentage at or below which the gauge turns to the low warning.
pub const BATTERY_LOW: u8 = 25;

/// Battery percentage at or below which the gauge turns critical.
pub const BATTERY_CRITICAL: u8 = 10;

// ============================================================================
// Polygons
// ============================================================================

/// Fills a four-corner shape as two triangles.
pub fn fill_polygon<D>(target: &mut D, corners: &[Point; 4], color: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = PrimitiveStyle::with_fill(color);
    let [a, b, c, d] = *corners;
    Triangle::new(a, b, c).into_styled(style).draw(target)?;
    Triangle::new(a, c, d).into_styled(style).draw(target)?;
    Ok(())
}

/// Strokes the outline of a four-corner shape, one pixel wide.
pub fn outline_polygon<D>(
    target: &mut D,
    corners: &[Point; 4],
    color: Rgb565,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let style = PrimitiveStyle::with_stroke(color, 1);
    for i in 0..corners.len() {
        let next = corners[(i + 1) % corners.len()];
        Line::new(corners[i], next).into_styled(style).draw(target)?;
    }
    Ok(())
}

// ============================================================================
// Background
// ============================================================================

/// Clears to the background color and draws tick marks and indicators.
pub fn draw_background<D>(
    target: &mut D,
    layout: &FaceLayout,
    frame: &FrameInputs,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    target.clear(frame.palette[ColorRole::Background])?;
    draw_ticks(target, layout, &frame.palette)?;
    draw_indicators(target, layout, frame)
}

/// Draws the 60 rim marks; every fifth one is an hour mark.
pub fn draw_ticks<D>(target: &mut D, layout: &FaceLayout, palette: &Palette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let big = layout.shapes().corners(Shape::BigTick);
    let small = layout.shapes().corners(Shape::SmallTick);
    let color = palette[ColorRole::Tick];

    for position in 0..60u8 {
        let corners = if position % 5 == 0 { &big } else { &small };
        let rotated = Rotation::new(second_angle(position)).apply_all(corners, layout.center());
        fill_polygon(target, &rotated, color)?;
    }
    Ok(())
}

// ============================================================================
// Indicators
// ============================================================================

/// Where each indicator sits for a given layout.
struct Spots {
    battery: Rectangle,
    connection: Point,
    alarm: Point,
    notification: Point,
    date: Point,
    dot: u32,
}

impl Spots {
    fn new(layout: &FaceLayout) -> Self {
        let c = layout.center();
        let r = layout.radius();
        let off = (r / 2) as i32;

        let width = pct_to_px(9.0, r).max(6) as u32;
        let height = pct_to_px(4.5, r).max(4) as u32;
        let battery = Rectangle::with_center(c + Point::new(0, off), Size::new(width, height));

        let dot_r = pct_to_px(DOT_PCT, r).max(1);
        Self {
            battery,
            connection: c - Point::new(0, off),
            alarm: c - Point::new(0, off - 4 * dot_r),
            notification: c - Point::new(off, 0),
            date: c + Point::new(off, 0),
            dot: (2 * dot_r + 1) as u32,
        }
    }

    fn nub(&self) -> Rectangle {
        let b = &self.battery;
        let h = (b.size.height / 2).max(1);
        Rectangle::new(
            b.top_left + Point::new(b.size.width as i32, ((b.size.height - h) / 2) as i32),
            Size::new(2, h),
        )
    }

    fn dot_bounds(&self, center: Point) -> Rectangle {
        Circle::with_center(center, self.dot).bounding_box()
    }
}

fn date_style() -> TextStyle {
    TextStyleBuilder::new()
        .alignment(Alignment::Center)
        .baseline(Baseline::Middle)
        .build()
}

/// Region covering every enabled indicator, whatever its current value.
///
/// Refreshing this region is enough to bring all indicators up to date.
///
/// ```rust
/// use tickface::config::FaceConfig;
/// use tickface::layout::FaceLayout;
/// use tickface::painter::indicator_bounds;
///
/// let layout = FaceLayout::from_config(&FaceConfig::default()).unwrap();
/// let area = indicator_bounds(&layout);
/// assert!(layout.bounds().intersection(&area) == area);
/// ```
pub fn indicator_bounds(layout: &FaceLayout) -> Rectangle {
    let spots = Spots::new(layout);
    let enabled = layout.indicators();
    let mut area = Rectangle::zero();

    if enabled.battery {
        area = bounding_union(&area, &spots.battery);
        area = bounding_union(&area, &spots.nub());
    }
    if enabled.connection {
        area = bounding_union(&area, &spots.dot_bounds(spots.connection));
    }
    if enabled.alarm {
        area = bounding_union(&area, &spots.dot_bounds(spots.alarm));
    }
    if enabled.notifications {
        area = bounding_union(&area, &spots.dot_bounds(spots.notification));
    }
    if enabled.date {
        let style = MonoTextStyle::new(&FONT_6X10, Rgb565::BLACK);
        let sample = Text::with_text_style("00", spots.date, style, date_style());
        area = bounding_union(&area, &sample.bounding_box());
    }
    area
}

/// Color of the battery gauge for `percent`.
pub fn battery_color(palette: &Palette, percent: u8) -> Rgb565 {
    if percent <= BATTERY_CRITICAL {
        palette[ColorRole::WarningCritical]
    } else if percent <= BATTERY_LOW {
        palette[ColorRole::WarningLow]
    } else {
        palette[ColorRole::Indicator]
    }
}

/// Draws the enabled status indicators.
pub fn draw_indicators<D>(
    target: &mut D,
    layout: &FaceLayout,
    frame: &FrameInputs,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let spots = Spots::new(layout);
    let enabled = layout.indicators();
    let status = &frame.indicators;
    let palette = &frame.palette;
    let normal = palette[ColorRole::Indicator];

    if enabled.battery {
        if let Some(percent) = status.battery_percent {
            let level = battery_color(palette, percent);
            spots
                .battery
                .into_styled(PrimitiveStyle::with_stroke(normal, 1))
                .draw(target)?;

            let inner = spots.battery.offset(-2);
            let filled = inner.size.width * u32::from(percent.min(100)) / 100;
            if filled > 0 {
                Rectangle::new(inner.top_left, Size::new(filled, inner.size.height))
                    .into_styled(PrimitiveStyle::with_fill(level))
                    .draw(target)?;
            }

            let nub = if status.charging {
                palette[ColorRole::Accent]
            } else {
                normal
            };
            spots
                .nub()
                .into_styled(PrimitiveStyle::with_fill(nub))
                .draw(target)?;
        }
    }

    if enabled.connection {
        let style = if status.phone_connected {
            PrimitiveStyle::with_fill(normal)
        } else {
            PrimitiveStyle::with_stroke(normal, 1)
        };
        Circle::with_center(spots.connection, spots.dot)
            .into_styled(style)
            .draw(target)?;
    }

    if enabled.alarm && status.alarm_set {
        Circle::with_center(spots.alarm, spots.dot)
            .into_styled(
                PrimitiveStyleBuilder::new()
                    .stroke_color(normal)
                    .stroke_width(2)
                    .stroke_alignment(StrokeAlignment::Inside)
                    .build(),
            )
            .draw(target)?;
    }

    if enabled.notifications && status.notifications > 0 {
        Circle::with_center(spots.notification, spots.dot)
            .into_styled(PrimitiveStyle::with_fill(palette[ColorRole::Accent]))
            .draw(target)?;
    }

    if enabled.date {
        if let Some(day) = status.day_of_month {
            let mut text: heapless::String<4> = heapless::String::new();
            if write!(text, "{}", day).is_ok() {
                let style = MonoTextStyle::new(&FONT_6X10, palette[ColorRole::Text]);
                Text::with_text_style(&text, spots.date, style, date_style()).draw(target)?;
            }
        }
    }

    Ok(())
}

// ============================================================================
// Hands
// ============================================================================

/// Draws the hour and minute hands and the hub.
pub fn draw_hands<D>(
    target: &mut D,
    layout: &FaceLayout,
    frame: &FrameInputs,
    style: HandStyle,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let center = layout.center();
    let shapes = layout.shapes();
    let reading = frame.reading;
    let palette = &frame.palette;

    let hour = Rotation::new(hour_angle(reading.hour, reading.minute))
        .apply_all(&shapes.corners(Shape::Hour), center);
    let minute =
        Rotation::new(minute_angle(reading.minute)).apply_all(&shapes.corners(Shape::Minute), center);

    match style {
        HandStyle::Filled => {
            fill_polygon(target, &hour, palette[ColorRole::HourHand])?;
            fill_polygon(target, &minute, palette[ColorRole::MinuteHand])?;
        }
        HandStyle::Wire => {
            outline_polygon(target, &hour, palette[ColorRole::HourHand])?;
            outline_polygon(target, &minute, palette[ColorRole::MinuteHand])?;
        }
    }

    let hub = 2 * pct_to_px(HUB_PCT, layout.radius()).max(1) + 1;
    Circle::with_center(center, hub as u32)
        .into_styled(PrimitiveStyle::with_fill(palette[ColorRole::Foreground]))
        .draw(target)
}

/// Draws the second hand from a cache entry. No trigonometry.
pub fn draw_second_hand<D>(target: &mut D, entry: &SecondEntry, accent: Rgb565) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    fill_polygon(target, &entry.polygon, accent)?;
    Circle::with_center(entry.circle, 2 * entry.circle_radius + 1)
        .into_styled(PrimitiveStyle::with_fill(accent))
        .draw(target)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{FaceConfig, IndicatorConfig};
    use crate::hal::MockPanel;
    use crate::palette::rgb;
    use crate::traits::{ClockReading, Indicators};

    fn layout() -> FaceLayout {
        FaceLayout::from_config(&FaceConfig::default()).unwrap()
    }

    fn frame() -> FrameInputs {
        FrameInputs::new(ClockReading::new(10, 8, 0), Palette::default())
    }

    #[test]
    fn second_hand_stays_inside_clip() {
        let layout = layout();
        for s in 0..60 {
            let entry = layout.second(s);
            let mut panel = MockPanel::new(layout.size());
            draw_second_hand(&mut panel, entry, Rgb565::RED).unwrap();
            assert!(panel.touched_within(&entry.clip), "second {}", s);
        }
    }

    #[test]
    fn second_hand_paints_tip_circle_center() {
        let layout = layout();
        let mut panel = MockPanel::new(layout.size());
        draw_second_hand(&mut panel, layout.second(0), Rgb565::RED).unwrap();
        assert_eq!(panel.pixel(Point::new(130, 26)), Some(Rgb565::RED));
    }

    #[test]
    fn background_paints_every_tick() {
        let layout = layout();
        let palette = Palette::default().with(ColorRole::Tick, Rgb565::GREEN);
        let mut panel = MockPanel::new(layout.size());
        draw_ticks(&mut panel, &layout, &palette).unwrap();

        // 12 o'clock hour mark is a filled block at the top of the rim
        assert_eq!(panel.pixel(Point::new(130, 4)), Some(Rgb565::GREEN));
        // 3 o'clock mark on the right rim
        assert_eq!(panel.pixel(Point::new(256, 130)), Some(Rgb565::GREEN));
    }

    #[test]
    fn wire_hands_leave_interior_unpainted() {
        let layout = layout();
        let frame = FrameInputs::new(ClockReading::new(0, 0, 0), Palette::default());
        let hand = frame.palette[ColorRole::MinuteHand];

        let mut filled = MockPanel::new(layout.size());
        draw_hands(&mut filled, &layout, &frame, HandStyle::Filled).unwrap();
        let mut wire = MockPanel::new(layout.size());
        draw_hands(&mut wire, &layout, &frame, HandStyle::Wire).unwrap();

        assert!(wire.count_color(hand) < filled.count_color(hand));
        // Just above the hub, on the minute hand's axis
        assert_eq!(filled.pixel(Point::new(130, 90)), Some(hand));
        assert_eq!(wire.pixel(Point::new(130, 90)), Some(Rgb565::BLACK));
    }

    #[test]
    fn battery_color_tiers() {
        let palette = Palette::default();
        assert_eq!(battery_color(&palette, 5), palette[ColorRole::WarningCritical]);
        assert_eq!(battery_color(&palette, 10), palette[ColorRole::WarningCritical]);
        assert_eq!(battery_color(&palette, 20), palette[ColorRole::WarningLow]);
        assert_eq!(battery_color(&palette, 80), palette[ColorRole::Indicator]);
    }

    #[test]
    fn indicators_draw_inside_their_bounds() {
        let layout = layout();
        let status = Indicators {
            battery_percent: Some(42),
            charging: true,
            phone_connected: true,
            notifications: 2,
            alarm_set: true,
            do_not_disturb: false,
            day_of_month: Some(28),
        };
        let mut panel = MockPanel::new(layout.size());
        draw_indicators(&mut panel, &layout, &frame().with_indicators(status)).unwrap();

        assert!(panel.write_count() > 0);
        assert!(panel.touched_within(&indicator_bounds(&layout)));
    }

    #[test]
    fn disabled_indicators_draw_nothing() {
        let config = FaceConfig::default().with_indicators(IndicatorConfig::none());
        let layout = FaceLayout::from_config(&config).unwrap();
        let status = Indicators {
            battery_percent: Some(3),
            notifications: 9,
            ..Indicators::default()
        };
        let mut panel = MockPanel::new(layout.size());
        draw_indicators(&mut panel, &layout, &frame().with_indicators(status)).unwrap();

        assert_eq!(panel.write_count(), 0);
        assert!(indicator_bounds(&layout).is_zero_sized());
    }

    #[test]
    fn background_uses_palette_background() {
        let layout = layout();
        let palette = Palette::default().with(ColorRole::Background, rgb(0x102030));
        let frame = FrameInputs::new(ClockReading::new(1, 2, 3), palette);
        let mut panel = MockPanel::new(layout.size());
        draw_background(&mut panel, &layout, &frame).unwrap();
        assert_eq!(panel.pixel(Point::zero()), Some(rgb(0x102030)));
    }
}
