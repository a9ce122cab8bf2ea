//! Off-screen drawing surfaces.
//!
//! - [`Bitmap`]: an opaque RGB565 buffer, used as the clean face copy by the
//!   buffered compositor.
//! - [`Layer`]: a buffer with per-pixel transparency, used by the layered
//!   compositor; [`compose`] flattens a stack of layers onto a display.
//!
//! Both implement [`DrawTarget`], so the painting code is shared with the
//! real display. Pixels outside the surface are silently dropped.

extern crate alloc;

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;

use embedded_graphics::{
    pixelcolor::Rgb565,
    prelude::{Dimensions, DrawTarget, OriginDimensions, Point, Size},
    primitives::{PointsIter, Rectangle},
    Pixel,
};

#[inline]
fn offset(size: Size, p: Point) -> Option<usize> {
    if p.x < 0 || p.y < 0 {
        return None;
    }
    let (x, y) = (p.x as u32, p.y as u32);
    if x >= size.width || y >= size.height {
        return None;
    }
    Some((y * size.width + x) as usize)
}

/// Unwraps the result of drawing onto an in-memory surface.
#[inline]
pub(crate) fn infallible<T>(result: Result<T, Infallible>) -> T {
    match result {
        Ok(value) => value,
        Err(never) => match never {},
    }
}

/// Smallest rectangle containing both `a` and `b`.
///
/// A zero-sized rectangle counts as empty.
///
/// ```rust
/// use embedded_graphics::{prelude::*, primitives::Rectangle};
/// use tickface::surface::bounding_union;
///
/// let a = Rectangle::new(Point::new(0, 0), Size::new(2, 2));
/// let b = Rectangle::new(Point::new(5, 1), Size::new(1, 4));
/// assert_eq!(
///     bounding_union(&a, &b),
///     Rectangle::with_corners(Point::new(0, 0), Point::new(5, 4))
/// );
/// assert_eq!(bounding_union(&Rectangle::zero(), &b), b);
/// ```
pub fn bounding_union(a: &Rectangle, b: &Rectangle) -> Rectangle {
    match (a.bottom_right(), b.bottom_right()) {
        (None, _) => *b,
        (_, None) => *a,
        (Some(a_max), Some(b_max)) => Rectangle::with_corners(
            a.top_left.component_min(b.top_left),
            a_max.component_max(b_max),
        ),
    }
}

/// Opaque off-screen buffer.
///
/// # Example
///
/// ```rust
/// use embedded_graphics::{pixelcolor::Rgb565, prelude::*, primitives::Rectangle};
/// use tickface::hal::MockPanel;
/// use tickface::surface::Bitmap;
///
/// let mut bitmap = Bitmap::new(Size::new(8, 8), Rgb565::BLACK);
/// bitmap.fill_solid(&Rectangle::new(Point::new(2, 2), Size::new(2, 2)), Rgb565::RED).unwrap();
///
/// let mut panel = MockPanel::new(Size::new(8, 8));
/// bitmap.blit(&mut panel, &Rectangle::new(Point::new(2, 2), Size::new(3, 3))).unwrap();
///
/// assert_eq!(panel.pixel(Point::new(3, 3)), Some(Rgb565::RED));
/// assert_eq!(panel.write_count(), 9);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bitmap {
    size: Size,
    pixels: Vec<Rgb565>,
}

impl Bitmap {
    /// Allocates a buffer of `size` filled with `fill`.
    pub fn new(size: Size, fill: Rgb565) -> Self {
        Self {
            size,
            pixels: vec![fill; (size.width * size.height) as usize],
        }
    }

    /// Color at `p`, if inside the buffer.
    pub fn pixel(&self, p: Point) -> Option<Rgb565> {
        offset(self.size, p).map(|i| self.pixels[i])
    }

    /// Raw pixels, row-major.
    pub fn pixels(&self) -> &[Rgb565] {
        &self.pixels
    }

    /// Copies `area` (clamped to the buffer) to the same place on `target`.
    ///
    /// Streams pixels straight from the buffer; nothing is allocated.
    pub fn blit<D>(&self, target: &mut D, area: &Rectangle) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return Ok(());
        }
        let width = self.size.width as usize;
        let pixels = &self.pixels;
        target.fill_contiguous(
            &area,
            area.points()
                .map(|p| pixels[p.y as usize * width + p.x as usize]),
        )
    }
}

impl OriginDimensions for Bitmap {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Bitmap {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if let Some(i) = offset(self.size, p) {
                self.pixels[i] = color;
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(color);
        Ok(())
    }
}

/// Off-screen buffer with per-pixel transparency.
///
/// Drawing makes pixels opaque; [`clear_region`](Self::clear_region) makes
/// them transparent again.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Layer {
    size: Size,
    pixels: Vec<Option<Rgb565>>,
}

impl Layer {
    /// Allocates a fully transparent layer.
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![None; (size.width * size.height) as usize],
        }
    }

    /// Color at `p`, or `None` when transparent or outside the layer.
    #[inline]
    pub fn pixel(&self, p: Point) -> Option<Rgb565> {
        offset(self.size, p).and_then(|i| self.pixels[i])
    }

    /// Makes the whole layer transparent.
    pub fn clear_transparent(&mut self) {
        self.pixels.fill(None);
    }

    /// Makes `area` (clamped to the layer) transparent.
    pub fn clear_region(&mut self, area: &Rectangle) {
        let area = area.intersection(&self.bounding_box());
        if area.is_zero_sized() {
            return;
        }
        let width = self.size.width as usize;
        let x0 = area.top_left.x as usize;
        let w = area.size.width as usize;
        for row in 0..area.size.height as usize {
            let start = (area.top_left.y as usize + row) * width + x0;
            self.pixels[start..start + w].fill(None);
        }
    }

    /// Number of opaque pixels.
    pub fn opaque_count(&self) -> usize {
        self.pixels.iter().filter(|p| p.is_some()).count()
    }
}

impl OriginDimensions for Layer {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for Layer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if let Some(i) = offset(self.size, p) {
                self.pixels[i] = Some(color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.pixels.fill(Some(color));
        Ok(())
    }
}

/// Flattens `layers` (bottom first) over `backdrop` within `area` onto
/// `target`.
///
/// Stands in for the host's layer compositor: each output pixel is the
/// topmost opaque layer pixel, or `backdrop` where every layer is
/// transparent.
pub fn compose<D>(
    target: &mut D,
    layers: &[&Layer],
    backdrop: Rgb565,
    area: &Rectangle,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = Rgb565>,
{
    let Some(first) = layers.first() else {
        return Ok(());
    };
    let area = area.intersection(&first.bounding_box());
    if area.is_zero_sized() {
        return Ok(());
    }
    target.fill_contiguous(
        &area,
        area.points().map(|p| {
            layers
                .iter()
                .rev()
                .find_map(|layer| layer.pixel(p))
                .unwrap_or(backdrop)
        }),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hal::MockPanel;
    use embedded_graphics::pixelcolor::RgbColor;

    fn rect(x: i32, y: i32, w: u32, h: u32) -> Rectangle {
        Rectangle::new(Point::new(x, y), Size::new(w, h))
    }

    #[test]
    fn union_of_overlapping_rects() {
        let a = rect(2, 2, 4, 4);
        let b = rect(4, 0, 4, 3);
        assert_eq!(bounding_union(&a, &b), rect(2, 0, 6, 6));
        assert_eq!(bounding_union(&a, &Rectangle::zero()), a);
    }

    #[test]
    fn bitmap_ignores_out_of_bounds() {
        let mut bitmap = Bitmap::new(Size::new(4, 4), Rgb565::BLACK);
        bitmap
            .draw_iter([Pixel(Point::new(-1, 0), Rgb565::RED), Pixel(Point::new(4, 4), Rgb565::RED)])
            .unwrap();
        assert!(bitmap.pixels().iter().all(|c| *c == Rgb565::BLACK));
    }

    #[test]
    fn blit_clamps_to_bitmap() {
        let bitmap = Bitmap::new(Size::new(10, 10), Rgb565::BLUE);
        let mut panel = MockPanel::new(Size::new(10, 10));
        bitmap.blit(&mut panel, &rect(8, 8, 5, 5)).unwrap();
        assert_eq!(panel.write_count(), 4);
        assert_eq!(panel.touched(), Some(rect(8, 8, 2, 2)));
    }

    #[test]
    fn blit_outside_is_noop() {
        let bitmap = Bitmap::new(Size::new(10, 10), Rgb565::BLUE);
        let mut panel = MockPanel::new(Size::new(10, 10));
        bitmap.blit(&mut panel, &rect(20, 20, 5, 5)).unwrap();
        assert_eq!(panel.write_count(), 0);
    }

    #[test]
    fn layer_clear_region_is_clamped() {
        let mut layer = Layer::new(Size::new(6, 6));
        layer.clear(Rgb565::RED).unwrap();
        layer.clear_region(&rect(4, 4, 10, 10));
        assert_eq!(layer.opaque_count(), 36 - 4);
        assert_eq!(layer.pixel(Point::new(5, 5)), None);
        assert_eq!(layer.pixel(Point::new(3, 5)), Some(Rgb565::RED));
    }

    #[test]
    fn compose_takes_topmost_opaque() {
        let size = Size::new(4, 1);
        let mut bottom = Layer::new(size);
        let mut top = Layer::new(size);
        bottom.fill_solid(&rect(0, 0, 2, 1), Rgb565::RED).unwrap();
        top.fill_solid(&rect(1, 0, 2, 1), Rgb565::GREEN).unwrap();

        let mut panel = MockPanel::new(size);
        compose(&mut panel, &[&bottom, &top], Rgb565::BLACK, &rect(0, 0, 4, 1)).unwrap();

        assert_eq!(panel.pixel(Point::new(0, 0)), Some(Rgb565::RED));
        assert_eq!(panel.pixel(Point::new(1, 0)), Some(Rgb565::GREEN));
        assert_eq!(panel.pixel(Point::new(2, 0)), Some(Rgb565::GREEN));
        assert_eq!(panel.pixel(Point::new(3, 0)), Some(Rgb565::BLACK));
    }
}
