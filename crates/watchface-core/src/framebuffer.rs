//! RAM framebuffer with change tracking.
//!
//! The watchface draws into this buffer; only the bounding box of pixels
//! that changed since the last flush is pushed to the real display. The
//! buffer is sized from the [`ScreenShape`], so round screens get a
//! 180x180 square whose corners are simply never visible.

use alloc::vec;
use alloc::vec::Vec;
use core::convert::Infallible;
use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;
use log::debug;

use crate::config::ScreenShape;

/// Bounding box of pixels that have changed since the last flush.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct DirtyRect {
    min_x: usize,
    min_y: usize,
    max_x: usize,
    max_y: usize,
}

impl DirtyRect {
    fn from_point(x: usize, y: usize) -> Self {
        Self {
            min_x: x,
            min_y: y,
            max_x: x,
            max_y: y,
        }
    }

    fn expand(&mut self, x: usize, y: usize) {
        self.min_x = self.min_x.min(x);
        self.min_y = self.min_y.min(y);
        self.max_x = self.max_x.max(x);
        self.max_y = self.max_y.max(y);
    }

    fn area(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.min_x as i32, self.min_y as i32),
            Size::new(
                (self.max_x - self.min_x + 1) as u32,
                (self.max_y - self.min_y + 1) as u32,
            ),
        )
    }
}

pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<Rgb565>,
    dirty: Option<DirtyRect>,
}

impl FrameBuffer {
    /// Allocate a black framebuffer covering the whole screen.
    pub fn new(shape: ScreenShape) -> Self {
        let width = shape.width() as usize;
        let height = shape.height() as usize;
        Self {
            width,
            height,
            pixels: vec![Rgb565::BLACK; width * height],
            dirty: None,
        }
    }

    /// Color at a pixel, or `None` outside the buffer.
    pub fn pixel(&self, x: usize, y: usize) -> Option<Rgb565> {
        if x < self.width && y < self.height {
            self.pixels.get(y * self.width + x).copied()
        } else {
            None
        }
    }

    /// Region waiting to be flushed, if any.
    pub fn dirty_area(&self) -> Option<Rectangle> {
        self.dirty.map(|rect| rect.area())
    }

    #[inline]
    fn set_pixel(&mut self, x: usize, y: usize, color: Rgb565) {
        let idx = y * self.width + x;
        if self.pixels[idx] != color {
            self.pixels[idx] = color;
            match &mut self.dirty {
                Some(rect) => rect.expand(x, y),
                None => self.dirty = Some(DirtyRect::from_point(x, y)),
            }
        }
    }

    /// Part of `area` that lies on the buffer, as pixel index ranges.
    fn clip(&self, area: &Rectangle) -> Option<(core::ops::Range<usize>, core::ops::Range<usize>)> {
        let visible = area.intersection(&self.bounding_box());
        let bottom_right = visible.bottom_right()?;
        let x = visible.top_left.x as usize..bottom_right.x as usize + 1;
        let y = visible.top_left.y as usize..bottom_right.y as usize + 1;
        Some((x, y))
    }

    /// Push the changed region to `display` and reset change tracking.
    ///
    /// Does nothing when no pixel changed since the last flush.
    pub fn flush<D>(&mut self, display: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = Rgb565>,
    {
        let Some(rect) = self.dirty.take() else {
            return Ok(());
        };
        let area = rect.area();
        debug!(
            "Flushing {}x{} dirty region at ({}, {})",
            area.size.width, area.size.height, rect.min_x, rect.min_y
        );

        let pixels = &self.pixels;
        let stride = self.width;
        let row_len = area.size.width as usize;
        let colors = (rect.min_y..=rect.max_y).flat_map(move |y| {
            let start = y * stride + rect.min_x;
            pixels[start..start + row_len].iter().copied()
        });

        display.fill_contiguous(&area, colors)
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width as u32, self.height as u32)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(coord, color) in pixels {
            if coord.x >= 0
                && coord.y >= 0
                && (coord.x as usize) < self.width
                && (coord.y as usize) < self.height
            {
                self.set_pixel(coord.x as usize, coord.y as usize, color);
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        // Colors cover the whole area in row order, clipped or not.
        let pixels = area
            .points()
            .zip(colors)
            .map(|(point, color)| Pixel(point, color));
        self.draw_iter(pixels)
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let Some((xs, ys)) = self.clip(area) else {
            return Ok(());
        };
        for y in ys {
            for x in xs.clone() {
                self.set_pixel(x, y, color);
            }
        }
        Ok(())
    }

    fn clear(&mut self, color: Self::Color) -> Result<(), Self::Error> {
        self.fill_solid(&self.bounding_box(), color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;
    use embedded_graphics::primitives::{Circle, PrimitiveStyle};

    #[test]
    fn test_size_follows_shape() {
        assert_eq!(FrameBuffer::new(ScreenShape::Rect).size(), Size::new(144, 168));
        assert_eq!(FrameBuffer::new(ScreenShape::Round).size(), Size::new(180, 180));
    }

    #[test]
    fn test_fill_solid_clips_negative_origin() {
        let mut fb = FrameBuffer::new(ScreenShape::Rect);
        fb.fill_solid(
            &Rectangle::new(Point::new(-10, -10), Size::new(15, 12)),
            Rgb565::RED,
        )
        .unwrap();

        assert_eq!(fb.pixel(0, 0), Some(Rgb565::RED));
        assert_eq!(fb.pixel(4, 1), Some(Rgb565::RED));
        assert_eq!(fb.pixel(5, 1), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(4, 2), Some(Rgb565::BLACK));
        assert_eq!(
            fb.dirty_area(),
            Some(Rectangle::new(Point::zero(), Size::new(5, 2)))
        );
    }

    #[test]
    fn test_oversized_disc_is_clipped() {
        let mut fb = FrameBuffer::new(ScreenShape::Round);
        Circle::new(Point::new(-90, -309), 360)
            .into_styled(PrimitiveStyle::with_fill(Rgb565::BLUE))
            .draw(&mut fb)
            .unwrap();

        assert_eq!(fb.pixel(90, 48), Some(Rgb565::BLUE));
        assert_eq!(fb.pixel(90, 53), Some(Rgb565::BLACK));
        assert_eq!(fb.pixel(200, 0), None);
    }

    #[test]
    fn test_fill_contiguous_keeps_row_order_when_clipped() {
        let mut fb = FrameBuffer::new(ScreenShape::Rect);
        let colors = [Rgb565::RED, Rgb565::GREEN, Rgb565::BLUE, Rgb565::WHITE];
        fb.fill_contiguous(
            &Rectangle::new(Point::new(-1, 0), Size::new(2, 2)),
            colors,
        )
        .unwrap();

        assert_eq!(fb.pixel(0, 0), Some(Rgb565::GREEN));
        assert_eq!(fb.pixel(0, 1), Some(Rgb565::WHITE));
    }

    #[test]
    fn test_unchanged_pixels_do_not_mark_dirty() {
        let mut fb = FrameBuffer::new(ScreenShape::Rect);
        fb.clear(Rgb565::BLACK).unwrap();
        assert_eq!(fb.dirty_area(), None);
    }

    #[test]
    fn test_flush_sends_only_dirty_region() {
        let mut fb = FrameBuffer::new(ScreenShape::Rect);
        fb.fill_solid(&Rectangle::new(Point::new(2, 3), Size::new(2, 1)), Rgb565::RED)
            .unwrap();

        let mut display = MockDisplay::<Rgb565>::new();
        fb.flush(&mut display).unwrap();

        assert_eq!(display.get_pixel(Point::new(2, 3)), Some(Rgb565::RED));
        assert_eq!(display.get_pixel(Point::new(3, 3)), Some(Rgb565::RED));
        assert_eq!(display.get_pixel(Point::new(1, 3)), None);
        assert_eq!(fb.dirty_area(), None);
    }
}
