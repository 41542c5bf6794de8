//! In-memory draw target for unit tests.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Round wearable resolutions every drawing test should survive.
pub const SCREEN_SIZES: [u32; 7] = [208, 218, 240, 260, 280, 390, 416];

/// Framebuffer that remembers which pixels were written and how many writes happened.
pub struct RecordingDisplay {
    size: Size,
    pixels: Vec<Option<Rgb565>>,
    /// Total in-bounds pixel writes since creation or the last [`reset_writes`](Self::reset_writes).
    pub writes: usize,
    /// Bounding box of all writes since the last reset.
    pub touched: Option<Rectangle>,
}

impl RecordingDisplay {
    pub fn new(size: Size) -> Self {
        Self {
            size,
            pixels: vec![None; (size.width * size.height) as usize],
            writes: 0,
            touched: None,
        }
    }

    fn index(&self, p: Point) -> Option<usize> {
        let inside = p.x >= 0
            && p.y >= 0
            && (p.x as u32) < self.size.width
            && (p.y as u32) < self.size.height;
        inside.then(|| p.y as usize * self.size.width as usize + p.x as usize)
    }

    /// Color last written at `p`, `None` if never written or out of bounds.
    pub fn pixel(&self, p: Point) -> Option<Rgb565> {
        self.index(p).and_then(|i| self.pixels[i])
    }

    /// Number of pixels currently holding `color`.
    pub fn count(&self, color: Rgb565) -> usize {
        self.pixels.iter().filter(|&&c| c == Some(color)).count()
    }

    /// Distinct x columns containing at least one `color` pixel, ascending.
    pub fn columns_with(&self, color: Rgb565) -> Vec<i32> {
        let width = self.size.width as usize;
        let mut columns: Vec<i32> = self
            .pixels
            .iter()
            .enumerate()
            .filter(|(_, c)| **c == Some(color))
            .map(|(i, _)| (i % width) as i32)
            .collect();
        columns.sort_unstable();
        columns.dedup();
        columns
    }

    pub fn reset_writes(&mut self) {
        self.writes = 0;
        self.touched = None;
    }

    fn record(&mut self, p: Point) {
        self.writes += 1;
        let (min, max) = match self.touched.and_then(|r| r.bottom_right().map(|br| (r.top_left, br))) {
            Some((tl, br)) => (
                Point::new(tl.x.min(p.x), tl.y.min(p.y)),
                Point::new(br.x.max(p.x), br.y.max(p.y)),
            ),
            None => (p, p),
        };
        self.touched = Some(Rectangle::with_corners(min, max));
    }
}

impl OriginDimensions for RecordingDisplay {
    fn size(&self) -> Size {
        self.size
    }
}

impl DrawTarget for RecordingDisplay {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if let Some(i) = self.index(p) {
                self.pixels[i] = Some(color);
                self.record(p);
            }
        }
        Ok(())
    }
}
