//! In-memory display for unit tests.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::Rgb565;
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

/// Framebuffer that remembers which pixels were ever written and which
/// windows were streamed with `fill_contiguous`.
pub struct FrameBuffer {
    width: u32,
    height: u32,
    pixels: std::vec::Vec<Option<Rgb565>>,
    pub windows: std::vec::Vec<Rectangle>,
}

impl FrameBuffer {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: std::vec![None; (width * height) as usize],
            windows: std::vec::Vec::new(),
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<Rgb565> {
        if x < 0 || y < 0 || x as u32 >= self.width || y as u32 >= self.height {
            return None;
        }
        self.pixels[(y as u32 * self.width + x as u32) as usize]
    }

    pub fn snapshot(&self) -> std::vec::Vec<Option<Rgb565>> {
        self.pixels.clone()
    }

    /// Forgets all writes, so later checks only see new ones.
    pub fn reset(&mut self) {
        self.pixels.iter_mut().for_each(|p| *p = None);
        self.windows.clear();
    }
}

impl OriginDimensions for FrameBuffer {
    fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }
}

impl DrawTarget for FrameBuffer {
    type Color = Rgb565;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(p, color) in pixels {
            if p.x >= 0 && p.y >= 0 && (p.x as u32) < self.width && (p.y as u32) < self.height {
                self.pixels[(p.y as u32 * self.width + p.x as u32) as usize] = Some(color);
            }
        }
        Ok(())
    }

    fn fill_contiguous<I>(&mut self, area: &Rectangle, colors: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Self::Color>,
    {
        self.windows.push(*area);
        let pixels = area
            .points()
            .zip(colors)
            .map(|(p, c)| Pixel(p, c))
            .collect::<std::vec::Vec<_>>();
        self.draw_iter(pixels)
    }
}
