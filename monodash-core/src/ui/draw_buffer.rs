//! Partial draw buffer
//!
//! The UI never holds a full-screen color framebuffer. Each dirty band is
//! rendered into this fixed window, handed to the port as a
//! [`PixelRegion`], and the window is reused for the next band once the
//! flush is acknowledged.

use core::convert::Infallible;

use embedded_graphics::pixelcolor::{Gray8, GrayColor};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::Rectangle;

use crate::display::{Area, PixelRegion};

/// Color the UI renders in
pub type UiColor = Gray8;

/// Background color of every widget
pub const BACKGROUND: UiColor = Gray8::BLACK;

/// Foreground color of every widget
pub const FOREGROUND: UiColor = Gray8::WHITE;

/// Render window of at most `N` pixels
pub struct DrawBuffer<const N: usize> {
    pixels: [UiColor; N],
    window: Area,
}

impl<const N: usize> Default for DrawBuffer<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> DrawBuffer<N> {
    pub const fn new() -> Self {
        Self {
            pixels: [BACKGROUND; N],
            window: Area {
                x1: 0,
                y1: 0,
                x2: 0,
                y2: 0,
            },
        }
    }

    /// Pixel capacity
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Rows of a `width`-wide band that fit
    pub const fn rows_for_width(width: u16) -> u16 {
        if width == 0 {
            return 0;
        }
        let rows = N / width as usize;
        if rows > u16::MAX as usize {
            u16::MAX
        } else {
            rows as u16
        }
    }

    /// Point the window at `area` and fill it with background
    ///
    /// Returns `false` (window unchanged) when the area does not fit.
    pub fn begin(&mut self, area: Area) -> bool {
        let len = area.pixel_count();
        if len > N {
            return false;
        }
        self.window = area;
        self.pixels[..len].fill(BACKGROUND);
        true
    }

    pub fn window(&self) -> Area {
        self.window
    }

    /// The rendered window as a region for the port
    pub fn region(&self) -> PixelRegion<'_, UiColor> {
        // `begin` only accepts windows that fit
        let len = self.window.pixel_count();
        PixelRegion::from_parts(self.window, &self.pixels[..len])
    }

    #[inline]
    fn put(&mut self, x: i32, y: i32, color: UiColor) {
        let w = self.window;
        if x < w.x1 as i32 || y < w.y1 as i32 || x > w.x2 as i32 || y > w.y2 as i32 {
            return;
        }
        let idx = (y as usize - w.y1 as usize) * w.width() as usize + (x as usize - w.x1 as usize);
        self.pixels[idx] = color;
    }
}

impl<const N: usize> Dimensions for DrawBuffer<N> {
    fn bounding_box(&self) -> Rectangle {
        self.window.to_rectangle()
    }
}

impl<const N: usize> DrawTarget for DrawBuffer<N> {
    type Color = UiColor;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            self.put(point.x, point.y, color);
        }
        Ok(())
    }

    fn fill_solid(&mut self, area: &Rectangle, color: Self::Color) -> Result<(), Self::Error> {
        let clipped = area.intersection(&self.bounding_box());
        if let Some(bottom_right) = clipped.bottom_right() {
            for y in clipped.top_left.y..=bottom_right.y {
                for x in clipped.top_left.x..=bottom_right.x {
                    self.put(x, y, color);
                }
            }
        }
        Ok(())
    }
}
