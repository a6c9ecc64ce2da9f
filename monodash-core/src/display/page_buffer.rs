//! Page-organized 1-bit frame memory
//!
//! Mirrors the GDDRAM layout of SSD1306/SH1106 class controllers: the
//! 128x64 panel is split into 8 pages of 8 rows; each byte holds one column
//! of a page with bit `y & 7` as the pixel in row `y`.

use super::area::{Area, PAGE_HEIGHT};
use super::mono::{MonoColor, MonoThreshold};
use super::region::PixelRegion;
use super::transport::{DisplayError, DisplayTransport};

/// Display dimensions
pub const WIDTH: usize = 128;
pub const HEIGHT: usize = 64;
pub const PAGES: usize = HEIGHT / PAGE_HEIGHT as usize;

/// 128x64 frame memory with per-page dirty tracking
#[derive(Clone, PartialEq, Eq)]
pub struct PageBuffer {
    pages: [[u8; WIDTH]; PAGES],
    draw_color: MonoColor,
    /// Bit `n` set when page `n` changed since the last `take_dirty_pages`
    dirty_pages: u8,
}

impl Default for PageBuffer {
    fn default() -> Self {
        Self::new()
    }
}

impl core::fmt::Debug for PageBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PageBuffer")
            .field("lit", &self.lit_count())
            .field("dirty_pages", &self.dirty_pages)
            .finish()
    }
}

impl PageBuffer {
    /// Create a blank buffer
    pub const fn new() -> Self {
        Self {
            pages: [[0; WIDTH]; PAGES],
            draw_color: MonoColor::On,
            dirty_pages: 0,
        }
    }

    /// Blank every page
    pub fn clear(&mut self) {
        for page in self.pages.iter_mut() {
            page.fill(0);
        }
        self.dirty_pages = 0xFF;
    }

    /// Raw column bytes of one page
    pub fn page(&self, page: usize) -> Option<&[u8; WIDTH]> {
        self.pages.get(page)
    }

    pub fn pages(&self) -> &[[u8; WIDTH]; PAGES] {
        &self.pages
    }

    /// Read back one pixel; out-of-range reads are dark
    pub fn pixel(&self, x: u16, y: u16) -> bool {
        let (x, y) = (x as usize, y as usize);
        if x >= WIDTH || y >= HEIGHT {
            return false;
        }
        self.pages[y / 8][x] & (1 << (y & 7)) != 0
    }

    /// Number of lit pixels
    pub fn lit_count(&self) -> u32 {
        self.pages
            .iter()
            .flat_map(|page| page.iter())
            .map(|byte| byte.count_ones())
            .sum()
    }

    /// Dirty page mask since the previous call, then reset it
    pub fn take_dirty_pages(&mut self) -> u8 {
        core::mem::take(&mut self.dirty_pages)
    }

    /// Mark pages dirty again, e.g. after a failed transfer
    pub fn mark_dirty_pages(&mut self, mask: u8) {
        self.dirty_pages |= mask;
    }

    /// Write one pixel regardless of the draw color
    pub fn write_pixel(&mut self, x: u16, y: u16, on: bool) -> Result<(), DisplayError> {
        let (x, y) = (x as usize, y as usize);
        if x >= WIDTH || y >= HEIGHT {
            return Err(DisplayError::InvalidCoordinates);
        }
        let page = y / 8;
        let mask = 1u8 << (y & 7);
        let byte = &mut self.pages[page][x];
        let before = *byte;
        if on {
            *byte |= mask;
        } else {
            *byte &= !mask;
        }
        if *byte != before {
            self.dirty_pages |= 1 << page;
        }
        Ok(())
    }

    /// Bit-pack a rendered region straight into frame memory
    ///
    /// Both lit and dark pixels are written, so no prior clear is needed.
    /// Intended for regions whose rows were rounded to page boundaries.
    /// Pixels past the panel edge are skipped.
    pub fn blit<C: MonoThreshold>(&mut self, region: &PixelRegion<'_, C>) -> Result<(), DisplayError> {
        let Some(visible) = region.area().clip(WIDTH as u16, HEIGHT as u16) else {
            return Ok(());
        };
        for (x, y, color) in region.iter().filter(|&(x, y, _)| visible.contains(x, y)) {
            self.write_pixel(x, y, color.is_lit())?;
        }
        Ok(())
    }
}

impl DisplayTransport for PageBuffer {
    fn set_draw_color(&mut self, color: MonoColor) {
        self.draw_color = color;
    }

    fn draw_box(&mut self, area: Area) -> Result<(), DisplayError> {
        let Some(area) = area.clip(WIDTH as u16, HEIGHT as u16) else {
            return Ok(());
        };
        let on = self.draw_color.is_on();
        for (x, y) in area.points() {
            self.write_pixel(x, y, on)?;
        }
        Ok(())
    }

    fn draw_pixel(&mut self, x: u16, y: u16) -> Result<(), DisplayError> {
        self.write_pixel(x, y, self.draw_color.is_on())
    }

    /// Nothing to push: this buffer is the panel
    fn present(&mut self) -> Result<(), DisplayError> {
        Ok(())
    }

    fn size(&self) -> (u16, u16) {
        (WIDTH as u16, HEIGHT as u16)
    }

    fn page_buffer_mut(&mut self) -> Option<&mut PageBuffer> {
        Some(self)
    }
}
