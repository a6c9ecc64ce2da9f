//! Display transport trait
//!
//! The low-level command surface of a 1-bit display controller driver.

use super::area::Area;
use super::mono::MonoColor;
use super::page_buffer::PageBuffer;

/// Display transport errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayError {
    /// Communication error with display
    Communication,
    /// Invalid coordinates or dimensions
    InvalidCoordinates,
    /// Display not initialized
    NotInitialized,
}

/// Display transport trait
///
/// Drawing calls work on the driver's frame memory; nothing reaches the
/// glass until [`DisplayTransport::present`] is called. Drawing follows a
/// u8g2-style current draw color.
pub trait DisplayTransport {
    /// Select the color used by subsequent `draw_box`/`draw_pixel` calls
    fn set_draw_color(&mut self, color: MonoColor);

    /// Fill `area` with the current draw color
    ///
    /// Parts of the area outside the panel are ignored.
    fn draw_box(&mut self, area: Area) -> Result<(), DisplayError>;

    /// Set one pixel to the current draw color
    fn draw_pixel(&mut self, x: u16, y: u16) -> Result<(), DisplayError>;

    /// Push frame memory to the panel
    fn present(&mut self) -> Result<(), DisplayError>;

    /// Panel size in pixels (width, height)
    fn size(&self) -> (u16, u16);

    /// Direct access to page-organized frame memory, if the driver has one
    fn page_buffer_mut(&mut self) -> Option<&mut PageBuffer> {
        None
    }

    /// Clear `area` to background
    fn clear_rect(&mut self, area: Area) -> Result<(), DisplayError> {
        self.set_draw_color(MonoColor::Off);
        self.draw_box(area)
    }
}

impl<T: DisplayTransport + ?Sized> DisplayTransport for &mut T {
    fn set_draw_color(&mut self, color: MonoColor) {
        (**self).set_draw_color(color)
    }

    fn draw_box(&mut self, area: Area) -> Result<(), DisplayError> {
        (**self).draw_box(area)
    }

    fn draw_pixel(&mut self, x: u16, y: u16) -> Result<(), DisplayError> {
        (**self).draw_pixel(x, y)
    }

    fn present(&mut self) -> Result<(), DisplayError> {
        (**self).present()
    }

    fn size(&self) -> (u16, u16) {
        (**self).size()
    }

    fn page_buffer_mut(&mut self) -> Option<&mut PageBuffer> {
        (**self).page_buffer_mut()
    }
}
