//! Framebuffer translator
//!
//! Turns rendered color regions into 1-bit transport commands.
//!
//! The reference strategy clears the target rectangle to background, then
//! sets only the lit pixels and presents once. It tolerates any color depth
//! the renderer produces and never needs a per-pixel color toggle.
//!
//! The page-packed strategy rounds dirty areas to 8-row pages before they
//! are rendered and bit-packs the region straight into the driver's page
//! memory. Both strategies leave identical frame memory behind.

use super::area::Area;
use super::mono::{MonoColor, MonoThreshold};
use super::region::{FlushDone, PixelRegion};
use super::transport::{DisplayError, DisplayTransport};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// How regions are written to the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "kebab-case"))]
pub enum FlushStrategy {
    /// Clear the rectangle, then set lit pixels one by one
    #[default]
    ClearAndSet,
    /// Page-rounded areas packed directly into page memory
    PagePacked,
}

impl FlushStrategy {
    /// Parse the config spelling (`clear-and-set` / `page-packed`)
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "clear-and-set" => Some(FlushStrategy::ClearAndSet),
            "page-packed" => Some(FlushStrategy::PagePacked),
            _ => None,
        }
    }
}

/// Framebuffer translator owning the display transport
pub struct FramebufferTranslator<T> {
    transport: T,
    strategy: FlushStrategy,
    /// Regions flushed since creation
    flushes: u32,
    /// Regions whose transport writes failed
    failures: u32,
}

impl<T: DisplayTransport> FramebufferTranslator<T> {
    pub fn new(transport: T, strategy: FlushStrategy) -> Self {
        Self {
            transport,
            strategy,
            flushes: 0,
            failures: 0,
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut T {
        &mut self.transport
    }

    pub fn into_inner(self) -> T {
        self.transport
    }

    pub fn strategy(&self) -> FlushStrategy {
        self.strategy
    }

    pub fn flush_count(&self) -> u32 {
        self.flushes
    }

    pub fn failure_count(&self) -> u32 {
        self.failures
    }

    /// Adjust a dirty area before it is rendered
    pub fn round(&self, area: Area) -> Area {
        match self.strategy {
            FlushStrategy::ClearAndSet => area,
            FlushStrategy::PagePacked => area.round_to_pages(),
        }
    }

    /// Write one region and acknowledge it
    ///
    /// The acknowledgment is returned whether or not the transport accepted
    /// every command; failures are counted and logged. Only the part of the
    /// region that lies on the panel is written.
    pub fn flush<C: MonoThreshold>(&mut self, region: PixelRegion<'_, C>) -> FlushDone {
        #[cfg(feature = "defmt")]
        defmt::trace!("flush start {}", region.area());

        let (width, height) = self.transport.size();
        let result = match region.area().clip(width, height) {
            None => Ok(()),
            Some(visible) => match self.strategy {
                FlushStrategy::ClearAndSet => self.clear_and_set(&region, visible),
                FlushStrategy::PagePacked => self.page_packed(&region, visible),
            },
        };

        self.flushes = self.flushes.wrapping_add(1);
        if let Err(_e) = result {
            self.failures = self.failures.wrapping_add(1);
            #[cfg(feature = "defmt")]
            defmt::warn!("flush of {} failed: {}", region.area(), _e);
        }

        region.complete()
    }

    fn clear_and_set<C: MonoThreshold>(
        &mut self,
        region: &PixelRegion<'_, C>,
        visible: Area,
    ) -> Result<(), DisplayError> {
        self.transport.set_draw_color(MonoColor::Off);
        self.transport.draw_box(visible)?;
        self.transport.set_draw_color(MonoColor::On);

        for (x, y, color) in region.iter() {
            if color.is_lit() && visible.contains(x, y) {
                self.transport.draw_pixel(x, y)?;
            }
        }

        self.transport.present()
    }

    fn page_packed<C: MonoThreshold>(
        &mut self,
        region: &PixelRegion<'_, C>,
        visible: Area,
    ) -> Result<(), DisplayError> {
        let packed = match self.transport.page_buffer_mut() {
            Some(pages) => {
                pages.blit(region)?;
                true
            }
            None => false,
        };

        if !packed {
            return self.clear_and_set(region, visible);
        }

        self.transport.present()
    }
}
