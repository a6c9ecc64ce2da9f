//! Pixel regions handed from the renderer to the translator

use super::area::Area;

/// Region construction errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum RegionError {
    /// Pixel slice length does not match the area
    SizeMismatch { expected: usize, actual: usize },
}

/// A rectangle of rendered pixels awaiting translation
///
/// Pixels are row-major and cover the area exactly. A region is consumed
/// by value: [`PixelRegion::complete`] turns it into the [`FlushDone`]
/// acknowledgment the renderer waits for before reusing its buffer.
#[derive(Debug)]
pub struct PixelRegion<'a, C> {
    area: Area,
    pixels: &'a [C],
}

impl<'a, C: Copy> PixelRegion<'a, C> {
    pub fn new(area: Area, pixels: &'a [C]) -> Result<Self, RegionError> {
        let expected = area.pixel_count();
        if pixels.len() != expected {
            return Err(RegionError::SizeMismatch {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self { area, pixels })
    }

    /// Build a region whose length the caller has already checked
    pub(crate) fn from_parts(area: Area, pixels: &'a [C]) -> Self {
        debug_assert_eq!(pixels.len(), area.pixel_count());
        Self { area, pixels }
    }

    pub fn area(&self) -> Area {
        self.area
    }

    pub fn pixels(&self) -> &'a [C] {
        self.pixels
    }

    /// Pixels with their absolute coordinates, row-major
    pub fn iter(&self) -> impl Iterator<Item = (u16, u16, C)> + 'a {
        self.area
            .points()
            .zip(self.pixels.iter().copied())
            .map(|((x, y), color)| (x, y, color))
    }

    /// Finish with this region and acknowledge the flush
    pub fn complete(self) -> FlushDone {
        FlushDone { area: self.area }
    }
}

/// Acknowledgment that a region has been written out
#[must_use = "the renderer must receive the flush acknowledgment"]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct FlushDone {
    area: Area,
}

impl FlushDone {
    /// Area that was flushed
    pub fn area(&self) -> Area {
        self.area
    }
}
