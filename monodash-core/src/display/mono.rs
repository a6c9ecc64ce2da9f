//! 1-bit color model
//!
//! The panel only knows lit and unlit pixels. Any color the UI renders in is
//! reduced to one of the two by [`MonoThreshold`]: a pixel is lit iff its
//! raw channel value is non-zero.

use embedded_graphics::pixelcolor::{BinaryColor, Gray8, GrayColor, IntoStorage, Rgb565};

/// Draw state of a monochrome pixel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MonoColor {
    /// Background (pixel dark)
    #[default]
    Off,
    /// Foreground (pixel lit)
    On,
}

impl MonoColor {
    pub const fn is_on(self) -> bool {
        matches!(self, MonoColor::On)
    }
}

impl From<bool> for MonoColor {
    fn from(on: bool) -> Self {
        if on {
            MonoColor::On
        } else {
            MonoColor::Off
        }
    }
}

impl From<MonoColor> for BinaryColor {
    fn from(color: MonoColor) -> Self {
        match color {
            MonoColor::Off => BinaryColor::Off,
            MonoColor::On => BinaryColor::On,
        }
    }
}

/// Total, deterministic reduction of a source color to one bit
pub trait MonoThreshold: Copy {
    /// Whether the pixel should be lit
    fn is_lit(&self) -> bool;

    fn to_mono(&self) -> MonoColor {
        MonoColor::from(self.is_lit())
    }
}

impl MonoThreshold for MonoColor {
    fn is_lit(&self) -> bool {
        self.is_on()
    }
}

impl MonoThreshold for BinaryColor {
    fn is_lit(&self) -> bool {
        *self == BinaryColor::On
    }
}

impl MonoThreshold for Gray8 {
    fn is_lit(&self) -> bool {
        self.luma() > 0
    }
}

impl MonoThreshold for Rgb565 {
    fn is_lit(&self) -> bool {
        self.into_storage() != 0
    }
}
