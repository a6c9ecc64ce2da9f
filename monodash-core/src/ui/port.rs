//! Port between the UI and the board
//!
//! The render loop talks to exactly one [`UiPort`]: it hands rendered
//! regions out through [`UiPort::flush`] and asks for key state through
//! [`UiPort::poll`]. [`Bridge`] is the production port, pairing a
//! framebuffer translator with a joystick sampler.

use monodash_hal::InputPin;

use super::draw_buffer::UiColor;
use crate::display::{Area, DisplayTransport, FlushDone, FramebufferTranslator, PixelRegion};
use crate::input::{InputSampler, KeyEvent, LatchedKey};

/// Display and input callbacks used by the render loop
pub trait UiPort {
    /// Write a rendered region; the returned token releases the draw buffer
    fn flush(&mut self, region: PixelRegion<'_, UiColor>) -> FlushDone;

    /// Report the current key state
    fn poll(&mut self, latch: &mut LatchedKey) -> KeyEvent;

    /// Grow a dirty area to what the display side wants rendered
    fn round(&self, area: Area) -> Area {
        area
    }
}

impl<U: UiPort + ?Sized> UiPort for &mut U {
    fn flush(&mut self, region: PixelRegion<'_, UiColor>) -> FlushDone {
        (**self).flush(region)
    }

    fn poll(&mut self, latch: &mut LatchedKey) -> KeyEvent {
        (**self).poll(latch)
    }

    fn round(&self, area: Area) -> Area {
        (**self).round(area)
    }
}

/// Translator plus sampler
pub struct Bridge<T, P> {
    translator: FramebufferTranslator<T>,
    sampler: InputSampler<P>,
}

impl<T: DisplayTransport, P: InputPin> Bridge<T, P> {
    pub fn new(translator: FramebufferTranslator<T>, sampler: InputSampler<P>) -> Self {
        Self {
            translator,
            sampler,
        }
    }

    pub fn translator(&self) -> &FramebufferTranslator<T> {
        &self.translator
    }

    pub fn translator_mut(&mut self) -> &mut FramebufferTranslator<T> {
        &mut self.translator
    }

    pub fn sampler(&self) -> &InputSampler<P> {
        &self.sampler
    }
}

impl<T: DisplayTransport, P: InputPin> UiPort for Bridge<T, P> {
    fn flush(&mut self, region: PixelRegion<'_, UiColor>) -> FlushDone {
        self.translator.flush(region)
    }

    fn poll(&mut self, latch: &mut LatchedKey) -> KeyEvent {
        self.sampler.sample(latch)
    }

    fn round(&self, area: Area) -> Area {
        self.translator.round(area)
    }
}
