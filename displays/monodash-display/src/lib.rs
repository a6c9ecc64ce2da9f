//! Panel drivers for Monodash
//!
//! Each driver implements `monodash_core::display::DisplayTransport` on top
//! of an `embedded-hal` bus, so the framebuffer translator can write to it
//! without knowing the controller.
//!
//! ## Supported Controllers
//!
//! - **SSD1306** 128x64 over I2C, page-buffered with dirty-page uploads.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod ssd1306;

pub use ssd1306::{Ssd1306, SSD1306_ADDR};
