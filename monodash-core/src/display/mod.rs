//! Display side of the bridge
//!
//! Rendered UI regions arrive as [`PixelRegion`]s, the
//! [`FramebufferTranslator`] reduces them to 1-bit commands, and a
//! [`DisplayTransport`] carries those commands to the panel.

pub mod area;
pub mod mono;
pub mod page_buffer;
pub mod region;
pub mod transport;
pub mod translator;

pub use area::Area;
pub use mono::{MonoColor, MonoThreshold};
pub use page_buffer::PageBuffer;
pub use region::{FlushDone, PixelRegion, RegionError};
pub use transport::{DisplayError, DisplayTransport};
pub use translator::{FlushStrategy, FramebufferTranslator};
