//! Retained-mode dashboard UI
//!
//! Widgets render through embedded-graphics into a partial
//! [`DrawBuffer`]; finished bands leave through a [`UiPort`].

pub mod dashboard;
pub mod draw_buffer;
pub mod port;
pub mod timer;
pub mod widgets;

pub use dashboard::{Dashboard, DirtyAreas, Focus};
pub use draw_buffer::{DrawBuffer, UiColor, BACKGROUND, FOREGROUND};
pub use port::{Bridge, UiPort};
pub use timer::PeriodicTimer;
pub use widgets::{Align, Bar, BatteryIcon, HLine, Label, Widget};
