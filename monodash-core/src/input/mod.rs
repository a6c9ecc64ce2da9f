//! Input side of the bridge
//!
//! GPIO lines → [`InputSampler`] → [`KeyEvent`] → [`KeyDispatcher`] →
//! [`NavEvent`] for the dashboard's focus group.

pub mod dispatch;
pub mod key;
pub mod sampler;

pub use dispatch::{KeyDispatcher, NavEvent};
pub use key::{Key, KeyEvent, KeyState, LatchedKey};
pub use sampler::{InputSampler, JoystickPins};
