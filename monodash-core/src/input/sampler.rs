//! Joystick sampler
//!
//! Reads the five joystick lines once per poll and decodes them into a
//! single [`KeyEvent`].
//!
//! Lines are active-low (pulled up, switch to ground) and are checked in a
//! fixed priority order: ENTER, RIGHT, LEFT, UP, DOWN. The first asserted
//! line wins, so simultaneous presses always resolve to the highest
//! priority key. No debouncing is done; contact bounce shows up as extra
//! press/release pairs.

use monodash_hal::InputPin;

use super::key::{Key, KeyEvent, LatchedKey};

/// The five joystick lines
pub struct JoystickPins<P> {
    pub enter: P,
    pub right: P,
    pub left: P,
    pub up: P,
    pub down: P,
}

/// Priority-ordered joystick decoder
pub struct InputSampler<P> {
    pins: JoystickPins<P>,
}

impl<P: InputPin> InputSampler<P> {
    pub fn new(pins: JoystickPins<P>) -> Self {
        Self { pins }
    }

    pub fn pins(&self) -> &JoystickPins<P> {
        &self.pins
    }

    /// First asserted line in priority order
    fn asserted(&self) -> Option<Key> {
        let order = [
            (&self.pins.enter, Key::Enter),
            (&self.pins.right, Key::Right),
            (&self.pins.left, Key::Left),
            (&self.pins.up, Key::Prev),
            (&self.pins.down, Key::Next),
        ];
        order
            .into_iter()
            .find(|(pin, _)| pin.is_low())
            .map(|(_, key)| key)
    }

    /// Sample the joystick
    ///
    /// An asserted line returns `{key, Pressed}` and latches the key. With
    /// nothing asserted the latched key is reported once as `Released` and
    /// the latch cleared; later idle polls return `{None, Released}`.
    pub fn sample(&self, latch: &mut LatchedKey) -> KeyEvent {
        match self.asserted() {
            Some(key) => {
                latch.latch(key);
                KeyEvent::pressed(key)
            }
            None => KeyEvent::released(latch.release()),
        }
    }
}
