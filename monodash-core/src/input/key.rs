//! Logical key events

/// Logical keys understood by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    /// No key (idle)
    #[default]
    None,
    /// Joystick center push
    Enter,
    Left,
    Right,
    /// Joystick up
    Prev,
    /// Joystick down
    Next,
}

/// Key state reported with each poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyState {
    Pressed,
    #[default]
    Released,
}

/// One poll result: which key and whether it is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub key: Key,
    pub state: KeyState,
}

impl KeyEvent {
    /// Idle: no key, released
    pub const IDLE: Self = Self {
        key: Key::None,
        state: KeyState::Released,
    };

    pub const fn pressed(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Pressed,
        }
    }

    pub const fn released(key: Key) -> Self {
        Self {
            key,
            state: KeyState::Released,
        }
    }

    pub fn is_pressed(&self) -> bool {
        self.state == KeyState::Pressed
    }
}

/// Last active key, kept so its release can be reported on the next idle poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct LatchedKey(Option<Key>);

impl LatchedKey {
    pub const fn new() -> Self {
        Self(None)
    }

    /// Record `key` as the active key, replacing any previous one
    pub fn latch(&mut self, key: Key) {
        self.0 = match key {
            Key::None => None,
            key => Some(key),
        };
    }

    /// Take the latched key for a release report, clearing the latch
    pub fn release(&mut self) -> Key {
        self.0.take().unwrap_or(Key::None)
    }

    pub fn get(&self) -> Option<Key> {
        self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_latch_replaces() {
        let mut latch = LatchedKey::new();
        latch.latch(Key::Enter);
        latch.latch(Key::Left);
        assert_eq!(latch.get(), Some(Key::Left));
    }

    #[test]
    fn test_release_clears() {
        let mut latch = LatchedKey::new();
        latch.latch(Key::Next);
        assert_eq!(latch.release(), Key::Next);
        assert_eq!(latch.release(), Key::None);
        assert_eq!(latch.get(), None);
    }

    #[test]
    fn test_latching_none_is_empty() {
        let mut latch = LatchedKey::new();
        latch.latch(Key::Right);
        latch.latch(Key::None);
        assert_eq!(latch.get(), None);
    }

    #[test]
    fn test_event_helpers() {
        assert!(KeyEvent::pressed(Key::Enter).is_pressed());
        assert!(!KeyEvent::released(Key::Enter).is_pressed());
        assert_eq!(KeyEvent::default(), KeyEvent::IDLE);
    }
}
