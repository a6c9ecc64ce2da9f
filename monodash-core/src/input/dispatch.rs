//! Key dispatch
//!
//! The sampler reports a level every poll; widgets want edges. The
//! dispatcher remembers the previous poll and turns transitions into
//! navigation events, encoder style:
//!
//! - a new press of LEFT/PREV moves focus back, RIGHT/NEXT forward
//! - releasing ENTER activates the focused widget
//!
//! Holding a key does not repeat.

use super::key::{Key, KeyEvent, KeyState};

/// Navigation produced from key edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum NavEvent {
    FocusPrev,
    FocusNext,
    Activate,
}

/// Edge detector between the sampler and the widgets
#[derive(Debug, Default)]
pub struct KeyDispatcher {
    last: KeyEvent,
}

impl KeyDispatcher {
    pub const fn new() -> Self {
        Self {
            last: KeyEvent::IDLE,
        }
    }

    /// Feed one poll result; returns the navigation it triggers, if any
    pub fn feed(&mut self, event: KeyEvent) -> Option<NavEvent> {
        let prev = core::mem::replace(&mut self.last, event);

        match event.state {
            KeyState::Pressed => {
                let new_press = prev.state == KeyState::Released || prev.key != event.key;
                if !new_press {
                    return None;
                }
                match event.key {
                    Key::Left | Key::Prev => Some(NavEvent::FocusPrev),
                    Key::Right | Key::Next => Some(NavEvent::FocusNext),
                    Key::Enter | Key::None => None,
                }
            }
            KeyState::Released => {
                let enter_released = prev.state == KeyState::Pressed && prev.key == Key::Enter;
                enter_released.then_some(NavEvent::Activate)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_press_edges_only() {
        let mut dispatch = KeyDispatcher::new();
        assert_eq!(dispatch.feed(KeyEvent::pressed(Key::Next)), Some(NavEvent::FocusNext));
        assert_eq!(dispatch.feed(KeyEvent::pressed(Key::Next)), None);
        assert_eq!(dispatch.feed(KeyEvent::released(Key::Next)), None);
        assert_eq!(dispatch.feed(KeyEvent::pressed(Key::Left)), Some(NavEvent::FocusPrev));
    }

    #[test]
    fn test_enter_activates_on_release() {
        let mut dispatch = KeyDispatcher::new();
        assert_eq!(dispatch.feed(KeyEvent::pressed(Key::Enter)), None);
        assert_eq!(dispatch.feed(KeyEvent::pressed(Key::Enter)), None);
        assert_eq!(dispatch.feed(KeyEvent::released(Key::Enter)), Some(NavEvent::Activate));
        assert_eq!(dispatch.feed(KeyEvent::IDLE), None);
    }

    #[test]
    fn test_rolling_between_directions() {
        let mut dispatch = KeyDispatcher::new();
        assert_eq!(dispatch.feed(KeyEvent::pressed(Key::Prev)), Some(NavEvent::FocusPrev));
        assert_eq!(dispatch.feed(KeyEvent::pressed(Key::Right)), Some(NavEvent::FocusNext));
    }

    #[test]
    fn test_enter_superseded_does_not_activate() {
        let mut dispatch = KeyDispatcher::new();
        dispatch.feed(KeyEvent::pressed(Key::Enter));
        dispatch.feed(KeyEvent::pressed(Key::Right));
        assert_eq!(dispatch.feed(KeyEvent::released(Key::Right)), None);
    }
}
