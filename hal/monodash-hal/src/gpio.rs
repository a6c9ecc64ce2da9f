//! GPIO pin abstractions
//!
//! Provides the digital input trait the joystick sampler reads from.

/// Logic level of a digital line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Level {
    /// Logic 0
    Low,
    /// Logic 1
    High,
}

impl From<bool> for Level {
    fn from(high: bool) -> Self {
        if high {
            Level::High
        } else {
            Level::Low
        }
    }
}

/// Digital input pin
///
/// Implementations should handle the actual hardware register reading
/// for the specific chip. Reads are assumed to be always available.
pub trait InputPin {
    /// Check if the pin reads high (logic 1)
    fn is_high(&self) -> bool;

    /// Check if the pin reads low (logic 0)
    fn is_low(&self) -> bool {
        !self.is_high()
    }

    /// Read the current level
    fn level(&self) -> Level {
        Level::from(self.is_high())
    }
}

impl<T: InputPin + ?Sized> InputPin for &T {
    fn is_high(&self) -> bool {
        (**self).is_high()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;

    struct FakePin(Cell<bool>);

    impl InputPin for FakePin {
        fn is_high(&self) -> bool {
            self.0.get()
        }
    }

    #[test]
    fn test_level_follows_pin() {
        let pin = FakePin(Cell::new(true));
        assert_eq!(pin.level(), Level::High);
        assert!(!pin.is_low());

        pin.0.set(false);
        assert_eq!(pin.level(), Level::Low);
        assert!(pin.is_low());
    }

    #[test]
    fn test_reference_forwards() {
        let pin = FakePin(Cell::new(false));
        let by_ref = &pin;
        assert!(by_ref.is_low());
    }
}
