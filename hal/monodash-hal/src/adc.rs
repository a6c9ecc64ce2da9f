//! Analog sampling
//!
//! The dashboard reads two analog lines: the battery-sense divider and the
//! sensor input. Both are sampled with a 12-bit converter.

/// Largest value a 12-bit conversion can return
pub const ADC_FULL_SCALE: u16 = 4095;

/// Analog channel identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum AnalogChannel {
    /// Battery voltage behind the 1:2 resistor divider
    Battery,
    /// Sensor feeding the dashboard bars
    Sensor,
}

/// Source of 12-bit analog samples
///
/// Implementations must return a value in `0..=ADC_FULL_SCALE`; the
/// provided [`AnalogSource::read_clamped`] enforces the range for callers
/// that cannot trust the backend.
pub trait AnalogSource {
    /// Take one conversion on `channel`
    fn read(&mut self, channel: AnalogChannel) -> u16;

    /// Take one conversion, clamped into the 12-bit range
    fn read_clamped(&mut self, channel: AnalogChannel) -> u16 {
        self.read(channel).min(ADC_FULL_SCALE)
    }
}
