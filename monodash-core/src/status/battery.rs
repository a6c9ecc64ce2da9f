//! Battery voltage and gauge level
//!
//! The cell is read through a 1:2 divider on a 3.3 V referenced 12-bit ADC;
//! the reference reads about 10% low, hence the 1.1 correction.

use core::fmt::Write;
use heapless::String;

use monodash_hal::ADC_FULL_SCALE;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Longest voltage text (`"7.26V"`)
pub const VOLTAGE_LEN: usize = 8;

/// Conversion from raw ADC counts to cell volts
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BatteryScale {
    /// Resistor divider ratio
    pub divider: f32,
    /// ADC reference voltage
    pub vref: f32,
    /// Reference correction factor
    pub correction: f32,
}

impl Default for BatteryScale {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl BatteryScale {
    pub const DEFAULT: Self = Self {
        divider: 2.0,
        vref: 3.3,
        correction: 1.1,
    };

    /// Convert a raw 12-bit sample to volts
    ///
    /// Samples above full scale are clamped.
    pub fn volts(&self, raw: u16) -> f32 {
        let raw = raw.min(ADC_FULL_SCALE);
        (raw as f32 / ADC_FULL_SCALE as f32) * self.divider * self.vref * self.correction
    }
}

/// Convert a raw sample with the default divider and reference
pub fn battery_volts(raw: u16) -> f32 {
    BatteryScale::DEFAULT.volts(raw)
}

/// Volts with two decimals and a `V` suffix
pub fn format_volts(volts: f32) -> String<VOLTAGE_LEN> {
    let mut text = String::new();
    if write!(text, "{:.2}V", volts).is_err() {
        text.clear();
        let _ = text.push_str("-.--V");
    }
    text
}

/// Format a raw sample with the default scale
pub fn format_voltage(raw: u16) -> String<VOLTAGE_LEN> {
    format_volts(battery_volts(raw))
}

/// Five-step battery gauge
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BatteryLevel {
    Empty,
    OneBar,
    TwoBars,
    ThreeBars,
    Full,
}

impl BatteryLevel {
    /// Lower bound (inclusive) of each band above `Empty`
    pub const THRESHOLDS: [(f32, BatteryLevel); 4] = [
        (4.3, BatteryLevel::Full),
        (4.0, BatteryLevel::ThreeBars),
        (3.7, BatteryLevel::TwoBars),
        (3.3, BatteryLevel::OneBar),
    ];

    /// Gauge level for a cell voltage; anything unreadable is `Empty`
    pub fn from_volts(volts: f32) -> Self {
        Self::THRESHOLDS
            .iter()
            .find(|(min, _)| volts >= *min)
            .map(|(_, level)| *level)
            .unwrap_or(BatteryLevel::Empty)
    }

    /// Filled cells drawn in the gauge icon
    pub const fn bars(self) -> u8 {
        match self {
            BatteryLevel::Empty => 0,
            BatteryLevel::OneBar => 1,
            BatteryLevel::TwoBars => 2,
            BatteryLevel::ThreeBars => 3,
            BatteryLevel::Full => 4,
        }
    }
}
