//! Configuration type definitions

use monodash_hal::ADC_FULL_SCALE;

use crate::display::page_buffer::{HEIGHT, WIDTH};
use crate::display::FlushStrategy;
use crate::status::BatteryScale;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use super::parse::ParseError;

/// Largest partial draw buffer height, in rows
pub const MAX_BUFFER_ROWS: u16 = 16;

/// Panel and translator settings
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DisplayConfig {
    /// Panel width in pixels
    pub width: u16,
    /// Panel height in pixels
    pub height: u16,
    /// Rows rendered per flush
    pub buffer_rows: u16,
    /// How rendered regions reach panel memory
    pub strategy: FlushStrategy,
    /// 7-bit I2C address of the controller
    pub i2c_address: u8,
    /// Invert the panel (dark pixels on a lit background)
    pub invert: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            width: 128,
            height: 64,
            buffer_rows: 10,
            strategy: FlushStrategy::ClearAndSet,
            i2c_address: 0x3C,
            invert: false,
        }
    }
}

/// Loop cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct TimingConfig {
    /// Delay between render loop ticks
    pub tick_ms: u32,
    /// Status refresh period
    pub status_period_ms: u32,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            tick_ms: 1,
            status_period_ms: 500,
        }
    }
}

/// Sensor channel scaling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorConfig {
    /// Reading that fills a bar
    pub full_scale: u16,
}

impl Default for SensorConfig {
    fn default() -> Self {
        Self {
            full_scale: ADC_FULL_SCALE,
        }
    }
}

/// Complete dashboard configuration
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct DashboardConfig {
    pub display: DisplayConfig,
    pub timing: TimingConfig,
    pub battery: BatteryScale,
    pub sensor: SensorConfig,
}

/// Configuration errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Syntax or type error on a line (1-based)
    Parse { line: u32, error: ParseError },
    /// Width or height zero or larger than the panel memory
    InvalidDisplaySize,
    /// `buffer_rows` outside `1..=MAX_BUFFER_ROWS`
    InvalidBufferRows,
    /// Address does not fit in 7 bits
    InvalidI2cAddress,
    /// Zero tick or status period
    InvalidTiming,
    /// Non-positive or non-finite battery factor
    InvalidBatteryScale,
    /// Sensor full scale zero or above the converter range
    InvalidFullScale,
}

impl DashboardConfig {
    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let d = &self.display;
        if d.width == 0 || d.height == 0 || d.width as usize > WIDTH || d.height as usize > HEIGHT {
            return Err(ConfigError::InvalidDisplaySize);
        }
        if d.buffer_rows == 0 || d.buffer_rows > MAX_BUFFER_ROWS {
            return Err(ConfigError::InvalidBufferRows);
        }
        if d.i2c_address > 0x7F {
            return Err(ConfigError::InvalidI2cAddress);
        }

        if self.timing.tick_ms == 0 || self.timing.status_period_ms == 0 {
            return Err(ConfigError::InvalidTiming);
        }

        let b = &self.battery;
        let positive = |v: f32| v.is_finite() && v > 0.0;
        if !(positive(b.divider) && positive(b.vref) && positive(b.correction)) {
            return Err(ConfigError::InvalidBatteryScale);
        }

        if self.sensor.full_scale == 0 || self.sensor.full_scale > ADC_FULL_SCALE {
            return Err(ConfigError::InvalidFullScale);
        }
        Ok(())
    }
}
