//! Monodash - Joystick + OLED status dashboard firmware
//!
//! Main firmware binary for RP2040 boards with a 128x64 SSD1306 on I2C and
//! a 5-way joystick. Shows uptime, battery voltage with a gauge icon, and
//! the current and peak value of an analog sensor.
//!
//! Everything runs in one cooperative loop: each iteration calls
//! `RenderLoop::tick` and then sleeps for `timing.tick_ms`.

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::adc::{Adc, Channel, Config as AdcConfig};
use embassy_rp::gpio::{Input, Pull};
use embassy_rp::i2c::{Config as I2cConfig, I2c};
use embassy_time::{Instant, Timer};
use {defmt_rtt as _, panic_probe as _};

use monodash_core::config::{parse_config, DashboardConfig};
use monodash_core::display::FramebufferTranslator;
use monodash_core::input::{InputSampler, JoystickPins};
use monodash_core::ui::Bridge;
use monodash_core::RenderLoop;
use monodash_display::Ssd1306;

use crate::board::{AnalogInputs, JoystickLine, I2C_FREQUENCY_HZ};

mod board;

/// Embedded configuration (compiled into firmware)
/// Edit dashboard.toml and rebuild to customize
const EMBEDDED_CONFIG: &str = include_str!("../dashboard.toml");

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Setup start");

    let p = embassy_rp::init(Default::default());
    let config = load_config();

    // Display
    let i2c_config = {
        let mut cfg = I2cConfig::default();
        cfg.frequency = I2C_FREQUENCY_HZ;
        cfg
    };
    let i2c = I2c::new_blocking(p.I2C0, p.PIN_5, p.PIN_4, i2c_config);
    let mut oled = Ssd1306::new(i2c, config.display.i2c_address);
    match oled.init() {
        Ok(()) => info!("SSD1306 initialized at {:#x}", config.display.i2c_address),
        Err(e) => warn!("SSD1306 init failed: {}", e),
    }
    if config.display.invert {
        oled.set_inverted(true).ok();
    }

    // Joystick, active low
    let pins = JoystickPins {
        enter: JoystickLine::new(Input::new(p.PIN_10, Pull::Up)),
        right: JoystickLine::new(Input::new(p.PIN_11, Pull::Up)),
        left: JoystickLine::new(Input::new(p.PIN_12, Pull::Up)),
        up: JoystickLine::new(Input::new(p.PIN_13, Pull::Up)),
        down: JoystickLine::new(Input::new(p.PIN_14, Pull::Up)),
    };

    // Battery sense and sensor
    let adc = Adc::new_blocking(p.ADC, AdcConfig::default());
    let analog = AnalogInputs::new(
        adc,
        Channel::new_pin(p.PIN_26, Pull::None),
        Channel::new_pin(p.PIN_27, Pull::None),
    );

    let translator = FramebufferTranslator::new(oled, config.display.strategy);
    let bridge = Bridge::new(translator, InputSampler::new(pins));
    let mut render = RenderLoop::new(bridge, analog, &config);

    info!("Setup done");

    let start = Instant::now();
    loop {
        render.tick(start.elapsed().as_millis());
        Timer::after_millis(config.timing.tick_ms as u64).await;
    }
}

/// Parse the embedded configuration, falling back to defaults
fn load_config() -> DashboardConfig {
    match parse_config(EMBEDDED_CONFIG) {
        Ok(config) => {
            info!(
                "Configuration loaded: {}x{}, {} rows/flush, {}",
                config.display.width,
                config.display.height,
                config.display.buffer_rows,
                config.display.strategy
            );
            config
        }
        Err(e) => {
            warn!("Invalid dashboard.toml ({}), using defaults", e);
            DashboardConfig::default()
        }
    }
}
