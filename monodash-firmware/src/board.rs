//! Board wiring for an RP2040 with an SSD1306 and a 5-way joystick
//!
//! | Signal        | Pin    |
//! |---------------|--------|
//! | OLED SDA      | GPIO4  |
//! | OLED SCL      | GPIO5  |
//! | Joystick OK   | GPIO10 |
//! | Joystick RIGHT| GPIO11 |
//! | Joystick LEFT | GPIO12 |
//! | Joystick UP   | GPIO13 |
//! | Joystick DOWN | GPIO14 |
//! | Battery sense | GPIO26 (ADC0) |
//! | Sensor        | GPIO27 (ADC1) |

use defmt::*;
use embassy_rp::adc::{Adc, Blocking, Channel};
use embassy_rp::gpio::Input;

use monodash_hal::{AnalogChannel, AnalogSource, InputPin};

/// I2C bus clock for the OLED
pub const I2C_FREQUENCY_HZ: u32 = 400_000;

/// Pulled-up joystick switch to ground
pub struct JoystickLine(Input<'static>);

impl JoystickLine {
    pub fn new(input: Input<'static>) -> Self {
        Self(input)
    }
}

impl InputPin for JoystickLine {
    fn is_high(&self) -> bool {
        self.0.is_high()
    }
}

/// Battery-sense and sensor inputs on the on-chip ADC
pub struct AnalogInputs {
    adc: Adc<'static, Blocking>,
    battery: Channel<'static>,
    sensor: Channel<'static>,
}

impl AnalogInputs {
    pub fn new(adc: Adc<'static, Blocking>, battery: Channel<'static>, sensor: Channel<'static>) -> Self {
        Self {
            adc,
            battery,
            sensor,
        }
    }
}

impl AnalogSource for AnalogInputs {
    fn read(&mut self, channel: AnalogChannel) -> u16 {
        let input = match channel {
            AnalogChannel::Battery => &mut self.battery,
            AnalogChannel::Sensor => &mut self.sensor,
        };
        match self.adc.blocking_read(input) {
            Ok(value) => value,
            Err(e) => {
                warn!("ADC read on {} failed: {}", channel, e);
                0
            }
        }
    }
}
