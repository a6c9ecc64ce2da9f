//! Periodic status refresh
//!
//! Runs off the render loop's status timer: samples the analog inputs,
//! formats uptime and battery voltage and pushes the results into the
//! dashboard.

pub mod battery;
pub mod uptime;

pub use battery::{battery_volts, format_voltage, format_volts, BatteryLevel, BatteryScale};
pub use uptime::format_uptime;

use monodash_hal::{AnalogChannel, AnalogSource};

use crate::state::DashboardState;

/// Uptime, battery and sensor refresher
#[derive(Debug, Clone, Copy, Default)]
pub struct StatusUpdater {
    scale: BatteryScale,
}

impl StatusUpdater {
    pub fn new(scale: BatteryScale) -> Self {
        Self { scale }
    }

    pub fn scale(&self) -> BatteryScale {
        self.scale
    }

    /// Refresh every status widget
    ///
    /// `now_ms` is milliseconds since boot. While the Current bar is held
    /// its value stays frozen; the peak keeps tracking new samples.
    pub fn refresh<A: AnalogSource>(&self, state: &mut DashboardState, analog: &mut A, now_ms: u64) {
        let timers = &mut state.timers;
        let screen = &mut state.screen;

        timers.uptime_s = now_ms / 1000;
        screen.set_uptime(&format_uptime(timers.uptime_s));

        timers.battery_raw = analog.read_clamped(AnalogChannel::Battery);
        let volts = self.scale.volts(timers.battery_raw);
        screen.set_voltage(&format_volts(volts));
        screen.set_battery_level(BatteryLevel::from_volts(volts));

        let sensor = analog.read_clamped(AnalogChannel::Sensor);
        if !timers.hold {
            timers.sensor_raw = sensor;
            screen.set_current(sensor);
        }
        timers.sensor_peak = timers.sensor_peak.max(sensor);
        screen.set_peak(timers.sensor_peak);

        #[cfg(feature = "defmt")]
        defmt::trace!(
            "status: up={}s bat={} sensor={} peak={}",
            timers.uptime_s,
            timers.battery_raw,
            sensor,
            timers.sensor_peak
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::Dashboard;

    struct Fixed {
        battery: u16,
        sensor: u16,
    }

    impl AnalogSource for Fixed {
        fn read(&mut self, channel: AnalogChannel) -> u16 {
            match channel {
                AnalogChannel::Battery => self.battery,
                AnalogChannel::Sensor => self.sensor,
            }
        }
    }

    fn state() -> DashboardState {
        DashboardState::new(Dashboard::new(128, 64, 4095))
    }

    #[test]
    fn test_refresh_updates_everything() {
        let mut state = state();
        let mut adc = Fixed {
            battery: 2365,
            sensor: 1000,
        };
        StatusUpdater::default().refresh(&mut state, &mut adc, 3_661_250);

        assert_eq!(state.timers.uptime_s, 3661);
        assert_eq!(state.screen.uptime_text(), "01:01:01");
        assert_eq!(state.screen.voltage_text(), "4.19V");
        assert_eq!(state.screen.battery_level(), BatteryLevel::ThreeBars);
        assert_eq!(state.screen.current(), 1000);
        assert_eq!(state.screen.peak(), 1000);
    }

    #[test]
    fn test_peak_tracks_maximum() {
        let mut state = state();
        let updater = StatusUpdater::default();
        let mut adc = Fixed {
            battery: 0,
            sensor: 3000,
        };
        updater.refresh(&mut state, &mut adc, 0);
        adc.sensor = 200;
        updater.refresh(&mut state, &mut adc, 500);

        assert_eq!(state.screen.current(), 200);
        assert_eq!(state.screen.peak(), 3000);
        assert_eq!(state.screen.battery_level(), BatteryLevel::Empty);
    }

    #[test]
    fn test_hold_freezes_current() {
        let mut state = state();
        let updater = StatusUpdater::default();
        let mut adc = Fixed {
            battery: 0,
            sensor: 500,
        };
        updater.refresh(&mut state, &mut adc, 0);
        state.timers.hold = true;
        adc.sensor = 4000;
        updater.refresh(&mut state, &mut adc, 500);

        assert_eq!(state.screen.current(), 500);
        assert_eq!(state.timers.sensor_raw, 500);
        assert_eq!(state.screen.peak(), 4000);
    }

    #[test]
    fn test_out_of_range_samples_clamped() {
        let mut state = state();
        let mut adc = Fixed {
            battery: u16::MAX,
            sensor: u16::MAX,
        };
        StatusUpdater::default().refresh(&mut state, &mut adc, 0);
        assert_eq!(state.timers.battery_raw, 4095);
        assert_eq!(state.screen.voltage_text(), "7.26V");
        assert_eq!(state.screen.current(), 4095);
    }
}
