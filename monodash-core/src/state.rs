//! Dashboard state owned by the render loop
//!
//! Everything the input sampler, the key dispatcher and the status updater
//! share lives here and is passed to them explicitly.

use crate::input::{LatchedKey, NavEvent};
use crate::ui::{Dashboard, Focus};

/// Values sampled by the status timer
///
/// Reset at boot and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct DisplayTimerState {
    /// Whole seconds since boot
    pub uptime_s: u64,
    /// Last battery-sense sample
    pub battery_raw: u16,
    /// Last sensor sample shown in the Current bar
    pub sensor_raw: u16,
    /// Highest sensor sample since boot or the last reset
    pub sensor_peak: u16,
    /// Current bar frozen
    pub hold: bool,
}

/// Latch, sampled values and the screen
#[derive(Debug, Clone)]
pub struct DashboardState {
    pub latch: LatchedKey,
    pub timers: DisplayTimerState,
    pub screen: Dashboard,
}

impl DashboardState {
    pub fn new(screen: Dashboard) -> Self {
        Self {
            latch: LatchedKey::new(),
            timers: DisplayTimerState::default(),
            screen,
        }
    }

    /// Apply one navigation event to the focus group
    pub fn apply_nav(&mut self, nav: NavEvent) {
        match nav {
            NavEvent::FocusPrev => self.screen.focus_prev(),
            NavEvent::FocusNext => self.screen.focus_next(),
            NavEvent::Activate => self.activate(),
        }
    }

    fn activate(&mut self) {
        match self.screen.focus() {
            Focus::Current => {
                self.timers.hold = !self.timers.hold;
                self.screen.set_hold(self.timers.hold);
                #[cfg(feature = "defmt")]
                defmt::debug!("hold {}", self.timers.hold);
            }
            Focus::Max => {
                // Restart peak tracking from what is on screen now
                self.timers.sensor_peak = self.timers.sensor_raw;
                self.screen.set_peak(self.timers.sensor_peak);
                #[cfg(feature = "defmt")]
                defmt::debug!("peak reset to {}", self.timers.sensor_peak);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> DashboardState {
        DashboardState::new(Dashboard::new(128, 64, 4095))
    }

    #[test]
    fn test_activate_current_toggles_hold() {
        let mut s = state();
        s.apply_nav(NavEvent::Activate);
        assert!(s.timers.hold);
        assert!(s.screen.is_held());
        s.apply_nav(NavEvent::Activate);
        assert!(!s.timers.hold);
        assert!(!s.screen.is_held());
    }

    #[test]
    fn test_activate_max_resets_peak() {
        let mut s = state();
        s.timers.sensor_raw = 100;
        s.timers.sensor_peak = 3000;
        s.screen.set_peak(3000);

        s.apply_nav(NavEvent::FocusNext);
        assert_eq!(s.screen.focus(), Focus::Max);
        s.apply_nav(NavEvent::Activate);

        assert_eq!(s.timers.sensor_peak, 100);
        assert_eq!(s.screen.peak(), 100);
        assert!(!s.timers.hold);
    }

    #[test]
    fn test_focus_moves() {
        let mut s = state();
        s.apply_nav(NavEvent::FocusPrev);
        assert_eq!(s.screen.focus(), Focus::Max);
        s.apply_nav(NavEvent::FocusNext);
        assert_eq!(s.screen.focus(), Focus::Current);
    }
}
