//! Cooperative render loop
//!
//! One call to [`RenderLoop::tick`] does, in order:
//!
//! 1. run the status timer when it is due
//! 2. poll the input device once and dispatch the result
//! 3. redraw every dirty area in bands of at most `buffer_rows` rows,
//!    flushing each band through the port before the next one is drawn
//!
//! Nothing blocks and nothing is shared: the caller decides the cadence.

use monodash_hal::AnalogSource;

use crate::config::{DashboardConfig, MAX_BUFFER_ROWS};
use crate::display::page_buffer::WIDTH;
use crate::input::KeyDispatcher;
use crate::state::DashboardState;
use crate::status::StatusUpdater;
use crate::ui::{Dashboard, DrawBuffer, PeriodicTimer, UiPort};

/// Pixels in the partial draw buffer
pub const DRAW_BUFFER_LEN: usize = WIDTH * MAX_BUFFER_ROWS as usize;

/// Dashboard render loop
pub struct RenderLoop<P, A> {
    port: P,
    analog: A,
    state: DashboardState,
    status: StatusUpdater,
    status_timer: PeriodicTimer,
    dispatcher: KeyDispatcher,
    buffer: DrawBuffer<DRAW_BUFFER_LEN>,
    buffer_rows: u16,
    flushes: u32,
    started: bool,
}

impl<P: UiPort, A: AnalogSource> RenderLoop<P, A> {
    /// Build the loop and its dashboard from `config`
    ///
    /// `config` is expected to have passed [`DashboardConfig::validate`];
    /// out-of-range buffer rows are clamped.
    pub fn new(port: P, analog: A, config: &DashboardConfig) -> Self {
        let display = &config.display;
        let screen = Dashboard::new(display.width, display.height, config.sensor.full_scale);

        Self {
            port,
            analog,
            state: DashboardState::new(screen),
            status: StatusUpdater::new(config.battery),
            status_timer: PeriodicTimer::new(config.timing.status_period_ms as u64),
            dispatcher: KeyDispatcher::new(),
            buffer: DrawBuffer::new(),
            buffer_rows: display.buffer_rows.clamp(1, MAX_BUFFER_ROWS),
            flushes: 0,
            started: false,
        }
    }

    /// Run one loop iteration at `now_ms` milliseconds since boot
    pub fn tick(&mut self, now_ms: u64) {
        if !self.started {
            self.started = true;
            #[cfg(feature = "defmt")]
            defmt::info!("loop start");
        }

        if self.status_timer.poll(now_ms) {
            self.status.refresh(&mut self.state, &mut self.analog, now_ms);
        }

        let event = self.port.poll(&mut self.state.latch);
        if let Some(nav) = self.dispatcher.feed(event) {
            #[cfg(feature = "defmt")]
            defmt::debug!("nav {}", nav);
            self.state.apply_nav(nav);
        }

        self.redraw();
    }

    /// Drain the dirty queue through the draw buffer
    fn redraw(&mut self) {
        let screen = self.state.screen.screen();

        while let Some(dirty) = self.state.screen.pop_dirty() {
            let Some(area) = self.port.round(dirty).intersect(&screen) else {
                continue;
            };
            let rows = self
                .buffer_rows
                .min(DrawBuffer::<DRAW_BUFFER_LEN>::rows_for_width(area.width()))
                .max(1);

            for band in area.bands(rows) {
                if !self.buffer.begin(band) {
                    #[cfg(feature = "defmt")]
                    defmt::warn!("band {} does not fit the draw buffer", band);
                    continue;
                }
                if let Err(never) = self.state.screen.draw(&mut self.buffer, band) {
                    match never {}
                }

                let done = self.port.flush(self.buffer.region());
                debug_assert_eq!(done.area(), band);
                self.flushes = self.flushes.wrapping_add(1);
            }
        }
    }

    pub fn state(&self) -> &DashboardState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut DashboardState {
        &mut self.state
    }

    pub fn port(&self) -> &P {
        &self.port
    }

    pub fn port_mut(&mut self) -> &mut P {
        &mut self.port
    }

    pub fn analog_mut(&mut self) -> &mut A {
        &mut self.analog
    }

    /// Bands flushed since start
    pub fn flush_count(&self) -> u32 {
        self.flushes
    }

    pub fn buffer_rows(&self) -> u16 {
        self.buffer_rows
    }
}
