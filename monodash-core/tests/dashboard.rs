//! End-to-end render loop tests against an in-memory panel

use std::cell::Cell;
use std::rc::Rc;

use monodash_core::config::DashboardConfig;
use monodash_core::display::{Area, FlushStrategy, FramebufferTranslator, PageBuffer};
use monodash_core::input::{InputSampler, JoystickPins};
use monodash_core::ui::{Bridge, Focus};
use monodash_core::RenderLoop;
use monodash_hal::{AnalogChannel, AnalogSource, InputPin};

/// Pulled-up joystick line shared with the test
#[derive(Clone, Default)]
struct Line(Rc<Cell<bool>>);

impl Line {
    fn press(&self) {
        self.0.set(true);
    }

    fn release(&self) {
        self.0.set(false);
    }
}

impl InputPin for Line {
    fn is_high(&self) -> bool {
        !self.0.get()
    }
}

#[derive(Default)]
struct Adc {
    battery: u16,
    sensor: u16,
}

impl AnalogSource for Adc {
    fn read(&mut self, channel: AnalogChannel) -> u16 {
        match channel {
            AnalogChannel::Battery => self.battery,
            AnalogChannel::Sensor => self.sensor,
        }
    }
}

struct Joystick {
    enter: Line,
    down: Line,
}

type Dash = RenderLoop<Bridge<PageBuffer, Line>, Adc>;

fn dashboard(strategy: FlushStrategy) -> (Dash, Joystick) {
    let pins = JoystickPins {
        enter: Line::default(),
        right: Line::default(),
        left: Line::default(),
        up: Line::default(),
        down: Line::default(),
    };
    let joystick = Joystick {
        enter: pins.enter.clone(),
        down: pins.down.clone(),
    };

    let mut config = DashboardConfig::default();
    config.display.strategy = strategy;

    let bridge = Bridge::new(
        FramebufferTranslator::new(PageBuffer::new(), strategy),
        InputSampler::new(pins),
    );
    (RenderLoop::new(bridge, Adc::default(), &config), joystick)
}

fn panel(dash: &Dash) -> &PageBuffer {
    dash.port().translator().transport()
}

fn lit_in(panel: &PageBuffer, area: Area) -> usize {
    area.points().filter(|&(x, y)| panel.pixel(x, y)).count()
}

/// Drive both dashboards through the same session
fn run_session(dash: &mut Dash, joystick: &Joystick) {
    let mut now = 0;
    let mut step = |dash: &mut Dash, ms: u64| {
        now += ms;
        dash.tick(now);
    };

    step(dash, 0);
    dash.analog_mut().battery = 2365;
    dash.analog_mut().sensor = 3000;
    step(dash, 500);

    joystick.down.press();
    step(dash, 1);
    joystick.down.release();
    step(dash, 1);

    dash.analog_mut().sensor = 1200;
    step(dash, 500);

    joystick.enter.press();
    step(dash, 1);
    joystick.enter.release();
    step(dash, 1);

    step(dash, 3_600_000);
}

#[test]
fn test_boot_frame() {
    let (mut dash, _joystick) = dashboard(FlushStrategy::ClearAndSet);
    dash.tick(0);
    let panel = panel(&dash);

    // Uptime text
    assert!(lit_in(panel, Area::new(0, 0, 47, 9)) > 0);
    // Separator: 120 px centred on row 10
    assert_eq!(lit_in(panel, Area::new(0, 10, 127, 10)), 120);
    assert!(panel.pixel(4, 10) && panel.pixel(123, 10));
    // Focus frame on the Current bar only
    assert!(panel.pixel(22, 16));
    assert!(!panel.pixel(22, 34));
    // Nothing between the bars
    assert_eq!(lit_in(panel, Area::new(0, 28, 127, 31)), 0);
}

#[test]
fn test_status_and_navigation() {
    let (mut dash, joystick) = dashboard(FlushStrategy::ClearAndSet);
    run_session(&mut dash, &joystick);

    let state = dash.state();
    assert_eq!(state.screen.voltage_text(), "4.19V");
    assert_eq!(state.screen.uptime_text(), "01:00:01");
    assert_eq!(state.screen.focus(), Focus::Max);
    // Enter on Max restarted the peak from the 1200 reading
    assert_eq!(state.timers.sensor_peak, 1200);
    assert_eq!(state.screen.peak(), 1200);
    assert!(!state.timers.hold);

    let panel = panel(&dash);
    assert!(panel.pixel(22, 34));
    assert!(!panel.pixel(22, 16));
    assert_eq!(dash.port().translator().failure_count(), 0);
}

#[test]
fn test_strategies_leave_same_panel() {
    let (mut plain, joystick_a) = dashboard(FlushStrategy::ClearAndSet);
    let (mut packed, joystick_b) = dashboard(FlushStrategy::PagePacked);

    run_session(&mut plain, &joystick_a);
    run_session(&mut packed, &joystick_b);

    assert_eq!(panel(&plain).pages(), panel(&packed).pages());
    assert!(panel(&plain).lit_count() > 0);
}

#[test]
fn test_page_packed_flushes_whole_pages() {
    let (mut dash, _joystick) = dashboard(FlushStrategy::PagePacked);
    dash.tick(0);
    let before = dash.flush_count();

    dash.analog_mut().battery = 4095;
    dash.tick(500);
    assert!(dash.flush_count() > before);
    assert_eq!(dash.state().screen.voltage_text(), "7.26V");
    assert_eq!(dash.state().screen.battery_level(), monodash_core::status::BatteryLevel::Full);
}
