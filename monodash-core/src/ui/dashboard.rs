//! Dashboard screen
//!
//! ```text
//!  0         48            78    107 111  127
//!  +----------------------------------------+
//!  |00:00:00               4.19V  [||||]>   |  y 0..9
//!  |  ------------------------------------  |  y 10
//!  |Cur [#########            ]       2048  |  y 16..25
//!  |Max [#############        ]       3172  |  y 34..43
//!  +----------------------------------------+
//! ```
//!
//! Widgets report what changed; the screen keeps a short queue of dirty
//! areas for the render loop to drain.

use embedded_graphics::prelude::*;
use heapless::{String, Vec};

use super::draw_buffer::UiColor;
use super::widgets::{Align, Bar, BatteryIcon, HLine, Label, Widget};
use crate::display::Area;
use crate::status::BatteryLevel;

/// Pending dirty areas before the queue collapses to a full redraw
pub const DIRTY_SLOTS: usize = 8;

const RULE_Y: u16 = 10;
const RULE_LEN: u16 = 120;
const CURRENT_Y: u16 = 16;
const MAX_Y: u16 = 34;
const BAR_X1: u16 = 22;
const BAR_X2: u16 = 100;
const BAR_HEIGHT: u16 = 10;
const ICON_MARGIN: u16 = 4;

/// Focusable widgets, in focus order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Focus {
    #[default]
    Current,
    Max,
}

impl Focus {
    pub fn next(self) -> Self {
        match self {
            Focus::Current => Focus::Max,
            Focus::Max => Focus::Current,
        }
    }

    pub fn prev(self) -> Self {
        // Two entries: stepping back is the same as stepping forward
        self.next()
    }
}

/// Merging queue of screen areas awaiting redraw
#[derive(Debug, Clone)]
pub struct DirtyAreas {
    screen: Area,
    areas: Vec<Area, DIRTY_SLOTS>,
}

impl DirtyAreas {
    pub fn new(screen: Area) -> Self {
        Self {
            screen,
            areas: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.areas.is_empty()
    }

    pub fn len(&self) -> usize {
        self.areas.len()
    }

    /// Queue `area`, merging it with anything it overlaps
    pub fn push(&mut self, area: Area) {
        let Some(mut area) = area.intersect(&self.screen) else {
            return;
        };
        while let Some(i) = self.areas.iter().position(|a| a.intersect(&area).is_some()) {
            area = area.union(&self.areas.swap_remove(i));
        }
        if self.areas.push(area).is_err() {
            self.areas.clear();
            // Capacity is at least one
            let _ = self.areas.push(self.screen);
        }
    }

    pub fn pop(&mut self) -> Option<Area> {
        self.areas.pop()
    }

    pub fn clear(&mut self) {
        self.areas.clear();
    }
}

/// The single dashboard screen
#[derive(Debug, Clone)]
pub struct Dashboard {
    screen: Area,
    uptime: Label,
    voltage: Label,
    battery: BatteryIcon,
    rule: HLine,
    current_caption: Label,
    current_bar: Bar,
    current_value: Label,
    max_caption: Label,
    max_bar: Bar,
    max_value: Label,
    focus: Focus,
    hold: bool,
    dirty: DirtyAreas,
}

impl Dashboard {
    /// Lay out the screen for a `width`x`height` panel
    ///
    /// `full_scale` is the sensor reading that fills a bar. The whole
    /// screen starts out dirty.
    pub fn new(width: u16, height: u16, full_scale: u16) -> Self {
        let screen = Area::new(0, 0, width.max(1) - 1, height.max(1) - 1);
        let right = screen.x2;
        let icon_x = (right + 1).saturating_sub(BatteryIcon::WIDTH);
        let rule_x = (width.saturating_sub(RULE_LEN)) / 2;

        let mut dashboard = Self {
            screen,
            uptime: Label::new(0, 0, Align::Left, "00:00:00"),
            voltage: Label::new(icon_x.saturating_sub(ICON_MARGIN), 0, Align::Right, "0.00V"),
            battery: BatteryIcon::new(icon_x, 1, BatteryLevel::Empty),
            rule: HLine::new(rule_x, rule_x + RULE_LEN - 1, RULE_Y),
            current_caption: Label::new(0, CURRENT_Y, Align::Left, "Cur"),
            current_bar: Bar::new(
                Area::new(BAR_X1, CURRENT_Y, BAR_X2, CURRENT_Y + BAR_HEIGHT - 1),
                full_scale,
            ),
            current_value: Label::new(right, CURRENT_Y, Align::Right, "0"),
            max_caption: Label::new(0, MAX_Y, Align::Left, "Max"),
            max_bar: Bar::new(
                Area::new(BAR_X1, MAX_Y, BAR_X2, MAX_Y + BAR_HEIGHT - 1),
                full_scale,
            ),
            max_value: Label::new(right, MAX_Y, Align::Right, "0"),
            focus: Focus::default(),
            hold: false,
            dirty: DirtyAreas::new(screen),
        };
        dashboard.current_bar.set_focused(true);
        dashboard.invalidate_all();
        dashboard
    }

    pub fn screen(&self) -> Area {
        self.screen
    }

    pub fn uptime_text(&self) -> &str {
        self.uptime.text()
    }

    pub fn voltage_text(&self) -> &str {
        self.voltage.text()
    }

    pub fn battery_level(&self) -> BatteryLevel {
        self.battery.level()
    }

    pub fn current(&self) -> u16 {
        self.current_bar.value()
    }

    pub fn peak(&self) -> u16 {
        self.max_bar.value()
    }

    pub fn focus(&self) -> Focus {
        self.focus
    }

    pub fn is_held(&self) -> bool {
        self.hold
    }

    pub fn set_uptime(&mut self, text: &str) {
        let dirty = self.uptime.set_text(text);
        self.mark(dirty);
    }

    pub fn set_voltage(&mut self, text: &str) {
        let dirty = self.voltage.set_text(text);
        self.mark(dirty);
    }

    pub fn set_battery_level(&mut self, level: BatteryLevel) {
        let dirty = self.battery.set_level(level);
        self.mark(dirty);
    }

    pub fn set_current(&mut self, raw: u16) {
        let bar = self.current_bar.set_value(raw);
        self.mark(bar);
        let text = value_text(raw);
        let label = self.current_value.set_text(&text);
        self.mark(label);
    }

    pub fn set_peak(&mut self, raw: u16) {
        let bar = self.max_bar.set_value(raw);
        self.mark(bar);
        let text = value_text(raw);
        let label = self.max_value.set_text(&text);
        self.mark(label);
    }

    /// Freeze or release the current reading; shown in its caption
    pub fn set_hold(&mut self, hold: bool) {
        self.hold = hold;
        let caption = if hold { "Hld" } else { "Cur" };
        let dirty = self.current_caption.set_text(caption);
        self.mark(dirty);
    }

    pub fn focus_next(&mut self) {
        self.set_focus(self.focus.next());
    }

    pub fn focus_prev(&mut self) {
        self.set_focus(self.focus.prev());
    }

    fn set_focus(&mut self, focus: Focus) {
        if focus == self.focus {
            return;
        }
        self.focus = focus;
        let current = self.current_bar.set_focused(focus == Focus::Current);
        self.mark(current);
        let max = self.max_bar.set_focused(focus == Focus::Max);
        self.mark(max);
    }

    fn mark(&mut self, area: Option<Area>) {
        if let Some(area) = area {
            self.dirty.push(area);
        }
    }

    /// Queue an area for redraw
    pub fn invalidate(&mut self, area: Area) {
        self.dirty.push(area);
    }

    pub fn invalidate_all(&mut self) {
        self.dirty.clear();
        self.dirty.push(self.screen);
    }

    pub fn is_dirty(&self) -> bool {
        !self.dirty.is_empty()
    }

    /// Next area to redraw
    pub fn pop_dirty(&mut self) -> Option<Area> {
        self.dirty.pop()
    }

    /// Draw every widget touching `window` into `target`
    pub fn draw<D>(&self, target: &mut D, window: Area) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = UiColor>,
    {
        self.draw_widget(&self.uptime, target, window)?;
        self.draw_widget(&self.voltage, target, window)?;
        self.draw_widget(&self.battery, target, window)?;
        self.draw_widget(&self.rule, target, window)?;
        self.draw_widget(&self.current_caption, target, window)?;
        self.draw_widget(&self.current_bar, target, window)?;
        self.draw_widget(&self.current_value, target, window)?;
        self.draw_widget(&self.max_caption, target, window)?;
        self.draw_widget(&self.max_bar, target, window)?;
        self.draw_widget(&self.max_value, target, window)
    }

    fn draw_widget<W, D>(&self, widget: &W, target: &mut D, window: Area) -> Result<(), D::Error>
    where
        W: Widget,
        D: DrawTarget<Color = UiColor>,
    {
        match widget.bounds() {
            Some(bounds) if bounds.intersect(&window).is_some() => widget.draw(target),
            _ => Ok(()),
        }
    }
}

fn value_text(raw: u16) -> String<5> {
    let mut text = String::new();
    // u16 fits in five digits
    let _ = core::fmt::write(&mut text, format_args!("{}", raw));
    text
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::draw_buffer::DrawBuffer;
    use embedded_graphics::pixelcolor::GrayColor;

    fn drain(dashboard: &mut Dashboard) -> heapless::Vec<Area, DIRTY_SLOTS> {
        let mut out = heapless::Vec::new();
        while let Some(area) = dashboard.pop_dirty() {
            out.push(area).unwrap();
        }
        out
    }

    #[test]
    fn test_starts_fully_dirty() {
        let mut dash = Dashboard::new(128, 64, 4095);
        assert_eq!(drain(&mut dash).as_slice(), &[Area::new(0, 0, 127, 63)]);
        assert!(!dash.is_dirty());
    }

    #[test]
    fn test_unchanged_text_is_clean() {
        let mut dash = Dashboard::new(128, 64, 4095);
        drain(&mut dash);
        dash.set_uptime("00:00:00");
        dash.set_voltage("0.00V");
        dash.set_battery_level(BatteryLevel::Empty);
        assert!(!dash.is_dirty());
    }

    #[test]
    fn test_uptime_dirty_area() {
        let mut dash = Dashboard::new(128, 64, 4095);
        drain(&mut dash);
        dash.set_uptime("00:00:01");
        assert_eq!(drain(&mut dash).as_slice(), &[Area::new(0, 0, 47, 9)]);
    }

    #[test]
    fn test_focus_cycles_and_dirties_bars() {
        let mut dash = Dashboard::new(128, 64, 4095);
        drain(&mut dash);
        assert_eq!(dash.focus(), Focus::Current);

        dash.focus_next();
        assert_eq!(dash.focus(), Focus::Max);
        let dirty = drain(&mut dash);
        assert_eq!(dirty.len(), 2);
        assert!(dirty.contains(&Area::new(BAR_X1, CURRENT_Y, BAR_X2, CURRENT_Y + 9)));
        assert!(dirty.contains(&Area::new(BAR_X1, MAX_Y, BAR_X2, MAX_Y + 9)));

        dash.focus_next();
        assert_eq!(dash.focus(), Focus::Current);
        dash.focus_prev();
        assert_eq!(dash.focus(), Focus::Max);
    }

    #[test]
    fn test_dirty_merge_and_collapse() {
        let screen = Area::new(0, 0, 127, 63);
        let mut dirty = DirtyAreas::new(screen);
        dirty.push(Area::new(0, 0, 9, 9));
        dirty.push(Area::new(5, 5, 20, 20));
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty.pop(), Some(Area::new(0, 0, 20, 20)));

        for i in 0..DIRTY_SLOTS as u16 {
            dirty.push(Area::new(i * 10, 0, i * 10 + 1, 1));
        }
        assert_eq!(dirty.len(), DIRTY_SLOTS);
        dirty.push(Area::new(100, 60, 101, 61));
        assert_eq!(dirty.len(), 1);
        assert_eq!(dirty.pop(), Some(screen));
    }

    #[test]
    fn test_dirty_clips_to_screen() {
        let mut dirty = DirtyAreas::new(Area::new(0, 0, 127, 63));
        dirty.push(Area::new(200, 200, 300, 300));
        assert!(dirty.is_empty());
        dirty.push(Area::new(120, 60, 300, 300));
        assert_eq!(dirty.pop(), Some(Area::new(120, 60, 127, 63)));
    }

    #[test]
    fn test_draw_window_only_touches_widgets_inside() {
        let dash = Dashboard::new(128, 64, 4095);
        let mut buf = DrawBuffer::<{ 128 * 4 }>::new();
        // Empty strip between the bars
        let window = Area::new(0, 28, 127, 31);
        assert!(buf.begin(window));
        dash.draw(&mut buf, window).unwrap();
        assert!(buf.region().pixels().iter().all(|p| p.luma() == 0));

        let window = Area::new(0, 8, 127, 11);
        assert!(buf.begin(window));
        dash.draw(&mut buf, window).unwrap();
        let rule_row = buf.region().iter().filter(|(_, y, c)| *y == RULE_Y && c.luma() > 0).count();
        assert_eq!(rule_row, RULE_LEN as usize);
    }

    #[test]
    fn test_hold_caption() {
        let mut dash = Dashboard::new(128, 64, 4095);
        drain(&mut dash);
        dash.set_hold(true);
        assert!(dash.is_held());
        assert_eq!(drain(&mut dash).as_slice(), &[Area::new(0, CURRENT_Y, 17, CURRENT_Y + 9)]);
    }

    #[test]
    fn test_captions_fit_left_of_bars() {
        let mut dash = Dashboard::new(128, 64, 4095);
        assert_eq!(dash.current_caption.text(), "Cur");
        assert_eq!(dash.max_caption.text(), "Max");
        dash.set_hold(true);
        assert_eq!(dash.current_caption.text(), "Hld");

        for caption in [&dash.current_caption, &dash.max_caption] {
            assert!(caption.bounds().unwrap().x2 < BAR_X1);
        }
    }
}
