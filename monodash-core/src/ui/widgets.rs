//! Retained widgets
//!
//! Each widget keeps its own state and knows its bounds. Setters return the
//! area that needs redrawing when the state actually changed, so the
//! dashboard only invalidates what moved.

use embedded_graphics::mono_font::ascii::FONT_6X10;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle};
use embedded_graphics::prelude::*;
use embedded_graphics::primitives::{Line, PrimitiveStyle, Rectangle};
use embedded_graphics::text::{Baseline, Text};
use heapless::String;

use super::draw_buffer::{UiColor, FOREGROUND};
use crate::display::Area;
use crate::status::BatteryLevel;

/// Font used by every label
pub const FONT: &MonoFont<'static> = &FONT_6X10;

/// Longest label text
pub const LABEL_LEN: usize = 12;

/// Something the dashboard can draw
pub trait Widget {
    /// Pixels this widget may touch; `None` when it draws nothing
    fn bounds(&self) -> Option<Area>;

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = UiColor>;
}

/// Which edge a label is anchored at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Align {
    /// `x` is the leftmost column
    Left,
    /// `x` is the rightmost column
    Right,
}

/// Single-line text label
#[derive(Debug, Clone)]
pub struct Label {
    x: u16,
    y: u16,
    align: Align,
    text: String<LABEL_LEN>,
}

impl Label {
    pub fn new(x: u16, y: u16, align: Align, text: &str) -> Self {
        let mut label = Self {
            x,
            y,
            align,
            text: String::new(),
        };
        label.store(text);
        label
    }

    pub fn text(&self) -> &str {
        self.text.as_str()
    }

    /// Replace the text; returns the area to redraw if it changed
    pub fn set_text(&mut self, text: &str) -> Option<Area> {
        if self.text.as_str() == text {
            return None;
        }
        let old = self.bounds();
        self.store(text);
        match (old, self.bounds()) {
            (Some(a), Some(b)) => Some(a.union(&b)),
            (a, b) => a.or(b),
        }
    }

    fn store(&mut self, text: &str) {
        self.text.clear();
        for ch in text.chars() {
            if self.text.push(ch).is_err() {
                break;
            }
        }
    }

    fn left(&self) -> u16 {
        let width = self.width();
        match self.align {
            Align::Left => self.x,
            Align::Right => (self.x + 1).saturating_sub(width),
        }
    }

    fn width(&self) -> u16 {
        self.text.chars().count() as u16 * FONT.character_size.width as u16
    }
}

impl Widget for Label {
    fn bounds(&self) -> Option<Area> {
        Area::from_size(
            self.left(),
            self.y,
            self.width(),
            FONT.character_size.height as u16,
        )
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = UiColor>,
    {
        if self.text.is_empty() {
            return Ok(());
        }
        let style = MonoTextStyle::new(FONT, FOREGROUND);
        let origin = Point::new(self.left() as i32, self.y as i32);
        Text::with_baseline(self.text.as_str(), origin, style, Baseline::Top).draw(target)?;
        Ok(())
    }
}

/// Horizontal 1-pixel rule
#[derive(Debug, Clone)]
pub struct HLine {
    area: Area,
}

impl HLine {
    pub fn new(x1: u16, x2: u16, y: u16) -> Self {
        Self {
            area: Area::new(x1, y, x2, y),
        }
    }
}

impl Widget for HLine {
    fn bounds(&self) -> Option<Area> {
        Some(self.area)
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = UiColor>,
    {
        Line::new(
            Point::new(self.area.x1 as i32, self.area.y1 as i32),
            Point::new(self.area.x2 as i32, self.area.y2 as i32),
        )
        .into_styled(PrimitiveStyle::with_stroke(FOREGROUND, 1))
        .draw(target)
    }
}

/// Battery gauge: outlined body, a tip, and up to four cells
#[derive(Debug, Clone)]
pub struct BatteryIcon {
    x: u16,
    y: u16,
    level: BatteryLevel,
}

impl BatteryIcon {
    pub const BODY_WIDTH: u16 = 15;
    pub const TIP_WIDTH: u16 = 2;
    pub const WIDTH: u16 = Self::BODY_WIDTH + Self::TIP_WIDTH;
    pub const HEIGHT: u16 = 8;

    pub fn new(x: u16, y: u16, level: BatteryLevel) -> Self {
        Self { x, y, level }
    }

    pub fn level(&self) -> BatteryLevel {
        self.level
    }

    pub fn set_level(&mut self, level: BatteryLevel) -> Option<Area> {
        if self.level == level {
            return None;
        }
        self.level = level;
        self.bounds()
    }
}

impl Widget for BatteryIcon {
    fn bounds(&self) -> Option<Area> {
        Area::from_size(self.x, self.y, Self::WIDTH, Self::HEIGHT)
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = UiColor>,
    {
        let (x, y) = (self.x as i32, self.y as i32);
        let stroke = PrimitiveStyle::with_stroke(FOREGROUND, 1);
        let fill = PrimitiveStyle::with_fill(FOREGROUND);

        Rectangle::new(
            Point::new(x, y),
            Size::new(Self::BODY_WIDTH as u32, Self::HEIGHT as u32),
        )
        .into_styled(stroke)
        .draw(target)?;
        Rectangle::new(
            Point::new(x + Self::BODY_WIDTH as i32, y + 2),
            Size::new(Self::TIP_WIDTH as u32, Self::HEIGHT as u32 - 4),
        )
        .into_styled(fill)
        .draw(target)?;

        // Cells are 2 px wide with 1 px gaps inside the outline
        for cell in 0..self.level.bars() as i32 {
            Rectangle::new(Point::new(x + 2 + cell * 3, y + 2), Size::new(2, 4))
                .into_styled(fill)
                .draw(target)?;
        }
        Ok(())
    }
}

/// Horizontal value bar with an optional focus frame
#[derive(Debug, Clone)]
pub struct Bar {
    area: Area,
    value: u16,
    max: u16,
    focused: bool,
}

impl Bar {
    /// Create a bar filling `area`; `max` of zero is treated as one
    pub fn new(area: Area, max: u16) -> Self {
        Self {
            area,
            value: 0,
            max: max.max(1),
            focused: false,
        }
    }

    pub fn value(&self) -> u16 {
        self.value
    }

    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Set the value (clamped to `max`); returns the area to redraw
    pub fn set_value(&mut self, value: u16) -> Option<Area> {
        let value = value.min(self.max);
        if self.value == value {
            return None;
        }
        let before = self.fill_width();
        self.value = value;
        (before != self.fill_width()).then_some(self.area)
    }

    pub fn set_focused(&mut self, focused: bool) -> Option<Area> {
        if self.focused == focused {
            return None;
        }
        self.focused = focused;
        Some(self.area)
    }

    /// Usable fill width inside the outline and its 1 px padding
    fn track_width(&self) -> u32 {
        (self.area.width() as u32).saturating_sub(6)
    }

    /// Filled columns for the current value
    pub fn fill_width(&self) -> u32 {
        self.track_width() * self.value as u32 / self.max as u32
    }
}

impl Widget for Bar {
    fn bounds(&self) -> Option<Area> {
        Some(self.area)
    }

    fn draw<D>(&self, target: &mut D) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = UiColor>,
    {
        let outer = self.area.to_rectangle();
        let stroke = PrimitiveStyle::with_stroke(FOREGROUND, 1);

        if self.focused {
            outer.into_styled(stroke).draw(target)?;
        }
        outer.offset(-1).into_styled(stroke).draw(target)?;

        let fill = self.fill_width();
        if fill > 0 {
            let track = outer.offset(-3);
            Rectangle::new(track.top_left, Size::new(fill, track.size.height))
                .into_styled(PrimitiveStyle::with_fill(FOREGROUND))
                .draw(target)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ui::draw_buffer::DrawBuffer;
    use embedded_graphics::pixelcolor::GrayColor;

    fn lit_in<const N: usize>(buf: &DrawBuffer<N>) -> usize {
        buf.region().pixels().iter().filter(|p| p.luma() > 0).count()
    }

    #[test]
    fn test_label_bounds() {
        let left = Label::new(0, 0, Align::Left, "00:00:00");
        assert_eq!(left.bounds(), Some(Area::new(0, 0, 47, 9)));

        let right = Label::new(112, 0, Align::Right, "4.20V");
        assert_eq!(right.bounds(), Some(Area::new(83, 0, 112, 9)));

        let empty = Label::new(0, 0, Align::Left, "");
        assert_eq!(empty.bounds(), None);
    }

    #[test]
    fn test_label_dirty_covers_old_and_new() {
        let mut label = Label::new(127, 0, Align::Right, "12");
        assert_eq!(label.set_text("12"), None);
        let dirty = label.set_text("1234").unwrap();
        assert_eq!(dirty, Area::new(104, 0, 127, 9));

        let shrink = label.set_text("1").unwrap();
        assert_eq!(shrink, Area::new(104, 0, 127, 9));
    }

    #[test]
    fn test_label_truncates() {
        let label = Label::new(0, 0, Align::Left, "a very long label text");
        assert_eq!(label.text().len(), LABEL_LEN);
    }

    #[test]
    fn test_label_draws_inside_bounds() {
        let label = Label::new(0, 0, Align::Left, "Max");
        let mut buf = DrawBuffer::<{ 128 * 16 }>::new();
        assert!(buf.begin(Area::new(0, 0, 127, 15)));
        label.draw(&mut buf).unwrap();

        let bounds = label.bounds().unwrap();
        let region = buf.region();
        for (x, y, color) in region.iter() {
            if color.luma() > 0 {
                assert!(bounds.contains(x, y), "({}, {}) outside label", x, y);
            }
        }
        assert!(lit_in(&buf) > 0);
    }

    #[test]
    fn test_battery_cells() {
        let mut icon = BatteryIcon::new(0, 0, BatteryLevel::Empty);
        let mut buf = DrawBuffer::<{ 17 * 8 }>::new();
        buf.begin(icon.bounds().unwrap());
        icon.draw(&mut buf).unwrap();
        let empty = lit_in(&buf);

        assert_eq!(icon.set_level(BatteryLevel::Empty), None);
        assert!(icon.set_level(BatteryLevel::Full).is_some());
        buf.begin(icon.bounds().unwrap());
        icon.draw(&mut buf).unwrap();
        // Four 2x4 cells
        assert_eq!(lit_in(&buf), empty + 4 * 8);
    }

    #[test]
    fn test_bar_fill() {
        let mut bar = Bar::new(Area::new(0, 0, 105, 8), 4095);
        assert_eq!(bar.fill_width(), 0);
        assert!(bar.set_value(4095).is_some());
        assert_eq!(bar.fill_width(), 100);
        assert_eq!(bar.set_value(9999), None);
        assert!(bar.set_value(2048).is_some());
        assert_eq!(bar.fill_width(), 50);
    }

    #[test]
    fn test_bar_small_change_not_dirty() {
        let mut bar = Bar::new(Area::new(0, 0, 105, 8), 4095);
        // One count is far below one pixel of fill
        assert_eq!(bar.set_value(1), None);
        assert_eq!(bar.value(), 1);
    }

    #[test]
    fn test_bar_focus_frame() {
        let mut bar = Bar::new(Area::new(0, 0, 19, 8), 100);
        let mut buf = DrawBuffer::<{ 20 * 9 }>::new();

        buf.begin(Area::new(0, 0, 19, 8));
        bar.draw(&mut buf).unwrap();
        let unfocused = lit_in(&buf);

        assert!(bar.set_focused(true).is_some());
        assert_eq!(bar.set_focused(true), None);
        buf.begin(Area::new(0, 0, 19, 8));
        bar.draw(&mut buf).unwrap();
        // Outer frame: 2*20 + 2*7
        assert_eq!(lit_in(&buf), unfocused + 54);
    }
}
