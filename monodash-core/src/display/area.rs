//! Inclusive pixel rectangles

use embedded_graphics::prelude::{Point, Size};
use embedded_graphics::primitives::Rectangle;

/// Rows per controller page (one byte of column memory)
pub const PAGE_HEIGHT: u16 = 8;

/// Rectangle in panel coordinates with inclusive corners
///
/// `x1 <= x2` and `y1 <= y2` always hold; an `Area` is never empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct Area {
    pub x1: u16,
    pub y1: u16,
    pub x2: u16,
    pub y2: u16,
}

impl Area {
    /// Create an area from two corners, normalizing their order
    pub fn new(x1: u16, y1: u16, x2: u16, y2: u16) -> Self {
        Self {
            x1: x1.min(x2),
            y1: y1.min(y2),
            x2: x1.max(x2),
            y2: y1.max(y2),
        }
    }

    /// Create an area from a top-left corner and a size
    ///
    /// Returns `None` for a zero width or height.
    pub fn from_size(x: u16, y: u16, width: u16, height: u16) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            x1: x,
            y1: y,
            x2: x.checked_add(width - 1)?,
            y2: y.checked_add(height - 1)?,
        })
    }

    /// Area covering a whole `width` x `height` panel
    pub fn screen(width: u16, height: u16) -> Option<Self> {
        Self::from_size(0, 0, width, height)
    }

    pub const fn width(&self) -> u16 {
        self.x2 - self.x1 + 1
    }

    pub const fn height(&self) -> u16 {
        self.y2 - self.y1 + 1
    }

    /// Number of pixels covered
    pub const fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    pub const fn contains(&self, x: u16, y: u16) -> bool {
        x >= self.x1 && x <= self.x2 && y >= self.y1 && y <= self.y2
    }

    /// Overlapping part of two areas
    pub fn intersect(&self, other: &Area) -> Option<Area> {
        let x1 = self.x1.max(other.x1);
        let y1 = self.y1.max(other.y1);
        let x2 = self.x2.min(other.x2);
        let y2 = self.y2.min(other.y2);
        if x1 > x2 || y1 > y2 {
            None
        } else {
            Some(Area { x1, y1, x2, y2 })
        }
    }

    /// Smallest area covering both
    pub fn union(&self, other: &Area) -> Area {
        Area {
            x1: self.x1.min(other.x1),
            y1: self.y1.min(other.y1),
            x2: self.x2.max(other.x2),
            y2: self.y2.max(other.y2),
        }
    }

    /// True when `other` lies completely inside `self`
    pub fn covers(&self, other: &Area) -> bool {
        self.x1 <= other.x1 && self.y1 <= other.y1 && self.x2 >= other.x2 && self.y2 >= other.y2
    }

    /// Clip to a `width` x `height` panel
    pub fn clip(&self, width: u16, height: u16) -> Option<Area> {
        self.intersect(&Self::screen(width, height)?)
    }

    /// Snap the vertical bounds outward to 8-row page boundaries
    pub const fn round_to_pages(&self) -> Area {
        Area {
            x1: self.x1,
            y1: self.y1 & !(PAGE_HEIGHT - 1),
            x2: self.x2,
            y2: (self.y2 & !(PAGE_HEIGHT - 1)) + (PAGE_HEIGHT - 1),
        }
    }

    /// True when both vertical bounds sit on page boundaries
    pub const fn is_page_aligned(&self) -> bool {
        self.y1 % PAGE_HEIGHT == 0 && self.y2 % PAGE_HEIGHT == PAGE_HEIGHT - 1
    }

    /// Split into horizontal bands of at most `rows` rows, top to bottom
    pub fn bands(&self, rows: u16) -> Bands {
        Bands {
            area: *self,
            next_y: Some(self.y1),
            rows: rows.max(1),
        }
    }

    /// Every coordinate in row-major order
    pub fn points(&self) -> impl Iterator<Item = (u16, u16)> {
        let area = *self;
        (area.y1..=area.y2).flat_map(move |y| (area.x1..=area.x2).map(move |x| (x, y)))
    }

    pub fn to_rectangle(&self) -> Rectangle {
        Rectangle::new(
            Point::new(self.x1 as i32, self.y1 as i32),
            Size::new(self.width() as u32, self.height() as u32),
        )
    }

    /// Convert an embedded-graphics rectangle, dropping anything left of or
    /// above the origin
    pub fn from_rectangle(rect: &Rectangle) -> Option<Area> {
        let br = rect.bottom_right()?;
        if br.x < 0 || br.y < 0 {
            return None;
        }
        let x1 = rect.top_left.x.max(0);
        let y1 = rect.top_left.y.max(0);
        let clamp = |v: i32| v.min(u16::MAX as i32) as u16;
        Some(Area::new(clamp(x1), clamp(y1), clamp(br.x), clamp(br.y)))
    }
}

/// Iterator returned by [`Area::bands`]
pub struct Bands {
    area: Area,
    next_y: Option<u16>,
    rows: u16,
}

impl Iterator for Bands {
    type Item = Area;

    fn next(&mut self) -> Option<Area> {
        let y1 = self.next_y?;
        let y2 = y1.saturating_add(self.rows - 1).min(self.area.y2);
        self.next_y = if y2 >= self.area.y2 {
            None
        } else {
            Some(y2 + 1)
        };
        Some(Area {
            x1: self.area.x1,
            y1,
            x2: self.area.x2,
            y2,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimensions() {
        let area = Area::new(2, 3, 9, 4);
        assert_eq!(area.width(), 8);
        assert_eq!(area.height(), 2);
        assert_eq!(area.pixel_count(), 16);
        assert_eq!(Area::from_size(2, 3, 8, 2), Some(area));
        assert_eq!(Area::from_size(0, 0, 0, 4), None);
    }

    #[test]
    fn test_new_normalizes_corners() {
        assert_eq!(Area::new(9, 4, 2, 3), Area::new(2, 3, 9, 4));
    }

    #[test]
    fn test_intersect_and_union() {
        let a = Area::new(0, 0, 9, 9);
        let b = Area::new(5, 5, 14, 14);
        assert_eq!(a.intersect(&b), Some(Area::new(5, 5, 9, 9)));
        assert_eq!(a.union(&b), Area::new(0, 0, 14, 14));
        assert_eq!(a.intersect(&Area::new(10, 0, 12, 2)), None);
        assert!(a.union(&b).covers(&a));
    }

    #[test]
    fn test_clip() {
        let area = Area::new(120, 60, 140, 70);
        assert_eq!(area.clip(128, 64), Some(Area::new(120, 60, 127, 63)));
        assert_eq!(Area::new(130, 0, 131, 1).clip(128, 64), None);
    }

    #[test]
    fn test_round_to_pages() {
        let area = Area::new(4, 3, 20, 12);
        let rounded = area.round_to_pages();
        assert_eq!(rounded, Area::new(4, 0, 20, 15));
        assert!(rounded.is_page_aligned());
        assert!(!area.is_page_aligned());
        assert_eq!(Area::new(0, 8, 1, 15).round_to_pages(), Area::new(0, 8, 1, 15));
        assert_eq!(Area::new(0, 63, 1, 63).round_to_pages(), Area::new(0, 56, 1, 63));
    }

    #[test]
    fn test_bands() {
        let area = Area::new(0, 5, 127, 27);
        let mut bands = area.bands(10);
        assert_eq!(bands.next(), Some(Area::new(0, 5, 127, 14)));
        assert_eq!(bands.next(), Some(Area::new(0, 15, 127, 24)));
        assert_eq!(bands.next(), Some(Area::new(0, 25, 127, 27)));
        assert_eq!(bands.next(), None);
    }

    #[test]
    fn test_bands_single_row_area() {
        let area = Area::new(0, 63, 3, 63);
        assert_eq!(area.bands(10).count(), 1);
    }

    #[test]
    fn test_points_row_major() {
        let area = Area::new(1, 1, 2, 2);
        let mut points = area.points();
        assert_eq!(points.next(), Some((1, 1)));
        assert_eq!(points.next(), Some((2, 1)));
        assert_eq!(points.next(), Some((1, 2)));
        assert_eq!(points.next(), Some((2, 2)));
        assert_eq!(points.next(), None);
    }

    #[test]
    fn test_rectangle_conversion() {
        let area = Area::new(3, 4, 10, 6);
        assert_eq!(Area::from_rectangle(&area.to_rectangle()), Some(area));

        let partly_off = Rectangle::new(Point::new(-2, -2), Size::new(4, 4));
        assert_eq!(Area::from_rectangle(&partly_off), Some(Area::new(0, 0, 1, 1)));

        let empty = Rectangle::new(Point::new(0, 0), Size::new(0, 3));
        assert_eq!(Area::from_rectangle(&empty), None);
    }
}
