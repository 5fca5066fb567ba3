use ratatui::layout::Rect as LayoutRect;

/// Signed rectangle: origin may be negative, size is unsigned.
///
/// Overlay math routinely produces negative coordinates (a flip near the top
/// edge, a clamp against content wider than the viewport), so measurements and
/// computed positions use this type rather than `ratatui`'s unsigned rect.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u16,
    pub height: u16,
}

impl Rect {
    pub const fn new(x: i32, y: i32, width: u16, height: u16) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// One past the right edge.
    pub fn right(&self) -> i32 {
        self.x + self.width as i32
    }

    /// One past the bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.height as i32
    }

    /// Point containment. Zero-sized rects contain nothing.
    pub fn contains(&self, x: i32, y: i32) -> bool {
        if self.width == 0 || self.height == 0 {
            return false;
        }
        x >= self.x && x < self.right() && y >= self.y && y < self.bottom()
    }

    pub fn from_layout(rect: LayoutRect) -> Self {
        Self {
            x: rect.x as i32,
            y: rect.y as i32,
            width: rect.width,
            height: rect.height,
        }
    }

    /// Visible portion of this rect within `area`, as a drawable layout rect.
    /// Returns `None` when the intersection is empty.
    pub fn clip_to(&self, area: LayoutRect) -> Option<LayoutRect> {
        let area_x = area.x as i32;
        let area_y = area.y as i32;
        let x0 = self.x.max(area_x);
        let y0 = self.y.max(area_y);
        let x1 = self.right().min(area_x + area.width as i32);
        let y1 = self.bottom().min(area_y + area.height as i32);
        if x1 <= x0 || y1 <= y0 {
            return None;
        }
        Some(LayoutRect {
            x: x0 as u16,
            y: y0 as u16,
            width: (x1 - x0) as u16,
            height: (y1 - y0) as u16,
        })
    }
}

impl From<LayoutRect> for Rect {
    fn from(rect: LayoutRect) -> Self {
        Self::from_layout(rect)
    }
}
