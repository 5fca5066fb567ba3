use ratatui::Frame;
use ratatui::layout::Rect as LayoutRect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Clear, Paragraph, Wrap};

use crate::geom::Rect;
use crate::placement::ComputedPosition;

/// Bordered floating panel drawn at a computed position.
///
/// Purely presentational: the controller decides *where* and *whether* the
/// panel exists; this type only paints it, clipped to the visible buffer.
#[derive(Debug, Clone)]
pub struct OverlayPanel {
    title: String,
    body: String,
    width: u16,
    height: u16,
    bg: Color,
    dim_backdrop: bool,
}

impl OverlayPanel {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: String::new(),
            width: 24,
            height: 5,
            bg: Color::Black,
            dim_backdrop: false,
        }
    }

    pub fn set_body(&mut self, body: impl Into<String>) {
        self.body = body.into();
    }

    pub fn set_size(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    pub fn set_bg(&mut self, bg: Color) {
        self.bg = bg;
    }

    pub fn set_dim_backdrop(&mut self, dim: bool) {
        self.dim_backdrop = dim;
    }

    pub fn size(&self) -> (u16, u16) {
        (self.width, self.height)
    }

    /// The panel's box at `position`, in overlay coordinates (may extend
    /// beyond the drawable area; rendering clips).
    pub fn rect_at(&self, position: &ComputedPosition) -> Rect {
        Rect::new(position.x, position.y, self.width, self.height)
    }

    pub fn render(&self, frame: &mut Frame, area: LayoutRect, position: &ComputedPosition) {
        if area.width == 0 || area.height == 0 {
            return;
        }
        if self.dim_backdrop {
            let buffer = frame.buffer_mut();
            let dim_style = Style::default().add_modifier(Modifier::DIM);
            for y in area.y..area.y.saturating_add(area.height) {
                for x in area.x..area.x.saturating_add(area.width) {
                    if let Some(cell) = buffer.cell_mut((x, y)) {
                        cell.set_style(dim_style);
                    }
                }
            }
        }
        let Some(rect) = self.rect_at(position).clip_to(area) else {
            return;
        };
        frame.render_widget(Clear, rect);
        let block = Block::default()
            .title(self.title.as_str())
            .borders(Borders::ALL);
        let paragraph = Paragraph::new(self.body.as_str())
            .style(Style::default().bg(self.bg))
            .block(block)
            .wrap(Wrap { trim: true });
        frame.render_widget(paragraph, rect);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::placement::Placement;

    fn position(x: i32, y: i32) -> ComputedPosition {
        ComputedPosition {
            x,
            y,
            placement_used: Placement::BOTTOM_START,
            cross_shift: 0,
        }
    }

    #[test]
    fn rect_at_uses_panel_size() {
        let mut panel = OverlayPanel::new("t");
        panel.set_size(30, 7);
        assert_eq!(panel.rect_at(&position(5, -2)), Rect::new(5, -2, 30, 7));
    }

    #[test]
    fn offscreen_panel_clips_instead_of_panicking() {
        let panel = OverlayPanel::new("t");
        let area = LayoutRect {
            x: 0,
            y: 0,
            width: 40,
            height: 10,
        };
        assert!(panel.rect_at(&position(-30, 0)).clip_to(area).is_some());
        assert!(panel.rect_at(&position(-100, 0)).clip_to(area).is_none());
    }
}
