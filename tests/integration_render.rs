use ratatui::Terminal;
use ratatui::backend::TestBackend;

use term_overlay::geom::Rect;
use term_overlay::panel::OverlayPanel;
use term_overlay::placement::{Offset, Placement, ViewportBounds, compute};

fn row_text(terminal: &Terminal<TestBackend>, y: u16) -> String {
    let buffer = terminal.backend().buffer();
    let width = buffer.area.width;
    (0..width)
        .map(|x| buffer[(x, y)].symbol())
        .collect::<String>()
}

fn cell_at(terminal: &Terminal<TestBackend>, x: u16, y: u16) -> String {
    terminal.backend().buffer()[(x, y)].symbol().to_string()
}

#[test]
fn panel_renders_at_the_computed_position() {
    let backend = TestBackend::new(60, 20);
    let mut terminal = Terminal::new(backend).unwrap();

    let anchor = Rect::new(10, 3, 8, 1);
    let content = Rect::new(0, 0, 20, 5);
    let position = compute(
        anchor,
        content,
        Placement::BOTTOM_START,
        Offset::new(1, 0),
        ViewportBounds::new(Rect::new(0, 0, 60, 20), 1),
    );
    assert_eq!((position.x, position.y), (10, 5));

    let mut panel = OverlayPanel::new("menu");
    panel.set_body("hello");
    panel.set_size(20, 5);
    terminal
        .draw(|frame| panel.render(frame, frame.area(), &position))
        .unwrap();

    // Top border with the title starts at the computed cell.
    assert_eq!(cell_at(&terminal, 10, 5), "┌");
    assert!(row_text(&terminal, 5).contains("menu"));
    assert_eq!(cell_at(&terminal, 10, 9), "└");
    // Body is drawn inside the border.
    assert!(row_text(&terminal, 6).contains("hello"));
}

#[test]
fn flipped_panel_renders_above_the_anchor() {
    let backend = TestBackend::new(60, 12);
    let mut terminal = Terminal::new(backend).unwrap();

    let anchor = Rect::new(20, 9, 6, 1);
    let content = Rect::new(0, 0, 16, 4);
    let position = compute(
        anchor,
        content,
        Placement::BOTTOM_START,
        Offset::new(1, 0),
        ViewportBounds::new(Rect::new(0, 0, 60, 12), 1),
    );
    assert_eq!(position.placement_used, Placement::TOP_START);
    assert_eq!(position.y, 4);

    let mut panel = OverlayPanel::new("tip");
    panel.set_size(16, 4);
    terminal
        .draw(|frame| panel.render(frame, frame.area(), &position))
        .unwrap();
    assert_eq!(cell_at(&terminal, 20, 4), "┌");
    assert_eq!(cell_at(&terminal, 20, 7), "└");
}

#[test]
fn partially_offscreen_panel_draws_only_the_visible_part() {
    let backend = TestBackend::new(30, 10);
    let mut terminal = Terminal::new(backend).unwrap();

    // Content taller than the padded viewport: the clamp pushes it negative.
    let anchor = Rect::new(2, 4, 4, 1);
    let content = Rect::new(0, 0, 12, 14);
    let position = compute(
        anchor,
        content,
        Placement::RIGHT_START,
        Offset::new(1, 0),
        ViewportBounds::new(Rect::new(0, 0, 30, 10), 1),
    );
    assert!(position.y < 0);

    let mut panel = OverlayPanel::new("tall");
    panel.set_size(12, 14);
    terminal
        .draw(|frame| panel.render(frame, frame.area(), &position))
        .unwrap();
    // The panel is drawn only in its visible slice (the border closes at the
    // clip edge); nothing panics and nothing wraps around.
    assert_eq!(cell_at(&terminal, 7, 0), "┌");
    assert_eq!(cell_at(&terminal, 7, 5), "│");
    assert_eq!(cell_at(&terminal, 0, 0), " ");
}
