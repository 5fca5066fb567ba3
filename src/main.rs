use std::io;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{
    DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseEventKind,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect as LayoutRect;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::Paragraph;
use ratatui::{Frame, Terminal};

use term_overlay::event_loop::{ControlFlow, EventLoop};
use term_overlay::focus::{self, FocusId, SharedFocus};
use term_overlay::geom::Rect;
use term_overlay::overlay::{OverlayConfig, OverlayController};
use term_overlay::panel::OverlayPanel;
use term_overlay::placement::Placement;
use term_overlay::{AnchorHandle, Offset, SharedRegion};

#[derive(Parser, Debug)]
#[command(
    name = "term-overlay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Anchored floating overlay demo: tooltip, menu and popover panels"
)]
struct DemoCli {
    /// Requested placement for all three overlays, e.g. `bottom-start`,
    /// `top`, `right-end`.
    #[arg(short = 'p', long = "placement", default_value = "bottom-start")]
    placement: String,

    /// Minimum clearance kept from the terminal edges.
    #[arg(long = "padding", value_name = "CELLS", default_value_t = 8)]
    padding: u16,

    /// Main-axis gap between anchor and panel.
    #[arg(long = "offset", value_name = "CELLS", default_value_t = 1)]
    offset: i32,

    /// Dismiss overlays on scroll instead of repositioning them.
    #[arg(long = "close-on-scroll")]
    close_on_scroll: bool,
}

const BUTTON_FOCUS: [FocusId; 3] = [1, 2, 3];
const PANEL_FOCUS: [FocusId; 3] = [11, 12, 13];
const BUTTON_LABELS: [&str; 3] = [" [1] Tooltip ", " [2] Menu ", " [3] Popover "];

struct Overlay {
    anchor: SharedRegion,
    content: SharedRegion,
    panel: OverlayPanel,
    controller: OverlayController<SharedRegion, SharedRegion, SharedFocus>,
}

struct App {
    focus: SharedFocus,
    overlays: Vec<Overlay>,
}

impl App {
    fn new(cli: &DemoCli, placement: Placement, viewport: Rect) -> Self {
        let focus = focus::shared();
        for id in BUTTON_FOCUS.iter().chain(PANEL_FOCUS.iter()) {
            focus.borrow_mut().attach(*id);
        }
        focus.borrow_mut().focus(BUTTON_FOCUS[0]);

        let base = OverlayConfig {
            placement,
            offset: Offset::new(cli.offset, 0),
            viewport_padding: cli.padding,
            close_on_scroll: cli.close_on_scroll,
            ..OverlayConfig::default()
        };
        let configs = [
            // Tooltips do not steal focus.
            OverlayConfig {
                trap_focus: false,
                close_on_escape: false,
                ..base
            },
            base,
            base,
        ];
        let bodies = [
            "A transient hint. Click elsewhere to dismiss.",
            "Open\nSave\nClose\nQuit",
            "Popovers trap focus until dismissed (Esc or outside click).",
        ];
        let sizes = [(34u16, 3u16), (12, 6), (30, 6)];

        let mut overlays = Vec::new();
        for i in 0..3 {
            let anchor = SharedRegion::new();
            // The popover renders into a detached root; the engine only
            // reports the choice, the demo draws both the same way.
            let content = if i == 2 {
                SharedRegion::detached_root()
            } else {
                SharedRegion::new()
            };
            let mut panel = OverlayPanel::new(BUTTON_LABELS[i].trim());
            panel.set_body(bodies[i]);
            panel.set_size(sizes[i].0, sizes[i].1);
            panel.set_bg(Color::Black);
            if i == 2 {
                panel.set_dim_backdrop(true);
            }
            let mut controller =
                OverlayController::new(content.clone(), focus.clone(), viewport, configs[i]);
            controller.set_content_focus(PANEL_FOCUS[i]);
            overlays.push(Overlay {
                anchor,
                content,
                panel,
                controller,
            });
        }
        Self { focus, overlays }
    }

    fn toggle(&mut self, index: usize) {
        let Some(overlay) = self.overlays.get_mut(index) else {
            return;
        };
        if overlay.controller.is_open() {
            overlay.controller.close();
        } else {
            // Publish the panel size up front; the placed rect follows after
            // the first layout pass.
            let (width, height) = overlay.panel.size();
            overlay.content.set(Rect::new(0, 0, width, height));
            overlay.controller.open(overlay.anchor.clone());
        }
    }

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let focused = self.focus.borrow().current();

        let mut x = area.x.saturating_add(2);
        let y = area.y.saturating_add(1);
        for (i, label) in BUTTON_LABELS.iter().enumerate() {
            let width = label.len() as u16;
            let rect = LayoutRect {
                x,
                y,
                width: width.min(area.width.saturating_sub(x)),
                height: 1,
            };
            let mut style = Style::default().bg(Color::DarkGray);
            if focused == Some(BUTTON_FOCUS[i]) {
                style = style.add_modifier(Modifier::REVERSED);
            }
            frame.render_widget(Paragraph::new(*label).style(style), rect);
            self.overlays[i].anchor.set(Rect::from_layout(rect));
            x = x.saturating_add(width + 2);
        }

        let help = "Tab: cycle focus  Enter/1-3: toggle overlay  q: quit";
        if area.height > 3 {
            let rect = LayoutRect {
                x: area.x.saturating_add(2),
                y: area.bottom().saturating_sub(1),
                width: area.width.saturating_sub(2).min(help.len() as u16),
                height: 1,
            };
            frame.render_widget(
                Paragraph::new(help).style(Style::default().fg(Color::DarkGray)),
                rect,
            );
        }

        for overlay in &mut self.overlays {
            if let Some(position) = overlay.controller.position() {
                overlay.panel.render(frame, area, &position);
                overlay.content.set(overlay.panel.rect_at(&position));
            }
        }
    }

    fn handle_event(&mut self, event: &Event) -> ControlFlow {
        // Controllers first: outside-click/Escape dismissal must win over
        // anything the demo itself does with the same event.
        for overlay in &mut self.overlays {
            overlay.controller.handle_event(event);
        }
        match event {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Char('q') => return ControlFlow::Quit,
                KeyCode::Char(c @ '1'..='3') => {
                    let index = c as usize - '1' as usize;
                    self.focus.borrow_mut().focus(BUTTON_FOCUS[index]);
                    self.toggle(index);
                }
                KeyCode::Tab => {
                    let next = match self.focus.borrow().current() {
                        Some(id) if BUTTON_FOCUS.contains(&id) => BUTTON_FOCUS[id % 3],
                        _ => BUTTON_FOCUS[0],
                    };
                    self.focus.borrow_mut().focus(next);
                }
                KeyCode::Enter => {
                    // Copy the id out before toggling; the controller borrows
                    // the focus registry itself.
                    let focused = self.focus.borrow().current();
                    if let Some(id) = focused
                        && let Some(index) = BUTTON_FOCUS.iter().position(|&b| b == id)
                    {
                        self.toggle(index);
                    }
                }
                _ => {}
            },
            Event::Mouse(mouse) if matches!(mouse.kind, MouseEventKind::Down(_)) => {
                let column = mouse.column as i32;
                let row = mouse.row as i32;
                for index in 0..self.overlays.len() {
                    let hit = self.overlays[index].anchor.contains_point(column, row);
                    if hit && !self.overlays[index].controller.is_open() {
                        self.focus.borrow_mut().focus(BUTTON_FOCUS[index]);
                        self.toggle(index);
                    }
                }
            }
            _ => {}
        }
        ControlFlow::Continue
    }

    fn on_tick(&mut self) {
        for overlay in &mut self.overlays {
            overlay.controller.on_tick();
        }
    }
}

fn main() -> io::Result<()> {
    term_overlay::tracing_sub::init_default();
    let cli = DemoCli::parse();
    // Configuration errors are fatal before the terminal is touched.
    let placement = cli
        .placement
        .parse::<Placement>()
        .map_err(io::Error::other)?;

    let (cols, rows) = terminal::size()?;
    let mut app = App::new(&cli, placement, Rect::new(0, 0, cols, rows));

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = EventLoop::new(Duration::from_millis(16)).run(|event| {
        match event {
            Some(event) => {
                if let ControlFlow::Quit = app.handle_event(&event) {
                    return Ok(ControlFlow::Quit);
                }
            }
            None => {
                app.on_tick();
                terminal.draw(|frame| app.draw(frame))?;
            }
        }
        Ok(ControlFlow::Continue)
    });

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;

    result
}
