use std::io::{self, Stdout};
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use clap::Parser;
use crossterm::{
    cursor,
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind},
    execute,
    terminal::{self, EnterAlternateScreen, LeaveAlternateScreen},
};
use indoc::formatdoc;
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::Rect as LayoutRect,
    style::{Color, Style},
    widgets::Paragraph,
};

use term_overlay::geom::Rect;
use term_overlay::panel::OverlayPanel;
use term_overlay::placement::{Offset, Placement, ViewportBounds, compute};

#[derive(Parser, Debug)]
#[command(
    name = "overlay-bench",
    version = env!("CARGO_PKG_VERSION"),
    about = "Stress benchmark for overlay placement and rendering throughput"
)]
struct BenchCli {
    /// How long to run the benchmark.
    #[arg(
        short = 'd',
        long = "duration",
        value_name = "SECONDS",
        default_value_t = 10.0
    )]
    duration_seconds: f64,

    /// Target frames per second; used to pace rendering so runs compare.
    #[arg(short = 'f', long = "fps", value_name = "FPS", default_value_t = 60.0)]
    target_fps: f64,

    /// Overlay panels placed per frame.
    #[arg(short = 'n', long = "panels", value_name = "COUNT", default_value_t = 24)]
    panels: usize,
}

struct BenchConfig {
    duration: Duration,
    frame_budget: Duration,
    panels: usize,
}

impl TryFrom<&BenchCli> for BenchConfig {
    type Error = String;

    fn try_from(cli: &BenchCli) -> Result<Self, Self::Error> {
        if !(0.5..=600.0).contains(&cli.duration_seconds) {
            return Err("duration must be between 0.5 and 600 seconds".to_string());
        }
        if !(1.0..=240.0).contains(&cli.target_fps) {
            return Err("fps must be between 1 and 240".to_string());
        }
        if !(1..=512).contains(&cli.panels) {
            return Err("panels must be between 1 and 512".to_string());
        }
        Ok(Self {
            duration: Duration::from_secs_f64(cli.duration_seconds),
            frame_budget: Duration::from_secs_f64(1.0 / cli.target_fps),
            panels: cli.panels,
        })
    }
}

fn main() -> io::Result<()> {
    let args = BenchCli::parse();
    let config = BenchConfig::try_from(&args)
        .map_err(|msg| io::Error::new(io::ErrorKind::InvalidInput, msg))?;

    terminal::enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture,
        cursor::Hide
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;
    terminal.hide_cursor()?;

    let bench_result = run_benchmark(&mut terminal, &config);

    terminal.show_cursor()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture,
        cursor::Show
    )?;
    terminal::disable_raw_mode()?;

    let stats = bench_result?;
    println!("{}", stats.final_report(&config));

    Ok(())
}

type BenchTerminal = Terminal<CrosstermBackend<Stdout>>;

struct BenchStats {
    started: Instant,
    frame_count: u64,
    placements: u64,
    flips: u64,
    total_draw: Duration,
    aborted: bool,
}

impl BenchStats {
    fn new() -> Self {
        Self {
            started: Instant::now(),
            frame_count: 0,
            placements: 0,
            flips: 0,
            total_draw: Duration::ZERO,
            aborted: false,
        }
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    fn record_frame(&mut self, placements: u64, flips: u64, draw_time: Duration) {
        self.frame_count += 1;
        self.placements += placements;
        self.flips += flips;
        self.total_draw += draw_time;
    }

    fn final_report(&self, config: &BenchConfig) -> String {
        let elapsed = self.elapsed().as_secs_f64().max(f64::EPSILON);
        let avg_draw_ms = if self.frame_count > 0 {
            self.total_draw.as_secs_f64() * 1000.0 / self.frame_count as f64
        } else {
            0.0
        };
        let status = if self.aborted { "aborted" } else { "completed" };
        formatdoc! {"
            == Overlay Bench ({status}) ==
            frames:          {frames}
            panels/frame:    {panels}
            placements:      {placements} ({per_sec:.0}/s)
            flips:           {flips}
            avg fps:         {fps:.1}
            avg draw time:   {avg_draw_ms:.2} ms
        ",
            frames = self.frame_count,
            panels = config.panels,
            placements = self.placements,
            per_sec = self.placements as f64 / elapsed,
            flips = self.flips,
            fps = self.frame_count as f64 / elapsed,
            avg_draw_ms = avg_draw_ms,
        }
    }
}

fn run_benchmark(terminal: &mut BenchTerminal, config: &BenchConfig) -> io::Result<BenchStats> {
    let mut stats = BenchStats::new();
    let mut rng = Lcg::seeded_from_clock();
    let mut tick: u64 = 0;

    loop {
        let frame_start = Instant::now();
        let mut placements = 0;
        let mut flips = 0;
        terminal.draw(|frame| {
            (placements, flips) = draw_frame(frame, tick, &mut rng, config);
        })?;
        let draw_time = frame_start.elapsed();
        stats.record_frame(placements, flips, draw_time);

        if stats.elapsed() >= config.duration {
            break;
        }

        if poll_for_exit(config.frame_budget.saturating_sub(draw_time))? {
            stats.aborted = true;
            break;
        }

        tick = tick.wrapping_add(1);
    }

    Ok(stats)
}

fn draw_frame(frame: &mut Frame, tick: u64, rng: &mut Lcg, config: &BenchConfig) -> (u64, u64) {
    let area = frame.area();
    if area.width == 0 || area.height == 0 {
        return (0, 0);
    }
    let bounds = ViewportBounds::new(Rect::from_layout(area), 1);
    let placements = Placement::all();

    frame.render_widget(
        Paragraph::new("overlay-bench: press q or Esc to abort")
            .style(Style::default().fg(Color::DarkGray)),
        LayoutRect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 1,
        },
    );

    let mut panel = OverlayPanel::new("bench");
    panel.set_body("anchored overlay panel");
    panel.set_size(18, 4);

    let mut computed = 0;
    let mut flipped = 0;
    for i in 0..config.panels {
        let anchor = Rect::new(
            rng.next_range(area.width.max(1) as u32) as i32,
            rng.next_range(area.height.max(1) as u32) as i32,
            3,
            1,
        );
        let placement = placements[(tick as usize + i) % placements.len()];
        let position = compute(
            anchor,
            Rect::new(0, 0, 18, 4),
            placement,
            Offset::new(1, 0),
            bounds,
        );
        if position.placement_used != placement {
            flipped += 1;
        }
        panel.render(frame, area, &position);
        computed += 1;
    }
    (computed, flipped)
}

fn poll_for_exit(budget: Duration) -> io::Result<bool> {
    let deadline = Instant::now() + budget;
    loop {
        let remaining = deadline.saturating_duration_since(Instant::now());
        if !event::poll(remaining)? {
            return Ok(false);
        }
        if let Event::Key(key) = event::read()?
            && key.kind == KeyEventKind::Press
            && matches!(key.code, KeyCode::Char('q') | KeyCode::Esc)
        {
            return Ok(true);
        }
        if Instant::now() >= deadline {
            return Ok(false);
        }
    }
}

/// Small deterministic generator; no need for a real RNG dependency here.
struct Lcg(u64);

impl Lcg {
    fn seeded_from_clock() -> Self {
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0x5eed);
        Self(seed | 1)
    }

    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        self.0
    }

    fn next_range(&mut self, bound: u32) -> u32 {
        (self.next() >> 33) as u32 % bound.max(1)
    }
}
