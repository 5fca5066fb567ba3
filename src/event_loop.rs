use std::io;
use std::time::Duration;

use crossterm::event::{self, Event};

pub enum ControlFlow {
    Continue,
    Quit,
}

/// Centralized poll/dispatch pump for the demo binary.
///
/// The only place that calls `crossterm::event::poll`/`read`. The handler is
/// invoked with `Some(event)` for each input event and with `None` when the
/// poll interval elapses idle (the hook overlay controllers use to retry a
/// deferred first placement and callers use to draw).
pub struct EventLoop {
    poll_interval: Duration,
}

impl EventLoop {
    pub fn new(poll_interval: Duration) -> Self {
        Self { poll_interval }
    }

    pub fn run<F>(&mut self, mut handler: F) -> io::Result<()>
    where
        F: FnMut(Option<Event>) -> io::Result<ControlFlow>,
    {
        loop {
            if let ControlFlow::Quit = handler(None)? {
                break;
            }

            if event::poll(self.poll_interval)? {
                // Drain queued events before rendering again, so bursts
                // (mouse drags, scroll wheels) do not lag behind the input
                // stream at one event per frame.
                loop {
                    let ev = event::read()?;
                    if let ControlFlow::Quit = handler(Some(ev))? {
                        return Ok(());
                    }
                    if !event::poll(Duration::from_millis(0))? {
                        break;
                    }
                }
            }
        }
        Ok(())
    }
}
