use std::fs::File;
use std::io::{self, Write};
use std::sync::Arc;

use tracing::Level;

/// Writer that appends to a shared log file handle.
pub struct LogWriter(Arc<File>);

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        (&*self.0).write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        (&*self.0).flush()
    }
}

#[derive(Clone, Debug)]
pub struct LogMakeWriter(Arc<File>);

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for LogMakeWriter {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter(self.0.clone())
    }
}

/// Initialize the tracing subscriber for the demo binary.
///
/// A raw-mode TUI owns the screen, so stderr logging would corrupt it;
/// instead, logs go to the file named by `TERM_OVERLAY_LOG` when that
/// variable is set, and logging stays disabled otherwise. Safe to call more
/// than once; subsequent calls are no-ops for the global subscriber.
pub fn init_default() {
    let Some(path) = std::env::var_os("TERM_OVERLAY_LOG") else {
        return;
    };
    let Ok(file) = File::create(&path) else {
        return;
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_writer(LogMakeWriter(Arc::new(file)))
        .with_target(false)
        .with_thread_names(false)
        .with_ansi(false)
        .try_init();
}
