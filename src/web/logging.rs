//! Route `tracing` events to the browser console.
//!
//! The fmt subscriber formats each event into a [`ConsoleWriter`], which hands
//! the finished line to `console.error` / `warn` / `info` / `debug` by level.
//! Timestamps are off: `SystemTime` is unavailable on wasm32.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use web_sys::console;

/// Most verbose level forwarded to the console.
const MAX_LEVEL: Level = Level::INFO;

/// Install the console subscriber. Later calls (one per table) are no-ops.
pub(crate) fn init() {
    let installed = tracing_subscriber::fmt()
        .with_max_level(MAX_LEVEL)
        .with_ansi(false)
        .without_time()
        .with_writer(ConsoleMakeWriter)
        .try_init();
    if installed.is_ok() {
        tracing::debug!("console logging installed");
    }
}

struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and logs it when dropped.
struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        ConsoleWriter {
            level,
            buf: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }
        match self.level {
            Level::ERROR => console::error_1(&line.into()),
            Level::WARN => console::warn_1(&line.into()),
            Level::INFO => console::info_1(&line.into()),
            _ => console::debug_1(&line.into()),
        }
    }
}
