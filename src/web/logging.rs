//! Console logging
//!
//! `tracing` events are formatted by `tracing-subscriber` and handed to
//! the browser console method matching their level, so errors and
//! warnings keep their console styling and filters.

use std::io;

use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

use crate::config::DEFAULT_LOG_FILTER;

/// Produces one [`ConsoleWriter`] per event
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleMakeWriter;

/// Buffers a formatted event and flushes it to the console on drop
pub struct ConsoleWriter {
    level: Level,
    buffer: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
            level,
            buffer: Vec::new(),
        }
    }
}

impl io::Write for ConsoleWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buffer.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleWriter {
    fn drop(&mut self) {
        let text = String::from_utf8_lossy(&self.buffer);
        let line = text.trim_end();
        if line.is_empty() {
            return;
        }

        if self.level == Level::ERROR {
            web_sys::console::error_1(&line.into());
        } else if self.level == Level::WARN {
            web_sys::console::warn_1(&line.into());
        } else if self.level == Level::INFO {
            web_sys::console::info_1(&line.into());
        } else {
            web_sys::console::debug_1(&line.into());
        }
    }
}

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Install the console subscriber
///
/// An unparsable `filter` falls back to the default directive. A second
/// call keeps the first subscriber.
pub fn init(filter: &str) {
    let env_filter = match EnvFilter::try_new(filter) {
        Ok(env_filter) => env_filter,
        Err(e) => {
            web_sys::console::warn_1(
                &format!("Invalid log filter {:?}: {}", filter, e).into(),
            );
            EnvFilter::new(DEFAULT_LOG_FILTER)
        }
    };

    let installed = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(ConsoleMakeWriter)
        .without_time()
        .with_target(false)
        .try_init();

    if installed.is_err() {
        tracing::debug!("Console logging already initialised");
    }
}
