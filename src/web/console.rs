//! A `tracing` writer for the browser console.

use std::io::{self, Write};

use tracing::{Level, Metadata, Subscriber};

use tracing_subscriber::fmt::format::{DefaultFields, Format, Full};
use tracing_subscriber::fmt::{self, MakeWriter};
use tracing_subscriber::registry::LookupSpan;

use wasm_bindgen::JsValue;

use web_sys::console;

/// The `fmt` layer type [`layer`] builds.
pub type ConsoleLayer<S> = fmt::Layer<S, DefaultFields, Format<Full, ()>, Console>;

/// A `fmt` layer that writes to the console.
///
/// There is no clock on `wasm32-unknown-unknown`, so events carry no
/// timestamp.
pub fn layer<S>() -> ConsoleLayer<S>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
{
    fmt::layer()
        .with_ansi(false)
        .without_time()
        .with_target(false)
        .with_writer(Console)
}

/// Writes each formatted event with the console method for its level.
pub struct Console;

impl<'a> MakeWriter<'a> for Console {
    type Writer = ConsoleLine;

    fn make_writer(&'a self) -> ConsoleLine {
        ConsoleLine::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> ConsoleLine {
        ConsoleLine::new(*meta.level())
    }
}

/// Buffers one event and logs it on drop.
pub struct ConsoleLine {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleLine {
    fn new(level: Level) -> ConsoleLine {
        ConsoleLine {
            level,
            buf: Vec::new(),
        }
    }
}

impl Write for ConsoleLine {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.buf.extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Drop for ConsoleLine {
    fn drop(&mut self) {
        let line = String::from_utf8_lossy(&self.buf);
        let line = line.trim_end();
        if line.is_empty() {
            return;
        }

        let line = JsValue::from_str(line);
        if self.level == Level::ERROR {
            console::error_1(&line);
        } else if self.level == Level::WARN {
            console::warn_1(&line);
        } else if self.level == Level::INFO {
            console::info_1(&line);
        } else {
            console::debug_1(&line);
        }
    }
}
