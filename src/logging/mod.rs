use std::io;
use tracing::{Level, Metadata};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber. Safe to call more than once; later
/// calls are ignored.
pub(crate) fn init(directive: &str) {
    let filter = EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new("info"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .without_time()
        .with_ansi(false)
        .with_target(true)
        .with_writer(ConsoleMakeWriter)
        .try_init();
}

/// Routes formatted events to the browser console at a matching severity.
pub(crate) struct ConsoleMakeWriter;

impl<'a> MakeWriter<'a> for ConsoleMakeWriter {
    type Writer = ConsoleWriter;

    fn make_writer(&'a self) -> Self::Writer {
        ConsoleWriter::new(Level::INFO)
    }

    fn make_writer_for(&'a self, meta: &Metadata<'_>) -> Self::Writer {
        ConsoleWriter::new(*meta.level())
    }
}

/// Buffers one formatted event and emits it on drop.
pub(crate) struct ConsoleWriter {
    level: Level,
    buf: Vec<u8>,
}

impl ConsoleWriter {
    fn new(level: Level) -> Self {
        Self {
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
        emit(self.level, line);
    }
}

#[cfg(target_arch = "wasm32")]
fn emit(level: Level, line: &str) {
    let v = wasm_bindgen::JsValue::from_str(line);
    match level {
        Level::ERROR => web_sys::console::error_1(&v),
        Level::WARN => web_sys::console::warn_1(&v),
        Level::INFO => web_sys::console::info_1(&v),
        _ => web_sys::console::debug_1(&v),
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn emit(_level: Level, line: &str) {
    eprintln!("{line}");
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn writer_buffers_until_drop() {
        let mut w = ConsoleMakeWriter.make_writer();
        assert_eq!(w.write(b"notes autosave ").ok(), Some(15));
        assert_eq!(w.write(b"failed\n").ok(), Some(7));
        assert_eq!(w.buf, b"notes autosave failed\n");
        assert!(w.flush().is_ok());
    }

    #[test]
    fn init_tolerates_bad_directive_and_repeat_calls() {
        init("not a [valid directive");
        init("info");
        tracing::info!("logging initialized twice");
    }
}
