//! Streaming sink that writes answer chunks as they arrive

use chorus_application::ports::response_sink::ResponseSink;
use std::io::{self, Stdout, Write};
use std::sync::Mutex;

/// Writes each chunk to `W` and flushes; stops on the first write error
/// (e.g. a closed pipe).
pub struct WriterSink<W: Write + Send> {
    writer: Mutex<W>,
}

/// Sink for the terminal
pub type StdoutSink = WriterSink<Stdout>;

impl StdoutSink {
    pub fn stdout() -> Self {
        Self::new(io::stdout())
    }
}

impl<W: Write + Send> WriterSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

impl<W: Write + Send> ResponseSink for WriterSink<W> {
    fn on_chunk(&self, chunk: &str) -> bool {
        let Ok(mut writer) = self.writer.lock() else {
            return false;
        };
        writer
            .write_all(chunk.as_bytes())
            .and_then(|_| writer.flush())
            .is_ok()
    }
}
