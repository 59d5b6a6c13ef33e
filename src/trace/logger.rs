use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use serde::Serialize;
use tracing::warn;

/// JSONL sink for classification decisions. Write failures are logged, never returned.
pub struct TraceLogger {
    sink: Option<Mutex<File>>,
}

impl TraceLogger {
    /// Open `path` for appending. An unopenable file yields a disabled logger.
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        let sink = OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .inspect_err(|e| {
                warn!(path = %path.display(), error = %e, "could not open trace file");
            })
            .ok()
            .map(Mutex::new);

        Self { sink }
    }

    pub fn disabled() -> Self {
        Self { sink: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.sink.is_some()
    }

    /// Append one event as a single JSON line.
    pub fn log<T: Serialize>(&self, event: &T) {
        let Some(sink) = &self.sink else {
            return;
        };

        if let Err(e) = append_line(sink, event) {
            warn!(error = %e, "dropped trace event");
        }
    }
}

fn append_line<T: Serialize>(sink: &Mutex<File>, event: &T) -> io::Result<()> {
    let mut line = serde_json::to_vec(event)?;
    line.push(b'\n');

    let mut file = sink
        .lock()
        .map_err(|_| io::Error::other("trace file lock poisoned"))?;
    file.write_all(&line)
}
