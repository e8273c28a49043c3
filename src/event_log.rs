//! JSONL event log
//!
//! One JSON object per line, appended to `BLOCK_GRID_LOG_PATH`. The log is
//! best effort: if the file cannot be opened or a write fails, logging
//! switches off and play continues.

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum Event {
    Batch {
        seed: u32,
        round: u32,
        batch_id: u32,
        attempts: u32,
        outcome: &'static str,
        shapes: Vec<u32>,
        themes: Vec<u32>,
    },
    Place {
        seed: u32,
        round: u32,
        placement: u32,
        slot: usize,
        shape: u32,
        x: i32,
        y: i32,
        lines_cleared: usize,
    },
    Lost {
        seed: u32,
        round: u32,
        placements: u32,
        lines_cleared: u32,
    },
    Replay {
        seed: u32,
        round: u32,
    },
}

pub struct EventLog {
    writer: Option<BufWriter<File>>,
    buf: Vec<u8>,
}

impl EventLog {
    /// Append to `path`; None or an open failure yields a disabled log
    pub fn open(path: Option<&str>) -> Self {
        let writer = path.and_then(|path| {
            match OpenOptions::new().create(true).append(true).open(path) {
                Ok(file) => Some(BufWriter::new(file)),
                Err(e) => {
                    log::warn!(
                        target: "event_log",
                        "cannot open {}: {}; event log disabled",
                        path,
                        e
                    );
                    None
                }
            }
        });
        Self {
            writer,
            buf: Vec::with_capacity(256),
        }
    }

    pub fn disabled() -> Self {
        Self::open(None)
    }

    pub fn is_enabled(&self) -> bool {
        self.writer.is_some()
    }

    pub fn record(&mut self, event: &Event) {
        let Some(writer) = self.writer.as_mut() else {
            return;
        };

        self.buf.clear();
        if serde_json::to_writer(&mut self.buf, event).is_err() {
            return;
        }
        self.buf.push(b'\n');

        if let Err(e) = writer.write_all(&self.buf) {
            log::warn!(target: "event_log", "write failed: {}; event log disabled", e);
            self.writer = None;
        }
    }

    pub fn flush(&mut self) {
        if let Some(writer) = self.writer.as_mut() {
            if writer.flush().is_err() {
                self.writer = None;
            }
        }
    }
}

impl Drop for EventLog {
    fn drop(&mut self) {
        self.flush();
    }
}
