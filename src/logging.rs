//! Stderr logger for the runner
//!
//! Prints `[target] LEVEL message`, one line per record, in the same
//! bracketed-prefix shape the runner uses for its own status lines.

use std::io::Write;

use anyhow::{anyhow, Result};
use log::{LevelFilter, Log, Metadata, Record};

pub struct StderrLogger {
    level: LevelFilter,
}

impl StderrLogger {
    pub fn new(level: LevelFilter) -> Self {
        Self { level }
    }
}

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let line = format_record(record);
        let _ = writeln!(std::io::stderr().lock(), "{}", line);
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

pub fn format_record(record: &Record) -> String {
    format!("[{}] {} {}", record.target(), record.level(), record.args())
}

/// Install the logger process-wide; fails if one is already installed
pub fn init(level: LevelFilter) -> Result<()> {
    log::set_boxed_logger(Box::new(StderrLogger::new(level)))
        .map_err(|e| anyhow!("logger already installed: {}", e))?;
    log::set_max_level(level);
    Ok(())
}
