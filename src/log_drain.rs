//! Log output.
//!
//! Drains a [`LogStream`] into a text sink: stdout in the simulator, the
//! console serial port on the board. Called from the main loop between
//! polls, where blocking on the port is allowed.

use core::fmt::Write;

use crate::logging::{LogEntry, LogStream};

/// Minimum time between dropped-entry reports (µs).
pub const DROPPED_REPORT_PERIOD_US: u64 = 10_000_000;

/// Write one entry as `[timestamp_us] LEVEL: message\r\n`.
pub fn format_log_entry(entry: &LogEntry, out: &mut dyn Write) {
    let _ = write!(
        out,
        "[{:10}] {}: {}\r\n",
        entry.timestamp_us,
        entry.level.as_str(),
        entry.text()
    );
}

/// Log consumer state.
pub struct LogDrain {
    last_report_us: u64,
}

impl LogDrain {
    pub const fn new() -> Self {
        Self { last_report_us: 0 }
    }

    /// Write every pending entry, then report drops if the period elapsed.
    ///
    /// Returns the number of entries written.
    pub fn run<const N: usize>(&mut self, stream: &LogStream<N>, out: &mut dyn Write, now_us: u64) -> usize {
        let mut written = 0;
        while let Some(entry) = stream.drain() {
            format_log_entry(&entry, out);
            written += 1;
        }

        if now_us.saturating_sub(self.last_report_us) >= DROPPED_REPORT_PERIOD_US {
            let dropped = stream.dropped();
            if dropped > 0 {
                let _ = write!(out, "[{:10}] WARN: dropped {} log entries\r\n", now_us, dropped);
                stream.reset_dropped();
            }
            self.last_report_us = now_us;
        }

        written
    }
}

impl Default for LogDrain {
    fn default() -> Self {
        Self::new()
    }
}
