//! Last-command slot for `!!` replay
//!
//! Static allocation, one line.

use super::line_buffer::LINE_CAPACITY;

/// Most recently submitted line
pub struct History {
    entry: [u8; LINE_CAPACITY],
    len: usize,
}

impl History {
    /// Create empty history
    pub const fn new() -> Self {
        Self {
            entry: [0u8; LINE_CAPACITY],
            len: 0,
        }
    }

    /// Remember a submitted line, replacing the previous one
    pub fn push(&mut self, line: &str) {
        let bytes = line.as_bytes();
        let len = bytes.len().min(LINE_CAPACITY);

        self.entry[..len].copy_from_slice(&bytes[..len]);
        self.len = len;
    }

    /// Last submitted line, if any
    pub fn last(&self) -> Option<&str> {
        if self.len == 0 {
            return None;
        }
        core::str::from_utf8(&self.entry[..self.len]).ok()
    }

    /// Forget the stored line
    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}
