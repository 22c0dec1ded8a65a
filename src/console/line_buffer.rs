//! Line buffer for console input

/// Buffer size in bytes, including the slot reserved for the sentinel delimiter
pub const LINE_SIZE: usize = 100;

/// Characters a line can hold
pub const LINE_CAPACITY: usize = LINE_SIZE - 1;

/// Line input buffer
///
/// The cursor is the current length; characters beyond `LINE_CAPACITY`
/// are refused.
pub struct LineBuffer {
    buf: [u8; LINE_SIZE],
    len: usize,
}

impl LineBuffer {
    /// Create empty buffer
    pub const fn new() -> Self {
        Self {
            buf: [0u8; LINE_SIZE],
            len: 0,
        }
    }

    /// Push a character
    ///
    /// Returns `false` (and drops the character) when the line is full.
    pub fn push(&mut self, c: u8) -> bool {
        if self.len < LINE_CAPACITY {
            self.buf[self.len] = c;
            self.len += 1;
            true
        } else {
            false
        }
    }

    /// Remove last character
    pub fn backspace(&mut self) -> bool {
        if self.len > 0 {
            self.len -= 1;
            true
        } else {
            false
        }
    }

    /// Clear buffer
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Set buffer contents from string
    pub fn set(&mut self, s: &str) {
        let bytes = s.as_bytes();
        let copy_len = bytes.len().min(LINE_CAPACITY);
        self.buf[..copy_len].copy_from_slice(&bytes[..copy_len]);
        self.len = copy_len;
    }

    /// Get buffer as string slice
    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    /// Cursor position (buffer length)
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Check if no more characters fit
    pub fn is_full(&self) -> bool {
        self.len >= LINE_CAPACITY
    }

    /// Last character, if any
    pub fn last(&self) -> Option<u8> {
        self.as_bytes().last().copied()
    }

    /// Get raw bytes
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.len]
    }
}

impl Default for LineBuffer {
    fn default() -> Self {
        Self::new()
    }
}
