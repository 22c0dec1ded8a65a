//! Hardware Abstraction Layer for RustMotionController.
//!
//! Thin seams between the core and the board.
//! Business logic stays in core modules, HAL is just I/O.
//!
//! Pins, PWM and blocking delays use the `embedded-hal` 1.0 traits
//! directly. The two seams below have no `embedded-hal` equivalent.

/// Monotonic microsecond time source.
pub trait Clock {
    /// Microseconds since boot. Must never go backwards.
    fn now_us(&self) -> u64;
}

/// Non-blocking character source polled by the console.
pub trait CharSource {
    /// Returns the next received byte, or `None` if nothing is pending.
    fn read_byte(&mut self) -> Option<u8>;
}

impl<T: Clock + ?Sized> Clock for &T {
    #[inline]
    fn now_us(&self) -> u64 {
        (**self).now_us()
    }
}

impl<T: CharSource + ?Sized> CharSource for &mut T {
    #[inline]
    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }
}

/// Character source backed by a byte slice (preset lines, replayed input).
pub struct SliceSource<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> SliceSource<'a> {
    pub const fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    /// Bytes not yet read.
    pub fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }
}

impl CharSource for SliceSource<'_> {
    fn read_byte(&mut self) -> Option<u8> {
        let b = self.bytes.get(self.pos).copied()?;
        self.pos += 1;
        Some(b)
    }
}
