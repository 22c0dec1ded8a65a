//! Four-line phase sequencing

use embedded_hal::digital::{OutputPin, PinState};

/// Line levels (pin1..pin4) for each phase
pub const PHASE_PATTERNS: [[bool; 4]; 4] = [
    [true, false, true, false],
    [false, true, true, false],
    [false, true, false, true],
    [true, false, false, true],
];

/// Rotation direction (phase order)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Position increments
    Cw,
    /// Position decrements
    Ccw,
}

/// Microseconds between phases for `rate` (larger is faster)
///
/// `rate` must be non-zero.
#[inline]
pub fn step_delay_us(steps_per_rev: u16, rate: u32) -> u64 {
    60_000_000 / u64::from(steps_per_rev.max(1)) / u64::from(rate)
}

/// Drives the four coil lines of one motor and tracks its position
pub struct PhaseDriver<P> {
    pins: [P; 4],
    /// Position within one revolution
    position: u16,
    steps_per_rev: u16,
    /// Phases advanced since creation
    advances: u32,
}

impl<P: OutputPin> PhaseDriver<P> {
    /// Take ownership of the lines, all driven low
    pub fn new(pins: [P; 4], steps_per_rev: u16) -> Self {
        let mut driver = Self {
            pins,
            position: 0,
            steps_per_rev: steps_per_rev.max(1),
            advances: 0,
        };
        driver.release();
        driver
    }

    /// Move one position in `dir` and energize the matching phase
    pub fn advance(&mut self, dir: Direction) {
        match dir {
            Direction::Cw => {
                self.position += 1;
                if self.position == self.steps_per_rev {
                    self.position = 0;
                }
            }
            Direction::Ccw => {
                if self.position == 0 {
                    self.position = self.steps_per_rev;
                }
                self.position -= 1;
            }
        }
        self.advances = self.advances.wrapping_add(1);
        self.energize(self.phase());
    }

    /// Drive the lines to `PHASE_PATTERNS[phase]`
    pub fn energize(&mut self, phase: usize) {
        let pattern = PHASE_PATTERNS[phase % 4];
        for (pin, level) in self.pins.iter_mut().zip(pattern) {
            let _ = pin.set_state(PinState::from(level));
        }
    }

    /// De-energize all four lines
    pub fn release(&mut self) {
        for pin in self.pins.iter_mut() {
            let _ = pin.set_low();
        }
    }

    #[inline]
    pub fn position(&self) -> u16 {
        self.position
    }

    /// Phase index of the current position
    #[inline]
    pub fn phase(&self) -> usize {
        usize::from(self.position % 4)
    }

    #[inline]
    pub fn advances(&self) -> u32 {
        self.advances
    }

    #[inline]
    pub fn steps_per_rev(&self) -> u16 {
        self.steps_per_rev
    }
}
