//! Wheel pair: two steppers moved in lock-step
//!
//! The units are staggered: each due poll advances one unit, alternating
//! left then right, so a step of the pair is two phase changes. After an
//! odd number of phase changes the left unit is one ahead.

use embedded_hal::digital::OutputPin;

use super::phase::{step_delay_us, Direction, PhaseDriver};
use crate::action::PairMotion;
use crate::hal::Clock;

/// Rate used until `speed()` is called
pub const DEFAULT_PAIR_RATE: u32 = 100;

/// Per-unit phase order for a combined motion. Unit 0 is the left wheel.
pub fn unit_directions(motion: PairMotion) -> [Direction; 2] {
    match motion {
        PairMotion::Forward => [Direction::Ccw, Direction::Cw],
        PairMotion::Reverse => [Direction::Cw, Direction::Ccw],
        PairMotion::Left => [Direction::Cw, Direction::Cw],
        PairMotion::Right => [Direction::Ccw, Direction::Ccw],
    }
}

pub struct StepperMotorPair<P> {
    units: [PhaseDriver<P>; 2],
    directions: [Direction; 2],
    /// Unit advanced on the next due poll
    current: usize,
    delay_us: u64,
    /// Shared throttle timestamp (µs)
    last_step_us: u64,
    remaining: u32,
    power_save: bool,
}

impl<P: OutputPin> StepperMotorPair<P> {
    pub fn new(left: [P; 4], right: [P; 4], steps_per_rev: u16, power_save: bool) -> Self {
        let units = [
            PhaseDriver::new(left, steps_per_rev),
            PhaseDriver::new(right, steps_per_rev),
        ];
        let delay_us = step_delay_us(units[0].steps_per_rev(), DEFAULT_PAIR_RATE);
        Self {
            units,
            directions: unit_directions(PairMotion::Forward),
            current: 0,
            delay_us,
            last_step_us: 0,
            remaining: 0,
            power_save,
        }
    }

    /// Set rate (larger is faster). Zero is ignored.
    ///
    /// The delay is halved since the two units are staggered.
    pub fn speed(&mut self, rate: u32) {
        if rate == 0 {
            return;
        }
        self.delay_us = step_delay_us(self.units[0].steps_per_rev(), rate) / 2;
    }

    /// Arm a motion of `n` pair steps
    pub fn start(&mut self, n: u32, motion: PairMotion) {
        self.directions = unit_directions(motion);
        self.current = 0;
        self.remaining = n;
        if n == 0 {
            self.finish();
        }
    }

    /// Advance the current unit if the delay has elapsed
    ///
    /// Returns true if a phase was advanced.
    pub fn poll(&mut self, now_us: u64) -> bool {
        if self.remaining == 0 || now_us.saturating_sub(self.last_step_us) < self.delay_us {
            return false;
        }
        self.last_step_us = now_us;

        let unit = self.current;
        self.units[unit].advance(self.directions[unit]);
        if unit == 1 {
            self.remaining -= 1;
        }
        self.current = unit ^ 1;

        if self.remaining == 0 {
            self.current = 0;
            self.finish();
        }
        true
    }

    /// Blocking form: `n` pair steps, spinning on `clock`
    pub fn step(&mut self, n: u32, motion: PairMotion, clock: &impl Clock) {
        self.start(n, motion);
        while self.is_running() {
            self.poll(clock.now_us());
        }
    }

    fn finish(&mut self) {
        if self.power_save {
            for unit in self.units.iter_mut() {
                unit.release();
            }
        }
    }

    #[inline]
    pub fn is_running(&self) -> bool {
        self.remaining > 0
    }

    #[inline]
    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    #[inline]
    pub fn delay_us(&self) -> u64 {
        self.delay_us
    }

    /// Driver of unit 0 (left) or 1 (right)
    pub fn unit(&self, idx: usize) -> &PhaseDriver<P> {
        &self.units[idx & 1]
    }
}
