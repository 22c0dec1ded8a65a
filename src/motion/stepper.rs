//! Single stepper motor

use embedded_hal::digital::OutputPin;

use super::phase::{step_delay_us, Direction, PhaseDriver};
use crate::hal::Clock;

/// Rate used until `speed()` is called
pub const DEFAULT_MOTOR_RATE: u32 = 50;

/// Stepper motor on one driver channel
///
/// `start()` arms a motion, `poll()` advances at most one phase per call
/// once the inter-step delay has elapsed.
pub struct StepperMotor<P> {
    driver: PhaseDriver<P>,
    /// Minimum time between phases (µs)
    delay_us: u64,
    /// Timestamp of the last phase change (µs)
    last_step_us: u64,
    /// Steps left in the armed motion
    remaining: u32,
    direction: Direction,
    power_save: bool,
}

impl<P: OutputPin> StepperMotor<P> {
    pub fn new(pins: [P; 4], steps_per_rev: u16, power_save: bool) -> Self {
        let driver = PhaseDriver::new(pins, steps_per_rev);
        let delay_us = step_delay_us(driver.steps_per_rev(), DEFAULT_MOTOR_RATE);
        Self {
            driver,
            delay_us,
            last_step_us: 0,
            remaining: 0,
            direction: Direction::Cw,
            power_save,
        }
    }

    /// Set rate (larger is faster). Zero is ignored.
    pub fn speed(&mut self, rate: u32) {
        if rate == 0 {
            return;
        }
        self.delay_us = step_delay_us(self.driver.steps_per_rev(), rate);
    }

    /// Arm a motion of `n` steps
    pub fn start(&mut self, n: u32, dir: Direction) {
        self.direction = dir;
        self.remaining = n;
        if n == 0 {
            self.finish();
        }
    }

    /// Advance one phase if a motion is armed and the delay has elapsed
    ///
    /// Returns true if a phase was advanced.
    pub fn poll(&mut self, now_us: u64) -> bool {
        if self.remaining == 0 || now_us.saturating_sub(self.last_step_us) < self.delay_us {
            return false;
        }
        self.last_step_us = now_us;
        self.driver.advance(self.direction);
        self.remaining -= 1;
        if self.remaining == 0 {
            self.finish();
        }
        true
    }

    /// Blocking form: step `n` times, spinning on `clock`
    pub fn step(&mut self, n: u32, dir: Direction, clock: &impl Clock) {
        self.start(n, dir);
        while self.is_running() {
            self.poll(clock.now_us());
        }
    }

    fn finish(&mut self) {
        if self.power_save {
            self.driver.release();
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

    #[inline]
    pub fn position(&self) -> u16 {
        self.driver.position()
    }

    #[inline]
    pub fn phase(&self) -> usize {
        self.driver.phase()
    }

    #[inline]
    pub fn advances(&self) -> u32 {
        self.driver.advances()
    }

    pub fn driver(&self) -> &PhaseDriver<P> {
        &self.driver
    }
}
