//! Shared test doubles: text sink, pins, PWM, clock and delay.

#![allow(dead_code)]

use std::cell::Cell;
use std::convert::Infallible;
use std::rc::Rc;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::{ErrorType, OutputPin};
use embedded_hal::pwm::{self, SetDutyCycle};

use rust_motion_controller::config::RobotConfig;
use rust_motion_controller::hal::Clock;
use rust_motion_controller::robot::{Robot, RobotPins};

// Test output buffer
pub struct TestOutput {
    buf: [u8; 4096],
    len: usize,
}

impl TestOutput {
    pub fn new() -> Self {
        Self { buf: [0u8; 4096], len: 0 }
    }

    pub fn as_str(&self) -> &str {
        core::str::from_utf8(&self.buf[..self.len]).unwrap_or("")
    }

    pub fn contains(&self, s: &str) -> bool {
        self.as_str().contains(s)
    }

    pub fn clear(&mut self) {
        self.len = 0;
    }
}

impl core::fmt::Write for TestOutput {
    fn write_str(&mut self, s: &str) -> core::fmt::Result {
        let bytes = s.as_bytes();
        let available = self.buf.len() - self.len;
        let to_copy = bytes.len().min(available);
        self.buf[self.len..self.len + to_copy].copy_from_slice(&bytes[..to_copy]);
        self.len += to_copy;
        Ok(())
    }
}

/// Output pin whose level (and rising edges) stay observable through clones
#[derive(Clone, Default)]
pub struct MockPin {
    high: Rc<Cell<bool>>,
    rises: Rc<Cell<u32>>,
}

impl MockPin {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_high(&self) -> bool {
        self.high.get()
    }

    /// Low-to-high transitions seen so far
    pub fn rises(&self) -> u32 {
        self.rises.get()
    }
}

impl ErrorType for MockPin {
    type Error = Infallible;
}

impl OutputPin for MockPin {
    fn set_low(&mut self) -> Result<(), Self::Error> {
        self.high.set(false);
        Ok(())
    }

    fn set_high(&mut self) -> Result<(), Self::Error> {
        if !self.high.get() {
            self.rises.set(self.rises.get() + 1);
        }
        self.high.set(true);
        Ok(())
    }
}

/// Four coil lines plus handles to read them back
pub fn coils() -> ([MockPin; 4], [MockPin; 4]) {
    let pins = [MockPin::new(), MockPin::new(), MockPin::new(), MockPin::new()];
    (pins.clone(), pins)
}

/// Levels of four coil lines
pub fn levels(pins: &[MockPin; 4]) -> [bool; 4] {
    [pins[0].is_high(), pins[1].is_high(), pins[2].is_high(), pins[3].is_high()]
}

/// PWM channel with 1 µs resolution over a 20 ms frame
#[derive(Clone, Default)]
pub struct MockPwm {
    duty: Rc<Cell<u16>>,
}

impl MockPwm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn duty(&self) -> u16 {
        self.duty.get()
    }
}

impl pwm::ErrorType for MockPwm {
    type Error = Infallible;
}

impl SetDutyCycle for MockPwm {
    fn max_duty_cycle(&self) -> u16 {
        20_000
    }

    fn set_duty_cycle(&mut self, duty: u16) -> Result<(), Self::Error> {
        self.duty.set(duty);
        Ok(())
    }
}

/// Clock that moves forward by `step_us` on every read
pub struct FakeClock {
    now: Cell<u64>,
    step_us: u64,
}

impl FakeClock {
    pub fn new(start_us: u64, step_us: u64) -> Self {
        Self {
            now: Cell::new(start_us),
            step_us,
        }
    }

    /// Current time without advancing
    pub fn peek(&self) -> u64 {
        self.now.get()
    }
}

impl Clock for FakeClock {
    fn now_us(&self) -> u64 {
        let now = self.now.get();
        self.now.set(now + self.step_us);
        now
    }
}

/// Delay that only adds up the time it was asked to wait
#[derive(Clone, Default)]
pub struct MockDelay {
    total_ns: Rc<Cell<u64>>,
}

impl MockDelay {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_ms(&self) -> u64 {
        self.total_ns.get() / 1_000_000
    }

    pub fn reset(&self) {
        self.total_ns.set(0);
    }
}

impl DelayNs for MockDelay {
    fn delay_ns(&mut self, ns: u32) {
        self.total_ns.set(self.total_ns.get() + u64::from(ns));
    }
}

pub type TestRobot = Robot<MockPin, MockPwm, FakeClock, MockDelay>;

/// Handles onto the lines of a test robot
pub struct Probes {
    pub left_wheel: [MockPin; 4],
    pub right_wheel: [MockPin; 4],
    pub m3: [MockPin; 4],
    pub m4: [MockPin; 4],
    pub servo_pwm: MockPwm,
    pub servo_power: MockPin,
    pub ext_power: MockPin,
    pub delay: MockDelay,
}

/// Robot on mock hardware; the clock advances 1 ms per read
pub fn test_robot(config: RobotConfig) -> (TestRobot, Probes) {
    let (left_wheel, left_probe) = coils();
    let (right_wheel, right_probe) = coils();
    let (m3, m3_probe) = coils();
    let (m4, m4_probe) = coils();
    let servo_pwm = MockPwm::new();
    let servo_power = MockPin::new();
    let ext_power = MockPin::new();
    let delay = MockDelay::new();

    let probes = Probes {
        left_wheel: left_probe,
        right_wheel: right_probe,
        m3: m3_probe,
        m4: m4_probe,
        servo_pwm: servo_pwm.clone(),
        servo_power: servo_power.clone(),
        ext_power: ext_power.clone(),
        delay: delay.clone(),
    };

    let pins = RobotPins {
        left_wheel,
        right_wheel,
        m3,
        m4,
        servo_pwm,
        servo_power: Some(servo_power),
        ext_power,
    };

    (Robot::new(pins, FakeClock::new(0, 1_000), delay, config), probes)
}
