//! Hobby servo with switched power
//!
//! Angle 0 maps to the longest pulse, `max_angle` to the shortest. Power
//! (when a power line is wired) is only applied while the servo settles.

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::config::ServoConfig;

/// PWM frame length (50 Hz)
pub const PWM_PERIOD_US: u32 = 20_000;

/// Requests closer than this to the current angle are ignored
pub const DEADBAND_DEG: i32 = 5;

pub struct ServoController<PWM, EN> {
    pwm: PWM,
    power: Option<EN>,
    config: ServoConfig,
    /// Last commanded angle (degrees)
    angle: i32,
}

impl<PWM: SetDutyCycle, EN: OutputPin> ServoController<PWM, EN> {
    pub fn new(pwm: PWM, power: Option<EN>, config: ServoConfig) -> Self {
        Self {
            pwm,
            power,
            angle: config.initial_angle,
            config,
        }
    }

    /// Power-up sequence: drive the initial angle and wait a full travel
    pub fn init(&mut self, delay: &mut impl DelayNs) {
        self.apply_width(self.pulse_width_us(self.angle));
        self.set_power(true);
        delay.delay_ms(self.config.max_settle_ms + self.config.min_settle_ms);
        self.set_power(false);
    }

    /// Move to `target` degrees, blocking until settled
    ///
    /// Returns false when the move fell inside the deadband.
    pub fn set_angle(&mut self, target: i32, delay: &mut impl DelayNs) -> bool {
        let target = target.clamp(0, self.config.max_angle);
        let delta = (target - self.angle).abs();
        if delta < DEADBAND_DEG {
            return false;
        }

        self.apply_width(self.pulse_width_us(target));
        self.set_power(true);
        delay.delay_ms(self.settle_ms(delta));
        self.set_power(false);
        self.angle = target;
        true
    }

    /// Pulse width for `angle` (µs)
    pub fn pulse_width_us(&self, angle: i32) -> u32 {
        let min = i32::from(self.config.min_width_us);
        let max = i32::from(self.config.max_width_us);
        let span = self.config.max_angle.max(1);
        (max - (max - min) * angle / span).max(0) as u32
    }

    /// Settle time for a move of `delta` degrees (ms)
    pub fn settle_ms(&self, delta: i32) -> u32 {
        let min = self.config.min_settle_ms;
        let max = self.config.max_settle_ms;
        let span = self.config.max_angle.max(1) as u32;
        min + max.saturating_sub(min) * delta.unsigned_abs() / span
    }

    #[inline]
    pub fn angle(&self) -> i32 {
        self.angle
    }

    pub fn pwm(&self) -> &PWM {
        &self.pwm
    }

    fn apply_width(&mut self, width_us: u32) {
        let max_duty = u32::from(self.pwm.max_duty_cycle());
        let duty = (width_us * max_duty / PWM_PERIOD_US).min(max_duty);
        let _ = self.pwm.set_duty_cycle(duty as u16);
    }

    fn set_power(&mut self, on: bool) {
        if let Some(pin) = self.power.as_mut() {
            let _ = if on { pin.set_high() } else { pin.set_low() };
        }
    }
}
