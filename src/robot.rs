//! Action executor
//!
//! Owns the motion engine and runs one pending action to completion per
//! coarse poll. Progress is reported in the protocol of the console's
//! active menu: `PR`/`OK` for machine clients, a description and the
//! prompt for people.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;
use micromath::F32Ext;

use crate::action::{Action, MotorChannel, PairMotion};
use crate::config::RobotConfig;
use crate::console::{write_status, Console, Protocol, Status};
use crate::hal::Clock;
use crate::motion::{
    Direction, ServoController, StepperMotor, StepperMotorPair, DEFAULT_MOTOR_RATE, DEFAULT_PAIR_RATE,
};
use crate::{rt_info, rt_warn, LOG_STREAM};

/// Output lines of the board, already configured as outputs
pub struct RobotPins<P, PWM> {
    /// Left wheel driver (channel 1)
    pub left_wheel: [P; 4],
    /// Right wheel driver (channel 2)
    pub right_wheel: [P; 4],
    pub m3: [P; 4],
    pub m4: [P; 4],
    pub servo_pwm: PWM,
    pub servo_power: Option<P>,
    pub ext_power: P,
}

/// Motion engine plus the resources it blocks on
pub struct Robot<P, PWM, C, D> {
    wheels: StepperMotorPair<P>,
    m3: StepperMotor<P>,
    m4: StepperMotor<P>,
    servo: ServoController<PWM, P>,
    ext_power: P,
    clock: C,
    delay: D,
    config: RobotConfig,
}

impl<P, PWM, C, D> Robot<P, PWM, C, D>
where
    P: OutputPin,
    PWM: SetDutyCycle,
    C: Clock,
    D: DelayNs,
{
    /// Build the motion engine. The servo is not moved until `init()`.
    pub fn new(pins: RobotPins<P, PWM>, clock: C, delay: D, config: RobotConfig) -> Self {
        let mut wheels = StepperMotorPair::new(
            pins.left_wheel,
            pins.right_wheel,
            config.wheel_steps_per_rev,
            config.power_save,
        );
        // speed() halves the delay, so leave the default rate untouched
        if config.wheel_speed != DEFAULT_PAIR_RATE {
            wheels.speed(config.wheel_speed);
        }

        let mut m3 = StepperMotor::new(pins.m3, config.motor_steps_per_rev, config.power_save);
        let mut m4 = StepperMotor::new(pins.m4, config.motor_steps_per_rev, config.power_save);
        if config.motor_speed != DEFAULT_MOTOR_RATE {
            m3.speed(config.motor_speed);
            m4.speed(config.motor_speed);
        }

        let mut ext_power = pins.ext_power;
        let _ = ext_power.set_low();

        Self {
            wheels,
            m3,
            m4,
            servo: ServoController::new(pins.servo_pwm, pins.servo_power, config.servo),
            ext_power,
            clock,
            delay,
            config,
        }
    }

    /// Servo power-up sequence (blocks for a full travel)
    pub fn init(&mut self) {
        self.servo.init(&mut self.delay);
    }

    /// Coarse poll: run the console's pending action, if any
    ///
    /// Returns true if an action was run.
    pub fn handle_requests(&mut self, console: &mut Console, out: &mut dyn Write) -> bool {
        let overwritten = console.actions().overwritten();
        if overwritten > 0 {
            rt_warn!(LOG_STREAM, self.clock.now_us(), "{} unread actions overwritten", overwritten);
            console.actions_mut().reset_overwritten();
        }

        let Some(action) = console.take_action() else {
            return false;
        };

        let protocol = console.protocol();
        match protocol {
            Protocol::Machine => write_status(out, Status::Processing),
            Protocol::Console => describe(&action, out),
        }

        self.execute(action);

        match protocol {
            Protocol::Machine => write_status(out, Status::Ok),
            Protocol::Console => console.print_prompt(out),
        }
        true
    }

    /// Run one action to completion
    pub fn execute(&mut self, action: Action) {
        match action {
            Action::Wheels { motion, amount } => self.rotate_wheels(motion, amount),
            Action::Servo { angle } => {
                let angle = angle as i32;
                let moved = self.servo.set_angle(angle, &mut self.delay);
                rt_info!(LOG_STREAM, self.clock.now_us(), "servo {} deg moved={}", angle, moved);
            }
            Action::Motor { channel, amount } => self.rotate_motor(channel, amount),
            Action::ExtPower(on) => {
                let _ = if on { self.ext_power.set_high() } else { self.ext_power.set_low() };
                rt_info!(LOG_STREAM, self.clock.now_us(), "ext power {}", on);
            }
        }
    }

    fn rotate_wheels(&mut self, motion: PairMotion, amount: f64) {
        let (motion, steps) = if motion.is_turn() {
            let steps = turn_steps(self.config.wheel_steps_per_degree, amount);
            if steps < 0 {
                (motion.mirrored(), steps.unsigned_abs())
            } else {
                (motion, steps as u32)
            }
        } else {
            (motion, (amount as i64).clamp(0, i64::from(u32::MAX)) as u32)
        };

        rt_info!(LOG_STREAM, self.clock.now_us(), "wheels {:?} {} steps", motion, steps);
        self.wheels.step(steps, motion, &self.clock);
    }

    fn rotate_motor(&mut self, channel: MotorChannel, amount: f64) {
        let steps = amount as i32;
        // Accessory motors are mounted mirrored: positive runs Ccw.
        let dir = if steps < 0 { Direction::Cw } else { Direction::Ccw };
        let n = steps.unsigned_abs();

        rt_info!(LOG_STREAM, self.clock.now_us(), "m{} {:?} {} steps", channel.number(), dir, n);
        let motor = match channel {
            MotorChannel::M3 => &mut self.m3,
            MotorChannel::M4 => &mut self.m4,
        };
        motor.step(n, dir, &self.clock);
    }

    pub fn wheels(&self) -> &StepperMotorPair<P> {
        &self.wheels
    }

    pub fn motor(&self, channel: MotorChannel) -> &StepperMotor<P> {
        match channel {
            MotorChannel::M3 => &self.m3,
            MotorChannel::M4 => &self.m4,
        }
    }

    pub fn servo(&self) -> &ServoController<PWM, P> {
        &self.servo
    }

    pub fn ext_power(&self) -> &P {
        &self.ext_power
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn config(&self) -> &RobotConfig {
        &self.config
    }
}

/// Wheel steps for a turn of `degrees`, rounded to nearest
pub fn turn_steps(steps_per_degree: f32, degrees: f64) -> i32 {
    F32Ext::round(steps_per_degree * degrees as f32) as i32
}

/// Console-protocol description printed before an action runs
fn describe(action: &Action, out: &mut dyn Write) {
    let _ = match *action {
        Action::Wheels { motion, amount } => match motion {
            PairMotion::Forward => write!(out, "Move fwd {}\r\n", amount as i32),
            PairMotion::Reverse => write!(out, "Move back {}\r\n", amount as i32),
            PairMotion::Left => write!(out, "Turn left {} deg\r\n", amount as i32),
            PairMotion::Right => write!(out, "Turn right {} deg\r\n", amount as i32),
        },
        Action::Servo { angle } => write!(out, "Move servo to {} deg\r\n", angle as i32),
        Action::Motor { channel, amount } => {
            write!(out, "Rotate m{} {} steps\r\n", channel.number(), amount as i32)
        }
        Action::ExtPower(on) => write!(out, "Setting ext power {}\r\n", if on { "on" } else { "off" }),
    };
}
