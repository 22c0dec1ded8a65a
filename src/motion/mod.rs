//! Motion engine
//!
//! Unipolar stepper drivers (single and wheel pair) and the pen servo.
//! Steppers are tick-driven: `poll(now_us)` advances at most one phase,
//! the blocking `step()` wrappers spin on a `Clock` until done.

pub mod pair;
pub mod phase;
pub mod servo;
pub mod stepper;

pub use pair::{StepperMotorPair, DEFAULT_PAIR_RATE};
pub use phase::{step_delay_us, Direction, PhaseDriver, PHASE_PATTERNS};
pub use servo::{ServoController, DEADBAND_DEG, PWM_PERIOD_US};
pub use stepper::{StepperMotor, DEFAULT_MOTOR_RATE};
