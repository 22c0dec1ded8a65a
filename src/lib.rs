//! # RustMotionController
//!
//! Pen robot controller: two stepper wheels, two accessory steppers, a pen
//! servo and a switched external power line, driven from a line-oriented
//! serial console.
//!
//! ## Architecture
//!
//! ```text
//! CharSource ─▶ Console ─▶ ActionSlot ─▶ Robot ─▶ motion engine
//!  (20 ms poll)  menus,      one pending   (100 ms poll, runs the
//!                parsing     action        action to completion)
//! ```
//!
//! - `Console` turns bytes into at most one pending `Action` per line
//! - `Robot` drains the action and blocks until the motion is done
//! - Both are plain session values passed by `&mut`; the only global is
//!   the log stream
//!
//! The library is `no_std`; board glue lives in the binary.

#![cfg_attr(not(test), no_std)]

pub mod action;
pub mod config;
pub mod console;
pub mod hal;
pub mod log_drain;
pub mod log_globals;
pub mod logging;
pub mod motion;
pub mod program;
pub mod robot;

pub use action::{Action, ActionSlot, MotorChannel, PairMotion};
pub use config::{ConfigError, RobotConfig, ServoConfig};
pub use console::{Console, ConsoleError, Menu, Protocol, Status};
pub use log_globals::LOG_STREAM;
pub use motion::{Direction, ServoController, StepperMotor, StepperMotorPair};
pub use program::{run_program, PRESET_PROGRAM};
pub use robot::{Robot, RobotPins};
