//! Preset program, started with the operator button.

use core::fmt::Write;

use embedded_hal::delay::DelayNs;
use embedded_hal::digital::OutputPin;
use embedded_hal::pwm::SetDutyCycle;

use crate::console::{write_status, Console, Protocol, Status};
use crate::hal::Clock;
use crate::robot::Robot;

/// Draws a triangle
pub const PRESET_PROGRAM: &[&str] = &[
    "fwd 2k",
    "right 120",
    "fwd 2k",
    "right 120",
    "fwd 2k",
    "right 120",
];

/// Run `lines` as if typed, executing each resulting action before the next
///
/// Returns the number of lines the console rejected.
pub fn run_program<P, PWM, C, D>(
    lines: &[&str],
    console: &mut Console,
    robot: &mut Robot<P, PWM, C, D>,
    out: &mut dyn Write,
) -> usize
where
    P: OutputPin,
    PWM: SetDutyCycle,
    C: Clock,
    D: DelayNs,
{
    match console.protocol() {
        Protocol::Machine => write_status(out, Status::Processing),
        Protocol::Console => {
            let _ = write!(out, "running preset program\r\n");
        }
    }

    let mut rejected = 0;
    for line in lines {
        if console.protocol().is_console() {
            let _ = write!(out, "cmd: {}\r\n", line);
        }
        if console.submit_line(line, out).is_err() {
            rejected += 1;
        }
        robot.handle_requests(console, out);
    }

    match console.protocol() {
        Protocol::Machine => write_status(out, Status::Ok),
        Protocol::Console => console.print_prompt(out),
    }
    rejected
}
