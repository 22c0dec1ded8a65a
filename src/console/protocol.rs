//! Wire protocols
//!
//! Console: echoed input, prompts and readable replies.
//! Machine (M2M): no echo, no prompt, two-letter status codes.

use core::fmt::Write;

/// Output protocol selected by the active menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Protocol {
    /// Human on a serial terminal
    Console,
    /// Peer controller
    Machine,
}

impl Protocol {
    #[inline]
    pub fn is_console(self) -> bool {
        self == Protocol::Console
    }
}

/// M2M status code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// PR: accepted, motion starting
    Processing,
    /// OK: completed
    Ok,
    /// BR: bad request (missing/invalid parameter)
    BadRequest,
}

impl Status {
    /// Two-letter code
    pub fn code(self) -> &'static str {
        match self {
            Status::Processing => "PR",
            Status::Ok => "OK",
            Status::BadRequest => "BR",
        }
    }
}

/// Write a status code line (`XX\r\n`)
pub fn write_status(out: &mut dyn Write, status: Status) {
    let _ = write!(out, "{}\r\n", status.code());
}
