//! Global log stream.
//!
//! Motion, console and executor share one ring; the drain in the main
//! loop is its only consumer.

use crate::logging::LogStream;

/// Log stream for everything running in the control loop.
pub static LOG_STREAM: LogStream = LogStream::new();
