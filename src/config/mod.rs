//! Module: config
//!
//! Purpose: Calibration and tuning values for the robot.
//!
//! Architecture:
//! - `RobotConfig`: wheel/motor geometry, default speeds, pen angles, poll periods
//! - `ServoConfig`: pulse-width and settle-time envelope of the pen servo
//! - `board`: fixed channel-to-pin wiring of the controller board
//!
//! All values are plain data, copied into the motion engine at start-up.

pub mod board;

/// Configuration error, raised while wiring the board at start-up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// Motor channel outside 1..=4.
    InvalidChannel(u8),
}

impl ConfigError {
    /// Get error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidChannel(_) => "C01",
        }
    }

    /// Get error message
    pub fn message(&self) -> &'static str {
        match self {
            Self::InvalidChannel(_) => "invalid motor channel",
        }
    }
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::InvalidChannel(ch) => write!(f, "{}: {} {}", self.code(), self.message(), ch),
        }
    }
}

/// Servo angle for `pu` (degrees).
pub const PEN_UP_ANGLE: f64 = 100.0;
/// Servo angle for `pd` (degrees).
pub const PEN_DOWN_ANGLE: f64 = 50.0;

/// Hobby servo envelope.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ServoConfig {
    /// Pulse width at `max_angle` (µs).
    pub min_width_us: u16,
    /// Pulse width at angle 0 (µs).
    pub max_width_us: u16,
    /// Full travel in degrees.
    pub max_angle: i32,
    /// Time for the servo to start responding (ms).
    pub min_settle_ms: u32,
    /// Time for a full-travel move to complete (ms).
    pub max_settle_ms: u32,
    /// Angle assumed (and driven) at power-up.
    pub initial_angle: i32,
}

impl Default for ServoConfig {
    fn default() -> Self {
        Self {
            min_width_us: 1000,
            max_width_us: 2000,
            max_angle: 180,
            min_settle_ms: 300,
            max_settle_ms: 1000,
            initial_angle: 0,
        }
    }
}

/// Robot calibration.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RobotConfig {
    /// Motor steps for one revolution of a wheel.
    pub wheel_steps_per_rev: u16,
    /// Motor steps to spin the robot by one degree.
    ///
    /// Baseline: (wheel_separation / wheel_diameter) * (wheel_steps_per_rev / 360),
    /// e.g. 86 mm / 28 mm * 1000 / 360 = 8.532, then tweak on the floor.
    pub wheel_steps_per_degree: f32,
    /// Motor steps for one revolution of an accessory shaft (M3/M4).
    pub motor_steps_per_rev: u16,
    /// Default wheel rate (larger is faster).
    pub wheel_speed: u32,
    /// Default accessory motor rate (larger is faster).
    pub motor_speed: u32,
    /// De-energize coils after each motion.
    pub power_save: bool,
    /// Servo angle for `pu`.
    pub pen_up_angle: f64,
    /// Servo angle for `pd`.
    pub pen_down_angle: f64,
    /// Character poll period (ms).
    pub input_poll_ms: u32,
    /// Pending-action poll period (ms).
    pub action_poll_ms: u32,
    /// Servo envelope.
    pub servo: ServoConfig,
}

impl Default for RobotConfig {
    fn default() -> Self {
        Self {
            wheel_steps_per_rev: 1000,
            wheel_steps_per_degree: 8.532,
            motor_steps_per_rev: 1000,
            wheel_speed: 100,
            motor_speed: 50,
            power_save: true,
            pen_up_angle: PEN_UP_ANGLE,
            pen_down_angle: PEN_DOWN_ANGLE,
            input_poll_ms: 20,
            action_poll_ms: 100,
            servo: ServoConfig::default(),
        }
    }
}

impl RobotConfig {
    /// Create config with a different turn calibration.
    pub fn with_steps_per_degree(wheel_steps_per_degree: f32) -> Self {
        Self {
            wheel_steps_per_degree,
            ..Default::default()
        }
    }
}
