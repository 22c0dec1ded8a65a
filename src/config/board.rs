//! Controller board wiring.
//!
//! Four stepper driver channels, each a ULN2003-style 4-line driver.
//! Channels 1 and 2 drive the wheels (1 = left), 3 and 4 the accessory shafts.

use super::ConfigError;

/// Wheel pair channels (left, right).
pub const WHEEL_CHANNELS: (u8, u8) = (1, 2);
/// Accessory motor M3 channel.
pub const M3_CHANNEL: u8 = 3;
/// Accessory motor M4 channel.
pub const M4_CHANNEL: u8 = 4;

/// Servo PWM output.
pub const SERVO_CONTROL_PIN: u8 = 21;
/// Servo power enable; `None` keeps the servo powered.
pub const SERVO_POWER_PIN: Option<u8> = Some(20);
/// External power switch.
pub const EXT_POWER_PIN: u8 = 38;
/// Stepper driver enable.
pub const DRIVER_ENABLE_PIN: u8 = 39;
/// Operator button (active low).
pub const BUTTON_PIN: u8 = 0;
/// Status LED.
pub const LED_PIN: u8 = 48;

/// Console / M2M link baud rate.
pub const BAUD: u32 = 115_200;

/// Coil lines (pin1..pin4) of a motor channel.
pub fn motor_pins(channel: u8) -> Result<[u8; 4], ConfigError> {
    match channel {
        1 => Ok([7, 6, 2, 3]),
        2 => Ok([11, 10, 8, 9]),
        3 => Ok([15, 14, 12, 13]),
        4 => Ok([16, 17, 19, 18]),
        other => Err(ConfigError::InvalidChannel(other)),
    }
}
