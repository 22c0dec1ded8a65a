//! Configuration and board table tests

use rust_motion_controller::config::board::{self, motor_pins};
use rust_motion_controller::config::{ConfigError, RobotConfig, ServoConfig, PEN_DOWN_ANGLE, PEN_UP_ANGLE};

#[test]
fn test_robot_defaults() {
    let config = RobotConfig::default();

    assert_eq!(config.wheel_steps_per_rev, 1000);
    assert_eq!(config.wheel_steps_per_degree, 8.532);
    assert_eq!(config.wheel_speed, 100);
    assert_eq!(config.motor_speed, 50);
    assert!(config.power_save);
    assert_eq!(config.pen_up_angle, PEN_UP_ANGLE);
    assert_eq!(config.pen_down_angle, PEN_DOWN_ANGLE);
    assert_eq!(config.input_poll_ms, 20);
    assert_eq!(config.action_poll_ms, 100);
}

#[test]
fn test_servo_defaults() {
    let servo = ServoConfig::default();

    assert_eq!((servo.min_width_us, servo.max_width_us), (1000, 2000));
    assert_eq!((servo.min_settle_ms, servo.max_settle_ms), (300, 1000));
    assert_eq!(servo.max_angle, 180);
    assert_eq!(servo.initial_angle, 0);
}

#[test]
fn test_with_steps_per_degree() {
    let config = RobotConfig::with_steps_per_degree(9.0);
    assert_eq!(config.wheel_steps_per_degree, 9.0);
    assert_eq!(config.wheel_steps_per_rev, 1000);
}

#[test]
fn test_motor_channels() {
    assert_eq!(motor_pins(1), Ok([7, 6, 2, 3]));
    assert_eq!(motor_pins(4), Ok([16, 17, 19, 18]));
    assert!(motor_pins(board::M3_CHANNEL).is_ok());
    assert!(motor_pins(board::WHEEL_CHANNELS.1).is_ok());
}

#[test]
fn test_invalid_channel_error() {
    let err = motor_pins(7).unwrap_err();
    assert_eq!(err, ConfigError::InvalidChannel(7));
    assert_eq!(err.code(), "C01");
    assert_eq!(format!("{}", err), "C01: invalid motor channel 7");
}
