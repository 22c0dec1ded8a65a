//! Preset program tests

mod common;

use common::{test_robot, TestOutput};
use rust_motion_controller::config::RobotConfig;
use rust_motion_controller::console::{Console, Menu};
use rust_motion_controller::program::{run_program, PRESET_PROGRAM};

#[test]
fn test_preset_is_triangle() {
    assert_eq!(PRESET_PROGRAM.len(), 6);
    for pair in PRESET_PROGRAM.chunks(2) {
        assert_eq!(pair, ["fwd 2k", "right 120"]);
    }
}

#[test]
fn test_run_program_console() {
    let (mut robot, _) = test_robot(RobotConfig::default());
    let mut console = Console::new();
    let mut out = TestOutput::new();

    assert_eq!(run_program(PRESET_PROGRAM, &mut console, &mut robot, &mut out), 0);

    let text = out.as_str();
    assert!(text.starts_with("running preset program\r\ncmd: fwd 2k\r\n"));
    assert!(text.contains("Move fwd 2000\r\n"));
    assert!(text.contains("cmd: right 120\r\n"));
    assert!(text.contains("Turn right 120 deg\r\n"));
    assert!(text.ends_with("$ "));

    // 3 * 2000 straight + 3 * round(8.532 * 120) turning
    assert_eq!(robot.wheels().unit(0).advances(), 3 * 2000 + 3 * 1024);
    assert_eq!(robot.wheels().unit(1).advances(), 3 * 2000 + 3 * 1024);
}

#[test]
fn test_run_program_machine() {
    let (mut robot, _) = test_robot(RobotConfig::default());
    let mut console = Console::new();
    console.set_menu(Menu::Machine);
    let mut out = TestOutput::new();

    run_program(&["fwd 5", "pd"], &mut console, &mut robot, &mut out);
    assert_eq!(out.as_str(), "PR\r\nPR\r\nOK\r\nPR\r\nOK\r\nOK\r\n");
}

#[test]
fn test_rejected_lines_are_counted() {
    let (mut robot, _) = test_robot(RobotConfig::default());
    let mut console = Console::new();
    let mut out = TestOutput::new();

    assert_eq!(run_program(&["bogus", "fwd", "fwd 1"], &mut console, &mut robot, &mut out), 2);
    assert_eq!(robot.wheels().unit(0).advances(), 1);
}
