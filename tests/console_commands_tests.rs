//! Command handler tests

mod common;

use common::TestOutput;
use rust_motion_controller::action::{Action, MotorChannel, PairMotion};
use rust_motion_controller::console::commands::{
    execute, print_help, Arity, Command, Effect, Params, PenAngles, GLOBAL_COMMANDS, TOP_COMMANDS,
};
use rust_motion_controller::console::menu::Menu;
use rust_motion_controller::console::protocol::Protocol;
use rust_motion_controller::console::tokenizer::tokenize;
use rust_motion_controller::console::ConsoleError;

const PEN: PenAngles = PenAngles { up: 100.0, down: 50.0 };

fn run(cmd: Command, line: &str, out: &mut TestOutput) -> Result<Effect, ConsoleError> {
    let tokens = tokenize(line.as_bytes(), b' ');
    let params = Params::new(line.as_bytes(), &tokens);
    execute(cmd, &params, PEN, Protocol::Console, out)
}

fn post(cmd: Command, line: &str) -> Action {
    match run(cmd, line, &mut TestOutput::new()) {
        Ok(Effect::Post(action)) => action,
        other => panic!("{} gave {:?}", line, other),
    }
}

#[test]
fn test_top_table_has_all_commands() {
    let expected = ["fwd", "back", "left", "right", "pu", "pd", "servo", "m3", "m4", "ext", "admin", "m2m"];

    for name in expected {
        assert!(
            TOP_COMMANDS.iter().any(|c| c.name() == name),
            "Command '{}' should be in the TOP table",
            name
        );
    }
}

#[test]
fn test_global_table() {
    let names: Vec<_> = GLOBAL_COMMANDS.iter().map(|c| c.name()).collect();
    assert_eq!(names, ["exit", "help", "?", "history"]);
}

#[test]
fn test_wheel_commands() {
    assert_eq!(
        post(Command::Forward, "fwd 10"),
        Action::Wheels { motion: PairMotion::Forward, amount: 10.0 }
    );
    assert_eq!(
        post(Command::Back, "back 2k"),
        Action::Wheels { motion: PairMotion::Reverse, amount: 2000.0 }
    );
    assert_eq!(
        post(Command::Left, "left 90"),
        Action::Wheels { motion: PairMotion::Left, amount: 90.0 }
    );
    assert_eq!(
        post(Command::Right, "right -45"),
        Action::Wheels { motion: PairMotion::Right, amount: -45.0 }
    );
}

#[test]
fn test_wheel_acknowledgement() {
    let mut out = TestOutput::new();
    run(Command::Forward, "fwd 10", &mut out).unwrap();
    assert_eq!(out.as_str(), "forward 10 steps\r\n");

    let mut out = TestOutput::new();
    run(Command::Right, "right 120", &mut out).unwrap();
    assert_eq!(out.as_str(), "right 120 degrees\r\n");
}

#[test]
fn test_exactly_one_parameter() {
    let mut out = TestOutput::new();
    assert_eq!(run(Command::Forward, "fwd", &mut out), Err(ConsoleError::MissingArg));
    assert_eq!(run(Command::Forward, "fwd 1 2", &mut out), Err(ConsoleError::MissingArg));
    assert_eq!(run(Command::Servo, "servo", &mut out), Err(ConsoleError::MissingArg));

    // Errors are reported by the interpreter, not here
    assert_eq!(out.as_str(), "");
}

#[test]
fn test_pen_presets_ignore_parameters() {
    assert_eq!(post(Command::PenUp, "pu"), Action::Servo { angle: 100.0 });
    assert_eq!(post(Command::PenDown, "pd 1 2 3"), Action::Servo { angle: 50.0 });

    let mut out = TestOutput::new();
    run(Command::PenUp, "pu", &mut out).unwrap();
    assert_eq!(out.as_str(), "pen up 100 degrees\r\n");
}

#[test]
fn test_servo_command() {
    assert_eq!(post(Command::Servo, "servo 90"), Action::Servo { angle: 90.0 });
}

#[test]
fn test_motor_direction_modifier() {
    let m3 = |amount| Action::Motor { channel: MotorChannel::M3, amount };

    assert_eq!(post(Command::M3, "m3 50"), m3(50.0));
    assert_eq!(post(Command::M3, "m3 50 ccw"), m3(-50.0));
    assert_eq!(post(Command::M3, "m3 50 cw"), m3(50.0));
    assert_eq!(post(Command::M3, "m3 -20 ccw"), m3(20.0));

    // Only an exact "ccw" reverses
    assert_eq!(post(Command::M3, "m3 50 CCW"), m3(50.0));
    assert_eq!(
        post(Command::M4, "m4 5 ccwx"),
        Action::Motor { channel: MotorChannel::M4, amount: 5.0 }
    );
}

#[test]
fn test_motor_needs_steps() {
    assert_eq!(run(Command::M4, "m4", &mut TestOutput::new()), Err(ConsoleError::MissingArg));

    let mut out = TestOutput::new();
    run(Command::M4, "m4 50 ccw", &mut out).unwrap();
    assert_eq!(out.as_str(), "rotate m4 -50 steps\r\n");
}

#[test]
fn test_ext_on_off() {
    assert_eq!(post(Command::Ext, "ext on"), Action::ExtPower(true));
    assert_eq!(post(Command::Ext, "ext off"), Action::ExtPower(false));

    let mut out = TestOutput::new();
    assert_eq!(run(Command::Ext, "ext onn", &mut out), Err(ConsoleError::InvalidValue));
    assert_eq!(run(Command::Ext, "ext ON", &mut out), Err(ConsoleError::InvalidValue));
    assert_eq!(run(Command::Ext, "ext on off", &mut out), Err(ConsoleError::MissingArg));
}

#[test]
fn test_menu_commands() {
    let mut out = TestOutput::new();
    assert_eq!(run(Command::Admin, "admin", &mut out), Ok(Effect::Enter(Menu::Admin)));
    assert!(out.contains("Entering admin mode"));

    assert_eq!(run(Command::Machine, "m2m", &mut TestOutput::new()), Ok(Effect::Enter(Menu::Machine)));
}

#[test]
fn test_admin_placeholders() {
    let mut out = TestOutput::new();
    assert_eq!(run(Command::Cmd1, "cmd1 on", &mut out), Ok(Effect::Nothing));
    assert_eq!(run(Command::Cmd2, "cmd2 off", &mut out), Ok(Effect::Nothing));
    assert_eq!(run(Command::Cmd1, "cmd1 maybe", &mut out), Err(ConsoleError::InvalidValue));
}

#[test]
fn test_machine_protocol_is_silent() {
    let line = "fwd 10";
    let tokens = tokenize(line.as_bytes(), b' ');
    let params = Params::new(line.as_bytes(), &tokens);
    let mut out = TestOutput::new();

    let effect = execute(Command::Forward, &params, PEN, Protocol::Machine, &mut out);
    assert!(matches!(effect, Ok(Effect::Post(_))));
    assert_eq!(out.as_str(), "");
}

#[test]
fn test_params() {
    let line = "m3 50 ccw";
    let tokens = tokenize(line.as_bytes(), b' ');
    let params = Params::new(line.as_bytes(), &tokens);

    assert_eq!(params.count(), 2);
    assert_eq!(params.get(0), Some("50"));
    assert_eq!(params.get(1), Some("ccw"));
    assert_eq!(params.get(2), None);
}

#[test]
fn test_arity() {
    assert!(Arity::Ignored.accepts(0));
    assert!(Arity::Ignored.accepts(4));
    assert!(Arity::One.accepts(1));
    assert!(!Arity::One.accepts(2));
    assert!(!Arity::OneOrMore.accepts(0));
    assert!(Arity::OneOrMore.accepts(3));
}

#[test]
fn test_help_listing() {
    let mut out = TestOutput::new();
    print_help(Menu::Top, &mut out);

    assert!(out.as_str().starts_with("Main menu\r\nCommands available:\r\n"));
    assert!(out.contains(" fwd <n> - go forward n steps\r\n"));
    assert!(out.contains(" m2m - M2M mode\r\n"));
    assert!(out.contains(" exit - exit a sub-menu\r\n"));
    assert!(out.contains(" history - type !! to repeat a command\r\n"));

    // Menu commands come before globals
    assert!(out.as_str().find(" m2m").unwrap() < out.as_str().find(" exit").unwrap());
}
