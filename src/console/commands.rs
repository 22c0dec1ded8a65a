//! Command tables and handlers

use core::fmt::Write;

use super::menu::Menu;
use super::number::parse_number;
use super::protocol::Protocol;
use super::tokenizer::Tokens;
use super::ConsoleError;
use crate::action::{Action, MotorChannel, PairMotion};

/// Parameter count a command accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arity {
    /// Parameters are ignored
    Ignored,
    /// Exactly one
    One,
    /// One, plus optional modifiers
    OneOrMore,
}

impl Arity {
    pub fn accepts(self, count: usize) -> bool {
        match self {
            Arity::Ignored => true,
            Arity::One => count == 1,
            Arity::OneOrMore => count >= 1,
        }
    }
}

/// Menu command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Forward,
    Back,
    Left,
    Right,
    PenUp,
    PenDown,
    Servo,
    M3,
    M4,
    Ext,
    Admin,
    Machine,
    Cmd1,
    Cmd2,
}

impl Command {
    /// Keyword
    pub fn name(self) -> &'static str {
        match self {
            Command::Forward => "fwd",
            Command::Back => "back",
            Command::Left => "left",
            Command::Right => "right",
            Command::PenUp => "pu",
            Command::PenDown => "pd",
            Command::Servo => "servo",
            Command::M3 => "m3",
            Command::M4 => "m4",
            Command::Ext => "ext",
            Command::Admin => "admin",
            Command::Machine => "m2m",
            Command::Cmd1 => "cmd1",
            Command::Cmd2 => "cmd2",
        }
    }

    /// Usage text, printed after the keyword
    pub fn help(self) -> &'static str {
        match self {
            Command::Forward => "<n> - go forward n steps",
            Command::Back => "<n> - go back n steps",
            Command::Left => "<n> - turn left n degrees",
            Command::Right => "<n> - turn right n degrees",
            Command::PenUp => "- lift pen up",
            Command::PenDown => "- set pen down",
            Command::Servo => "<n> - move servo to n degrees",
            Command::M3 => "<n> <dir> - rotate m3 n steps cw/ccw",
            Command::M4 => "<n> <dir> - rotate m4 n steps cw/ccw",
            Command::Ext => "<on/off> - external power",
            Command::Admin => "- admin menu",
            Command::Machine => "- M2M mode",
            Command::Cmd1 => "<on/off> - placeholder command 1",
            Command::Cmd2 => "<on/off> - placeholder command 2",
        }
    }

    pub fn arity(self) -> Arity {
        match self {
            Command::Forward
            | Command::Back
            | Command::Left
            | Command::Right
            | Command::Servo
            | Command::Ext
            | Command::Cmd1
            | Command::Cmd2 => Arity::One,
            Command::M3 | Command::M4 => Arity::OneOrMore,
            Command::PenUp | Command::PenDown | Command::Admin | Command::Machine => Arity::Ignored,
        }
    }
}

/// Commands available in every menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalCommand {
    Exit,
    Help,
    Query,
    History,
}

impl GlobalCommand {
    pub fn name(self) -> &'static str {
        match self {
            GlobalCommand::Exit => "exit",
            GlobalCommand::Help => "help",
            GlobalCommand::Query => "?",
            GlobalCommand::History => "history",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            GlobalCommand::Exit => "- exit a sub-menu",
            GlobalCommand::Help => "- get help",
            GlobalCommand::Query => "- see commands available",
            GlobalCommand::History => "- type !! to repeat a command",
        }
    }
}

/// Global keywords, in match order
pub static GLOBAL_COMMANDS: &[GlobalCommand] = &[
    GlobalCommand::Exit,
    GlobalCommand::Help,
    GlobalCommand::Query,
    GlobalCommand::History,
];

/// TOP menu keywords, in match order
pub static TOP_COMMANDS: &[Command] = &[
    Command::Forward,
    Command::Back,
    Command::Left,
    Command::Right,
    Command::PenUp,
    Command::PenDown,
    Command::Servo,
    Command::M3,
    Command::M4,
    Command::Ext,
    Command::Admin,
    Command::Machine,
];

/// ADMIN menu keywords
pub static ADMIN_COMMANDS: &[Command] = &[Command::Cmd1, Command::Cmd2];

/// MACHINE menu keywords: the motion grammar of TOP
pub static MACHINE_COMMANDS: &[Command] = &[
    Command::Forward,
    Command::Back,
    Command::Left,
    Command::Right,
    Command::PenUp,
    Command::PenDown,
    Command::Servo,
    Command::M3,
    Command::M4,
    Command::Ext,
];

/// Keyword names of a table, for matching and completion
pub fn command_names(table: &'static [Command]) -> impl Iterator<Item = &'static str> + Clone {
    table.iter().map(|c| c.name())
}

/// Global keyword names
pub fn global_names() -> impl Iterator<Item = &'static str> + Clone {
    GLOBAL_COMMANDS.iter().map(|c| c.name())
}

/// Command parameters: the tokens after the keyword
pub struct Params<'a> {
    line: &'a [u8],
    tokens: &'a Tokens,
}

impl<'a> Params<'a> {
    pub fn new(line: &'a [u8], tokens: &'a Tokens) -> Self {
        Self { line, tokens }
    }

    /// Number of parameters
    pub fn count(&self) -> usize {
        self.tokens.count().saturating_sub(1)
    }

    /// Get parameter by index (0-based)
    pub fn get(&self, idx: usize) -> Option<&'a str> {
        self.tokens.get(idx + 1).map(|t| t.text(self.line))
    }
}

/// What a successful command asks of the session
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Effect {
    /// Post a motion/IO action
    Post(Action),
    /// Switch menu
    Enter(Menu),
    /// Accepted, nothing to do
    Nothing,
}

/// Preset servo angles for `pu` / `pd`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PenAngles {
    pub up: f64,
    pub down: f64,
}

/// Execute a menu command
///
/// Console protocol gets a one-line acknowledgement; errors are reported
/// by the caller.
pub fn execute(
    cmd: Command,
    params: &Params<'_>,
    pen: PenAngles,
    protocol: Protocol,
    out: &mut dyn Write,
) -> Result<Effect, ConsoleError> {
    if !cmd.arity().accepts(params.count()) {
        return Err(ConsoleError::MissingArg);
    }

    let effect = match cmd {
        Command::Forward => wheels(PairMotion::Forward, params),
        Command::Back => wheels(PairMotion::Reverse, params),
        Command::Left => wheels(PairMotion::Left, params),
        Command::Right => wheels(PairMotion::Right, params),
        Command::PenUp => Effect::Post(Action::Servo { angle: pen.up }),
        Command::PenDown => Effect::Post(Action::Servo { angle: pen.down }),
        Command::Servo => Effect::Post(Action::Servo {
            angle: parse_number(params.get(0).unwrap_or("")),
        }),
        Command::M3 => motor(MotorChannel::M3, params),
        Command::M4 => motor(MotorChannel::M4, params),
        Command::Ext => Effect::Post(Action::ExtPower(on_off(params.get(0))?)),
        Command::Admin => Effect::Enter(Menu::Admin),
        Command::Machine => Effect::Enter(Menu::Machine),
        Command::Cmd1 | Command::Cmd2 => {
            on_off(params.get(0))?;
            Effect::Nothing
        }
    };

    if protocol.is_console() {
        acknowledge(cmd, &effect, out);
    }

    Ok(effect)
}

fn wheels(motion: PairMotion, params: &Params<'_>) -> Effect {
    Effect::Post(Action::Wheels {
        motion,
        amount: parse_number(params.get(0).unwrap_or("")),
    })
}

fn motor(channel: MotorChannel, params: &Params<'_>) -> Effect {
    let mut amount = parse_number(params.get(0).unwrap_or(""));
    // Only an exact "ccw" reverses; "cw" or anything else keeps the sign.
    if params.get(1) == Some("ccw") {
        amount = -amount;
    }
    Effect::Post(Action::Motor { channel, amount })
}

fn on_off(value: Option<&str>) -> Result<bool, ConsoleError> {
    match value {
        Some("on") => Ok(true),
        Some("off") => Ok(false),
        _ => Err(ConsoleError::InvalidValue),
    }
}

fn acknowledge(cmd: Command, effect: &Effect, out: &mut dyn Write) {
    let _ = match (cmd, effect) {
        (_, Effect::Post(Action::Wheels { motion, amount })) => match motion {
            PairMotion::Forward => write!(out, "forward {} steps\r\n", amount),
            PairMotion::Reverse => write!(out, "back {} steps\r\n", amount),
            PairMotion::Left => write!(out, "left {} degrees\r\n", amount),
            PairMotion::Right => write!(out, "right {} degrees\r\n", amount),
        },
        (Command::PenUp, Effect::Post(Action::Servo { angle })) => {
            write!(out, "pen up {} degrees\r\n", angle)
        }
        (Command::PenDown, Effect::Post(Action::Servo { angle })) => {
            write!(out, "pen down {} degrees\r\n", angle)
        }
        (_, Effect::Post(Action::Servo { angle })) => write!(out, "servo {} degrees\r\n", angle),
        (_, Effect::Post(Action::Motor { channel, amount })) => {
            write!(out, "rotate m{} {} steps\r\n", channel.number(), amount)
        }
        (_, Effect::Post(Action::ExtPower(on))) => {
            write!(out, "external power {}\r\n", if *on { "on" } else { "off" })
        }
        (_, Effect::Enter(Menu::Admin)) => write!(out, "Entering admin mode, type exit to quit\r\n"),
        (_, Effect::Enter(Menu::Machine)) => write!(out, "Entering M2M mode, type exit to quit\r\n"),
        _ => Ok(()),
    };
}

/// Print the command listing of `menu`, then the global commands
pub fn print_help(menu: Menu, out: &mut dyn Write) {
    let _ = write!(out, "{}\r\nCommands available:\r\n", menu.title());
    for c in menu.commands() {
        let _ = write!(out, " {} {}\r\n", c.name(), c.help());
    }
    for g in GLOBAL_COMMANDS {
        let _ = write!(out, " {} {}\r\n", g.name(), g.help());
    }
}
