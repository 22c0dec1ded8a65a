//! Main console struct integrating all components

use core::fmt::Write;

use super::commands::{self, global_names, Effect, GlobalCommand, Params, PenAngles, GLOBAL_COMMANDS};
use super::completion::complete;
use super::line_buffer::LINE_SIZE;
use super::matcher::find_keyword;
use super::menu::{Menu, MenuState};
use super::protocol::{write_status, Protocol, Status};
use super::tokenizer::tokenize;
use super::{command_names, ConsoleError, History, LineBuffer, DELIMITER};
use crate::action::{Action, ActionSlot};
use crate::config::{PEN_DOWN_ANGLE, PEN_UP_ANGLE};
use crate::hal::CharSource;

/// Version string (set by build.rs, includes git hash)
pub const VERSION: &str = env!("VERSION_STRING");

/// Command interpreter session
///
/// Owns the line buffer, the `!!` slot, the active menu and the pending
/// action record. Fed one byte at a time; a completed line produces at
/// most one pending action.
pub struct Console {
    line: LineBuffer,
    history: History,
    menu: MenuState,
    actions: ActionSlot,
    pen: PenAngles,
    /// Swallow the LF of a CRLF pair
    after_cr: bool,
}

impl Console {
    /// Create new console at the top menu
    pub const fn new() -> Self {
        Self {
            line: LineBuffer::new(),
            history: History::new(),
            menu: MenuState::new(),
            actions: ActionSlot::new(),
            pen: PenAngles {
                up: PEN_UP_ANGLE,
                down: PEN_DOWN_ANGLE,
            },
            after_cr: false,
        }
    }

    /// Override the `pu` / `pd` angles
    pub fn with_pen_angles(mut self, up: f64, down: f64) -> Self {
        self.pen = PenAngles { up, down };
        self
    }

    /// Active menu
    #[inline]
    pub fn menu(&self) -> Menu {
        self.menu.current()
    }

    /// Protocol of the active menu
    #[inline]
    pub fn protocol(&self) -> Protocol {
        self.menu.current().protocol()
    }

    /// Force a menu (boot-time transport selection)
    pub fn set_menu(&mut self, menu: Menu) {
        self.menu.set(menu);
    }

    /// Line being typed
    pub fn line(&self) -> &LineBuffer {
        &self.line
    }

    /// Last submitted line
    pub fn history(&self) -> Option<&str> {
        self.history.last()
    }

    /// Pending action record
    pub fn actions(&self) -> &ActionSlot {
        &self.actions
    }

    pub fn actions_mut(&mut self) -> &mut ActionSlot {
        &mut self.actions
    }

    /// Drain the pending action
    pub fn take_action(&mut self) -> Option<Action> {
        self.actions.take()
    }

    /// Fine-grained poll: consume at most one byte from `source`
    pub fn poll(
        &mut self,
        source: &mut dyn CharSource,
        out: &mut dyn Write,
    ) -> Option<Result<(), ConsoleError>> {
        let byte = source.read_byte()?;
        self.process_byte(byte, out)
    }

    /// Process a single input byte
    ///
    /// Returns Some(result) if a line was executed, None if more input needed.
    pub fn process_byte(&mut self, byte: u8, out: &mut dyn Write) -> Option<Result<(), ConsoleError>> {
        let after_cr = core::mem::replace(&mut self.after_cr, byte == b'\r');
        let echo = self.protocol().is_console();

        match byte {
            b'\n' if after_cr => None,

            // Enter
            b'\r' | b'\n' => {
                if self.line.is_empty() {
                    if echo {
                        let _ = write!(out, "\r\n");
                        self.print_prompt(out);
                    }
                    return None;
                }
                self.history.push(self.line.as_str());
                Some(self.execute(out))
            }

            // Backspace
            0x7F | 0x08 => {
                if self.line.backspace() && echo {
                    // Echo: backspace, space, backspace
                    let _ = write!(out, "\x08 \x08");
                }
                None
            }

            // Tab
            b'\t' => {
                complete(&mut self.line, self.menu.current(), out, echo);
                None
            }

            // Printable character
            0x20..=0x7E => {
                if !self.line.push(byte) {
                    return None;
                }
                if echo {
                    let _ = out.write_char(byte as char);
                }
                if self.line.as_bytes().starts_with(b"!!") {
                    return Some(self.replay(out));
                }
                None
            }

            _ => None,
        }
    }

    /// Non-interactive path: run a whole line as if typed and submitted
    pub fn submit_line(&mut self, line: &str, out: &mut dyn Write) -> Result<(), ConsoleError> {
        self.line.set(line);
        self.history.push(self.line.as_str());
        self.execute(out)
    }

    /// `!!`: swap in the last submitted line and run it
    fn replay(&mut self, out: &mut dyn Write) -> Result<(), ConsoleError> {
        match self.history.last() {
            Some(last) => self.line.set(last),
            None => self.line.clear(),
        }
        if self.protocol().is_console() {
            let _ = write!(out, "\x08\x08{}", self.line.as_str());
        }
        self.execute(out)
    }

    /// Execute the buffered line, then clear it and re-prompt
    fn execute(&mut self, out: &mut dyn Write) -> Result<(), ConsoleError> {
        let mut buf = [0u8; LINE_SIZE];
        let len = self.line.len();
        buf[..len].copy_from_slice(self.line.as_bytes());
        self.line.clear();
        let line = &buf[..len];

        if self.protocol().is_console() {
            let _ = write!(out, "\r\n");
        }

        let result = self.dispatch(line, out);
        self.print_prompt(out);
        result
    }

    fn dispatch(&mut self, line: &[u8], out: &mut dyn Write) -> Result<(), ConsoleError> {
        if let Some(idx) = find_keyword(line, global_names()).full() {
            self.run_global(GLOBAL_COMMANDS[idx], out);
            return Ok(());
        }

        let table = self.menu.commands();
        let idx = find_keyword(line, command_names(table))
            .full()
            .ok_or(ConsoleError::UnknownCommand)?;
        let cmd = table[idx];

        let tokens = tokenize(line, DELIMITER);
        let params = Params::new(line, &tokens);
        let protocol = self.protocol();

        match commands::execute(cmd, &params, self.pen, protocol, out) {
            Ok(Effect::Post(action)) => {
                self.actions.post(action);
                Ok(())
            }
            Ok(Effect::Enter(menu)) => {
                self.menu.enter(menu);
                Ok(())
            }
            Ok(Effect::Nothing) => Ok(()),
            Err(e) => {
                match protocol {
                    Protocol::Console => {
                        let _ = write!(
                            out,
                            "Error, required parameter {} {}\r\n",
                            cmd.name(),
                            cmd.help()
                        );
                    }
                    Protocol::Machine => write_status(out, Status::BadRequest),
                }
                Err(e)
            }
        }
    }

    fn run_global(&mut self, cmd: GlobalCommand, out: &mut dyn Write) {
        match cmd {
            GlobalCommand::Exit => {
                if !self.menu.exit() {
                    let _ = write!(out, "At Main menu\r\n");
                }
            }
            GlobalCommand::Help | GlobalCommand::Query => {
                if self.protocol().is_console() {
                    commands::print_help(self.menu.current(), out);
                }
            }
            // Reserved
            GlobalCommand::History => {}
        }
    }

    /// Print the prompt
    pub fn print_prompt(&self, out: &mut dyn Write) {
        let _ = write!(out, "{}", self.menu.current().prompt());
    }

    /// Print welcome banner
    pub fn print_banner(&self, out: &mut dyn Write) {
        let _ = write!(out, "\r\n{}\r\n", VERSION);
        let _ = write!(out, "Type 'help' for commands.\r\n");
        self.print_prompt(out);
    }
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}
