//! Menu state machine
//!
//! ```text
//!        admin            m2m
//! ADMIN <------- TOP -------> MACHINE
//!   |            ^ ^            |
//!   +---exit-----+ +----exit----+
//! ```

use super::commands::{Command, ADMIN_COMMANDS, MACHINE_COMMANDS, TOP_COMMANDS};
use super::protocol::Protocol;

/// Menu level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Menu {
    Top,
    Admin,
    Machine,
}

impl Menu {
    /// Line prompt
    pub fn prompt(self) -> &'static str {
        match self {
            Menu::Top => "$ ",
            Menu::Admin => "admin$ ",
            Menu::Machine => "",
        }
    }

    /// Heading of the help listing
    pub fn title(self) -> &'static str {
        match self {
            Menu::Top => "Main menu",
            Menu::Admin => "Admin mode",
            Menu::Machine => "M2M mode",
        }
    }

    /// Keyword table bound to this menu
    pub fn commands(self) -> &'static [Command] {
        match self {
            Menu::Top => TOP_COMMANDS,
            Menu::Admin => ADMIN_COMMANDS,
            Menu::Machine => MACHINE_COMMANDS,
        }
    }

    pub fn protocol(self) -> Protocol {
        match self {
            Menu::Machine => Protocol::Machine,
            Menu::Top | Menu::Admin => Protocol::Console,
        }
    }
}

/// Active menu
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MenuState {
    current: Menu,
}

impl MenuState {
    /// Start at the top menu
    pub const fn new() -> Self {
        Self { current: Menu::Top }
    }

    #[inline]
    pub fn current(&self) -> Menu {
        self.current
    }

    #[inline]
    pub fn commands(&self) -> &'static [Command] {
        self.current.commands()
    }

    /// Switch menus unconditionally (boot-time mode selection)
    pub fn set(&mut self, menu: Menu) {
        self.current = menu;
    }

    /// Follow a keyword edge; only TOP has outgoing keyword edges
    pub fn enter(&mut self, menu: Menu) -> bool {
        if self.current == Menu::Top && menu != Menu::Top {
            self.current = menu;
            true
        } else {
            false
        }
    }

    /// `exit`: back to TOP. Returns `false` if already there.
    pub fn exit(&mut self) -> bool {
        if self.current == Menu::Top {
            false
        } else {
            self.current = Menu::Top;
            true
        }
    }
}

impl Default for MenuState {
    fn default() -> Self {
        Self::new()
    }
}
