//! Serial command interpreter
//!
//! Polled from the input loop - no dedicated task.
//! Zero heap allocation - all fixed-size buffers.

pub mod commands;
pub mod completion;
pub mod console;
pub mod error;
pub mod history;
pub mod line_buffer;
pub mod matcher;
pub mod menu;
pub mod number;
pub mod protocol;
pub mod tokenizer;

/// Token delimiter
pub const DELIMITER: u8 = b' ';

pub use commands::{command_names, execute, Command, GlobalCommand, GLOBAL_COMMANDS};
pub use completion::complete;
pub use console::{Console, VERSION};
pub use error::ConsoleError;
pub use history::History;
pub use line_buffer::LineBuffer;
pub use matcher::{find_keyword, KeywordMatch};
pub use menu::{Menu, MenuState};
pub use number::parse_number;
pub use protocol::{write_status, Protocol, Status};
pub use tokenizer::{tokenize, Token, Tokens};
