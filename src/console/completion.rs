//! Tab completion
//!
//! Extends the word under the cursor to the keyword it is a prefix of.
//! Global keywords are tried first, then the active menu's.

use core::fmt::Write;

use super::commands::{command_names, global_names, GLOBAL_COMMANDS};
use super::line_buffer::{LineBuffer, LINE_SIZE};
use super::matcher::{find_keyword, KeywordMatch};
use super::menu::Menu;
use super::tokenizer::tokenize;
use super::DELIMITER;

/// Longest word that will be completed
pub const MAX_WORD_LEN: usize = 20;

/// Complete the last word of `line`
///
/// Appended characters (keyword remainder plus one delimiter) are echoed
/// when `echo` is set. Returns the number of characters appended.
pub fn complete(line: &mut LineBuffer, menu: Menu, out: &mut dyn Write, echo: bool) -> usize {
    match line.last() {
        None | Some(DELIMITER) => return 0,
        Some(_) => {}
    }
    if line.len() > LINE_SIZE - 3 {
        return 0;
    }

    let Some(word) = tokenize(line.as_bytes(), DELIMITER).last() else {
        return 0;
    };
    if word.len >= MAX_WORD_LEN {
        return 0;
    }

    let mut probe = [0u8; MAX_WORD_LEN];
    probe[..word.len].copy_from_slice(&line.as_bytes()[word.range()]);
    let probe = &probe[..word.len];

    let (keyword, offset) = match find_keyword(probe, global_names()) {
        KeywordMatch::Full { .. } => return 0,
        KeywordMatch::Partial { index, offset } => (GLOBAL_COMMANDS[index].name(), offset),
        KeywordMatch::None => {
            let table = menu.commands();
            match find_keyword(probe, command_names(table)) {
                KeywordMatch::Partial { index, offset } => (table[index].name(), offset),
                KeywordMatch::Full { .. } | KeywordMatch::None => return 0,
            }
        }
    };

    let typed = line.len() - (word.start + offset);
    let remainder = keyword.as_bytes().get(typed..).unwrap_or(&[]);

    let mut appended = 0;
    for &c in remainder.iter().chain(core::iter::once(&DELIMITER)) {
        if !line.push(c) {
            break;
        }
        if echo {
            let _ = out.write_char(c as char);
        }
        appended += 1;
    }
    appended
}
