//! Line tokenizer
//!
//! Splits a line into spans on a single delimiter byte.
//! The end of the line counts as a trailing delimiter.

/// Maximum number of token spans kept per line
pub const MAX_TOKENS: usize = 5;

/// Token span into the line it was cut from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Token {
    pub start: usize,
    pub len: usize,
}

impl Token {
    /// Byte range of the token
    #[inline]
    pub fn range(&self) -> core::ops::Range<usize> {
        self.start..self.start + self.len
    }

    /// Token text within `line`
    pub fn text<'a>(&self, line: &'a [u8]) -> &'a str {
        line.get(self.range())
            .and_then(|b| core::str::from_utf8(b).ok())
            .unwrap_or("")
    }
}

/// Token spans of one line
///
/// `count()` is the number of tokens in the line; only the first
/// `MAX_TOKENS` spans are kept.
#[derive(Debug, Clone, Copy)]
pub struct Tokens {
    spans: [Token; MAX_TOKENS],
    last: Token,
    count: usize,
}

impl Tokens {
    pub const fn empty() -> Self {
        Self {
            spans: [Token { start: 0, len: 0 }; MAX_TOKENS],
            last: Token { start: 0, len: 0 },
            count: 0,
        }
    }

    /// Number of tokens found
    #[inline]
    pub fn count(&self) -> usize {
        self.count
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Get token by index
    pub fn get(&self, idx: usize) -> Option<Token> {
        if idx < self.count.min(MAX_TOKENS) {
            Some(self.spans[idx])
        } else {
            None
        }
    }

    /// Last token of the line, even past `MAX_TOKENS`
    pub fn last(&self) -> Option<Token> {
        if self.count > 0 {
            Some(self.last)
        } else {
            None
        }
    }

    /// Stored spans
    pub fn iter(&self) -> impl Iterator<Item = Token> + '_ {
        self.spans[..self.count.min(MAX_TOKENS)].iter().copied()
    }
}

/// Split `line` on `delim`
pub fn tokenize(line: &[u8], delim: u8) -> Tokens {
    let mut tokens = Tokens::empty();
    let mut i = skip_delims(line, delim, 0);

    while i < line.len() {
        let start = i;
        while i < line.len() && line[i] != delim {
            i += 1;
        }
        let token = Token { start, len: i - start };
        if tokens.count < MAX_TOKENS {
            tokens.spans[tokens.count] = token;
        }
        tokens.last = token;
        tokens.count += 1;
        i = skip_delims(line, delim, i);
    }

    tokens
}

fn skip_delims(line: &[u8], delim: u8, mut i: usize) -> usize {
    while i < line.len() && line[i] == delim {
        i += 1;
    }
    i
}
