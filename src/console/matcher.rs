//! Keyword matcher
//!
//! Finds the first keyword of an ordered table that occurs anywhere in the
//! input. When none occurs, reports the keyword whose prefix runs into the
//! end of the input, which is what tab completion extends.

/// Result of a keyword search
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeywordMatch {
    /// Keyword `index` occurs in full at byte `offset`
    Full { index: usize, offset: usize },
    /// Keyword `index` starts at `offset` and the input ends before it does
    Partial { index: usize, offset: usize },
    /// Nothing matched
    None,
}

impl KeywordMatch {
    /// Index of a full match
    #[inline]
    pub fn full(&self) -> Option<usize> {
        match *self {
            Self::Full { index, .. } => Some(index),
            _ => None,
        }
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        matches!(self, Self::Full { .. })
    }
}

/// Search `input` for the keywords in table order
///
/// Start positions are scanned left to right, and at each position the
/// keywords are tried in order, so the earliest occurrence wins and table
/// order breaks ties at the same position.
///
/// A partial candidate must have consumed at least two characters and must
/// have stopped exactly at the end of `input`. The longest candidate wins;
/// on equal length the first one found is kept.
pub fn find_keyword<'a, I>(input: &[u8], keywords: I) -> KeywordMatch
where
    I: Iterator<Item = &'a str> + Clone,
{
    let mut best: Option<(usize, usize)> = None;
    // One matched character is too ambiguous to count as a partial
    let mut best_len = 1;

    for offset in 0..input.len() {
        let rest = &input[offset..];

        for (index, keyword) in keywords.clone().enumerate() {
            let kw = keyword.as_bytes();
            let matched = kw.iter().zip(rest).take_while(|(a, b)| a == b).count();

            if matched == kw.len() {
                return KeywordMatch::Full { index, offset };
            }

            if matched > best_len && offset + matched == input.len() {
                best_len = matched;
                best = Some((index, offset));
            }
        }
    }

    match best {
        Some((index, offset)) => KeywordMatch::Partial { index, offset },
        None => KeywordMatch::None,
    }
}
