//! Module: alphabet
//! Responsibility: validated, ordered character sets used for identifier suffixes.
//!
//! Invariants:
//! - An alphabet holds at least two characters.
//! - No character appears twice; duplicates would bias the sampling distribution.
//! - Declaration order is preserved so configuration round-trips verbatim.

#[cfg(test)]
mod tests;

use derive_more::{Deref, Display};
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// Constants
///

/// Default alphabet: digits and ASCII letters without the visually ambiguous
/// `0`, `1`, `I`, `O` and `l`.
pub const DEFAULT_ALPHABET: &str = "23456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Smallest alphabet that can produce more than one distinct candidate.
pub const MIN_ALPHABET_LEN: usize = 2;

///
/// AlphabetError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum AlphabetError {
    #[error("alphabet is empty")]
    Empty,

    #[error("alphabet has {len} character(s) (min {MIN_ALPHABET_LEN})")]
    TooSmall { len: usize },

    #[error("alphabet contains duplicate character '{ch}'")]
    Duplicate { ch: char },
}

///
/// Alphabet
///

#[derive(Clone, Debug, Deref, Display, Eq, PartialEq)]
#[display("{text}")]
pub struct Alphabet {
    #[deref]
    chars: Vec<char>,
    text: String,
}

impl Alphabet {
    /// Validate and construct an alphabet from its declared text.
    pub fn try_from_str(text: &str) -> Result<Self, AlphabetError> {
        let chars: Vec<char> = text.chars().collect();

        if chars.is_empty() {
            return Err(AlphabetError::Empty);
        }

        let mut seen = BTreeSet::new();
        for &ch in &chars {
            if !seen.insert(ch) {
                return Err(AlphabetError::Duplicate { ch });
            }
        }

        if chars.len() < MIN_ALPHABET_LEN {
            return Err(AlphabetError::TooSmall { len: chars.len() });
        }

        Ok(Self {
            chars,
            text: text.to_string(),
        })
    }

    /// Resolve an optional declared alphabet, falling back to the default.
    pub fn resolve(declared: Option<&str>) -> Result<Self, AlphabetError> {
        match declared {
            Some(text) => Self::try_from_str(text),
            None => Ok(Self::default()),
        }
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn contains(&self, ch: char) -> bool {
        self.chars.contains(&ch)
    }

    /// Number of distinct identifiers of `length` characters, saturating at `u128::MAX`.
    #[must_use]
    pub fn keyspace(&self, length: usize) -> u128 {
        let base = self.chars.len() as u128;
        let exp = u32::try_from(length).unwrap_or(u32::MAX);

        base.checked_pow(exp).unwrap_or(u128::MAX)
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self {
            chars: DEFAULT_ALPHABET.chars().collect(),
            text: DEFAULT_ALPHABET.to_string(),
        }
    }
}
