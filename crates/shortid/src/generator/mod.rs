//! Candidate generation: `prefix` followed by `length` characters sampled
//! uniformly, with replacement, from an alphabet.
//!
//! Generation is free of I/O. The RNG is supplied by the caller so saves can
//! run against a seeded source; `generate` uses the thread-local RNG.


use crate::alphabet::Alphabet;
use rand::Rng;

///
/// ShortIdGenerator
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShortIdGenerator {
    prefix: String,
    length: usize,
    alphabet: Alphabet,
}

impl ShortIdGenerator {
    #[must_use]
    pub fn new(prefix: impl Into<String>, length: usize, alphabet: Alphabet) -> Self {
        Self {
            prefix: prefix.into(),
            length,
            alphabet,
        }
    }

    #[must_use]
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    #[must_use]
    pub const fn length(&self) -> usize {
        self.length
    }

    #[must_use]
    pub const fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Width of every candidate in characters: prefix plus random suffix.
    #[must_use]
    pub fn width(&self) -> usize {
        self.prefix.chars().count() + self.length
    }

    /// Generate one candidate with the thread-local RNG.
    #[must_use]
    pub fn generate(&self) -> String {
        self.generate_with(&mut rand::rng())
    }

    /// Generate one candidate from a caller-supplied RNG.
    pub fn generate_with<R: Rng + ?Sized>(&self, rng: &mut R) -> String {
        let mut out = String::with_capacity(self.prefix.len() + self.length * 4);
        out.push_str(&self.prefix);

        // each position is an independent uniform draw over the alphabet
        for _ in 0..self.length {
            let index = rng.random_range(0..self.alphabet.len());
            out.push(self.alphabet[index]);
        }

        out
    }

    /// True if `value` has this generator's shape (prefix, width, alphabet).
    #[must_use]
    pub fn matches(&self, value: &str) -> bool {
        let Some(suffix) = value.strip_prefix(self.prefix.as_str()) else {
            return false;
        };

        suffix.chars().count() == self.length && suffix.chars().all(|c| self.alphabet.contains(c))
    }
}
