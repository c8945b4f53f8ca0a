//! Declaration-time configuration for ShortId fields.
//!
//! `ShortIdConfig` carries the generation options; `FieldOptions` carries the
//! column options shared by every char-like field. Both are plain serde data so
//! a declared field can be written out and read back without loss.

#[cfg(test)]
mod tests;

use crate::{
    DEFAULT_LENGTH, DEFAULT_MAX_RETRIES,
    alphabet::{Alphabet, AlphabetError},
};
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// ConfigError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum ConfigError {
    #[error("length must be greater than zero")]
    ZeroLength,

    #[error("max_retries must be greater than zero")]
    ZeroRetries,

    #[error(transparent)]
    Alphabet(#[from] AlphabetError),

    #[error("max_length is required for char fields")]
    MissingMaxLength,

    #[error("max_length {max_length} is smaller than the generated width {width}")]
    MaxLengthTooSmall { max_length: usize, width: usize },

    #[error("collision-checked auto fields must be unique or the primary key")]
    UniqueRequired,

    #[error("field '{found}' cannot be rebuilt as '{expected}'")]
    PathMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("field name '{found}' does not match declared name '{expected}'")]
    NameMismatch {
        expected: &'static str,
        found: String,
    },

    #[error("config parse failed: {0}")]
    Parse(String),

    #[error("config encode failed: {0}")]
    Encode(String),
}

///
/// ShortIdConfig
///
/// Generation options for one field. `alphabet = None` selects the default
/// alphabet and is preserved as `None` through serialization.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShortIdConfig {
    pub auto: bool,
    pub length: usize,
    pub prefix: String,
    pub max_retries: u32,
    pub collision_check: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub alphabet: Option<String>,
}

impl ShortIdConfig {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn auto(mut self, auto: bool) -> Self {
        self.auto = auto;
        self
    }

    #[must_use]
    pub const fn length(mut self, length: usize) -> Self {
        self.length = length;
        self
    }

    #[must_use]
    pub fn prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    #[must_use]
    pub const fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }

    #[must_use]
    pub const fn collision_check(mut self, collision_check: bool) -> Self {
        self.collision_check = collision_check;
        self
    }

    #[must_use]
    pub fn alphabet(mut self, alphabet: impl Into<String>) -> Self {
        self.alphabet = Some(alphabet.into());
        self
    }

    /// Storage width in characters: prefix plus generated suffix.
    #[must_use]
    pub fn width(&self) -> usize {
        self.prefix.chars().count() + self.length
    }

    /// Check the generation options and resolve the alphabet.
    pub fn validate(&self) -> Result<Alphabet, ConfigError> {
        if self.length == 0 {
            return Err(ConfigError::ZeroLength);
        }
        if self.max_retries == 0 {
            return Err(ConfigError::ZeroRetries);
        }

        Ok(Alphabet::resolve(self.alphabet.as_deref())?)
    }

    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn to_toml_string(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|err| ConfigError::Encode(err.to_string()))
    }
}

impl Default for ShortIdConfig {
    fn default() -> Self {
        Self {
            auto: true,
            length: DEFAULT_LENGTH,
            prefix: String::new(),
            max_retries: DEFAULT_MAX_RETRIES,
            collision_check: true,
            alphabet: None,
        }
    }
}

///
/// FieldOptions
///
/// Declared column options. `None` means "not declared" so field types can
/// fill in their own defaults before the base field resolves the rest.
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    pub primary_key: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique: Option<bool>,
    pub db_index: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub editable: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub blank: Option<bool>,
    pub null: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verbose_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl FieldOptions {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }

    #[must_use]
    pub const fn primary_key(mut self, primary_key: bool) -> Self {
        self.primary_key = primary_key;
        self
    }

    #[must_use]
    pub const fn unique(mut self, unique: bool) -> Self {
        self.unique = Some(unique);
        self
    }

    #[must_use]
    pub const fn db_index(mut self, db_index: bool) -> Self {
        self.db_index = db_index;
        self
    }

    #[must_use]
    pub const fn editable(mut self, editable: bool) -> Self {
        self.editable = Some(editable);
        self
    }

    #[must_use]
    pub const fn blank(mut self, blank: bool) -> Self {
        self.blank = Some(blank);
        self
    }

    #[must_use]
    pub const fn null(mut self, null: bool) -> Self {
        self.null = null;
        self
    }

    #[must_use]
    pub fn verbose_name(mut self, verbose_name: impl Into<String>) -> Self {
        self.verbose_name = Some(verbose_name.into());
        self
    }

    #[must_use]
    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }
}
