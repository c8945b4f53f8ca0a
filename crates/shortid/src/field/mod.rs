//! Module: field
//! Responsibility: the field capability set and its char-like implementations.
//! Does not own: storage, form submission handling, or save orchestration.
//!
//! Every field exposes the same hooks: column shape, validation, before-save,
//! form rendering and deconstruction. `CharField` supplies the base behavior;
//! `ShortIdField` wraps a `CharField` with a generation strategy and overrides
//! `before_save` and `render_form`.

mod char_field;
mod short_id;

pub use char_field::CharField;
pub use short_id::ShortIdField;

use crate::{
    config::{ConfigError, FieldOptions, ShortIdConfig},
    db::store::{ExistenceCheck, StoreError},
    form::FormField,
    model::ColumnDef,
    traits::{EntityIdentity, FieldKey, HasSlot},
};
use rand::RngCore;
use serde::{Deserialize, Serialize};
use thiserror::Error as ThisError;

///
/// FieldError
///
/// Errors raised from before-save hooks. Exhaustion is the only condition a
/// field raises itself; store failures pass through unchanged.
///

#[derive(Debug, ThisError)]
pub enum FieldError {
    #[error("could not generate unique {entity}.{field} after {attempts} attempts")]
    GenerationExhausted {
        entity: &'static str,
        field: &'static str,
        attempts: u32,
    },

    #[error(transparent)]
    Store(#[from] StoreError),
}

///
/// ValidationError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum ValidationError {
    #[error("{field}: ensure this value has at most {max} characters (it has {len})")]
    TooLong {
        field: &'static str,
        max: usize,
        len: usize,
    },

    #[error("{field}: this field cannot be blank")]
    Blank { field: &'static str },

    #[error("{field}: this field is read-only")]
    ReadOnly { field: &'static str },
}

///
/// ColumnOptions
///
/// Resolved column options: every declared `None` replaced by its default.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ColumnOptions {
    pub max_length: usize,
    pub primary_key: bool,
    pub unique: bool,
    pub db_index: bool,
    pub editable: bool,
    pub blank: bool,
    pub null: bool,
    pub verbose_name: Option<String>,
    pub help_text: Option<String>,
}

impl ColumnOptions {
    pub fn resolve(declared: &FieldOptions) -> Result<Self, ConfigError> {
        let max_length = match declared.max_length {
            Some(0) | None => return Err(ConfigError::MissingMaxLength),
            Some(len) => len,
        };

        Ok(Self {
            max_length,
            primary_key: declared.primary_key,
            // a primary key is always unique
            unique: declared.primary_key || declared.unique.unwrap_or(false),
            db_index: declared.db_index,
            editable: declared.editable.unwrap_or(true),
            blank: declared.blank.unwrap_or(false),
            null: declared.null,
            verbose_name: declared.verbose_name.clone(),
            help_text: declared.help_text.clone(),
        })
    }
}

///
/// FieldDeconstruction
///
/// Serializable description of a declared field, enough to rebuild an
/// equivalent instance. `config` is present only for generated fields.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FieldDeconstruction {
    pub name: String,
    pub path: String,
    #[serde(default)]
    pub options: FieldOptions,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<ShortIdConfig>,
}

impl FieldDeconstruction {
    pub fn to_json(&self) -> Result<String, ConfigError> {
        serde_json::to_string(self).map_err(|err| ConfigError::Encode(err.to_string()))
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        serde_json::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string(self).map_err(|err| ConfigError::Encode(err.to_string()))
    }

    pub fn from_toml(text: &str) -> Result<Self, ConfigError> {
        toml::from_str(text).map_err(|err| ConfigError::Parse(err.to_string()))
    }

    // check
    // Guard a rebuild against a deconstruction taken from another field.
    pub(crate) fn check(
        &self,
        path: &'static str,
        name: &'static str,
    ) -> Result<(), ConfigError> {
        if self.path != path {
            return Err(ConfigError::PathMismatch {
                expected: path,
                found: self.path.clone(),
            });
        }
        if self.name != name {
            return Err(ConfigError::NameMismatch {
                expected: name,
                found: self.name.clone(),
            });
        }

        Ok(())
    }
}

///
/// SaveContext
///
/// Per-save state handed to every before-save hook: the insert/update flag,
/// the existence-check capability and the RNG. Hooks that synthesize a value
/// report the field name so the executor can tell generated values from
/// supplied ones.
///

pub struct SaveContext<'a> {
    add: bool,
    store: &'a dyn ExistenceCheck,
    rng: &'a mut dyn RngCore,
    generated: Vec<&'static str>,
}

impl<'a> SaveContext<'a> {
    pub fn new(add: bool, store: &'a dyn ExistenceCheck, rng: &'a mut dyn RngCore) -> Self {
        Self {
            add,
            store,
            rng,
            generated: Vec::new(),
        }
    }

    /// True when the record is being inserted rather than updated.
    #[must_use]
    pub const fn is_add(&self) -> bool {
        self.add
    }

    /// Split into the store and RNG so both can be used at once.
    pub fn parts(&mut self) -> (&dyn ExistenceCheck, &mut dyn RngCore) {
        (self.store, &mut *self.rng)
    }

    pub fn mark_generated(&mut self, field: &'static str) {
        self.generated.push(field);
    }

    #[must_use]
    pub fn generated(&self) -> &[&'static str] {
        &self.generated
    }

    #[must_use]
    pub fn into_generated(self) -> Vec<&'static str> {
        self.generated
    }
}

///
/// Field
///
/// Capability set of a persistence field. Defaults implement the plain
/// char-column behavior from `options()`.
///

pub trait Field {
    type Key: FieldKey;

    /// Stable type path recorded in deconstructions.
    const PATH: &'static str;

    /// Options as declared (after field-specific defaults were filled in).
    fn declared(&self) -> &FieldOptions;

    /// Options with every default resolved.
    fn options(&self) -> &ColumnOptions;

    fn name(&self) -> &'static str {
        <Self::Key as FieldKey>::NAME
    }

    /// Column shape registered with the store.
    fn column(&self) -> ColumnDef {
        ColumnDef::from_options(self.name(), self.options())
    }

    fn validate(&self, value: Option<&str>) -> Result<(), ValidationError> {
        validate_char(self.name(), self.options(), value)
    }

    /// Before-save hook: returns the value that will be written.
    fn before_save<E>(
        &self,
        record: &mut E,
        _ctx: &mut SaveContext<'_>,
    ) -> Result<Option<String>, FieldError>
    where
        E: EntityIdentity + HasSlot<Self::Key>,
    {
        Ok(record.slot().map(ToOwned::to_owned))
    }

    fn render_form(&self, value: Option<&str>) -> FormField {
        let options = self.options();

        FormField::for_column(self.name(), options, value).disabled(!options.editable)
    }

    fn deconstruct(&self) -> FieldDeconstruction {
        FieldDeconstruction {
            name: self.name().to_string(),
            path: Self::PATH.to_string(),
            options: self.declared().clone(),
            config: None,
        }
    }
}

/// Returns the value when it is present and non-empty.
#[must_use]
pub fn present(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

// validate_char
// Shared length and blank rules for char columns.
pub(crate) fn validate_char(
    field: &'static str,
    options: &ColumnOptions,
    value: Option<&str>,
) -> Result<(), ValidationError> {
    let Some(value) = present(value) else {
        return if options.blank {
            Ok(())
        } else {
            Err(ValidationError::Blank { field })
        };
    };

    let len = value.chars().count();
    if len > options.max_length {
        return Err(ValidationError::TooLong {
            field,
            max: options.max_length,
            len,
        });
    }

    Ok(())
}
