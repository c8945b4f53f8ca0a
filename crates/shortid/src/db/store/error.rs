use crate::error::ErrorClass;
use thiserror::Error as ThisError;

///
/// StoreError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum StoreError {
    #[error("entity '{entity}' is not registered")]
    UnknownEntity { entity: String },

    #[error("entity '{entity}' is already registered")]
    AlreadyRegistered { entity: String },

    #[error("entity '{entity}' has no column '{field}'")]
    UnknownField { entity: String, field: String },

    #[error("{entity} row is missing its primary key")]
    MissingKey { entity: String },

    #[error("{entity} key '{key}' already exists")]
    KeyExists { entity: String, key: String },

    #[error("{entity} key '{key}' not found")]
    KeyNotFound { entity: String, key: String },

    #[error("unique constraint failed: {entity}.{field} = '{value}'")]
    UniqueViolation {
        entity: String,
        field: String,
        value: String,
    },

    #[error("{entity}.{field} exceeds max length {max} (got {len})")]
    TooLong {
        entity: String,
        field: String,
        max: usize,
        len: usize,
    },

    #[error("row encode failed: {message}")]
    Encode { message: String },

    #[error("{entity} row failed to decode: {message}")]
    Decode { entity: String, message: String },
}

impl StoreError {
    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::KeyExists { .. } | Self::UniqueViolation { .. } => ErrorClass::Conflict,
            Self::KeyNotFound { .. } | Self::UnknownEntity { .. } => ErrorClass::NotFound,
            Self::TooLong { .. } | Self::MissingKey { .. } => ErrorClass::Invalid,
            _ => ErrorClass::Store,
        }
    }

    /// Column whose uniqueness was violated by a write, if any.
    /// A duplicate primary key reports the key column `primary_key`.
    #[must_use]
    pub fn conflict_field<'a>(&'a self, primary_key: &'a str) -> Option<&'a str> {
        match self {
            Self::UniqueViolation { field, .. } => Some(field),
            Self::KeyExists { .. } => Some(primary_key),
            _ => None,
        }
    }
}
