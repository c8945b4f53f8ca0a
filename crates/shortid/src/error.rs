use crate::{
    config::ConfigError,
    db::{SaveError, store::StoreError},
    field::ValidationError,
    model::ModelError,
};
use std::fmt;
use thiserror::Error as ThisError;

///
/// Error
///
/// Flattened error for callers that only need a class, an origin and a
/// message. Typed module errors convert into it with `?`.
///

#[derive(Debug, Eq, PartialEq, ThisError)]
#[error("{origin}: {message}")]
pub struct Error {
    pub class: ErrorClass,
    pub origin: ErrorOrigin,
    pub message: String,
}

impl Error {
    pub fn new(class: ErrorClass, origin: ErrorOrigin, message: impl Into<String>) -> Self {
        Self {
            class,
            origin,
            message: message.into(),
        }
    }
}

impl From<ConfigError> for Error {
    fn from(err: ConfigError) -> Self {
        Self::new(ErrorClass::Config, ErrorOrigin::Config, err.to_string())
    }
}

impl From<ModelError> for Error {
    fn from(err: ModelError) -> Self {
        Self::new(ErrorClass::Config, ErrorOrigin::Model, err.to_string())
    }
}

impl From<ValidationError> for Error {
    fn from(err: ValidationError) -> Self {
        Self::new(ErrorClass::Invalid, ErrorOrigin::Form, err.to_string())
    }
}

impl From<StoreError> for Error {
    fn from(err: StoreError) -> Self {
        Self::new(err.class(), ErrorOrigin::Store, err.to_string())
    }
}

impl From<SaveError> for Error {
    fn from(err: SaveError) -> Self {
        let origin = match err {
            SaveError::Field(_) => ErrorOrigin::Field,
            SaveError::Validation(_) => ErrorOrigin::Executor,
            SaveError::Store(_) => ErrorOrigin::Store,
        };

        Self::new(err.class(), origin, err.to_string())
    }
}

///
/// ErrorClass
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorClass {
    Config,
    Conflict,
    Exhausted,
    Invalid,
    NotFound,
    Store,
}

impl fmt::Display for ErrorClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Config => "config",
            Self::Conflict => "conflict",
            Self::Exhausted => "exhausted",
            Self::Invalid => "invalid",
            Self::NotFound => "not_found",
            Self::Store => "store",
        };
        write!(f, "{label}")
    }
}

///
/// ErrorOrigin
///

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ErrorOrigin {
    Config,
    Model,
    Field,
    Form,
    Store,
    Executor,
    Interface,
}

impl fmt::Display for ErrorOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Config => "config",
            Self::Model => "model",
            Self::Field => "field",
            Self::Form => "form",
            Self::Store => "store",
            Self::Executor => "executor",
            Self::Interface => "interface",
        };
        write!(f, "{label}")
    }
}

///
/// TESTS
///
