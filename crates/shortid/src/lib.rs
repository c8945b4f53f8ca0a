//! Short, prefixed, collision-checked identifier fields for record models,
//! plus the small model/store/save runtime they plug into.
//!
//! A `ShortIdField` fills an empty slot on save with `prefix` followed by
//! `length` characters drawn uniformly from an alphabet, checking each
//! candidate against the backing store when `collision_check` is on.

mod macros;

// public exports are one module level down
pub mod alphabet;
pub mod config;
pub mod db;
pub mod error;
pub mod field;
pub mod form;
pub mod generator;
pub mod model;
pub mod obs;
pub mod traits;

// test
#[cfg(test)]
pub(crate) mod test_support;

///
/// CONSTANTS
///

/// Generated suffix length when none is configured.
pub const DEFAULT_LENGTH: usize = 22;

/// Candidates tried per save before giving up.
pub const DEFAULT_MAX_RETRIES: u32 = 10;

///
/// Prelude
///
/// Declaration vocabulary only. Stores, executors and errors stay in their
/// modules.
///

pub mod prelude {
    pub use crate::{
        alphabet::Alphabet,
        config::{FieldOptions, ShortIdConfig},
        field::{CharField, Field, ShortIdField},
        model::Model,
        traits::{EntityIdentity, EntityKind, FieldKey, HasSlot},
    };
}
