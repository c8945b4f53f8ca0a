//! Backing-store contracts and the in-memory store.
//!
//! `ExistenceCheck` is the only capability a field needs. `RecordStore` adds
//! schema registration and row writes for the save executor. Rows are JSON
//! objects keyed by their primary-key column.

mod error;
mod memory;


pub use error::StoreError;
pub use memory::MemoryStore;

use crate::{db::SaveMode, model::EntityModel};
use serde_json::Value as JsonValue;

///
/// ExistenceCheck
///
/// "Does any stored `entity` row have `field` equal to `value`?"
///

pub trait ExistenceCheck {
    fn exists(&self, entity: &str, field: &str, value: &str) -> Result<bool, StoreError>;
}

///
/// RecordStore
///
/// Unique and primary-key columns are enforced at write time, whatever the
/// caller checked beforehand.
///

pub trait RecordStore: ExistenceCheck {
    /// Register an entity's columns. Must precede any other call for it.
    fn register(&mut self, model: EntityModel) -> Result<(), StoreError>;

    fn contains_key(&self, entity: &str, key: &str) -> Result<bool, StoreError>;

    fn get(&self, entity: &str, key: &str) -> Result<Option<JsonValue>, StoreError>;

    fn write(&mut self, entity: &str, mode: SaveMode, row: JsonValue) -> Result<(), StoreError>;

    fn len(&self, entity: &str) -> Result<usize, StoreError>;
}

/// Text form of one stored column value; `null` and missing columns have none.
#[must_use]
pub fn column_text(value: Option<&JsonValue>) -> Option<String> {
    match value? {
        JsonValue::Null => None,
        JsonValue::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
