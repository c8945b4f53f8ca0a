use crate::{
    db::{
        SaveMode,
        store::{ExistenceCheck, RecordStore, StoreError, column_text},
    },
    model::EntityModel,
};
use serde_json::Value as JsonValue;
use std::collections::BTreeMap;

///
/// MemoryStore
///
/// Single-owner, in-process store. Writes take `&mut self`, so checks and
/// writes from one owner never interleave.
///

#[derive(Debug, Default)]
pub struct MemoryStore {
    tables: BTreeMap<String, Table>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// All rows of one entity in key order.
    pub fn rows(&self, entity: &str) -> Result<impl Iterator<Item = &JsonValue>, StoreError> {
        Ok(self.table(entity)?.rows.values())
    }

    fn table(&self, entity: &str) -> Result<&Table, StoreError> {
        self.tables
            .get(entity)
            .ok_or_else(|| StoreError::UnknownEntity {
                entity: entity.to_string(),
            })
    }
}

impl ExistenceCheck for MemoryStore {
    fn exists(&self, entity: &str, field: &str, value: &str) -> Result<bool, StoreError> {
        let table = self.table(entity)?;

        if field == table.model.primary_key {
            return Ok(table.rows.contains_key(value));
        }
        if table.model.column(field).is_none() {
            return Err(StoreError::UnknownField {
                entity: entity.to_string(),
                field: field.to_string(),
            });
        }

        Ok(table
            .rows
            .values()
            .any(|row| column_text(row.get(field)).as_deref() == Some(value)))
    }
}

impl RecordStore for MemoryStore {
    fn register(&mut self, model: EntityModel) -> Result<(), StoreError> {
        let entity = model.entity_name.to_string();
        if self.tables.contains_key(&entity) {
            return Err(StoreError::AlreadyRegistered { entity });
        }

        self.tables.insert(
            entity,
            Table {
                model,
                rows: BTreeMap::new(),
            },
        );

        Ok(())
    }

    fn contains_key(&self, entity: &str, key: &str) -> Result<bool, StoreError> {
        Ok(self.table(entity)?.rows.contains_key(key))
    }

    fn get(&self, entity: &str, key: &str) -> Result<Option<JsonValue>, StoreError> {
        Ok(self.table(entity)?.rows.get(key).cloned())
    }

    fn write(&mut self, entity: &str, mode: SaveMode, row: JsonValue) -> Result<(), StoreError> {
        let table = self
            .tables
            .get_mut(entity)
            .ok_or_else(|| StoreError::UnknownEntity {
                entity: entity.to_string(),
            })?;

        let key = table.key_of(&row)?;
        let exists = table.rows.contains_key(&key);

        match (mode, exists) {
            (SaveMode::Insert, true) => {
                return Err(StoreError::KeyExists {
                    entity: entity.to_string(),
                    key,
                });
            }
            (SaveMode::Update, false) => {
                return Err(StoreError::KeyNotFound {
                    entity: entity.to_string(),
                    key,
                });
            }
            _ => {}
        }

        // checks complete before the row is touched
        table.check_columns(&key, &row)?;
        table.rows.insert(key, row);

        Ok(())
    }

    fn len(&self, entity: &str) -> Result<usize, StoreError> {
        Ok(self.table(entity)?.rows.len())
    }
}

///
/// Table
///

#[derive(Debug)]
struct Table {
    model: EntityModel,
    rows: BTreeMap<String, JsonValue>,
}

impl Table {
    fn key_of(&self, row: &JsonValue) -> Result<String, StoreError> {
        column_text(row.get(self.model.primary_key))
            .filter(|key| !key.is_empty())
            .ok_or_else(|| StoreError::MissingKey {
                entity: self.model.entity_name.to_string(),
            })
    }

    // check_columns
    // Width and uniqueness checks against every other row.
    fn check_columns(&self, key: &str, row: &JsonValue) -> Result<(), StoreError> {
        let entity = self.model.entity_name;

        for column in &self.model.columns {
            let Some(value) = column_text(row.get(column.name)) else {
                continue;
            };

            let len = value.chars().count();
            if len > column.max_length {
                return Err(StoreError::TooLong {
                    entity: entity.to_string(),
                    field: column.name.to_string(),
                    max: column.max_length,
                    len,
                });
            }

            // the primary key is covered by the key lookup in `write`
            if !column.unique || column.primary_key {
                continue;
            }

            let taken = self.rows.iter().any(|(other_key, other)| {
                other_key != key
                    && column_text(other.get(column.name)).as_deref() == Some(value.as_str())
            });
            if taken {
                return Err(StoreError::UniqueViolation {
                    entity: entity.to_string(),
                    field: column.name.to_string(),
                    value,
                });
            }
        }

        Ok(())
    }
}
