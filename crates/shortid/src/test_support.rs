//! Shared fixtures for unit tests: two declared entities and a few fake
//! stores with scripted existence answers.

use crate::{
    config::{ConfigError, FieldOptions, ShortIdConfig},
    db::{
        SaveMode,
        store::{ExistenceCheck, MemoryStore, RecordStore, StoreError},
    },
    field::{CharField, Field, FieldError, SaveContext, ShortIdField, ValidationError},
    form::FormField,
    model::{ColumnDef, EntityModel},
    traits::{EntityIdentity, EntityKind},
};
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use std::cell::{Cell, RefCell};

// ============================================================================
// Ticket: generated primary key
// ============================================================================

crate::field_key!(pub(crate) TicketId => "id");
crate::field_key!(pub(crate) TicketTitle => "title");

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Ticket {
    pub id: Option<String>,
    pub title: String,
}

impl Ticket {
    pub(crate) fn titled(title: &str) -> Self {
        Self {
            id: None,
            title: title.to_string(),
        }
    }
}

crate::slot!(Ticket, TicketId => id);
crate::slot!(Ticket, TicketTitle => title: String);

pub(crate) struct TicketFields {
    pub id: ShortIdField<TicketId>,
    pub title: CharField<TicketTitle>,
}

impl EntityIdentity for Ticket {
    const ENTITY_NAME: &'static str = "Ticket";
    const PRIMARY_KEY: &'static str = "id";
}

impl EntityKind for Ticket {
    type Fields = TicketFields;

    fn declare() -> Result<TicketFields, ConfigError> {
        Ok(TicketFields {
            id: ShortIdField::try_with_options(
                ShortIdConfig::new().prefix("tk_").length(8),
                FieldOptions::new().primary_key(true),
            )?,
            title: CharField::try_new(FieldOptions::new().max_length(40))?,
        })
    }

    fn columns(fields: &TicketFields) -> Vec<ColumnDef> {
        vec![fields.id.column(), fields.title.column()]
    }

    fn key(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn pre_save(
        &mut self,
        fields: &TicketFields,
        ctx: &mut SaveContext<'_>,
    ) -> Result<(), FieldError> {
        fields.id.before_save(self, ctx)?;
        fields.title.before_save(self, ctx)?;

        Ok(())
    }

    fn validate(&self, fields: &TicketFields) -> Result<(), ValidationError> {
        fields.id.validate(self.id.as_deref())?;
        fields.title.validate(Some(&self.title))
    }

    fn form(&self, fields: &TicketFields) -> Vec<FormField> {
        vec![
            fields.id.render_form(self.id.as_deref()),
            fields.title.render_form(Some(&self.title)),
        ]
    }
}

// ============================================================================
// Badge: supplied primary key, generated unique code from a tiny keyspace
// ============================================================================

crate::field_key!(pub(crate) BadgeName => "name");
crate::field_key!(pub(crate) BadgeCode => "code");

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub(crate) struct Badge {
    pub name: String,
    pub code: Option<String>,
}

impl Badge {
    pub(crate) fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            code: None,
        }
    }
}

crate::slot!(Badge, BadgeName => name: String);
crate::slot!(Badge, BadgeCode => code);

pub(crate) struct BadgeFields {
    pub name: CharField<BadgeName>,
    pub code: ShortIdField<BadgeCode>,
}

impl EntityIdentity for Badge {
    const ENTITY_NAME: &'static str = "Badge";
    const PRIMARY_KEY: &'static str = "name";
}

impl EntityKind for Badge {
    type Fields = BadgeFields;

    fn declare() -> Result<BadgeFields, ConfigError> {
        Ok(BadgeFields {
            name: CharField::try_new(FieldOptions::new().max_length(20).primary_key(true))?,
            code: ShortIdField::try_new(
                ShortIdConfig::new().length(1).alphabet("ab").max_retries(2),
            )?,
        })
    }

    fn columns(fields: &BadgeFields) -> Vec<ColumnDef> {
        vec![fields.name.column(), fields.code.column()]
    }

    fn key(&self) -> Option<&str> {
        Some(&self.name)
    }

    fn pre_save(
        &mut self,
        fields: &BadgeFields,
        ctx: &mut SaveContext<'_>,
    ) -> Result<(), FieldError> {
        fields.name.before_save(self, ctx)?;
        fields.code.before_save(self, ctx)?;

        Ok(())
    }

    fn validate(&self, fields: &BadgeFields) -> Result<(), ValidationError> {
        fields.name.validate(Some(&self.name))?;
        fields.code.validate(self.code.as_deref())
    }

    fn form(&self, fields: &BadgeFields) -> Vec<FormField> {
        vec![
            fields.name.render_form(Some(&self.name)),
            fields.code.render_form(self.code.as_deref()),
        ]
    }
}

// ============================================================================
// Fake stores
// ============================================================================

///
/// ScriptedStore
/// Answers "exists" for the first `collisions` queries, then "free".
///

#[derive(Debug, Default)]
pub(crate) struct ScriptedStore {
    collisions: u32,
    calls: Cell<u32>,
    queries: RefCell<Vec<(String, String, String)>>,
}

impl ScriptedStore {
    pub(crate) fn never() -> Self {
        Self::colliding(0)
    }

    pub(crate) fn always() -> Self {
        Self::colliding(u32::MAX)
    }

    pub(crate) fn colliding(collisions: u32) -> Self {
        Self {
            collisions,
            ..Self::default()
        }
    }

    pub(crate) fn calls(&self) -> u32 {
        self.calls.get()
    }

    /// (entity, field, value) of every query, in order.
    pub(crate) fn queries(&self) -> Vec<(String, String, String)> {
        self.queries.borrow().clone()
    }
}

impl ExistenceCheck for ScriptedStore {
    fn exists(&self, entity: &str, field: &str, value: &str) -> Result<bool, StoreError> {
        let call = self.calls.get() + 1;
        self.calls.set(call);
        self.queries
            .borrow_mut()
            .push((entity.to_string(), field.to_string(), value.to_string()));

        Ok(call <= self.collisions)
    }
}

///
/// FailingStore
///

pub(crate) struct FailingStore;

impl ExistenceCheck for FailingStore {
    fn exists(&self, entity: &str, _field: &str, _value: &str) -> Result<bool, StoreError> {
        Err(StoreError::UnknownEntity {
            entity: entity.to_string(),
        })
    }
}

///
/// BlindStore
///
/// `MemoryStore` whose existence check always says "free", so duplicates
/// are only caught by the write-time constraints.
///

#[derive(Debug, Default)]
pub(crate) struct BlindStore(pub MemoryStore);

impl ExistenceCheck for BlindStore {
    fn exists(&self, _entity: &str, _field: &str, _value: &str) -> Result<bool, StoreError> {
        Ok(false)
    }
}

impl RecordStore for BlindStore {
    fn register(&mut self, model: EntityModel) -> Result<(), StoreError> {
        self.0.register(model)
    }

    fn contains_key(&self, entity: &str, key: &str) -> Result<bool, StoreError> {
        self.0.contains_key(entity, key)
    }

    fn get(&self, entity: &str, key: &str) -> Result<Option<JsonValue>, StoreError> {
        self.0.get(entity, key)
    }

    fn write(&mut self, entity: &str, mode: SaveMode, row: JsonValue) -> Result<(), StoreError> {
        self.0.write(entity, mode, row)
    }

    fn len(&self, entity: &str) -> Result<usize, StoreError> {
        self.0.len(entity)
    }
}
