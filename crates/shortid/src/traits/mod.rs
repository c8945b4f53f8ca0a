use crate::{
    config::ConfigError,
    field::{FieldError, SaveContext, ValidationError},
    form::FormField,
    model::ColumnDef,
};
use serde::{Serialize, de::DeserializeOwned};

// ============================================================================
// FIELD IDENTITY
// ============================================================================

///
/// FieldKey
///
/// Zero-sized marker naming one field slot. Declared once per field with
/// `field_key!`, it keys both the field type and the record accessor.
///

pub trait FieldKey: 'static {
    const NAME: &'static str;
}

///
/// HasSlot
///
/// Typed accessor for one string slot on a record. `set_slot` is the only way
/// a field writes back into the record it belongs to.
///

pub trait HasSlot<K: FieldKey> {
    fn slot(&self) -> Option<&str>;

    fn set_slot(&mut self, value: String);
}

// ============================================================================
// ENTITY IDENTITY & SCHEMA
// ============================================================================

///
/// EntityIdentity
///
/// Stable naming facts about an entity. This is all a field needs to issue
/// existence queries.
///

pub trait EntityIdentity {
    const ENTITY_NAME: &'static str;
    const PRIMARY_KEY: &'static str;
}

///
/// EntityKind
///
/// Fully declared entity: owns its field instances (`Fields`), reports its
/// columns and runs every field hook on save.
///
/// `pre_save` must run each field's `before_save` in declaration order and
/// must not touch storage other than through the context.
///

pub trait EntityKind: EntityIdentity + Clone + Serialize + DeserializeOwned + 'static {
    type Fields;

    /// Build the field instances. Called once, when the model is declared.
    fn declare() -> Result<Self::Fields, ConfigError>;

    fn columns(fields: &Self::Fields) -> Vec<ColumnDef>;

    /// Current primary-key value, if any.
    fn key(&self) -> Option<&str>;

    fn pre_save(
        &mut self,
        fields: &Self::Fields,
        ctx: &mut SaveContext<'_>,
    ) -> Result<(), FieldError>;

    fn validate(&self, fields: &Self::Fields) -> Result<(), ValidationError>;

    /// Editable-form view of this record, one entry per field.
    fn form(&self, fields: &Self::Fields) -> Vec<FormField>;
}
