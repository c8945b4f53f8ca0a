use serde::{Deserialize, Serialize};
use shortid::{
    config::{ConfigError, FieldOptions, ShortIdConfig},
    field::{CharField, Field, FieldError, SaveContext, ShortIdField, ValidationError},
    form::FormField,
    model::ColumnDef,
    traits::{EntityIdentity, EntityKind},
};
use std::sync::OnceLock;

/// Lowercase ASCII letters and digits.
pub const ID_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz0123456789";

static ID_CONFIG: OnceLock<ShortIdConfig> = OnceLock::new();

shortid::field_key!(pub DemoId => "id");
shortid::field_key!(pub DemoName => "name");

///
/// DemoModel
///

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
pub struct DemoModel {
    pub id: Option<String>,
    pub name: String,
}

impl DemoModel {
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
        }
    }
}

shortid::slot!(DemoModel, DemoId => id);
shortid::slot!(DemoModel, DemoName => name: String);

///
/// DemoFields
///

pub struct DemoFields {
    pub id: ShortIdField<DemoId>,
    pub name: CharField<DemoName>,
}

/// `id_` followed by seven lowercase letters or digits.
#[must_use]
pub fn default_id_config() -> ShortIdConfig {
    ShortIdConfig::new()
        .prefix("id_")
        .length(7)
        .alphabet(ID_ALPHABET)
}

/// Override the id configuration. Only the first call before `declare` wins.
#[must_use]
pub fn configure_id(config: ShortIdConfig) -> bool {
    ID_CONFIG.set(config).is_ok()
}

impl EntityIdentity for DemoModel {
    const ENTITY_NAME: &'static str = "DemoModel";
    const PRIMARY_KEY: &'static str = "id";
}

impl EntityKind for DemoModel {
    type Fields = DemoFields;

    fn declare() -> Result<DemoFields, ConfigError> {
        let config = ID_CONFIG.get_or_init(default_id_config).clone();

        Ok(DemoFields {
            id: ShortIdField::try_with_options(
                config,
                FieldOptions::new()
                    .primary_key(true)
                    .verbose_name("ID"),
            )?,
            name: CharField::try_new(FieldOptions::new().max_length(100))?,
        })
    }

    fn columns(fields: &DemoFields) -> Vec<ColumnDef> {
        vec![fields.id.column(), fields.name.column()]
    }

    fn key(&self) -> Option<&str> {
        self.id.as_deref()
    }

    fn pre_save(
        &mut self,
        fields: &DemoFields,
        ctx: &mut SaveContext<'_>,
    ) -> Result<(), FieldError> {
        fields.id.before_save(self, ctx)?;
        fields.name.before_save(self, ctx)?;

        Ok(())
    }

    fn validate(&self, fields: &DemoFields) -> Result<(), ValidationError> {
        fields.id.validate(self.id.as_deref())?;
        fields.name.validate(Some(&self.name))
    }

    fn form(&self, fields: &DemoFields) -> Vec<FormField> {
        vec![
            fields.id.render_form(self.id.as_deref()),
            fields.name.render_form(Some(&self.name)),
        ]
    }
}

///
/// TESTS
///
