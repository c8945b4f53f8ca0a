//! Runtime schema: column shapes registered with a store, and the declared
//! model handle that owns an entity's field instances.


use crate::{
    config::ConfigError,
    field::ColumnOptions,
    form::FormField,
    traits::EntityKind,
};
use serde::Serialize;
use std::collections::BTreeSet;
use thiserror::Error as ThisError;

///
/// ModelError
///

#[derive(Debug, Eq, PartialEq, ThisError)]
pub enum ModelError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("{entity} declares column '{column}' twice")]
    DuplicateColumn {
        entity: &'static str,
        column: &'static str,
    },

    #[error("{entity} has no primary key column '{primary_key}'")]
    MissingPrimaryKey {
        entity: &'static str,
        primary_key: &'static str,
    },

    #[error("{entity}.{column} is the primary key but is not declared as one")]
    PrimaryKeyFlag {
        entity: &'static str,
        column: &'static str,
    },
}

///
/// ColumnDef
/// Char column shape as the store sees it.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct ColumnDef {
    pub name: &'static str,
    pub max_length: usize,
    pub primary_key: bool,
    pub unique: bool,
    pub db_index: bool,
    pub null: bool,
}

impl ColumnDef {
    #[must_use]
    pub const fn from_options(name: &'static str, options: &ColumnOptions) -> Self {
        Self {
            name,
            max_length: options.max_length,
            primary_key: options.primary_key,
            unique: options.unique,
            db_index: options.db_index,
            null: options.null,
        }
    }

    /// Unique columns are indexed whether or not `db_index` was declared.
    #[must_use]
    pub const fn is_indexed(&self) -> bool {
        self.db_index || self.unique || self.primary_key
    }
}

///
/// EntityModel
/// Ordered column list for one entity.
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct EntityModel {
    pub entity_name: &'static str,
    pub primary_key: &'static str,
    pub columns: Vec<ColumnDef>,
}

impl EntityModel {
    #[must_use]
    pub const fn new(
        entity_name: &'static str,
        primary_key: &'static str,
        columns: Vec<ColumnDef>,
    ) -> Self {
        Self {
            entity_name,
            primary_key,
            columns,
        }
    }

    #[must_use]
    pub fn column(&self, name: &str) -> Option<&ColumnDef> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn unique_columns(&self) -> impl Iterator<Item = &ColumnDef> {
        self.columns.iter().filter(|c| c.unique)
    }

    pub fn validate(&self) -> Result<(), ModelError> {
        let entity = self.entity_name;

        let mut seen = BTreeSet::new();
        for column in &self.columns {
            if !seen.insert(column.name) {
                return Err(ModelError::DuplicateColumn {
                    entity,
                    column: column.name,
                });
            }
        }

        let Some(pk) = self.column(self.primary_key) else {
            return Err(ModelError::MissingPrimaryKey {
                entity,
                primary_key: self.primary_key,
            });
        };
        if !pk.primary_key {
            return Err(ModelError::PrimaryKeyFlag {
                entity,
                column: pk.name,
            });
        }

        Ok(())
    }
}

///
/// Model
///
/// A declared entity: its field instances plus the column model derived from
/// them. Declaring fails fast on any invalid field configuration.
///

pub struct Model<E: EntityKind> {
    fields: E::Fields,
    entity_model: EntityModel,
}

impl<E: EntityKind> Model<E> {
    pub fn declare() -> Result<Self, ModelError> {
        let fields = E::declare()?;
        let entity_model = EntityModel::new(E::ENTITY_NAME, E::PRIMARY_KEY, E::columns(&fields));
        entity_model.validate()?;

        Ok(Self {
            fields,
            entity_model,
        })
    }

    #[must_use]
    pub const fn fields(&self) -> &E::Fields {
        &self.fields
    }

    #[must_use]
    pub const fn entity_model(&self) -> &EntityModel {
        &self.entity_model
    }

    /// Form view of one record.
    #[must_use]
    pub fn form(&self, entity: &E) -> Vec<FormField> {
        entity.form(&self.fields)
    }
}
