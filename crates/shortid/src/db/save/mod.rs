
use crate::{
    db::{
        Db, SaveMode,
        store::{RecordStore, StoreError},
    },
    error::ErrorClass,
    field::{FieldError, SaveContext, ValidationError, present},
    model::Model,
    obs::sink::{self, MetricsEvent},
    traits::EntityKind,
};
use thiserror::Error as ThisError;
use tracing::{debug, warn};

/// Extra attempts after a write rejects a value generated in the same save.
pub const DEFAULT_CONFLICT_RETRIES: u32 = 3;

///
/// SaveError
///

#[derive(Debug, ThisError)]
pub enum SaveError {
    #[error(transparent)]
    Field(#[from] FieldError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl SaveError {
    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Field(FieldError::GenerationExhausted { .. }))
    }

    #[must_use]
    pub const fn class(&self) -> ErrorClass {
        match self {
            Self::Field(FieldError::GenerationExhausted { .. }) => ErrorClass::Exhausted,
            Self::Field(FieldError::Store(err)) | Self::Store(err) => err.class(),
            Self::Validation(_) => ErrorClass::Invalid,
        }
    }
}

///
/// SaveExecutor
///
/// Runs field hooks, validation and the write for one entity type.
///
/// A write rejected on a unique column whose value was generated during this
/// save is retried from the caller's original record, up to
/// `conflict_retries` times. Supplied values are never replaced.
///

pub struct SaveExecutor<'a, E: EntityKind, S: RecordStore> {
    db: &'a mut Db<S>,
    model: &'a Model<E>,
    conflict_retries: u32,
}

impl<'a, E: EntityKind, S: RecordStore> SaveExecutor<'a, E, S> {
    // ======================================================================
    // Construction & configuration
    // ======================================================================

    pub(crate) const fn new(db: &'a mut Db<S>, model: &'a Model<E>) -> Self {
        Self {
            db,
            model,
            conflict_retries: DEFAULT_CONFLICT_RETRIES,
        }
    }

    #[must_use]
    pub const fn conflict_retries(mut self, retries: u32) -> Self {
        self.conflict_retries = retries;
        self
    }

    // ======================================================================
    // Single-entity save operations
    // ======================================================================

    /// Insert a new record (errors if the key already exists).
    pub fn insert(&mut self, entity: E) -> Result<E, SaveError> {
        self.save_entity(SaveMode::Insert, entity)
    }

    /// Update an existing record (errors if it does not exist).
    pub fn update(&mut self, entity: E) -> Result<E, SaveError> {
        self.save_entity(SaveMode::Update, entity)
    }

    /// Replace a record, inserting if missing.
    pub fn replace(&mut self, entity: E) -> Result<E, SaveError> {
        self.save_entity(SaveMode::Replace, entity)
    }

    // ======================================================================
    // Batch save operations (fail-fast, non-atomic)
    // ======================================================================

    pub fn insert_many(
        &mut self,
        entities: impl IntoIterator<Item = E>,
    ) -> Result<Vec<E>, SaveError> {
        self.save_many(SaveMode::Insert, entities)
    }

    pub fn update_many(
        &mut self,
        entities: impl IntoIterator<Item = E>,
    ) -> Result<Vec<E>, SaveError> {
        self.save_many(SaveMode::Update, entities)
    }

    pub fn replace_many(
        &mut self,
        entities: impl IntoIterator<Item = E>,
    ) -> Result<Vec<E>, SaveError> {
        self.save_many(SaveMode::Replace, entities)
    }

    // partial successes remain stored when a later record fails
    fn save_many(
        &mut self,
        mode: SaveMode,
        entities: impl IntoIterator<Item = E>,
    ) -> Result<Vec<E>, SaveError> {
        let iter = entities.into_iter();
        let mut out = Vec::with_capacity(iter.size_hint().0);

        for entity in iter {
            out.push(self.save_entity(mode, entity)?);
        }

        Ok(out)
    }

    // ======================================================================
    // Execution
    // ======================================================================

    fn save_entity(&mut self, mode: SaveMode, entity: E) -> Result<E, SaveError> {
        let entity_path = E::ENTITY_NAME;
        sink::record(MetricsEvent::SaveCall { entity_path });

        let mut conflicts = 0;
        loop {
            let mut record = entity.clone();
            let (write_mode, generated) = self.prepare(mode, &mut record)?;

            let row = serde_json::to_value(&record).map_err(|err| StoreError::Encode {
                message: err.to_string(),
            })?;

            let err = match self.db.store_mut().write(entity_path, write_mode, row) {
                Ok(()) => {
                    sink::record(MetricsEvent::RowWritten { entity_path });
                    debug!(entity = entity_path, key = ?record.key(), ?mode, "record saved");

                    return Ok(record);
                }
                Err(err) => err,
            };

            let regenerable = err
                .conflict_field(E::PRIMARY_KEY)
                .is_some_and(|field| generated.iter().any(|g| *g == field));
            if !regenerable || conflicts >= self.conflict_retries {
                return Err(err.into());
            }

            conflicts += 1;
            sink::record(MetricsEvent::WriteConflict { entity_path });
            warn!(
                entity = entity_path,
                attempt = conflicts,
                error = %err,
                "generated value rejected at write, regenerating"
            );
        }
    }

    // prepare
    // Resolve insert-vs-update, run field hooks, validate. Returns the mode
    // to write with and the fields generated on this attempt.
    fn prepare(
        &mut self,
        mode: SaveMode,
        record: &mut E,
    ) -> Result<(SaveMode, Vec<&'static str>), SaveError> {
        let model = self.model;
        let fields = model.fields();
        let (store, rng) = self.db.parts();

        let add = match mode {
            SaveMode::Insert => true,
            SaveMode::Update => false,
            SaveMode::Replace => match present(record.key()) {
                Some(key) => !store.contains_key(E::ENTITY_NAME, key)?,
                None => true,
            },
        };

        let mut ctx = SaveContext::new(add, &*store, rng);
        record.pre_save(fields, &mut ctx)?;
        let generated = ctx.into_generated();

        record.validate(fields)?;

        // a freshly generated key must never overwrite an existing row
        let write_mode = if mode == SaveMode::Replace && generated.contains(&E::PRIMARY_KEY) {
            SaveMode::Insert
        } else {
            mode
        };

        Ok((write_mode, generated))
    }
}
