
use crate::{
    config::{ConfigError, FieldOptions, ShortIdConfig},
    db::store::ExistenceCheck,
    field::{
        CharField, ColumnOptions, Field, FieldDeconstruction, FieldError, SaveContext, present,
    },
    form::FormField,
    generator::ShortIdGenerator,
    obs::sink::{self, MetricsEvent},
    traits::{EntityIdentity, FieldKey, HasSlot},
};
use rand::Rng;
use tracing::{debug, error, warn};

///
/// ShortIdField
///
/// Char column whose value is generated on save when the record carries
/// none. With `collision_check` enabled every candidate is tested against
/// the store before it is accepted, up to `max_retries` candidates.
///
/// The existence check and the write are separate operations, so two
/// concurrent saves can still pick the same candidate. The unique column
/// constraint turns that race into a write-time failure.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ShortIdField<K> {
    base: CharField<K>,
    config: ShortIdConfig,
    generator: ShortIdGenerator,
}

impl<K: FieldKey> ShortIdField<K> {
    // ======================================================================
    // Construction
    // ======================================================================

    /// Declare a field with default column options.
    pub fn try_new(config: ShortIdConfig) -> Result<Self, ConfigError> {
        Self::try_with_options(config, FieldOptions::default())
    }

    /// Declare a field with explicit column options.
    ///
    /// `max_length` defaults to the generated width. Auto fields default to
    /// `editable = false`, `blank = true` and `unique = true`.
    pub fn try_with_options(
        config: ShortIdConfig,
        mut options: FieldOptions,
    ) -> Result<Self, ConfigError> {
        let alphabet = config.validate()?;
        let width = config.width();

        let max_length = *options.max_length.get_or_insert(width);
        if max_length < width {
            return Err(ConfigError::MaxLengthTooSmall { max_length, width });
        }

        if config.auto {
            options.editable.get_or_insert(false);
            options.blank.get_or_insert(true);
            options.unique.get_or_insert(true);
        }

        let base = CharField::try_new(options)?;
        if config.auto && config.collision_check && !base.options().unique {
            return Err(ConfigError::UniqueRequired);
        }

        let generator = ShortIdGenerator::new(config.prefix.clone(), config.length, alphabet);

        Ok(Self {
            base,
            config,
            generator,
        })
    }

    /// Rebuild a field from its deconstruction.
    pub fn reconstruct(parts: &FieldDeconstruction) -> Result<Self, ConfigError> {
        parts.check(Self::PATH, K::NAME)?;

        let config = parts.config.clone().unwrap_or_default();

        Self::try_with_options(config, parts.options.clone())
    }

    // ======================================================================
    // Accessors
    // ======================================================================

    #[must_use]
    pub const fn config(&self) -> &ShortIdConfig {
        &self.config
    }

    #[must_use]
    pub const fn generator(&self) -> &ShortIdGenerator {
        &self.generator
    }

    #[must_use]
    pub fn width(&self) -> usize {
        self.generator.width()
    }

    // ======================================================================
    // Generation
    // ======================================================================

    /// One candidate from the thread-local RNG. No store access.
    #[must_use]
    pub fn generate_candidate(&self) -> String {
        self.generator.generate()
    }

    /// Generate a value for entity `E`, checking the store when configured.
    pub fn generate_unique<E, R>(
        &self,
        store: &dyn ExistenceCheck,
        rng: &mut R,
    ) -> Result<String, FieldError>
    where
        E: EntityIdentity,
        R: Rng + ?Sized,
    {
        let entity = E::ENTITY_NAME;
        let field = K::NAME;

        if !self.config.collision_check {
            let value = self.generator.generate_with(rng);
            sink::record(MetricsEvent::CandidateGenerated {
                entity_path: entity,
            });
            debug!(entity, field, %value, "generated unchecked id");

            return Ok(value);
        }

        for attempt in 1..=self.config.max_retries {
            let candidate = self.generator.generate_with(rng);
            sink::record(MetricsEvent::CandidateGenerated {
                entity_path: entity,
            });
            sink::record(MetricsEvent::ExistsQuery {
                entity_path: entity,
            });

            if !store.exists(entity, field, &candidate)? {
                debug!(entity, field, attempt, value = %candidate, "generated unique id");

                return Ok(candidate);
            }

            sink::record(MetricsEvent::Collision {
                entity_path: entity,
            });
            warn!(entity, field, attempt, value = %candidate, "id collision, retrying");
        }

        sink::record(MetricsEvent::Exhausted {
            entity_path: entity,
        });
        error!(
            entity,
            field,
            attempts = self.config.max_retries,
            "id generation exhausted"
        );

        Err(FieldError::GenerationExhausted {
            entity,
            field,
            attempts: self.config.max_retries,
        })
    }

    /// Return the record's value, generating and storing one if it is empty.
    pub fn assign_if_absent<E>(
        &self,
        record: &mut E,
        store: &dyn ExistenceCheck,
    ) -> Result<String, FieldError>
    where
        E: EntityIdentity + HasSlot<K>,
    {
        self.assign_if_absent_with(record, store, &mut rand::rng())
    }

    /// `assign_if_absent` with a caller-supplied RNG.
    pub fn assign_if_absent_with<E, R>(
        &self,
        record: &mut E,
        store: &dyn ExistenceCheck,
        rng: &mut R,
    ) -> Result<String, FieldError>
    where
        E: EntityIdentity + HasSlot<K>,
        R: Rng + ?Sized,
    {
        if let Some(value) = present(record.slot()) {
            return Ok(value.to_string());
        }

        let value = self.generate_unique::<E, R>(store, rng)?;
        record.set_slot(value.clone());

        Ok(value)
    }
}

impl<K: FieldKey> Field for ShortIdField<K> {
    type Key = K;

    const PATH: &'static str = "shortid::field::ShortIdField";

    fn declared(&self) -> &FieldOptions {
        self.base.declared()
    }

    fn options(&self) -> &ColumnOptions {
        self.base.options()
    }

    fn before_save<E>(
        &self,
        record: &mut E,
        ctx: &mut SaveContext<'_>,
    ) -> Result<Option<String>, FieldError>
    where
        E: EntityIdentity + HasSlot<Self::Key>,
    {
        if !self.config.auto {
            return self.base.before_save(record, ctx);
        }
        if let Some(value) = present(record.slot()) {
            return Ok(Some(value.to_string()));
        }

        let (store, rng) = ctx.parts();
        let value = self.assign_if_absent_with(record, store, rng)?;
        ctx.mark_generated(K::NAME);

        Ok(Some(value))
    }

    fn render_form(&self, value: Option<&str>) -> FormField {
        let form = self.base.render_form(value);

        // auto values are shown but never accepted back from a form
        if self.config.auto {
            form.disabled(true).required(false)
        } else {
            form
        }
    }

    fn deconstruct(&self) -> FieldDeconstruction {
        FieldDeconstruction {
            name: K::NAME.to_string(),
            path: Self::PATH.to_string(),
            options: self.declared().clone(),
            config: Some(self.config.clone()),
        }
    }
}
