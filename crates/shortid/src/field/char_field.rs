use crate::{
    config::{ConfigError, FieldOptions},
    field::{ColumnOptions, Field, FieldDeconstruction},
    traits::FieldKey,
};
use std::marker::PhantomData;

///
/// CharField
///
/// Bounded string column with no save-time behavior of its own.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct CharField<K> {
    declared: FieldOptions,
    options: ColumnOptions,
    _marker: PhantomData<fn() -> K>,
}

impl<K: FieldKey> CharField<K> {
    pub fn try_new(declared: FieldOptions) -> Result<Self, ConfigError> {
        let options = ColumnOptions::resolve(&declared)?;

        Ok(Self {
            declared,
            options,
            _marker: PhantomData,
        })
    }

    /// Rebuild a field from its deconstruction.
    pub fn reconstruct(parts: &FieldDeconstruction) -> Result<Self, ConfigError> {
        parts.check(Self::PATH, K::NAME)?;

        Self::try_new(parts.options.clone())
    }
}

impl<K: FieldKey> Field for CharField<K> {
    type Key = K;

    const PATH: &'static str = "shortid::field::CharField";

    fn declared(&self) -> &FieldOptions {
        &self.declared
    }

    fn options(&self) -> &ColumnOptions {
        &self.options
    }
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::ValidationError;

    crate::field_key!(Title => "title");

    fn title(max_length: usize) -> CharField<Title> {
        CharField::try_new(FieldOptions::new().max_length(max_length)).unwrap()
    }

    #[test]
    fn requires_max_length() {
        let err = CharField::<Title>::try_new(FieldOptions::new()).unwrap_err();
        assert_eq!(err, ConfigError::MissingMaxLength);

        let err = CharField::<Title>::try_new(FieldOptions::new().max_length(0)).unwrap_err();
        assert_eq!(err, ConfigError::MissingMaxLength);
    }

    #[test]
    fn base_defaults() {
        let field = title(100);
        let options = field.options();

        assert_eq!(field.name(), "title");
        assert!(options.editable);
        assert!(!options.blank);
        assert!(!options.unique);
    }

    #[test]
    fn primary_key_implies_unique() {
        let field =
            CharField::<Title>::try_new(FieldOptions::new().max_length(8).primary_key(true))
                .unwrap();

        assert!(field.options().unique);
        assert!(field.column().primary_key);
    }

    #[test]
    fn validate_counts_chars() {
        let field = title(3);

        assert!(field.validate(Some("äöü")).is_ok());
        assert_eq!(
            field.validate(Some("abcd")),
            Err(ValidationError::TooLong {
                field: "title",
                max: 3,
                len: 4
            })
        );
    }

    #[test]
    fn validate_blank_rules() {
        let field = title(10);
        assert_eq!(
            field.validate(Some("")),
            Err(ValidationError::Blank { field: "title" })
        );
        assert_eq!(
            field.validate(None),
            Err(ValidationError::Blank { field: "title" })
        );

        let blankable =
            CharField::<Title>::try_new(FieldOptions::new().max_length(10).blank(true)).unwrap();
        assert!(blankable.validate(None).is_ok());
    }

    #[test]
    fn renders_editable_text_input() {
        let form = title(100).render_form(Some("hello"));

        assert!(!form.disabled);
        assert!(form.required);
        assert_eq!(form.value.as_deref(), Some("hello"));
        assert_eq!(form.label, "Title");
    }

    #[test]
    fn deconstruct_roundtrip() {
        let field =
            CharField::<Title>::try_new(FieldOptions::new().max_length(40).db_index(true))
                .unwrap();

        let parts = field.deconstruct();
        assert_eq!(parts.path, "shortid::field::CharField");
        assert_eq!(parts.config, None);

        let rebuilt = CharField::<Title>::reconstruct(&parts).unwrap();
        assert_eq!(rebuilt, field);
    }

    #[test]
    fn reconstruct_rejects_foreign_name() {
        crate::field_key!(Other => "other");

        let parts = title(10).deconstruct();
        let err = CharField::<Other>::reconstruct(&parts).unwrap_err();

        assert!(matches!(err, ConfigError::NameMismatch { .. }));
    }
}
