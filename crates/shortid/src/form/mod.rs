//! Form-field descriptors for editable record views.
//!
//! A disabled field still renders its value; `clean` refuses to accept a
//! changed value for it. This is a presentation guard only, the store
//! constraints remain the enforcement boundary.


use crate::field::{ColumnOptions, ValidationError, present};
use serde::Serialize;

///
/// Widget
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Widget {
    TextInput { max_length: usize },
}

///
/// FormField
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FormField {
    pub name: &'static str,
    pub label: String,
    pub value: Option<String>,
    pub widget: Widget,
    pub required: bool,
    pub disabled: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub help_text: Option<String>,
}

impl FormField {
    /// Text input for a char column holding `value`.
    #[must_use]
    pub fn for_column(name: &'static str, options: &ColumnOptions, value: Option<&str>) -> Self {
        let label = options
            .verbose_name
            .clone()
            .unwrap_or_else(|| label_from_name(name));

        Self {
            name,
            label,
            value: value.map(ToOwned::to_owned),
            widget: Widget::TextInput {
                max_length: options.max_length,
            },
            required: !options.blank,
            disabled: false,
            help_text: options.help_text.clone(),
        }
    }

    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    #[must_use]
    pub const fn required(mut self, required: bool) -> Self {
        self.required = required;
        self
    }

    /// Clean one submitted value.
    ///
    /// Disabled fields keep their rendered value: an absent or identical
    /// submission yields it, anything else is rejected.
    pub fn clean(&self, submitted: Option<&str>) -> Result<Option<String>, ValidationError> {
        let submitted = present(submitted.map(str::trim));

        if self.disabled {
            return match submitted {
                None => Ok(self.value.clone()),
                Some(v) if Some(v) == self.value.as_deref() => Ok(self.value.clone()),
                Some(_) => Err(ValidationError::ReadOnly { field: self.name }),
            };
        }

        let Some(value) = submitted else {
            return if self.required {
                Err(ValidationError::Blank { field: self.name })
            } else {
                Ok(None)
            };
        };

        let Widget::TextInput { max_length } = self.widget;
        let len = value.chars().count();
        if len > max_length {
            return Err(ValidationError::TooLong {
                field: self.name,
                max: max_length,
                len,
            });
        }

        Ok(Some(value.to_string()))
    }
}

// label_from_name
// "created_at" -> "Created at"
fn label_from_name(name: &str) -> String {
    let spaced = name.replace('_', " ");
    let mut chars = spaced.chars();

    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
