//! Validation schemas and the types projected from them.
//!
//! A [`Schema`] turns a loosely typed input (every field optional, as it
//! arrives from JSON) into a validated value, or into [`FormattedErrors`]
//! listing every failing field. Entity modules then project two aliases from
//! their schema:
//!
//! ```
//! use exam_registry::domain::catalogue::CreateGradeSchema;
//! use exam_registry::domain::schema::{Infer, InferFormattedError};
//!
//! type GradeValues = Infer<CreateGradeSchema>;
//! type GradeErrors = InferFormattedError<CreateGradeSchema>;
//! ```

use std::collections::BTreeMap;
use std::fmt;
use std::sync::OnceLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

/// A named field of a schema's input.
pub trait SchemaField: Copy + Ord + fmt::Debug + Send + Sync + 'static {
    /// Wire name of the field (camelCase, as in the JSON input).
    fn as_str(self) -> &'static str;
}

/// Runtime-checked data shape.
pub trait Schema: Send + Sync + 'static {
    /// Raw input accepted from callers.
    type Input: DeserializeOwned + Send + 'static;
    /// Validated value produced on success.
    type Value: Clone + fmt::Debug + PartialEq + Serialize + Send + Sync + 'static;
    /// Fields that may carry errors.
    type Field: SchemaField;

    /// Validate `input`, collecting every failing field.
    fn parse(input: Self::Input) -> Result<Self::Value, FormattedErrors<Self::Field>>;
}

/// Validated value type of a schema.
pub type Infer<S> = <S as Schema>::Value;

/// Formatted error type of a schema.
pub type InferFormattedError<S> = FormattedErrors<<S as Schema>::Field>;

/// Collected validation issues, grouped by field.
///
/// Serialises as `{"_errors": [...], "<field>": {"_errors": [...]}}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedErrors<F: SchemaField> {
    form: Vec<String>,
    fields: BTreeMap<F, Vec<String>>,
}

impl<F: SchemaField> Default for FormattedErrors<F> {
    fn default() -> Self {
        Self {
            form: Vec::new(),
            fields: BTreeMap::new(),
        }
    }
}

impl<F: SchemaField> FormattedErrors<F> {
    /// Empty error set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an issue against `field`.
    pub fn push(&mut self, field: F, message: impl Into<String>) {
        self.fields.entry(field).or_default().push(message.into());
    }

    /// Record an issue that is not tied to a single field.
    pub fn push_form(&mut self, message: impl Into<String>) {
        self.form.push(message.into());
    }

    /// Whether no issue was recorded.
    pub fn is_empty(&self) -> bool {
        self.form.is_empty() && self.fields.is_empty()
    }

    /// Issues recorded against `field`.
    pub fn field(&self, field: F) -> &[String] {
        self.fields.get(&field).map_or(&[], Vec::as_slice)
    }

    /// Issues not tied to a field.
    pub fn form(&self) -> &[String] {
        &self.form
    }

    /// Fields that carry at least one issue, in declaration order.
    pub fn failing_fields(&self) -> impl Iterator<Item = F> + '_ {
        self.fields.keys().copied()
    }

    /// Return `value` when empty, `self` otherwise.
    pub fn into_result<T>(self, value: impl FnOnce() -> T) -> Result<T, Self> {
        if self.is_empty() {
            Ok(value())
        } else {
            Err(self)
        }
    }
}

#[derive(Serialize)]
struct Issues<'a> {
    #[serde(rename = "_errors")]
    errors: &'a [String],
}

impl<F: SchemaField> Serialize for FormattedErrors<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len() + 1))?;
        map.serialize_entry("_errors", &self.form)?;
        for (field, errors) in &self.fields {
            map.serialize_entry(field.as_str(), &Issues { errors })?;
        }
        map.end()
    }
}

/// Message recorded for a missing or blank required field.
pub const REQUIRED: &str = "Required";

/// Trim a required text field, recording an error when missing, blank or too long.
pub fn required_text<F: SchemaField>(
    errors: &mut FormattedErrors<F>,
    field: F,
    raw: Option<String>,
    max: usize,
) -> String {
    let trimmed = raw.as_deref().map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        errors.push(field, REQUIRED);
    } else if trimmed.chars().count() > max {
        errors.push(field, format!("Must be at most {max} characters"));
    }
    trimmed.to_owned()
}

/// Trim an optional text field; blank input collapses to `None`.
pub fn optional_text<F: SchemaField>(
    errors: &mut FormattedErrors<F>,
    field: F,
    raw: Option<String>,
    max: usize,
) -> Option<String> {
    let trimmed = raw.as_deref().map(str::trim).filter(|value| !value.is_empty())?;
    if trimmed.chars().count() > max {
        errors.push(field, format!("Must be at most {max} characters"));
    }
    Some(trimmed.to_owned())
}

/// Maximum length of a short reference code.
pub const CODE_MAX: usize = 16;

static CODE_RE: OnceLock<Regex> = OnceLock::new();

fn code_regex() -> &'static Regex {
    CODE_RE.get_or_init(|| {
        Regex::new("^[A-Z0-9-]+$")
            .unwrap_or_else(|error| panic!("code regex failed to compile: {error}"))
    })
}

/// Upper-case a short reference code and check its alphabet.
pub fn code<F: SchemaField>(errors: &mut FormattedErrors<F>, field: F, raw: Option<String>) -> String {
    let value = required_text(errors, field, raw, CODE_MAX).to_uppercase();
    if !value.is_empty() && !code_regex().is_match(&value) {
        errors.push(field, "May only contain letters, digits and hyphens");
    }
    value
}

/// Check an integer lies within `min..=max`.
pub fn bounded_integer<F: SchemaField>(
    errors: &mut FormattedErrors<F>,
    field: F,
    raw: Option<i64>,
    min: i32,
    max: i32,
) -> i32 {
    match raw.map(i32::try_from) {
        None => {
            errors.push(field, REQUIRED);
            min
        }
        Some(Ok(value)) if (min..=max).contains(&value) => value,
        Some(_) => {
            errors.push(field, format!("Must be between {min} and {max}"));
            min
        }
    }
}
