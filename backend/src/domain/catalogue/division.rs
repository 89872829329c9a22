//! Divisions grouping examinations (for example by subject area).

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CatalogueEntity, CatalogueKind};
use crate::domain::schema::{
    FormattedErrors, Infer, InferFormattedError, Schema, SchemaField, code, required_text,
};

const NAME_MAX: usize = 120;

/// Raw division payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDivisionInput {
    pub name: Option<String>,
    pub code: Option<String>,
}

/// Validated division values. `code` is upper-cased and unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DivisionFields {
    pub name: String,
    pub code: String,
}

/// Fields of [`CreateDivisionInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DivisionField {
    Name,
    Code,
}

impl SchemaField for DivisionField {
    fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Code => "code",
        }
    }
}

/// Create schema for divisions.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateDivisionSchema;

impl Schema for CreateDivisionSchema {
    type Input = CreateDivisionInput;
    type Value = DivisionFields;
    type Field = DivisionField;

    fn parse(input: Self::Input) -> Result<Self::Value, FormattedErrors<Self::Field>> {
        let mut errors = FormattedErrors::new();
        let name = required_text(&mut errors, DivisionField::Name, input.name, NAME_MAX);
        let code = code(&mut errors, DivisionField::Code, input.code);
        errors.into_result(|| DivisionFields { name, code })
    }
}

/// Validated create payload for a division.
pub type CreateDivision = Infer<CreateDivisionSchema>;
/// Formatted validation errors for a division payload.
pub type CreateDivisionErrors = InferFormattedError<CreateDivisionSchema>;

/// Catalogue marker for divisions.
#[derive(Debug)]
pub enum Division {}

impl CatalogueEntity for Division {
    type Create = CreateDivisionSchema;
    const KIND: CatalogueKind = CatalogueKind::Division;

    fn unique_key(values: &DivisionFields) -> &str {
        &values.code
    }
}
