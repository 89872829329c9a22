//! Release types describing how results are published.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CatalogueEntity, CatalogueKind};
use crate::domain::schema::{
    FormattedErrors, Infer, InferFormattedError, Schema, SchemaField, optional_text, required_text,
};

const NAME_MAX: usize = 120;
const DESCRIPTION_MAX: usize = 500;

/// Raw release type payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReleaseTypeInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Validated release type values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseTypeFields {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields of [`CreateReleaseTypeInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ReleaseTypeField {
    Name,
    Description,
}

impl SchemaField for ReleaseTypeField {
    fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
        }
    }
}

/// Create schema for release types.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateReleaseTypeSchema;

impl Schema for CreateReleaseTypeSchema {
    type Input = CreateReleaseTypeInput;
    type Value = ReleaseTypeFields;
    type Field = ReleaseTypeField;

    fn parse(input: Self::Input) -> Result<Self::Value, FormattedErrors<Self::Field>> {
        let mut errors = FormattedErrors::new();
        let name = required_text(&mut errors, ReleaseTypeField::Name, input.name, NAME_MAX);
        let description = optional_text(
            &mut errors,
            ReleaseTypeField::Description,
            input.description,
            DESCRIPTION_MAX,
        );
        errors.into_result(|| ReleaseTypeFields { name, description })
    }
}

/// Validated create payload for a release type.
pub type CreateReleaseType = Infer<CreateReleaseTypeSchema>;
/// Formatted validation errors for a release type payload.
pub type CreateReleaseTypeErrors = InferFormattedError<CreateReleaseTypeSchema>;

/// Catalogue marker for release types.
#[derive(Debug)]
pub enum ReleaseType {}

impl CatalogueEntity for ReleaseType {
    type Create = CreateReleaseTypeSchema;
    const KIND: CatalogueKind = CatalogueKind::ReleaseType;

    fn unique_key(values: &ReleaseTypeFields) -> &str {
        &values.name
    }
}
