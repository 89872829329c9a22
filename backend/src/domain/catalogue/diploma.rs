//! Diplomas awarded on completion of an examination track.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CatalogueEntity, CatalogueKind};
use crate::domain::schema::{
    FormattedErrors, Infer, InferFormattedError, Schema, SchemaField, optional_text, required_text,
};

const NAME_MAX: usize = 120;
const DESCRIPTION_MAX: usize = 500;

/// Raw diploma payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateDiplomaInput {
    pub name: Option<String>,
    pub description: Option<String>,
}

/// Validated diploma values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct DiplomaFields {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Fields of [`CreateDiplomaInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum DiplomaField {
    Name,
    Description,
}

impl SchemaField for DiplomaField {
    fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Description => "description",
        }
    }
}

/// Create schema for diplomas.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateDiplomaSchema;

impl Schema for CreateDiplomaSchema {
    type Input = CreateDiplomaInput;
    type Value = DiplomaFields;
    type Field = DiplomaField;

    fn parse(input: Self::Input) -> Result<Self::Value, FormattedErrors<Self::Field>> {
        let mut errors = FormattedErrors::new();
        let name = required_text(&mut errors, DiplomaField::Name, input.name, NAME_MAX);
        let description = optional_text(
            &mut errors,
            DiplomaField::Description,
            input.description,
            DESCRIPTION_MAX,
        );
        errors.into_result(|| DiplomaFields { name, description })
    }
}

/// Validated create payload for a diploma.
pub type CreateDiploma = Infer<CreateDiplomaSchema>;
/// Formatted validation errors for a diploma payload.
pub type CreateDiplomaErrors = InferFormattedError<CreateDiplomaSchema>;

/// Catalogue marker for diplomas.
#[derive(Debug)]
pub enum Diploma {}

impl CatalogueEntity for Diploma {
    type Create = CreateDiplomaSchema;
    const KIND: CatalogueKind = CatalogueKind::Diploma;

    fn unique_key(values: &DiplomaFields) -> &str {
        &values.name
    }
}
