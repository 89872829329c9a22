//! Examination centers where candidates sit their exams.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CatalogueEntity, CatalogueKind};
use crate::domain::schema::{
    FormattedErrors, Infer, InferFormattedError, Schema, SchemaField, code, optional_text,
    required_text,
};

const NAME_MAX: usize = 120;
const ADDRESS_MAX: usize = 255;

/// Raw examination center payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateExaminationCenterInput {
    pub name: Option<String>,
    pub code: Option<String>,
    pub address: Option<String>,
}

/// Validated examination center values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ExaminationCenterFields {
    pub name: String,
    pub code: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
}

/// Fields of [`CreateExaminationCenterInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ExaminationCenterField {
    Name,
    Code,
    Address,
}

impl SchemaField for ExaminationCenterField {
    fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Code => "code",
            Self::Address => "address",
        }
    }
}

/// Create schema for examination centers.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateExaminationCenterSchema;

impl Schema for CreateExaminationCenterSchema {
    type Input = CreateExaminationCenterInput;
    type Value = ExaminationCenterFields;
    type Field = ExaminationCenterField;

    fn parse(input: Self::Input) -> Result<Self::Value, FormattedErrors<Self::Field>> {
        let mut errors = FormattedErrors::new();
        let name = required_text(&mut errors, ExaminationCenterField::Name, input.name, NAME_MAX);
        let code = code(&mut errors, ExaminationCenterField::Code, input.code);
        let address = optional_text(
            &mut errors,
            ExaminationCenterField::Address,
            input.address,
            ADDRESS_MAX,
        );
        errors.into_result(|| ExaminationCenterFields {
            name,
            code,
            address,
        })
    }
}

/// Validated create payload for an examination center.
pub type CreateExaminationCenter = Infer<CreateExaminationCenterSchema>;
/// Formatted validation errors for an examination center payload.
pub type CreateExaminationCenterErrors = InferFormattedError<CreateExaminationCenterSchema>;

/// Catalogue marker for examination centers.
#[derive(Debug)]
pub enum ExaminationCenter {}

impl CatalogueEntity for ExaminationCenter {
    type Create = CreateExaminationCenterSchema;
    const KIND: CatalogueKind = CatalogueKind::ExaminationCenter;

    fn unique_key(values: &ExaminationCenterFields) -> &str {
        &values.code
    }
}
