//! Grades a candidate can be awarded, ordered by rank.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::{CatalogueEntity, CatalogueKind};
use crate::domain::schema::{
    FormattedErrors, Infer, InferFormattedError, Schema, SchemaField, bounded_integer,
    required_text,
};

const NAME_MAX: usize = 120;
/// Lowest accepted grade rank.
pub const RANK_MIN: i32 = 0;
/// Highest accepted grade rank.
pub const RANK_MAX: i32 = 100;

/// Raw grade payload.
#[derive(Debug, Clone, Default, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateGradeInput {
    pub name: Option<String>,
    pub rank: Option<i64>,
}

/// Validated grade values.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradeFields {
    pub name: String,
    pub rank: i32,
}

/// Fields of [`CreateGradeInput`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum GradeField {
    Name,
    Rank,
}

impl SchemaField for GradeField {
    fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Rank => "rank",
        }
    }
}

/// Create schema for grades.
#[derive(Debug, Clone, Copy, Default)]
pub struct CreateGradeSchema;

impl Schema for CreateGradeSchema {
    type Input = CreateGradeInput;
    type Value = GradeFields;
    type Field = GradeField;

    fn parse(input: Self::Input) -> Result<Self::Value, FormattedErrors<Self::Field>> {
        let mut errors = FormattedErrors::new();
        let name = required_text(&mut errors, GradeField::Name, input.name, NAME_MAX);
        let rank = bounded_integer(&mut errors, GradeField::Rank, input.rank, RANK_MIN, RANK_MAX);
        errors.into_result(|| GradeFields { name, rank })
    }
}

/// Validated create payload for a grade.
pub type CreateGrade = Infer<CreateGradeSchema>;
/// Formatted validation errors for a grade payload.
pub type CreateGradeErrors = InferFormattedError<CreateGradeSchema>;

/// Catalogue marker for grades.
#[derive(Debug)]
pub enum Grade {}

impl CatalogueEntity for Grade {
    type Create = CreateGradeSchema;
    const KIND: CatalogueKind = CatalogueKind::Grade;

    fn unique_key(values: &GradeFields) -> &str {
        &values.name
    }
}
