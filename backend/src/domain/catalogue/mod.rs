//! Reference catalogue managed by administrators.
//!
//! Five entity kinds share the same lifecycle (list, read, create, replace,
//! delete) and differ only in their create schema. Each kind is a marker type
//! implementing [`CatalogueEntity`]; persistence and HTTP adapters are generic
//! over it.

mod diploma;
mod division;
mod examination_center;
mod grade;
mod release_type;

use std::fmt;

use chrono::{DateTime, Utc};
use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

use super::schema::{Infer, Schema};

pub use diploma::{
    CreateDiploma, CreateDiplomaErrors, CreateDiplomaInput, CreateDiplomaSchema, Diploma,
    DiplomaField, DiplomaFields,
};
pub use division::{
    CreateDivision, CreateDivisionErrors, CreateDivisionInput, CreateDivisionSchema, Division,
    DivisionField, DivisionFields,
};
pub use examination_center::{
    CreateExaminationCenter, CreateExaminationCenterErrors, CreateExaminationCenterInput,
    CreateExaminationCenterSchema, ExaminationCenter, ExaminationCenterField,
    ExaminationCenterFields,
};
pub use grade::{
    CreateGrade, CreateGradeErrors, CreateGradeInput, CreateGradeSchema, Grade, GradeField,
    GradeFields,
};
pub use release_type::{
    CreateReleaseType, CreateReleaseTypeErrors, CreateReleaseTypeInput, CreateReleaseTypeSchema,
    ReleaseType, ReleaseTypeField, ReleaseTypeFields,
};

/// The catalogue entity kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CatalogueKind {
    Diploma,
    Division,
    ExaminationCenter,
    Grade,
    ReleaseType,
}

impl CatalogueKind {
    /// Every kind, in mounting order.
    pub const ALL: [Self; 5] = [
        Self::Diploma,
        Self::Division,
        Self::ExaminationCenter,
        Self::Grade,
        Self::ReleaseType,
    ];

    /// Collection path segment under `/api/v1`.
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Diploma => "diplomas",
            Self::Division => "divisions",
            Self::ExaminationCenter => "examination-centers",
            Self::Grade => "grades",
            Self::ReleaseType => "release-types",
        }
    }

    /// Human readable singular label used in messages.
    pub const fn label(self) -> &'static str {
        match self {
            Self::Diploma => "diploma",
            Self::Division => "division",
            Self::ExaminationCenter => "examination center",
            Self::Grade => "grade",
            Self::ReleaseType => "release type",
        }
    }
}

impl fmt::Display for CatalogueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Marker trait tying a catalogue kind to its create schema.
pub trait CatalogueEntity: Send + Sync + 'static {
    /// Schema validating create and replace payloads.
    type Create: Schema;
    /// Kind discriminator.
    const KIND: CatalogueKind;

    /// Value that must be unique across records of this kind.
    fn unique_key(values: &EntityValues<Self>) -> &str;
}

/// Validated field values of entity `E`.
pub type EntityValues<E> = Infer<<E as CatalogueEntity>::Create>;

/// Stored catalogue record of entity `E`.
pub type RecordOf<E> = CatalogueRecord<EntityValues<E>>;

/// Stored catalogue record: identity, creation time and validated values.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CatalogueRecord<V> {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub values: V,
}

impl<V> CatalogueRecord<V> {
    /// Assemble a record from stored parts.
    pub fn new(id: Uuid, created_at: DateTime<Utc>, values: V) -> Self {
        Self {
            id,
            created_at,
            values,
        }
    }
}
