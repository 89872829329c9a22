//! Internal Diesel row structs for database operations.
//!
//! These types are implementation details of the persistence layer and must
//! never be exposed to the domain. They exist solely to satisfy Diesel's
//! type requirements for queries and mutations.

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use uuid::Uuid;

use crate::domain::catalogue::{
    CatalogueRecord, DiplomaFields, DivisionFields, ExaminationCenterFields, GradeFields,
    ReleaseTypeFields,
};

use super::schema::{diplomas, divisions, examination_centers, grades, release_types, users};

// ---------------------------------------------------------------------------
// User models
// ---------------------------------------------------------------------------

/// Row struct for reading from the users table.
#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct UserRow {
    pub id: Uuid,
    pub email: String,
    pub display_name: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

/// Insertable struct for creating new user records.
#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = users)]
pub(crate) struct NewUserRow<'a> {
    pub id: Uuid,
    pub email: &'a str,
    pub display_name: &'a str,
    pub role: &'a str,
    pub password_hash: &'a str,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Catalogue models
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = diplomas)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DiplomaRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = diplomas)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct DiplomaValues<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> DiplomaValues<'a> {
    pub fn new(id: Uuid, fields: &'a DiplomaFields) -> Self {
        Self {
            id,
            name: &fields.name,
            description: fields.description.as_deref(),
        }
    }
}

impl From<DiplomaRow> for CatalogueRecord<DiplomaFields> {
    fn from(row: DiplomaRow) -> Self {
        Self::new(
            row.id,
            row.created_at,
            DiplomaFields {
                name: row.name,
                description: row.description,
            },
        )
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = divisions)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct DivisionRow {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = divisions)]
pub(crate) struct DivisionValues<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub code: &'a str,
}

impl<'a> DivisionValues<'a> {
    pub fn new(id: Uuid, fields: &'a DivisionFields) -> Self {
        Self {
            id,
            name: &fields.name,
            code: &fields.code,
        }
    }
}

impl From<DivisionRow> for CatalogueRecord<DivisionFields> {
    fn from(row: DivisionRow) -> Self {
        Self::new(
            row.id,
            row.created_at,
            DivisionFields {
                name: row.name,
                code: row.code,
            },
        )
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = examination_centers)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ExaminationCenterRow {
    pub id: Uuid,
    pub name: String,
    pub code: String,
    pub address: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = examination_centers)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ExaminationCenterValues<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub code: &'a str,
    pub address: Option<&'a str>,
}

impl<'a> ExaminationCenterValues<'a> {
    pub fn new(id: Uuid, fields: &'a ExaminationCenterFields) -> Self {
        Self {
            id,
            name: &fields.name,
            code: &fields.code,
            address: fields.address.as_deref(),
        }
    }
}

impl From<ExaminationCenterRow> for CatalogueRecord<ExaminationCenterFields> {
    fn from(row: ExaminationCenterRow) -> Self {
        Self::new(
            row.id,
            row.created_at,
            ExaminationCenterFields {
                name: row.name,
                code: row.code,
                address: row.address,
            },
        )
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = grades)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct GradeRow {
    pub id: Uuid,
    pub name: String,
    pub rank: i32,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = grades)]
pub(crate) struct GradeValues<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub rank: i32,
}

impl<'a> GradeValues<'a> {
    pub fn new(id: Uuid, fields: &'a GradeFields) -> Self {
        Self {
            id,
            name: &fields.name,
            rank: fields.rank,
        }
    }
}

impl From<GradeRow> for CatalogueRecord<GradeFields> {
    fn from(row: GradeRow) -> Self {
        Self::new(
            row.id,
            row.created_at,
            GradeFields {
                name: row.name,
                rank: row.rank,
            },
        )
    }
}

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = release_types)]
#[diesel(check_for_backend(diesel::pg::Pg))]
pub(crate) struct ReleaseTypeRow {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Insertable, AsChangeset)]
#[diesel(table_name = release_types)]
#[diesel(treat_none_as_null = true)]
pub(crate) struct ReleaseTypeValues<'a> {
    pub id: Uuid,
    pub name: &'a str,
    pub description: Option<&'a str>,
}

impl<'a> ReleaseTypeValues<'a> {
    pub fn new(id: Uuid, fields: &'a ReleaseTypeFields) -> Self {
        Self {
            id,
            name: &fields.name,
            description: fields.description.as_deref(),
        }
    }
}

impl From<ReleaseTypeRow> for CatalogueRecord<ReleaseTypeFields> {
    fn from(row: ReleaseTypeRow) -> Self {
        Self::new(
            row.id,
            row.created_at,
            ReleaseTypeFields {
                name: row.name,
                description: row.description,
            },
        )
    }
}
