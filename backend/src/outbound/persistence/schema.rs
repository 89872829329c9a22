//! Diesel table definitions for the PostgreSQL schema.
//!
//! These definitions must match the database migrations exactly. They are used
//! by Diesel for compile-time query validation and type-safe SQL generation.
//!
//! # Maintenance
//!
//! When migrations change the schema, this file should be regenerated or
//! manually updated to reflect those changes. The `diesel print-schema`
//! command can generate these definitions from a live database.

diesel::table! {
    /// Registry user accounts.
    ///
    /// `email` is unique and stored lower-cased; `role` is `USER` or `ADMIN`
    /// (enforced by a CHECK constraint).
    users (id) {
        id -> Uuid,
        email -> Varchar,
        display_name -> Varchar,
        role -> Varchar,
        /// Argon2 PHC string.
        password_hash -> Text,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Diplomas; `name` is unique.
    diplomas (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Divisions; `code` is unique.
    divisions (id) {
        id -> Uuid,
        name -> Varchar,
        code -> Varchar,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Examination centers; `code` is unique.
    examination_centers (id) {
        id -> Uuid,
        name -> Varchar,
        code -> Varchar,
        address -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Grades; `name` is unique and `rank` lies in 0..=100.
    grades (id) {
        id -> Uuid,
        name -> Varchar,
        rank -> Int4,
        created_at -> Timestamptz,
    }
}

diesel::table! {
    /// Release types; `name` is unique.
    release_types (id) {
        id -> Uuid,
        name -> Varchar,
        description -> Nullable<Varchar>,
        created_at -> Timestamptz,
    }
}
