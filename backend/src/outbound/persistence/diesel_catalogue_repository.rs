//! PostgreSQL-backed catalogue CRUD adapter.
//!
//! A single repository value serves all five kinds; the per-kind
//! `CatalogueRepository` impls are generated by `impl_catalogue_repository!`
//! since they differ only in table, row and value types.

use async_trait::async_trait;
use diesel::prelude::*;
use diesel_async::RunQueryDsl;
use uuid::Uuid;

use crate::domain::catalogue::{
    Diploma, Division, EntityValues, ExaminationCenter, Grade, RecordOf, ReleaseType,
};
use crate::domain::ports::{CatalogueRepository, CatalogueRepositoryError};

use super::diesel_basic_error_mapping::{
    map_basic_diesel_error, map_basic_pool_error, map_write_diesel_error,
};
use super::models::{
    DiplomaRow, DiplomaValues, DivisionRow, DivisionValues, ExaminationCenterRow,
    ExaminationCenterValues, GradeRow, GradeValues, ReleaseTypeRow, ReleaseTypeValues,
};
use super::pool::{DbPool, PoolError};
use super::schema::{diplomas, divisions, examination_centers, grades, release_types};

/// Diesel-backed implementation of the catalogue port for every kind.
#[derive(Clone)]
pub struct DieselCatalogueRepository {
    pool: DbPool,
}

impl DieselCatalogueRepository {
    /// Create a new repository with the given connection pool.
    ///
    /// # Examples
    ///
    /// ```rust,ignore
    /// let config = PoolConfig::new("postgres://localhost/registry");
    /// let pool = DbPool::new(config).await?;
    /// let repo = DieselCatalogueRepository::new(pool);
    /// ```
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }
}

fn map_pool_error(error: PoolError) -> CatalogueRepositoryError {
    map_basic_pool_error(error, CatalogueRepositoryError::connection)
}

fn map_read_error(error: diesel::result::Error) -> CatalogueRepositoryError {
    map_basic_diesel_error(
        error,
        CatalogueRepositoryError::query,
        CatalogueRepositoryError::connection,
    )
}

fn map_write_error(error: diesel::result::Error) -> CatalogueRepositoryError {
    map_write_diesel_error(
        error,
        CatalogueRepositoryError::query,
        CatalogueRepositoryError::connection,
        |constraint| CatalogueRepositoryError::duplicate(format!("violates {constraint}")),
    )
}

macro_rules! impl_catalogue_repository {
    ($($entity:ty => { table: $table:ident, row: $row:ty, values: $values:ident }),+ $(,)?) => {
        $(
            #[async_trait]
            impl CatalogueRepository<$entity> for DieselCatalogueRepository {
                async fn list(&self) -> Result<Vec<RecordOf<$entity>>, CatalogueRepositoryError> {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let rows: Vec<$row> = $table::table
                        .select(<$row>::as_select())
                        .order_by(($table::created_at.asc(), $table::id.asc()))
                        .load(&mut conn)
                        .await
                        .map_err(map_read_error)?;
                    Ok(rows.into_iter().map(Into::into).collect())
                }

                async fn find(
                    &self,
                    id: Uuid,
                ) -> Result<Option<RecordOf<$entity>>, CatalogueRepositoryError> {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let row: Option<$row> = $table::table
                        .find(id)
                        .select(<$row>::as_select())
                        .first(&mut conn)
                        .await
                        .optional()
                        .map_err(map_read_error)?;
                    Ok(row.map(Into::into))
                }

                async fn create(
                    &self,
                    values: EntityValues<$entity>,
                ) -> Result<RecordOf<$entity>, CatalogueRepositoryError> {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let row: $row = diesel::insert_into($table::table)
                        .values(&$values::new(Uuid::new_v4(), &values))
                        .returning(<$row>::as_returning())
                        .get_result(&mut conn)
                        .await
                        .map_err(map_write_error)?;
                    Ok(row.into())
                }

                async fn replace(
                    &self,
                    id: Uuid,
                    values: EntityValues<$entity>,
                ) -> Result<Option<RecordOf<$entity>>, CatalogueRepositoryError> {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let row: Option<$row> = diesel::update($table::table.find(id))
                        .set(&$values::new(id, &values))
                        .returning(<$row>::as_returning())
                        .get_result(&mut conn)
                        .await
                        .optional()
                        .map_err(map_write_error)?;
                    Ok(row.map(Into::into))
                }

                async fn delete(&self, id: Uuid) -> Result<bool, CatalogueRepositoryError> {
                    let mut conn = self.pool.get().await.map_err(map_pool_error)?;
                    let affected = diesel::delete($table::table.find(id))
                        .execute(&mut conn)
                        .await
                        .map_err(map_read_error)?;
                    Ok(affected > 0)
                }
            }
        )+
    };
}

impl_catalogue_repository! {
    Diploma => { table: diplomas, row: DiplomaRow, values: DiplomaValues },
    Division => { table: divisions, row: DivisionRow, values: DivisionValues },
    ExaminationCenter => {
        table: examination_centers,
        row: ExaminationCenterRow,
        values: ExaminationCenterValues
    },
    Grade => { table: grades, row: GradeRow, values: GradeValues },
    ReleaseType => { table: release_types, row: ReleaseTypeRow, values: ReleaseTypeValues },
}

#[cfg(test)]
mod tests {
    //! Statement-shape coverage; no database required.
    use diesel::pg::Pg;

    use super::*;
    use crate::domain::catalogue::{DiplomaFields, GradeFields};
    use crate::domain::ports::CatalogueRepositoryError;
    use rstest::rstest;

    #[rstest]
    fn replace_never_rewrites_the_primary_key() {
        let id = Uuid::nil();
        let fields = GradeFields {
            name: "Merit".into(),
            rank: 60,
        };
        let values = GradeValues::new(id, &fields);
        let query = diesel::update(grades::table.find(id)).set(&values);
        let sql = diesel::debug_query::<Pg, _>(&query).to_string();

        let set_clause = sql
            .split(" WHERE ")
            .next()
            .expect("update statement");
        assert!(set_clause.contains(r#""name" = $1"#), "unexpected SQL: {sql}");
        assert!(!set_clause.contains(r#""id" ="#), "unexpected SQL: {sql}");
    }

    #[rstest]
    fn replace_clears_optional_columns() {
        let id = Uuid::nil();
        let fields = DiplomaFields {
            name: "Baccalaureate".into(),
            description: None,
        };
        let values = DiplomaValues::new(id, &fields);
        let query = diesel::update(diplomas::table.find(id)).set(&values);
        let sql = diesel::debug_query::<Pg, _>(&query).to_string();

        assert!(sql.contains(r#""description" = $2"#), "unexpected SQL: {sql}");
    }

    #[rstest]
    fn unique_violations_become_duplicates() {
        use diesel::result::{DatabaseErrorInformation, DatabaseErrorKind};

        struct Info;
        impl DatabaseErrorInformation for Info {
            fn message(&self) -> &str {
                "duplicate key value violates unique constraint"
            }
            fn details(&self) -> Option<&str> {
                None
            }
            fn hint(&self) -> Option<&str> {
                None
            }
            fn table_name(&self) -> Option<&str> {
                Some("divisions")
            }
            fn column_name(&self) -> Option<&str> {
                None
            }
            fn constraint_name(&self) -> Option<&str> {
                Some("divisions_code_key")
            }
            fn statement_position(&self) -> Option<i32> {
                None
            }
        }

        let error = diesel::result::Error::DatabaseError(
            DatabaseErrorKind::UniqueViolation,
            Box::new(Info),
        );
        assert_eq!(
            map_write_error(error),
            CatalogueRepositoryError::duplicate("violates divisions_code_key")
        );
    }
}
