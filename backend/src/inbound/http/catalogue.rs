//! Catalogue CRUD endpoints.
//!
//! Every kind exposes the same five routes under its collection segment:
//!
//! ```text
//! GET    /api/v1/{kind}
//! POST   /api/v1/{kind}
//! GET    /api/v1/{kind}/{id}
//! PUT    /api/v1/{kind}/{id}
//! DELETE /api/v1/{kind}/{id}
//! ```
//!
//! Reads need a signed-in session, writes need the `ADMIN` role. The handler
//! logic is generic over [`ServedEntity`]; the per-kind modules below only
//! pin the kind and carry the OpenAPI annotations.

use actix_web::{HttpResponse, web};
use uuid::Uuid;

use crate::domain::catalogue::{
    CatalogueRecord, CreateDiplomaInput, CreateDivisionInput, CreateExaminationCenterInput,
    CreateGradeInput, CreateReleaseTypeInput, Diploma, DiplomaFields, Division, DivisionFields,
    ExaminationCenter, ExaminationCenterFields, Grade, GradeFields, RecordOf, ReleaseType,
    ReleaseTypeFields,
};
use crate::domain::{EntityInput, Error, ServedEntity};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AdminSession, CurrentSession};
use crate::inbound::http::state::HttpState;

async fn list_records<E: ServedEntity>(
    _session: CurrentSession,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<RecordOf<E>>>> {
    let records = state.catalogue.get::<E>().list().await?;
    Ok(web::Json(records))
}

async fn read_record<E: ServedEntity>(
    _session: CurrentSession,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<web::Json<RecordOf<E>>> {
    let record = state.catalogue.get::<E>().get(id.into_inner()).await?;
    Ok(web::Json(record))
}

async fn create_record<E: ServedEntity>(
    _admin: AdminSession,
    state: web::Data<HttpState>,
    payload: web::Json<EntityInput<E>>,
) -> ApiResult<HttpResponse> {
    let record = state
        .catalogue
        .get::<E>()
        .create(payload.into_inner())
        .await?;
    Ok(HttpResponse::Created().json(record))
}

async fn replace_record<E: ServedEntity>(
    _admin: AdminSession,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
    payload: web::Json<EntityInput<E>>,
) -> ApiResult<web::Json<RecordOf<E>>> {
    let record = state
        .catalogue
        .get::<E>()
        .replace(id.into_inner(), payload.into_inner())
        .await?;
    Ok(web::Json(record))
}

async fn delete_record<E: ServedEntity>(
    _admin: AdminSession,
    state: web::Data<HttpState>,
    id: web::Path<Uuid>,
) -> ApiResult<HttpResponse> {
    state.catalogue.get::<E>().delete(id.into_inner()).await?;
    Ok(HttpResponse::NoContent().finish())
}

macro_rules! catalogue_endpoints {
    (
        $module:ident,
        entity = $entity:ty,
        fields = $fields:ty,
        input = $input:ty,
        tag = $tag:literal,
        collection = $collection:literal,
        item = $item:literal $(,)?
    ) => {
        #[doc = concat!("Endpoints under `", $collection, "`.")]
        pub mod $module {
            use super::*;

            #[utoipa::path(
                get,
                path = $collection,
                responses(
                    (status = 200, description = "Records ordered by creation time", body = [CatalogueRecord<$fields>]),
                    (status = 401, description = "Unauthorised", body = Error),
                    (status = 503, description = "Store unavailable", body = Error)
                ),
                tags = [$tag]
            )]
            pub async fn list(
                session: CurrentSession,
                state: web::Data<HttpState>,
            ) -> ApiResult<web::Json<Vec<CatalogueRecord<$fields>>>> {
                list_records::<$entity>(session, state).await
            }

            #[utoipa::path(
                get,
                path = $item,
                params(("id" = Uuid, Path, description = "Record id")),
                responses(
                    (status = 200, description = "Record", body = CatalogueRecord<$fields>),
                    (status = 400, description = "Malformed id", body = Error),
                    (status = 401, description = "Unauthorised", body = Error),
                    (status = 404, description = "Not found", body = Error)
                ),
                tags = [$tag]
            )]
            pub async fn read(
                session: CurrentSession,
                state: web::Data<HttpState>,
                id: web::Path<Uuid>,
            ) -> ApiResult<web::Json<CatalogueRecord<$fields>>> {
                read_record::<$entity>(session, state, id).await
            }

            #[utoipa::path(
                post,
                path = $collection,
                request_body = $input,
                responses(
                    (status = 201, description = "Record created", body = CatalogueRecord<$fields>),
                    (status = 400, description = "Validation failed; details hold field errors", body = Error),
                    (status = 401, description = "Unauthorised", body = Error),
                    (status = 403, description = "Administrator role required", body = Error),
                    (status = 409, description = "Duplicate record", body = Error)
                ),
                tags = [$tag]
            )]
            pub async fn create(
                admin: AdminSession,
                state: web::Data<HttpState>,
                payload: web::Json<$input>,
            ) -> ApiResult<HttpResponse> {
                create_record::<$entity>(admin, state, payload).await
            }

            #[utoipa::path(
                put,
                path = $item,
                params(("id" = Uuid, Path, description = "Record id")),
                request_body = $input,
                responses(
                    (status = 200, description = "Record replaced", body = CatalogueRecord<$fields>),
                    (status = 400, description = "Validation failed; details hold field errors", body = Error),
                    (status = 401, description = "Unauthorised", body = Error),
                    (status = 403, description = "Administrator role required", body = Error),
                    (status = 404, description = "Not found", body = Error),
                    (status = 409, description = "Duplicate record", body = Error)
                ),
                tags = [$tag]
            )]
            pub async fn replace(
                admin: AdminSession,
                state: web::Data<HttpState>,
                id: web::Path<Uuid>,
                payload: web::Json<$input>,
            ) -> ApiResult<web::Json<CatalogueRecord<$fields>>> {
                replace_record::<$entity>(admin, state, id, payload).await
            }

            #[utoipa::path(
                delete,
                path = $item,
                params(("id" = Uuid, Path, description = "Record id")),
                responses(
                    (status = 204, description = "Record deleted"),
                    (status = 401, description = "Unauthorised", body = Error),
                    (status = 403, description = "Administrator role required", body = Error),
                    (status = 404, description = "Not found", body = Error)
                ),
                tags = [$tag]
            )]
            pub async fn delete(
                admin: AdminSession,
                state: web::Data<HttpState>,
                id: web::Path<Uuid>,
            ) -> ApiResult<HttpResponse> {
                delete_record::<$entity>(admin, state, id).await
            }

            /// Mount the collection and item resources for this kind.
            pub fn configure(cfg: &mut web::ServiceConfig) {
                use crate::domain::catalogue::CatalogueEntity;

                let collection = format!("/{}", <$entity as CatalogueEntity>::KIND.path_segment());
                cfg.service(
                    web::resource(collection.as_str())
                        .route(web::get().to(list))
                        .route(web::post().to(create)),
                )
                .service(
                    web::resource(format!("{collection}/{{id}}"))
                        .route(web::get().to(read))
                        .route(web::put().to(replace))
                        .route(web::delete().to(delete)),
                );
            }
        }
    };
}

catalogue_endpoints!(
    diplomas,
    entity = Diploma,
    fields = DiplomaFields,
    input = CreateDiplomaInput,
    tag = "diplomas",
    collection = "/api/v1/diplomas",
    item = "/api/v1/diplomas/{id}",
);

catalogue_endpoints!(
    divisions,
    entity = Division,
    fields = DivisionFields,
    input = CreateDivisionInput,
    tag = "divisions",
    collection = "/api/v1/divisions",
    item = "/api/v1/divisions/{id}",
);

catalogue_endpoints!(
    examination_centers,
    entity = ExaminationCenter,
    fields = ExaminationCenterFields,
    input = CreateExaminationCenterInput,
    tag = "examination-centers",
    collection = "/api/v1/examination-centers",
    item = "/api/v1/examination-centers/{id}",
);

catalogue_endpoints!(
    grades,
    entity = Grade,
    fields = GradeFields,
    input = CreateGradeInput,
    tag = "grades",
    collection = "/api/v1/grades",
    item = "/api/v1/grades/{id}",
);

catalogue_endpoints!(
    release_types,
    entity = ReleaseType,
    fields = ReleaseTypeFields,
    input = CreateReleaseTypeInput,
    tag = "release-types",
    collection = "/api/v1/release-types",
    item = "/api/v1/release-types/{id}",
);

/// Mount every catalogue kind, including the extractor configs that turn
/// malformed bodies and ids into `invalid_request` payloads.
///
/// # Examples
/// ```
/// use actix_web::{App, web};
/// use exam_registry::inbound::http::catalogue;
///
/// let app = App::new().service(web::scope("/api/v1").configure(catalogue::configure));
/// ```
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(super::error::json_config())
        .app_data(super::error::path_config());
    diplomas::configure(cfg);
    divisions::configure(cfg);
    examination_centers::configure(cfg);
    grades::configure(cfg);
    release_types::configure(cfg);
}

#[cfg(test)]
#[path = "catalogue_tests.rs"]
mod tests;
