//! Authentication and user listing handlers.
//!
//! ```text
//! POST /api/v1/login {"email":"ada@example.org","password":"..."}
//! POST /api/v1/logout
//! GET /api/v1/session
//! GET /api/v1/users
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::info;

use crate::domain::{Error, LoginCredentials, LoginValidationError, Session, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::auth::{AdminSession, CurrentSession};
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /api/v1/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    #[schema(example = "ada@example.org")]
    pub email: String,
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = LoginValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

fn map_login_validation_error(err: LoginValidationError) -> Error {
    match err {
        LoginValidationError::InvalidEmail(reason) => Error::invalid_request("invalid login")
            .with_details(json!({ "_errors": [], "email": { "_errors": [reason.to_string()] } })),
        LoginValidationError::EmptyPassword => Error::invalid_request("invalid login")
            .with_details(
                json!({ "_errors": [], "password": { "_errors": ["password must not be empty"] } }),
            ),
    }
}

/// Authenticate with email and password and establish a session.
#[utoipa::path(
    post,
    path = "/api/v1/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 503, description = "User store unavailable", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["session"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_login_validation_error)?;
    let user_id = state.login.authenticate(&credentials).await?;
    session.persist_user(&user_id)?;
    info!(%user_id, "user signed in");
    Ok(HttpResponse::Ok().finish())
}

/// Sign out by purging the session cookie.
#[utoipa::path(
    post,
    path = "/api/v1/logout",
    responses((status = 204, description = "Session cleared")),
    tags = ["session"],
    operation_id = "logout",
    security([])
)]
#[post("/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::NoContent().finish()
}

/// Return the session resolved for the current request.
#[utoipa::path(
    get,
    path = "/api/v1/session",
    responses(
        (status = 200, description = "Current session", body = Session),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 503, description = "User store unavailable", body = Error)
    ),
    tags = ["session"],
    operation_id = "currentSession"
)]
#[get("/session")]
pub async fn current_session(session: CurrentSession) -> web::Json<Session> {
    web::Json(session.0)
}

/// List every user, oldest first. Administrators only.
///
/// # Examples
/// ```
/// use actix_web::App;
/// use exam_registry::inbound::http::users::list_users;
///
/// let app = App::new().service(list_users);
/// ```
#[utoipa::path(
    get,
    path = "/api/v1/users",
    responses(
        (status = 200, description = "Users ordered by creation time", body = [User]),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 403, description = "Forbidden", body = Error),
        (status = 503, description = "User store unavailable", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["users"],
    operation_id = "listUsers"
)]
#[get("/users")]
pub async fn list_users(
    _admin: AdminSession,
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<Vec<User>>> {
    let users = state.users.list_users().await?;
    Ok(web::Json(users))
}
