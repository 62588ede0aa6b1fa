//! Account API handlers.
//!
//! ```text
//! POST /v1/auth/register {"name":"Ada","email":"ada@example.com","password":"pw"}
//! POST /v1/auth/login {"email":"ada@example.com","password":"pw"}
//! POST /v1/auth/logout
//! GET /v1/profile
//! ```

use actix_web::{HttpResponse, get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::user::UserValidationError;
use crate::domain::{AuthValidationError, Error, LoginCredentials, NewRegistration, User};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionContext;
use crate::inbound::http::state::HttpState;

/// Registration request body for `POST /v1/auth/register`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    /// Display name, 1–50 characters.
    pub name: String,
    /// Email address, unique across all accounts.
    pub email: String,
    /// Plaintext password; hashed before storage.
    pub password: String,
}

impl TryFrom<RegisterRequest> for NewRegistration {
    type Error = AuthValidationError;

    fn try_from(value: RegisterRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.name, &value.email, &value.password)
    }
}

/// Login request body for `POST /v1/auth/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    /// Email the caller registered with.
    pub email: String,
    /// Password attempt.
    pub password: String,
}

impl TryFrom<LoginRequest> for LoginCredentials {
    type Error = AuthValidationError;

    fn try_from(value: LoginRequest) -> Result<Self, Self::Error> {
        Self::try_from_parts(&value.email, &value.password)
    }
}

/// Profile payload returned by `GET /v1/profile`.
#[derive(Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProfileResponse {
    /// Display name.
    pub name: String,
    /// Email address.
    pub email: String,
}

impl From<User> for ProfileResponse {
    fn from(user: User) -> Self {
        Self {
            name: user.name().to_string(),
            email: user.email().to_string(),
        }
    }
}

fn map_auth_validation_error(err: AuthValidationError) -> Error {
    let (field, code) = match &err {
        AuthValidationError::Invalid(UserValidationError::EmptyDisplayName) => {
            ("name", "empty_name")
        }
        AuthValidationError::Invalid(UserValidationError::DisplayNameTooLong { .. }) => {
            ("name", "name_too_long")
        }
        AuthValidationError::Invalid(UserValidationError::EmptyEmail) => ("email", "empty_email"),
        AuthValidationError::Invalid(UserValidationError::EmailTooLong { .. }) => {
            ("email", "email_too_long")
        }
        AuthValidationError::Invalid(UserValidationError::InvalidEmail) => {
            ("email", "invalid_email")
        }
        AuthValidationError::EmptyPassword => ("password", "empty_password"),
    };
    Error::invalid_request(err.to_string()).with_details(json!({ "field": field, "code": code }))
}

/// Register a new account and establish a session.
#[utoipa::path(
    post,
    path = "/v1/auth/register",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Email already registered", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "register",
    security([])
)]
#[post("/auth/register")]
pub async fn register(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let registration =
        NewRegistration::try_from(payload.into_inner()).map_err(map_auth_validation_error)?;
    let user = state.accounts.register(&registration).await?;
    session.persist_user(user.id())?;
    Ok(HttpResponse::Ok().finish())
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/v1/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "login",
    security([])
)]
#[post("/auth/login")]
pub async fn login(
    state: web::Data<HttpState>,
    session: SessionContext,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let credentials =
        LoginCredentials::try_from(payload.into_inner()).map_err(map_auth_validation_error)?;
    let user_id = state.accounts.authenticate(&credentials).await?;
    session.persist_user(user_id)?;
    Ok(HttpResponse::Ok().finish())
}

/// End the current session.
#[utoipa::path(
    post,
    path = "/v1/auth/logout",
    responses(
        (status = 200, description = "Session cleared")
    ),
    tags = ["auth"],
    operation_id = "logout",
    security([])
)]
#[post("/auth/logout")]
pub async fn logout(session: SessionContext) -> HttpResponse {
    session.clear();
    HttpResponse::Ok().finish()
}

/// Profile data for the authenticated user.
#[utoipa::path(
    get,
    path = "/v1/profile",
    responses(
        (status = 200, description = "Profile", body = ProfileResponse),
        (status = 401, description = "Unauthorised", body = Error),
        (status = 404, description = "Account no longer exists", body = Error),
        (status = 500, description = "Internal server error", body = Error)
    ),
    tags = ["auth"],
    operation_id = "profile"
)]
#[get("/profile")]
pub async fn profile(
    state: web::Data<HttpState>,
    session: SessionContext,
) -> ApiResult<web::Json<ProfileResponse>> {
    let user_id = session.require_user_id()?;
    let user = state.accounts.fetch_profile(user_id).await?;
    Ok(web::Json(user.into()))
}
