//! Account API handlers.
//!
//! ```text
//! POST /api/register {"username":"alice","password":"Password1","role":"student"}
//! POST /api/login    {"username":"alice","password":"Password1"}
//! POST /api/logout
//! GET  /api/user
//! ```
//!
//! Registration also logs the new account in, so both registration and login
//! answer with the user payload and a session cookie.

use actix_web::{get, post, web, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, LoginCredentials, Registration, User};
use crate::inbound::http::session::{removal_cookie, session_cookie, SessionContext};
use crate::inbound::http::state::HttpState;
use crate::inbound::http::validation::{
    map_login_validation_error, map_registration_validation_error,
};
use crate::inbound::http::ApiResult;

fn default_role() -> String {
    "student".to_owned()
}

/// Registration request body for `POST /api/register`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub username: String,
    pub password: String,
    /// Account role; defaults to `student` when omitted.
    #[serde(default = "default_role")]
    pub role: String,
}

/// Login request body for `POST /api/login`.
#[derive(Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Create an account and establish a session.
#[utoipa::path(
    post,
    path = "/api/register",
    request_body = RegisterRequest,
    responses(
        (status = 201, description = "Account created and logged in", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 409, description = "Username already taken", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["accounts"],
    operation_id = "register",
    security([])
)]
#[post("/register")]
pub async fn register(
    state: web::Data<HttpState>,
    payload: web::Json<RegisterRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let registration =
        Registration::try_from_parts(&payload.username, &payload.password, &payload.role)
            .map_err(map_registration_validation_error)?;
    let (user, session) = state.accounts.register(&registration).await?;
    Ok(HttpResponse::Created()
        .cookie(session_cookie(session.token, state.cookie))
        .json(user))
}

/// Authenticate and establish a session.
#[utoipa::path(
    post,
    path = "/api/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = User,
            headers(("Set-Cookie" = String, description = "Session cookie"))),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Invalid credentials", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["accounts"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<HttpResponse> {
    let payload = payload.into_inner();
    let credentials = LoginCredentials::try_from_parts(&payload.username, &payload.password)
        .map_err(map_login_validation_error)?;
    let (user, session) = state.accounts.login(&credentials).await?;
    Ok(HttpResponse::Ok()
        .cookie(session_cookie(session.token, state.cookie))
        .json(user))
}

/// Invalidate the current session.
#[utoipa::path(
    post,
    path = "/api/logout",
    responses(
        (status = 204, description = "Session ended",
            headers(("Set-Cookie" = String, description = "Removal cookie"))),
        (status = 401, description = "Not logged in", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["accounts"],
    operation_id = "logout"
)]
#[post("/logout")]
pub async fn logout(
    state: web::Data<HttpState>,
    ctx: SessionContext,
) -> ApiResult<HttpResponse> {
    let token = ctx
        .token()
        .ok_or_else(|| Error::unauthorized("login required"))?;
    state.accounts.authenticated_user(Some(token)).await?;
    state.accounts.logout(token).await?;
    Ok(HttpResponse::NoContent()
        .cookie(removal_cookie(state.cookie))
        .finish())
}

/// The currently authenticated user.
#[utoipa::path(
    get,
    path = "/api/user",
    responses(
        (status = 200, description = "Authenticated user", body = User),
        (status = 401, description = "Not logged in", body = Error),
        (status = 500, description = "Internal server error")
    ),
    tags = ["accounts"],
    operation_id = "currentUser"
)]
#[get("/user")]
pub async fn current_user(
    state: web::Data<HttpState>,
    ctx: SessionContext,
) -> ApiResult<web::Json<User>> {
    let user = state.accounts.authenticated_user(ctx.token()).await?;
    Ok(web::Json(user))
}
