/// Authentication Routes
///
/// Thin handlers over the AuthService: registration, login, token refresh,
/// logout, and current-user lookup. The refresh token travels as an
/// HttpOnly, Secure, SameSite=Strict cookie with a 7-day max age; the
/// service only ever sees the raw string value.

use actix_web::cookie::{time::Duration, Cookie, SameSite};
use actix_web::error::ResponseError;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::{Deserialize, Serialize};

use crate::auth::{AuthService, Claims, NewUser};
use crate::configuration::JwtSettings;
use crate::error::{AppError, ValidationError};
use crate::store::User;

const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

#[derive(Deserialize)]
pub struct RegisterRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
    #[serde(default)]
    pub confirm_password: String,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

#[derive(Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: Option<String>,
}

#[derive(Deserialize)]
pub struct LogoutRequest {
    pub refresh_token: Option<String>,
}

#[derive(Serialize)]
pub struct RegisterResponse {
    pub success: bool,
    pub message: String,
    pub user: User,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,
    pub access_token: String,
    pub refresh_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

#[derive(Serialize)]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
}

/// POST /auth/register
///
/// # Errors
/// - 400: missing fields, bad email shape, weak password (all rules listed),
///   password/confirmation mismatch
/// - 409: email already registered
pub async fn register(
    form: web::Json<RegisterRequest>,
    service: web::Data<AuthService>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let form = form.into_inner();

    // Confirmation is a boundary concern; the service never sees it.
    if form.password != form.confirm_password {
        return Err(ValidationError::PasswordMismatch.into());
    }

    let registered = service
        .register(NewUser {
            email: form.email,
            password: form.password,
            first_name: form.first_name,
            last_name: form.last_name,
        })
        .await?;

    let cookie = refresh_token_cookie(
        &registered.tokens.refresh_token,
        jwt_config.refresh_token_expiry,
    );

    Ok(HttpResponse::Created().cookie(cookie).json(RegisterResponse {
        success: true,
        message: "User registered successfully".to_string(),
        user: registered.user,
        access_token: registered.tokens.access_token,
        refresh_token: registered.tokens.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: registered.tokens.expires_in,
    }))
}

/// POST /auth/login
///
/// # Errors
/// - 400: missing fields
/// - 401: unknown email or wrong password (same message for both)
pub async fn login(
    form: web::Json<LoginRequest>,
    service: web::Data<AuthService>,
    jwt_config: web::Data<JwtSettings>,
) -> Result<HttpResponse, AppError> {
    let tokens = service.login(&form.email, &form.password).await?;

    let cookie = refresh_token_cookie(&tokens.refresh_token, jwt_config.refresh_token_expiry);

    Ok(HttpResponse::Ok().cookie(cookie).json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_type: "Bearer".to_string(),
        expires_in: tokens.expires_in,
    }))
}

/// POST /auth/refresh
///
/// Reads the refresh token from the cookie or the JSON body. The refresh
/// token is not rotated; only a new access token comes back. An invalid or
/// expired token clears the cookie alongside the 401.
pub async fn refresh(
    req: HttpRequest,
    body: Option<web::Json<RefreshRequest>>,
    service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let token_value = refresh_token_from(&req, body.and_then(|b| b.into_inner().refresh_token))
        .unwrap_or_default();

    match service.refresh_access_token(&token_value).await {
        Ok(grant) => Ok(HttpResponse::Ok().json(RefreshResponse {
            success: true,
            message: "Token refreshed successfully".to_string(),
            access_token: grant.access_token,
            token_type: "Bearer".to_string(),
            expires_in: grant.expires_in,
        })),
        Err(err @ AppError::Auth(_)) => {
            let mut response = err.error_response();
            let _ = response.add_removal_cookie(&refresh_token_removal());
            Ok(response)
        }
        Err(err) => Err(err),
    }
}

/// POST /auth/logout
///
/// Always answers 200: revoking nothing is still a successful logout.
pub async fn logout(
    req: HttpRequest,
    body: Option<web::Json<LogoutRequest>>,
    service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let token_value = refresh_token_from(&req, body.and_then(|b| b.into_inner().refresh_token));

    service.logout(token_value.as_deref()).await?;

    let mut response = HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Logged out successfully",
    }));
    let _ = response.add_removal_cookie(&refresh_token_removal());

    Ok(response)
}

/// GET /auth/me
///
/// Claims are injected by the JWT middleware. The password hash never
/// appears in the response body.
pub async fn get_current_user(
    claims: web::ReqData<Claims>,
    service: web::Data<AuthService>,
) -> Result<HttpResponse, AppError> {
    let user_id = claims.user_id()?;
    let user = service.current_user(user_id).await?;

    Ok(HttpResponse::Ok().json(user))
}

fn refresh_token_from(req: &HttpRequest, body_value: Option<String>) -> Option<String> {
    // An empty cookie (a cleared one the client kept sending) must not
    // shadow a token supplied in the body.
    req.cookie(REFRESH_TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .or(body_value)
}

fn refresh_token_cookie(token: &str, max_age_seconds: i64) -> Cookie<'static> {
    Cookie::build(REFRESH_TOKEN_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .secure(true)
        .same_site(SameSite::Strict)
        .max_age(Duration::seconds(max_age_seconds))
        .finish()
}

fn refresh_token_removal() -> Cookie<'static> {
    let mut cookie = Cookie::new(REFRESH_TOKEN_COOKIE, "");
    cookie.set_path("/");
    cookie.make_removal();
    cookie
}
