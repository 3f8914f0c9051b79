// src/handlers/auth.rs
// DOCUMENTATION: HTTP handlers for registration and sessions
// PURPOSE: Issue and clear the session cookie

use crate::config::Config;
use crate::errors::GalleryError;
use crate::handlers::extractors::{AuthenticatedUser, TOKEN_COOKIE};
use crate::models::{AuthResponse, AuthUser, LoginRequest, RegisterRequest};
use crate::services::{AuthRateLimiter, AuthService};
use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

/// Build the session cookie for `token`
/// DOCUMENTATION: HttpOnly always; Secure and SameSite=Strict in production
fn session_cookie(config: &Config, token: &str) -> Cookie<'static> {
    let production = config.is_production();

    Cookie::build(TOKEN_COOKIE, token.to_string())
        .path("/")
        .http_only(true)
        .secure(production)
        .same_site(if production {
            SameSite::Strict
        } else {
            SameSite::Lax
        })
        .max_age(CookieDuration::hours(config.jwt_expiry_hours))
        .finish()
}

/// Rate limit key: the client address as seen by actix
fn client_key(req: &HttpRequest) -> String {
    req.connection_info()
        .realip_remote_addr()
        .unwrap_or("unknown")
        .to_string()
}

/// POST /api/auth/register
pub async fn register(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    limiter: web::Data<Arc<AuthRateLimiter>>,
    req: HttpRequest,
    body: web::Json<RegisterRequest>,
) -> Result<impl Responder, GalleryError> {
    limiter.check(&client_key(&req))?;

    let (artist, token) = AuthService::register(pool.get_ref(), &config, body.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&config, &token))
        .json(AuthResponse {
            message: "User registered successfully".to_string(),
            token,
            user: AuthUser::from_artist(&artist),
        }))
}

/// POST /api/auth/login
pub async fn login(
    pool: web::Data<PgPool>,
    config: web::Data<Config>,
    limiter: web::Data<Arc<AuthRateLimiter>>,
    req: HttpRequest,
    body: web::Json<LoginRequest>,
) -> Result<impl Responder, GalleryError> {
    limiter.check(&client_key(&req))?;

    let (artist, token) = AuthService::login(pool.get_ref(), &config, body.into_inner()).await?;

    Ok(HttpResponse::Ok()
        .cookie(session_cookie(&config, &token))
        .json(AuthResponse {
            message: "Login successful".to_string(),
            token,
            user: AuthUser::from_artist(&artist),
        }))
}

/// GET /api/auth/me
pub async fn me(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
) -> Result<impl Responder, GalleryError> {
    let artist = AuthService::current_artist(pool.get_ref(), user.id).await?;
    Ok(HttpResponse::Ok().json(artist.to_response()))
}

/// GET|POST /api/auth/logout
pub async fn logout(config: web::Data<Config>) -> impl Responder {
    let mut cookie = session_cookie(&config, "");
    cookie.make_removal();

    HttpResponse::Ok()
        .cookie(cookie)
        .json(json!({ "message": "Logged out successfully" }))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/auth")
            .route("/register", web::post().to(register))
            .route("/login", web::post().to(login))
            .route("/me", web::get().to(me))
            .route("/logout", web::get().to(logout))
            .route("/logout", web::post().to(logout)),
    );
}
