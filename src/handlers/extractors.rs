// src/handlers/extractors.rs
// DOCUMENTATION: Request extractors shared by handlers
// PURPOSE: Resolve the logged-in artist from the session token

use crate::config::Config;
use crate::errors::GalleryError;
use crate::services::AuthService;
use actix_web::{dev::Payload, http::header, web, FromRequest, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

/// Name of the session cookie
pub const TOKEN_COOKIE: &str = "token";

/// The artist a request is authenticated as
/// DOCUMENTATION: Add as a handler argument to require a valid session.
/// The token is read from the `token` cookie, then from
/// `Authorization: Bearer <jwt>`.
#[derive(Debug, Clone, Copy)]
pub struct AuthenticatedUser {
    pub id: Uuid,
}

impl FromRequest for AuthenticatedUser {
    type Error = GalleryError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthenticatedUser, GalleryError> {
    let config = req.app_data::<web::Data<Config>>().ok_or_else(|| {
        log::error!("Config is not registered as app data");
        GalleryError::InternalError("Server misconfigured".to_string())
    })?;

    let token = session_token(req).ok_or_else(|| {
        log::warn!("Request to {} without session token", req.path());
        GalleryError::Unauthorized
    })?;

    let claims = AuthService::verify_token(config, &token)?;
    Ok(AuthenticatedUser { id: claims.user.id })
}

fn session_token(req: &HttpRequest) -> Option<String> {
    let from_cookie = req
        .cookie(TOKEN_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|t| !t.is_empty());

    from_cookie.or_else(|| {
        req.headers()
            .get(header::AUTHORIZATION)
            .and_then(|h| h.to_str().ok())
            .and_then(|v| v.strip_prefix("Bearer "))
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
    })
}
