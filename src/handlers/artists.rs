// src/handlers/artists.rs
// DOCUMENTATION: HTTP handlers for artist operations
// PURPOSE: Parse requests, call services, return responses

use crate::errors::GalleryError;
use crate::handlers::extractors::AuthenticatedUser;
use crate::models::{CreateArtistRequest, UpdateArtistRequest};
use crate::services::ArtistService;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// GET /api/artists
pub async fn list_artists(pool: web::Data<PgPool>) -> Result<impl Responder, GalleryError> {
    let artists = ArtistService::list_artists(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(artists))
}

/// GET /api/artists/{id}
pub async fn get_artist(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    let artist = ArtistService::get_artist(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(artist))
}

/// POST /api/artists
pub async fn create_artist(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    req: web::Json<CreateArtistRequest>,
) -> Result<impl Responder, GalleryError> {
    req.validate()?;

    let artist = ArtistService::create_artist(pool.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(artist))
}

/// PUT /api/artists/{id}
pub async fn update_artist(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateArtistRequest>,
) -> Result<impl Responder, GalleryError> {
    req.validate()?;

    let artist =
        ArtistService::update_artist(pool.get_ref(), path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(artist))
}

/// DELETE /api/artists/{id}
pub async fn delete_artist(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    ArtistService::delete_artist(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Artist removed" })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/artists")
            .route("", web::get().to(list_artists))
            .route("", web::post().to(create_artist))
            .route("/{id}", web::get().to(get_artist))
            .route("/{id}", web::put().to(update_artist))
            .route("/{id}", web::delete().to(delete_artist)),
    );
}
