// src/handlers/artworks.rs
// DOCUMENTATION: HTTP handlers for artwork operations
// PURPOSE: Parse requests, call services, return responses

use crate::errors::GalleryError;
use crate::handlers::extractors::AuthenticatedUser;
use crate::models::{ArtworkQuery, CreateArtworkRequest, UpdateArtworkRequest};
use crate::services::ArtworkService;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// GET /api/artworks?status=&category=&artist=
pub async fn list_artworks(
    pool: web::Data<PgPool>,
    query: web::Query<ArtworkQuery>,
) -> Result<impl Responder, GalleryError> {
    let artworks = ArtworkService::list_artworks(pool.get_ref(), query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(artworks))
}

/// GET /api/artworks/{id}
pub async fn get_artwork(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    let artwork = ArtworkService::get_artwork(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(artwork))
}

/// POST /api/artworks
pub async fn create_artwork(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    req: web::Json<CreateArtworkRequest>,
) -> Result<impl Responder, GalleryError> {
    req.validate()?;

    let artwork = ArtworkService::create_artwork(pool.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(artwork))
}

/// PUT /api/artworks/{id}
pub async fn update_artwork(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateArtworkRequest>,
) -> Result<impl Responder, GalleryError> {
    req.validate()?;

    let artwork =
        ArtworkService::update_artwork(pool.get_ref(), path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(artwork))
}

/// DELETE /api/artworks/{id}
/// DOCUMENTATION: 409 when a sale references the artwork
pub async fn delete_artwork(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    ArtworkService::delete_artwork(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Artwork removed successfully" })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/artworks")
            .route("", web::get().to(list_artworks))
            .route("", web::post().to(create_artwork))
            .route("/{id}", web::get().to(get_artwork))
            .route("/{id}", web::put().to(update_artwork))
            .route("/{id}", web::delete().to(delete_artwork)),
    );
}
