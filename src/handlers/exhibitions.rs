// src/handlers/exhibitions.rs
// DOCUMENTATION: HTTP handlers for exhibition operations
// PURPOSE: Parse requests, call services, return responses

use crate::errors::GalleryError;
use crate::handlers::extractors::AuthenticatedUser;
use crate::models::{CreateExhibitionRequest, UpdateExhibitionRequest};
use crate::services::ExhibitionService;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// GET /api/exhibitions
pub async fn list_exhibitions(pool: web::Data<PgPool>) -> Result<impl Responder, GalleryError> {
    let exhibitions = ExhibitionService::list_exhibitions(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(exhibitions))
}

/// GET /api/exhibitions/{id}
pub async fn get_exhibition(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    let exhibition = ExhibitionService::get_exhibition(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(exhibition))
}

/// GET /api/exhibitions/{id}/artworks
pub async fn get_exhibition_artworks(
    pool: web::Data<PgPool>,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    let artworks =
        ExhibitionService::get_exhibition_artworks(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(artworks))
}

/// POST /api/exhibitions
pub async fn create_exhibition(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    req: web::Json<CreateExhibitionRequest>,
) -> Result<impl Responder, GalleryError> {
    req.validate()?;

    let exhibition = ExhibitionService::create_exhibition(pool.get_ref(), req.into_inner()).await?;
    Ok(HttpResponse::Created().json(exhibition))
}

/// PUT /api/exhibitions/{id}
pub async fn update_exhibition(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateExhibitionRequest>,
) -> Result<impl Responder, GalleryError> {
    req.validate()?;

    let exhibition =
        ExhibitionService::update_exhibition(pool.get_ref(), path.into_inner(), req.into_inner())
            .await?;
    Ok(HttpResponse::Ok().json(exhibition))
}

/// DELETE /api/exhibitions/{id}
pub async fn delete_exhibition(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    ExhibitionService::delete_exhibition(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Exhibition removed" })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/exhibitions")
            .route("", web::get().to(list_exhibitions))
            .route("", web::post().to(create_exhibition))
            .route("/{id}", web::get().to(get_exhibition))
            .route("/{id}", web::put().to(update_exhibition))
            .route("/{id}", web::delete().to(delete_exhibition))
            .route("/{id}/artworks", web::get().to(get_exhibition_artworks)),
    );
}
