// src/handlers/sales.rs
// DOCUMENTATION: HTTP handlers for sale operations
// PURPOSE: Every route here requires a session

use crate::errors::GalleryError;
use crate::handlers::extractors::AuthenticatedUser;
use crate::models::{CreateSaleRequest, UpdateSaleRequest};
use crate::services::SaleService;
use actix_web::{web, HttpResponse, Responder};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

/// GET /api/sales
pub async fn list_sales(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, GalleryError> {
    let sales = SaleService::list_sales(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(sales))
}

/// GET /api/sales/stats
pub async fn sales_stats(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, GalleryError> {
    let stats = SaleService::stats(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// GET /api/sales/{id}
pub async fn get_sale(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    let sale = SaleService::get_sale(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(sale))
}

/// POST /api/sales
pub async fn create_sale(
    pool: web::Data<PgPool>,
    user: AuthenticatedUser,
    req: web::Json<CreateSaleRequest>,
) -> Result<impl Responder, GalleryError> {
    let sale = SaleService::create_sale(pool.get_ref(), req.into_inner()).await?;
    log::info!("Sale {} recorded by {}", sale.id, user.id);
    Ok(HttpResponse::Created().json(sale))
}

/// PUT /api/sales/{id}
pub async fn update_sale(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
    req: web::Json<UpdateSaleRequest>,
) -> Result<impl Responder, GalleryError> {
    let sale = SaleService::update_sale(pool.get_ref(), path.into_inner(), req.into_inner()).await?;
    Ok(HttpResponse::Ok().json(sale))
}

/// DELETE /api/sales/{id}
pub async fn delete_sale(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    path: web::Path<Uuid>,
) -> Result<impl Responder, GalleryError> {
    SaleService::delete_sale(pool.get_ref(), path.into_inner()).await?;
    Ok(HttpResponse::Ok().json(json!({ "message": "Sale removed successfully" })))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/sales")
            .route("", web::get().to(list_sales))
            .route("", web::post().to(create_sale))
            .route("/stats", web::get().to(sales_stats))
            .route("/{id}", web::get().to(get_sale))
            .route("/{id}", web::put().to(update_sale))
            .route("/{id}", web::delete().to(delete_sale)),
    );
}
