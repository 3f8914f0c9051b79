// src/handlers/dashboard.rs
// DOCUMENTATION: HTTP handlers for the dashboard
// PURPOSE: Aggregated statistics, activity feed and chart data

use crate::errors::GalleryError;
use crate::handlers::extractors::AuthenticatedUser;
use crate::handlers::reports::pdf_attachment;
use crate::models::{ChartQuery, ChartRange, ReportRequest};
use crate::services::{DashboardService, ReportService};
use actix_web::{web, HttpResponse, Responder};
use sqlx::PgPool;

/// GET /api/dashboard/stats
pub async fn stats(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, GalleryError> {
    let stats = DashboardService::stats(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(stats))
}

/// GET /api/dashboard/activity
pub async fn activity(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
) -> Result<impl Responder, GalleryError> {
    let items = DashboardService::activity(pool.get_ref()).await?;
    Ok(HttpResponse::Ok().json(items))
}

/// GET /api/dashboard/sales-chart?range=week|month|year
pub async fn sales_chart(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    query: web::Query<ChartQuery>,
) -> Result<impl Responder, GalleryError> {
    let range = ChartRange::parse(query.range.as_deref());
    log::debug!("Sales chart requested for range {}", range.as_str());

    let chart = DashboardService::sales_chart(pool.get_ref(), range).await?;
    Ok(HttpResponse::Ok().json(chart))
}

/// POST /api/dashboard/report
pub async fn report(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    req: Option<web::Json<ReportRequest>>,
) -> Result<HttpResponse, GalleryError> {
    let req = req.map(|r| r.into_inner()).unwrap_or_default();
    let rendered = ReportService::generate(pool.get_ref(), req).await?;
    Ok(pdf_attachment(rendered))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/dashboard")
            .route("/stats", web::get().to(stats))
            .route("/activity", web::get().to(activity))
            .route("/sales-chart", web::get().to(sales_chart))
            .route("/report", web::post().to(report)),
    );
}
