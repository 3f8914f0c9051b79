// src/handlers/reports.rs
// DOCUMENTATION: HTTP handler for PDF report downloads

use crate::errors::GalleryError;
use crate::handlers::extractors::AuthenticatedUser;
use crate::models::ReportRequest;
use crate::services::{RenderedReport, ReportService};
use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{web, HttpResponse};
use sqlx::PgPool;

/// Wrap rendered PDF bytes as a download
pub fn pdf_attachment(report: RenderedReport) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header(ContentDisposition {
            disposition: DispositionType::Attachment,
            parameters: vec![DispositionParam::Filename(report.filename)],
        })
        .body(report.bytes)
}

/// POST /api/reports/generate {type, dateRange}
pub async fn generate_report(
    pool: web::Data<PgPool>,
    _user: AuthenticatedUser,
    req: Option<web::Json<ReportRequest>>,
) -> Result<HttpResponse, GalleryError> {
    let req = req.map(|r| r.into_inner()).unwrap_or_default();
    let rendered = ReportService::generate(pool.get_ref(), req).await?;
    Ok(pdf_attachment(rendered))
}

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/api/reports").route("/generate", web::post().to(generate_report)));
}
