// src/services/report_service.rs
// DOCUMENTATION: PDF dashboard reports
// PURPOSE: Collect a dashboard summary for a range and render it to PDF bytes

use crate::db::{ArtistRepository, ArtworkRepository, ExhibitionRepository, SaleRepository};
use crate::errors::GalleryError;
use crate::models::{ChartData, ChartRange, ReportRequest};
use crate::services::dashboard_service::{build_chart, window_start};
use chrono::{DateTime, SecondsFormat, Utc};
use printpdf::{BuiltinFont, Mm, PdfDocument};
use sqlx::PgPool;

const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 20.0;
const LINE_HEIGHT_MM: f32 = 8.0;

/// Everything printed on a report
#[derive(Debug, Clone)]
pub struct ReportData {
    pub report_type: String,
    pub date_range: String,
    pub generated_at: DateTime<Utc>,
    pub artworks: i64,
    pub artists: i64,
    pub exhibitions: i64,
    pub sales_in_range: i64,
    pub revenue_in_range: f64,
    pub chart: ChartData,
}

/// A rendered report ready to be sent as an attachment
pub struct RenderedReport {
    pub filename: String,
    pub bytes: Vec<u8>,
}

pub struct ReportService;

impl ReportService {
    pub async fn generate(pool: &PgPool, req: ReportRequest) -> Result<RenderedReport, GalleryError> {
        let now = Utc::now();
        let range = ChartRange::parse(req.date_range.as_deref());
        let from = window_start(range, now);

        let in_range = SaleRepository::stats_between(pool, from, now).await?;
        let points = SaleRepository::price_points_since(pool, from).await?;

        let data = ReportData {
            report_type: req
                .report_type
                .filter(|t| !t.trim().is_empty())
                .unwrap_or_else(|| "summary".to_string()),
            date_range: range.as_str().to_string(),
            generated_at: now,
            artworks: ArtworkRepository::count(pool).await?,
            artists: ArtistRepository::count(pool).await?,
            exhibitions: ExhibitionRepository::count(pool).await?,
            sales_in_range: in_range.count,
            revenue_in_range: in_range.total,
            chart: build_chart(range, now, &points),
        };

        let bytes = render_pdf(&data)?;
        log::info!(
            "Generated {} report for the last {} ({} bytes)",
            data.report_type,
            data.date_range,
            bytes.len()
        );

        Ok(RenderedReport {
            filename: report_filename(now),
            bytes,
        })
    }
}

pub fn report_filename(at: DateTime<Utc>) -> String {
    format!(
        "dashboard-report-{}.pdf",
        at.to_rfc3339_opts(SecondsFormat::Millis, true)
    )
}

fn report_lines(data: &ReportData) -> Vec<String> {
    let mut lines = vec![
        format!("Type: {}", data.report_type),
        format!("Date Range: {}", data.date_range),
        format!(
            "Generated: {}",
            data.generated_at.format("%Y-%m-%d %H:%M UTC")
        ),
        String::new(),
        format!("Artworks: {}", data.artworks),
        format!("Artists: {}", data.artists),
        format!("Exhibitions: {}", data.exhibitions),
        format!("Sales in range: {}", data.sales_in_range),
        format!("Revenue in range: {:.2}", data.revenue_in_range),
        String::new(),
        "Revenue by period:".to_string(),
    ];

    lines.extend(
        data.chart
            .labels
            .iter()
            .zip(&data.chart.values)
            .map(|(label, value)| format!("    {}: {:.2}", label, value)),
    );
    lines
}

fn pdf_error(e: impl std::fmt::Display) -> GalleryError {
    log::error!("PDF rendering failed: {}", e);
    GalleryError::InternalError("Failed to generate report".to_string())
}

/// Render the report as a single A4 page
pub fn render_pdf(data: &ReportData) -> Result<Vec<u8>, GalleryError> {
    let (doc, page, layer) = PdfDocument::new(
        "Dashboard Report",
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Report",
    );
    let regular = doc.add_builtin_font(BuiltinFont::Helvetica).map_err(pdf_error)?;
    let bold = doc
        .add_builtin_font(BuiltinFont::HelveticaBold)
        .map_err(pdf_error)?;

    let layer = doc.get_page(page).get_layer(layer);
    let mut y = PAGE_HEIGHT_MM - MARGIN_MM;

    layer.use_text("Dashboard Report", 20.0, Mm(MARGIN_MM), Mm(y), &bold);
    y -= LINE_HEIGHT_MM * 1.5;

    for line in report_lines(data) {
        if y < MARGIN_MM {
            break;
        }
        if !line.is_empty() {
            layer.use_text(line, 12.0, Mm(MARGIN_MM), Mm(y), &regular);
        }
        y -= LINE_HEIGHT_MM;
    }

    doc.save_to_bytes().map_err(pdf_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn sample() -> ReportData {
        ReportData {
            report_type: "sales".to_string(),
            date_range: "week".to_string(),
            generated_at: Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap(),
            artworks: 42,
            artists: 7,
            exhibitions: 3,
            sales_in_range: 2,
            revenue_in_range: 1500.0,
            chart: ChartData {
                labels: vec!["Thu".to_string(), "Fri".to_string()],
                values: vec![500.0, 1000.0],
            },
        }
    }

    #[test]
    fn test_filename_uses_rfc3339() {
        let at = Utc.with_ymd_and_hms(2024, 3, 15, 10, 30, 0).unwrap();
        assert_eq!(
            report_filename(at),
            "dashboard-report-2024-03-15T10:30:00.000Z.pdf"
        );
    }

    #[test]
    fn test_report_lines_include_summary() {
        let lines = report_lines(&sample());

        assert!(lines.contains(&"Type: sales".to_string()));
        assert!(lines.contains(&"Date Range: week".to_string()));
        assert!(lines.contains(&"Artworks: 42".to_string()));
        assert!(lines.contains(&"Revenue in range: 1500.00".to_string()));
        assert!(lines.contains(&"    Fri: 1000.00".to_string()));
    }

    #[test]
    fn test_render_produces_pdf() {
        let bytes = render_pdf(&sample()).unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }
}
