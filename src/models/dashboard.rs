// src/models/dashboard.rs
// DOCUMENTATION: Dashboard and report DTOs
// PURPOSE: Shapes consumed by the dashboard charts, activity feed and PDF report

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Percentage change against the previous period
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Trend {
    pub value: f64,
}

/// Response of GET /api/dashboard/stats
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub artworks: i64,
    pub artists: i64,
    pub exhibitions: i64,
    pub sales: i64,
    pub revenue: f64,
    pub artworks_trend: Trend,
    pub artists_trend: Trend,
    pub exhibitions_trend: Trend,
    pub sales_trend: Trend,
    pub revenue_trend: Trend,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    Sale,
    NewArtwork,
    Exhibition,
}

/// One row of the dashboard activity feed
#[derive(Debug, Clone, Serialize)]
pub struct ActivityItem {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: ActivityKind,
    pub title: String,
    pub artist: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    pub date: DateTime<Utc>,
    pub image: String,
}

/// Time window of the sales chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartRange {
    Week,
    Month,
    Year,
}

impl ChartRange {
    /// Unknown or missing ranges fall back to a week
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(|r| r.trim().to_ascii_lowercase()).as_deref() {
            Some("month") => ChartRange::Month,
            Some("year") => ChartRange::Year,
            _ => ChartRange::Week,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ChartRange::Week => "week",
            ChartRange::Month => "month",
            ChartRange::Year => "year",
        }
    }
}

/// Query string of GET /api/dashboard/sales-chart
#[derive(Debug, Clone, Deserialize)]
pub struct ChartQuery {
    pub range: Option<String>,
}

/// Labels and values of the revenue chart, index-aligned
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub values: Vec<f64>,
}

/// Body of POST /api/reports/generate
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportRequest {
    #[serde(rename = "type")]
    pub report_type: Option<String>,
    pub date_range: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_range_parse_defaults_to_week() {
        assert_eq!(ChartRange::parse(None), ChartRange::Week);
        assert_eq!(ChartRange::parse(Some("decade")), ChartRange::Week);
        assert_eq!(ChartRange::parse(Some("Month")), ChartRange::Month);
        assert_eq!(ChartRange::parse(Some(" year ")), ChartRange::Year);
    }

    #[test]
    fn test_activity_item_serializes_type_tag() {
        let item = ActivityItem {
            id: Uuid::nil(),
            kind: ActivityKind::NewArtwork,
            title: "Untitled".to_string(),
            artist: "Unknown Artist".to_string(),
            price: None,
            date: Utc::now(),
            image: "/images/fallback-image.jpg".to_string(),
        };

        let json = serde_json::to_value(&item).unwrap();
        assert_eq!(json["type"], "new_artwork");
        assert!(json.get("price").is_none());
    }
}
