// src/services/dashboard_service.rs
// DOCUMENTATION: Dashboard aggregation
// PURPOSE: Totals, 30-day trends, the activity feed and date-bucketed revenue

use crate::db::{ArtistRepository, ArtworkRepository, ExhibitionRepository, SaleRepository};
use crate::errors::GalleryError;
use crate::models::{
    ActivityItem, ActivityKind, Artwork, ChartData, ChartRange, DashboardStats, Exhibition, Sale,
    Trend,
};
use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveTime, TimeZone, Utc};
use sqlx::PgPool;

pub const FALLBACK_IMAGE: &str = "/images/fallback-image.jpg";
const UNKNOWN_ARTIST: &str = "Unknown Artist";
const VARIOUS_ARTISTS: &str = "Various Artists";

const RECENT_SALES: i64 = 5;
const RECENT_ARTWORKS: i64 = 5;
const RECENT_EXHIBITIONS: i64 = 3;

/// Length of each trend window
const TREND_WINDOW_DAYS: i64 = 30;

pub struct DashboardService;

impl DashboardService {
    /// Totals with the change over the last 30 days
    pub async fn stats(pool: &PgPool) -> Result<DashboardStats, GalleryError> {
        let now = Utc::now();
        let current_from = now - Duration::days(TREND_WINDOW_DAYS);
        let previous_from = current_from - Duration::days(TREND_WINDOW_DAYS);

        let artworks = ArtworkRepository::count(pool).await?;
        let artists = ArtistRepository::count(pool).await?;
        let exhibitions = ExhibitionRepository::count(pool).await?;
        let sales = SaleRepository::stats(pool).await?;

        let artworks_trend = count_trend(
            ArtworkRepository::count_created_between(pool, current_from, now).await?,
            ArtworkRepository::count_created_between(pool, previous_from, current_from).await?,
        );
        let artists_trend = count_trend(
            ArtistRepository::count_created_between(pool, current_from, now).await?,
            ArtistRepository::count_created_between(pool, previous_from, current_from).await?,
        );
        let exhibitions_trend = count_trend(
            ExhibitionRepository::count_created_between(pool, current_from, now).await?,
            ExhibitionRepository::count_created_between(pool, previous_from, current_from).await?,
        );

        let current_sales = SaleRepository::stats_between(pool, current_from, now).await?;
        let previous_sales = SaleRepository::stats_between(pool, previous_from, current_from).await?;

        Ok(DashboardStats {
            artworks,
            artists,
            exhibitions,
            sales: sales.count,
            revenue: sales.total,
            artworks_trend,
            artists_trend,
            exhibitions_trend,
            sales_trend: count_trend(current_sales.count, previous_sales.count),
            revenue_trend: Trend {
                value: percent_change(current_sales.total, previous_sales.total),
            },
        })
    }

    /// Recent sales, artworks and exhibitions merged newest first
    pub async fn activity(pool: &PgPool) -> Result<Vec<ActivityItem>, GalleryError> {
        let sales = SaleRepository::list_recent(pool, RECENT_SALES).await?;
        let artworks = ArtworkRepository::list_recent(pool, RECENT_ARTWORKS).await?;
        let exhibitions = ExhibitionRepository::list_recent(pool, RECENT_EXHIBITIONS).await?;

        Ok(merge_activity(&sales, &artworks, &exhibitions))
    }

    pub async fn sales_chart(pool: &PgPool, range: ChartRange) -> Result<ChartData, GalleryError> {
        let now = Utc::now();
        let points = SaleRepository::price_points_since(pool, window_start(range, now)).await?;
        Ok(build_chart(range, now, &points))
    }
}

/// Percentage change rounded to one decimal
/// DOCUMENTATION: 0 when both periods are empty, 100 when only the current one has data
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return if current == 0.0 { 0.0 } else { 100.0 };
    }
    ((current - previous) / previous * 1000.0).round() / 10.0
}

fn count_trend(current: i64, previous: i64) -> Trend {
    Trend {
        value: percent_change(current as f64, previous as f64),
    }
}

fn start_of_day(date: NaiveDate) -> DateTime<Utc> {
    Utc.from_utc_datetime(&date.and_time(NaiveTime::default()))
}

/// Months since year zero, for month arithmetic
fn month_index(date: NaiveDate) -> i32 {
    date.year() * 12 + date.month0() as i32
}

/// First day of the month `back` months before `today`
fn month_start(today: NaiveDate, back: i32) -> NaiveDate {
    let index = month_index(today) - back;
    NaiveDate::from_ymd_opt(index.div_euclid(12), index.rem_euclid(12) as u32 + 1, 1)
        .unwrap_or(today)
}

fn bucket_count(range: ChartRange) -> usize {
    match range {
        ChartRange::Week => 7,
        ChartRange::Month => 5,
        ChartRange::Year => 12,
    }
}

/// Earliest instant covered by the chart
pub fn window_start(range: ChartRange, now: DateTime<Utc>) -> DateTime<Utc> {
    let today = now.date_naive();
    match range {
        ChartRange::Week => start_of_day(today - Duration::days(6)),
        ChartRange::Month => start_of_day(today - Duration::days(34)),
        ChartRange::Year => start_of_day(month_start(today, 11)),
    }
}

/// Chart labels, oldest bucket first
fn chart_labels(range: ChartRange, today: NaiveDate) -> Vec<String> {
    match range {
        ChartRange::Week => (0..7)
            .map(|i| (today - Duration::days(6 - i)).format("%a").to_string())
            .collect(),
        ChartRange::Month => (1..=5).map(|week| format!("Week {}", week)).collect(),
        ChartRange::Year => (0..12)
            .map(|i| month_start(today, 11 - i).format("%b").to_string())
            .collect(),
    }
}

/// Bucket a sale date falls into, if it is inside the window
fn bucket_for(range: ChartRange, today: NaiveDate, date: NaiveDate) -> Option<usize> {
    match range {
        ChartRange::Week => {
            let days = (today - date).num_days();
            (0..7).contains(&days).then(|| (6 - days) as usize)
        }
        ChartRange::Month => {
            let days = (today - date).num_days();
            (0..35).contains(&days).then(|| (4 - days / 7) as usize)
        }
        ChartRange::Year => {
            let months = month_index(today) - month_index(date);
            (0..12).contains(&months).then(|| (11 - months) as usize)
        }
    }
}

/// Sum sale prices into the buckets of `range` ending at `now`
pub fn build_chart(range: ChartRange, now: DateTime<Utc>, points: &[(DateTime<Utc>, f64)]) -> ChartData {
    let today = now.date_naive();
    let mut values = vec![0.0; bucket_count(range)];

    for (date, price) in points {
        if let Some(index) = bucket_for(range, today, date.date_naive()) {
            values[index] += price;
        }
    }

    ChartData {
        labels: chart_labels(range, today),
        values,
    }
}

fn image_or_fallback(image: Option<&str>) -> String {
    image
        .filter(|i| !i.is_empty())
        .unwrap_or(FALLBACK_IMAGE)
        .to_string()
}

fn sale_activity(sale: &Sale) -> Option<ActivityItem> {
    // Sales whose artwork has disappeared are left out of the feed
    let title = sale.artwork_title.as_ref()?;

    Some(ActivityItem {
        id: sale.id,
        kind: ActivityKind::Sale,
        title: title.clone(),
        artist: sale
            .artist_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        price: Some(sale.price),
        date: sale.date,
        image: image_or_fallback(sale.artwork_image_url.as_deref()),
    })
}

fn artwork_activity(artwork: &Artwork) -> ActivityItem {
    ActivityItem {
        id: artwork.id,
        kind: ActivityKind::NewArtwork,
        title: artwork.title.clone(),
        artist: artwork
            .artist_name
            .clone()
            .unwrap_or_else(|| UNKNOWN_ARTIST.to_string()),
        price: Some(artwork.price),
        date: artwork.created_at,
        image: image_or_fallback(artwork.image_url.as_deref()),
    }
}

fn exhibition_activity(exhibition: &Exhibition) -> ActivityItem {
    ActivityItem {
        id: exhibition.id,
        kind: ActivityKind::Exhibition,
        title: exhibition.title.clone(),
        artist: VARIOUS_ARTISTS.to_string(),
        price: None,
        date: exhibition.start_date,
        image: image_or_fallback(Some(&exhibition.image_url)),
    }
}

fn merge_activity(sales: &[Sale], artworks: &[Artwork], exhibitions: &[Exhibition]) -> Vec<ActivityItem> {
    let mut items: Vec<ActivityItem> = sales
        .iter()
        .filter_map(sale_activity)
        .chain(artworks.iter().map(artwork_activity))
        .chain(exhibitions.iter().map(exhibition_activity))
        .collect();

    items.sort_by(|a, b| b.date.cmp(&a.date));
    items
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(0.0, 0.0), 0.0);
        assert_eq!(percent_change(5.0, 0.0), 100.0);
        assert_eq!(percent_change(15.0, 10.0), 50.0);
        assert_eq!(percent_change(5.0, 10.0), -50.0);
        assert_eq!(percent_change(1.0, 3.0), -66.7);
    }

    #[test]
    fn test_week_chart() {
        // 2024-03-15 is a Friday
        let now = at(2024, 3, 15, 18);
        let points = vec![
            (at(2024, 3, 15, 9), 100.0),
            (at(2024, 3, 15, 11), 50.0),
            (at(2024, 3, 9, 12), 30.0),
            (at(2024, 3, 8, 23), 999.0),
        ];

        let chart = build_chart(ChartRange::Week, now, &points);

        assert_eq!(chart.labels, vec!["Sat", "Sun", "Mon", "Tue", "Wed", "Thu", "Fri"]);
        assert_eq!(chart.values, vec![30.0, 0.0, 0.0, 0.0, 0.0, 0.0, 150.0]);
    }

    #[test]
    fn test_month_chart_puts_latest_week_last() {
        let now = at(2024, 3, 31, 12);
        let points = vec![
            (at(2024, 3, 31, 8), 10.0),
            (at(2024, 3, 25, 8), 20.0),
            (at(2024, 3, 24, 8), 40.0),
            (at(2024, 2, 26, 8), 80.0),
            (at(2024, 2, 25, 8), 999.0),
        ];

        let chart = build_chart(ChartRange::Month, now, &points);

        assert_eq!(chart.labels, vec!["Week 1", "Week 2", "Week 3", "Week 4", "Week 5"]);
        assert_eq!(chart.values, vec![80.0, 0.0, 0.0, 40.0, 30.0]);
    }

    #[test]
    fn test_year_chart_spans_year_boundary() {
        let now = at(2024, 2, 10, 12);
        let points = vec![
            (at(2024, 2, 1, 0), 5.0),
            (at(2023, 12, 31, 23), 7.0),
            (at(2023, 3, 1, 0), 11.0),
            (at(2023, 2, 28, 0), 999.0),
        ];

        let chart = build_chart(ChartRange::Year, now, &points);

        assert_eq!(chart.labels.first().map(String::as_str), Some("Mar"));
        assert_eq!(chart.labels.last().map(String::as_str), Some("Feb"));
        assert_eq!(chart.values[0], 11.0);
        assert_eq!(chart.values[9], 7.0);
        assert_eq!(chart.values[11], 5.0);
        assert_eq!(chart.values.iter().sum::<f64>(), 23.0);
    }

    #[test]
    fn test_window_start() {
        let now = at(2024, 2, 10, 12);
        assert_eq!(window_start(ChartRange::Week, now), at(2024, 2, 4, 0));
        assert_eq!(window_start(ChartRange::Month, now), at(2024, 1, 7, 0));
        assert_eq!(window_start(ChartRange::Year, now), at(2023, 3, 1, 0));
    }

    #[test]
    fn test_activity_merge_and_fallbacks() {
        let artwork = Artwork {
            id: Uuid::new_v4(),
            title: "Blue Nude".to_string(),
            artist_id: Uuid::new_v4(),
            description: "Cut-out".to_string(),
            price: 900.0,
            image_url: None,
            category: "Collage".to_string(),
            medium: None,
            dimensions: None,
            year: None,
            status: "available".to_string(),
            tags: Vec::new(),
            created_at: at(2024, 3, 2, 0),
            updated_at: at(2024, 3, 2, 0),
            artist_name: None,
            artist_image_url: None,
        };
        let exhibition = Exhibition {
            id: Uuid::new_v4(),
            title: "Spring Salon".to_string(),
            description: "Group show".to_string(),
            start_date: at(2024, 3, 5, 0),
            end_date: at(2024, 4, 5, 0),
            artwork_ids: Vec::new(),
            image_url: "/images/salon.jpg".to_string(),
            location: None,
            curator: "Curator".to_string(),
            status: "ongoing".to_string(),
            ticket_price: 0.0,
            created_at: at(2024, 3, 1, 0),
            updated_at: at(2024, 3, 1, 0),
        };
        let orphan_sale = Sale {
            id: Uuid::new_v4(),
            artwork_id: Uuid::new_v4(),
            buyer: "Buyer".to_string(),
            buyer_email: None,
            buyer_phone: None,
            shipping_address: None,
            price: 10.0,
            commission: 1.0,
            payment_method: "cash".to_string(),
            payment_status: "completed".to_string(),
            transaction_id: Uuid::new_v4(),
            date: at(2024, 3, 9, 0),
            created_at: at(2024, 3, 9, 0),
            updated_at: at(2024, 3, 9, 0),
            artwork_title: None,
            artwork_image_url: None,
            artwork_price: None,
            artist_name: None,
        };

        let items = merge_activity(&[orphan_sale], &[artwork], &[exhibition]);

        assert_eq!(items.len(), 2);
        assert_eq!(items[0].kind, ActivityKind::Exhibition);
        assert_eq!(items[0].artist, VARIOUS_ARTISTS);
        assert_eq!(items[1].kind, ActivityKind::NewArtwork);
        assert_eq!(items[1].artist, UNKNOWN_ARTIST);
        assert_eq!(items[1].image, FALLBACK_IMAGE);
    }
}
