// src/db/exhibition_repository.rs
// DOCUMENTATION: Database access for exhibitions
// PURPOSE: All SQL touching the exhibitions table

use crate::errors::GalleryError;
use crate::models::*;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

const EXHIBITION_COLUMNS: &str = r#"
    id, title, description, start_date, end_date,
    artwork_ids, image_url, location, curator, status,
    ticket_price, created_at, updated_at
"#;

/// Fully resolved exhibition fields, written as a whole on insert and update
#[derive(Debug, Clone)]
pub struct ExhibitionRecord {
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub artwork_ids: Vec<Uuid>,
    pub image_url: String,
    pub location: Option<Location>,
    pub curator: String,
    pub status: ExhibitionStatus,
    pub ticket_price: f64,
}

/// ExhibitionRepository: All database operations for exhibitions
pub struct ExhibitionRepository;

impl ExhibitionRepository {
    pub async fn create(
        conn: &mut PgConnection,
        record: &ExhibitionRecord,
    ) -> Result<Exhibition, GalleryError> {
        let sql = format!(
            r#"
            INSERT INTO exhibitions (
                id, title, description, start_date, end_date,
                artwork_ids, image_url, location, curator, status,
                ticket_price, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, NOW(), NOW())
            RETURNING {}
            "#,
            EXHIBITION_COLUMNS
        );

        let exhibition = sqlx::query_as::<_, Exhibition>(&sql)
            .bind(Uuid::new_v4())
            .bind(&record.title)
            .bind(&record.description)
            .bind(record.start_date)
            .bind(record.end_date)
            .bind(&record.artwork_ids)
            .bind(&record.image_url)
            .bind(record.location.as_ref().map(Json))
            .bind(&record.curator)
            .bind(record.status.as_str())
            .bind(record.ticket_price)
            .fetch_one(conn)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))?;

        log::info!("Created exhibition with id: {}", exhibition.id);
        Ok(exhibition)
    }

    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Exhibition, GalleryError> {
        let sql = format!("SELECT {} FROM exhibitions WHERE id = $1", EXHIBITION_COLUMNS);

        sqlx::query_as::<_, Exhibition>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))?
            .ok_or_else(|| {
                log::warn!("Exhibition not found: {}", id);
                GalleryError::NotFound("Exhibition not found".to_string())
            })
    }

    /// Fetch and row-lock an exhibition inside a transaction
    pub async fn lock_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Exhibition, GalleryError> {
        let sql = format!(
            "SELECT {} FROM exhibitions WHERE id = $1 FOR UPDATE",
            EXHIBITION_COLUMNS
        );

        sqlx::query_as::<_, Exhibition>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))?
            .ok_or_else(|| GalleryError::NotFound("Exhibition not found".to_string()))
    }

    /// All exhibitions, latest start date first
    pub async fn list(pool: &PgPool) -> Result<Vec<Exhibition>, GalleryError> {
        let sql = format!(
            "SELECT {} FROM exhibitions ORDER BY start_date DESC",
            EXHIBITION_COLUMNS
        );

        sqlx::query_as::<_, Exhibition>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))
    }

    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Exhibition>, GalleryError> {
        let sql = format!(
            "SELECT {} FROM exhibitions ORDER BY start_date DESC LIMIT $1",
            EXHIBITION_COLUMNS
        );

        sqlx::query_as::<_, Exhibition>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))
    }

    /// Overwrite an exhibition with a merged record
    pub async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        record: &ExhibitionRecord,
    ) -> Result<Exhibition, GalleryError> {
        let sql = format!(
            r#"
            UPDATE exhibitions
            SET title = $2,
                description = $3,
                start_date = $4,
                end_date = $5,
                artwork_ids = $6,
                image_url = $7,
                location = $8,
                curator = $9,
                status = $10,
                ticket_price = $11,
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            EXHIBITION_COLUMNS
        );

        let exhibition = sqlx::query_as::<_, Exhibition>(&sql)
            .bind(id)
            .bind(&record.title)
            .bind(&record.description)
            .bind(record.start_date)
            .bind(record.end_date)
            .bind(&record.artwork_ids)
            .bind(&record.image_url)
            .bind(record.location.as_ref().map(Json))
            .bind(&record.curator)
            .bind(record.status.as_str())
            .bind(record.ticket_price)
            .fetch_optional(conn)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))?
            .ok_or_else(|| GalleryError::NotFound("Exhibition not found".to_string()))?;

        log::info!("Updated exhibition: {}", id);
        Ok(exhibition)
    }

    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), GalleryError> {
        let rows = sqlx::query("DELETE FROM exhibitions WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))?
            .rows_affected();

        if rows == 0 {
            return Err(GalleryError::NotFound("Exhibition not found".to_string()));
        }

        log::info!("Deleted exhibition: {}", id);
        Ok(())
    }

    /// Drop an artwork from every exhibition that lists it
    pub async fn remove_artwork_everywhere(
        conn: &mut PgConnection,
        artwork_id: Uuid,
    ) -> Result<u64, GalleryError> {
        let rows = sqlx::query(
            r#"
            UPDATE exhibitions
            SET artwork_ids = array_remove(artwork_ids, $1), updated_at = NOW()
            WHERE $1 = ANY(artwork_ids)
            "#,
        )
        .bind(artwork_id)
        .execute(conn)
        .await
        .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))?
        .rows_affected();

        Ok(rows)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, GalleryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM exhibitions")
            .fetch_one(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))?;
        Ok(count)
    }

    /// Exhibitions created in [from, to)
    pub async fn count_created_between(
        pool: &PgPool,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, GalleryError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM exhibitions WHERE created_at >= $1 AND created_at < $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await
        .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))?;
        Ok(count)
    }
}
