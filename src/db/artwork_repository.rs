// src/db/artwork_repository.rs
// DOCUMENTATION: Database access for artworks
// PURPOSE: All SQL touching the artworks table, including status transitions

use crate::errors::GalleryError;
use crate::models::*;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgExecutor;
use sqlx::types::Json;
use sqlx::{PgConnection, PgPool};
use uuid::Uuid;

/// Artwork columns joined with the owning artist
const ARTWORK_SELECT: &str = r#"
    SELECT
        a.id, a.title, a.artist_id, a.description, a.price,
        a.image_url, a.category, a.medium, a.dimensions, a.year,
        a.status, a.tags, a.created_at, a.updated_at,
        ar.name AS artist_name,
        ar.image_url AS artist_image_url
    FROM artworks a
    LEFT JOIN artists ar ON ar.id = a.artist_id
"#;

/// ArtworkRepository: All database operations for artworks
pub struct ArtworkRepository;

impl ArtworkRepository {
    /// Insert a new artwork owned by `artist_id` and return it with its artist
    pub async fn create(
        pool: &PgPool,
        artist_id: Uuid,
        req: &CreateArtworkRequest,
    ) -> Result<Artwork, GalleryError> {
        let status = req.status.unwrap_or(ArtworkStatus::Available);

        let inserted: (Uuid,) = sqlx::query_as(
            r#"
            INSERT INTO artworks (
                id, title, artist_id, description, price,
                image_url, category, medium, dimensions, year,
                status, tags, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, NOW(), NOW())
            RETURNING id
            "#,
        )
        .bind(Uuid::new_v4()) // $1
        .bind(&req.title) // $2
        .bind(artist_id) // $3
        .bind(&req.description) // $4
        .bind(req.price) // $5
        .bind(&req.image_url) // $6
        .bind(&req.category) // $7
        .bind(&req.medium) // $8
        .bind(req.dimensions.as_ref().map(Json)) // $9
        .bind(req.year) // $10
        .bind(status.as_str()) // $11
        .bind(&req.tags) // $12
        .fetch_one(pool)
        .await
        .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))?;

        let artwork = Self::get_by_id(pool, inserted.0).await?;
        log::info!("Created artwork with id: {}", artwork.id);
        Ok(artwork)
    }

    /// Retrieve artwork by ID
    pub async fn get_by_id<'e, E>(executor: E, id: Uuid) -> Result<Artwork, GalleryError>
    where
        E: PgExecutor<'e>,
    {
        let sql = format!("{} WHERE a.id = $1", ARTWORK_SELECT);

        sqlx::query_as::<_, Artwork>(&sql)
            .bind(id)
            .fetch_optional(executor)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))?
            .ok_or_else(|| {
                log::warn!("Artwork not found: {}", id);
                GalleryError::NotFound("Artwork not found".to_string())
            })
    }

    /// Fetch and row-lock an artwork inside a transaction
    pub async fn lock_by_id(conn: &mut PgConnection, id: Uuid) -> Result<Artwork, GalleryError> {
        let sql = format!("{} WHERE a.id = $1 FOR UPDATE OF a", ARTWORK_SELECT);

        sqlx::query_as::<_, Artwork>(&sql)
            .bind(id)
            .fetch_optional(conn)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))?
            .ok_or_else(|| GalleryError::NotFound("Artwork not found".to_string()))
    }

    /// Fetch all artworks whose id is in `ids` (order unspecified)
    pub async fn get_by_ids<'e, E>(executor: E, ids: &[Uuid]) -> Result<Vec<Artwork>, GalleryError>
    where
        E: PgExecutor<'e>,
    {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let sql = format!("{} WHERE a.id = ANY($1)", ARTWORK_SELECT);

        sqlx::query_as::<_, Artwork>(&sql)
            .bind(ids)
            .fetch_all(executor)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))
    }

    /// List artworks with optional filters, newest first
    pub async fn list(pool: &PgPool, query: &ArtworkQuery) -> Result<Vec<Artwork>, GalleryError> {
        let sql = format!(
            r#"
            {}
            WHERE ($1::TEXT IS NULL OR a.status = $1)
              AND ($2::TEXT IS NULL OR a.category ILIKE $2)
              AND ($3::UUID IS NULL OR a.artist_id = $3)
            ORDER BY a.created_at DESC
            "#,
            ARTWORK_SELECT
        );

        log::debug!("Listing artworks with filters: {:?}", query);

        sqlx::query_as::<_, Artwork>(&sql)
            .bind(query.status.map(|s| s.as_str()))
            .bind(&query.category)
            .bind(query.artist)
            .fetch_all(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))
    }

    /// Most recently created artworks
    pub async fn list_recent(pool: &PgPool, limit: i64) -> Result<Vec<Artwork>, GalleryError> {
        let sql = format!("{} ORDER BY a.created_at DESC LIMIT $1", ARTWORK_SELECT);

        sqlx::query_as::<_, Artwork>(&sql)
            .bind(limit)
            .fetch_all(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))
    }

    /// Partial update - only provided fields are modified
    pub async fn update(
        conn: &mut PgConnection,
        id: Uuid,
        req: &UpdateArtworkRequest,
    ) -> Result<(), GalleryError> {
        let updated: Option<(Uuid,)> = sqlx::query_as(
            r#"
            UPDATE artworks
            SET title = COALESCE($2, title),
                artist_id = COALESCE($3, artist_id),
                description = COALESCE($4, description),
                price = COALESCE($5, price),
                image_url = COALESCE($6, image_url),
                category = COALESCE($7, category),
                medium = COALESCE($8, medium),
                dimensions = COALESCE($9, dimensions),
                year = COALESCE($10, year),
                status = COALESCE($11, status),
                tags = COALESCE($12, tags),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id
            "#,
        )
        .bind(id)
        .bind(&req.title)
        .bind(req.owner_id())
        .bind(&req.description)
        .bind(req.price)
        .bind(&req.image_url)
        .bind(&req.category)
        .bind(&req.medium)
        .bind(req.dimensions.as_ref().map(Json))
        .bind(req.year)
        .bind(req.status.map(|s| s.as_str()))
        .bind(&req.tags)
        .fetch_optional(conn)
        .await
        .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))?;

        let (id,) = updated.ok_or_else(|| GalleryError::NotFound("Artwork not found".to_string()))?;

        log::info!("Updated artwork: {}", id);
        Ok(())
    }

    /// Hard delete inside a transaction; sales referencing it block the FK
    pub async fn delete(conn: &mut PgConnection, id: Uuid) -> Result<(), GalleryError> {
        let rows = sqlx::query("DELETE FROM artworks WHERE id = $1")
            .bind(id)
            .execute(conn)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))?
            .rows_affected();

        if rows == 0 {
            return Err(GalleryError::NotFound("Artwork not found".to_string()));
        }

        log::info!("Deleted artwork: {}", id);
        Ok(())
    }

    /// Move an artwork to `to` only if it is currently in one of `from`
    /// DOCUMENTATION: Returns false when the guard did not match, which lets
    /// concurrent purchases of the same artwork fail cleanly
    pub async fn transition_status(
        conn: &mut PgConnection,
        id: Uuid,
        from: &[ArtworkStatus],
        to: ArtworkStatus,
    ) -> Result<bool, GalleryError> {
        let from: Vec<&str> = from.iter().map(|s| s.as_str()).collect();

        let rows = sqlx::query(
            "UPDATE artworks SET status = $2, updated_at = NOW() WHERE id = $1 AND status = ANY($3)",
        )
        .bind(id)
        .bind(to.as_str())
        .bind(&from)
        .execute(conn)
        .await
        .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))?
        .rows_affected();

        if rows > 0 {
            log::info!("Artwork {} moved to {}", id, to);
        }
        Ok(rows > 0)
    }

    /// Mark available artworks as being on exhibition; sold ones are left alone
    pub async fn mark_exhibited(conn: &mut PgConnection, ids: &[Uuid]) -> Result<u64, GalleryError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let rows = sqlx::query(
            r#"
            UPDATE artworks
            SET status = 'exhibition', updated_at = NOW()
            WHERE id = ANY($1) AND status = 'available'
            "#,
        )
        .bind(ids)
        .execute(conn)
        .await
        .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))?
        .rows_affected();

        Ok(rows)
    }

    /// Return exhibited artworks to available unless another exhibition
    /// (other than `exhibition_id`) still lists them
    pub async fn release_from_exhibition(
        conn: &mut PgConnection,
        exhibition_id: Uuid,
        ids: &[Uuid],
    ) -> Result<u64, GalleryError> {
        if ids.is_empty() {
            return Ok(0);
        }

        let rows = sqlx::query(
            r#"
            UPDATE artworks a
            SET status = 'available', updated_at = NOW()
            WHERE a.id = ANY($1)
              AND a.status = 'exhibition'
              AND NOT EXISTS (
                  SELECT 1 FROM exhibitions e
                  WHERE e.id <> $2 AND a.id = ANY(e.artwork_ids)
              )
            "#,
        )
        .bind(ids)
        .bind(exhibition_id)
        .execute(conn)
        .await
        .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))?
        .rows_affected();

        Ok(rows)
    }

    pub async fn count(pool: &PgPool) -> Result<i64, GalleryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM artworks")
            .fetch_one(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))?;
        Ok(count)
    }

    /// Artworks created in [from, to)
    pub async fn count_created_between(
        pool: &PgPool,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, GalleryError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM artworks WHERE created_at >= $1 AND created_at < $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await
        .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))?;
        Ok(count)
    }
}
