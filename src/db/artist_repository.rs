// src/db/artist_repository.rs
// DOCUMENTATION: Database access for artists
// PURPOSE: All SQL touching the artists table

use crate::errors::GalleryError;
use crate::models::*;
use chrono::{DateTime, Utc};
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

const ARTIST_COLUMNS: &str = r#"
    id, name, password_hash, bio, image_url,
    contact, specialization, achievements, active,
    created_at, updated_at
"#;

/// ArtistRepository: All database operations for artists
pub struct ArtistRepository;

impl ArtistRepository {
    /// Insert a new artist
    /// DOCUMENTATION: password_hash is None for artists added by staff
    pub async fn create(
        pool: &PgPool,
        req: &CreateArtistRequest,
        password_hash: Option<&str>,
    ) -> Result<Artist, GalleryError> {
        let contact = req.contact.clone().unwrap_or_default();

        let sql = format!(
            r#"
            INSERT INTO artists (
                id, name, password_hash, bio, image_url,
                contact, specialization, achievements, active,
                created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, true, NOW(), NOW())
            RETURNING {}
            "#,
            ARTIST_COLUMNS
        );

        let artist = sqlx::query_as::<_, Artist>(&sql)
            .bind(Uuid::new_v4()) // $1
            .bind(&req.name) // $2
            .bind(password_hash) // $3
            .bind(&req.bio) // $4
            .bind(&req.image_url) // $5
            .bind(Json(&contact)) // $6
            .bind(&req.specialization) // $7
            .bind(Json(&req.achievements)) // $8
            .fetch_one(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artist email"))?;

        log::info!("Created artist with id: {}", artist.id);
        Ok(artist)
    }

    /// Retrieve artist by ID
    pub async fn get_by_id(pool: &PgPool, id: Uuid) -> Result<Artist, GalleryError> {
        let sql = format!("SELECT {} FROM artists WHERE id = $1", ARTIST_COLUMNS);

        sqlx::query_as::<_, Artist>(&sql)
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artist"))?
            .ok_or_else(|| {
                log::warn!("Artist not found: {}", id);
                GalleryError::NotFound("Artist not found".to_string())
            })
    }

    /// Look up an artist by contact email (case-insensitive)
    /// DOCUMENTATION: Used by login and registration
    pub async fn find_by_email(pool: &PgPool, email: &str) -> Result<Option<Artist>, GalleryError> {
        let sql = format!(
            "SELECT {} FROM artists WHERE lower(contact->>'email') = lower($1)",
            ARTIST_COLUMNS
        );

        sqlx::query_as::<_, Artist>(&sql)
            .bind(email.trim())
            .fetch_optional(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artist"))
    }

    /// List all artists, newest first
    pub async fn list(pool: &PgPool) -> Result<Vec<Artist>, GalleryError> {
        let sql = format!(
            "SELECT {} FROM artists ORDER BY created_at DESC",
            ARTIST_COLUMNS
        );

        sqlx::query_as::<_, Artist>(&sql)
            .fetch_all(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artist"))
    }

    /// Partial update - only provided fields are modified
    pub async fn update(
        pool: &PgPool,
        id: Uuid,
        req: &UpdateArtistRequest,
    ) -> Result<Artist, GalleryError> {
        let sql = format!(
            r#"
            UPDATE artists
            SET name = COALESCE($2, name),
                bio = COALESCE($3, bio),
                image_url = COALESCE($4, image_url),
                contact = COALESCE($5, contact),
                specialization = COALESCE($6, specialization),
                achievements = COALESCE($7, achievements),
                active = COALESCE($8, active),
                updated_at = NOW()
            WHERE id = $1
            RETURNING {}
            "#,
            ARTIST_COLUMNS
        );

        let artist = sqlx::query_as::<_, Artist>(&sql)
            .bind(id)
            .bind(&req.name)
            .bind(&req.bio)
            .bind(&req.image_url)
            .bind(req.contact.as_ref().map(Json))
            .bind(&req.specialization)
            .bind(req.achievements.as_ref().map(Json))
            .bind(req.active)
            .fetch_optional(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artist email"))?
            .ok_or_else(|| GalleryError::NotFound("Artist not found".to_string()))?;

        log::info!("Updated artist: {}", id);
        Ok(artist)
    }

    /// Hard delete; artists that still own artworks are rejected by the FK
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), GalleryError> {
        let rows = sqlx::query("DELETE FROM artists WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artist"))?
            .rows_affected();

        if rows == 0 {
            return Err(GalleryError::NotFound("Artist not found".to_string()));
        }

        log::info!("Deleted artist: {}", id);
        Ok(())
    }

    pub async fn count(pool: &PgPool) -> Result<i64, GalleryError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM artists")
            .fetch_one(pool)
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artist"))?;
        Ok(count)
    }

    /// Artists created in [from, to)
    pub async fn count_created_between(
        pool: &PgPool,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<i64, GalleryError> {
        let (count,): (i64,) = sqlx::query_as(
            "SELECT COUNT(*) FROM artists WHERE created_at >= $1 AND created_at < $2",
        )
        .bind(from)
        .bind(to)
        .fetch_one(pool)
        .await
        .map_err(|e| GalleryError::from_sqlx(e, "Artist"))?;
        Ok(count)
    }
}
