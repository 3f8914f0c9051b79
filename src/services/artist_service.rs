// src/services/artist_service.rs
// DOCUMENTATION: Business logic for artists
// PURPOSE: Intermediary between handlers and repository

use crate::db::ArtistRepository;
use crate::errors::GalleryError;
use crate::models::{ArtistResponse, CreateArtistRequest, UpdateArtistRequest};
use sqlx::PgPool;
use uuid::Uuid;

pub struct ArtistService;

impl ArtistService {
    pub async fn list_artists(pool: &PgPool) -> Result<Vec<ArtistResponse>, GalleryError> {
        let artists = ArtistRepository::list(pool).await?;
        Ok(artists.iter().map(|a| a.to_response()).collect())
    }

    pub async fn get_artist(pool: &PgPool, id: Uuid) -> Result<ArtistResponse, GalleryError> {
        let artist = ArtistRepository::get_by_id(pool, id).await?;
        Ok(artist.to_response())
    }

    /// Create an artist profile without login credentials
    pub async fn create_artist(
        pool: &PgPool,
        req: CreateArtistRequest,
    ) -> Result<ArtistResponse, GalleryError> {
        let artist = ArtistRepository::create(pool, &req, None).await?;
        Ok(artist.to_response())
    }

    pub async fn update_artist(
        pool: &PgPool,
        id: Uuid,
        req: UpdateArtistRequest,
    ) -> Result<ArtistResponse, GalleryError> {
        let artist = ArtistRepository::update(pool, id, &req).await?;
        Ok(artist.to_response())
    }

    /// Delete an artist; refused while artworks still reference them
    pub async fn delete_artist(pool: &PgPool, id: Uuid) -> Result<(), GalleryError> {
        ArtistRepository::delete(pool, id).await.map_err(|e| match e {
            GalleryError::Conflict(_) => GalleryError::Conflict(
                "Artist still has artworks; remove or reassign them first".to_string(),
            ),
            other => other,
        })
    }
}
