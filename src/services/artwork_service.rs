// src/services/artwork_service.rs
// DOCUMENTATION: Business logic for artworks
// PURPOSE: Reference checks around artwork persistence

use crate::db::{ArtistRepository, ArtworkRepository, ExhibitionRepository, SaleRepository};
use crate::errors::GalleryError;
use crate::models::{
    ArtworkQuery, ArtworkResponse, ArtworkStatus, CreateArtworkRequest, UpdateArtworkRequest,
};
use sqlx::PgPool;
use uuid::Uuid;

/// A manual status change must agree with the sales table: an artwork is
/// sold exactly when a completed sale references it
fn check_status_change(
    requested: Option<ArtworkStatus>,
    has_completed_sale: bool,
) -> Result<(), GalleryError> {
    match (requested, has_completed_sale) {
        (Some(ArtworkStatus::Sold), false) => Err(GalleryError::Conflict(
            "Artwork can only be marked sold by recording a sale".to_string(),
        )),
        (Some(status), true) if status != ArtworkStatus::Sold => Err(GalleryError::Conflict(
            "Artwork has a completed sale and must stay sold".to_string(),
        )),
        _ => Ok(()),
    }
}

pub struct ArtworkService;

impl ArtworkService {
    pub async fn list_artworks(
        pool: &PgPool,
        query: ArtworkQuery,
    ) -> Result<Vec<ArtworkResponse>, GalleryError> {
        let artworks = ArtworkRepository::list(pool, &query).await?;
        Ok(artworks.iter().map(|a| a.to_response()).collect())
    }

    pub async fn get_artwork(pool: &PgPool, id: Uuid) -> Result<ArtworkResponse, GalleryError> {
        let artwork = ArtworkRepository::get_by_id(pool, id).await?;
        Ok(artwork.to_response())
    }

    pub async fn create_artwork(
        pool: &PgPool,
        req: CreateArtworkRequest,
    ) -> Result<ArtworkResponse, GalleryError> {
        let artist_id = req.owner_id().ok_or_else(|| {
            GalleryError::ValidationError("artistId is required".to_string())
        })?;
        check_status_change(req.status, false)?;

        Self::ensure_artist_exists(pool, artist_id).await?;
        let artwork = ArtworkRepository::create(pool, artist_id, &req).await?;
        Ok(artwork.to_response())
    }

    pub async fn update_artwork(
        pool: &PgPool,
        id: Uuid,
        req: UpdateArtworkRequest,
    ) -> Result<ArtworkResponse, GalleryError> {
        if let Some(artist_id) = req.owner_id() {
            Self::ensure_artist_exists(pool, artist_id).await?;
        }

        let mut tx = pool
            .begin()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))?;

        let current = ArtworkRepository::lock_by_id(&mut tx, id).await?;
        if req.status.is_some_and(|s| s != current.status()) {
            let sold = SaleRepository::has_completed_sale(&mut *tx, id).await?;
            check_status_change(req.status, sold)?;
        }

        ArtworkRepository::update(&mut tx, id, &req).await?;

        tx.commit()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))?;

        Self::get_artwork(pool, id).await
    }

    /// Delete an artwork that was never sold, dropping it from exhibitions
    pub async fn delete_artwork(pool: &PgPool, id: Uuid) -> Result<(), GalleryError> {
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))?;

        ArtworkRepository::lock_by_id(&mut tx, id).await?;

        if SaleRepository::count_for_artwork(&mut *tx, id).await? > 0 {
            return Err(GalleryError::Conflict(
                "Artwork has recorded sales and cannot be removed".to_string(),
            ));
        }

        let exhibitions = ExhibitionRepository::remove_artwork_everywhere(&mut tx, id).await?;
        if exhibitions > 0 {
            log::info!("Removed artwork {} from {} exhibition(s)", id, exhibitions);
        }

        ArtworkRepository::delete(&mut tx, id).await?;

        tx.commit()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Artwork"))?;
        Ok(())
    }

    async fn ensure_artist_exists(pool: &PgPool, artist_id: Uuid) -> Result<(), GalleryError> {
        match ArtistRepository::get_by_id(pool, artist_id).await {
            Ok(_) => Ok(()),
            Err(GalleryError::NotFound(_)) => Err(GalleryError::InvalidInput(format!(
                "Artist {} does not exist",
                artist_id
            ))),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures;
    use crate::models::CreateSaleRequest;
    use crate::services::SaleService;

    #[test]
    fn test_sold_requires_completed_sale() {
        assert!(matches!(
            check_status_change(Some(ArtworkStatus::Sold), false),
            Err(GalleryError::Conflict(_))
        ));
        assert!(check_status_change(Some(ArtworkStatus::Sold), true).is_ok());
    }

    #[test]
    fn test_sold_artwork_cannot_be_reopened() {
        for status in [ArtworkStatus::Available, ArtworkStatus::Exhibition] {
            assert!(matches!(
                check_status_change(Some(status), true),
                Err(GalleryError::Conflict(_))
            ));
        }
    }

    #[test]
    fn test_unsold_artwork_moves_freely() {
        assert!(check_status_change(Some(ArtworkStatus::Exhibition), false).is_ok());
        assert!(check_status_change(Some(ArtworkStatus::Available), false).is_ok());
        assert!(check_status_change(None, true).is_ok());
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_sold_status_follows_sales(pool: PgPool) {
        let artist = fixtures::insert_artist(&pool, "Hilma af Klint").await;
        let artwork = fixtures::insert_artwork(&pool, artist, "The Ten Largest", 8000.0).await;

        let premature = ArtworkService::update_artwork(
            &pool,
            artwork,
            UpdateArtworkRequest {
                status: Some(ArtworkStatus::Sold),
                ..UpdateArtworkRequest::default()
            },
        )
        .await;
        assert!(matches!(premature, Err(GalleryError::Conflict(_))));

        let sale = CreateSaleRequest {
            artwork_id: Some(artwork),
            buyer_name: Some("Moderna Museet".to_string()),
            payment_method: Some("transfer".to_string()),
            price: Some(8000.0),
            ..CreateSaleRequest::default()
        };
        SaleService::create_sale(&pool, sale).await.unwrap();

        // Resending the fetched artwork with status sold is accepted
        let fetched = ArtworkService::get_artwork(&pool, artwork).await.unwrap();
        let mut body = serde_json::to_value(&fetched).unwrap();
        body["status"] = serde_json::json!("sold");
        let resend: UpdateArtworkRequest = serde_json::from_value(body).unwrap();
        let updated = ArtworkService::update_artwork(&pool, artwork, resend).await.unwrap();
        assert_eq!(updated.status, ArtworkStatus::Sold);

        let reopened = ArtworkService::update_artwork(
            &pool,
            artwork,
            UpdateArtworkRequest {
                status: Some(ArtworkStatus::Available),
                ..UpdateArtworkRequest::default()
            },
        )
        .await;
        assert!(matches!(reopened, Err(GalleryError::Conflict(_))));
        assert_eq!(fixtures::artwork_status(&pool, artwork).await, "sold");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_delete_refuses_artwork_with_sale(pool: PgPool) {
        let artist = fixtures::insert_artist(&pool, "Hilma af Klint").await;
        let sold = fixtures::insert_artwork(&pool, artist, "Altarpiece", 5000.0).await;
        let unsold = fixtures::insert_artwork(&pool, artist, "Swan", 4000.0).await;

        let sale = CreateSaleRequest {
            artwork_id: Some(sold),
            buyer_name: Some("Collector".to_string()),
            payment_method: Some("card".to_string()),
            price: Some(5000.0),
            ..CreateSaleRequest::default()
        };
        SaleService::create_sale(&pool, sale).await.unwrap();

        let result = ArtworkService::delete_artwork(&pool, sold).await;
        assert!(matches!(result, Err(GalleryError::Conflict(_))));

        ArtworkService::delete_artwork(&pool, unsold).await.unwrap();
        let missing = ArtworkService::get_artwork(&pool, unsold).await;
        assert!(matches!(missing, Err(GalleryError::NotFound(_))));
    }
}
