// src/services/exhibition_service.rs
// DOCUMENTATION: Business logic for exhibitions
// PURPOSE: Keeps artwork statuses in step with exhibition membership

use crate::db::{ArtworkRepository, ExhibitionRecord, ExhibitionRepository};
use crate::errors::GalleryError;
use crate::models::{
    ArtworkResponse, CreateExhibitionRequest, Exhibition, ExhibitionResponse, ExhibitionStatus,
    UpdateExhibitionRequest,
};
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use std::collections::HashSet;
use uuid::Uuid;

pub struct ExhibitionService;

impl ExhibitionService {
    pub async fn list_exhibitions(pool: &PgPool) -> Result<Vec<ExhibitionResponse>, GalleryError> {
        let exhibitions = ExhibitionRepository::list(pool).await?;

        let all_ids: Vec<Uuid> = dedupe_ids(
            exhibitions
                .iter()
                .flat_map(|e| e.artwork_ids.iter().copied())
                .collect(),
        );
        let artworks = Self::load_artworks(pool, &all_ids).await?;

        Ok(exhibitions
            .iter()
            .map(|e| e.to_response(&artworks))
            .collect())
    }

    pub async fn get_exhibition(pool: &PgPool, id: Uuid) -> Result<ExhibitionResponse, GalleryError> {
        let exhibition = ExhibitionRepository::get_by_id(pool, id).await?;
        Self::respond(pool, &exhibition).await
    }

    /// Artworks shown in an exhibition, in exhibition order
    pub async fn get_exhibition_artworks(
        pool: &PgPool,
        id: Uuid,
    ) -> Result<Vec<ArtworkResponse>, GalleryError> {
        Ok(Self::get_exhibition(pool, id).await?.artworks)
    }

    pub async fn create_exhibition(
        pool: &PgPool,
        req: CreateExhibitionRequest,
    ) -> Result<ExhibitionResponse, GalleryError> {
        validate_date_range(req.start_date, req.end_date)?;

        let record = ExhibitionRecord {
            title: req.title,
            description: req.description,
            start_date: req.start_date,
            end_date: req.end_date,
            artwork_ids: dedupe_ids(req.artworks),
            image_url: req.image_url,
            location: req.location,
            curator: req.curator,
            status: req.status.unwrap_or(ExhibitionStatus::Upcoming),
            ticket_price: req.ticket_price.unwrap_or(0.0),
        };

        let mut tx = pool
            .begin()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))?;

        ensure_artworks_exist(&mut tx, &record.artwork_ids).await?;
        let exhibition = ExhibitionRepository::create(&mut tx, &record).await?;
        let marked = ArtworkRepository::mark_exhibited(&mut tx, &record.artwork_ids).await?;

        tx.commit()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))?;

        log::info!(
            "Exhibition {} opened with {} artwork(s), {} moved to exhibition",
            exhibition.id,
            record.artwork_ids.len(),
            marked
        );
        Self::respond(pool, &exhibition).await
    }

    /// Partial update; artwork membership changes re-sync artwork statuses
    pub async fn update_exhibition(
        pool: &PgPool,
        id: Uuid,
        req: UpdateExhibitionRequest,
    ) -> Result<ExhibitionResponse, GalleryError> {
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))?;

        let existing = ExhibitionRepository::lock_by_id(&mut tx, id).await?;
        let record = merge_update(&existing, req);
        validate_date_range(record.start_date, record.end_date)?;

        let (removed, added) = diff_ids(&existing.artwork_ids, &record.artwork_ids);
        ensure_artworks_exist(&mut tx, &added).await?;

        let exhibition = ExhibitionRepository::update(&mut tx, id, &record).await?;
        ArtworkRepository::release_from_exhibition(&mut tx, id, &removed).await?;
        ArtworkRepository::mark_exhibited(&mut tx, &added).await?;

        tx.commit()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))?;

        if !removed.is_empty() || !added.is_empty() {
            log::info!(
                "Exhibition {} artworks changed: {} added, {} removed",
                id,
                added.len(),
                removed.len()
            );
        }
        Self::respond(pool, &exhibition).await
    }

    /// Delete an exhibition and release its artworks
    pub async fn delete_exhibition(pool: &PgPool, id: Uuid) -> Result<(), GalleryError> {
        let mut tx = pool
            .begin()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))?;

        let existing = ExhibitionRepository::lock_by_id(&mut tx, id).await?;
        ExhibitionRepository::delete(&mut tx, id).await?;
        let released =
            ArtworkRepository::release_from_exhibition(&mut tx, id, &existing.artwork_ids).await?;

        tx.commit()
            .await
            .map_err(|e| GalleryError::from_sqlx(e, "Exhibition"))?;

        log::info!("Exhibition {} closed, {} artwork(s) released", id, released);
        Ok(())
    }

    async fn respond(pool: &PgPool, exhibition: &Exhibition) -> Result<ExhibitionResponse, GalleryError> {
        let artworks = Self::load_artworks(pool, &exhibition.artwork_ids).await?;
        Ok(exhibition.to_response(&artworks))
    }

    async fn load_artworks(pool: &PgPool, ids: &[Uuid]) -> Result<Vec<ArtworkResponse>, GalleryError> {
        let artworks = ArtworkRepository::get_by_ids(pool, ids).await?;
        Ok(artworks.iter().map(|a| a.to_response()).collect())
    }
}

async fn ensure_artworks_exist(conn: &mut PgConnection, ids: &[Uuid]) -> Result<(), GalleryError> {
    let found = ArtworkRepository::get_by_ids(&mut *conn, ids).await?;
    let found: HashSet<Uuid> = found.iter().map(|a| a.id).collect();

    match ids.iter().find(|id| !found.contains(id)) {
        Some(missing) => Err(GalleryError::InvalidInput(format!(
            "Artwork {} does not exist",
            missing
        ))),
        None => Ok(()),
    }
}

fn validate_date_range(start: DateTime<Utc>, end: DateTime<Utc>) -> Result<(), GalleryError> {
    if end < start {
        return Err(GalleryError::ValidationError(
            "endDate must not be before startDate".to_string(),
        ));
    }
    Ok(())
}

/// Remove duplicate ids, keeping first occurrence order
fn dedupe_ids(ids: Vec<Uuid>) -> Vec<Uuid> {
    let mut seen = HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}

/// (removed, added) going from `old` to `new`
fn diff_ids(old: &[Uuid], new: &[Uuid]) -> (Vec<Uuid>, Vec<Uuid>) {
    let removed = old.iter().filter(|id| !new.contains(id)).copied().collect();
    let added = new.iter().filter(|id| !old.contains(id)).copied().collect();
    (removed, added)
}

fn merge_update(existing: &Exhibition, req: UpdateExhibitionRequest) -> ExhibitionRecord {
    ExhibitionRecord {
        title: req.title.unwrap_or_else(|| existing.title.clone()),
        description: req.description.unwrap_or_else(|| existing.description.clone()),
        start_date: req.start_date.unwrap_or(existing.start_date),
        end_date: req.end_date.unwrap_or(existing.end_date),
        artwork_ids: req
            .artworks
            .map(dedupe_ids)
            .unwrap_or_else(|| existing.artwork_ids.clone()),
        image_url: req.image_url.unwrap_or_else(|| existing.image_url.clone()),
        location: req
            .location
            .or_else(|| existing.location.as_ref().map(|l| l.0.clone())),
        curator: req.curator.unwrap_or_else(|| existing.curator.clone()),
        status: req.status.unwrap_or_else(|| existing.status()),
        ticket_price: req.ticket_price.unwrap_or(existing.ticket_price),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::fixtures;
    use chrono::Duration;

    fn existing(artwork_ids: Vec<Uuid>) -> Exhibition {
        let start = Utc::now();
        Exhibition {
            id: Uuid::new_v4(),
            title: "Impressions".to_string(),
            description: "Light and colour".to_string(),
            start_date: start,
            end_date: start + Duration::days(30),
            artwork_ids,
            image_url: "/images/impressions.jpg".to_string(),
            location: None,
            curator: "M. Cassatt".to_string(),
            status: "ongoing".to_string(),
            ticket_price: 12.5,
            created_at: start,
            updated_at: start,
        }
    }

    #[test]
    fn test_dedupe_keeps_first_occurrence() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        assert_eq!(dedupe_ids(vec![a, b, a, b, a]), vec![a, b]);
    }

    #[test]
    fn test_diff_ids() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let c = Uuid::new_v4();

        let (removed, added) = diff_ids(&[a, b], &[b, c]);
        assert_eq!(removed, vec![a]);
        assert_eq!(added, vec![c]);

        let (removed, added) = diff_ids(&[a], &[a]);
        assert!(removed.is_empty() && added.is_empty());
    }

    #[test]
    fn test_date_range_validation() {
        let now = Utc::now();
        assert!(validate_date_range(now, now).is_ok());
        assert!(validate_date_range(now, now + Duration::days(1)).is_ok());
        assert!(validate_date_range(now, now - Duration::days(1)).is_err());
    }

    #[test]
    fn test_merge_update_keeps_unset_fields() {
        let artwork = Uuid::new_v4();
        let current = existing(vec![artwork]);

        let record = merge_update(
            &current,
            UpdateExhibitionRequest {
                title: Some("Impressions II".to_string()),
                ..UpdateExhibitionRequest::default()
            },
        );

        assert_eq!(record.title, "Impressions II");
        assert_eq!(record.curator, "M. Cassatt");
        assert_eq!(record.artwork_ids, vec![artwork]);
        assert_eq!(record.status, ExhibitionStatus::Ongoing);
        assert_eq!(record.ticket_price, 12.5);
    }

    #[test]
    fn test_merge_update_can_move_end_before_start() {
        let current = existing(vec![]);
        let record = merge_update(
            &current,
            UpdateExhibitionRequest {
                end_date: Some(current.start_date - Duration::days(1)),
                ..UpdateExhibitionRequest::default()
            },
        );

        assert!(validate_date_range(record.start_date, record.end_date).is_err());
    }

    fn show_of(title: &str, artworks: &[Uuid]) -> CreateExhibitionRequest {
        serde_json::from_value(serde_json::json!({
            "title": title,
            "description": "Group show",
            "startDate": "2024-05-01",
            "endDate": "2024-06-01",
            "artworks": artworks,
            "imageUrl": "/images/show.jpg",
            "curator": "Lucy Lippard"
        }))
        .unwrap()
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_release_waits_for_last_exhibition(pool: PgPool) {
        let artist = fixtures::insert_artist(&pool, "Agnes Martin").await;
        let shared = fixtures::insert_artwork(&pool, artist, "Friendship", 7000.0).await;
        let solo = fixtures::insert_artwork(&pool, artist, "Night Sea", 6000.0).await;

        let first = ExhibitionService::create_exhibition(&pool, show_of("Grids", &[shared, solo]))
            .await
            .unwrap();
        let second = ExhibitionService::create_exhibition(&pool, show_of("Lines", &[shared]))
            .await
            .unwrap();
        assert_eq!(fixtures::artwork_status(&pool, shared).await, "exhibition");

        ExhibitionService::delete_exhibition(&pool, first.id).await.unwrap();
        assert_eq!(fixtures::artwork_status(&pool, shared).await, "exhibition");
        assert_eq!(fixtures::artwork_status(&pool, solo).await, "available");

        ExhibitionService::delete_exhibition(&pool, second.id).await.unwrap();
        assert_eq!(fixtures::artwork_status(&pool, shared).await, "available");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_update_releases_removed_artworks(pool: PgPool) {
        let artist = fixtures::insert_artist(&pool, "Agnes Martin").await;
        let kept = fixtures::insert_artwork(&pool, artist, "Untitled #1", 3000.0).await;
        let dropped = fixtures::insert_artwork(&pool, artist, "Untitled #2", 3000.0).await;

        let show = ExhibitionService::create_exhibition(&pool, show_of("Grids", &[kept, dropped]))
            .await
            .unwrap();

        let update = UpdateExhibitionRequest {
            artworks: Some(vec![kept]),
            ..UpdateExhibitionRequest::default()
        };
        let updated = ExhibitionService::update_exhibition(&pool, show.id, update)
            .await
            .unwrap();

        assert_eq!(updated.artworks.len(), 1);
        assert_eq!(fixtures::artwork_status(&pool, kept).await, "exhibition");
        assert_eq!(fixtures::artwork_status(&pool, dropped).await, "available");
    }

    #[sqlx::test(migrations = "./migrations")]
    #[ignore = "needs a Postgres DATABASE_URL"]
    async fn test_unknown_artwork_rolls_back(pool: PgPool) {
        let artist = fixtures::insert_artist(&pool, "Agnes Martin").await;
        let real = fixtures::insert_artwork(&pool, artist, "Untitled #3", 3000.0).await;

        let result =
            ExhibitionService::create_exhibition(&pool, show_of("Grids", &[real, Uuid::new_v4()]))
                .await;

        assert!(matches!(result, Err(GalleryError::InvalidInput(_))));
        assert_eq!(fixtures::artwork_status(&pool, real).await, "available");
        assert!(ExhibitionService::list_exhibitions(&pool).await.unwrap().is_empty());
    }
}
