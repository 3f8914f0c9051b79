// src/models/artwork.rs
// DOCUMENTATION: Artwork records, status enum and DTOs
// PURPOSE: Artworks are the unit of sale and exhibition

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::ArtistSummary;

/// Lifecycle status of an artwork
/// DOCUMENTATION: Changed by sale creation/deletion and exhibition assignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArtworkStatus {
    Available,
    Sold,
    Exhibition,
}

impl ArtworkStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ArtworkStatus::Available => "available",
            ArtworkStatus::Sold => "sold",
            ArtworkStatus::Exhibition => "exhibition",
        }
    }
}

impl fmt::Display for ArtworkStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ArtworkStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(ArtworkStatus::Available),
            "sold" => Ok(ArtworkStatus::Sold),
            "exhibition" => Ok(ArtworkStatus::Exhibition),
            other => Err(format!("unknown artwork status: {}", other)),
        }
    }
}

/// Physical size of a piece
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub height: Option<f64>,
    pub width: Option<f64>,
    pub unit: Option<String>,
}

/// Artist named in a request body: a bare id, or the embedded summary a
/// fetched artwork carries
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ArtistRef {
    Id(Uuid),
    Embedded { id: Uuid },
}

impl ArtistRef {
    pub fn id(&self) -> Uuid {
        match self {
            ArtistRef::Id(id) | ArtistRef::Embedded { id } => *id,
        }
    }
}

/// Artwork row joined with its artist
/// DOCUMENTATION: artist_name/artist_image_url come from the LEFT JOIN on artists
#[derive(Debug, Clone, FromRow)]
pub struct Artwork {
    pub id: Uuid,
    pub title: String,
    pub artist_id: Uuid,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub category: String,
    pub medium: Option<String>,
    pub dimensions: Option<Json<Dimensions>>,
    pub year: Option<i32>,
    pub status: String,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    #[sqlx(default)]
    pub artist_name: Option<String>,
    #[sqlx(default)]
    pub artist_image_url: Option<String>,
}

/// Request DTO for POST /api/artworks
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateArtworkRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    /// Owning artist; required unless `artist` names it
    pub artist_id: Option<Uuid>,

    pub artist: Option<ArtistRef>,

    #[validate(length(min = 1))]
    pub description: String,

    #[validate(range(min = 0.0))]
    pub price: f64,

    pub image_url: Option<String>,

    #[validate(length(min = 1, max = 120))]
    pub category: String,

    pub medium: Option<String>,

    pub dimensions: Option<Dimensions>,

    pub year: Option<i32>,

    pub status: Option<ArtworkStatus>,

    #[serde(default)]
    pub tags: Vec<String>,
}

/// Request DTO for PUT /api/artworks/{id}
/// DOCUMENTATION: All fields are optional - only provided fields are updated
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArtworkRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    pub artist_id: Option<Uuid>,
    pub artist: Option<ArtistRef>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[validate(range(min = 0.0))]
    pub price: Option<f64>,
    pub image_url: Option<String>,
    #[validate(length(min = 1, max = 120))]
    pub category: Option<String>,
    pub medium: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub year: Option<i32>,
    pub status: Option<ArtworkStatus>,
    pub tags: Option<Vec<String>>,
}

impl CreateArtworkRequest {
    pub fn owner_id(&self) -> Option<Uuid> {
        self.artist_id.or_else(|| self.artist.map(|a| a.id()))
    }
}

impl UpdateArtworkRequest {
    pub fn owner_id(&self) -> Option<Uuid> {
        self.artist_id.or_else(|| self.artist.map(|a| a.id()))
    }
}

/// Query string of GET /api/artworks
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ArtworkQuery {
    pub status: Option<ArtworkStatus>,
    pub category: Option<String>,
    pub artist: Option<Uuid>,
}

/// Artwork DTO for API responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtworkResponse {
    pub id: Uuid,
    pub title: String,
    pub artist_id: Uuid,
    pub artist: Option<ArtistSummary>,
    pub description: String,
    pub price: f64,
    pub image_url: Option<String>,
    pub category: String,
    pub medium: Option<String>,
    pub dimensions: Option<Dimensions>,
    pub year: Option<i32>,
    pub status: ArtworkStatus,
    pub tags: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Artwork {
    /// Parsed status; the table CHECK constraint keeps this total
    pub fn status(&self) -> ArtworkStatus {
        self.status.parse().unwrap_or_else(|e| {
            log::warn!("Artwork {} has {}, treating as available", self.id, e);
            ArtworkStatus::Available
        })
    }

    /// Convert Artwork to ArtworkResponse for API
    pub fn to_response(&self) -> ArtworkResponse {
        let artist = self.artist_name.as_ref().map(|name| ArtistSummary {
            id: self.artist_id,
            name: name.clone(),
            image_url: self.artist_image_url.clone(),
        });

        ArtworkResponse {
            id: self.id,
            title: self.title.clone(),
            artist_id: self.artist_id,
            artist,
            description: self.description.clone(),
            price: self.price,
            image_url: self.image_url.clone(),
            category: self.category.clone(),
            medium: self.medium.clone(),
            dimensions: self.dimensions.as_ref().map(|d| d.0.clone()),
            year: self.year,
            status: self.status(),
            tags: self.tags.clone(),
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_round_trip_through_str() {
        for status in [
            ArtworkStatus::Available,
            ArtworkStatus::Sold,
            ArtworkStatus::Exhibition,
        ] {
            assert_eq!(status.as_str().parse::<ArtworkStatus>(), Ok(status));
        }
        assert!("archived".parse::<ArtworkStatus>().is_err());
    }

    #[test]
    fn test_create_request_accepts_artist_alias() {
        let artist_id = Uuid::new_v4();
        let req: CreateArtworkRequest = serde_json::from_value(serde_json::json!({
            "title": "Starry Night",
            "artist": artist_id,
            "description": "Oil on canvas",
            "price": 1200.0,
            "category": "Painting"
        }))
        .unwrap();

        assert_eq!(req.owner_id(), Some(artist_id));
        assert!(req.tags.is_empty());
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_create_request_rejects_negative_price() {
        let req: CreateArtworkRequest = serde_json::from_value(serde_json::json!({
            "title": "Untitled",
            "artistId": Uuid::new_v4(),
            "description": "Charcoal",
            "price": -5.0,
            "category": "Drawing"
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }

    fn joined_artwork() -> Artwork {
        Artwork {
            id: Uuid::new_v4(),
            title: "Water Lilies".to_string(),
            artist_id: Uuid::new_v4(),
            description: "Series".to_string(),
            price: 900.0,
            image_url: None,
            category: "Painting".to_string(),
            medium: Some("Oil".to_string()),
            dimensions: Some(Json(Dimensions {
                height: Some(100.0),
                width: Some(200.0),
                unit: Some("cm".to_string()),
            })),
            year: Some(1906),
            status: "exhibition".to_string(),
            tags: vec![],
            created_at: Utc::now(),
            updated_at: Utc::now(),
            artist_name: Some("Claude Monet".to_string()),
            artist_image_url: None,
        }
    }

    #[test]
    fn test_response_embeds_artist_when_joined() {
        let artwork = joined_artwork();

        let response = artwork.to_response();
        assert_eq!(response.status, ArtworkStatus::Exhibition);
        assert_eq!(response.artist.as_ref().map(|a| a.name.as_str()), Some("Claude Monet"));

        let json = serde_json::to_value(&response).unwrap();
        assert_eq!(json["status"], "exhibition");
        assert_eq!(json["artistId"], serde_json::json!(artwork.artist_id));
        assert_eq!(json["dimensions"]["unit"], "cm");
    }

    #[test]
    fn test_fetched_artwork_can_be_sent_back_as_update() {
        let artwork = joined_artwork();
        let mut body = serde_json::to_value(artwork.to_response()).unwrap();
        body["status"] = serde_json::json!("sold");

        let req: UpdateArtworkRequest = serde_json::from_value(body).unwrap();

        assert_eq!(req.owner_id(), Some(artwork.artist_id));
        assert_eq!(req.status, Some(ArtworkStatus::Sold));
        assert_eq!(req.title.as_deref(), Some("Water Lilies"));
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_update_accepts_embedded_artist_alone() {
        let artist_id = Uuid::new_v4();
        let req: UpdateArtworkRequest = serde_json::from_value(serde_json::json!({
            "artist": { "id": artist_id, "name": "Berthe Morisot", "imageUrl": null }
        }))
        .unwrap();

        assert_eq!(req.owner_id(), Some(artist_id));
    }
}
