// src/models/exhibition.rs
// DOCUMENTATION: Exhibition records and DTOs
// PURPOSE: An exhibition groups artworks over a date range at a venue

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;
use validator::Validate;

use super::{dates, ArtworkResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExhibitionStatus {
    Upcoming,
    Ongoing,
    Completed,
}

impl ExhibitionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExhibitionStatus::Upcoming => "upcoming",
            ExhibitionStatus::Ongoing => "ongoing",
            ExhibitionStatus::Completed => "completed",
        }
    }
}

impl fmt::Display for ExhibitionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ExhibitionStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upcoming" => Ok(ExhibitionStatus::Upcoming),
            "ongoing" => Ok(ExhibitionStatus::Ongoing),
            "completed" => Ok(ExhibitionStatus::Completed),
            other => Err(format!("unknown exhibition status: {}", other)),
        }
    }
}

/// Venue stored as a JSONB document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Location {
    pub venue: Option<String>,
    pub address: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

/// Exhibition record as stored in the exhibitions table
#[derive(Debug, Clone, FromRow)]
pub struct Exhibition {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub artwork_ids: Vec<Uuid>,
    pub image_url: String,
    pub location: Option<Json<Location>>,
    pub curator: String,
    pub status: String,
    pub ticket_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /api/exhibitions
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateExhibitionRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: String,

    #[validate(length(min = 1))]
    pub description: String,

    #[serde(deserialize_with = "dates::deserialize")]
    pub start_date: DateTime<Utc>,

    #[serde(deserialize_with = "dates::deserialize")]
    pub end_date: DateTime<Utc>,

    #[serde(default)]
    pub artworks: Vec<Uuid>,

    #[validate(length(min = 1))]
    pub image_url: String,

    pub location: Option<Location>,

    #[validate(length(min = 1, max = 255))]
    pub curator: String,

    pub status: Option<ExhibitionStatus>,

    #[validate(range(min = 0.0))]
    pub ticket_price: Option<f64>,
}

/// Request DTO for PUT /api/exhibitions/{id}
/// DOCUMENTATION: All fields are optional - only provided fields are updated
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateExhibitionRequest {
    #[validate(length(min = 1, max = 255))]
    pub title: Option<String>,
    #[validate(length(min = 1))]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "dates::deserialize_opt")]
    pub start_date: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "dates::deserialize_opt")]
    pub end_date: Option<DateTime<Utc>>,
    pub artworks: Option<Vec<Uuid>>,
    #[validate(length(min = 1))]
    pub image_url: Option<String>,
    pub location: Option<Location>,
    #[validate(length(min = 1, max = 255))]
    pub curator: Option<String>,
    pub status: Option<ExhibitionStatus>,
    #[validate(range(min = 0.0))]
    pub ticket_price: Option<f64>,
}

/// Exhibition DTO for API responses with its artworks resolved
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExhibitionResponse {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub artworks: Vec<ArtworkResponse>,
    pub image_url: String,
    pub location: Option<Location>,
    pub curator: String,
    pub status: ExhibitionStatus,
    pub ticket_price: f64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Exhibition {
    pub fn status(&self) -> ExhibitionStatus {
        self.status.parse().unwrap_or_else(|e| {
            log::warn!("Exhibition {} has {}, treating as upcoming", self.id, e);
            ExhibitionStatus::Upcoming
        })
    }

    /// Build the response, keeping the stored artwork order
    pub fn to_response(&self, artworks: &[ArtworkResponse]) -> ExhibitionResponse {
        let ordered = self
            .artwork_ids
            .iter()
            .filter_map(|id| artworks.iter().find(|a| a.id == *id).cloned())
            .collect();

        ExhibitionResponse {
            id: self.id,
            title: self.title.clone(),
            description: self.description.clone(),
            start_date: self.start_date,
            end_date: self.end_date,
            artworks: ordered,
            image_url: self.image_url.clone(),
            location: self.location.as_ref().map(|l| l.0.clone()),
            curator: self.curator.clone(),
            status: self.status(),
            ticket_price: self.ticket_price,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
