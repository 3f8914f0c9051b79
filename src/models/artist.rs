// src/models/artist.rs
// DOCUMENTATION: Artist records, request and response DTOs
// PURPOSE: Artists double as the login accounts of the gallery staff

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use uuid::Uuid;
use validator::Validate;

/// Contact details stored as a JSONB document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct Contact {
    #[validate(email)]
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
}

/// A prize, residency or other milestone
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Achievement {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub description: Option<String>,
}

/// Artist record as stored in the artists table
/// DOCUMENTATION: password_hash is only present for artists that can log in
#[derive(Debug, Clone, FromRow)]
pub struct Artist {
    pub id: Uuid,
    pub name: String,
    pub password_hash: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub contact: Json<Contact>,
    pub specialization: Vec<String>,
    pub achievements: Json<Vec<Achievement>>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for POST /api/artists
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateArtistRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: String,

    pub bio: Option<String>,

    pub image_url: Option<String>,

    #[validate]
    #[serde(default)]
    pub contact: Option<Contact>,

    #[serde(default)]
    pub specialization: Vec<String>,

    #[serde(default)]
    pub achievements: Vec<Achievement>,
}

/// Request DTO for PUT /api/artists/{id}
/// DOCUMENTATION: All fields are optional - only provided fields are updated
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateArtistRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    #[validate]
    pub contact: Option<Contact>,
    pub specialization: Option<Vec<String>>,
    pub achievements: Option<Vec<Achievement>>,
    pub active: Option<bool>,
}

/// Artist DTO for API responses (never carries the password hash)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistResponse {
    pub id: Uuid,
    pub name: String,
    pub bio: Option<String>,
    pub image_url: Option<String>,
    pub contact: Contact,
    pub specialization: Vec<String>,
    pub achievements: Vec<Achievement>,
    pub active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Compact artist reference embedded in artwork responses
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArtistSummary {
    pub id: Uuid,
    pub name: String,
    pub image_url: Option<String>,
}

impl Artist {
    /// Email used as login identifier, if any
    pub fn email(&self) -> Option<&str> {
        self.contact.0.email.as_deref()
    }

    /// Convert database artist into API response DTO
    pub fn to_response(&self) -> ArtistResponse {
        ArtistResponse {
            id: self.id,
            name: self.name.clone(),
            bio: self.bio.clone(),
            image_url: self.image_url.clone(),
            contact: self.contact.0.clone(),
            specialization: self.specialization.clone(),
            achievements: self.achievements.0.clone(),
            active: self.active,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_artist() -> Artist {
        Artist {
            id: Uuid::new_v4(),
            name: "Frida Kahlo".to_string(),
            password_hash: Some("$2b$10$hash".to_string()),
            bio: None,
            image_url: None,
            contact: Json(Contact {
                email: Some("frida@example.com".to_string()),
                ..Contact::default()
            }),
            specialization: vec!["Portrait".to_string()],
            achievements: Json(vec![]),
            active: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_response_omits_password() {
        let artist = sample_artist();
        let json = serde_json::to_value(artist.to_response()).unwrap();

        assert!(json.get("password").is_none());
        assert!(json.get("passwordHash").is_none());
        assert_eq!(json["contact"]["email"], "frida@example.com");
        assert_eq!(json["imageUrl"], serde_json::Value::Null);
    }

    #[test]
    fn test_create_request_rejects_bad_email() {
        let req: CreateArtistRequest = serde_json::from_value(serde_json::json!({
            "name": "Diego",
            "contact": { "email": "not-an-email" }
        }))
        .unwrap();

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_create_request_requires_name() {
        let req: CreateArtistRequest =
            serde_json::from_value(serde_json::json!({ "name": "" })).unwrap();
        assert!(req.validate().is_err());
    }
}
