// src/models/auth.rs

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::Artist;

/// Body of POST /api/auth/register
/// DOCUMENTATION: Fields are optional so missing ones produce a 400 with a
/// readable message instead of a deserialization failure
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, max = 255))]
    pub name: Option<String>,
    #[validate(email)]
    pub email: Option<String>,
    #[validate(length(min = 6, max = 128))]
    pub password: Option<String>,
}

/// Body of POST /api/auth/login
#[derive(Debug, Clone, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Session token payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub user: ClaimsUser,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimsUser {
    pub id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub id: Uuid,
    pub name: String,
    pub email: Option<String>,
}

/// Response of register and login
#[derive(Debug, Clone, Serialize)]
pub struct AuthResponse {
    pub message: String,
    pub token: String,
    pub user: AuthUser,
}

impl AuthUser {
    pub fn from_artist(artist: &Artist) -> Self {
        AuthUser {
            id: artist.id,
            name: artist.name.clone(),
            email: artist.email().map(str::to_string),
        }
    }
}
