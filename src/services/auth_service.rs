// src/services/auth_service.rs
// DOCUMENTATION: Password hashing and session tokens
// PURPOSE: Register/login flows on top of the artists table

use crate::config::Config;
use crate::db::ArtistRepository;
use crate::errors::GalleryError;
use crate::models::{Artist, Claims, ClaimsUser, Contact, CreateArtistRequest, LoginRequest, RegisterRequest};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sqlx::PgPool;
use uuid::Uuid;
use validator::Validate;

/// bcrypt work factor
pub const BCRYPT_COST: u32 = 10;

pub struct AuthService;

impl AuthService {
    /// Hash a password off the async executor
    pub async fn hash_password(password: String) -> Result<String, GalleryError> {
        tokio::task::spawn_blocking(move || bcrypt::hash(password, BCRYPT_COST))
            .await
            .map_err(|e| GalleryError::InternalError(e.to_string()))?
            .map_err(|e| {
                log::error!("Password hashing failed: {}", e);
                GalleryError::InternalError(e.to_string())
            })
    }

    /// Compare a password with a stored bcrypt hash
    pub async fn verify_password(password: String, hash: String) -> Result<bool, GalleryError> {
        tokio::task::spawn_blocking(move || bcrypt::verify(password, &hash))
            .await
            .map_err(|e| GalleryError::InternalError(e.to_string()))?
            .map_err(|e| {
                log::warn!("Stored password hash is unreadable: {}", e);
                GalleryError::InvalidCredentials
            })
    }

    /// Sign a session token for an artist
    pub fn issue_token(config: &Config, artist_id: Uuid) -> Result<String, GalleryError> {
        let now = Utc::now();
        let claims = Claims {
            user: ClaimsUser { id: artist_id },
            iat: now.timestamp(),
            exp: (now + Duration::hours(config.jwt_expiry_hours)).timestamp(),
        };

        encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| {
            log::error!("Failed to sign token: {}", e);
            GalleryError::InternalError(e.to_string())
        })
    }

    /// Check signature and expiry of a session token
    pub fn verify_token(config: &Config, token: &str) -> Result<Claims, GalleryError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            &Validation::new(Algorithm::HS256),
        )
        .map(|data| data.claims)
        .map_err(|e| {
            log::warn!("Rejected session token: {}", e);
            GalleryError::InvalidToken
        })
    }

    /// Create a login-capable artist and sign a token for it
    pub async fn register(
        pool: &PgPool,
        config: &Config,
        req: RegisterRequest,
    ) -> Result<(Artist, String), GalleryError> {
        let (name, email, password) = match (&req.name, &req.email, &req.password) {
            (Some(name), Some(email), Some(password))
                if !name.trim().is_empty() && !email.trim().is_empty() && !password.is_empty() =>
            {
                (name.trim().to_string(), email.trim().to_string(), password.clone())
            }
            _ => {
                return Err(GalleryError::InvalidInput(
                    "Please provide all required fields".to_string(),
                ))
            }
        };
        req.validate()?;

        if ArtistRepository::find_by_email(pool, &email).await?.is_some() {
            log::warn!("Registration attempted with existing email");
            return Err(GalleryError::AlreadyExists("Email already in use".to_string()));
        }

        let password_hash = Self::hash_password(password).await?;

        let create = CreateArtistRequest {
            name,
            bio: None,
            image_url: None,
            contact: Some(Contact {
                email: Some(email),
                ..Contact::default()
            }),
            specialization: Vec::new(),
            achievements: Vec::new(),
        };

        let artist = ArtistRepository::create(pool, &create, Some(&password_hash)).await?;
        let token = Self::issue_token(config, artist.id)?;

        log::info!("Registered artist account: {}", artist.id);
        Ok((artist, token))
    }

    /// Verify credentials and sign a token
    pub async fn login(
        pool: &PgPool,
        config: &Config,
        req: LoginRequest,
    ) -> Result<(Artist, String), GalleryError> {
        let (email, password) = match (req.email, req.password) {
            (Some(email), Some(password)) if !email.trim().is_empty() && !password.is_empty() => {
                (email, password)
            }
            _ => {
                return Err(GalleryError::InvalidInput(
                    "Please provide email and password".to_string(),
                ))
            }
        };

        let artist = ArtistRepository::find_by_email(pool, &email)
            .await?
            .ok_or(GalleryError::InvalidCredentials)?;

        let hash = match (&artist.password_hash, artist.active) {
            (Some(hash), true) => hash.clone(),
            _ => {
                log::warn!("Login refused for artist without active account: {}", artist.id);
                return Err(GalleryError::InvalidCredentials);
            }
        };

        if !Self::verify_password(password, hash).await? {
            log::warn!("Invalid password for artist: {}", artist.id);
            return Err(GalleryError::InvalidCredentials);
        }

        let token = Self::issue_token(config, artist.id)?;
        log::info!("Artist logged in: {}", artist.id);
        Ok((artist, token))
    }

    /// Profile of the logged-in artist
    pub async fn current_artist(pool: &PgPool, id: Uuid) -> Result<Artist, GalleryError> {
        ArtistRepository::get_by_id(pool, id)
            .await
            .map_err(|e| match e {
                GalleryError::NotFound(_) => GalleryError::NotFound("User not found".to_string()),
                other => other,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_round_trip() {
        let config = Config::for_tests();
        let id = Uuid::new_v4();

        let token = AuthService::issue_token(&config, id).unwrap();
        let claims = AuthService::verify_token(&config, &token).unwrap();

        assert_eq!(claims.user.id, id);
        assert_eq!(claims.exp - claims.iat, 24 * 3600);
    }

    #[test]
    fn test_token_signed_with_other_secret_is_rejected() {
        let config = Config::for_tests();
        let mut other = Config::for_tests();
        other.jwt_secret = "another-secret".to_string();

        let token = AuthService::issue_token(&other, Uuid::new_v4()).unwrap();
        let result = AuthService::verify_token(&config, &token);

        assert!(matches!(result, Err(GalleryError::InvalidToken)));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let config = Config::for_tests();
        let past = Utc::now() - Duration::hours(2);
        let claims = Claims {
            user: ClaimsUser { id: Uuid::new_v4() },
            iat: (past - Duration::hours(24)).timestamp(),
            exp: past.timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .unwrap();

        assert!(AuthService::verify_token(&config, &token).is_err());
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let config = Config::for_tests();
        assert!(AuthService::verify_token(&config, "not.a.jwt").is_err());
    }

    #[tokio::test]
    async fn test_password_hash_and_verify() {
        let hash = AuthService::hash_password("s3cret-pass".to_string())
            .await
            .unwrap();

        assert!(hash.starts_with("$2"));
        assert!(AuthService::verify_password("s3cret-pass".to_string(), hash.clone())
            .await
            .unwrap());
        assert!(!AuthService::verify_password("wrong".to_string(), hash)
            .await
            .unwrap());
    }
}
