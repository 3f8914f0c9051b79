// src/services/rate_limit.rs
// DOCUMENTATION: Per-client throttling of credential endpoints
// PURPOSE: Slow down password guessing against login and register

use crate::errors::GalleryError;
use governor::{DefaultKeyedRateLimiter, Quota, RateLimiter};
use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

/// Keyed limiter; the key is the client IP as reported by actix
pub struct AuthRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
}

impl AuthRateLimiter {
    /// Allow `attempts` requests per minute per key
    pub fn per_minute(attempts: u32) -> Self {
        let attempts = NonZeroU32::new(attempts).unwrap_or(NonZeroU32::MIN);
        Self {
            limiter: RateLimiter::keyed(Quota::per_minute(attempts)),
        }
    }

    /// Consume one attempt for `key`
    pub fn check(&self, key: &str) -> Result<(), GalleryError> {
        self.limiter.check_key(&key.to_string()).map_err(|_| {
            log::warn!("Auth rate limit exceeded for {}", key);
            GalleryError::RateLimitExceeded
        })
    }

    /// Forget keys whose quota has fully replenished
    pub fn cleanup(&self) {
        let before = self.limiter.len();
        self.limiter.retain_recent();
        self.limiter.shrink_to_fit();
        let after = self.limiter.len();

        if before > after {
            log::debug!(
                "Rate limiter cleanup: removed {} idle keys ({} remaining)",
                before - after,
                after
            );
        }
    }
}

/// Start background cleanup task
/// DOCUMENTATION: Periodically drops idle keys so the map does not grow unbounded
pub fn start_cleanup_task(limiter: Arc<AuthRateLimiter>, interval_seconds: u64) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(interval_seconds));

        loop {
            interval.tick().await;
            limiter.cleanup();
        }
    });
}
