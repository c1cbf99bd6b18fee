//! Configuration for token issuance and verification

use chrono::Duration;
use std::fmt;
use sw_shared::{ConfigError, ConfigResult, JwtConfig};

use crate::domain::entities::token::TokenKind;

/// Signing secrets and lifetimes per token kind
#[derive(Clone)]
pub struct TokenConfig {
    /// Secret for access tokens
    pub access_secret: String,
    /// Secret for refresh tokens
    pub refresh_secret: String,
    /// Access token lifetime
    pub access_ttl: Duration,
    /// Refresh token lifetime
    pub refresh_ttl: Duration,
    /// Back-dating applied to `iat`
    pub clock_skew: Duration,
}

impl TokenConfig {
    /// Configuration with default lifetimes (15 minutes / 7 days, 30s skew)
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_ttl: Duration::minutes(15),
            refresh_ttl: Duration::days(7),
            clock_skew: Duration::seconds(30),
        }
    }

    /// Convert validated shared configuration
    pub fn from_jwt(config: &JwtConfig) -> ConfigResult<Self> {
        config.validate()?;

        Ok(Self {
            access_secret: config.access_secret.clone(),
            refresh_secret: config.refresh_secret.clone(),
            access_ttl: to_chrono("JWT_ACCESS_EXPIRE_IN", config.access_ttl())?,
            refresh_ttl: to_chrono("JWT_REFRESH_EXPIRE_IN", config.refresh_ttl())?,
            clock_skew: to_chrono("JWT_CLOCK_SKEW", config.clock_skew())?,
        })
    }

    pub fn with_access_ttl(mut self, ttl: Duration) -> Self {
        self.access_ttl = ttl;
        self
    }

    pub fn with_refresh_ttl(mut self, ttl: Duration) -> Self {
        self.refresh_ttl = ttl;
        self
    }

    pub fn with_clock_skew(mut self, skew: Duration) -> Self {
        self.clock_skew = skew;
        self
    }

    pub fn secret(&self, kind: TokenKind) -> &str {
        match kind {
            TokenKind::Access => &self.access_secret,
            TokenKind::Refresh => &self.refresh_secret,
        }
    }

    pub fn ttl(&self, kind: TokenKind) -> Duration {
        match kind {
            TokenKind::Access => self.access_ttl,
            TokenKind::Refresh => self.refresh_ttl,
        }
    }
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("access_ttl", &self.access_ttl)
            .field("refresh_ttl", &self.refresh_ttl)
            .field("clock_skew", &self.clock_skew)
            .finish_non_exhaustive()
    }
}

fn to_chrono(key: &str, value: std::time::Duration) -> ConfigResult<Duration> {
    Duration::from_std(value).map_err(|_| ConfigError::InvalidDuration {
        key: key.to_string(),
        value: value.as_secs().to_string(),
    })
}
