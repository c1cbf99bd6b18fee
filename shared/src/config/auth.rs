//! Token signing and envelope encryption configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::errors::{ConfigError, ConfigResult};
use crate::utils::duration::parse_duration;

/// Default access token lifetime (15 minutes)
pub const DEFAULT_ACCESS_TOKEN_EXPIRY: u64 = 15 * 60;

/// Default refresh token lifetime (7 days)
pub const DEFAULT_REFRESH_TOKEN_EXPIRY: u64 = 7 * 24 * 60 * 60;

/// Default back-dating applied to `iat`
pub const DEFAULT_CLOCK_SKEW: u64 = 30;

/// Longest accepted token lifetime (366 days)
pub const MAX_TOKEN_EXPIRY: u64 = 366 * 24 * 60 * 60;

/// Largest accepted `iat` back-dating (1 hour)
pub const MAX_CLOCK_SKEW: u64 = 60 * 60;

/// JWT signing configuration
///
/// Access and refresh tokens are signed with independent secrets so that a
/// token of one kind can never be accepted as the other.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct JwtConfig {
    /// Secret for access tokens
    pub access_secret: String,

    /// Secret for refresh tokens
    pub refresh_secret: String,

    /// Access token expiry time in seconds
    #[serde(default = "default_access_expiry")]
    pub access_token_expiry: u64,

    /// Refresh token expiry time in seconds
    #[serde(default = "default_refresh_expiry")]
    pub refresh_token_expiry: u64,

    /// Seconds subtracted from `iat` to tolerate clock drift between services
    #[serde(default = "default_clock_skew")]
    pub clock_skew: u64,
}

impl JwtConfig {
    /// Create a configuration with the given secrets and default lifetimes
    pub fn new(access_secret: impl Into<String>, refresh_secret: impl Into<String>) -> Self {
        Self {
            access_secret: access_secret.into(),
            refresh_secret: refresh_secret.into(),
            access_token_expiry: DEFAULT_ACCESS_TOKEN_EXPIRY,
            refresh_token_expiry: DEFAULT_REFRESH_TOKEN_EXPIRY,
            clock_skew: DEFAULT_CLOCK_SKEW,
        }
    }

    /// Set access token expiry in minutes
    pub fn with_access_expiry_minutes(mut self, minutes: u64) -> Self {
        self.access_token_expiry = minutes * 60;
        self
    }

    /// Set refresh token expiry in days
    pub fn with_refresh_expiry_days(mut self, days: u64) -> Self {
        self.refresh_token_expiry = days * 86400;
        self
    }

    pub fn access_ttl(&self) -> Duration {
        Duration::from_secs(self.access_token_expiry)
    }

    pub fn refresh_ttl(&self) -> Duration {
        Duration::from_secs(self.refresh_token_expiry)
    }

    pub fn clock_skew(&self) -> Duration {
        Duration::from_secs(self.clock_skew)
    }

    /// Check secrets are present and distinct, and lifetimes are non-zero
    /// and within [`MAX_TOKEN_EXPIRY`]
    pub fn validate(&self) -> ConfigResult<()> {
        if self.access_secret.trim().is_empty() {
            return Err(ConfigError::empty("JWT_ACCESS_SECRET"));
        }
        if self.refresh_secret.trim().is_empty() {
            return Err(ConfigError::empty("JWT_REFRESH_SECRET"));
        }
        if self.access_secret == self.refresh_secret {
            return Err(ConfigError::SharedSecret);
        }
        if self.access_token_expiry == 0 {
            return Err(ConfigError::InvalidDuration {
                key: "JWT_ACCESS_EXPIRE_IN".to_string(),
                value: "0".to_string(),
            });
        }
        if self.refresh_token_expiry == 0 {
            return Err(ConfigError::InvalidDuration {
                key: "JWT_REFRESH_EXPIRE_IN".to_string(),
                value: "0".to_string(),
            });
        }
        check_max("JWT_ACCESS_EXPIRE_IN", self.access_token_expiry, MAX_TOKEN_EXPIRY)?;
        check_max("JWT_REFRESH_EXPIRE_IN", self.refresh_token_expiry, MAX_TOKEN_EXPIRY)?;
        check_max("JWT_CLOCK_SKEW", self.clock_skew, MAX_CLOCK_SKEW)
    }
}

fn check_max(key: &str, value: u64, max: u64) -> ConfigResult<()> {
    if value > max {
        return Err(ConfigError::DurationOutOfRange {
            key: key.to_string(),
            value,
            max,
        });
    }
    Ok(())
}

/// How the envelope key is derived from the configured passphrase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum KeyDerivationKind {
    /// Right-pad with `'0'` and truncate to the key length
    #[default]
    Padded,
    /// SHA-256 digest of the passphrase
    Sha256,
}

impl std::str::FromStr for KeyDerivationKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "padded" | "pad" => Ok(Self::Padded),
            "sha256" | "sha-256" => Ok(Self::Sha256),
            other => Err(ConfigError::InvalidValue {
                key: "AES_KEY_DERIVATION".to_string(),
                value: other.to_string(),
            }),
        }
    }
}

/// Claim envelope encryption configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EnvelopeConfig {
    /// Passphrase the symmetric key is derived from
    pub secret: String,

    /// Key derivation strategy
    #[serde(default)]
    pub key_derivation: KeyDerivationKind,
}

impl EnvelopeConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            key_derivation: KeyDerivationKind::default(),
        }
    }

    pub fn with_key_derivation(mut self, kind: KeyDerivationKind) -> Self {
        self.key_derivation = kind;
        self
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if self.secret.is_empty() {
            return Err(ConfigError::empty("AES_SECRET_KEY"));
        }
        Ok(())
    }
}

/// Complete token configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AuthConfig {
    /// JWT signing configuration
    pub jwt: JwtConfig,

    /// Envelope encryption configuration
    pub envelope: EnvelopeConfig,
}

impl AuthConfig {
    /// Load from environment variables
    ///
    /// Missing secrets are reported as errors; there is no development
    /// fallback secret.
    pub fn from_env() -> ConfigResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |key: &str| lookup(key).ok_or_else(|| ConfigError::missing(key));
        let duration_or = |key: &str, default: u64| -> ConfigResult<u64> {
            match lookup(key) {
                Some(value) => parse_duration(&value)
                    .map(|d| d.as_secs())
                    .ok_or_else(|| ConfigError::InvalidDuration {
                        key: key.to_string(),
                        value,
                    }),
                None => Ok(default),
            }
        };

        let jwt = JwtConfig {
            access_secret: required("JWT_ACCESS_SECRET")?,
            refresh_secret: required("JWT_REFRESH_SECRET")?,
            access_token_expiry: duration_or("JWT_ACCESS_EXPIRE_IN", DEFAULT_ACCESS_TOKEN_EXPIRY)?,
            refresh_token_expiry: duration_or("JWT_REFRESH_EXPIRE_IN", DEFAULT_REFRESH_TOKEN_EXPIRY)?,
            clock_skew: duration_or("JWT_CLOCK_SKEW", DEFAULT_CLOCK_SKEW)?,
        };

        let key_derivation = match lookup("AES_KEY_DERIVATION") {
            Some(value) => value.parse()?,
            None => KeyDerivationKind::default(),
        };
        let envelope = EnvelopeConfig {
            secret: required("AES_SECRET_KEY")?,
            key_derivation,
        };

        let config = Self { jwt, envelope };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> ConfigResult<()> {
        self.jwt.validate()?;
        self.envelope.validate()
    }
}

fn default_access_expiry() -> u64 {
    DEFAULT_ACCESS_TOKEN_EXPIRY
}

fn default_refresh_expiry() -> u64 {
    DEFAULT_REFRESH_TOKEN_EXPIRY
}

fn default_clock_skew() -> u64 {
    DEFAULT_CLOCK_SKEW
}
