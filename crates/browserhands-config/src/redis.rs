//! Optional Redis settings for session caching and queueing.
//!
//! Only connection settings are resolved here. A URL takes priority over
//! individual host/port fields.

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::ConfigError;

const DEFAULT_REDIS_PORT: u16 = 6379;

/// Raw `[redis]` section.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RedisConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub host: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub port: Option<u16>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub db: Option<u32>,
}

/// Resolved connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedisSettings {
    pub host: String,
    pub port: u16,
    pub password: Option<String>,
    pub db: u32,
}

impl RedisSettings {
    /// Connection URL without the password.
    pub fn redacted_url(&self) -> String {
        format!("redis://{}:{}/{}", self.host, self.port, self.db)
    }
}

impl RedisConfig {
    pub fn is_configured(&self) -> bool {
        self.url.is_some() || self.host.is_some()
    }

    /// Resolve into connection settings, or `None` if Redis is not configured.
    pub fn resolve(&self) -> Result<Option<RedisSettings>, ConfigError> {
        if let Some(url) = &self.url {
            return Self::parse_url(url).map(Some);
        }

        Ok(self.host.as_ref().map(|host| RedisSettings {
            host: host.clone(),
            port: self.port.unwrap_or(DEFAULT_REDIS_PORT),
            password: self.password.clone(),
            db: self.db.unwrap_or(0),
        }))
    }

    fn parse_url(raw: &str) -> Result<RedisSettings, ConfigError> {
        let parsed =
            Url::parse(raw).map_err(|e| ConfigError::invalid_value("redis.url", e.to_string()))?;

        if parsed.scheme() != "redis" && parsed.scheme() != "rediss" {
            return Err(ConfigError::invalid_value(
                "redis.url",
                format!("unsupported scheme '{}'", parsed.scheme()),
            ));
        }

        let host = parsed
            .host_str()
            .filter(|h| !h.is_empty())
            .ok_or_else(|| ConfigError::invalid_value("redis.url", "missing host"))?
            .to_string();

        let db = match parsed.path().trim_start_matches('/') {
            "" => 0,
            path => path.parse().map_err(|_| {
                ConfigError::invalid_value("redis.url", format!("invalid database '{}'", path))
            })?,
        };

        Ok(RedisSettings {
            host,
            port: parsed.port().unwrap_or(DEFAULT_REDIS_PORT),
            password: parsed.password().map(str::to_string),
            db,
        })
    }
}
