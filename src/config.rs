//! Server configuration parsed from environment variables.

use std::path::PathBuf;

use mapcore::consts::{
    DEFAULT_BACKEND_URL, DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_REQUEST_TIMEOUT_SECS, DEFAULT_TILE_SIZE,
    DEFAULT_VIEWPORT_HEIGHT, DEFAULT_VIEWPORT_WIDTH,
};

pub const DEFAULT_PORT: u16 = 3000;

/// Errors produced while reading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// A required variable is not set.
    #[error("missing required env var {0}")]
    Missing(&'static str),

    /// A variable is set but cannot be used.
    #[error("invalid {var}: {reason}")]
    Invalid { var: &'static str, reason: String },
}

/// Where the boundary GeoJSON comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoundaryLocation {
    File(PathBuf),
    Url(String),
}

impl BoundaryLocation {
    /// `http://` and `https://` values are URLs; anything else is a file path.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with("http://") || raw.starts_with("https://") {
            Self::Url(raw.to_string())
        } else {
            Self::File(PathBuf::from(raw))
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HttpTimeouts {
    pub request_secs: u64,
    pub connect_secs: u64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub port: u16,
    pub boundary: Option<BoundaryLocation>,
    pub backend_url: String,
    pub fair_name: String,
    pub tile_size: u32,
    pub viewport_width: f64,
    pub viewport_height: f64,
    pub timeouts: HttpTimeouts,
    pub static_dir: Option<PathBuf>,
}

impl Config {
    /// Build typed config from environment variables.
    ///
    /// Required:
    /// - `FAIRMAP_FAIR_NAME`: fair whose places are listed
    ///
    /// Optional:
    /// - `PORT`: default 3000
    /// - `FAIRMAP_BOUNDARY`: GeoJSON file path or `http(s)://` URL; the map
    ///   runs unmasked when absent
    /// - `FAIRMAP_BACKEND_URL`: default `http://127.0.0.1:1488`
    /// - `FAIRMAP_TILE_SIZE`: default 256
    /// - `FAIRMAP_VIEWPORT_WIDTH` / `FAIRMAP_VIEWPORT_HEIGHT`: default 1024 x 500
    /// - `FAIRMAP_REQUEST_TIMEOUT_SECS`: default 30
    /// - `FAIRMAP_CONNECT_TIMEOUT_SECS`: default 10
    /// - `FAIRMAP_STATIC_DIR`: front-end files served at `/`
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the fair name is missing or a size is unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let fair_name = std::env::var("FAIRMAP_FAIR_NAME")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .ok_or(ConfigError::Missing("FAIRMAP_FAIR_NAME"))?;

        let boundary = non_empty_var("FAIRMAP_BOUNDARY").map(|v| BoundaryLocation::parse(&v));
        let backend_url = non_empty_var("FAIRMAP_BACKEND_URL")
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let tile_size = env_parse("FAIRMAP_TILE_SIZE", DEFAULT_TILE_SIZE);
        if tile_size == 0 {
            return Err(ConfigError::Invalid { var: "FAIRMAP_TILE_SIZE", reason: "must be positive".into() });
        }
        let viewport_width = env_parse("FAIRMAP_VIEWPORT_WIDTH", DEFAULT_VIEWPORT_WIDTH);
        let viewport_height = env_parse("FAIRMAP_VIEWPORT_HEIGHT", DEFAULT_VIEWPORT_HEIGHT);
        for (var, value) in [("FAIRMAP_VIEWPORT_WIDTH", viewport_width), ("FAIRMAP_VIEWPORT_HEIGHT", viewport_height)] {
            if !value.is_finite() || value <= 0.0 {
                return Err(ConfigError::Invalid { var, reason: format!("{value} is not a positive size") });
            }
        }

        Ok(Self {
            port: env_parse("PORT", DEFAULT_PORT),
            boundary,
            backend_url,
            fair_name,
            tile_size,
            viewport_width,
            viewport_height,
            timeouts: HttpTimeouts {
                request_secs: env_parse("FAIRMAP_REQUEST_TIMEOUT_SECS", DEFAULT_REQUEST_TIMEOUT_SECS),
                connect_secs: env_parse("FAIRMAP_CONNECT_TIMEOUT_SECS", DEFAULT_CONNECT_TIMEOUT_SECS),
            },
            static_dir: non_empty_var("FAIRMAP_STATIC_DIR").map(PathBuf::from),
        })
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn env_parse<T: std::str::FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
