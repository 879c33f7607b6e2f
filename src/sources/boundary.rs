//! Boundary loaders: local file, HTTP resource, or nothing configured.

use std::path::PathBuf;

use mapcore::boundary::BoundaryPolygon;

use super::{BoundarySource, LoadError, success_body};
use crate::config::BoundaryLocation;

/// GeoJSON boundary read from disk.
pub struct FileBoundary {
    path: PathBuf,
}

impl FileBoundary {
    #[must_use]
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait::async_trait]
impl BoundarySource for FileBoundary {
    async fn load_boundary(&self) -> Result<BoundaryPolygon, LoadError> {
        let raw = tokio::fs::read_to_string(&self.path).await?;
        Ok(BoundaryPolygon::from_geojson_str(&raw)?)
    }
}

/// GeoJSON boundary fetched with `GET`.
pub struct HttpBoundary {
    http: reqwest::Client,
    url: String,
}

impl HttpBoundary {
    #[must_use]
    pub fn new(http: reqwest::Client, url: String) -> Self {
        Self { http, url }
    }
}

#[async_trait::async_trait]
impl BoundarySource for HttpBoundary {
    async fn load_boundary(&self) -> Result<BoundaryPolygon, LoadError> {
        let response = self.http.get(&self.url).send().await?;
        let raw = success_body(response).await?;
        Ok(BoundaryPolygon::from_geojson_str(&raw)?)
    }
}

/// Stand-in when no boundary location is configured. Always fails.
pub struct NoBoundary;

#[async_trait::async_trait]
impl BoundarySource for NoBoundary {
    async fn load_boundary(&self) -> Result<BoundaryPolygon, LoadError> {
        Err(LoadError::NotConfigured)
    }
}

/// Pick the loader for a configured location.
#[must_use]
pub fn boundary_source(location: Option<&BoundaryLocation>, http: &reqwest::Client) -> Box<dyn BoundarySource> {
    match location {
        Some(BoundaryLocation::File(path)) => Box::new(FileBoundary::new(path.clone())),
        Some(BoundaryLocation::Url(url)) => Box::new(HttpBoundary::new(http.clone(), url.clone())),
        None => Box::new(NoBoundary),
    }
}
