//! Loaders for the editor's two initial inputs.
//!
//! DESIGN
//! ======
//! Each input sits behind an async trait so the session can run against
//! real files and HTTP endpoints in production and against in-memory fakes
//! in tests. A loader either returns the whole value or a [`LoadError`];
//! deciding what a failure means for the map is the session's job.

pub mod backend;
pub mod boundary;

use std::time::Duration;

use mapcore::boundary::{BoundaryError, BoundaryPolygon};
use mapcore::point::GeoPoint;
use mapcore::records::RecordError;

use crate::config::HttpTimeouts;

/// Errors produced while loading the boundary or the point list.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// No boundary location is configured.
    #[error("no boundary configured")]
    NotConfigured,

    /// Reading a local file failed.
    #[error("read failed: {0}")]
    Io(#[from] std::io::Error),

    /// The HTTP client could not be constructed.
    #[error("HTTP client build failed: {0}")]
    HttpClientBuild(String),

    /// The request could not be sent or its body not read.
    #[error("request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The server answered with a non-success status.
    #[error("unexpected status {status}: {body}")]
    Status { status: u16, body: String },

    /// The boundary document is unusable.
    #[error("boundary invalid: {0}")]
    Boundary(#[from] BoundaryError),

    /// The place list is not a JSON array.
    #[error("place list invalid: {0}")]
    Records(#[from] RecordError),
}

/// Source of the fair boundary.
#[async_trait::async_trait]
pub trait BoundarySource: Send + Sync {
    /// Load and parse the boundary.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the resource is missing, unreachable or invalid.
    async fn load_boundary(&self) -> Result<BoundaryPolygon, LoadError>;
}

/// Source of the fair's initial point list.
#[async_trait::async_trait]
pub trait PointSource: Send + Sync {
    /// Load the points. Unreadable individual records are dropped, not errors.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] if the list as a whole cannot be fetched or read.
    async fn load_points(&self) -> Result<Vec<GeoPoint>, LoadError>;
}

/// Shared HTTP client with the configured timeouts.
///
/// # Errors
///
/// Returns [`LoadError::HttpClientBuild`] if the TLS backend fails to initialise.
pub fn http_client(timeouts: HttpTimeouts) -> Result<reqwest::Client, LoadError> {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(timeouts.request_secs))
        .connect_timeout(Duration::from_secs(timeouts.connect_secs))
        .build()
        .map_err(|e| LoadError::HttpClientBuild(e.to_string()))
}

/// Read a success body or turn the status into a [`LoadError::Status`].
async fn success_body(response: reqwest::Response) -> Result<String, LoadError> {
    let status = response.status();
    let body = response.text().await?;
    if !status.is_success() {
        return Err(LoadError::Status { status: status.as_u16(), body });
    }
    Ok(body)
}

#[cfg(test)]
#[path = "mod_test.rs"]
mod tests;
