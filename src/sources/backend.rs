//! Backend client for the fair's place list.

use mapcore::point::GeoPoint;
use mapcore::records::parse_place_records;
use reqwest::header::CONTENT_TYPE;

use super::{LoadError, PointSource, success_body};

/// Lists places with `POST {base}/get_fair_places?fair_name=<name>`.
pub struct BackendClient {
    http: reqwest::Client,
    base_url: String,
    fair_name: String,
}

impl BackendClient {
    #[must_use]
    pub fn new(http: reqwest::Client, base_url: &str, fair_name: String) -> Self {
        Self { http, base_url: base_url.trim_end_matches('/').to_string(), fair_name }
    }

    #[must_use]
    pub fn places_url(&self) -> String {
        format!("{}/get_fair_places", self.base_url)
    }
}

#[async_trait::async_trait]
impl PointSource for BackendClient {
    async fn load_points(&self) -> Result<Vec<GeoPoint>, LoadError> {
        let response = self
            .http
            .post(self.places_url())
            .query(&[("fair_name", self.fair_name.as_str())])
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;
        let body = success_body(response).await?;
        let points = parse_place_records(&body)?;
        tracing::debug!(fair = %self.fair_name, count = points.len(), "place list fetched");
        Ok(points)
    }
}
