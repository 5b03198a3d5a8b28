// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Activities API gateway and its HTTP implementation.
//!
//! The store only depends on [`ActivitiesGateway`]; [`HttpAgent`] maps the
//! five operations onto the REST endpoints under `{base}/activities`.

use crate::config::Config;
use crate::error::{GatewayError, Result};
use crate::models::Activity;
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

/// Remote operations on activities.
#[async_trait]
pub trait ActivitiesGateway: Send + Sync {
    /// Fetch every activity.
    async fn list(&self) -> Result<Vec<Activity>>;

    /// Fetch a single activity by id.
    async fn details(&self, id: &str) -> Result<Activity>;

    /// Create an activity; the id is supplied by the client.
    async fn create(&self, activity: &Activity) -> Result<()>;

    async fn update(&self, activity: &Activity) -> Result<()>;

    async fn delete(&self, id: &str) -> Result<()>;
}

/// Activities API client over HTTP.
#[derive(Clone)]
pub struct HttpAgent {
    http: reqwest::Client,
    base_url: String,
    simulated_delay: Duration,
}

impl HttpAgent {
    /// Create a client from configuration.
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.request_timeout)
            .build()
            .map_err(|e| GatewayError::Internal(anyhow::anyhow!("HTTP client init: {}", e)))?;

        Ok(Self {
            http,
            base_url: config.api_base_url.trim_end_matches('/').to_string(),
            simulated_delay: config.simulated_delay,
        })
    }

    fn collection_url(&self) -> String {
        format!("{}/activities", self.base_url)
    }

    /// URL of a single activity, with the id escaped as one path segment.
    fn item_url(&self, id: &str) -> Result<String> {
        // Dot segments are resolved away by URL parsing even when escaped
        if id.is_empty() || id == "." || id == ".." {
            return Err(GatewayError::Validation(format!(
                "Invalid activity id: {:?}",
                id
            )));
        }
        Ok(format!(
            "{}/activities/{}",
            self.base_url,
            urlencoding::encode(id)
        ))
    }

    /// Artificial latency so loading states are visible during development.
    async fn delay(&self) {
        if !self.simulated_delay.is_zero() {
            tokio::time::sleep(self.simulated_delay).await;
        }
    }

    /// Generic GET request with JSON response.
    async fn get_json<T: for<'de> Deserialize<'de>>(&self, url: &str) -> Result<T> {
        self.delay().await;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        let response = check_status(response).await?;

        response
            .json()
            .await
            .map_err(|e| GatewayError::Decode(format!("JSON parse error: {}", e)))
    }

    /// Send a request whose response body is ignored.
    async fn send_ack(&self, request: reqwest::RequestBuilder) -> Result<()> {
        self.delay().await;

        let response = request
            .send()
            .await
            .map_err(|e| GatewayError::Network(e.to_string()))?;

        check_status(response).await?;
        Ok(())
    }
}

#[async_trait]
impl ActivitiesGateway for HttpAgent {
    async fn list(&self) -> Result<Vec<Activity>> {
        self.get_json(&self.collection_url()).await
    }

    async fn details(&self, id: &str) -> Result<Activity> {
        self.get_json(&self.item_url(id)?).await
    }

    async fn create(&self, activity: &Activity) -> Result<()> {
        self.send_ack(self.http.post(self.collection_url()).json(activity))
            .await
    }

    async fn update(&self, activity: &Activity) -> Result<()> {
        let url = self.item_url(&activity.id)?;
        self.send_ack(self.http.put(url).json(activity)).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        let url = self.item_url(id)?;
        self.send_ack(self.http.delete(url)).await
    }
}

/// Check response status and classify failures.
async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let url = response.url().to_string();
    let body = response.text().await.unwrap_or_default();

    match status.as_u16() {
        404 => Err(GatewayError::NotFound(url)),
        400 | 422 => Err(GatewayError::Validation(body)),
        _ => Err(GatewayError::Network(format!("HTTP {}: {}", status, body))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_urls_strip_trailing_slash() {
        let config = Config {
            api_base_url: "http://localhost:5000/api/".to_string(),
            ..Config::default()
        };
        let agent = HttpAgent::new(&config).expect("client builds");

        assert_eq!(agent.collection_url(), "http://localhost:5000/api/activities");
        assert_eq!(
            agent.item_url("42").unwrap(),
            "http://localhost:5000/api/activities/42"
        );
    }

    #[test]
    fn test_item_url_escapes_reserved_characters() {
        let agent = HttpAgent::new(&Config::default()).expect("client builds");

        assert_eq!(
            agent.item_url("a#1").unwrap(),
            "http://localhost:5000/api/activities/a%231"
        );
        assert_eq!(
            agent.item_url("b/c?d").unwrap(),
            "http://localhost:5000/api/activities/b%2Fc%3Fd"
        );
        assert_eq!(
            agent.item_url("v1..2").unwrap(),
            "http://localhost:5000/api/activities/v1..2"
        );
    }

    #[test]
    fn test_item_url_rejects_dot_segments() {
        let agent = HttpAgent::new(&Config::default()).expect("client builds");

        for id in ["", ".", ".."] {
            assert!(matches!(
                agent.item_url(id),
                Err(GatewayError::Validation(_))
            ));
        }
    }
}
