//! HTTP-based `DirectionsProvider` for the Directions web service.
//!
//! This module provides [`HttpDirectionsProvider`], an implementation of the
//! [`DirectionsProvider`] trait that fetches alternative routes from a
//! Directions-compatible REST endpoint.
//!
//! # Example
//!
//! ```no_run
//! use rtd_core::{DirectionsProvider, DirectionsRequest, GeoPoint};
//! use rtd_data::directions::HttpDirectionsProvider;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let provider = HttpDirectionsProvider::new("https://maps.googleapis.com")?;
//! let request = DirectionsRequest::driving_alternatives(
//!     GeoPoint { lat: 19.07, lng: 72.87 },
//!     GeoPoint { lat: 18.52, lng: 73.85 },
//! );
//!
//! let result = provider.route(&request).await?;
//! # let _ = result;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use rtd_core::{DirectionsError, DirectionsProvider, DirectionsRequest, GeoPoint, ProviderPathResult};
use thiserror::Error;
use url::Url;

use super::convert::convert_response;
use super::google::DirectionsResponse;

/// Error type for [`HttpDirectionsProvider`] construction failures.
#[derive(Debug, Error)]
pub enum ProviderBuildError {
    /// Failed to build the HTTP client.
    #[error("failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}

/// Default user agent for directions requests.
pub const DEFAULT_USER_AGENT: &str = "rtd-routes/0.1";

/// Default service root.
pub const DEFAULT_BASE_URL: &str = "https://maps.googleapis.com";

/// Default request timeout in seconds.
const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Path of the JSON directions endpoint below the base URL.
const DIRECTIONS_PATH: &str = "maps/api/directions/json";

/// Configuration for [`HttpDirectionsProvider`].
#[derive(Clone)]
pub struct HttpDirectionsProviderConfig {
    /// Service root (e.g., `"https://maps.googleapis.com"`).
    pub base_url: String,
    /// API key sent as the `key` query parameter.
    pub api_key: Option<String>,
    /// Request timeout duration.
    pub timeout: Duration,
    /// User agent string for requests.
    pub user_agent: String,
}

impl fmt::Debug for HttpDirectionsProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpDirectionsProviderConfig")
            .field("base_url", &self.base_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl Default for HttpDirectionsProviderConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_owned(),
            api_key: None,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            user_agent: DEFAULT_USER_AGENT.to_owned(),
        }
    }
}

impl HttpDirectionsProviderConfig {
    /// Create a new configuration with the given base URL.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Set the API key.
    #[must_use]
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the user agent string.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}

/// HTTP-based directions provider.
///
/// Each [`DirectionsProvider::route`] call issues one GET request with
/// `alternatives` set from the request and converts every returned route,
/// decoding encoded polylines into coordinate paths. The client is reused
/// across calls.
#[derive(Debug)]
pub struct HttpDirectionsProvider {
    client: Client,
    config: HttpDirectionsProviderConfig,
}

impl HttpDirectionsProvider {
    /// Create a new provider with default configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ProviderBuildError> {
        Self::with_config(HttpDirectionsProviderConfig::new(base_url))
    }

    /// Create a new provider with explicit configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn with_config(config: HttpDirectionsProviderConfig) -> Result<Self, ProviderBuildError> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .connect_timeout(config.timeout)
            .timeout(config.timeout)
            .build()
            .map_err(ProviderBuildError::HttpClient)?;
        Ok(Self { client, config })
    }

    /// The configuration the provider was built with.
    #[must_use]
    pub const fn config(&self) -> &HttpDirectionsProviderConfig {
        &self.config
    }

    /// Build the request URL.
    ///
    /// The URL format is `{base_url}/maps/api/directions/json` with
    /// `origin`, `destination`, `mode` and `alternatives` query parameters,
    /// plus `waypoints` as `via:` points and `key` when configured.
    fn build_url(&self, request: &DirectionsRequest) -> Result<Url, DirectionsError> {
        let endpoint = format!(
            "{}/{DIRECTIONS_PATH}",
            self.config.base_url.trim_end_matches('/')
        );
        let mut url = Url::parse(&endpoint).map_err(|err| DirectionsError::InvalidRequest {
            message: format!("invalid base URL {}: {err}", self.config.base_url),
        })?;
        {
            let mut query = url.query_pairs_mut();
            query
                .append_pair("origin", &format_point(request.origin))
                .append_pair("destination", &format_point(request.destination))
                .append_pair("mode", &request.travel_mode.as_str().to_ascii_lowercase())
                .append_pair(
                    "alternatives",
                    if request.provide_alternatives {
                        "true"
                    } else {
                        "false"
                    },
                );
            if !request.waypoints.is_empty() {
                let waypoints = request
                    .waypoints
                    .iter()
                    .map(|point| format!("via:{}", format_point(*point)))
                    .collect::<Vec<_>>()
                    .join("|");
                query.append_pair("waypoints", &waypoints);
            }
            if let Some(key) = &self.config.api_key {
                query.append_pair("key", key);
            }
        }
        Ok(url)
    }

    /// Convert a reqwest error to a `DirectionsError`.
    ///
    /// `url` is the endpoint without its query so the API key never appears
    /// in errors.
    fn convert_reqwest_error(&self, error: reqwest::Error, url: &str) -> DirectionsError {
        if error.is_timeout() {
            return DirectionsError::Timeout {
                url: url.to_owned(),
                timeout_secs: self.config.timeout.as_secs(),
            };
        }

        if let Some(status) = error.status() {
            return DirectionsError::Status {
                code: format!("HTTP_{}", status.as_u16()),
                message: status
                    .canonical_reason()
                    .unwrap_or_default()
                    .to_owned(),
            };
        }

        DirectionsError::Network {
            url: url.to_owned(),
            message: error.without_url().to_string(),
        }
    }
}

fn format_point(point: GeoPoint) -> String {
    format!("{},{}", point.lat, point.lng)
}

#[async_trait]
impl DirectionsProvider for HttpDirectionsProvider {
    async fn route(
        &self,
        request: &DirectionsRequest,
    ) -> Result<ProviderPathResult, DirectionsError> {
        request.validate()?;
        let url = self.build_url(request)?;
        let endpoint = format!(
            "{}{}",
            url.origin().ascii_serialization(),
            url.path()
        );
        debug!(
            "requesting directions ({}, {}) -> ({}, {}) from {endpoint}",
            request.origin.lat,
            request.origin.lng,
            request.destination.lat,
            request.destination.lng
        );

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|err| self.convert_reqwest_error(err, &endpoint))?
            .error_for_status()
            .map_err(|err| self.convert_reqwest_error(err, &endpoint))?;

        let body: DirectionsResponse =
            response
                .json()
                .await
                .map_err(|err| DirectionsError::Parse {
                    message: err.without_url().to_string(),
                })?;

        let result = convert_response(request, body)?;
        debug!("directions service returned {} routes", result.routes.len());
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn request() -> DirectionsRequest {
        DirectionsRequest::driving_alternatives(
            GeoPoint { lat: 19.07, lng: 72.87 },
            GeoPoint { lat: 18.52, lng: 73.85 },
        )
    }

    fn query(url: &Url, name: &str) -> Option<String> {
        url.query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    #[rstest]
    fn build_url_formats_endpoints(request: DirectionsRequest) {
        let provider =
            HttpDirectionsProvider::new("https://maps.example.com").expect("provider should build");

        let url = provider.build_url(&request).expect("url should build");

        assert_eq!(url.path(), "/maps/api/directions/json");
        assert_eq!(query(&url, "origin").as_deref(), Some("19.07,72.87"));
        assert_eq!(query(&url, "destination").as_deref(), Some("18.52,73.85"));
        assert_eq!(query(&url, "mode").as_deref(), Some("driving"));
        assert_eq!(query(&url, "alternatives").as_deref(), Some("true"));
        assert_eq!(query(&url, "waypoints"), None);
        assert_eq!(query(&url, "key"), None);
    }

    #[rstest]
    fn build_url_strips_trailing_slash(request: DirectionsRequest) {
        let provider =
            HttpDirectionsProvider::new("https://maps.example.com/").expect("provider should build");

        let url = provider.build_url(&request).expect("url should build");

        assert!(!url.as_str().contains("//maps/api"));
    }

    #[rstest]
    fn build_url_adds_via_waypoints_and_key(request: DirectionsRequest) {
        let config = HttpDirectionsProviderConfig::new("https://maps.example.com")
            .with_api_key("secret");
        let provider = HttpDirectionsProvider::with_config(config).expect("provider should build");
        let request = request.with_waypoints(vec![
            GeoPoint { lat: 18.9, lng: 73.1 },
            GeoPoint { lat: 18.7, lng: 73.4 },
        ]);

        let url = provider.build_url(&request).expect("url should build");

        assert_eq!(
            query(&url, "waypoints").as_deref(),
            Some("via:18.9,73.1|via:18.7,73.4")
        );
        assert_eq!(query(&url, "key").as_deref(), Some("secret"));
    }

    #[rstest]
    fn build_url_rejects_malformed_base(request: DirectionsRequest) {
        let provider = HttpDirectionsProvider::new("not a url").expect("provider should build");

        let err = provider.build_url(&request).expect_err("should fail");

        assert!(matches!(err, DirectionsError::InvalidRequest { .. }));
    }

    #[rstest]
    fn config_builder_pattern() {
        let config = HttpDirectionsProviderConfig::new("http://example.com")
            .with_api_key("k")
            .with_timeout(Duration::from_secs(60))
            .with_user_agent("test-agent/1.0");

        assert_eq!(config.base_url, "http://example.com");
        assert_eq!(config.api_key.as_deref(), Some("k"));
        assert_eq!(config.timeout, Duration::from_secs(60));
        assert_eq!(config.user_agent, "test-agent/1.0");
    }

    #[rstest]
    fn debug_output_redacts_api_key() {
        let config = HttpDirectionsProviderConfig::default().with_api_key("secret");

        let rendered = format!("{config:?}");

        assert!(!rendered.contains("secret"));
        assert!(rendered.contains("<redacted>"));
    }

    #[tokio::test]
    async fn out_of_range_request_is_rejected_before_sending() {
        let provider =
            HttpDirectionsProvider::new("http://127.0.0.1:9").expect("provider should build");
        let request = DirectionsRequest::driving_alternatives(
            GeoPoint { lat: 91.0, lng: 0.0 },
            GeoPoint { lat: 1.0, lng: 1.0 },
        );

        let err = provider.route(&request).await.expect_err("should fail");

        assert!(matches!(err, DirectionsError::InvalidRequest { .. }));
    }
}
