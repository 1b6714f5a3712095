//! Streaming backend API client implementation

use crate::api::models::{
    MovieDetail, MovieId, MovieSummary, RecommendationsResponse, TrackResponse,
    VideoLinksResponse, WatchHistoryReport,
};
use async_trait::async_trait;
use reqwest::{header, Client, Error as ReqwestError, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::error::Error;
use std::fmt;
use tracing::{debug, error, trace};
use uuid::Uuid;

/// Error types for backend API operations
#[derive(Debug)]
pub enum ApiError {
    Network(ReqwestError),
    NotFound(String),
    InvalidResponse(String),
    Other(String),
}

// --- Error Implementations ---

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Network(e) => write!(f, "Network error: {}", e),
            ApiError::NotFound(msg) => write!(f, "Not found: {}", msg),
            ApiError::InvalidResponse(msg) => write!(f, "Invalid response: {}", msg),
            ApiError::Other(msg) => write!(f, "Error: {}", msg),
        }
    }
}

impl Error for ApiError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            ApiError::Network(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ReqwestError> for ApiError {
    fn from(err: ReqwestError) -> Self {
        ApiError::Network(err)
    }
}

/// Contract implemented by the backend client, so components can hold an
/// `Arc<dyn MovieApiContract>` and tests can substitute doubles.
#[async_trait]
pub trait MovieApiContract: Send + Sync {
    async fn get_movie_detail(&self, id: &MovieId) -> Result<MovieDetail, ApiError>;
    async fn get_movie_videos(&self, id: &MovieId) -> Result<VideoLinksResponse, ApiError>;
    async fn get_recommendations(&self, id: &MovieId) -> Result<Vec<MovieSummary>, ApiError>;
    async fn track_watch_history(
        &self,
        id: &MovieId,
        report: &WatchHistoryReport,
    ) -> Result<Vec<MovieSummary>, ApiError>;
}

/// Client for the movie streaming backend REST API
#[derive(Clone)]
pub struct MovieApiClient {
    client: Client,
    base_url: String,
    session_id: String,
    device_name: String,
}

impl MovieApiClient {
    /// Create a new client for the given backend base URL
    pub fn new(base_url: &str) -> Self {
        debug!("Creating new MovieApiClient with base_url: {}", base_url);

        let client = match Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
        {
            Ok(client) => {
                debug!("HTTP client created successfully with 30s timeout");
                client
            }
            Err(e) => {
                tracing::warn!(
                    "Error creating HTTP client with timeout: {:?}. Falling back to default.",
                    e
                );
                Client::new()
            }
        };

        let normalized_url = base_url.trim_end_matches('/').to_string();
        debug!("Normalized base URL: {}", normalized_url);

        let session_id = Uuid::new_v4().to_string();
        debug!("Generated client session id: {}", session_id);

        let device_name = hostname::get()
            .ok()
            .and_then(|name| name.into_string().ok())
            .unwrap_or_else(|| "moviecli".to_string());

        MovieApiClient {
            client,
            base_url: normalized_url,
            session_id,
            device_name,
        }
    }

    /// Session id attached to telemetry requests from this client instance.
    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    // --- Private Helper Methods ---

    /// Builds a full URL for an API endpoint path.
    fn build_url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Percent-encodes an identifier for use as a path segment.
    fn encode_id(id: &MovieId) -> String {
        urlencoding::encode(&id.to_string()).into_owned()
    }

    /// Headers identifying this client on telemetry requests.
    fn telemetry_headers(&self) -> header::HeaderMap {
        let mut headers = header::HeaderMap::new();
        if let Ok(value) = header::HeaderValue::from_str(&self.session_id) {
            headers.insert("X-Session-Id", value);
        }
        if let Ok(value) = header::HeaderValue::from_str(&self.device_name) {
            headers.insert("X-Device-Name", value);
        }
        headers
    }

    /// Sends a GET request and deserializes the JSON response.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let url = self.build_url(path);
        debug!("Sending GET request to: {}", url);

        let response = self.client.get(&url).send().await?;
        Self::handle_response(response).await
    }

    /// Sends a POST request with a JSON body and deserializes the JSON response.
    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
        headers: header::HeaderMap,
    ) -> Result<T, ApiError> {
        let url = self.build_url(path);
        debug!("Sending POST request with JSON body to: {}", url);

        let response = self
            .client
            .post(&url)
            .headers(headers)
            .json(body)
            .send()
            .await?;
        Self::handle_response(response).await
    }

    /// Handles response status checking and JSON deserialization.
    async fn handle_response<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        let status = response.status();
        trace!("Response status: {}", status);

        if status.is_success() {
            let response_text = response.text().await?;
            trace!("Response text length: {} bytes", response_text.len());
            if response_text.is_empty() {
                error!("Received empty response body with success status {}", status);
                return Err(ApiError::InvalidResponse(
                    "Empty response body received".to_string(),
                ));
            }

            serde_json::from_str::<T>(&response_text).map_err(|e| {
                error!("JSON parsing error: {}. Full response text:\n{}", e, response_text);
                ApiError::InvalidResponse(format!("Failed to parse JSON response: {}", e))
            })
        } else {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read error body".to_string());
            error!("Request failed. Status: {}, Body: {}", status, error_text);
            match status {
                StatusCode::NOT_FOUND => Err(ApiError::NotFound(format!(
                    "Resource not found ({}): {}",
                    status, error_text
                ))),
                _ => Err(ApiError::InvalidResponse(format!(
                    "Request failed with status {}: {}",
                    status, error_text
                ))),
            }
        }
    }

    // --- Getter methods (primarily for testing/debugging) ---
    pub fn get_base_url(&self) -> &str {
        &self.base_url
    }
    pub fn get_device_name(&self) -> &str {
        &self.device_name
    }
}

#[async_trait]
impl MovieApiContract for MovieApiClient {
    /// Get full detail for a movie by identifier
    async fn get_movie_detail(&self, id: &MovieId) -> Result<MovieDetail, ApiError> {
        debug!("Fetching movie detail for id: {}", id);
        let path = format!("/api/tmdb/movie/{}", Self::encode_id(id));
        self.get_json(&path).await
    }

    /// Get the video-link bundle (movie + trailer sources) for a movie
    async fn get_movie_videos(&self, id: &MovieId) -> Result<VideoLinksResponse, ApiError> {
        debug!("Fetching video links for id: {}", id);
        let path = format!("/api/tmdb/movie/{}/videos", Self::encode_id(id));
        self.get_json(&path).await
    }

    /// Get the recommendation list for a movie
    async fn get_recommendations(&self, id: &MovieId) -> Result<Vec<MovieSummary>, ApiError> {
        debug!("Fetching recommendations for id: {}", id);
        let path = format!("/api/tmdb/{}/recommendations", Self::encode_id(id));
        let response: RecommendationsResponse = self.get_json(&path).await?;
        debug!("Successfully fetched {} recommendations", response.results.len());
        Ok(response.results)
    }

    /// Post a watch-history sample and return the recommendations the
    /// tracking endpoint responds with.
    async fn track_watch_history(
        &self,
        id: &MovieId,
        report: &WatchHistoryReport,
    ) -> Result<Vec<MovieSummary>, ApiError> {
        debug!(
            "Tracking watch history for id: {} (watch_time: {}s)",
            id, report.watch_time
        );
        let path = format!("/watch-history/{}/track", Self::encode_id(id));
        let response: TrackResponse = self
            .post_json(&path, report, self.telemetry_headers())
            .await?;
        debug!(
            "Tracking accepted, received {} recommendations",
            response.recommendations.len()
        );
        Ok(response.recommendations)
    }
}
