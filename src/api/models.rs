//! Data models for streaming backend API responses

use serde::{Deserialize, Serialize};
use std::fmt;

/// Movie identifier as used by the backend.
///
/// The catalogue endpoints hand out string identifiers while the TMDB proxy
/// endpoints use numeric ones, so both forms deserialize into the same type.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
#[serde(untagged)]
pub enum MovieId {
    Number(i64),
    Text(String),
}

impl fmt::Display for MovieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MovieId::Number(n) => write!(f, "{}", n),
            MovieId::Text(s) => write!(f, "{}", s),
        }
    }
}

impl std::str::FromStr for MovieId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(n) => MovieId::Number(n),
            Err(_) => MovieId::Text(s.to_string()),
        })
    }
}

impl From<i64> for MovieId {
    fn from(n: i64) -> Self {
        MovieId::Number(n)
    }
}

/// A movie entry as it appears in recommendation lists.
///
/// The aliases cover the catalogue shape (`_id`, `posterimage`, `rating`,
/// `language`) returned by the tracking endpoint alongside the TMDB shape
/// returned by the recommendation endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct MovieSummary {
    #[serde(alias = "_id")]
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default, alias = "posterimage")]
    pub poster_path: Option<String>,
    #[serde(default, alias = "rating")]
    pub vote_average: Option<f64>,
    #[serde(default, alias = "language")]
    pub original_language: Option<String>,
}

/// Full movie detail as returned by the detail endpoint.
///
/// Every field is optional; the presentation layer supplies fallbacks.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct MovieDetail {
    #[serde(default)]
    pub id: Option<MovieId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
    #[serde(default)]
    pub original_language: Option<String>,
    #[serde(default)]
    pub release_date: Option<String>,
}

/// A set of playable links for one video source.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct LinkSet {
    #[serde(default)]
    pub links: Option<String>,
}

/// Response of the movie-videos endpoint: the full movie source and the
/// trailer source, either of which may be absent.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct VideoLinksResponse {
    #[serde(default)]
    pub movie: Option<LinkSet>,
    #[serde(default)]
    pub trailer: Option<LinkSet>,
}

impl VideoLinksResponse {
    /// Preferred playable link: the movie's own link, else the trailer link.
    pub fn primary_link(&self) -> Option<String> {
        self.movie
            .as_ref()
            .and_then(|set| set.links.clone())
            .or_else(|| self.trailer_link())
    }

    /// The trailer link alone, used when enriching recommendation entries.
    pub fn trailer_link(&self) -> Option<String> {
        self.trailer.as_ref().and_then(|set| set.links.clone())
    }
}

/// Watch-history telemetry payload for POST /watch-history/{id}/track.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct WatchHistoryReport {
    pub watch_time: u32,
}

/// Response of the tracking endpoint. A body without a `recommendations`
/// field deserializes to an empty list, not an error.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct TrackResponse {
    #[serde(default)]
    pub recommendations: Vec<MovieSummary>,
}

/// Response of the recommendations endpoint.
#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub results: Vec<MovieSummary>,
}

/// A recommendation entry joined with its separately-fetched trailer link.
/// Never mutated after construction.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedRecommendation {
    pub movie: MovieSummary,
    pub video: Option<String>,
}
