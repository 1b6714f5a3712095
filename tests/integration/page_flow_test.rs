//! Cross-module test of the full page flow: playback page load followed by
//! the watch-history recommendation fetch, against a scripted backend.

use async_trait::async_trait;
use r_moviecli::api::{
    ApiError, LinkSet, MovieApiContract, MovieDetail, MovieId, MovieSummary, VideoLinksResponse,
    WatchHistoryReport,
};
use r_moviecli::playback::{PlaybackPageLoader, PlaybackViewState};
use r_moviecli::recommendations::{RecommendationFetcher, RecommendationsViewState};
use std::sync::Arc;

/// Scripted backend covering every endpoint the two components touch.
struct ScriptedBackend;

fn summary(id: i64, title: &str) -> MovieSummary {
    MovieSummary {
        id: MovieId::Number(id),
        title: title.to_string(),
        overview: None,
        poster_path: Some(format!("/poster-{}.jpg", id)),
        vote_average: Some(7.5),
        original_language: Some("en".to_string()),
    }
}

#[async_trait]
impl MovieApiContract for ScriptedBackend {
    async fn get_movie_detail(&self, id: &MovieId) -> Result<MovieDetail, ApiError> {
        Ok(MovieDetail {
            id: Some(id.clone()),
            title: Some("Inception".to_string()),
            overview: Some("A thief who steals corporate secrets...".to_string()),
            ..MovieDetail::default()
        })
    }

    async fn get_movie_videos(&self, id: &MovieId) -> Result<VideoLinksResponse, ApiError> {
        match id {
            MovieId::Number(27205) => Ok(VideoLinksResponse {
                movie: Some(LinkSet {
                    links: Some("https://v.example/inception".to_string()),
                }),
                trailer: None,
            }),
            MovieId::Number(1) => Ok(VideoLinksResponse {
                movie: None,
                trailer: Some(LinkSet {
                    links: Some("https://v.example/trailer-1".to_string()),
                }),
            }),
            _ => Err(ApiError::NotFound(format!("no videos for {}", id))),
        }
    }

    async fn get_recommendations(&self, _id: &MovieId) -> Result<Vec<MovieSummary>, ApiError> {
        Ok(vec![summary(1, "Interstellar"), summary(2, "Tenet")])
    }

    async fn track_watch_history(
        &self,
        _id: &MovieId,
        report: &WatchHistoryReport,
    ) -> Result<Vec<MovieSummary>, ApiError> {
        assert!(report.watch_time > 0, "Telemetry must carry a watch time");
        Ok(vec![summary(3, "The Prestige")])
    }
}

#[tokio::test]
async fn test_playback_page_then_recommendations_flow() {
    let backend: Arc<dyn MovieApiContract> = Arc::new(ScriptedBackend);
    let movie_id = MovieId::Number(27205);

    // Step 1: load the playback page.
    let loader = PlaybackPageLoader::new(backend.clone());
    loader.load(&movie_id).await;

    let page = match loader.view().await {
        PlaybackViewState::Loaded(page) => page,
        other => panic!("Expected loaded playback page, got {:?}", other),
    };

    assert_eq!(page.detail.title, Some("Inception".to_string()));
    assert_eq!(
        page.primary_video_link,
        Some("https://v.example/inception".to_string())
    );

    // Enrichment keeps list length; only item 1 has a resolvable trailer.
    assert_eq!(page.recommendations.len(), 2);
    assert_eq!(
        page.recommendations[0].video,
        Some("https://v.example/trailer-1".to_string())
    );
    assert_eq!(page.recommendations[1].video, None);

    // Step 2: post the watch-history sample and read back recommendations.
    let fetcher = RecommendationFetcher::new(backend);
    fetcher.load(&movie_id).await;

    match fetcher.view().await {
        RecommendationsViewState::Loaded(movies) => {
            assert_eq!(movies.len(), 1);
            assert_eq!(movies[0].title, "The Prestige");
        }
        other => panic!("Expected loaded recommendations, got {:?}", other),
    }
}
