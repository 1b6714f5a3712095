//! Playback page core: sequential detail/videos/recommendations fetch chain
//! with a concurrent trailer-enrichment fan-out, assembled into one
//! atomically-revealed page model.

mod enrichment;
mod state;

pub use enrichment::enrich_recommendations;
pub use state::{PlaybackPage, PlaybackState, PlaybackViewState};

use crate::api::client::{ApiError, MovieApiContract};
use crate::api::models::MovieId;
use std::sync::Arc;
use tokio::sync::Mutex as TokioMutex;
use tracing::{debug, error, info, instrument};

const PLAYBACK_LOG_TARGET: &str = "r_moviecli::playback";

/// Loads everything the playback page needs for one movie identifier.
#[derive(Clone)]
pub struct PlaybackPageLoader {
    client: Arc<dyn MovieApiContract>,
    state: Arc<TokioMutex<PlaybackState>>,
}

impl PlaybackPageLoader {
    pub fn new(client: Arc<dyn MovieApiContract>) -> Self {
        Self {
            client,
            state: Arc::new(TokioMutex::new(PlaybackState::new())),
        }
    }

    /// Current view state, cloned out of the cell.
    pub async fn view(&self) -> PlaybackViewState {
        self.state.lock().await.view().clone()
    }

    /// Runs one load cycle for the given movie id.
    ///
    /// Detail, video links and the recommendation list are fetched in order
    /// and any failure among them aborts the cycle; per-item trailer lookups
    /// are isolated and only degrade the affected entry. The page is revealed
    /// in a single transition once everything has joined.
    #[instrument(skip(self), fields(movie_id = %movie_id))]
    pub async fn load(&self, movie_id: &MovieId) {
        let generation = match self.state.lock().await.begin_cycle() {
            Some(generation) => generation,
            None => return,
        };

        let page = match self.fetch_page(movie_id).await {
            Ok(page) => page,
            Err(e) => {
                error!(target: PLAYBACK_LOG_TARGET, "Failed to load playback page for movie {}: {}", movie_id, e);
                self.state.lock().await.fail_cycle(generation);
                return;
            }
        };

        let applied = self.state.lock().await.complete_cycle(generation, page);
        if applied {
            info!(target: PLAYBACK_LOG_TARGET, "Playback page ready for movie {}", movie_id);
        } else {
            debug!(target: PLAYBACK_LOG_TARGET, "Discarded stale playback page for movie {}", movie_id);
        }
    }

    async fn fetch_page(&self, movie_id: &MovieId) -> Result<PlaybackPage, ApiError> {
        let detail = self.client.get_movie_detail(movie_id).await?;
        debug!(target: PLAYBACK_LOG_TARGET, "Fetched detail for movie {}", movie_id);

        let videos = self.client.get_movie_videos(movie_id).await?;
        let primary_video_link = videos.primary_link();

        let list = self.client.get_recommendations(movie_id).await?;
        debug!(
            target: PLAYBACK_LOG_TARGET,
            "Fetched {} recommendations for movie {}, resolving trailers...",
            list.len(),
            movie_id
        );

        let recommendations =
            enrichment::enrich_recommendations(Arc::clone(&self.client), list).await;

        Ok(PlaybackPage {
            detail,
            primary_video_link,
            recommendations,
        })
    }

    /// Tears down the component; any in-flight completion becomes a no-op.
    pub async fn dispose(&self) {
        self.state.lock().await.dispose();
    }
}
