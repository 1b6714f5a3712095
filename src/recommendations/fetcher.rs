use crate::api::client::MovieApiContract;
use crate::api::models::{MovieId, WatchHistoryReport};
use crate::recommendations::state::{RecommendationsState, RecommendationsViewState};
use std::sync::Arc;
use tokio::sync::Mutex as TokioMutex;
use tracing::{debug, error, info, instrument};

const LOG_TARGET: &str = "r_moviecli::recommendations";

/// Fixed watch-time sample posted with every tracking request, in seconds.
pub const WATCH_TIME_SAMPLE_SECS: u32 = 10;

/// Single user-visible message for any tracking failure.
pub const FETCH_FAILED_MESSAGE: &str = "Failed to fetch recommendations.";

/// Posts a watch-history sample for a movie and exposes the recommendations
/// the tracking endpoint returns.
#[derive(Clone)]
pub struct RecommendationFetcher {
    client: Arc<dyn MovieApiContract>,
    state: Arc<TokioMutex<RecommendationsState>>,
}

impl RecommendationFetcher {
    pub fn new(client: Arc<dyn MovieApiContract>) -> Self {
        Self {
            client,
            state: Arc::new(TokioMutex::new(RecommendationsState::new())),
        }
    }

    /// Current view state, cloned out of the cell.
    pub async fn view(&self) -> RecommendationsViewState {
        self.state.lock().await.view().clone()
    }

    /// Runs one fetch cycle for the given movie id.
    ///
    /// The request is not aborted if another cycle starts while it is in
    /// flight; the late completion is dropped by the generation guard.
    #[instrument(skip(self), fields(movie_id = %movie_id))]
    pub async fn load(&self, movie_id: &MovieId) {
        let generation = match self.state.lock().await.begin_cycle() {
            Some(generation) => generation,
            None => return,
        };

        let report = WatchHistoryReport {
            watch_time: WATCH_TIME_SAMPLE_SECS,
        };

        match self.client.track_watch_history(movie_id, &report).await {
            Ok(list) => {
                let applied = self
                    .state
                    .lock()
                    .await
                    .complete_cycle(generation, list.clone());
                if applied {
                    info!(
                        target: LOG_TARGET,
                        "Loaded {} recommendations for movie {}",
                        list.len(),
                        movie_id
                    );
                } else {
                    debug!(target: LOG_TARGET, "Discarded stale recommendations for movie {}", movie_id);
                }
            }
            Err(e) => {
                error!(target: LOG_TARGET, "Tracking request failed for movie {}: {}", movie_id, e);
                self.state
                    .lock()
                    .await
                    .fail_cycle(generation, FETCH_FAILED_MESSAGE.to_string());
            }
        }
    }

    /// Tears down the component; any in-flight completion becomes a no-op.
    pub async fn dispose(&self) {
        self.state.lock().await.dispose();
    }
}
