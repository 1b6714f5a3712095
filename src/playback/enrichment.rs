// src/playback/enrichment.rs
use crate::api::client::MovieApiContract;
use crate::api::models::{EnrichedRecommendation, MovieSummary};
use crate::playback::PLAYBACK_LOG_TARGET;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Resolves every recommendation's trailer link concurrently and joins the
/// results in the input order, regardless of completion order.
///
/// Individual lookups are isolated: a failure degrades that entry's video
/// link to `None` instead of failing the batch, so the output always has the
/// same length as the input.
#[instrument(skip(client, items), fields(item_count = items.len()))]
pub async fn enrich_recommendations(
    client: Arc<dyn MovieApiContract>,
    items: Vec<MovieSummary>,
) -> Vec<EnrichedRecommendation> {
    if items.is_empty() {
        return Vec::new();
    }
    info!(target: PLAYBACK_LOG_TARGET, "Resolving trailers for {} recommendation(s)...", items.len());

    let lookups = items.into_iter().map(|movie| {
        let client = Arc::clone(&client);
        async move {
            match client.get_movie_videos(&movie.id).await {
                Ok(videos) => EnrichedRecommendation {
                    video: videos.trailer_link(),
                    movie,
                },
                Err(e) => {
                    warn!(
                        target: PLAYBACK_LOG_TARGET,
                        "Trailer lookup failed for recommendation {}: {}. Entry kept without video.",
                        movie.id,
                        e
                    );
                    EnrichedRecommendation { movie, video: None }
                }
            }
        }
    });

    join_all(lookups).await
}
