use crate::api::models::{EnrichedRecommendation, MovieDetail};
use tracing::{debug, trace, warn};

const LOG_TARGET: &str = "r_moviecli::playback::state";

/// Everything the playback page renders, assembled in one piece.
#[derive(Debug, Clone, PartialEq)]
pub struct PlaybackPage {
    pub detail: MovieDetail,
    pub primary_video_link: Option<String>,
    pub recommendations: Vec<EnrichedRecommendation>,
}

/// View state of the playback page. `Failed` is terminal for the cycle and
/// carries no user-facing message; diagnostics go to the log.
#[derive(Debug, Clone, PartialEq)]
pub enum PlaybackViewState {
    Loading,
    Loaded(PlaybackPage),
    Failed,
}

/// State cell for one loader instance, with the same generation/disposal
/// discipline as the recommendations cell: stale or post-disposal
/// completions are dropped.
pub struct PlaybackState {
    view: PlaybackViewState,
    generation: u64,
    disposed: bool,
}

impl PlaybackState {
    pub fn new() -> Self {
        Self {
            view: PlaybackViewState::Loading,
            generation: 0,
            disposed: false,
        }
    }

    /// Starts a new load cycle, returning its generation, or `None` if the
    /// cell was disposed.
    pub fn begin_cycle(&mut self) -> Option<u64> {
        if self.disposed {
            warn!(target: LOG_TARGET, "Ignoring begin_cycle on disposed state cell.");
            return None;
        }
        self.generation += 1;
        self.view = PlaybackViewState::Loading;
        trace!(target: LOG_TARGET, "Began cycle generation {}", self.generation);
        Some(self.generation)
    }

    /// Reveals the fully-assembled page in one transition. Returns whether
    /// the transition was applied.
    pub fn complete_cycle(&mut self, generation: u64, page: PlaybackPage) -> bool {
        if !self.cycle_is_current(generation) {
            return false;
        }
        self.view = PlaybackViewState::Loaded(page);
        true
    }

    /// Parks the cycle in the terminal failed state. Returns whether the
    /// transition was applied.
    pub fn fail_cycle(&mut self, generation: u64) -> bool {
        if !self.cycle_is_current(generation) {
            return false;
        }
        self.view = PlaybackViewState::Failed;
        true
    }

    /// Marks the cell as torn down; all further transitions are no-ops.
    pub fn dispose(&mut self) {
        debug!(target: LOG_TARGET, "State cell disposed at generation {}", self.generation);
        self.disposed = true;
    }

    pub fn view(&self) -> &PlaybackViewState {
        &self.view
    }

    pub fn is_disposed(&self) -> bool {
        self.disposed
    }

    fn cycle_is_current(&self, generation: u64) -> bool {
        if self.disposed {
            debug!(target: LOG_TARGET, "Dropping completion after disposal (generation {}).", generation);
            return false;
        }
        if generation != self.generation {
            debug!(
                target: LOG_TARGET,
                "Dropping stale completion: generation {} (current {}).",
                generation,
                self.generation
            );
            return false;
        }
        true
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        Self::new()
    }
}
