use crate::api::models::MovieSummary;
use tracing::{debug, trace, warn};

const LOG_TARGET: &str = "r_moviecli::recommendations::state";

/// View state exposed to the presentation layer. Exactly one variant holds
/// at any time.
#[derive(Debug, Clone, PartialEq)]
pub enum RecommendationsViewState {
    Idle,
    Loading,
    Loaded(Vec<MovieSummary>),
    Failed(String),
}

/// State cell for one fetcher instance.
///
/// Every fetch cycle gets a generation number from `begin_cycle`; a
/// completion carrying a stale generation, or arriving after `dispose`,
/// is a no-op. This closes the window where a response for a previous
/// movie id could overwrite the state of a newer cycle.
pub struct RecommendationsState {
    view: RecommendationsViewState,
    generation: u64,
    disposed: bool,
}

impl RecommendationsState {
    pub fn new() -> Self {
        Self {
            view: RecommendationsViewState::Idle,
            generation: 0,
            disposed: false,
        }
    }

    /// Starts a new fetch cycle, discarding prior result or error state.
    /// Returns the cycle's generation, or `None` if the cell was disposed.
    pub fn begin_cycle(&mut self) -> Option<u64> {
        if self.disposed {
            warn!(target: LOG_TARGET, "Ignoring begin_cycle on disposed state cell.");
            return None;
        }
        self.generation += 1;
        self.view = RecommendationsViewState::Loading;
        trace!(target: LOG_TARGET, "Began cycle generation {}", self.generation);
        Some(self.generation)
    }

    /// Applies a successful result for the given cycle. Returns whether the
    /// transition was applied.
    pub fn complete_cycle(&mut self, generation: u64, list: Vec<MovieSummary>) -> bool {
        if !self.cycle_is_current(generation) {
            return false;
        }
        self.view = RecommendationsViewState::Loaded(list);
        true
    }

    /// Applies a failure for the given cycle. Returns whether the transition
    /// was applied.
    pub fn fail_cycle(&mut self, generation: u64, message: String) -> bool {
        if !self.cycle_is_current(generation) {
            return false;
        }
        self.view = RecommendationsViewState::Failed(message);
        true
    }

    /// Marks the cell as torn down; all further transitions are no-ops.
    pub fn dispose(&mut self) {
        debug!(target: LOG_TARGET, "State cell disposed at generation {}", self.generation);
        self.disposed = true;
    }

    pub fn view(&self) -> &RecommendationsViewState {
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

impl Default for RecommendationsState {
    fn default() -> Self {
        Self::new()
    }
}
