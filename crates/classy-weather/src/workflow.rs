//! Location query -> geocoding -> forecast, published as a single state value.
//!
//! Every accepted query bumps a generation counter. Results are applied only
//! if their generation is still the newest one, so a slow lookup for an old
//! query can never overwrite the state of a newer one. In-flight requests are
//! not cancelled; their results are dropped.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::watch;

use crate::preferences::{PreferenceStore, LOCATION_KEY};
use crate::provider::WeatherProvider;
use crate::types::{check_query, Forecast, ResolvedLocation, WeatherError};

/// Current phase of the lookup
#[derive(Debug, Clone, PartialEq, Default)]
pub enum WorkflowState {
    /// Nothing has been asked yet
    #[default]
    Idle,
    Loading,
    Ready {
        location: ResolvedLocation,
        forecast: Forecast,
    },
    /// Query too short to look up
    Empty,
    Failed(WeatherError),
}

impl WorkflowState {
    pub fn is_loading(&self) -> bool {
        matches!(self, WorkflowState::Loading)
    }
}

#[derive(Debug, Default)]
struct Tracker {
    generation: u64,
    query: Option<String>,
}

/// A query accepted by [`ForecastWorkflow::submit`] whose lookup has not run yet.
///
/// Accepting is synchronous, so the order of `submit` calls decides which
/// query wins even if the lookups are then spawned as separate tasks.
#[derive(Debug)]
#[must_use = "an accepted lookup stays Loading until it is run"]
pub struct PendingLookup {
    query: String,
    generation: u64,
}

impl PendingLookup {
    pub fn query(&self) -> &str {
        &self.query
    }
}

pub struct ForecastWorkflow {
    provider: WeatherProvider,
    preferences: Arc<dyn PreferenceStore>,
    tracker: Mutex<Tracker>,
    state_tx: watch::Sender<WorkflowState>,
}

impl ForecastWorkflow {
    pub fn new(provider: WeatherProvider, preferences: Arc<dyn PreferenceStore>) -> Self {
        let (state_tx, _) = watch::channel(WorkflowState::Idle);
        Self {
            provider,
            preferences,
            tracker: Mutex::new(Tracker::default()),
            state_tx,
        }
    }

    /// Receiver notified on every state transition
    pub fn subscribe(&self) -> watch::Receiver<WorkflowState> {
        self.state_tx.subscribe()
    }

    pub fn state(&self) -> WorkflowState {
        self.state_tx.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state_tx.borrow().is_loading()
    }

    /// The query the current state belongs to
    pub fn query(&self) -> Option<String> {
        self.tracker.lock().query.clone()
    }

    /// Run the workflow for the location saved by a previous session.
    pub async fn start(&self) -> WorkflowState {
        match self.submit_saved() {
            Some(pending) => self.run(pending).await,
            None => self.state(),
        }
    }

    /// Accept the saved location as the current query without looking it up yet.
    pub fn submit_saved(&self) -> Option<PendingLookup> {
        let saved = self.preferences.load(LOCATION_KEY);
        tracing::info!("Restoring saved location {:?}", saved);
        self.submit(&saved)
    }

    /// Handle an edit of the location field and return the resulting state.
    ///
    /// Queries equal to the current one are ignored. Queries shorter than
    /// [`crate::MIN_QUERY_LEN`] characters reset to `Empty` without touching the
    /// network. Anything else is saved as the preferred location and looked up.
    pub async fn set_query(&self, query: &str) -> WorkflowState {
        match self.submit(query) {
            Some(pending) => self.run(pending).await,
            None => self.state(),
        }
    }

    /// Accept `query` and publish `Loading` or `Empty` immediately.
    ///
    /// Returns the lookup to [`run`](Self::run) when the query needs the network,
    /// `None` when it was unchanged or too short.
    pub fn submit(&self, query: &str) -> Option<PendingLookup> {
        let generation = {
            let mut tracker = self.tracker.lock();
            if tracker.query.as_deref() == Some(query) {
                return None;
            }

            tracker.query = Some(query.to_string());
            tracker.generation += 1;

            if let Err(e) = check_query(query) {
                tracing::debug!("{}, clearing forecast", e);
                self.state_tx.send_replace(WorkflowState::Empty);
                return None;
            }

            tracing::info!("Looking up {:?}", query);
            self.state_tx.send_replace(WorkflowState::Loading);
            tracker.generation
        };

        self.preferences.save(LOCATION_KEY, query);
        Some(PendingLookup {
            query: query.to_string(),
            generation,
        })
    }

    /// Geocode and fetch the forecast for an accepted query, then publish the
    /// result unless a newer query has been submitted meanwhile.
    pub async fn run(&self, pending: PendingLookup) -> WorkflowState {
        let PendingLookup { query, generation } = pending;
        let _loading = LoadingGuard {
            workflow: self,
            generation,
        };

        let next = match self.resolve(&query, generation).await {
            Ok((location, forecast)) => WorkflowState::Ready { location, forecast },
            Err(WeatherError::StaleResult(q)) => {
                tracing::debug!("Discarding superseded lookup for {:?}", q);
                return self.state();
            }
            Err(e) => {
                tracing::error!("Weather lookup for {:?} failed: {}", query, e);
                WorkflowState::Failed(e)
            }
        };

        if !self.apply(generation, next) {
            tracing::debug!("{}", WeatherError::StaleResult(query));
        }
        self.state()
    }

    async fn resolve(
        &self,
        query: &str,
        generation: u64,
    ) -> Result<(ResolvedLocation, Forecast), WeatherError> {
        let location = self.provider.geocode(query).await?;

        // Skip the second request if a newer query has already taken over
        if !self.is_current(generation) {
            return Err(WeatherError::StaleResult(query.to_string()));
        }

        let forecast = self.provider.forecast(&location).await?;
        Ok((location, forecast))
    }

    fn is_current(&self, generation: u64) -> bool {
        self.tracker.lock().generation == generation
    }

    /// Publish `next` if `generation` is still the newest. Returns false for
    /// stale results.
    fn apply(&self, generation: u64, next: WorkflowState) -> bool {
        let mut tracker = self.tracker.lock();
        if tracker.generation != generation {
            return false;
        }
        // A failed query can be retried by entering it again
        if matches!(next, WorkflowState::Failed(_)) {
            tracker.query = None;
        }
        self.state_tx.send_replace(next);
        true
    }
}

/// Clears `Loading` if the lookup ends without publishing a result, e.g. when
/// the `set_query` future is dropped mid-request.
struct LoadingGuard<'a> {
    workflow: &'a ForecastWorkflow,
    generation: u64,
}

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        let mut tracker = self.workflow.tracker.lock();
        if tracker.generation != self.generation || !self.workflow.is_loading() {
            return;
        }
        tracker.query = None;
        self.workflow.state_tx.send_replace(WorkflowState::Idle);
    }
}
