//! The page-level controller.
//!
//! User intents arrive as method calls and mutate state synchronously. The two
//! asynchronous collaborators (geolocation and search) run as spawned tasks
//! that report back through an [`AppEvent`] channel; the owner of the
//! [`App`] feeds those events into [`App::apply`] from the same task that
//! handles intents, so state only ever changes in one place at a time.
//!
//! Neither kind of request can be cancelled, and concurrent requests are not
//! de-duplicated.

use std::sync::Arc;

use tokio::sync::mpsc;

use lugares_core::{AppConfig, Coordinate, LocationError, Place, PositionError, PositionOptions};
use lugares_places::{GeolocationProvider, PlaceSearch, SearchError};

use crate::favorites::FavoritesSet;
use crate::state::{LocationState, SearchState};
use crate::view::{suggestion_value, PageView};

/// Completion of an asynchronous request.
#[derive(Debug, Clone)]
pub enum AppEvent {
    LocationResolved(Coordinate),
    LocationFailed(PositionError),
    SearchCompleted {
        generation: u64,
        query: String,
        outcome: Result<Vec<Place>, SearchError>,
    },
}

#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    pub position: PositionOptions,
    /// Drop results from a search that has been superseded by a newer one.
    /// When `false`, whichever search completes last wins.
    pub discard_stale_searches: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            position: PositionOptions::default(),
            discard_stale_searches: true,
        }
    }
}

impl ControllerOptions {
    #[must_use]
    pub fn from_app_config(config: &AppConfig) -> Self {
        Self {
            position: config.position_options(),
            discard_stale_searches: config.discard_stale_searches,
        }
    }
}

pub struct App<G, S> {
    geolocation: Option<Arc<G>>,
    search: Arc<S>,
    options: ControllerOptions,
    location: LocationState,
    results: SearchState,
    favorites: FavoritesSet,
    events: mpsc::UnboundedSender<AppEvent>,
}

impl<G, S> App<G, S>
where
    G: GeolocationProvider,
    S: PlaceSearch,
{
    /// Build a controller and the receiving end of its event channel.
    ///
    /// `geolocation = None` models a session with no geolocation capability.
    #[must_use]
    pub fn new(
        geolocation: Option<G>,
        search: S,
        options: ControllerOptions,
    ) -> (Self, mpsc::UnboundedReceiver<AppEvent>) {
        let (events, rx) = mpsc::unbounded_channel();
        let app = Self {
            geolocation: geolocation.map(Arc::new),
            search: Arc::new(search),
            options,
            location: LocationState::default(),
            results: SearchState::default(),
            favorites: FavoritesSet::new(),
            events,
        };
        (app, rx)
    }

    #[must_use]
    pub fn location(&self) -> &LocationState {
        &self.location
    }

    #[must_use]
    pub fn results(&self) -> &SearchState {
        &self.results
    }

    #[must_use]
    pub fn favorites(&self) -> &FavoritesSet {
        &self.favorites
    }

    #[must_use]
    pub fn search_backend(&self) -> &S {
        &self.search
    }

    #[must_use]
    pub fn view(&self) -> PageView {
        PageView::build(&self.location, &self.results, &self.favorites)
    }

    /// Session start: ask for the location straight away.
    pub fn start(&mut self) {
        tracing::info!("session started");
        self.request_location();
    }

    /// Ask the geolocation capability for a fix.
    ///
    /// Without a capability the state goes straight to
    /// `Failed(Unsupported)`. Otherwise it goes to `Pending` and the outcome
    /// arrives later as an [`AppEvent`].
    pub fn request_location(&mut self) {
        let Some(provider) = self.geolocation.as_ref().map(Arc::clone) else {
            tracing::warn!("geolocation not supported");
            self.location.fail(LocationError::Unsupported);
            return;
        };

        self.location.begin();
        tracing::debug!("location request pending");

        let options = self.options.position;
        let events = self.events.clone();
        tokio::spawn(async move {
            let event = match provider.current_position(options).await {
                Ok(coordinate) => AppEvent::LocationResolved(coordinate),
                Err(err) => AppEvent::LocationFailed(err),
            };
            if events.send(event).is_err() {
                tracing::debug!("controller gone; dropping location outcome");
            }
        });
    }

    /// Update the search field without searching.
    pub fn set_query(&mut self, value: impl Into<String>) {
        self.results.set_field(value.into());
    }

    /// Fill the search field from a suggestion chip. Does not submit.
    pub fn apply_suggestion(&mut self, chip: &str) {
        self.set_query(suggestion_value(chip));
    }

    /// Submit the current field value. Returns whether a search was issued.
    pub fn submit_search(&mut self) -> bool {
        let query = self.results.field().trim().to_string();
        self.search(&query)
    }

    /// Welcome-screen shortcut: put `label` in the field and search for it.
    pub fn search_category(&mut self, label: &str) -> bool {
        self.set_query(label);
        self.search(label)
    }

    /// Re-issue the last submitted query.
    pub fn retry_search(&mut self) -> bool {
        match self.results.submitted().map(str::to_string) {
            Some(query) => self.search(&query),
            None => false,
        }
    }

    /// Search for `query` near the current location.
    ///
    /// A blank query, or a session without a location, is a no-op: the status
    /// does not change and no request is made. Returns whether a search was
    /// issued.
    pub fn search(&mut self, query: &str) -> bool {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("ignoring blank search");
            return false;
        }
        let Some(near) = self.location.coordinate() else {
            tracing::debug!(query, "ignoring search without a location");
            return false;
        };

        let generation = self.results.begin(query);
        tracing::info!(query, generation, "search started");

        let backend = Arc::clone(&self.search);
        let events = self.events.clone();
        let query = query.to_string();
        tokio::spawn(async move {
            let outcome = backend.search(&query, near).await;
            let event = AppEvent::SearchCompleted {
                generation,
                query,
                outcome,
            };
            if events.send(event).is_err() {
                tracing::debug!("controller gone; dropping search outcome");
            }
        });
        true
    }

    /// Toggle a place by id, looking it up in the current results first and
    /// then among the favorites. Returns the new membership, or `None` for an
    /// unknown id.
    pub fn toggle_favorite(&mut self, id: &str) -> Option<bool> {
        let place = self
            .results
            .results()
            .iter()
            .find(|p| p.id == id)
            .or_else(|| self.favorites.get(id))
            .cloned()?;
        Some(self.toggle_place(&place))
    }

    pub fn toggle_place(&mut self, place: &Place) -> bool {
        let now_favorite = self.favorites.toggle(place);
        tracing::debug!(id = %place.id, now_favorite, "favorite toggled");
        now_favorite
    }

    pub fn remove_favorite(&mut self, id: &str) -> Option<Place> {
        let removed = self.favorites.remove(id);
        if removed.is_some() {
            tracing::debug!(id, "favorite removed");
        }
        removed
    }

    pub fn clear_favorites(&mut self) {
        tracing::debug!(count = self.favorites.len(), "clearing favorites");
        self.favorites.clear();
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.is_favorite(id)
    }

    /// Apply a completed request to state.
    pub fn apply(&mut self, event: AppEvent) {
        match event {
            AppEvent::LocationResolved(coordinate) => {
                tracing::info!(lat = coordinate.lat, lng = coordinate.lng, "location resolved");
                self.location.resolve(coordinate);
            }
            AppEvent::LocationFailed(err) => {
                let error = LocationError::from(&err);
                tracing::warn!(code = err.code, error = %err, "location request failed");
                self.location.fail(error);
            }
            AppEvent::SearchCompleted {
                generation,
                query,
                outcome,
            } => {
                let failure = outcome.as_ref().err().cloned();
                let applied =
                    self.results
                        .complete(generation, outcome, self.options.discard_stale_searches);
                if !applied {
                    tracing::debug!(
                        query = %query,
                        generation,
                        latest = self.results.generation(),
                        "discarding stale search results"
                    );
                } else if let Some(err) = failure {
                    tracing::warn!(query = %query, error = %err, "search failed");
                } else {
                    tracing::info!(
                        query = %query,
                        generation,
                        results = self.results.results().len(),
                        "search complete"
                    );
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "controller_test.rs"]
mod tests;
