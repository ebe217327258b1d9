use lugares_core::{Coordinate, LocationError, Place};
use lugares_places::SearchError;

/// Lifecycle of the most recent location request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LocationRequestState {
    Idle,
    Pending,
    Resolved(Coordinate),
    Failed(LocationError),
}

/// Location slice: the request lifecycle plus the last coordinate obtained.
///
/// The coordinate outlives later refreshes: a pending or failed refresh does
/// not take away a location the session already had.
#[derive(Debug, Clone)]
pub struct LocationState {
    request: LocationRequestState,
    coordinate: Option<Coordinate>,
}

impl Default for LocationState {
    fn default() -> Self {
        Self {
            request: LocationRequestState::Idle,
            coordinate: None,
        }
    }
}

impl LocationState {
    #[must_use]
    pub fn request(&self) -> LocationRequestState {
        self.request
    }

    #[must_use]
    pub fn coordinate(&self) -> Option<Coordinate> {
        self.coordinate
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.request == LocationRequestState::Pending
    }

    #[must_use]
    pub fn error(&self) -> Option<LocationError> {
        match self.request {
            LocationRequestState::Failed(err) => Some(err),
            _ => None,
        }
    }

    pub(crate) fn begin(&mut self) {
        self.request = LocationRequestState::Pending;
    }

    pub(crate) fn resolve(&mut self, coordinate: Coordinate) {
        self.request = LocationRequestState::Resolved(coordinate);
        self.coordinate = Some(coordinate);
    }

    pub(crate) fn fail(&mut self, error: LocationError) {
        self.request = LocationRequestState::Failed(error);
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchStatus {
    Idle,
    Pending,
    Done,
    Failed(SearchError),
}

/// Search slice: the search-bar value, the submitted query, and its results.
///
/// Results from the previous search stay in place while a new one is pending
/// and are replaced wholesale when it completes.
#[derive(Debug, Clone)]
pub struct SearchState {
    field: String,
    submitted: Option<String>,
    status: SearchStatus,
    results: Vec<Place>,
    generation: u64,
}

impl Default for SearchState {
    fn default() -> Self {
        Self {
            field: String::new(),
            submitted: None,
            status: SearchStatus::Idle,
            results: Vec::new(),
            generation: 0,
        }
    }
}

impl SearchState {
    /// Current text in the search field.
    #[must_use]
    pub fn field(&self) -> &str {
        &self.field
    }

    /// The last query handed to the search backend.
    #[must_use]
    pub fn submitted(&self) -> Option<&str> {
        self.submitted.as_deref()
    }

    #[must_use]
    pub fn status(&self) -> &SearchStatus {
        &self.status
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.status == SearchStatus::Pending
    }

    #[must_use]
    pub fn results(&self) -> &[Place] {
        &self.results
    }

    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub(crate) fn set_field(&mut self, value: String) {
        self.field = value;
    }

    /// Mark a new request in flight and return its generation.
    pub(crate) fn begin(&mut self, query: &str) -> u64 {
        self.generation += 1;
        self.submitted = Some(query.to_string());
        self.status = SearchStatus::Pending;
        self.generation
    }

    /// Apply a finished request. Returns `false` when the outcome was dropped
    /// as stale.
    pub(crate) fn complete(
        &mut self,
        generation: u64,
        outcome: Result<Vec<Place>, SearchError>,
        discard_stale: bool,
    ) -> bool {
        if discard_stale && generation != self.generation {
            return false;
        }

        match outcome {
            Ok(places) => {
                self.results = places;
                self.status = SearchStatus::Done;
            }
            Err(err) => self.status = SearchStatus::Failed(err),
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str) -> Place {
        Place {
            id: id.to_string(),
            name: format!("Place {id}"),
            description: String::new(),
            rating: 4.0,
            address: String::new(),
            category: "Test".to_string(),
            distance: None,
            image: None,
        }
    }

    #[test]
    fn location_keeps_coordinate_across_failed_refresh() {
        let mut state = LocationState::default();
        state.begin();
        state.resolve(Coordinate::new(1.0, 2.0));
        state.begin();
        assert!(state.is_pending());
        state.fail(LocationError::Timeout);
        assert_eq!(state.error(), Some(LocationError::Timeout));
        assert_eq!(state.coordinate(), Some(Coordinate::new(1.0, 2.0)));
    }

    #[test]
    fn search_generations_increase() {
        let mut state = SearchState::default();
        assert_eq!(state.begin("a"), 1);
        assert_eq!(state.begin("b"), 2);
        assert_eq!(state.submitted(), Some("b"));
    }

    #[test]
    fn stale_completion_is_dropped_when_discarding() {
        let mut state = SearchState::default();
        let first = state.begin("a");
        let _second = state.begin("b");
        assert!(!state.complete(first, Ok(vec![place("1")]), true));
        assert!(state.is_pending());
        assert!(state.results().is_empty());
    }

    #[test]
    fn stale_completion_wins_when_not_discarding() {
        let mut state = SearchState::default();
        let first = state.begin("a");
        let _second = state.begin("b");
        assert!(state.complete(first, Ok(vec![place("1")]), false));
        assert_eq!(state.status(), &SearchStatus::Done);
        assert_eq!(state.results().len(), 1);
    }

    #[test]
    fn failure_keeps_previous_results() {
        let mut state = SearchState::default();
        let g = state.begin("a");
        state.complete(g, Ok(vec![place("1"), place("2")]), true);
        let g = state.begin("b");
        assert_eq!(state.results().len(), 2, "old results visible while pending");
        state.complete(g, Err(SearchError::Unavailable("down".into())), true);
        assert!(matches!(state.status(), SearchStatus::Failed(_)));
        assert_eq!(state.results().len(), 2);
    }
}
