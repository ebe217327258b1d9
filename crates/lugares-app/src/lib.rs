//! Session controller for the places-near-me page.
//!
//! [`App`] owns the three state slices (location, search results, favorites)
//! and is the only place they are mutated. Presentation code reads them through
//! the view models in [`view`] and reports user intents back as method calls.

pub mod controller;
pub mod favorites;
pub mod state;
pub mod view;

pub use controller::{App, AppEvent, ControllerOptions};
pub use favorites::FavoritesSet;
pub use state::{LocationRequestState, LocationState, SearchState, SearchStatus};
