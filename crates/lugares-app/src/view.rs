//! View models for the four page surfaces.
//!
//! Each is a pure projection of controller state: building one never mutates
//! anything, and none of them carries state into the next render.

use lugares_core::{LocationError, Place};

use crate::favorites::FavoritesSet;
use crate::state::{LocationState, SearchState, SearchStatus};

pub const CARD_IMAGE_PLACEHOLDER: &str =
    "/placeholder.svg?height=240&width=320&query=modern restaurant interior";
pub const FAVORITE_IMAGE_PLACEHOLDER: &str = "/placeholder.svg?height=80&width=80&query=restaurant";

/// Quick-fill chips shown under an empty search field.
pub const SUGGESTIONS: [&str; 4] = ["🍕 Pizza", "☕ Café", "✂️ Peluquería", "🛍️ Tienda"];

/// Shortcuts on the welcome screen; these search immediately.
pub const CATEGORY_SHORTCUTS: [&str; 4] = ["Restaurantes", "Peluquerías", "Cafés", "Tiendas"];

/// The text a suggestion chip puts in the search field (the label after the icon).
#[must_use]
pub fn suggestion_value(chip: &str) -> &str {
    chip.split(' ').nth(1).unwrap_or(chip)
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocationBanner {
    /// Last request failed; shows the message and a retry action.
    Error { error: LocationError },
    /// No location yet; the request action is disabled while `requesting`.
    NeedsLocation { requesting: bool },
    /// Location available; the refresh action is disabled while `requesting`.
    Active { requesting: bool },
}

impl LocationBanner {
    #[must_use]
    pub fn from_state(state: &LocationState) -> Self {
        if let Some(error) = state.error() {
            return Self::Error { error };
        }
        let requesting = state.is_pending();
        if state.coordinate().is_some() {
            Self::Active { requesting }
        } else {
            Self::NeedsLocation { requesting }
        }
    }

    #[must_use]
    pub fn action_enabled(&self) -> bool {
        match self {
            Self::Error { .. } => true,
            Self::NeedsLocation { requesting } | Self::Active { requesting } => !requesting,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarView {
    pub value: String,
    /// Field is read-only while a search is in flight; its value stays visible.
    pub disabled: bool,
    pub submit_enabled: bool,
    pub suggestions: Vec<&'static str>,
}

impl SearchBarView {
    #[must_use]
    pub fn from_state(state: &SearchState) -> Self {
        let loading = state.is_pending();
        let value = state.field().to_string();
        let suggestions = if value.is_empty() {
            SUGGESTIONS.to_vec()
        } else {
            Vec::new()
        };
        Self {
            submit_enabled: !loading && !value.trim().is_empty(),
            disabled: loading,
            value,
            suggestions,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ResultCardView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rating: f64,
    pub address: String,
    pub category: String,
    pub image: String,
    pub distance: Option<String>,
    pub is_favorite: bool,
    /// The "call" placeholder is only offered for places with a distance.
    pub call_action: bool,
}

impl ResultCardView {
    #[must_use]
    pub fn new(place: &Place, is_favorite: bool) -> Self {
        Self {
            id: place.id.clone(),
            name: place.name.clone(),
            description: place.description.clone(),
            rating: place.rating,
            address: place.address.clone(),
            category: place.category.clone(),
            image: place.image_or(CARD_IMAGE_PLACEHOLDER).to_string(),
            distance: place.distance.clone(),
            is_favorite,
            call_action: place.distance.is_some(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ResultsView {
    Grid(Vec<ResultCardView>),
    /// No results, text in the field, and no search in flight.
    NoMatches,
    /// Nothing searched and the field is blank.
    Welcome { categories: [&'static str; 4] },
    Hidden,
}

impl ResultsView {
    #[must_use]
    pub fn from_state(state: &SearchState, favorites: &FavoritesSet) -> Self {
        if !state.results().is_empty() {
            return Self::Grid(
                state
                    .results()
                    .iter()
                    .map(|p| ResultCardView::new(p, favorites.is_favorite(&p.id)))
                    .collect(),
            );
        }
        if state.field().is_empty() {
            return Self::Welcome {
                categories: CATEGORY_SHORTCUTS,
            };
        }
        match state.status() {
            SearchStatus::Pending => Self::Hidden,
            _ => Self::NoMatches,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FavoriteItemView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rating: f64,
    pub address: String,
    pub distance: Option<String>,
    pub image: String,
    /// The "see more" placeholder offered on every saved place.
    pub see_more_action: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FavoritesPanelView {
    pub items: Vec<FavoriteItemView>,
    /// Bulk actions ("clear all", "share list") only show when non-empty.
    pub bulk_actions: bool,
}

impl FavoritesPanelView {
    #[must_use]
    pub fn from_set(favorites: &FavoritesSet) -> Self {
        let items = favorites
            .iter()
            .map(|p| FavoriteItemView {
                id: p.id.clone(),
                name: p.name.clone(),
                description: p.description.clone(),
                rating: p.rating,
                address: p.address.clone(),
                distance: p.distance.clone(),
                image: p.image_or(FAVORITE_IMAGE_PLACEHOLDER).to_string(),
                see_more_action: true,
            })
            .collect::<Vec<_>>();
        Self {
            bulk_actions: !items.is_empty(),
            items,
        }
    }

    #[must_use]
    pub fn count(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Everything the page shows for one render.
#[derive(Debug, Clone, PartialEq)]
pub struct PageView {
    /// Header badge; absent when there are no favorites.
    pub favorites_badge: Option<usize>,
    pub banner: LocationBanner,
    pub search_bar: SearchBarView,
    pub results: ResultsView,
    /// Inline message for a failed search, with a retry action.
    pub search_error: Option<String>,
    pub favorites: FavoritesPanelView,
}

impl PageView {
    #[must_use]
    pub fn build(location: &LocationState, search: &SearchState, favorites: &FavoritesSet) -> Self {
        let search_error = match search.status() {
            SearchStatus::Failed(err) => Some(err.to_string()),
            _ => None,
        };
        Self {
            favorites_badge: (!favorites.is_empty()).then(|| favorites.len()),
            banner: LocationBanner::from_state(location),
            search_bar: SearchBarView::from_state(search),
            results: ResultsView::from_state(search, favorites),
            search_error,
            favorites: FavoritesPanelView::from_set(favorites),
        }
    }
}
