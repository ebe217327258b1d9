//! Plain-text rendering of the page view models.

use std::fmt::Write as _;

use lugares_app::view::{
    FavoritesPanelView, LocationBanner, PageView, ResultCardView, ResultsView, SearchBarView,
};
use lugares_core::Place;

pub(crate) fn banner(banner: &LocationBanner) -> String {
    match banner {
        LocationBanner::Error { error } => {
            format!("[!] Location error: {error}   (retry: `locate`)")
        }
        LocationBanner::NeedsLocation { requesting: true } => {
            "[ ] Location needed: requesting...".to_string()
        }
        LocationBanner::NeedsLocation { requesting: false } => {
            "[ ] Location needed to find places near you   (allow: `locate`)".to_string()
        }
        LocationBanner::Active { requesting: true } => {
            "[x] Location active: refreshing...".to_string()
        }
        LocationBanner::Active { requesting: false } => {
            "[x] Location active: ready to search nearby places   (refresh: `locate`)".to_string()
        }
    }
}

pub(crate) fn search_bar(bar: &SearchBarView) -> String {
    let mut out = if bar.disabled {
        format!("Search: {} (searching...)", bar.value)
    } else if bar.value.is_empty() {
        "Search: <empty>".to_string()
    } else {
        format!("Search: {}", bar.value)
    };
    if !bar.suggestions.is_empty() {
        let chips = bar
            .suggestions
            .iter()
            .enumerate()
            .map(|(i, chip)| format!("{}) {chip}", i + 1))
            .collect::<Vec<_>>()
            .join("  ");
        let _ = write!(out, "\n  suggestions: {chips}");
    }
    out
}

pub(crate) fn card(card: &ResultCardView) -> String {
    let heart = if card.is_favorite { "♥" } else { "♡" };
    let mut out = format!(
        "{heart} [{}] {}  ({}, ★ {})\n    {}\n    {}",
        card.id, card.name, card.category, card.rating, card.description, card.address
    );
    if let Some(distance) = &card.distance {
        let _ = write!(out, "\n    {distance} away   (call: `call {}`)", card.id);
    }
    let _ = write!(out, "\n    image: {}", card.image);
    out
}

pub(crate) fn results(results: &ResultsView) -> String {
    match results {
        ResultsView::Grid(cards) => {
            let mut out = String::from("Search results");
            for c in cards {
                out.push('\n');
                out.push_str(&card(c));
            }
            out
        }
        ResultsView::NoMatches => {
            "No places found. Try restaurants, hair salons, cafés, etc.".to_string()
        }
        ResultsView::Welcome { categories } => format!(
            "Discover great places near you.\n  categories: {}   (`category <name>`)",
            categories.join(", ")
        ),
        ResultsView::Hidden => String::new(),
    }
}

pub(crate) fn favorites_panel(panel: &FavoritesPanelView) -> String {
    let mut out = format!("My favorites ({})", panel.count());
    if panel.is_empty() {
        out.push_str("\n  You have no favorites yet. Use `fav <id>` on any result to save it.");
        return out;
    }
    for item in &panel.items {
        let _ = write!(
            out,
            "\n  ♥ [{}] {}  (★ {}{})\n      {}\n      {}   (remove: `unfav {}`)",
            item.id,
            item.name,
            item.rating,
            item.distance
                .as_deref()
                .map(|d| format!(", {d}"))
                .unwrap_or_default(),
            item.description,
            item.address,
            item.id
        );
        if item.see_more_action {
            let _ = write!(out, "   (details: `more {}`)", item.id);
        }
    }
    if panel.bulk_actions {
        out.push_str("\n  actions: `clear` (remove all), `share` (share list)");
    }
    out
}

pub(crate) fn page(view: &PageView) -> String {
    let badge = view
        .favorites_badge
        .map(|n| format!("   ♥ {n}"))
        .unwrap_or_default();
    let mut out = format!("== Places near me =={badge}\n");
    out.push_str(&banner(&view.banner));
    out.push('\n');
    out.push_str(&search_bar(&view.search_bar));
    if let Some(err) = &view.search_error {
        let _ = write!(out, "\n[!] Search failed: {err}   (retry: `retry`)");
    }
    let body = results(&view.results);
    if !body.is_empty() {
        out.push('\n');
        out.push_str(&body);
    }
    out
}

pub(crate) fn catalog(places: &[Place]) -> String {
    places
        .iter()
        .map(|p| {
            format!(
                "[{}] {} ({}) ★ {} | {} | {}",
                p.id,
                p.name,
                p.category,
                p.rating,
                p.address,
                p.distance.as_deref().unwrap_or("-")
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}
