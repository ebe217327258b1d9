use std::collections::HashSet;

use lugares_core::Place;

/// Session favorites, keyed by place id and kept in insertion order.
///
/// Stores its own copies of places, so a favorite survives the result set it
/// was picked from.
#[derive(Debug, Clone, Default)]
pub struct FavoritesSet {
    places: Vec<Place>,
    ids: HashSet<String>,
}

impl FavoritesSet {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Remove `place` if it is a favorite, add it otherwise.
    ///
    /// Returns whether the place is a favorite afterwards.
    pub fn toggle(&mut self, place: &Place) -> bool {
        if self.remove(&place.id).is_some() {
            false
        } else {
            self.ids.insert(place.id.clone());
            self.places.push(place.clone());
            true
        }
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn remove(&mut self, id: &str) -> Option<Place> {
        if !self.ids.remove(id) {
            return None;
        }
        let index = self.places.iter().position(|p| p.id == id)?;
        Some(self.places.remove(index))
    }

    /// Empty the set in one step.
    pub fn clear(&mut self) {
        self.places.clear();
        self.ids.clear();
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Place> {
        self.places.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Place> {
        self.places.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.places.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.places.is_empty()
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

    fn ids(set: &FavoritesSet) -> Vec<&str> {
        set.iter().map(|p| p.id.as_str()).collect()
    }

    #[test]
    fn toggle_adds_then_removes() {
        let mut set = FavoritesSet::new();
        assert!(set.toggle(&place("1")));
        assert!(set.is_favorite("1"));
        assert!(!set.toggle(&place("1")));
        assert!(!set.is_favorite("1"));
        assert!(set.is_empty());
    }

    #[test]
    fn double_toggle_leaves_set_unchanged() {
        let mut set = FavoritesSet::new();
        set.toggle(&place("1"));
        set.toggle(&place("2"));
        let before: Vec<String> = set.iter().map(|p| p.id.clone()).collect();

        for id in ["1", "3"] {
            set.toggle(&place(id));
            set.toggle(&place(id));
        }
        // Re-adding "1" moves it to the end; membership is what is preserved.
        let mut after: Vec<String> = set.iter().map(|p| p.id.clone()).collect();
        after.sort();
        assert_eq!(after, before);
    }

    #[test]
    fn keeps_insertion_order() {
        let mut set = FavoritesSet::new();
        for id in ["3", "1", "2"] {
            set.toggle(&place(id));
        }
        assert_eq!(ids(&set), vec!["3", "1", "2"]);
    }

    #[test]
    fn no_duplicate_ids() {
        let mut set = FavoritesSet::new();
        set.toggle(&place("1"));
        let mut renamed = place("1");
        renamed.name = "Other name".to_string();
        set.toggle(&renamed);
        assert!(set.is_empty(), "same id toggles off even with different fields");
    }

    #[test]
    fn clear_removes_every_member() {
        let mut set = FavoritesSet::new();
        for id in ["1", "2", "3", "4", "5"] {
            set.toggle(&place(id));
        }
        set.clear();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        for id in ["1", "2", "3", "4", "5"] {
            assert!(!set.is_favorite(id), "{id} survived clear");
        }
    }

    #[test]
    fn remove_unknown_id_is_none() {
        let mut set = FavoritesSet::new();
        set.toggle(&place("1"));
        assert!(set.remove("9").is_none());
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn favorite_copy_is_independent_of_source() {
        let mut set = FavoritesSet::new();
        let mut source = place("1");
        set.toggle(&source);
        source.name = "Mutated".to_string();
        assert_eq!(set.get("1").map(|p| p.name.as_str()), Some("Place 1"));
    }
}
