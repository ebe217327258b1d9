use serde::{Deserialize, Serialize};

/// A place returned by a search.
///
/// Places are value objects: two places are the same place when their `id`
/// matches, regardless of the other fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Place {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rating: f64,
    pub address: String,
    pub category: String,
    /// Pre-formatted distance, e.g. `"0.2 km"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance: Option<String>,
    /// Image URI. Renderers substitute a placeholder when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl PartialEq for Place {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Place {}

impl Place {
    /// The image URI, or `placeholder` when the place has none.
    #[must_use]
    pub fn image_or<'a>(&'a self, placeholder: &'a str) -> &'a str {
        self.image.as_deref().unwrap_or(placeholder)
    }
}

/// Returns `true` when `query` is a case-insensitive substring of the place's
/// name or category.
///
/// An empty query matches everything; callers gate blank queries before
/// reaching this point.
#[must_use]
pub fn matches_query(place: &Place, query: &str) -> bool {
    let needle = query.to_lowercase();
    place.name.to_lowercase().contains(&needle) || place.category.to_lowercase().contains(&needle)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(id: &str, name: &str, category: &str) -> Place {
        Place {
            id: id.to_string(),
            name: name.to_string(),
            description: String::new(),
            rating: 4.0,
            address: String::new(),
            category: category.to_string(),
            distance: None,
            image: None,
        }
    }

    #[test]
    fn matches_name_case_insensitively() {
        let p = place("1", "Café Aromático", "Café");
        assert!(matches_query(&p, "AROMÁ"));
        assert!(matches_query(&p, "café"));
    }

    #[test]
    fn matches_category_only() {
        let p = place("1", "Estilo Moderno", "Peluquería");
        assert!(matches_query(&p, "pelu"));
    }

    #[test]
    fn rejects_non_matching_query() {
        let p = place("1", "Restaurante El Buen Sabor", "Restaurante");
        assert!(!matches_query(&p, "café"));
    }

    #[test]
    fn equality_is_by_id() {
        let a = place("7", "A", "x");
        let mut b = place("7", "B", "y");
        b.rating = 1.0;
        assert_eq!(a, b);
        assert_ne!(a, place("8", "A", "x"));
    }

    #[test]
    fn image_falls_back_to_placeholder() {
        let mut p = place("1", "A", "x");
        assert_eq!(p.image_or("/placeholder.svg"), "/placeholder.svg");
        p.image = Some("/a.png".to_string());
        assert_eq!(p.image_or("/placeholder.svg"), "/a.png");
    }
}
