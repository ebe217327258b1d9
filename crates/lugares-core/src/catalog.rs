//! The place directory searched by the catalog stub.
//!
//! A built-in reference catalog ships with the crate; a YAML file can replace
//! it via `LUGARES_CATALOG_PATH`.

use std::collections::HashSet;
use std::path::Path;

use serde::Deserialize;

use crate::{ConfigError, Place};

#[derive(Debug, Deserialize)]
pub struct CatalogFile {
    pub places: Vec<Place>,
}

/// The reference catalog, in display order.
#[must_use]
pub fn reference_catalog() -> Vec<Place> {
    vec![
        Place {
            id: "1".to_string(),
            name: "Restaurante El Buen Sabor".to_string(),
            description: "Comida tradicional con los mejores ingredientes locales".to_string(),
            rating: 4.5,
            address: "Calle Principal 123".to_string(),
            category: "Restaurante".to_string(),
            distance: Some("0.2 km".to_string()),
            image: Some("/cozy-italian-restaurant.png".to_string()),
        },
        Place {
            id: "2".to_string(),
            name: "Peluquería Estilo Moderno".to_string(),
            description: "Cortes modernos y tratamientos capilares profesionales".to_string(),
            rating: 4.8,
            address: "Avenida Central 456".to_string(),
            category: "Peluquería".to_string(),
            distance: Some("0.5 km".to_string()),
            image: Some("/hair-salon-interior.png".to_string()),
        },
        Place {
            id: "3".to_string(),
            name: "Café Aromático".to_string(),
            description: "El mejor café de la ciudad con ambiente acogedor".to_string(),
            rating: 4.3,
            address: "Plaza Mayor 789".to_string(),
            category: "Café".to_string(),
            distance: Some("0.8 km".to_string()),
            image: Some("/cozy-corner-cafe.png".to_string()),
        },
    ]
}

/// Load and validate a catalog from a YAML file.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_catalog(path: &Path) -> Result<Vec<Place>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::CatalogFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_catalog(&content)
}

fn parse_catalog(content: &str) -> Result<Vec<Place>, ConfigError> {
    let file: CatalogFile = serde_yaml::from_str(content)?;
    validate_catalog(&file.places)?;
    Ok(file.places)
}

fn validate_catalog(places: &[Place]) -> Result<(), ConfigError> {
    let mut seen_ids = HashSet::new();

    for place in places {
        if place.id.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "place '{}' has an empty id",
                place.name
            )));
        }

        if place.name.trim().is_empty() {
            return Err(ConfigError::Validation(format!(
                "place '{}' has an empty name",
                place.id
            )));
        }

        if !(0.0..=5.0).contains(&place.rating) {
            return Err(ConfigError::Validation(format!(
                "place '{}' has rating {}; must be between 0 and 5",
                place.id, place.rating
            )));
        }

        if !seen_ids.insert(place.id.as_str()) {
            return Err(ConfigError::Validation(format!(
                "duplicate place id: '{}'",
                place.id
            )));
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_catalog_is_valid() {
        let places = reference_catalog();
        assert_eq!(places.len(), 3);
        assert!(validate_catalog(&places).is_ok());
    }

    #[test]
    fn parses_yaml_with_optional_fields_missing() {
        let yaml = r#"
places:
  - id: "a"
    name: "Librería Central"
    description: "Libros nuevos y usados"
    rating: 4.1
    address: "Calle Sol 1"
    category: "Librería"
"#;
        let places = parse_catalog(yaml).unwrap();
        assert_eq!(places.len(), 1);
        assert!(places[0].distance.is_none());
        assert!(places[0].image.is_none());
    }

    #[test]
    fn rejects_duplicate_ids() {
        let mut places = reference_catalog();
        places[2].id = "1".to_string();
        let err = validate_catalog(&places).unwrap_err();
        assert!(
            matches!(err, ConfigError::Validation(ref msg) if msg.contains("duplicate place id")),
            "got: {err:?}"
        );
    }

    #[test]
    fn rejects_out_of_range_rating() {
        let mut places = reference_catalog();
        places[0].rating = 5.5;
        assert!(matches!(
            validate_catalog(&places),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn rejects_empty_id() {
        let mut places = reference_catalog();
        places[1].id = "  ".to_string();
        assert!(matches!(
            validate_catalog(&places),
            Err(ConfigError::Validation(_))
        ));
    }

    #[test]
    fn malformed_yaml_is_a_parse_error() {
        let err = parse_catalog("places: [not: valid: yaml").unwrap_err();
        assert!(matches!(err, ConfigError::CatalogFileParse(_)));
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = load_catalog(Path::new("/nonexistent/lugares/places.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::CatalogFileIo { .. }));
    }
}
