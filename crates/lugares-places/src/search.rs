//! Place search seam and the in-memory catalog stub behind it.

use std::future::Future;
use std::time::Duration;

use lugares_core::{matches_query, reference_catalog, Coordinate, Place};

use crate::error::SearchError;

/// A directory that can answer "what matches `query` near `near`".
///
/// Results come back in the backend's own order; the controller does no
/// re-ranking.
pub trait PlaceSearch: Send + Sync + 'static {
    fn search(
        &self,
        query: &str,
        near: Coordinate,
    ) -> impl Future<Output = Result<Vec<Place>, SearchError>> + Send;
}

/// Substring search over a fixed catalog, answered after a simulated latency.
///
/// The coordinate only gates the call upstream; it is not used for filtering
/// and the catalog's distances are static.
#[derive(Debug, Clone)]
pub struct CatalogSearch {
    catalog: Vec<Place>,
    latency: Duration,
}

impl CatalogSearch {
    #[must_use]
    pub fn new(catalog: Vec<Place>, latency: Duration) -> Self {
        Self { catalog, latency }
    }

    /// The built-in reference catalog with the given latency.
    #[must_use]
    pub fn with_reference_catalog(latency: Duration) -> Self {
        Self::new(reference_catalog(), latency)
    }

    #[must_use]
    pub fn catalog(&self) -> &[Place] {
        &self.catalog
    }

    fn filter(&self, query: &str) -> Vec<Place> {
        self.catalog
            .iter()
            .filter(|place| matches_query(place, query))
            .cloned()
            .collect()
    }
}

impl PlaceSearch for CatalogSearch {
    async fn search(&self, query: &str, near: Coordinate) -> Result<Vec<Place>, SearchError> {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        let places = self.filter(query);
        tracing::debug!(
            query,
            lat = near.lat,
            lng = near.lng,
            matches = places.len(),
            "catalog search complete"
        );
        Ok(places)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn madrid() -> Coordinate {
        Coordinate::new(40.4168, -3.7038)
    }

    fn names(places: &[Place]) -> Vec<&str> {
        places.iter().map(|p| p.name.as_str()).collect()
    }

    #[tokio::test]
    async fn cafe_query_matches_name_and_category() {
        let search = CatalogSearch::with_reference_catalog(Duration::ZERO);
        let places = search.search("café", madrid()).await.unwrap();
        assert_eq!(names(&places), vec!["Café Aromático"]);
    }

    #[tokio::test]
    async fn pelu_query_returns_only_the_salon() {
        let search = CatalogSearch::with_reference_catalog(Duration::ZERO);
        let places = search.search("pelu", madrid()).await.unwrap();
        assert_eq!(names(&places), vec!["Peluquería Estilo Moderno"]);
    }

    #[tokio::test]
    async fn query_is_case_insensitive() {
        let search = CatalogSearch::with_reference_catalog(Duration::ZERO);
        let places = search.search("RESTAURANTE", madrid()).await.unwrap();
        assert_eq!(names(&places), vec!["Restaurante El Buen Sabor"]);
    }

    #[tokio::test]
    async fn unmatched_query_returns_empty() {
        let search = CatalogSearch::with_reference_catalog(Duration::ZERO);
        let places = search.search("pizza", madrid()).await.unwrap();
        assert!(places.is_empty());
    }

    #[tokio::test]
    async fn results_keep_catalog_order() {
        // "a" appears in every reference entry.
        let search = CatalogSearch::with_reference_catalog(Duration::ZERO);
        let places = search.search("a", madrid()).await.unwrap();
        let ids: Vec<&str> = places.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[tokio::test]
    async fn waits_for_configured_latency() {
        let latency = Duration::from_millis(30);
        let search = CatalogSearch::with_reference_catalog(latency);
        let started = tokio::time::Instant::now();
        search.search("café", madrid()).await.unwrap();
        assert!(started.elapsed() >= latency);
    }
}
